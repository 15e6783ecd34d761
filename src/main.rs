//! loan-matcher CLI
//!
//! Assess, match and price loan requests from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Full pipeline report from a JSON file
//! loan-matcher run --input market.json
//!
//! # Ranked matches as JSON
//! loan-matcher match --input market.json --format json
//!
//! # Generate a reproducible synthetic input file
//! loan-matcher generate --borrowers 20 --lenders 8 --seed 7 --output market.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use loan_matcher::assessment::risk::RiskAssessor;
use loan_matcher::core::term::MarketRates;
use loan_matcher::matching::matcher::{format_amount, Matcher};
use loan_matcher::matching::summary::MatchSummary;
use loan_matcher::pipeline::{BorrowerAssessment, LoanPipeline, PipelineInput};
use loan_matcher::recommendation::recommender::Recommender;
use loan_matcher::simulation::market_data::{
    EconomicIndicators, MarketRateSource, SimulatedMarketData,
};
use loan_matcher::simulation::synthetic::{
    GeneratorConfig, IdGenerator, SequentialIds, SyntheticDataGenerator, UuidIds,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"loan-matcher — rule-based borrower/lender matching and loan recommendation

USAGE:
    loan-matcher <COMMAND> [OPTIONS]

COMMANDS:
    assess      Score default risk for every borrower
    match       Rank eligible borrower/lender pairs
    recommend   Propose rate, term and payment for every eligible pair
    run         Assess, match and recommend in one report
    generate    Generate a synthetic input file (for testing)
    rates       Show simulated market rates and economic indicators
    help        Show this message

OPTIONS (assess, match, recommend, run):
    --input <FILE>      Path to JSON input file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --borrowers <N>     Number of borrowers (default: 3)
    --lenders <N>       Number of lenders (default: 2)
    --seed <S>          Seed for reproducible output
    --uuid              Use UUID identifiers instead of sequential ones
    --output <FILE>     Write to file instead of stdout

OPTIONS (rates):
    --seed <S>          Seed for the simulated indicators
    --format <FORMAT>   Output format: text (default) or json

INPUT FORMAT:
    {{ "borrowers": [...], "lenders": [...], "market_rates": {{ "12": "6.25" }} }}
    market_rates is optional and defaults to the simulated table.

EXAMPLES:
    loan-matcher run --input market.json
    loan-matcher match --input market.json --format json
    loan-matcher generate --borrowers 20 --lenders 8 --seed 7 --output market.json
    loan-matcher rates"#
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> Self {
        match s {
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            other => {
                eprintln!("Unknown format '{}': expected 'text' or 'json'", other);
                process::exit(1);
            }
        }
    }
}

/// Options shared by the commands that read an input file.
struct InputOptions {
    path: String,
    format: OutputFormat,
}

fn parse_input_options(args: &[String]) -> InputOptions {
    let mut input_path = None;
    let mut format = OutputFormat::Text;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = OutputFormat::parse(args.get(i).map(String::as_str).unwrap_or_else(
                    || {
                        eprintln!("--format requires 'text' or 'json'");
                        process::exit(1);
                    },
                ));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    InputOptions { path, format }
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("{} requires a number", flag);
            process::exit(1);
        })
}

/// Read, parse and validate an input file.
fn load_input(path: &str) -> PipelineInput {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let input: PipelineInput = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "borrowers": [
    {{ "id": "b-0001", "name": "Mary Smith", "email": "mary@example.com",
      "loan_amount": "5000", "loan_purpose": "education", "loan_term": 12,
      "credit_score": 720, "income": "65000", "employment_status": "full_time",
      "debt_to_income_ratio": "20", "housing_status": "rent" }}
  ],
  "lenders": [
    {{ "id": "l-0001", "name": "John Brown", "email": "john@example.com",
      "amount_to_lend": "50000", "min_credit_score": 650, "interest_rate": "7.5",
      "max_risk_tolerance": 50, "preferred_purposes": ["education"],
      "loan_terms": [12, 24] }}
  ]
}}"#
        );
        process::exit(1);
    });

    for borrower in &input.borrowers {
        if let Err(e) = borrower.validate() {
            eprintln!("Invalid borrower '{}': {}", borrower.id, e);
            process::exit(1);
        }
    }
    for lender in &input.lenders {
        if let Err(e) = lender.validate() {
            eprintln!("Invalid lender '{}': {}", lender.id, e);
            process::exit(1);
        }
    }

    log::debug!(
        "loaded {} borrowers and {} lenders from {}",
        input.borrowers.len(),
        input.lenders.len(),
        path
    );
    input
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        process::exit(1);
    });
    println!("{}", json);
}

fn cmd_assess(args: &[String]) {
    let opts = parse_input_options(args);
    let input = load_input(&opts.path);

    let mut assessments = Vec::new();
    for borrower in &input.borrowers {
        match RiskAssessor::assess(borrower) {
            Ok(assessment) => assessments.push(BorrowerAssessment {
                borrower_id: borrower.id.clone(),
                assessment,
            }),
            Err(e) => eprintln!("Cannot assess borrower '{}': {}", borrower.id, e),
        }
    }

    if opts.format == OutputFormat::Json {
        print_json(&assessments);
        return;
    }

    println!("=== Risk Assessments ===");
    for entry in &assessments {
        let a = &entry.assessment;
        let f = &a.risk_factors;
        println!("\n{}  risk {} ({})", entry.borrower_id, a.risk_score, a.band);
        println!("  Credit score impact:     {}", f.credit_score_impact.round_dp(2));
        println!("  Debt-to-income impact:   {}", f.debt_to_income_impact.round_dp(2));
        println!("  Employment impact:       {}", f.employment_status_impact.round_dp(2));
        println!("  Loan-to-income impact:   {}", f.loan_amount_impact.round_dp(2));
        println!("  Income impact:           {}", f.income_impact.round_dp(2));
        println!("  {}", a.explanation);
    }
}

fn cmd_match(args: &[String]) {
    let opts = parse_input_options(args);
    let input = load_input(&opts.path);
    let (borrowers, _) = LoanPipeline::assess_all(input.borrowers);

    let matches = Matcher::match_all(&borrowers, &input.lenders);
    let summary = MatchSummary::from_matches(&matches);

    if opts.format == OutputFormat::Json {
        #[derive(Serialize)]
        struct MatchOutput<'a> {
            summary: MatchSummary,
            matches: &'a [loan_matcher::matching::matcher::Match],
        }
        print_json(&MatchOutput {
            summary,
            matches: &matches,
        });
        return;
    }

    println!("=== Matches ===");
    if matches.is_empty() {
        println!("No eligible borrower/lender pairs.");
    }
    for m in &matches {
        println!(
            "\n[{:>3}] {} ({}) -> {} ({})",
            m.match_score, m.borrower_name, m.borrower_id, m.lender_name, m.lender_id
        );
        println!(
            "  Loan ${} for {} | lender capacity ${} @ {}%",
            format_amount(m.loan_amount),
            m.loan_purpose,
            format_amount(m.lending_amount),
            m.interest_rate
        );
        println!(
            "  Credit {} (min {}) | risk {} (tolerance {})",
            m.borrower_credit_score,
            m.lender_min_credit_score,
            m.borrower_risk_score,
            m.lender_max_risk_tolerance
        );
        println!("  {}", m.reasoning);
    }
    println!();
    print!("{}", summary);
}

fn cmd_recommend(args: &[String]) {
    let opts = parse_input_options(args);
    let input = load_input(&opts.path);
    let market = input
        .market_rates
        .unwrap_or_else(|| SimulatedMarketData::new().market_rates());
    let (borrowers, _) = LoanPipeline::assess_all(input.borrowers);

    let recommendations = Recommender::recommend_all(&borrowers, &input.lenders, &market);

    if opts.format == OutputFormat::Json {
        print_json(&recommendations);
        return;
    }

    println!("=== Loan Recommendations ===");
    if recommendations.is_empty() {
        println!("No eligible borrower/lender pairs.");
    }
    for r in &recommendations {
        println!(
            "\n{} ({}) <- {} ({})",
            r.borrower_name, r.borrower_id, r.lender_name, r.lender_id
        );
        println!(
            "  Rate {}% over {} months | payment {}/month | total interest {}",
            r.recommended_interest_rate,
            r.recommended_term,
            r.estimated_monthly_payment,
            r.total_interest_paid
        );
        println!("  Confidence {}", r.confidence_score);
        println!("  {}", r.reasoning);
    }
}

fn cmd_run(args: &[String]) {
    let opts = parse_input_options(args);
    let input = load_input(&opts.path);
    let report = LoanPipeline::run(input);

    if opts.format == OutputFormat::Json {
        print_json(&report);
    } else {
        print!("{}", report);
    }
}

fn generate_input<G: IdGenerator>(rng: StdRng, ids: G, config: &GeneratorConfig) -> PipelineInput {
    let mut generator = SyntheticDataGenerator::new(rng, ids);
    let (borrowers, lenders) = generator.generate(config);
    PipelineInput {
        borrowers,
        lenders,
        market_rates: None,
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = GeneratorConfig::default();
    let mut seed: Option<u64> = None;
    let mut use_uuid = false;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--borrowers" => {
                i += 1;
                config.borrower_count = parse_number(args, i, "--borrowers");
            }
            "--lenders" => {
                i += 1;
                config.lender_count = parse_number(args, i, "--lenders");
            }
            "--seed" => {
                i += 1;
                seed = Some(parse_number(args, i, "--seed"));
            }
            "--uuid" => use_uuid = true,
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let input = if use_uuid {
        generate_input(rng, UuidIds, &config)
    } else {
        generate_input(rng, SequentialIds::new(), &config)
    };

    let json = serde_json::to_string_pretty(&input).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        process::exit(1);
    });

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} borrowers and {} lenders → {}",
            input.borrowers.len(),
            input.lenders.len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn cmd_rates(args: &[String]) {
    let mut seed: Option<u64> = None;
    let mut format = OutputFormat::Text;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                seed = Some(parse_number(args, i, "--seed"));
            }
            "--format" => {
                i += 1;
                format = OutputFormat::parse(args.get(i).map(String::as_str).unwrap_or_else(
                    || {
                        eprintln!("--format requires 'text' or 'json'");
                        process::exit(1);
                    },
                ));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let source = SimulatedMarketData::new();
    let rates: MarketRates = source.market_rates();
    let indicators: EconomicIndicators = source.economic_indicators(&mut rng);

    if format == OutputFormat::Json {
        #[derive(Serialize)]
        struct RatesOutput {
            market_rates: MarketRates,
            economic_indicators: EconomicIndicators,
        }
        print_json(&RatesOutput {
            market_rates: rates,
            economic_indicators: indicators,
        });
    } else {
        println!("{}", rates);
        print!("{}", indicators);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "assess" => cmd_assess(rest),
        "match" => cmd_match(rest),
        "recommend" => cmd_recommend(rest),
        "run" => cmd_run(rest),
        "generate" => cmd_generate(rest),
        "rates" => cmd_rates(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
