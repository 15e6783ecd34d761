//! Synthetic market example.
//!
//! Generates a seeded population of borrowers and lenders, runs the full
//! pipeline and prints the report.

use loan_matcher::pipeline::{LoanPipeline, PipelineInput};
use loan_matcher::simulation::market_data::{MarketRateSource, SimulatedMarketData};
use loan_matcher::simulation::synthetic::{GeneratorConfig, SequentialIds, SyntheticDataGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    println!("╔══════════════════════════════════════════╗");
    println!("║  loan-matcher: Synthetic Market Example  ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut rng = StdRng::seed_from_u64(2024);
    let source = SimulatedMarketData::new();
    println!("{}", source.economic_indicators(&mut rng));

    let mut generator = SyntheticDataGenerator::new(rng, SequentialIds::new());
    let (borrowers, lenders) = generator.generate(&GeneratorConfig {
        borrower_count: 12,
        lender_count: 5,
    });

    let report = LoanPipeline::run(PipelineInput {
        borrowers,
        lenders,
        market_rates: Some(source.market_rates()),
    });

    println!("{}", report);

    // Top three pairs by match score
    println!("━━━ Top Matches ━━━\n");
    for m in report.matches.iter().take(3) {
        println!("  [{:>3}] {} -> {}", m.match_score, m.borrower_name, m.lender_name);
        println!("    {}\n", m.reasoning);
    }
}
