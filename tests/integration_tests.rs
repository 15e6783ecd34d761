use loan_matcher::assessment::risk::{RiskAssessor, RiskBand};
use loan_matcher::core::borrower::{Borrower, EmploymentStatus, LoanPurpose, RiskStatus};
use loan_matcher::core::lender::Lender;
use loan_matcher::core::party::{BorrowerId, LenderId};
use loan_matcher::core::term::{LoanTerm, MarketRates};
use loan_matcher::matching::eligibility::{self, Ineligibility};
use loan_matcher::matching::matcher::Matcher;
use loan_matcher::matching::summary::MatchSummary;
use loan_matcher::pipeline::{LoanPipeline, PipelineInput};
use loan_matcher::recommendation::recommender::Recommender;
use loan_matcher::simulation::market_data::{MarketRateSource, SimulatedMarketData};
use loan_matcher::simulation::synthetic::{GeneratorConfig, SequentialIds, SyntheticDataGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn borrower(id: &str, name: &str) -> Borrower {
    Borrower {
        id: BorrowerId::new(id),
        name: name.to_string(),
        email: format!("{}@example.com", id),
        loan_amount: dec!(5000),
        loan_purpose: LoanPurpose::new("education"),
        loan_term: LoanTerm::new(12),
        credit_score: 700,
        income: dec!(60000),
        employment_status: EmploymentStatus::FullTime,
        debt_to_income_ratio: dec!(20),
        housing_status: "rent".to_string(),
        risk: RiskStatus::Unassessed,
    }
}

fn lender(id: &str, name: &str) -> Lender {
    Lender {
        id: LenderId::new(id),
        name: name.to_string(),
        email: format!("{}@example.com", id),
        amount_to_lend: dec!(20000),
        min_credit_score: 650,
        interest_rate: dec!(7.5),
        max_risk_tolerance: 50,
        preferred_purposes: vec![LoanPurpose::new("education")],
        loan_terms: vec![LoanTerm::new(12), LoanTerm::new(24)],
    }
}

/// Strong applicant lands in the low risk band.
#[test]
fn strong_borrower_is_low_risk() {
    let mut b = borrower("b-1", "Linda Moore");
    b.credit_score = 800;
    b.income = dec!(100000);
    b.debt_to_income_ratio = dec!(10);

    let assessment = RiskAssessor::assess(&b).unwrap();
    assert!(assessment.risk_score < 30);
    assert_eq!(assessment.band, RiskBand::Low);
    assert!(assessment
        .explanation
        .starts_with("Risk assessment based on credit score (800)"));
}

/// Credit margin 50, loan ratio 0.25 and risk headroom 30 cap the score at 100.
#[test]
fn well_matched_pair_scores_at_the_cap() {
    let b = borrower("b-1", "Linda Moore").with_risk_score(20);
    let l = lender("l-1", "James Smith");

    assert_eq!(eligibility::check(&b, &l), Ok(()));
    let matches = Matcher::match_all(&[b], &[l]);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_score, 100);
    assert!(matches[0].reasoning.starts_with("Excellent match!"));
    assert!(matches[0].reasoning.contains("$5,000"));
    assert!(matches[0].reasoning.contains("$20,000"));
}

/// Requested term 6 against offers 12 and 24 picks 12.
#[test]
fn closest_term_is_recommended() {
    let mut b = borrower("b-1", "Linda Moore").with_risk_score(20);
    b.loan_term = LoanTerm::new(6);
    let l = lender("l-1", "James Smith");

    let recs = Recommender::recommend_all(&[b], &[l], &MarketRates::standard());
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].recommended_term, LoanTerm::new(12));
}

/// Full flow: assess → match → recommend over a small hand-built market.
#[test]
fn full_pipeline_small_market() {
    let mut risky = borrower("b-2", "Karen White");
    risky.credit_score = 610;
    risky.debt_to_income_ratio = dec!(55);
    risky.employment_status = EmploymentStatus::Unemployed;

    let mut business = borrower("b-3", "Daniel Davis");
    business.loan_purpose = LoanPurpose::new("business");
    business.loan_amount = dec!(15000);
    business.loan_term = LoanTerm::new(36);

    let mut broad = lender("l-2", "Susan Taylor");
    broad.amount_to_lend = dec!(100000);
    broad.min_credit_score = 600;
    broad.max_risk_tolerance = 80;
    broad.interest_rate = dec!(9);
    broad.preferred_purposes = vec![LoanPurpose::new("education"), LoanPurpose::new("business")];
    broad.loan_terms = vec![LoanTerm::new(24), LoanTerm::new(36), LoanTerm::new(48)];

    let input = PipelineInput {
        borrowers: vec![borrower("b-1", "Linda Moore"), risky, business],
        lenders: vec![lender("l-1", "James Smith"), broad],
        market_rates: None,
    };

    let report = LoanPipeline::run(input);

    assert_eq!(report.borrowers.len(), 3);
    assert_eq!(report.assessments.len(), 3);
    assert!(report.borrowers.iter().all(|b| b.risk.is_assessed()));

    // Every match passes the shared filter, and output is ranked.
    for m in &report.matches {
        let b = report.borrowers.iter().find(|b| b.id == m.borrower_id).unwrap();
        let l = report.lenders.iter().find(|l| l.id == m.lender_id).unwrap();
        assert_eq!(eligibility::check(b, l), Ok(()));
    }
    for pair in report.matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }

    // Both stages see the same eligible pairs.
    let mut matched: Vec<_> = report
        .matches
        .iter()
        .map(|m| (m.borrower_id.clone(), m.lender_id.clone()))
        .collect();
    let mut recommended: Vec<_> = report
        .recommendations
        .iter()
        .map(|r| (r.borrower_id.clone(), r.lender_id.clone()))
        .collect();
    matched.sort_by(|a, b| (a.0.as_str(), a.1.as_str()).cmp(&(b.0.as_str(), b.1.as_str())));
    recommended.sort_by(|a, b| (a.0.as_str(), a.1.as_str()).cmp(&(b.0.as_str(), b.1.as_str())));
    assert_eq!(matched, recommended);

    // The business loan only fits the broad lender, at its requested term.
    let business_recs: Vec<_> = report
        .recommendations
        .iter()
        .filter(|r| r.borrower_id.as_str() == "b-3")
        .collect();
    assert_eq!(business_recs.len(), 1);
    assert_eq!(business_recs[0].lender_id.as_str(), "l-2");
    assert_eq!(business_recs[0].recommended_term, LoanTerm::new(36));

    for r in &report.recommendations {
        let b = report.borrowers.iter().find(|b| b.id == r.borrower_id).unwrap();
        let n = Decimal::from(r.recommended_term.months());
        assert_eq!(r.estimated_monthly_payment * n - b.loan_amount, r.total_interest_paid);
    }

    assert_eq!(report.summary, MatchSummary::from_matches(&report.matches));
}

/// The risk-tolerance check applies to recommendations too.
#[test]
fn risk_tolerance_gates_both_stages() {
    let b = borrower("b-1", "Linda Moore").with_risk_score(51);
    let l = lender("l-1", "James Smith");

    assert_eq!(
        eligibility::check(&b, &l),
        Err(Ineligibility::RiskAboveTolerance {
            risk_score: 51,
            tolerance: 50
        })
    );
    assert!(Matcher::match_all(&[b.clone()], &[l.clone()]).is_empty());
    assert!(Recommender::recommend_all(&[b], &[l], &MarketRates::standard()).is_empty());
}

/// Unassessed borrowers still flow through, with no risk bonus.
#[test]
fn unassessed_borrower_is_processed() {
    let b = borrower("b-1", "Linda Moore");
    let l = lender("l-1", "James Smith");

    let matches = Matcher::match_all(&[b.clone()], &[l.clone()]);
    assert_eq!(matches.len(), 1);
    // 60 + 10 (credit margin 50) + 15 (loan ratio 0.25), no risk bonus
    assert_eq!(matches[0].match_score, 85);
    assert_eq!(matches[0].borrower_risk_score, RiskStatus::Unassessed);

    let recs = Recommender::recommend_all(&[b], &[l], &MarketRates::standard());
    assert_eq!(recs.len(), 1);
}

/// Input in the wire format: string terms, optional risk score, string-keyed rates.
#[test]
fn json_input_parsing() {
    let json = r#"{
        "borrowers": [{
            "id": "b-1", "name": "Linda Moore", "email": "linda@example.com",
            "loan_amount": "5000", "loan_purpose": "education", "loan_term": 6,
            "credit_score": 700, "income": "60000", "employment_status": "full_time",
            "debt_to_income_ratio": "20", "housing_status": "rent"
        }],
        "lenders": [{
            "id": "l-1", "name": "James Smith", "email": "james@example.com",
            "amount_to_lend": "20000", "min_credit_score": 650, "interest_rate": "7.5",
            "max_risk_tolerance": 50, "preferred_purposes": ["education"],
            "loan_terms": ["12", "24"]
        }],
        "market_rates": { "12": "5.5", "24": "6" }
    }"#;

    let input: PipelineInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.borrowers[0].risk, RiskStatus::Unassessed);
    assert_eq!(
        input.lenders[0].loan_terms,
        vec![LoanTerm::new(12), LoanTerm::new(24)]
    );
    let rates = input.market_rates.clone().unwrap();
    assert_eq!(rates.rate_for(LoanTerm::new(12)), Some(dec!(5.5)));

    let report = LoanPipeline::run(input);
    assert_eq!(report.market_rates, rates);
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].recommended_term, LoanTerm::new(12));
}

/// Report serializes with a timestamp and the risk score under its wire name.
#[test]
fn json_report_serialization() {
    let input = PipelineInput {
        borrowers: vec![borrower("b-1", "Linda Moore")],
        lenders: vec![lender("l-1", "James Smith")],
        market_rates: Some(SimulatedMarketData::new().market_rates()),
    };
    let report = LoanPipeline::run(input);
    let value: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert!(value["generated_at"].is_string());
    assert!(value["borrowers"][0]["risk_score"].is_u64());
    assert_eq!(value["market_rates"]["12"], "6.25");
    assert_eq!(value["recommendations"][0]["recommended_term"], 12);
    assert_eq!(value["summary"]["total"], 1);
}

/// Repeated runs over the same snapshot are byte-identical.
#[test]
fn matcher_and_recommender_are_idempotent() {
    let mut gen = SyntheticDataGenerator::new(StdRng::seed_from_u64(21), SequentialIds::new());
    let (borrowers, lenders) = gen.generate(&GeneratorConfig {
        borrower_count: 25,
        lender_count: 10,
    });
    let (borrowers, _) = LoanPipeline::assess_all(borrowers);
    let market = MarketRates::standard();

    let first = serde_json::to_string(&Matcher::match_all(&borrowers, &lenders)).unwrap();
    let second = serde_json::to_string(&Matcher::match_all(&borrowers, &lenders)).unwrap();
    assert_eq!(first, second);

    let first =
        serde_json::to_string(&Recommender::recommend_all(&borrowers, &lenders, &market)).unwrap();
    let second =
        serde_json::to_string(&Recommender::recommend_all(&borrowers, &lenders, &market)).unwrap();
    assert_eq!(first, second);
}

/// Empty inputs give empty, valid results.
#[test]
fn empty_market_produces_empty_report() {
    let report = LoanPipeline::run(PipelineInput::default());
    assert!(report.matches.is_empty());
    assert!(report.recommendations.is_empty());
    assert_eq!(report.summary, MatchSummary::default());
    assert_eq!(report.market_rates, MarketRates::standard());
}

/// Broken lender records are skipped without losing the rest.
#[test]
fn malformed_lender_does_not_abort_run() {
    let b = borrower("b-1", "Linda Moore");
    let mut no_terms = lender("l-1", "James Smith");
    no_terms.loan_terms.clear();
    let fine = lender("l-2", "Mary Jones");

    let report = LoanPipeline::run(PipelineInput {
        borrowers: vec![b],
        lenders: vec![no_terms, fine],
        market_rates: None,
    });

    // Matching does not need terms; pricing does.
    assert_eq!(report.matches.len(), 2);
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].lender_id.as_str(), "l-2");
}
