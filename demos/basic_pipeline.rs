//! Basic assess → match → recommend example.
//!
//! Walks three borrowers and two lenders through the engine step by step.

use loan_matcher::assessment::risk::RiskAssessor;
use loan_matcher::core::borrower::{Borrower, EmploymentStatus, LoanPurpose, RiskStatus};
use loan_matcher::core::lender::Lender;
use loan_matcher::core::party::{BorrowerId, LenderId};
use loan_matcher::core::term::{LoanTerm, MarketRates};
use loan_matcher::matching::matcher::Matcher;
use loan_matcher::matching::summary::MatchSummary;
use loan_matcher::recommendation::recommender::Recommender;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[allow(clippy::too_many_arguments)]
fn borrower(
    id: &str,
    name: &str,
    amount: Decimal,
    purpose: &str,
    term: u16,
    credit: u16,
    income: Decimal,
    employment: EmploymentStatus,
    dti: Decimal,
) -> Borrower {
    Borrower {
        id: BorrowerId::new(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        loan_amount: amount,
        loan_purpose: LoanPurpose::new(purpose),
        loan_term: LoanTerm::new(term),
        credit_score: credit,
        income,
        employment_status: employment,
        debt_to_income_ratio: dti,
        housing_status: "rent".to_string(),
        risk: RiskStatus::Unassessed,
    }
}

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  loan-matcher: Basic Pipeline Example    ║");
    println!("╚══════════════════════════════════════════╝\n");

    let borrowers = vec![
        borrower("b-1", "Mary Smith", dec!(8_000), "education", 24, 780, dec!(95_000), EmploymentStatus::FullTime, dec!(12)),
        borrower("b-2", "Robert Jones", dec!(25_000), "business", 36, 690, dec!(70_000), EmploymentStatus::SelfEmployed, dec!(28)),
        borrower("b-3", "Lisa Brown", dec!(4_000), "medical", 6, 630, dec!(32_000), EmploymentStatus::PartTime, dec!(45)),
    ];

    let lenders = vec![
        Lender {
            id: LenderId::new("l-1"),
            name: "Thomas Wilson".to_string(),
            email: "thomas.wilson@example.com".to_string(),
            amount_to_lend: dec!(60_000),
            min_credit_score: 650,
            interest_rate: dec!(6.5),
            max_risk_tolerance: 50,
            preferred_purposes: vec![LoanPurpose::new("education"), LoanPurpose::new("business")],
            loan_terms: vec![LoanTerm::new(12), LoanTerm::new(24), LoanTerm::new(36)],
        },
        Lender {
            id: LenderId::new("l-2"),
            name: "Sarah Miller".to_string(),
            email: "sarah.miller@example.com".to_string(),
            amount_to_lend: dec!(20_000),
            min_credit_score: 600,
            interest_rate: dec!(11.75),
            max_risk_tolerance: 75,
            preferred_purposes: vec![LoanPurpose::new("medical"), LoanPurpose::new("education")],
            loan_terms: vec![LoanTerm::new(12), LoanTerm::new(24)],
        },
    ];

    // --- Step 1: Risk assessment ---
    println!("━━━ Step 1: Risk Assessment ━━━\n");

    let borrowers: Vec<Borrower> = borrowers
        .into_iter()
        .map(|b| match RiskAssessor::assess(&b) {
            Ok(a) => {
                println!("  {:<14} risk {:>3}  [{}]", b.name, a.risk_score, a.band);
                println!("    {}\n", a.explanation);
                b.with_risk_score(a.risk_score)
            }
            Err(e) => {
                println!("  {:<14} not assessed: {}", b.name, e);
                b
            }
        })
        .collect();

    // --- Step 2: Matching ---
    println!("━━━ Step 2: Matching ━━━\n");

    let matches = Matcher::match_all(&borrowers, &lenders);
    for m in &matches {
        println!("  [{:>3}] {} -> {}", m.match_score, m.borrower_name, m.lender_name);
        println!("    {}\n", m.reasoning);
    }
    println!("{}", MatchSummary::from_matches(&matches));

    // --- Step 3: Recommendations ---
    println!("━━━ Step 3: Recommendations ━━━\n");

    let rates = MarketRates::standard();
    println!("{}", rates);
    for r in Recommender::recommend_all(&borrowers, &lenders, &rates) {
        println!(
            "  {} <- {}: {}% over {} months, {}/month, {} total interest (confidence {})",
            r.borrower_name,
            r.lender_name,
            r.recommended_interest_rate,
            r.recommended_term,
            r.estimated_monthly_payment,
            r.total_interest_paid,
            r.confidence_score
        );
    }
}
