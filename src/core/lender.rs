use crate::core::borrower::LoanPurpose;
use crate::core::party::LenderId;
use crate::core::term::LoanTerm;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A person offering capital under a stated underwriting policy.
///
/// `preferred_purposes` and `loan_terms` are ordered: the recommender
/// breaks ties between equally distant terms by list position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lender {
    pub id: LenderId,
    pub name: String,
    pub email: String,
    /// Total capital available for a single loan.
    pub amount_to_lend: Decimal,
    pub min_credit_score: u16,
    /// Base (ask) annual rate, in percent.
    pub interest_rate: Decimal,
    /// Highest borrower risk score accepted, 0–100.
    pub max_risk_tolerance: u8,
    pub preferred_purposes: Vec<LoanPurpose>,
    pub loan_terms: Vec<LoanTerm>,
}

impl Lender {
    pub fn funds_purpose(&self, purpose: &LoanPurpose) -> bool {
        self.preferred_purposes.contains(purpose)
    }

    pub fn offers_term(&self, term: LoanTerm) -> bool {
        self.loan_terms.contains(&term)
    }
}
