use crate::core::party::BorrowerId;
use crate::core::term::LoanTerm;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form tag describing what a loan is for (`"education"`,
/// `"business"`, ...). Lenders list the tags they fund.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanPurpose(String);

impl LoanPurpose {
    pub fn new(purpose: impl Into<String>) -> Self {
        Self(purpose.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LoanPurpose {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Employment status reported by a borrower.
///
/// Unrecognized statuses are kept verbatim in [`EmploymentStatus::Other`]
/// so they survive a serialization round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmploymentStatus {
    FullTime,
    PartTime,
    SelfEmployed,
    Unemployed,
    Retired,
    Student,
    Other(String),
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EmploymentStatus::FullTime => "full_time",
            EmploymentStatus::PartTime => "part_time",
            EmploymentStatus::SelfEmployed => "self_employed",
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::Retired => "retired",
            EmploymentStatus::Student => "student",
            EmploymentStatus::Other(s) => s,
        }
    }
}

impl From<String> for EmploymentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "full_time" => EmploymentStatus::FullTime,
            "part_time" => EmploymentStatus::PartTime,
            "self_employed" => EmploymentStatus::SelfEmployed,
            "unemployed" => EmploymentStatus::Unemployed,
            "retired" => EmploymentStatus::Retired,
            "student" => EmploymentStatus::Student,
            _ => EmploymentStatus::Other(s),
        }
    }
}

impl From<&str> for EmploymentStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<EmploymentStatus> for String {
    fn from(status: EmploymentStatus) -> Self {
        match status {
            EmploymentStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a borrower has been through risk assessment.
///
/// Serialized as an optional `risk_score` (absent or `null` means
/// unassessed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<u8>", into = "Option<u8>")]
pub enum RiskStatus {
    #[default]
    Unassessed,
    /// Risk score 0–100, higher is riskier.
    Assessed(u8),
}

impl RiskStatus {
    pub fn score(&self) -> Option<u8> {
        match self {
            RiskStatus::Unassessed => None,
            RiskStatus::Assessed(score) => Some(*score),
        }
    }

    pub fn is_assessed(&self) -> bool {
        matches!(self, RiskStatus::Assessed(_))
    }
}

impl From<Option<u8>> for RiskStatus {
    fn from(score: Option<u8>) -> Self {
        match score {
            Some(s) => RiskStatus::Assessed(s),
            None => RiskStatus::Unassessed,
        }
    }
}

impl From<RiskStatus> for Option<u8> {
    fn from(status: RiskStatus) -> Self {
        status.score()
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskStatus::Unassessed => f.write_str("unassessed"),
            RiskStatus::Assessed(score) => write!(f, "{}", score),
        }
    }
}

/// A person requesting a loan.
///
/// The underwriting inputs are supplied by the caller; `risk` is derived
/// and starts out [`RiskStatus::Unassessed`]. Attaching an assessment
/// produces a new borrower value via [`Borrower::with_risk_score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Borrower {
    pub id: BorrowerId,
    pub name: String,
    pub email: String,
    /// Requested principal.
    pub loan_amount: Decimal,
    pub loan_purpose: LoanPurpose,
    /// Requested term.
    pub loan_term: LoanTerm,
    /// FICO-style score, 300–850.
    pub credit_score: u16,
    /// Annual income.
    pub income: Decimal,
    pub employment_status: EmploymentStatus,
    /// Debt-to-income ratio as a percentage, 0–100.
    pub debt_to_income_ratio: Decimal,
    pub housing_status: String,
    #[serde(rename = "risk_score", default)]
    pub risk: RiskStatus,
}

impl Borrower {
    /// Return this borrower with the given risk score attached.
    pub fn with_risk_score(mut self, score: u8) -> Self {
        self.risk = RiskStatus::Assessed(score);
        self
    }

    pub fn risk_score(&self) -> Option<u8> {
        self.risk.score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Borrower {
        Borrower {
            id: BorrowerId::new("b-1"),
            name: "Mary Smith".into(),
            email: "mary.smith@example.com".into(),
            loan_amount: dec!(5000),
            loan_purpose: LoanPurpose::new("education"),
            loan_term: LoanTerm::new(12),
            credit_score: 720,
            income: dec!(60000),
            employment_status: EmploymentStatus::FullTime,
            debt_to_income_ratio: dec!(25),
            housing_status: "rent".into(),
            risk: RiskStatus::Unassessed,
        }
    }

    #[test]
    fn test_employment_status_round_trip() {
        for s in ["full_time", "part_time", "self_employed", "unemployed", "retired", "student"] {
            let status = EmploymentStatus::from(s);
            assert!(!matches!(status, EmploymentStatus::Other(_)));
            assert_eq!(String::from(status), s);
        }
        let other = EmploymentStatus::from("contractor");
        assert_eq!(other, EmploymentStatus::Other("contractor".into()));
        assert_eq!(other.as_str(), "contractor");
    }

    #[test]
    fn test_with_risk_score_returns_new_value() {
        let original = sample();
        let assessed = original.clone().with_risk_score(42);
        assert_eq!(original.risk, RiskStatus::Unassessed);
        assert_eq!(assessed.risk_score(), Some(42));
    }

    #[test]
    fn test_risk_serializes_as_optional_score() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json["risk_score"].is_null());
        assert_eq!(json["employment_status"], "full_time");

        let json = serde_json::to_value(sample().with_risk_score(17)).unwrap();
        assert_eq!(json["risk_score"], 17);
    }

    #[test]
    fn test_missing_risk_score_deserializes_unassessed() {
        let mut json = serde_json::to_value(sample()).unwrap();
        json.as_object_mut().unwrap().remove("risk_score");
        let borrower: Borrower = serde_json::from_value(json).unwrap();
        assert_eq!(borrower.risk, RiskStatus::Unassessed);
    }
}
