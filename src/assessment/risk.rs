use crate::core::borrower::{Borrower, EmploymentStatus};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const HUNDRED: Decimal = dec!(100);

const CREDIT_FLOOR: u16 = 300;
const CREDIT_CEILING: u16 = 850;
/// Width of the credit-score scale (850 - 300).
const CREDIT_SPAN: Decimal = dec!(550);
const DTI_MULTIPLIER: Decimal = dec!(1.25);
/// Income at or above which the income factor contributes no risk.
const INCOME_SATURATION: Decimal = dec!(150000);

const WEIGHT_CREDIT: Decimal = dec!(0.35);
const WEIGHT_DTI: Decimal = dec!(0.25);
const WEIGHT_EMPLOYMENT: Decimal = dec!(0.15);
const WEIGHT_LOAN_AMOUNT: Decimal = dec!(0.15);
const WEIGHT_INCOME: Decimal = dec!(0.10);

/// Errors for borrowers whose fields fall outside the ranges the risk
/// formula is defined on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error("credit score {0} is outside 300..=850")]
    CreditScoreOutOfRange(u16),
    #[error("debt-to-income ratio {0} is outside 0..=100")]
    DebtToIncomeOutOfRange(Decimal),
    #[error("loan amount must not be negative, got {0}")]
    NegativeLoanAmount(Decimal),
}

/// Coarse risk classification used for explanations and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// Score below 30.
    Low,
    /// Score 30–59.
    Moderate,
    /// Score 60 and above.
    High,
}

impl RiskBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => RiskBand::Low,
            30..=59 => RiskBand::Moderate,
            _ => RiskBand::High,
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            RiskBand::Low => {
                "This borrower presents a low risk profile with strong financial indicators."
            }
            RiskBand::Moderate => {
                "This borrower presents a moderate risk profile with some concerning financial indicators."
            }
            RiskBand::High => {
                "This borrower presents a high risk profile with multiple concerning financial indicators."
            }
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::Low => f.write_str("low"),
            RiskBand::Moderate => f.write_str("moderate"),
            RiskBand::High => f.write_str("high"),
        }
    }
}

/// Per-factor risk contributions, each on a 0–100 scale (higher is riskier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub credit_score_impact: Decimal,
    pub debt_to_income_impact: Decimal,
    pub employment_status_impact: Decimal,
    pub loan_amount_impact: Decimal,
    pub income_impact: Decimal,
}

impl RiskFactors {
    /// Weighted blend of the five factors, before rounding.
    pub fn weighted_total(&self) -> Decimal {
        self.credit_score_impact * WEIGHT_CREDIT
            + self.debt_to_income_impact * WEIGHT_DTI
            + self.employment_status_impact * WEIGHT_EMPLOYMENT
            + self.loan_amount_impact * WEIGHT_LOAN_AMOUNT
            + self.income_impact * WEIGHT_INCOME
    }
}

/// Outcome of assessing one borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Overall risk, 0–100.
    pub risk_score: u8,
    pub risk_factors: RiskFactors,
    pub band: RiskBand,
    pub explanation: String,
}

/// Rule-based default-risk model.
///
/// Blends five independently normalized factors (credit score,
/// debt-to-income, employment, loan-to-income, income) into a single
/// 0–100 score. Pure and deterministic.
///
/// # Examples
///
/// ```
/// use loan_matcher::assessment::risk::{RiskAssessor, RiskBand};
/// # use loan_matcher::prelude::*;
/// # use rust_decimal_macros::dec;
/// # let borrower = Borrower {
/// #     id: BorrowerId::new("b-1"), name: "Ann Lee".into(), email: "ann@lee.io".into(),
/// #     loan_amount: dec!(5000), loan_purpose: LoanPurpose::new("education"),
/// #     loan_term: LoanTerm::new(12), credit_score: 800, income: dec!(100000),
/// #     employment_status: EmploymentStatus::FullTime, debt_to_income_ratio: dec!(10),
/// #     housing_status: "own".into(), risk: RiskStatus::Unassessed,
/// # };
/// let assessment = RiskAssessor::assess(&borrower).unwrap();
/// assert_eq!(assessment.band, RiskBand::Low);
/// ```
pub struct RiskAssessor;

impl RiskAssessor {
    pub fn assess(borrower: &Borrower) -> Result<RiskAssessment, AssessmentError> {
        let factors = Self::factors(borrower)?;
        let risk_score = factors
            .weighted_total()
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .clamp(Decimal::ZERO, HUNDRED)
            .to_u8()
            .unwrap_or(100);
        let band = RiskBand::from_score(risk_score);

        let explanation = format!(
            "Risk assessment based on credit score ({}), debt-to-income ratio ({}%), and employment status ({}). {}",
            borrower.credit_score,
            borrower.debt_to_income_ratio.normalize(),
            borrower.employment_status,
            band.summary()
        );

        log::trace!(
            "assessed borrower {}: score {} ({})",
            borrower.id,
            risk_score,
            band
        );

        Ok(RiskAssessment {
            risk_score,
            risk_factors: factors,
            band,
            explanation,
        })
    }

    /// Compute the five factor impacts without blending them.
    pub fn factors(borrower: &Borrower) -> Result<RiskFactors, AssessmentError> {
        if !(CREDIT_FLOOR..=CREDIT_CEILING).contains(&borrower.credit_score) {
            return Err(AssessmentError::CreditScoreOutOfRange(borrower.credit_score));
        }
        if borrower.debt_to_income_ratio < Decimal::ZERO
            || borrower.debt_to_income_ratio > HUNDRED
        {
            return Err(AssessmentError::DebtToIncomeOutOfRange(
                borrower.debt_to_income_ratio,
            ));
        }
        if borrower.loan_amount < Decimal::ZERO {
            return Err(AssessmentError::NegativeLoanAmount(borrower.loan_amount));
        }

        let above_floor = Decimal::from(borrower.credit_score - CREDIT_FLOOR);
        let credit_score_impact =
            (HUNDRED - above_floor / CREDIT_SPAN * HUNDRED).clamp(Decimal::ZERO, HUNDRED);

        let debt_to_income_impact = (borrower.debt_to_income_ratio * DTI_MULTIPLIER).min(HUNDRED);

        let employment_status_impact = employment_impact(&borrower.employment_status);

        // No income saturates both income-driven factors.
        let (loan_amount_impact, income_impact) = if borrower.income <= Decimal::ZERO {
            (HUNDRED, HUNDRED)
        } else {
            // Checked: a tiny income with a large loan can exceed Decimal's range.
            let loan_amount_impact = borrower
                .loan_amount
                .checked_div(borrower.income)
                .and_then(|ratio| ratio.checked_mul(HUNDRED))
                .map_or(HUNDRED, |v| v.min(HUNDRED));
            let income_impact = (HUNDRED
                - (borrower.income / INCOME_SATURATION * HUNDRED).min(HUNDRED))
            .max(Decimal::ZERO);
            (loan_amount_impact, income_impact)
        };

        Ok(RiskFactors {
            credit_score_impact,
            debt_to_income_impact,
            employment_status_impact,
            loan_amount_impact,
            income_impact,
        })
    }
}

/// Fixed risk contribution per employment status; unknown statuses are
/// treated as medium risk.
pub fn employment_impact(status: &EmploymentStatus) -> Decimal {
    match status {
        EmploymentStatus::FullTime => dec!(20),
        EmploymentStatus::SelfEmployed => dec!(35),
        EmploymentStatus::PartTime => dec!(40),
        EmploymentStatus::Retired => dec!(45),
        EmploymentStatus::Student => dec!(70),
        EmploymentStatus::Unemployed => dec!(90),
        EmploymentStatus::Other(_) => dec!(50),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::borrower::{LoanPurpose, RiskStatus};
    use crate::core::party::BorrowerId;
    use crate::core::term::LoanTerm;

    fn borrower(credit: u16, income: Decimal, dti: Decimal, loan: Decimal) -> Borrower {
        Borrower {
            id: BorrowerId::new("b-1"),
            name: "Test Borrower".into(),
            email: "test@example.com".into(),
            loan_amount: loan,
            loan_purpose: LoanPurpose::new("education"),
            loan_term: LoanTerm::new(12),
            credit_score: credit,
            income,
            employment_status: EmploymentStatus::FullTime,
            debt_to_income_ratio: dti,
            housing_status: "rent".into(),
            risk: RiskStatus::Unassessed,
        }
    }

    #[test]
    fn test_strong_borrower_is_low_risk() {
        let b = borrower(800, dec!(100000), dec!(10), dec!(5000));
        let a = RiskAssessor::assess(&b).unwrap();
        // credit 9.09*0.35 + dti 12.5*0.25 + emp 20*0.15 + loan 5*0.15 + income 33.33*0.1
        assert_eq!(a.risk_score, 13);
        assert_eq!(a.band, RiskBand::Low);
        assert!(a.explanation.contains("credit score (800)"));
        assert!(a.explanation.contains("debt-to-income ratio (10%)"));
        assert!(a.explanation.contains("employment status (full_time)"));
        assert!(a.explanation.ends_with("strong financial indicators."));
    }

    #[test]
    fn test_factor_endpoints() {
        let worst = borrower(300, dec!(10000), dec!(100), dec!(50000));
        let f = RiskAssessor::factors(&worst).unwrap();
        assert_eq!(f.credit_score_impact, dec!(100));
        assert_eq!(f.debt_to_income_impact, dec!(100));
        assert_eq!(f.loan_amount_impact, dec!(100));

        let best = borrower(850, dec!(200000), dec!(0), dec!(0));
        let f = RiskAssessor::factors(&best).unwrap();
        assert_eq!(f.credit_score_impact, Decimal::ZERO);
        assert_eq!(f.debt_to_income_impact, Decimal::ZERO);
        assert_eq!(f.loan_amount_impact, Decimal::ZERO);
        assert_eq!(f.income_impact, Decimal::ZERO);
    }

    #[test]
    fn test_dti_saturates_at_eighty() {
        let b = borrower(700, dec!(50000), dec!(80), dec!(5000));
        let f = RiskAssessor::factors(&b).unwrap();
        assert_eq!(f.debt_to_income_impact, dec!(100));
    }

    #[test]
    fn test_employment_lookup() {
        assert_eq!(employment_impact(&EmploymentStatus::Student), dec!(70));
        assert_eq!(employment_impact(&EmploymentStatus::Unemployed), dec!(90));
        assert_eq!(
            employment_impact(&EmploymentStatus::Other("gig".into())),
            dec!(50)
        );
    }

    #[test]
    fn test_high_risk_band() {
        let mut b = borrower(450, dec!(20000), dec!(70), dec!(18000));
        b.employment_status = EmploymentStatus::Unemployed;
        let a = RiskAssessor::assess(&b).unwrap();
        assert!(a.risk_score >= 60, "got {}", a.risk_score);
        assert_eq!(a.band, RiskBand::High);
        assert!(a.explanation.contains("high risk profile"));
    }

    #[test]
    fn test_zero_income_saturates_income_factors() {
        let mut b = borrower(500, Decimal::ZERO, dec!(60), dec!(5000));
        b.employment_status = EmploymentStatus::Unemployed;

        let f = RiskAssessor::factors(&b).unwrap();
        assert_eq!(f.loan_amount_impact, dec!(100));
        assert_eq!(f.income_impact, dec!(100));

        // 63.64*0.35 + 75*0.25 + 90*0.15 + 100*0.15 + 100*0.1 = 79.52
        let a = RiskAssessor::assess(&b).unwrap();
        assert_eq!(a.risk_score, 80);
        assert_eq!(a.band, RiskBand::High);

        b.income = dec!(-1000);
        assert_eq!(RiskAssessor::assess(&b).unwrap().risk_score, 80);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskBand::from_score(29), RiskBand::Low);
        assert_eq!(RiskBand::from_score(30), RiskBand::Moderate);
        assert_eq!(RiskBand::from_score(59), RiskBand::Moderate);
        assert_eq!(RiskBand::from_score(60), RiskBand::High);
    }

    #[test]
    fn test_rejects_out_of_range_input() {
        let b = borrower(900, dec!(50000), dec!(10), dec!(5000));
        assert_eq!(
            RiskAssessor::assess(&b),
            Err(AssessmentError::CreditScoreOutOfRange(900))
        );
        let b = borrower(700, dec!(50000), dec!(101), dec!(5000));
        assert!(matches!(
            RiskAssessor::assess(&b),
            Err(AssessmentError::DebtToIncomeOutOfRange(_))
        ));
    }
}
