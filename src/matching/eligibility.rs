//! The borrower/lender eligibility predicate.
//!
//! Both the matcher and the recommender consider a pair only if it passes
//! [`check`]. Keeping a single predicate guarantees the two stages agree on
//! which pairs exist.

use crate::core::borrower::{Borrower, LoanPurpose, RiskStatus};
use crate::core::lender::Lender;
use rust_decimal::Decimal;
use thiserror::Error;

/// The first eligibility condition a pair failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Ineligibility {
    #[error("credit score {credit_score} is below the lender minimum of {minimum}")]
    CreditScoreBelowMinimum { credit_score: u16, minimum: u16 },
    #[error("loan amount {requested} exceeds lending capacity {capacity}")]
    InsufficientCapacity { requested: Decimal, capacity: Decimal },
    #[error("lender does not fund {0} loans")]
    PurposeNotPreferred(LoanPurpose),
    #[error("risk score {risk_score} exceeds the lender tolerance of {tolerance}")]
    RiskAboveTolerance { risk_score: u8, tolerance: u8 },
}

/// Check whether `lender` will consider `borrower` at all.
///
/// An unassessed borrower passes the risk-tolerance condition.
pub fn check(borrower: &Borrower, lender: &Lender) -> Result<(), Ineligibility> {
    if lender.min_credit_score > borrower.credit_score {
        return Err(Ineligibility::CreditScoreBelowMinimum {
            credit_score: borrower.credit_score,
            minimum: lender.min_credit_score,
        });
    }
    if lender.amount_to_lend < borrower.loan_amount {
        return Err(Ineligibility::InsufficientCapacity {
            requested: borrower.loan_amount,
            capacity: lender.amount_to_lend,
        });
    }
    if !lender.funds_purpose(&borrower.loan_purpose) {
        return Err(Ineligibility::PurposeNotPreferred(
            borrower.loan_purpose.clone(),
        ));
    }
    match borrower.risk {
        RiskStatus::Assessed(risk_score) if risk_score > lender.max_risk_tolerance => {
            Err(Ineligibility::RiskAboveTolerance {
                risk_score,
                tolerance: lender.max_risk_tolerance,
            })
        }
        RiskStatus::Assessed(_) | RiskStatus::Unassessed => Ok(()),
    }
}

/// Boolean form of [`check`], logging the rejection reason at `trace`.
pub fn is_eligible(borrower: &Borrower, lender: &Lender) -> bool {
    match check(borrower, lender) {
        Ok(()) => true,
        Err(reason) => {
            log::trace!(
                "pair {} / {} ineligible: {}",
                borrower.id,
                lender.id,
                reason
            );
            false
        }
    }
}

/// All lenders eligible for `borrower`, in input order.
pub fn eligible_lenders<'a>(
    borrower: &'a Borrower,
    lenders: &'a [Lender],
) -> impl Iterator<Item = &'a Lender> + 'a {
    lenders.iter().filter(move |l| is_eligible(borrower, l))
}
