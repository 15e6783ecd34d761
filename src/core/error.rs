use crate::core::party::LenderId;
use thiserror::Error;

/// Failure while evaluating one borrower/lender pair.
///
/// Pair errors never abort a run: the stage that hit one logs it with the
/// pair's identifiers and moves on to the next pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairError {
    #[error("lender {lender} has no lending capacity")]
    ZeroCapacity { lender: LenderId },
    #[error("lender {lender} lists no loan terms")]
    NoLoanTerms { lender: LenderId },
    #[error("loan term must be at least one month")]
    ZeroTerm,
    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),
}
