//! Borrower risk assessment.

pub mod risk;
