//! Foundational types: identifiers, borrowers, lenders, loan terms and
//! market rates.

pub mod borrower;
pub mod error;
pub mod lender;
pub mod party;
pub mod term;
pub mod validation;
