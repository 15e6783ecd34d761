//! Loan-term recommendation: term selection, rate pricing, amortization
//! and confidence scoring.

pub mod amortization;
pub mod pricing;
pub mod recommender;
