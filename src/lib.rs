//! # loan-matcher
//!
//! Rule-based borrower/lender matching engine.
//!
//! Given borrower loan requests and lender offers, this engine scores each
//! borrower's default risk, finds every compatible borrower/lender pair and
//! proposes concrete loan terms priced against current market rates.
//!
//! ## Architecture
//!
//! - **core**: Domain records: borrowers, lenders, terms, market rates, intake validation
//! - **assessment**: Weighted multi-factor risk scoring
//! - **matching**: Shared eligibility rules, match scoring and tier summaries
//! - **recommendation**: Term selection, rate pricing, amortization, confidence
//! - **pipeline**: Assess, then match and recommend over one snapshot
//! - **simulation**: Simulated market data and synthetic records

pub mod assessment;
pub mod core;
pub mod matching;
pub mod pipeline;
pub mod recommendation;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::assessment::risk::{RiskAssessment, RiskAssessor, RiskBand};
    pub use crate::core::borrower::{Borrower, EmploymentStatus, LoanPurpose, RiskStatus};
    pub use crate::core::error::PairError;
    pub use crate::core::lender::Lender;
    pub use crate::core::party::{BorrowerId, LenderId};
    pub use crate::core::term::{LoanTerm, MarketRates};
    pub use crate::matching::matcher::{Match, Matcher};
    pub use crate::matching::summary::MatchSummary;
    pub use crate::pipeline::{LoanPipeline, PipelineInput, PipelineReport};
    pub use crate::recommendation::recommender::{LoanRecommendation, Recommender};
    pub use crate::simulation::market_data::{MarketRateSource, SimulatedMarketData};
}
