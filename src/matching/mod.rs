//! Eligibility filtering, match scoring and ranking.

pub mod eligibility;
pub mod matcher;
pub mod summary;
