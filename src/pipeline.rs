//! End-to-end orchestration: assess, then match and recommend.
//!
//! Mirrors how a caller refreshes its view after borrowers or lenders
//! change: every unassessed borrower is scored first, then the matcher and
//! recommender run over the same immutable snapshot.

use crate::assessment::risk::{RiskAssessment, RiskAssessor};
use crate::core::borrower::{Borrower, RiskStatus};
use crate::core::lender::Lender;
use crate::core::party::BorrowerId;
use crate::core::term::MarketRates;
use crate::matching::matcher::{Match, Matcher};
use crate::matching::summary::MatchSummary;
use crate::recommendation::recommender::{LoanRecommendation, Recommender};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::thread;

/// Everything the pipeline consumes. Also the on-disk input format of the
/// CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineInput {
    pub borrowers: Vec<Borrower>,
    pub lenders: Vec<Lender>,
    /// Falls back to the simulated standard table when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_rates: Option<MarketRates>,
}

/// Risk assessment keyed by the borrower it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerAssessment {
    pub borrower_id: BorrowerId,
    pub assessment: RiskAssessment,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub generated_at: DateTime<Utc>,
    /// Input borrowers with risk attached where assessment succeeded.
    pub borrowers: Vec<Borrower>,
    pub assessments: Vec<BorrowerAssessment>,
    pub lenders: Vec<Lender>,
    pub market_rates: MarketRates,
    pub matches: Vec<Match>,
    pub recommendations: Vec<LoanRecommendation>,
    pub summary: MatchSummary,
}

pub struct LoanPipeline;

impl LoanPipeline {
    /// Attach a risk score to every unassessed borrower.
    ///
    /// Already-assessed borrowers pass through untouched. A borrower that
    /// cannot be assessed is logged and stays unassessed.
    pub fn assess_all(borrowers: Vec<Borrower>) -> (Vec<Borrower>, Vec<BorrowerAssessment>) {
        let mut assessed = Vec::with_capacity(borrowers.len());
        let mut assessments = Vec::new();

        for borrower in borrowers {
            if let RiskStatus::Assessed(_) = borrower.risk {
                assessed.push(borrower);
                continue;
            }
            match RiskAssessor::assess(&borrower) {
                Ok(assessment) => {
                    let score = assessment.risk_score;
                    assessments.push(BorrowerAssessment {
                        borrower_id: borrower.id.clone(),
                        assessment,
                    });
                    assessed.push(borrower.with_risk_score(score));
                }
                Err(e) => {
                    log::warn!("leaving borrower {} unassessed: {}", borrower.id, e);
                    assessed.push(borrower);
                }
            }
        }

        (assessed, assessments)
    }

    /// Run matcher and recommender over one snapshot.
    ///
    /// The two stages share nothing mutable, so they run on separate
    /// threads.
    pub fn match_and_recommend(
        borrowers: &[Borrower],
        lenders: &[Lender],
        market: &MarketRates,
    ) -> (Vec<Match>, Vec<LoanRecommendation>) {
        thread::scope(|s| {
            let matcher = s.spawn(|| Matcher::match_all(borrowers, lenders));
            let recommendations = Recommender::recommend_all(borrowers, lenders, market);
            let matches = match matcher.join() {
                Ok(matches) => matches,
                Err(panic) => std::panic::resume_unwind(panic),
            };
            (matches, recommendations)
        })
    }

    /// Full run: assess, then match and recommend.
    pub fn run(input: PipelineInput) -> PipelineReport {
        let market_rates = input.market_rates.unwrap_or_else(MarketRates::standard);
        let (borrowers, assessments) = Self::assess_all(input.borrowers);
        let (matches, recommendations) =
            Self::match_and_recommend(&borrowers, &input.lenders, &market_rates);
        let summary = MatchSummary::from_matches(&matches);

        log::info!(
            "pipeline run: {} borrowers, {} lenders, {} matches, {} recommendations",
            borrowers.len(),
            input.lenders.len(),
            matches.len(),
            recommendations.len()
        );

        PipelineReport {
            generated_at: Utc::now(),
            borrowers,
            assessments,
            lenders: input.lenders,
            market_rates,
            matches,
            recommendations,
            summary,
        }
    }
}

impl std::fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Loan Matching Report ===")?;
        writeln!(f, "Generated:       {}", self.generated_at.to_rfc3339())?;
        writeln!(f, "Borrowers:       {}", self.borrowers.len())?;
        writeln!(f, "Lenders:         {}", self.lenders.len())?;
        writeln!(f, "Recommendations: {}", self.recommendations.len())?;

        writeln!(f, "\n--- Borrower Risk ---")?;
        for b in &self.borrowers {
            writeln!(
                f,
                "  {:<10} {:<22} credit {:>3}  risk {:>10}",
                b.id.to_string(),
                b.name,
                b.credit_score,
                b.risk.to_string()
            )?;
        }

        writeln!(f)?;
        write!(f, "{}", self.summary)?;

        if !self.matches.is_empty() {
            writeln!(f, "\n--- Matches ---")?;
            for m in &self.matches {
                writeln!(
                    f,
                    "  [{:>3}] {} -> {}  {} @ {}%",
                    m.match_score, m.borrower_name, m.lender_name, m.loan_amount, m.interest_rate
                )?;
            }
        }

        if !self.recommendations.is_empty() {
            writeln!(f, "\n--- Recommendations ---")?;
            for r in &self.recommendations {
                writeln!(
                    f,
                    "  {} <- {}: {}% over {} months, {}/month, {} interest (confidence {})",
                    r.borrower_name,
                    r.lender_name,
                    r.recommended_interest_rate,
                    r.recommended_term,
                    r.estimated_monthly_payment,
                    r.total_interest_paid,
                    r.confidence_score
                )?;
            }
        }
        Ok(())
    }
}
