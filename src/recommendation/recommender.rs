use crate::core::borrower::Borrower;
use crate::core::error::PairError;
use crate::core::lender::Lender;
use crate::core::party::{BorrowerId, LenderId};
use crate::core::term::{LoanTerm, MarketRates};
use crate::matching::eligibility::eligible_lenders;
use crate::recommendation::amortization::amortize;
use crate::recommendation::pricing::{
    confidence_score, recommended_rate, reference_rate, select_term,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Proposed loan terms for one eligible borrower/lender pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecommendation {
    pub borrower_id: BorrowerId,
    pub lender_id: LenderId,
    pub borrower_name: String,
    pub lender_name: String,
    /// Annual rate in percent, two decimals.
    pub recommended_interest_rate: Decimal,
    /// Always one of the lender's offered terms.
    pub recommended_term: LoanTerm,
    pub estimated_monthly_payment: Decimal,
    pub total_interest_paid: Decimal,
    /// 0–100.
    pub confidence_score: u8,
    pub reasoning: String,
}

/// Prices every eligible borrower/lender pair against current market
/// rates.
pub struct Recommender;

impl Recommender {
    /// Produce one recommendation per eligible pair, borrower-major in
    /// input order. Pairs that cannot be priced are logged and skipped.
    pub fn recommend_all(
        borrowers: &[Borrower],
        lenders: &[Lender],
        market: &MarketRates,
    ) -> Vec<LoanRecommendation> {
        let mut recommendations = Vec::new();

        for borrower in borrowers {
            for lender in eligible_lenders(borrower, lenders) {
                match Self::recommend(borrower, lender, market) {
                    Ok(rec) => recommendations.push(rec),
                    Err(e) => log::warn!(
                        "skipping recommendation {} / {}: {}",
                        borrower.id,
                        lender.id,
                        e
                    ),
                }
            }
        }

        log::debug!(
            "generated {} recommendations from {} borrowers and {} lenders",
            recommendations.len(),
            borrowers.len(),
            lenders.len()
        );
        recommendations
    }

    /// Price a single pair. Does not re-check eligibility.
    pub fn recommend(
        borrower: &Borrower,
        lender: &Lender,
        market: &MarketRates,
    ) -> Result<LoanRecommendation, PairError> {
        let term = select_term(borrower, lender)?;
        let market_rate = reference_rate(lender, term, market);
        let rate = recommended_rate(borrower, lender, market_rate);
        let payments = amortize(borrower.loan_amount, rate, term)?;
        let confidence = confidence_score(borrower, lender, rate);

        Ok(LoanRecommendation {
            borrower_id: borrower.id.clone(),
            lender_id: lender.id.clone(),
            borrower_name: borrower.name.clone(),
            lender_name: lender.name.clone(),
            recommended_interest_rate: rate,
            recommended_term: term,
            estimated_monthly_payment: payments.monthly_payment,
            total_interest_paid: payments.total_interest,
            confidence_score: confidence,
            reasoning: recommendation_reasoning(borrower, rate, term, confidence),
        })
    }
}

fn recommendation_reasoning(
    borrower: &Borrower,
    rate: Decimal,
    term: LoanTerm,
    confidence: u8,
) -> String {
    let rate = rate.normalize();
    if confidence >= 80 {
        format!(
            "Highly confident recommendation based on {}'s strong credit profile and low risk score. \
             The recommended rate of {}% over {} months provides a good balance between affordability and lender return.",
            borrower.name, rate, term,
        )
    } else if confidence >= 60 {
        format!(
            "Moderately confident recommendation. The {}-month term with {}% interest rate accounts for \
             {}'s risk profile while remaining competitive with market rates.",
            term, rate, borrower.name,
        )
    } else {
        format!(
            "This recommendation comes with lower confidence due to {}'s higher risk profile. \
             The {}% rate reflects this risk while still providing a viable loan option over {} months.",
            borrower.name, rate, term,
        )
    }
}
