//! Term selection, rate pricing and confidence scoring for one pair.

use crate::core::borrower::{Borrower, RiskStatus};
use crate::core::error::PairError;
use crate::core::lender::Lender;
use crate::core::term::{LoanTerm, MarketRates};
use crate::recommendation::amortization::round_cents;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const LOW_RISK_BELOW: u8 = 30;
const HIGH_RISK_ABOVE: u8 = 60;
const PRIME_CREDIT_ABOVE: u16 = 750;
const SUBPRIME_CREDIT_BELOW: u16 = 650;
const CREDIT_NUDGE: Decimal = dec!(0.5);
/// The rate never falls below this share of the market rate.
const MARKET_FLOOR: Decimal = dec!(0.8);
/// The rate never exceeds this multiple of the lender's base rate.
const BASE_CEILING: Decimal = dec!(1.5);

const BASE_CONFIDENCE: i32 = 70;
const POOR_CREDIT_BELOW: u16 = 600;

/// Pick the loan term to offer.
///
/// The borrower's requested term wins if the lender offers it; otherwise
/// the lender's closest term, with ties going to the earlier-listed one.
pub fn select_term(borrower: &Borrower, lender: &Lender) -> Result<LoanTerm, PairError> {
    let requested = borrower.loan_term;
    if lender.offers_term(requested) {
        return Ok(requested);
    }
    // min_by_key returns the first minimum.
    lender
        .loan_terms
        .iter()
        .copied()
        .min_by_key(|term| term.distance(requested))
        .ok_or_else(|| PairError::NoLoanTerms {
            lender: lender.id.clone(),
        })
}

/// Market rate for `term`, falling back to the lender's base rate when the
/// term is not quoted.
pub fn reference_rate(lender: &Lender, term: LoanTerm, market: &MarketRates) -> Decimal {
    market.rate_for(term).unwrap_or(lender.interest_rate)
}

/// Recommended annual rate (percent, two decimals) for a pair.
///
/// The risk tier sets the rate relative to the market and base rates, a
/// credit-score nudge of half a point follows, and the result is clamped
/// to `[0.8 * market, 1.5 * base]`. Unassessed borrowers are priced as
/// medium risk.
pub fn recommended_rate(borrower: &Borrower, lender: &Lender, market_rate: Decimal) -> Decimal {
    let base = lender.interest_rate;

    let mut rate = match borrower.risk {
        RiskStatus::Assessed(r) if r < LOW_RISK_BELOW => {
            (market_rate * dec!(0.9)).max(base * dec!(0.9))
        }
        RiskStatus::Assessed(r) if r > HIGH_RISK_ABOVE => {
            (market_rate * dec!(1.2)).max(base * dec!(1.1))
        }
        RiskStatus::Assessed(_) | RiskStatus::Unassessed => {
            (market_rate * dec!(1.05)).max(base)
        }
    };

    if borrower.credit_score > PRIME_CREDIT_ABOVE {
        rate -= CREDIT_NUDGE;
    } else if borrower.credit_score < SUBPRIME_CREDIT_BELOW {
        rate += CREDIT_NUDGE;
    }

    // Ceiling applied last: it wins if the two bounds cross.
    rate = rate.max(market_rate * MARKET_FLOOR);
    rate = rate.min(base * BASE_CEILING);

    round_cents(rate)
}

/// Confidence (0–100) that the recommended terms suit the pair.
pub fn confidence_score(borrower: &Borrower, lender: &Lender, recommended_rate: Decimal) -> u8 {
    let mut score = BASE_CONFIDENCE;

    let drift = (recommended_rate - lender.interest_rate).abs();
    if drift < Decimal::ONE {
        score += 10;
    } else if drift > dec!(3) {
        score -= 10;
    }

    match borrower.risk {
        RiskStatus::Assessed(r) if r < LOW_RISK_BELOW => score += 15,
        RiskStatus::Assessed(r) if r > HIGH_RISK_ABOVE => score -= 15,
        _ => {}
    }

    if borrower.credit_score > PRIME_CREDIT_ABOVE {
        score += 10;
    } else if borrower.credit_score < POOR_CREDIT_BELOW {
        score -= 10;
    }

    score.clamp(0, 100) as u8
}
