use crate::core::borrower::{Borrower, LoanPurpose, RiskStatus};
use crate::core::error::PairError;
use crate::core::lender::Lender;
use crate::core::party::{BorrowerId, LenderId};
use crate::matching::eligibility::eligible_lenders;
use crate::recommendation::amortization::round_cents;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const BASE_SCORE: u8 = 60;
const MAX_SCORE: u8 = 100;

/// A borrower/lender pair that passed eligibility, with its compatibility
/// score and display fields from both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub borrower_id: BorrowerId,
    pub lender_id: LenderId,
    pub borrower_name: String,
    pub lender_name: String,
    pub borrower_credit_score: u16,
    pub borrower_risk_score: RiskStatus,
    pub lender_min_credit_score: u16,
    pub lender_max_risk_tolerance: u8,
    pub loan_amount: Decimal,
    pub lending_amount: Decimal,
    pub loan_purpose: LoanPurpose,
    /// The lender's base rate.
    pub interest_rate: Decimal,
    /// Compatibility, 0–100.
    pub match_score: u8,
    pub reasoning: String,
}

/// Scores and ranks every eligible borrower/lender pair.
pub struct Matcher;

impl Matcher {
    /// Produce all matches, sorted by descending score.
    ///
    /// Equal scores keep their input order (borrower-major, then lender).
    /// Pairs whose score cannot be computed are logged and skipped.
    pub fn match_all(borrowers: &[Borrower], lenders: &[Lender]) -> Vec<Match> {
        let mut matches = Vec::new();

        for borrower in borrowers {
            for lender in eligible_lenders(borrower, lenders) {
                match Self::build_match(borrower, lender) {
                    Ok(m) => matches.push(m),
                    Err(e) => log::warn!(
                        "skipping match {} / {}: {}",
                        borrower.id,
                        lender.id,
                        e
                    ),
                }
            }
        }

        // Stable: ties keep input order.
        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        log::debug!(
            "matched {} pairs from {} borrowers and {} lenders",
            matches.len(),
            borrowers.len(),
            lenders.len()
        );
        matches
    }

    fn build_match(borrower: &Borrower, lender: &Lender) -> Result<Match, PairError> {
        let match_score = match_score(borrower, lender)?;
        Ok(Match {
            borrower_id: borrower.id.clone(),
            lender_id: lender.id.clone(),
            borrower_name: borrower.name.clone(),
            lender_name: lender.name.clone(),
            borrower_credit_score: borrower.credit_score,
            borrower_risk_score: borrower.risk,
            lender_min_credit_score: lender.min_credit_score,
            lender_max_risk_tolerance: lender.max_risk_tolerance,
            loan_amount: borrower.loan_amount,
            lending_amount: lender.amount_to_lend,
            loan_purpose: borrower.loan_purpose.clone(),
            interest_rate: lender.interest_rate,
            match_score,
            reasoning: match_reasoning(borrower, lender, match_score),
        })
    }
}

/// Compatibility score for an eligible pair.
///
/// Starts at 60 and adds independent bonuses for credit margin, loan size
/// relative to capacity and risk headroom, capped at 100. The risk bonus
/// is skipped for unassessed borrowers.
pub fn match_score(borrower: &Borrower, lender: &Lender) -> Result<u8, PairError> {
    if lender.amount_to_lend <= Decimal::ZERO {
        return Err(PairError::ZeroCapacity {
            lender: lender.id.clone(),
        });
    }

    let credit_margin = i32::from(borrower.credit_score) - i32::from(lender.min_credit_score);
    let credit_bonus = match credit_margin {
        m if m >= 100 => 15,
        m if m >= 50 => 10,
        m if m >= 20 => 5,
        _ => 0,
    };

    let loan_ratio = borrower
        .loan_amount
        .checked_div(lender.amount_to_lend)
        .ok_or(PairError::Overflow("loan ratio"))?;
    let capacity_bonus = if loan_ratio <= dec!(0.3) {
        15
    } else if loan_ratio <= dec!(0.5) {
        10
    } else if loan_ratio <= dec!(0.7) {
        5
    } else {
        0
    };

    let risk_bonus = match borrower.risk {
        RiskStatus::Assessed(risk) => {
            match i16::from(lender.max_risk_tolerance) - i16::from(risk) {
                m if m >= 30 => 15,
                m if m >= 15 => 10,
                m if m >= 5 => 5,
                _ => 0,
            }
        }
        RiskStatus::Unassessed => 0,
    };

    Ok((BASE_SCORE + credit_bonus + capacity_bonus + risk_bonus).min(MAX_SCORE))
}

fn match_reasoning(borrower: &Borrower, lender: &Lender, score: u8) -> String {
    if score >= 80 {
        format!(
            "Excellent match! {}'s credit score of {} significantly exceeds {}'s minimum requirement of {}. \
             The loan amount of ${} is well within {}'s lending capacity of ${}.",
            borrower.name,
            borrower.credit_score,
            lender.name,
            lender.min_credit_score,
            format_amount(borrower.loan_amount),
            lender.name,
            format_amount(lender.amount_to_lend),
        )
    } else if score >= 60 {
        format!(
            "Good match. {}'s credit score of {} meets {}'s requirements. \
             The loan purpose ({}) aligns with the lender's preferences, though the risk profile could be better.",
            borrower.name, borrower.credit_score, lender.name, borrower.loan_purpose,
        )
    } else {
        format!(
            "Acceptable match. {} meets {}'s minimum requirements, but there are some concerns \
             regarding the risk profile and loan-to-lending ratio. This match may require additional scrutiny.",
            borrower.name, lender.name,
        )
    }
}

/// Render an amount with thousands separators and at most two decimals,
/// e.g. `12500` -> `12,500` and `1234.5` -> `1,234.5`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_cents(amount).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
