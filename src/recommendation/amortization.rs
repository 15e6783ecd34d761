use crate::core::error::PairError;
use crate::core::term::LoanTerm;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Round a money amount or rate to two decimals, halves away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Payment figures for a fixed-rate, fully amortizing loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPayments {
    pub monthly_payment: Decimal,
    pub total_interest: Decimal,
}

/// Compute the level monthly payment and total interest.
///
/// `annual_rate` is a percentage (`6.25` for 6.25%). The payment is
/// rounded to cents first and total interest is derived from the rounded
/// payment, so `monthly_payment * months - principal == total_interest`
/// holds exactly for cent-denominated principals. A 0% rate repays
/// `principal / months` per month with no interest.
///
/// # Examples
///
/// ```
/// use loan_matcher::core::term::LoanTerm;
/// use loan_matcher::recommendation::amortization::amortize;
/// use rust_decimal_macros::dec;
///
/// let p = amortize(dec!(10000), dec!(6), LoanTerm::new(12)).unwrap();
/// assert_eq!(p.monthly_payment, dec!(860.66));
/// assert_eq!(p.total_interest, dec!(327.92));
/// ```
pub fn amortize(
    principal: Decimal,
    annual_rate: Decimal,
    term: LoanTerm,
) -> Result<LoanPayments, PairError> {
    let months = term.months();
    if months == 0 {
        return Err(PairError::ZeroTerm);
    }
    let n = Decimal::from(months);
    let monthly_rate = annual_rate / PERCENT / MONTHS_PER_YEAR;

    if monthly_rate.is_zero() {
        return Ok(LoanPayments {
            monthly_payment: round_cents(principal / n),
            total_interest: Decimal::ZERO,
        });
    }

    let growth = (Decimal::ONE + monthly_rate)
        .checked_powu(u64::from(months))
        .ok_or(PairError::Overflow("compound growth"))?;
    let raw_payment = principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(growth - Decimal::ONE))
        .ok_or(PairError::Overflow("monthly payment"))?;

    let monthly_payment = round_cents(raw_payment);
    let total_interest = monthly_payment
        .checked_mul(n)
        .map(|total| round_cents(total - principal))
        .ok_or(PairError::Overflow("total interest"))?;

    Ok(LoanPayments {
        monthly_payment,
        total_interest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_schedule() {
        // 20,000 at 7.25% over 36 months
        let p = amortize(dec!(20000), dec!(7.25), LoanTerm::new(36)).unwrap();
        assert_eq!(p.monthly_payment, dec!(619.83));
        assert_eq!(p.total_interest, dec!(2313.88));
    }

    #[test]
    fn test_single_month_repays_principal_plus_one_month_interest() {
        let p = amortize(dec!(1200), dec!(12), LoanTerm::new(1)).unwrap();
        assert_eq!(p.monthly_payment, dec!(1212.00));
        assert_eq!(p.total_interest, dec!(12.00));
    }

    #[test]
    fn test_zero_rate_falls_back_to_division() {
        let p = amortize(dec!(1200), Decimal::ZERO, LoanTerm::new(12)).unwrap();
        assert_eq!(p.monthly_payment, dec!(100));
        assert_eq!(p.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_zero_term_rejected() {
        assert_eq!(
            amortize(dec!(1000), dec!(5), LoanTerm::new(0)),
            Err(PairError::ZeroTerm)
        );
    }

    #[test]
    fn test_round_trip_is_exact() {
        for (principal, rate, months) in [
            (dec!(5000), dec!(6.25), 12),
            (dec!(99999.99), dec!(21.37), 60),
            (dec!(1000), dec!(3.1), 3),
        ] {
            let p = amortize(principal, rate, LoanTerm::new(months)).unwrap();
            assert_eq!(
                p.monthly_payment * Decimal::from(months) - principal,
                p.total_interest
            );
        }
    }

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(round_cents(dec!(1.005)), dec!(1.01));
        assert_eq!(round_cents(dec!(2.675)), dec!(2.68));
        assert_eq!(round_cents(dec!(2.674)), dec!(2.67));
    }
}
