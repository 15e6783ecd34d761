use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Length of a loan in months.
///
/// Borrowers request a single term; lenders list the terms they accept.
/// Both sides use this type, so term comparison never involves parsing.
///
/// Deserializes from either a JSON number (`12`) or a numeric string
/// (`"12"`), and always serializes as a number.
///
/// # Examples
///
/// ```
/// use loan_matcher::core::term::LoanTerm;
///
/// let a = LoanTerm::new(12);
/// let b: LoanTerm = serde_json::from_str("\"12\"").unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LoanTerm(u16);

impl LoanTerm {
    /// The term set offered by the simulated market-rate source.
    pub const STANDARD: [LoanTerm; 7] = [
        LoanTerm(3),
        LoanTerm(6),
        LoanTerm(12),
        LoanTerm(24),
        LoanTerm(36),
        LoanTerm(48),
        LoanTerm(60),
    ];

    /// A term of `months` months.
    pub const fn new(months: u16) -> Self {
        Self(months)
    }

    /// Length in months.
    pub const fn months(&self) -> u16 {
        self.0
    }

    /// Absolute distance in months between two terms.
    pub fn distance(&self, other: LoanTerm) -> u16 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for LoanTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for LoanTerm {
    fn from(months: u16) -> Self {
        Self::new(months)
    }
}

impl<'de> Deserialize<'de> for LoanTerm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = LoanTerm;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a loan term in months, as a number or numeric string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<LoanTerm, E> {
                u16::try_from(v)
                    .map(LoanTerm)
                    .map_err(|_| E::custom(format!("loan term out of range: {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<LoanTerm, E> {
                u16::try_from(v)
                    .map(LoanTerm)
                    .map_err(|_| E::custom(format!("loan term out of range: {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<LoanTerm, E> {
                v.trim()
                    .parse::<u16>()
                    .map(LoanTerm)
                    .map_err(|_| E::custom(format!("invalid loan term: {v:?}")))
            }
        }
        deserializer.deserialize_any(V)
    }
}

/// Annualized market interest rates keyed by loan term.
///
/// Rates are percentages (`6.25` means 6.25% APR). The table is read-only
/// to the pipeline; it is refreshed wholesale by a
/// [`MarketRateSource`](crate::simulation::market_data::MarketRateSource).
///
/// Serializes as a JSON object keyed by the term string, e.g.
/// `{"12": "6.25"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketRates {
    rates: BTreeMap<LoanTerm, Decimal>,
}

impl MarketRates {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The simulated reference table for the standard term set.
    pub fn standard() -> Self {
        let rates = [
            dec!(5.25),
            dec!(5.75),
            dec!(6.25),
            dec!(6.75),
            dec!(7.25),
            dec!(7.75),
            dec!(8.25),
        ];
        LoanTerm::STANDARD.into_iter().zip(rates).collect()
    }

    /// Quote `rate` for `term`, replacing any previous quote.
    pub fn set_rate(&mut self, term: LoanTerm, rate: Decimal) {
        self.rates.insert(term, rate);
    }

    /// Market rate for a term, if one is quoted.
    pub fn rate_for(&self, term: LoanTerm) -> Option<Decimal> {
        self.rates.get(&term).copied()
    }

    /// Number of quoted terms.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LoanTerm, Decimal)> + '_ {
        self.rates.iter().map(|(t, r)| (*t, *r))
    }
}

impl FromIterator<(LoanTerm, Decimal)> for MarketRates {
    fn from_iter<T: IntoIterator<Item = (LoanTerm, Decimal)>>(iter: T) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for MarketRates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Market Rates ===")?;
        for (term, rate) in self.iter() {
            writeln!(f, "  {:>3} months  {:>6}%", term.months(), rate.to_string())?;
        }
        Ok(())
    }
}
