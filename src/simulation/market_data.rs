//! Simulated external financial data.
//!
//! Stands in for market-rate feeds, credit bureaus, bank verification and
//! macroeconomic data. Nothing here talks to a real service.

use crate::core::term::MarketRates;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Anything that can supply a current market-rate table.
pub trait MarketRateSource {
    fn market_rates(&self) -> MarketRates;
}

/// A fixed table is its own source.
impl MarketRateSource for MarketRates {
    fn market_rates(&self) -> MarketRates {
        self.clone()
    }
}

/// Snapshot of headline economic indicators, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomicIndicators {
    pub inflation: Decimal,
    pub unemployment: Decimal,
    pub gdp_growth: Decimal,
}

impl std::fmt::Display for EconomicIndicators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Economic Indicators ===")?;
        writeln!(f, "Inflation:    {}%", self.inflation)?;
        writeln!(f, "Unemployment: {}%", self.unemployment)?;
        writeln!(f, "GDP Growth:   {}%", self.gdp_growth)?;
        Ok(())
    }
}

/// Simulated market-data provider.
///
/// Market rates come from the standard table; the other lookups draw from
/// the caller's RNG so tests can seed them.
#[derive(Debug, Clone, Default)]
pub struct SimulatedMarketData;

impl SimulatedMarketData {
    pub fn new() -> Self {
        Self
    }

    /// A credit score drawn uniformly from 300..=850.
    pub fn credit_score<R: Rng>(&self, rng: &mut R) -> u16 {
        rng.gen_range(300..=850)
    }

    /// Simulated account verification; succeeds nine times in ten.
    pub fn verify_bank_account<R: Rng>(&self, account: &str, rng: &mut R) -> bool {
        let verified = rng.gen_bool(0.9);
        log::debug!("bank verification for {}: {}", account, verified);
        verified
    }

    pub fn economic_indicators<R: Rng>(&self, rng: &mut R) -> EconomicIndicators {
        EconomicIndicators {
            inflation: one_decimal(2.0 + rng.gen::<f64>() * 3.0),
            unemployment: one_decimal(3.0 + rng.gen::<f64>() * 4.0),
            gdp_growth: one_decimal(1.0 + rng.gen::<f64>() * 3.0),
        }
    }
}

impl MarketRateSource for SimulatedMarketData {
    fn market_rates(&self) -> MarketRates {
        MarketRates::standard()
    }
}

fn one_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp(1)
}
