//! Join-and-derive step of the refresh pipeline.
//!
//! Pure: no I/O, no storage. Every directory entry produces exactly one
//! merged record, matched or not.

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::countries::Country;
use countrydata_feed::{CountryEntry, RateTable};

/// Source of the scaling factor used for the estimated-output metric.
///
/// The upstream system draws a fresh value per computation, which makes the
/// metric non-reproducible across refreshes. Injecting the source keeps
/// production faithful to that behavior while letting tests pin the value.
pub trait OutputMultiplier: Send + Sync {
    fn draw(&self) -> Decimal;
}

/// Uniform draw from [1000, 2000) per computation. Production default.
pub struct UniformMultiplier;

impl OutputMultiplier for UniformMultiplier {
    fn draw(&self) -> Decimal {
        let value = rand::thread_rng().gen_range(1000.0..2000.0);
        // gen_range output is always finite and in range
        Decimal::from_f64(value).unwrap_or_else(|| Decimal::from(1500))
    }
}

/// Fixed multiplier for deterministic tests.
pub struct FixedMultiplier(pub Decimal);

impl OutputMultiplier for FixedMultiplier {
    fn draw(&self) -> Decimal {
        self.0
    }
}

/// Merges each directory entry with its exchange rate, producing one country
/// record per entry.
///
/// The first listed currency code (if any) becomes the record's code. When
/// that code keys into the rate table with a positive rate, the record gets
/// the rate and `estimated_output = population * multiplier / rate`, rounded
/// to two decimal places. Otherwise the derived fields stay `None`; the
/// record is produced regardless.
pub fn merge_entries(
    entries: Vec<CountryEntry>,
    rates: &RateTable,
    multiplier: &dyn OutputMultiplier,
    now: DateTime<Utc>,
) -> Vec<Country> {
    entries
        .into_iter()
        .map(|entry| {
            let currency_code = entry.primary_currency_code().map(str::to_string);

            let mut exchange_rate = None;
            let mut estimated_output = None;
            if let Some(code) = currency_code.as_deref() {
                match rates.rate_for(code) {
                    Some(rate) if rate > Decimal::ZERO => {
                        let output =
                            (Decimal::from(entry.population) * multiplier.draw() / rate).round_dp(2);
                        exchange_rate = Some(rate);
                        estimated_output = Some(output);
                    }
                    _ => {}
                }
            }

            Country {
                name: entry.name,
                capital: entry.capital,
                region: entry.region,
                population: entry.population,
                currency_code,
                exchange_rate,
                estimated_output,
                flag_url: entry.flag,
                last_refreshed_at: now,
            }
        })
        .collect()
}
