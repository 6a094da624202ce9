//! Wire-shape models for the two external feeds.
//!
//! These structs are deliberately explicit: a payload that does not fit them
//! fails deserialization at the client boundary instead of propagating
//! missing fields downstream.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// One currency as listed by the countries directory.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyEntry {
    /// ISO 4217 code. Some territories are listed with a missing code.
    pub code: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// One element of the countries-directory array.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryEntry {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    /// Currencies in directory order; the first listed code is the one the
    /// merge step uses.
    #[serde(default)]
    pub currencies: Vec<CurrencyEntry>,
    pub flag: Option<String>,
}

impl CountryEntry {
    /// First listed currency code, if the entry has one.
    pub fn primary_currency_code(&self) -> Option<&str> {
        self.currencies.iter().find_map(|c| c.code.as_deref())
    }
}

/// Exchange-rate feed body: rates relative to a fixed base currency.
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    pub base: String,
    pub rates: HashMap<String, Decimal>,
}

impl RateTable {
    pub fn rate_for(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }
}
