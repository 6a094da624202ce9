use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One merged country record as persisted and served.
///
/// `name` is the storage key; lookups and deletes match it
/// case-insensitively. The currency-derived fields are all `None` when the
/// entry had no currency code or the code had no rate in the feed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Country {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    #[serde(serialize_with = "serialize_rate_opt")]
    pub exchange_rate: Option<Decimal>,
    #[serde(serialize_with = "serialize_output_opt")]
    pub estimated_output: Option<Decimal>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: DateTime<Utc>,
}

/// Name and output pair used for the summary image.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TopCountry {
    pub name: String,
    #[serde(serialize_with = "serialize_decimal")]
    pub estimated_output: Decimal,
}

/// Sort keys accepted by the list endpoint.
///
/// Wire values follow the original surface (`gdp_desc`, `gdp_asc`,
/// `population_desc`, `population_asc`); anything unrecognized falls back
/// to name ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountrySort {
    OutputDesc,
    OutputAsc,
    PopulationDesc,
    PopulationAsc,
    #[default]
    NameAsc,
}

impl CountrySort {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("gdp_desc") => CountrySort::OutputDesc,
            Some("gdp_asc") => CountrySort::OutputAsc,
            Some("population_desc") => CountrySort::PopulationDesc,
            Some("population_asc") => CountrySort::PopulationAsc,
            _ => CountrySort::NameAsc,
        }
    }
}

/// Optional filters for the list endpoint. Region and currency are exact
/// matches.
#[derive(Debug, Clone, Default)]
pub struct CountryFilters {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: CountrySort,
}

// Rates keep 6 places (upstream precision), derived output is a 2dp amount.
fn serialize_decimal<S>(decimal: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("{:.2}", decimal))
}

fn serialize_output_opt<S>(decimal: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match decimal {
        Some(d) => serializer.serialize_str(&format!("{:.2}", d)),
        None => serializer.serialize_none(),
    }
}

fn serialize_rate_opt<S>(decimal: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match decimal {
        Some(d) => serializer.serialize_str(&format!("{:.6}", d)),
        None => serializer.serialize_none(),
    }
}
