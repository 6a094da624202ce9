use chrono::{DateTime, Utc};
use countrydata_core::countries::{Country, TopCountry};
use countrydata_core::errors::Error;
use diesel::prelude::*;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::schema::countries;

/// Database representation of a country row.
///
/// Decimal fields are stored as `DOUBLE` so that SQL-side ordering works
/// numerically; conversion to `rust_decimal::Decimal` happens at this
/// boundary. Timestamps are stored as RFC 3339 text.
///
/// `treat_none_as_null`: a refresh must overwrite every mutable column,
/// including writing NULL when a currency or rate disappears upstream.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = countries)]
#[diesel(primary_key(name))]
#[diesel(treat_none_as_null = true)]
pub struct CountryDB {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_output: Option<f64>,
    pub flag_url: Option<String>,
    pub last_refreshed_at: String,
}

impl From<Country> for CountryDB {
    fn from(country: Country) -> Self {
        CountryDB {
            name: country.name,
            capital: country.capital,
            region: country.region,
            population: country.population,
            currency_code: country.currency_code,
            exchange_rate: country.exchange_rate.and_then(|d| d.to_f64()),
            estimated_output: country.estimated_output.and_then(|d| d.to_f64()),
            flag_url: country.flag_url,
            last_refreshed_at: country.last_refreshed_at.to_rfc3339(),
        }
    }
}

impl TryFrom<CountryDB> for Country {
    type Error = Error;

    fn try_from(db: CountryDB) -> Result<Self, Self::Error> {
        let last_refreshed_at: DateTime<Utc> =
            DateTime::parse_from_rfc3339(&db.last_refreshed_at)?.with_timezone(&Utc);
        Ok(Country {
            name: db.name,
            capital: db.capital,
            region: db.region,
            population: db.population,
            currency_code: db.currency_code,
            exchange_rate: db.exchange_rate.and_then(Decimal::from_f64),
            estimated_output: db
                .estimated_output
                .and_then(Decimal::from_f64)
                .map(|d| d.round_dp(2)),
            flag_url: db.flag_url,
            last_refreshed_at,
        })
    }
}

/// Projection used for the top-N query behind the summary image.
#[derive(Queryable, PartialEq, Debug, Clone)]
pub struct TopCountryDB {
    pub name: String,
    pub estimated_output: Option<f64>,
}

impl From<TopCountryDB> for TopCountry {
    fn from(db: TopCountryDB) -> Self {
        TopCountry {
            name: db.name,
            estimated_output: db
                .estimated_output
                .and_then(Decimal::from_f64)
                .map(|d| d.round_dp(2))
                .unwrap_or_default(),
        }
    }
}
