use chrono::{DateTime, Utc};
use countrydata_core::errors::Error;
use countrydata_core::status::RefreshStatus;
use diesel::prelude::*;

use crate::schema::refresh_status;

/// Singleton status row; the table is constrained to `id = 1`.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = refresh_status)]
pub struct RefreshStatusDB {
    pub id: i32,
    pub total_countries: i64,
    pub last_refreshed_at: Option<String>,
}

impl TryFrom<RefreshStatusDB> for RefreshStatus {
    type Error = Error;

    fn try_from(db: RefreshStatusDB) -> Result<Self, Self::Error> {
        let last_refreshed_at: Option<DateTime<Utc>> = db
            .last_refreshed_at
            .as_deref()
            .map(DateTime::parse_from_rfc3339)
            .transpose()?
            .map(|dt| dt.with_timezone(&Utc));
        Ok(RefreshStatus {
            total_countries: db.total_countries,
            last_refreshed_at,
        })
    }
}
