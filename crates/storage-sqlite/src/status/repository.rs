use chrono::Utc;
use countrydata_core::errors::Result;
use countrydata_core::status::{RefreshStatus, StatusRepositoryTrait};

use super::model::RefreshStatusDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::refresh_status::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;

const STATUS_ROW_ID: i32 = 1;

pub struct StatusRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl StatusRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        StatusRepository { pool, writer }
    }

    pub fn get_status_impl(&self) -> Result<RefreshStatus> {
        let mut conn = get_connection(&self.pool)?;
        // The row is seeded by the migration; fall back to the zero state if
        // it is somehow missing.
        let row = refresh_status
            .find(STATUS_ROW_ID)
            .first::<RefreshStatusDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        match row {
            Some(db) => RefreshStatus::try_from(db),
            None => Ok(RefreshStatus::default()),
        }
    }
}

#[async_trait]
impl StatusRepositoryTrait for StatusRepository {
    fn get_status(&self) -> Result<RefreshStatus> {
        self.get_status_impl()
    }

    async fn update_status(&self, saved_count: i64) -> Result<RefreshStatus> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<RefreshStatus> {
                let status_db = RefreshStatusDB {
                    id: STATUS_ROW_ID,
                    total_countries: saved_count,
                    last_refreshed_at: Some(Utc::now().to_rfc3339()),
                };
                let result_db = diesel::insert_into(crate::schema::refresh_status::table)
                    .values(&status_db)
                    .on_conflict(id)
                    .do_update()
                    .set(&status_db)
                    .returning(RefreshStatusDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                RefreshStatus::try_from(result_db)
            })
            .await
    }
}
