//! SQLite storage implementation for the country data service.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `countrydata-core` and contains:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - Repository implementations for countries and the refresh-status row
//!
//! This is the only place in the workspace where Diesel dependencies exist;
//! the other crates are database-agnostic and work with traits.

pub mod countries;
pub mod db;
pub mod errors;
pub mod schema;
pub mod status;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle,
};

// Re-export the repository implementations
pub use countries::CountryRepository;
pub use status::StatusRepository;

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from countrydata-core for convenience
pub use countrydata_core::errors::{DatabaseError, Error, Result};
