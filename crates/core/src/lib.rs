//! Domain layer for the country data aggregation service.
//!
//! The core crate is storage- and transport-agnostic: repositories are
//! traits implemented by `countrydata-storage-sqlite`, and the two external
//! feeds come in through the source traits of `countrydata-feed`. The server
//! binary wires everything together.

pub mod countries;
pub mod errors;
pub mod refresh;
pub mod status;
pub mod summary;

pub use errors::{DatabaseError, Error, Result, ValidationError};
