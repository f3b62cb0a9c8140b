//! table — persisted CSV tables with metadata rows.
//!
//! [`TableStore`] creates and appends; [`Table`] reads back with column-major
//! access by header name. See [`store`] for the file layout.

pub mod errors;
pub mod store;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{TableError, TableResult};
pub use self::store::{DATE_KEY, METADATA_DATE_FORMAT, MISSING_MARKER, Table, TableStore};
