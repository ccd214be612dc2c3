//! Data module - CSV loading, schema normalization and row filtering

mod loader;
mod processor;
pub mod schema;

pub use loader::{DataLoader, LoaderError, DEFAULT_CSV_NAME};
pub use processor::{DataProcessor, ProcessorError};
pub use schema::{coerce_number, SchemaNormalizer, EXPECTED_COLUMNS};
