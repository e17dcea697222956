//! Shared types for the ECDO ingestion pipeline.
//!
//! Error taxonomy, raw and resampled row records, the period-indexed
//! [`Table`](table::Table), resampling frequencies and the loader config.

pub mod error;
pub mod frequency;
pub mod models;
pub mod settings;
pub mod table;

pub use error::{EcdoError, ErrorKind, Result};
pub use frequency::ResampleFreq;
pub use settings::LoaderConfig;
pub use table::{Table, TableRow};
