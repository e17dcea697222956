//! Ingestion and alignment layer for ECDO.
//!
//! Parses the EOP 14 C04 Length-of-Day file and the yearly ESMGFZ AAM files,
//! resamples both onto a shared calendar period grid and joins them on the
//! periods they have in common.

pub mod aam;
pub mod aggregator;
pub mod combine;
pub mod lod;

pub use aam::load_aam_data;
pub use combine::{load_combined_data, load_combined_from_config};
pub use lod::load_lod_data;

pub use ecdo_core as core;
