//! Joins the resampled LOD and AAM tables on their shared periods.

use std::path::Path;

use ecdo_core::error::Result;
use ecdo_core::frequency::ResampleFreq;
use ecdo_core::models::CombinedMonthly;
use ecdo_core::settings::LoaderConfig;
use ecdo_core::table::Table;
use tracing::info;

use crate::aam::load_aam_data;
use crate::lod::load_lod_data;

// ── Public API ────────────────────────────────────────────────────────────────

/// Load both series with the same `resample_freq` and inner-join them.
///
/// The year range narrows only the AAM file selection; the LOD series is
/// always loaded in full and trimmed by the join. Periods missing from either
/// side are dropped. Any loader error is returned unchanged.
pub fn load_combined_data(
    lod_file: &Path,
    aam_dir: &Path,
    start_year: Option<i32>,
    end_year: Option<i32>,
    resample_freq: ResampleFreq,
) -> Result<Table<CombinedMonthly>> {
    let lod = load_lod_data(lod_file, resample_freq)?;
    let aam = load_aam_data(aam_dir, start_year, end_year, resample_freq)?;

    let combined = lod.inner_join(&aam, CombinedMonthly::from_parts);

    info!(
        "Joined {} {} periods ({} LOD-only and {} AAM-only dropped)",
        combined.len(),
        resample_freq,
        lod.len() - combined.len(),
        aam.len() - combined.len()
    );

    Ok(combined)
}

/// [`load_combined_data`] driven by a [`LoaderConfig`].
pub fn load_combined_from_config(config: &LoaderConfig) -> Result<Table<CombinedMonthly>> {
    config.validate()?;
    load_combined_data(
        &config.lod_file,
        &config.aam_dir,
        config.start_year,
        config.end_year,
        config.resample_freq,
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
