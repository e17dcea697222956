//! EOP 14 C04 Length-of-Day loader.
//!
//! Reads the single whitespace-delimited EOP file into [`LodRecord`]s and
//! resamples `LOD_ms` / `LOD` onto a calendar period grid.

use std::io::BufRead;
use std::path::Path;

use chrono::NaiveDate;
use ecdo_core::error::{EcdoError, Result};
use ecdo_core::frequency::ResampleFreq;
use ecdo_core::models::{LodMonthly, LodRecord, LOD_COLUMNS, LOD_FIELD_COUNT};
use ecdo_core::table::Table;
use tracing::debug;

use crate::aggregator::MeanResampler;

/// Number of header/metadata lines preceding the first data line.
pub const LOD_HEADER_LINES: usize = 14;

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the EOP file at `file_path` and resample it to `resample_freq`.
///
/// Output columns are the period means of `LOD_ms` and `LOD`.
pub fn load_lod_data(file_path: &Path, resample_freq: ResampleFreq) -> Result<Table<LodMonthly>> {
    let records = read_lod_records(file_path)?;

    let monthly = MeanResampler::resample(&records, resample_freq, |r| {
        (r.date, [r.lod_ms(), r.lod])
    });

    debug!(
        "LOD {}: {} daily rows -> {} {} periods",
        file_path.display(),
        records.len(),
        monthly.len(),
        resample_freq
    );

    Ok(monthly
        .iter()
        .map(|row| (row.period, LodMonthly::from(row.values)))
        .collect())
}

/// Read every data line of an EOP file, in file order.
///
/// The first [`LOD_HEADER_LINES`] lines are skipped unconditionally; blank
/// lines after them are ignored.
pub fn read_lod_records(file_path: &Path) -> Result<Vec<LodRecord>> {
    let file = std::fs::File::open(file_path).map_err(|source| EcdoError::FileAccess {
        path: file_path.to_path_buf(),
        source,
    })?;
    let reader = std::io::BufReader::new(file);

    let mut records = Vec::new();

    for (idx, line_result) in reader.lines().enumerate().skip(LOD_HEADER_LINES) {
        let line = line_result.map_err(|source| EcdoError::FileAccess {
            path: file_path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_lod_line(&line).map_err(|message| EcdoError::Parse {
            path: file_path.to_path_buf(),
            line: idx + 1,
            message,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Parse one whitespace-delimited EOP data line.
pub fn parse_lod_line(line: &str) -> std::result::Result<LodRecord, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != LOD_FIELD_COUNT {
        return Err(format!(
            "expected {} fields, found {}",
            LOD_FIELD_COUNT,
            tokens.len()
        ));
    }

    let year: i32 = parse_token(&tokens, 0)?;
    let month: u32 = parse_token(&tokens, 1)?;
    let day: u32 = parse_token(&tokens, 2)?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("invalid calendar date {}-{}-{}", year, month, day))?;

    Ok(LodRecord {
        date,
        mjd: parse_token(&tokens, 3)?,
        x: parse_token(&tokens, 4)?,
        y: parse_token(&tokens, 5)?,
        ut1_utc: parse_token(&tokens, 6)?,
        lod: parse_token(&tokens, 7)?,
        dx: parse_token(&tokens, 8)?,
        dy: parse_token(&tokens, 9)?,
        x_err: parse_token(&tokens, 10)?,
        y_err: parse_token(&tokens, 11)?,
        ut1_utc_err: parse_token(&tokens, 12)?,
        lod_err: parse_token(&tokens, 13)?,
        dx_err: parse_token(&tokens, 14)?,
        dy_err: parse_token(&tokens, 15)?,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn parse_token<T: std::str::FromStr>(tokens: &[&str], idx: usize) -> std::result::Result<T, String> {
    tokens[idx]
        .parse::<T>()
        .map_err(|_| format!("invalid `{}` value '{}'", LOD_COLUMNS[idx], tokens[idx]))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
