//! ESMGFZ Atmospheric Angular Momentum loader.
//!
//! AAM data ships as one semicolon-delimited file per calendar year. This
//! module discovers those files, optionally narrows them to a year range,
//! concatenates their sub-daily rows in timestamp order and resamples the
//! polar-axis terms onto a calendar period grid.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use ecdo_core::error::{EcdoError, Result};
use ecdo_core::frequency::ResampleFreq;
use ecdo_core::models::{AamMonthly, AamRecord, AAM_REQUIRED_COLUMNS};
use ecdo_core::table::Table;
use regex::Regex;
use tracing::{debug, warn};

use crate::aggregator::MeanResampler;

/// Glob-style description of the yearly AAM file names.
pub const AAM_FILE_PATTERN: &str = "ESMGFZ_AAM_v1.0_03h_*.asc.csv";

/// Date-time layouts accepted after Year/Month/Day/Time are joined.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

fn file_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ESMGFZ_AAM_v1\.0_03h_(.+)\.asc\.csv$").expect("regex is valid"))
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every AAM file in `data_dir` (optionally limited to
/// `[start_year, end_year]`) and resample to `resample_freq`.
///
/// Output columns are the period means of `Mass_Z`, `Motion_Z` and `X3_atm`.
pub fn load_aam_data(
    data_dir: &Path,
    start_year: Option<i32>,
    end_year: Option<i32>,
    resample_freq: ResampleFreq,
) -> Result<Table<AamMonthly>> {
    let records = read_aam_records(data_dir, start_year, end_year)?;

    let monthly = MeanResampler::resample(&records, resample_freq, |r| {
        (r.timestamp.date(), [r.mass_z, r.motion_z, r.x3_atm()])
    });

    debug!(
        "AAM {}: {} sub-daily rows -> {} {} periods",
        data_dir.display(),
        records.len(),
        monthly.len(),
        resample_freq
    );

    Ok(monthly
        .iter()
        .map(|row| (row.period, AamMonthly::from(row.values)))
        .collect())
}

/// Read and concatenate the selected AAM files, sorted by timestamp.
///
/// Rows are returned before any aggregation, so sub-daily resolution is
/// preserved.
pub fn read_aam_records(
    data_dir: &Path,
    start_year: Option<i32>,
    end_year: Option<i32>,
) -> Result<Vec<AamRecord>> {
    let files = select_aam_files(data_dir, start_year, end_year)?;

    let mut all_records: Vec<AamRecord> = Vec::new();
    for file_path in &files {
        all_records.extend(read_aam_file(file_path)?);
    }

    // Files are read in name order, but that alone does not guarantee
    // row order across (or within) files.
    all_records.sort_by_key(|r| r.timestamp);

    debug!(
        "Concatenated {} AAM rows from {} files",
        all_records.len(),
        files.len()
    );

    Ok(all_records)
}

/// Discover AAM files in `data_dir` and apply the optional year range.
///
/// Fails with a not-found error when discovery yields nothing, or when the
/// year range excludes every discovered file.
pub fn select_aam_files(
    data_dir: &Path,
    start_year: Option<i32>,
    end_year: Option<i32>,
) -> Result<Vec<PathBuf>> {
    let files = discover_aam_files(data_dir);
    if files.is_empty() {
        return Err(EcdoError::NoDataFiles(data_dir.to_path_buf()));
    }

    let selected = filter_by_year(files, start_year, end_year)?;
    if selected.is_empty() {
        return Err(EcdoError::NoFilesInYearRange {
            dir: data_dir.to_path_buf(),
            start_year,
            end_year,
        });
    }

    Ok(selected)
}

/// Find files directly inside `data_dir` whose name matches
/// [`AAM_FILE_PATTERN`], sorted by file name.
///
/// Sub-directories are not searched. A missing directory yields an empty
/// list.
pub fn discover_aam_files(data_dir: &Path) -> Vec<PathBuf> {
    if !data_dir.exists() {
        warn!("AAM data path does not exist: {}", data_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .map(|name| file_name_regex().is_match(name))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Keep files whose year lies in `[start_year, end_year]`.
///
/// A missing bound leaves that side open. When both bounds are `None` the
/// input is returned untouched and no file name is parsed.
pub fn filter_by_year(
    files: Vec<PathBuf>,
    start_year: Option<i32>,
    end_year: Option<i32>,
) -> Result<Vec<PathBuf>> {
    if start_year.is_none() && end_year.is_none() {
        return Ok(files);
    }

    let mut kept = Vec::with_capacity(files.len());
    for path in files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| EcdoError::FileName(path.display().to_string()))?;
        let year = parse_aam_year(name)?;

        if start_year.is_some_and(|start| year < start) {
            continue;
        }
        if end_year.is_some_and(|end| year > end) {
            continue;
        }
        kept.push(path);
    }

    Ok(kept)
}

/// Extract the year from an `ESMGFZ_AAM_v1.0_03h_<YEAR>.asc.csv` file name.
pub fn parse_aam_year(file_name: &str) -> Result<i32> {
    file_name_regex()
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|token| token.as_str().parse::<i32>().ok())
        .ok_or_else(|| EcdoError::FileName(file_name.to_string()))
}

/// Parse one semicolon-delimited AAM file, in file order.
pub fn read_aam_file(file_path: &Path) -> Result<Vec<AamRecord>> {
    let file = File::open(file_path).map_err(|source| EcdoError::FileAccess {
        path: file_path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| csv_error(file_path, 1, e))?
        .clone();
    let columns = AamColumns::resolve(&headers, file_path)?;

    let mut records = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // records() starts on the line after the header; lines are 1-based.
        let line = idx + 2;

        let record = result.map_err(|e| csv_error(file_path, line, e))?;
        let parsed = columns
            .parse_record(&record)
            .map_err(|message| EcdoError::Parse {
                path: file_path.to_path_buf(),
                line,
                message,
            })?;
        records.push(parsed);
    }

    debug!("File {}: {} rows", file_path.display(), records.len());

    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the required columns within one file's header.
struct AamColumns {
    year: usize,
    month: usize,
    day: usize,
    time: usize,
    mass_z: usize,
    motion_z: usize,
}

impl AamColumns {
    fn resolve(headers: &StringRecord, file_path: &Path) -> Result<Self> {
        let header_map: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header_name(name), idx))
            .collect();

        let find = |column: &str| {
            header_map
                .get(&column.to_ascii_lowercase())
                .copied()
                .ok_or_else(|| EcdoError::MissingColumn {
                    path: file_path.to_path_buf(),
                    column: column.to_string(),
                })
        };

        let [year, month, day, time, mass_z, motion_z] = AAM_REQUIRED_COLUMNS;
        Ok(Self {
            year: find(year)?,
            month: find(month)?,
            day: find(day)?,
            time: find(time)?,
            mass_z: find(mass_z)?,
            motion_z: find(motion_z)?,
        })
    }

    fn parse_record(&self, record: &StringRecord) -> std::result::Result<AamRecord, String> {
        let year: i32 = parse_field(record, self.year, "Year")?;
        let month: u32 = parse_field(record, self.month, "Month")?;
        let day: u32 = parse_field(record, self.day, "Day")?;
        let time = get_field(record, self.time, "Time")?;

        Ok(AamRecord {
            timestamp: build_timestamp(year, month, day, time)?,
            mass_z: parse_field(record, self.mass_z, "Mass_Z")?,
            motion_z: parse_field(record, self.motion_z, "Motion_Z")?,
        })
    }
}

fn normalize_header_name(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_ascii_lowercase()
}

fn get_field<'a>(record: &'a StringRecord, idx: usize, name: &str) -> std::result::Result<&'a str, String> {
    record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing `{}` value", name))
}

fn parse_field<T: std::str::FromStr>(
    record: &StringRecord,
    idx: usize,
    name: &str,
) -> std::result::Result<T, String> {
    let raw = get_field(record, idx, name)?;
    raw.parse::<T>()
        .map_err(|_| format!("invalid `{}` value '{}'", name, raw))
}

/// Join the date parts and time-of-day into one timestamp.
///
/// `time` may be `HH:MM:SS[.f]`, `HH:MM` or a bare hour.
fn build_timestamp(year: i32, month: u32, day: u32, time: &str) -> std::result::Result<NaiveDateTime, String> {
    let time = if !time.is_empty() && time.len() <= 2 && time.bytes().all(|b| b.is_ascii_digit()) {
        format!("{:0>2}:00", time)
    } else {
        time.to_string()
    };
    let joined = format!("{}-{:02}-{:02} {}", year, month, day, time);

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&joined, fmt).ok())
        .ok_or_else(|| {
            if NaiveDate::from_ymd_opt(year, month, day).is_none() {
                format!("invalid calendar date {}-{}-{}", year, month, day)
            } else {
                format!("invalid timestamp '{}'", joined)
            }
        })
}

fn csv_error(file_path: &Path, line: usize, err: csv::Error) -> EcdoError {
    match err.into_kind() {
        csv::ErrorKind::Io(source) => EcdoError::FileAccess {
            path: file_path.to_path_buf(),
            source,
        },
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => EcdoError::Parse {
            path: file_path.to_path_buf(),
            line,
            message: format!("expected {} fields, found {}", expected_len, len),
        },
        other => EcdoError::Parse {
            path: file_path.to_path_buf(),
            line,
            message: format!("CSV parse error: {:?}", other),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
