use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{EcdoError, Result};
use crate::frequency::ResampleFreq;

// ── LoaderConfig ──────────────────────────────────────────────────────────────

/// Inputs for a combined LOD + AAM load.
///
/// Both paths are required; there is no fallback to a directory relative to
/// the process working directory. The year range applies to AAM file
/// selection only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// EOP 14 C04 text file.
    pub lod_file: PathBuf,
    /// Directory holding the yearly `ESMGFZ_AAM_v1.0_03h_<YEAR>.asc.csv` files.
    pub aam_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub resample_freq: ResampleFreq,
}

impl LoaderConfig {
    /// Config with no year bounds and month-start resampling.
    pub fn new(lod_file: impl Into<PathBuf>, aam_dir: impl Into<PathBuf>) -> Self {
        Self {
            lod_file: lod_file.into(),
            aam_dir: aam_dir.into(),
            start_year: None,
            end_year: None,
            resample_freq: ResampleFreq::default(),
        }
    }

    pub fn with_year_range(mut self, start_year: Option<i32>, end_year: Option<i32>) -> Self {
        self.start_year = start_year;
        self.end_year = end_year;
        self
    }

    pub fn with_resample_freq(mut self, freq: ResampleFreq) -> Self {
        self.resample_freq = freq;
        self
    }

    /// Load a config from a JSON document on disk and validate it.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| EcdoError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        debug!(
            "Loaded config from {}: lod_file={}, aam_dir={}, freq={}",
            path.display(),
            config.lod_file.display(),
            config.aam_dir.display(),
            config.resample_freq
        );

        Ok(config)
    }

    /// Reject configs with empty paths.
    pub fn validate(&self) -> Result<()> {
        if self.lod_file.as_os_str().is_empty() {
            return Err(EcdoError::Config("lod_file must not be empty".to_string()));
        }
        if self.aam_dir.as_os_str().is_empty() {
            return Err(EcdoError::Config("aam_dir must not be empty".to_string()));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_new_has_open_range_and_default_freq() {
        let cfg = LoaderConfig::new("eop.txt", "aam");
        assert_eq!(cfg.lod_file, PathBuf::from("eop.txt"));
        assert_eq!(cfg.aam_dir, PathBuf::from("aam"));
        assert!(cfg.start_year.is_none());
        assert!(cfg.end_year.is_none());
        assert_eq!(cfg.resample_freq, ResampleFreq::MonthStart);
    }

    #[test]
    fn test_builders() {
        let cfg = LoaderConfig::new("eop.txt", "aam")
            .with_year_range(Some(1999), Some(2000))
            .with_resample_freq(ResampleFreq::MonthEnd);
        assert_eq!(cfg.start_year, Some(1999));
        assert_eq!(cfg.end_year, Some(2000));
        assert_eq!(cfg.resample_freq, ResampleFreq::MonthEnd);
    }

    #[test]
    fn test_load_from_minimal_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ecdo.json");
        std::fs::write(&path, r#"{"lod_file": "/data/eop.txt", "aam_dir": "/data/aam"}"#).unwrap();

        let cfg = LoaderConfig::load_from(&path).unwrap();
        assert_eq!(cfg, LoaderConfig::new("/data/eop.txt", "/data/aam"));
    }

    #[test]
    fn test_load_from_full_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ecdo.json");
        std::fs::write(
            &path,
            r#"{
                "lod_file": "eop.txt",
                "aam_dir": "aam",
                "start_year": 1990,
                "end_year": 2010,
                "resample_freq": "month-end"
            }"#,
        )
        .unwrap();

        let cfg = LoaderConfig::load_from(&path).unwrap();
        assert_eq!(cfg.start_year, Some(1990));
        assert_eq!(cfg.end_year, Some(2010));
        assert_eq!(cfg.resample_freq, ResampleFreq::MonthEnd);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = LoaderConfig::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileAccess);
    }

    #[test]
    fn test_load_from_requires_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ecdo.json");
        std::fs::write(&path, r#"{"aam_dir": "aam"}"#).unwrap();

        let err = LoaderConfig::load_from(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let err = LoaderConfig::new("", "aam").validate().unwrap_err();
        assert!(err.to_string().contains("lod_file"));
        let err = LoaderConfig::new("eop.txt", "").validate().unwrap_err();
        assert!(err.to_string().contains("aam_dir"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let cfg = LoaderConfig::new("eop.txt", "aam").with_year_range(Some(2000), None);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("end_year"));
        let back: LoaderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
