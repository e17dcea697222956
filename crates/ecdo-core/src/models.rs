use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Number of whitespace-separated fields on an EOP 14 C04 data line.
pub const LOD_FIELD_COUNT: usize = 16;

/// Column names of an EOP 14 C04 data line, in file order.
pub const LOD_COLUMNS: [&str; LOD_FIELD_COUNT] = [
    "Year",
    "Month",
    "Day",
    "MJD",
    "x",
    "y",
    "UT1-UTC",
    "LOD",
    "dX",
    "dY",
    "x_Err",
    "y_Err",
    "UT1-UTC_Err",
    "LOD_Err",
    "dX_Err",
    "dY_Err",
];

/// Columns an AAM file must provide.
pub const AAM_REQUIRED_COLUMNS: [&str; 6] = ["Year", "Month", "Day", "Time", "Mass_Z", "Motion_Z"];

// ── Raw records ───────────────────────────────────────────────────────────────

/// One daily Earth Orientation Parameter row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodRecord {
    /// Calendar day built from the Year/Month/Day fields.
    pub date: NaiveDate,
    /// Modified Julian Date.
    pub mjd: f64,
    /// Pole coordinate x (arcsec).
    pub x: f64,
    /// Pole coordinate y (arcsec).
    pub y: f64,
    /// UT1-UTC offset (s).
    pub ut1_utc: f64,
    /// Length-of-day excess (s).
    pub lod: f64,
    pub dx: f64,
    pub dy: f64,
    pub x_err: f64,
    pub y_err: f64,
    pub ut1_utc_err: f64,
    pub lod_err: f64,
    pub dx_err: f64,
    pub dy_err: f64,
}

impl LodRecord {
    /// Length-of-day excess in milliseconds.
    pub fn lod_ms(&self) -> f64 {
        self.lod * 1000.0
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// One sub-daily Atmospheric Angular Momentum row.
///
/// Only the polar-axis terms are retained; equatorial components in the
/// source files are not read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AamRecord {
    pub timestamp: NaiveDateTime,
    /// Polar-axis mass (pressure) term.
    pub mass_z: f64,
    /// Polar-axis motion (wind) term.
    pub motion_z: f64,
}

impl AamRecord {
    /// Total atmospheric excitation along the polar axis.
    pub fn x3_atm(&self) -> f64 {
        self.mass_z + self.motion_z
    }

    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }
}

// ── Resampled rows ────────────────────────────────────────────────────────────

/// Period means of the LOD series. `None` marks a period without data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LodMonthly {
    #[serde(rename = "LOD_ms")]
    pub lod_ms: Option<f64>,
    #[serde(rename = "LOD")]
    pub lod: Option<f64>,
}

impl From<[Option<f64>; 2]> for LodMonthly {
    fn from([lod_ms, lod]: [Option<f64>; 2]) -> Self {
        Self { lod_ms, lod }
    }
}

/// Period means of the AAM series. `None` marks a period without data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AamMonthly {
    #[serde(rename = "Mass_Z")]
    pub mass_z: Option<f64>,
    #[serde(rename = "Motion_Z")]
    pub motion_z: Option<f64>,
    #[serde(rename = "X3_atm")]
    pub x3_atm: Option<f64>,
}

impl From<[Option<f64>; 3]> for AamMonthly {
    fn from([mass_z, motion_z, x3_atm]: [Option<f64>; 3]) -> Self {
        Self {
            mass_z,
            motion_z,
            x3_atm,
        }
    }
}

/// A period present in both the LOD and AAM tables.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CombinedMonthly {
    #[serde(rename = "LOD_ms")]
    pub lod_ms: Option<f64>,
    #[serde(rename = "LOD")]
    pub lod: Option<f64>,
    #[serde(rename = "Mass_Z")]
    pub mass_z: Option<f64>,
    #[serde(rename = "Motion_Z")]
    pub motion_z: Option<f64>,
    #[serde(rename = "X3_atm")]
    pub x3_atm: Option<f64>,
}

impl CombinedMonthly {
    pub fn from_parts(lod: &LodMonthly, aam: &AamMonthly) -> Self {
        Self {
            lod_ms: lod.lod_ms,
            lod: lod.lod,
            mass_z: aam.mass_z,
            motion_z: aam.motion_z,
            x3_atm: aam.x3_atm,
        }
    }
}
