//! Calendar resampling frequencies.
//!
//! A [`ResampleFreq`] maps any calendar day onto the label of the period that
//! contains it. Labels depend only on the calendar month, so two series
//! resampled with the same frequency share identical labels for the same
//! month and can be joined on them directly.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EcdoError;

// ── ResampleFreq ──────────────────────────────────────────────────────────────

/// Target period grid for mean resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFreq {
    /// Monthly periods labelled by their first day (`MS`).
    #[default]
    MonthStart,
    /// Monthly periods labelled by their last day (`ME`, historically `M`).
    MonthEnd,
}

impl ResampleFreq {
    /// Label of the period containing `date`.
    pub fn period_of(self, date: NaiveDate) -> NaiveDate {
        let start = month_start(date);
        match self {
            ResampleFreq::MonthStart => start,
            ResampleFreq::MonthEnd => month_end(start),
        }
    }

    /// Label of the period immediately after the one labelled `label`.
    ///
    /// Returns `None` only at the end of chrono's representable range.
    pub fn next_period(self, label: NaiveDate) -> Option<NaiveDate> {
        let next_start = month_start(label).checked_add_months(Months::new(1))?;
        Some(self.period_of(next_start))
    }

    /// Every period label from `first` through `last`, inclusive, ascending.
    ///
    /// Both arguments are normalised through [`period_of`](Self::period_of)
    /// first. An empty vector is returned when `first` falls after `last`.
    pub fn periods_between(self, first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
        let last = self.period_of(last);
        let mut current = Some(self.period_of(first));
        let mut out = Vec::new();

        while let Some(label) = current {
            if label > last {
                break;
            }
            out.push(label);
            current = self.next_period(label);
        }

        out
    }

    /// Short code used in configuration files and log output.
    pub fn code(self) -> &'static str {
        match self {
            ResampleFreq::MonthStart => "MS",
            ResampleFreq::MonthEnd => "ME",
        }
    }
}

impl fmt::Display for ResampleFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ResampleFreq {
    type Err = EcdoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "MS" | "month-start" => Ok(ResampleFreq::MonthStart),
            "M" | "ME" | "month-end" => Ok(ResampleFreq::MonthEnd),
            other => Err(EcdoError::Config(format!(
                "unsupported resample frequency \"{}\" (expected MS or ME)",
                other
            ))),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_end(start: NaiveDate) -> NaiveDate {
    start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
