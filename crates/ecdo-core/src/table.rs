//! Period-indexed table.
//!
//! [`Table`] is the common output of every loader: a sequence of rows keyed
//! by a period label. Rows can only be built from a [`BTreeMap`] (directly or
//! via `collect`), so the index is always strictly ascending with no
//! duplicate periods.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single row: the period label plus the values recorded for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow<R> {
    pub period: NaiveDate,
    #[serde(flatten)]
    pub values: R,
}

/// Rows ordered by period label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table<R> {
    rows: Vec<TableRow<R>>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R> Table<R> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TableRow<R>] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TableRow<R>> {
        self.rows.iter()
    }

    /// Period labels in ascending order.
    pub fn index(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.period).collect()
    }

    /// Values recorded for `period`, if the period is in the index.
    pub fn get(&self, period: NaiveDate) -> Option<&R> {
        self.rows
            .binary_search_by_key(&period, |r| r.period)
            .ok()
            .map(|idx| &self.rows[idx].values)
    }

    pub fn first(&self) -> Option<&TableRow<R>> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&TableRow<R>> {
        self.rows.last()
    }

    /// Extract one column, in index order.
    pub fn column<T>(&self, select: impl Fn(&R) -> T) -> Vec<T> {
        self.rows.iter().map(|r| select(&r.values)).collect()
    }

    /// Inner join on the period index.
    ///
    /// Only periods present in both tables survive; `merge` builds the output
    /// row from the two matching inputs. Both indices are ascending, so a
    /// single merge walk suffices.
    pub fn inner_join<S, T>(
        &self,
        other: &Table<S>,
        merge: impl Fn(&R, &S) -> T,
    ) -> Table<T> {
        let mut rows = Vec::with_capacity(self.len().min(other.len()));
        let (mut i, mut j) = (0, 0);

        while i < self.rows.len() && j < other.rows.len() {
            let (l, r) = (&self.rows[i], &other.rows[j]);
            match l.period.cmp(&r.period) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    rows.push(TableRow {
                        period: l.period,
                        values: merge(&l.values, &r.values),
                    });
                    i += 1;
                    j += 1;
                }
            }
        }

        Table { rows }
    }
}

impl<R> From<BTreeMap<NaiveDate, R>> for Table<R> {
    fn from(map: BTreeMap<NaiveDate, R>) -> Self {
        let rows = map
            .into_iter()
            .map(|(period, values)| TableRow { period, values })
            .collect();
        Self { rows }
    }
}

impl<R> FromIterator<(NaiveDate, R)> for Table<R> {
    /// Later entries for an already-seen period replace earlier ones.
    fn from_iter<I: IntoIterator<Item = (NaiveDate, R)>>(iter: I) -> Self {
        iter.into_iter().collect::<BTreeMap<_, _>>().into()
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a TableRow<R>;
    type IntoIter = std::slice::Iter<'a, TableRow<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
