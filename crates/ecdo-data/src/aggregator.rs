//! Mean resampling onto a calendar period grid.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ecdo_core::frequency::ResampleFreq;
use ecdo_core::table::Table;

// ── MeanAccumulator ───────────────────────────────────────────────────────────

/// Running per-column sums and counts for one period.
///
/// NaN inputs are skipped, so a column only reports a mean when at least one
/// non-NaN value contributed to it.
#[derive(Debug, Clone, Copy)]
pub struct MeanAccumulator<const N: usize> {
    sums: [f64; N],
    counts: [u32; N],
}

impl<const N: usize> Default for MeanAccumulator<N> {
    fn default() -> Self {
        Self {
            sums: [0.0; N],
            counts: [0; N],
        }
    }
}

impl<const N: usize> MeanAccumulator<N> {
    pub fn add(&mut self, values: [f64; N]) {
        for (i, v) in values.into_iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            self.sums[i] += v;
            self.counts[i] += 1;
        }
    }

    /// Per-column arithmetic mean; `None` where nothing contributed.
    pub fn means(&self) -> [Option<f64>; N] {
        let mut out = [None; N];
        for (i, slot) in out.iter_mut().enumerate() {
            if self.counts[i] > 0 {
                *slot = Some(self.sums[i] / f64::from(self.counts[i]));
            }
        }
        out
    }
}

// ── MeanResampler ─────────────────────────────────────────────────────────────

/// Stateless helper that averages observations per calendar period.
pub struct MeanResampler;

impl MeanResampler {
    /// Group `records` by `freq` and average each of the `N` columns.
    ///
    /// `observe` returns the calendar day of a record and its column values.
    /// Input order does not matter. The output covers every period from the
    /// earliest to the latest observed one; periods inside that span with no
    /// records carry `None` in every column.
    pub fn resample<T, const N: usize>(
        records: &[T],
        freq: ResampleFreq,
        observe: impl Fn(&T) -> (NaiveDate, [f64; N]),
    ) -> Table<[Option<f64>; N]> {
        let mut buckets: BTreeMap<NaiveDate, MeanAccumulator<N>> = BTreeMap::new();

        for record in records {
            let (day, values) = observe(record);
            buckets
                .entry(freq.period_of(day))
                .or_default()
                .add(values);
        }

        let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back())
        else {
            return Table::default();
        };

        freq.periods_between(first, last)
            .into_iter()
            .map(|period| {
                let means = buckets
                    .get(&period)
                    .map(MeanAccumulator::means)
                    .unwrap_or([None; N]);
                (period, means)
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resample_pairs(
        obs: &[(NaiveDate, f64)],
        freq: ResampleFreq,
    ) -> Table<[Option<f64>; 1]> {
        MeanResampler::resample(obs, freq, |(d, v)| (*d, [*v]))
    }

    // ── MeanAccumulator ───────────────────────────────────────────────────────

    #[test]
    fn test_accumulator_means() {
        let mut acc = MeanAccumulator::<2>::default();
        acc.add([1.0, 10.0]);
        acc.add([3.0, 20.0]);
        assert_eq!(acc.means(), [Some(2.0), Some(15.0)]);
    }

    #[test]
    fn test_accumulator_empty_is_missing() {
        let acc = MeanAccumulator::<3>::default();
        assert_eq!(acc.means(), [None, None, None]);
    }

    #[test]
    fn test_accumulator_skips_nan_per_column() {
        let mut acc = MeanAccumulator::<2>::default();
        acc.add([f64::NAN, 4.0]);
        acc.add([f64::NAN, 6.0]);
        assert_eq!(acc.means(), [None, Some(5.0)]);
    }

    // ── MeanResampler ─────────────────────────────────────────────────────────

    #[test]
    fn test_resample_groups_by_month() {
        let obs = vec![
            (ymd(2000, 1, 1), 1.0),
            (ymd(2000, 1, 31), 3.0),
            (ymd(2000, 2, 15), 10.0),
        ];
        let t = resample_pairs(&obs, ResampleFreq::MonthStart);

        assert_eq!(t.index(), vec![ymd(2000, 1, 1), ymd(2000, 2, 1)]);
        assert_eq!(t.column(|v| v[0]), vec![Some(2.0), Some(10.0)]);
    }

    #[test]
    fn test_resample_fills_interior_gaps_with_missing() {
        let obs = vec![(ymd(2000, 1, 10), 1.0), (ymd(2000, 4, 10), 4.0)];
        let t = resample_pairs(&obs, ResampleFreq::MonthStart);

        assert_eq!(t.len(), 4);
        assert_eq!(t.column(|v| v[0]), vec![Some(1.0), None, None, Some(4.0)]);
    }

    #[test]
    fn test_resample_month_end_labels() {
        let obs = vec![(ymd(2000, 2, 1), 1.0), (ymd(2000, 3, 31), 2.0)];
        let t = resample_pairs(&obs, ResampleFreq::MonthEnd);
        assert_eq!(t.index(), vec![ymd(2000, 2, 29), ymd(2000, 3, 31)]);
    }

    #[test]
    fn test_resample_unsorted_input() {
        let obs = vec![
            (ymd(2001, 1, 5), 5.0),
            (ymd(2000, 12, 5), 1.0),
            (ymd(2001, 1, 6), 7.0),
        ];
        let t = resample_pairs(&obs, ResampleFreq::MonthStart);

        assert_eq!(t.index(), vec![ymd(2000, 12, 1), ymd(2001, 1, 1)]);
        assert_eq!(t.column(|v| v[0]), vec![Some(1.0), Some(6.0)]);
    }

    #[test]
    fn test_resample_empty_input() {
        let t = resample_pairs(&[], ResampleFreq::MonthStart);
        assert!(t.is_empty());
    }

    #[test]
    fn test_resample_index_strictly_ascending() {
        let obs: Vec<(NaiveDate, f64)> = (0..400)
            .map(|i| (ymd(1999, 1, 1) + chrono::Duration::days(i * 3), i as f64))
            .collect();
        let t = resample_pairs(&obs, ResampleFreq::MonthStart);
        let idx = t.index();
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
    }
}
