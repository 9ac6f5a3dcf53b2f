//! Weekly aggregation for the dashboard
//!
//! Weeks run Monday through Sunday. The query window is
//! `[this_monday, next_monday)`: the lower bound inclusive, the upper
//! exclusive, so a load dated exactly on next Monday falls into the
//! following week.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::model::RateSample;

/// One Monday-to-Monday query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    /// This Monday (inclusive)
    pub start: NaiveDate,
    /// Next Monday (exclusive)
    pub end: NaiveDate,
}

impl WeekWindow {
    /// The window containing the given day.
    pub fn containing(day: NaiveDate) -> Self {
        let start = day - Duration::days(day.weekday().num_days_from_monday() as i64);
        Self {
            start,
            end: start + Duration::days(7),
        }
    }

    /// The window containing today.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }
}

/// Headline numbers for the current week.
///
/// Count covers every row; sum and top rate skip rows whose rate is
/// null. That asymmetry matches the production behavior on purpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklySummary {
    pub load_count: u64,
    pub rate_sum: f64,
    pub top_rate: f64,
}

/// Total of `total_rate` over the samples, nulls excluded.
pub fn rate_sum(samples: &[RateSample]) -> f64 {
    samples.iter().filter_map(|s| s.total_rate).sum()
}

/// Maximum `total_rate` over the samples, or 0 if none carry a rate.
pub fn top_rate(samples: &[RateSample]) -> f64 {
    samples
        .iter()
        .filter_map(|s| s.total_rate)
        .fold(0.0, f64::max)
}

/// Rate totals per weekday, Monday=0 through Sunday=6.
/// Weekdays with no loads contribute 0.
pub fn rate_sum_by_weekday(samples: &[RateSample]) -> [f64; 7] {
    let mut buckets = [0.0; 7];
    for sample in samples {
        if let Some(rate) = sample.total_rate {
            buckets[sample.date.weekday().num_days_from_monday() as usize] += rate;
        }
    }
    buckets
}

/// Load counts per weekday, Monday=0 through Sunday=6.
pub fn load_count_by_weekday(samples: &[RateSample]) -> [f64; 7] {
    let mut buckets = [0.0; 7];
    for sample in samples {
        buckets[sample.date.weekday().num_days_from_monday() as usize] += 1.0;
    }
    buckets
}

/// Y-axis maximum for the rate-sum chart: the bucket maximum rounded up
/// to the next thousand, or 1000 when every bucket is empty.
pub fn sum_axis_max(buckets: &[f64; 7]) -> f64 {
    let max = buckets.iter().cloned().fold(0.0, f64::max);
    if max > 0.0 {
        (max / 1000.0).ceil() * 1000.0
    } else {
        1000.0
    }
}

/// Y-axis maximum for the load-count chart: one above the busiest day.
pub fn count_axis_max(buckets: &[f64; 7]) -> f64 {
    buckets.iter().cloned().fold(0.0, f64::max) + 1.0
}

/// Distance between axis tick labels. Both charts draw five intervals.
pub fn tick_interval(axis_max: f64) -> f64 {
    axis_max / 5.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(date: NaiveDate, rate: Option<f64>) -> RateSample {
        RateSample {
            date,
            total_rate: rate,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_starts_on_monday() {
        // 2026-08-27 is a Thursday
        let w = WeekWindow::containing(date(2026, 8, 27));
        assert_eq!(w.start, date(2026, 8, 24));
        assert_eq!(w.end, date(2026, 8, 31));
    }

    #[test]
    fn window_on_monday_is_that_monday() {
        let w = WeekWindow::containing(date(2026, 8, 24));
        assert_eq!(w.start, date(2026, 8, 24));
    }

    #[test]
    fn this_monday_included_next_monday_excluded() {
        let w = WeekWindow::containing(date(2026, 8, 27));
        assert!(w.contains(w.start));
        assert!(!w.contains(w.end));
        assert!(w.contains(w.end - Duration::days(1)));
    }

    #[test]
    fn weekly_numbers_for_mixed_week() {
        // Mon, Mon, Wed with rates 100, 50, 200
        let mon = date(2026, 8, 24);
        let wed = date(2026, 8, 26);
        let samples = vec![
            sample(mon, Some(100.0)),
            sample(mon, Some(50.0)),
            sample(wed, Some(200.0)),
        ];

        assert_eq!(rate_sum(&samples), 350.0);
        assert_eq!(top_rate(&samples), 200.0);

        let buckets = rate_sum_by_weekday(&samples);
        assert_eq!(buckets[0], 150.0);
        assert_eq!(buckets[2], 200.0);
        for i in [1, 3, 4, 5, 6] {
            assert_eq!(buckets[i], 0.0);
        }

        let counts = load_count_by_weekday(&samples);
        assert_eq!(counts[0], 2.0);
        assert_eq!(counts[2], 1.0);
    }

    #[test]
    fn null_rates_excluded_from_sum_and_max() {
        let mon = date(2026, 8, 24);
        let samples = vec![sample(mon, Some(100.0)), sample(mon, None)];
        assert_eq!(rate_sum(&samples), 100.0);
        assert_eq!(top_rate(&samples), 100.0);
        // but the per-weekday count still sees both rows
        assert_eq!(load_count_by_weekday(&samples)[0], 2.0);
    }

    #[test]
    fn empty_week_has_zero_top_rate() {
        assert_eq!(top_rate(&[]), 0.0);
        assert_eq!(rate_sum(&[]), 0.0);
    }

    #[test]
    fn sum_axis_for_empty_buckets_is_one_thousand() {
        assert_eq!(sum_axis_max(&[0.0; 7]), 1000.0);
    }

    #[test]
    fn sum_axis_rounds_up_to_next_thousand() {
        let mut buckets = [0.0; 7];
        buckets[3] = 4500.0;
        assert_eq!(sum_axis_max(&buckets), 5000.0);
        buckets[3] = 5000.0;
        assert_eq!(sum_axis_max(&buckets), 5000.0);
    }

    #[test]
    fn count_axis_is_one_above_busiest_day() {
        let mut buckets = [0.0; 7];
        buckets[0] = 3.0;
        assert_eq!(count_axis_max(&buckets), 4.0);
        assert_eq!(count_axis_max(&[0.0; 7]), 1.0);
    }

    #[test]
    fn five_ticks_span_the_axis() {
        assert_eq!(tick_interval(5000.0), 1000.0);
        assert_eq!(tick_interval(1.0), 0.2);
    }
}
