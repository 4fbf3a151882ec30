//! Bar heights for the dashboard and referral charts
//!
//! Heights are relative to the largest value in the series. Every drawn bar
//! keeps a small minimum so that zero months stay visible.

/// Smallest drawn bar, percent of the plot height
pub const MIN_BAR_PERCENT: f64 = 5.0;
/// Smallest drawn subsidy bar, pixels
pub const MIN_BAR_PX: f64 = 5.0;
/// Tallest subsidy bar, pixels
pub const SUBSIDY_BAR_MAX_PX: f64 = 80.0;
/// Workflow steps per booking, used to scale the steps overlay
pub const STEPS_PER_BOOKING: f64 = 12.0;

/// Bookings and completed steps for one month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBookings {
    /// Month label
    pub label: String,
    /// New bookings
    pub bookings: f64,
    /// Workflow steps signed off
    pub completed_steps: f64,
}

/// Two values compared side by side for one month
#[derive(Debug, Clone, PartialEq)]
pub struct PairedValue {
    /// Month label
    pub label: String,
    /// Left bar (subsidy, direct joins)
    pub first: f64,
    /// Right bar (non-subsidy, indirect joins)
    pub second: f64,
}

impl PairedValue {
    /// Create a pair
    #[must_use]
    pub fn new(label: impl Into<String>, first: f64, second: f64) -> Self {
        Self {
            label: label.into(),
            first,
            second,
        }
    }
}

/// Monthly activity bar: bookings, with the steps overlay inside it
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityBar {
    /// Month label
    pub label: String,
    /// Bookings bar height, percent, floored at [`MIN_BAR_PERCENT`]
    pub bookings_pct: f64,
    /// Steps overlay height, percent; not floored
    pub steps_pct: f64,
    /// Tooltip source: bookings
    pub bookings: f64,
    /// Tooltip source: completed steps
    pub completed_steps: f64,
}

/// Two bars for one month
#[derive(Debug, Clone, PartialEq)]
pub struct PairedBar {
    /// Month label
    pub label: String,
    /// Left bar height
    pub first: f64,
    /// Right bar height
    pub second: f64,
    /// Tooltip source
    pub values: (f64, f64),
}

fn series_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}

/// Monthly activity bars
///
/// The bookings bar is `bookings / max * 100`; the overlay covers the share of
/// the month's twelve-steps-per-booking capacity that has been signed off.
#[must_use]
pub fn activity_bars(rows: &[MonthlyBookings]) -> Vec<ActivityBar> {
    let max = series_max(rows.iter().map(|r| r.bookings));
    let max = if max > 0.0 { max } else { 1.0 };

    rows.iter()
        .map(|row| {
            let height = row.bookings / max * 100.0;
            let capacity = row.bookings * STEPS_PER_BOOKING;
            let progress = if capacity > 0.0 {
                (row.completed_steps / capacity).min(1.0)
            } else {
                0.0
            };
            ActivityBar {
                label: row.label.clone(),
                bookings_pct: height.max(MIN_BAR_PERCENT),
                steps_pct: height * progress,
                bookings: row.bookings,
                completed_steps: row.completed_steps,
            }
        })
        .collect()
}

/// Subsidy versus non-subsidy bars, in pixels up to [`SUBSIDY_BAR_MAX_PX`]
#[must_use]
pub fn subsidy_bars(rows: &[PairedValue]) -> Vec<PairedBar> {
    let max = series_max(rows.iter().map(|r| r.first.max(r.second)));
    let max = if max > 0.0 { max } else { 1.0 };
    let scale = |v: f64| (v / max * SUBSIDY_BAR_MAX_PX).max(MIN_BAR_PX);

    rows.iter()
        .map(|row| PairedBar {
            label: row.label.clone(),
            first: scale(row.first),
            second: scale(row.second),
            values: (row.first, row.second),
        })
        .collect()
}

/// Direct versus indirect network growth bars, in percent
#[must_use]
pub fn growth_bars(rows: &[PairedValue]) -> Vec<PairedBar> {
    let max = series_max(rows.iter().map(|r| r.first.max(r.second)));
    let scale = |v: f64| {
        let height = if max > 0.0 { v / max * 100.0 } else { 0.0 };
        height.max(MIN_BAR_PERCENT)
    };

    rows.iter()
        .map(|row| PairedBar {
            label: row.label.clone(),
            first: scale(row.first),
            second: scale(row.second),
            values: (row.first, row.second),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn month(label: &str, bookings: f64, completed_steps: f64) -> MonthlyBookings {
        MonthlyBookings {
            label: label.to_string(),
            bookings,
            completed_steps,
        }
    }

    #[test]
    fn test_activity_bars() {
        let bars = activity_bars(&[
            month("Jan", 10.0, 60.0),
            month("Feb", 5.0, 600.0),
            month("Mar", 0.0, 3.0),
        ]);

        assert_eq!(bars[0].bookings_pct, 100.0);
        assert_eq!(bars[0].steps_pct, 50.0);
        assert_eq!(bars[1].bookings_pct, 50.0);
        // overlay is capped at the bookings bar
        assert_eq!(bars[1].steps_pct, 50.0);
        assert_eq!(bars[2].bookings_pct, MIN_BAR_PERCENT);
        assert_eq!(bars[2].steps_pct, 0.0);
    }

    #[test]
    fn test_activity_bars_all_zero() {
        let bars = activity_bars(&[month("Jan", 0.0, 0.0)]);
        assert_eq!(bars[0].bookings_pct, MIN_BAR_PERCENT);
    }

    #[test]
    fn test_subsidy_bars() {
        let bars = subsidy_bars(&[
            PairedValue::new("Jan", 8.0, 2.0),
            PairedValue::new("Feb", 0.0, 4.0),
        ]);

        assert_eq!(bars[0].first, SUBSIDY_BAR_MAX_PX);
        assert_eq!(bars[0].second, 20.0);
        assert_eq!(bars[1].first, MIN_BAR_PX);
        assert_eq!(bars[1].values, (0.0, 4.0));
    }

    #[test]
    fn test_growth_bars_zero_series() {
        let bars = growth_bars(&[PairedValue::new("Jan", 0.0, 0.0)]);
        assert_eq!(bars[0].first, MIN_BAR_PERCENT);
        assert_eq!(bars[0].second, MIN_BAR_PERCENT);

        let bars = growth_bars(&[
            PairedValue::new("Jan", 4.0, 1.0),
            PairedValue::new("Feb", 2.0, 0.0),
        ]);
        assert_eq!(bars[0].first, 100.0);
        assert_eq!(bars[0].second, 25.0);
        assert_eq!(bars[1].first, 50.0);
    }

    proptest! {
        #[test]
        fn prop_activity_bars_bounded(rows in prop::collection::vec((0.0f64..500.0, 0.0f64..10_000.0), 1..12)) {
            let input: Vec<MonthlyBookings> = rows
                .iter()
                .map(|(b, s)| month("m", *b, *s))
                .collect();
            for bar in activity_bars(&input) {
                prop_assert!(bar.bookings_pct >= MIN_BAR_PERCENT);
                prop_assert!(bar.bookings_pct <= 100.0 + 1e-9);
                prop_assert!(bar.steps_pct <= bar.bookings_pct + 1e-9);
            }
        }
    }
}
