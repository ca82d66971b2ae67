//! Derived display values for a location's reported waits.
//!
//! Everything here is a pure function of its inputs. Nothing is cached: the
//! board calls [`summarize`] for every row on every render.

use queuezero_types::{Confidence, Location, LocationSummary, Severity};

use crate::clock::Clock;

const MS_PER_MINUTE: i64 = 60_000;

/// Averages below this many minutes are quiet
pub const MODERATE_THRESHOLD: i64 = 10;
/// Averages at or above this many minutes are busy
pub const BUSY_THRESHOLD: i64 = 20;

/// Mean of all waits rounded to the nearest minute, ties toward positive
/// infinity (`[5, 6]` → 6, `[-3, -2]` → -2). Zero for no waits.
///
/// Summed in `i128` so stored values at the edges of `i64` cannot overflow;
/// the result saturates at the `i64` bounds.
pub fn average(waits: &[i64]) -> i64 {
    if waits.is_empty() {
        return 0;
    }
    let sum: i128 = waits.iter().map(|&w| i128::from(w)).sum();
    let mean = sum as f64 / waits.len() as f64;
    (mean + 0.5).floor() as i64
}

/// Bucket an average wait into quiet/moderate/busy.
pub fn wait_severity(avg: i64) -> Severity {
    if avg < MODERATE_THRESHOLD {
        Severity::Low
    } else if avg < BUSY_THRESHOLD {
        Severity::Medium
    } else {
        Severity::High
    }
}

/// Text color class for an average wait
pub fn wait_color(avg: i64) -> &'static str {
    wait_severity(avg).color_class()
}

/// Busy badge text for an average wait
pub fn busy_level(avg: i64) -> (&'static str, &'static str) {
    let severity = wait_severity(avg);
    (severity.busy_label(), severity.color_class())
}

/// Trust in the average based purely on how many waits were reported.
pub fn confidence(waits: &[i64]) -> Confidence {
    match waits.len() {
        1 => Confidence::Low,
        0 | 2..=3 => Confidence::Medium,
        _ => Confidence::High,
    }
}

/// Whole minutes elapsed since `last_updated`, floored.
///
/// Negative when `last_updated` is in the future.
pub fn minutes_since(last_updated: i64, now_ms: i64) -> i64 {
    // |difference| < 2^64, so the quotient always fits back into i64
    let elapsed = i128::from(now_ms) - i128::from(last_updated);
    elapsed.div_euclid(i128::from(MS_PER_MINUTE)) as i64
}

/// "Updated just now" / "Updated 1 minute ago" / "Updated {n} minutes ago"
pub fn staleness_text(last_updated: i64, clock: &impl Clock) -> String {
    match minutes_since(last_updated, clock.now_ms()) {
        mins if mins < 1 => "Updated just now".to_string(),
        1 => "Updated 1 minute ago".to_string(),
        mins => format!("Updated {mins} minutes ago"),
    }
}

/// Build the rendered row for one location.
pub fn summarize(location: &Location, clock: &impl Clock) -> LocationSummary {
    let avg = average(&location.waits);
    LocationSummary {
        name: location.name.clone(),
        average: avg,
        severity: wait_severity(avg),
        confidence: confidence(&location.waits),
        submissions: location.submissions(),
        staleness: staleness_text(location.last_updated, clock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn test_average_rounding() {
        assert_eq!(average(&[]), 0);
        assert_eq!(average(&[5]), 5);
        assert_eq!(average(&[5, 18]), 12);
        assert_eq!(average(&[5, 6]), 6);
        assert_eq!(average(&[1, 2, 2]), 2);
        assert_eq!(average(&[-3, -2]), -2);
    }

    #[test]
    fn test_wait_severity_boundaries() {
        assert_eq!(wait_severity(0), Severity::Low);
        assert_eq!(wait_severity(9), Severity::Low);
        assert_eq!(wait_severity(10), Severity::Medium);
        assert_eq!(wait_severity(19), Severity::Medium);
        assert_eq!(wait_severity(20), Severity::High);
        assert_eq!(wait_severity(-4), Severity::Low);
    }

    #[test]
    fn test_color_and_badge_agree() {
        for avg in [-1, 0, 9, 10, 15, 19, 20, 90] {
            let (_, badge_color) = busy_level(avg);
            assert_eq!(wait_color(avg), badge_color, "avg {avg}");
        }
        assert_eq!(busy_level(9), ("Quiet", "text-green-600"));
        assert_eq!(busy_level(10), ("Moderate", "text-yellow-500"));
        assert_eq!(busy_level(20), ("Busy", "text-red-600"));
    }

    #[test]
    fn test_confidence_by_count() {
        assert_eq!(confidence(&[7]), Confidence::Low);
        assert_eq!(confidence(&[7, 8]), Confidence::Medium);
        assert_eq!(confidence(&[7, 8, 9]), Confidence::Medium);
        assert_eq!(confidence(&[7, 8, 9, 10]), Confidence::High);
        assert_eq!(confidence(&[]), Confidence::Medium);
    }

    #[test]
    fn test_average_extreme_values_do_not_overflow() {
        assert_eq!(average(&[i64::MAX, 1]), 4_611_686_018_427_387_904);
        assert_eq!(average(&[i64::MAX, i64::MAX]), i64::MAX);
        assert_eq!(average(&[i64::MIN, i64::MIN]), i64::MIN);
    }

    #[test]
    fn test_minutes_since_extreme_timestamps() {
        assert_eq!(minutes_since(i64::MIN, 0), 153_722_867_280_912);
        assert_eq!(minutes_since(i64::MAX, i64::MIN), -307_445_734_561_826);
    }

    #[test]
    fn test_staleness_text() {
        let clock = ManualClock::new(1_000_000);
        assert_eq!(staleness_text(1_000_000, &clock), "Updated just now");

        clock.advance(59_999);
        assert_eq!(staleness_text(1_000_000, &clock), "Updated just now");

        clock.set(1_060_000);
        assert_eq!(staleness_text(1_000_000, &clock), "Updated 1 minute ago");

        clock.set(1_120_000);
        assert_eq!(staleness_text(1_000_000, &clock), "Updated 2 minutes ago");
    }

    #[test]
    fn test_staleness_future_timestamp_is_just_now() {
        let clock = ManualClock::new(0);
        assert_eq!(minutes_since(30_000, 0), -1);
        assert_eq!(staleness_text(30_000, &clock), "Updated just now");
    }

    #[test]
    fn test_summarize_row() {
        let clock = ManualClock::new(3 * 60_000);
        let loc = Location {
            name: "Campus Office".to_string(),
            waits: vec![18, 20, 25, 9],
            last_updated: 0,
        };
        let row = summarize(&loc, &clock);
        assert_eq!(row.name, "Campus Office");
        assert_eq!(row.average, 18);
        assert_eq!(row.severity, Severity::Medium);
        assert_eq!(row.confidence, Confidence::High);
        assert_eq!(row.submissions, 4);
        assert_eq!(row.staleness, "Updated 3 minutes ago");
    }
}
