//! Course round scheduling: weekday labels and the day/time-range validator.
//!
//! Weekday indices run 0=Monday through 6=Sunday. Rounds are stored with a
//! deduplicated day set; display output is always sorted ascending.

use chrono::NaiveTime;

use crate::error::CoreError;

/// Highest valid weekday index (6 = Sunday).
pub const WEEKDAY_MAX: i16 = 6;

/// Thai display labels for weekday indices 0..=6.
const DAY_LABELS: [&str; 7] = [
    "จันทร์",
    "อังคาร",
    "พุธ",
    "พฤหัสบดี",
    "ศุกร์",
    "เสาร์",
    "อาทิตย์",
];

/// A validated `(days, start, end)` tuple for a course round.
///
/// `days` is sorted ascending with duplicates collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSchedule {
    pub days: Vec<i16>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// Validate a candidate round schedule.
///
/// A non-empty day set requires both times, with `start < end` strictly
/// (a zero-length session is invalid). An empty day set is an inactive
/// placeholder round and may omit both times. Nothing is persisted here;
/// the caller applies the validated tuple in its own transaction.
pub fn validate_round(
    days: &[i16],
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
) -> Result<RoundSchedule, CoreError> {
    let mut days = days.to_vec();
    days.sort_unstable();
    days.dedup();

    if let Some(&bad) = days.iter().find(|&&d| !(0..=WEEKDAY_MAX).contains(&d)) {
        return Err(CoreError::Validation(format!(
            "Invalid weekday index {bad}. Must be 0 (Monday) through 6 (Sunday)"
        )));
    }

    if !days.is_empty() {
        let (Some(start), Some(end)) = (start_time, end_time) else {
            return Err(CoreError::Validation(
                "Both start and end time are required when training days are selected".to_string(),
            ));
        };
        if start >= end {
            return Err(CoreError::Validation(
                "End time must be after start time".to_string(),
            ));
        }
    }

    Ok(RoundSchedule {
        days,
        start_time,
        end_time,
    })
}

/// Map a weekday set to sorted, deduplicated display labels.
///
/// Out-of-range indices are skipped; a validated round never contains any.
pub fn display_days(days: &[i16]) -> Vec<&'static str> {
    let mut sorted: Vec<i16> = days
        .iter()
        .copied()
        .filter(|d| (0..=WEEKDAY_MAX).contains(d))
        .collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.iter().map(|&d| DAY_LABELS[d as usize]).collect()
}

/// Display label for a single weekday index, if in range.
pub fn day_label(day: i16) -> Option<&'static str> {
    usize::try_from(day).ok().and_then(|i| DAY_LABELS.get(i)).copied()
}
