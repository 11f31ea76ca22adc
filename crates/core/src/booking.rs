//! Booking status workflow.
//!
//! `pending -> approved | rejected` (trainer-decided) or
//! `pending -> canceled` (requester-initiated); all three outcomes are
//! terminal. The actual transition is a single optimistic UPDATE guarded on
//! `status = 'pending'`, so the first concurrent decision wins.

use crate::error::CoreError;

/// Booking awaiting the trainer's decision.
pub const STATUS_PENDING: &str = "pending";

/// Booking accepted by the owning trainer.
pub const STATUS_APPROVED: &str = "approved";

/// Booking declined by the owning trainer.
pub const STATUS_REJECTED: &str = "rejected";

/// Booking withdrawn by the requester.
pub const STATUS_CANCELED: &str = "canceled";

/// All valid booking status values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_APPROVED,
    STATUS_REJECTED,
    STATUS_CANCELED,
];

/// Decisions the owning trainer may apply to a pending booking.
pub const VALID_DECISIONS: &[&str] = &[STATUS_APPROVED, STATUS_REJECTED];

/// Returns the set of valid target statuses reachable from `from_status`.
///
/// Terminal states (approved, rejected, canceled) return an empty slice.
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING => &[STATUS_APPROVED, STATUS_REJECTED, STATUS_CANCELED],
        _ => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: &str, to: &str) -> bool {
    valid_transitions(from).contains(&to)
}

/// Whether a status permits no further transitions.
pub fn is_terminal(status: &str) -> bool {
    matches!(status, STATUS_APPROVED | STATUS_REJECTED | STATUS_CANCELED)
}

/// Validate that a trainer decision is one of the accepted values.
pub fn validate_decision(decision: &str) -> Result<(), CoreError> {
    if VALID_DECISIONS.contains(&decision) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid decision '{decision}'. Must be one of: {}",
            VALID_DECISIONS.join(", ")
        )))
    }
}

/// Parse an optional trainer-side list filter.
///
/// An unrecognized value means "no filter" (show all), not an error.
pub fn parse_status_filter(raw: Option<&str>) -> Option<&'static str> {
    let raw = raw?;
    VALID_STATUSES.iter().copied().find(|s| *s == raw)
}
