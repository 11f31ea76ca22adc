//! Trainer application status workflow.
//!
//! `pending -> approved | rejected`; both outcomes are terminal. The
//! approval side effect (role promotion) is invoked explicitly by the
//! workflow handler after the status change is persisted, never by a
//! persistence hook.

use crate::error::CoreError;

/// Application awaiting review.
pub const STATUS_PENDING: &str = "pending";

/// Application approved; the applicant is (or becomes) a trainer.
pub const STATUS_APPROVED: &str = "approved";

/// Application rejected; the applicant may submit a new one.
pub const STATUS_REJECTED: &str = "rejected";

/// All valid application status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

/// Decisions a reviewer may apply.
pub const VALID_DECISIONS: &[&str] = &[STATUS_APPROVED, STATUS_REJECTED];

/// Returns the set of valid target statuses reachable from `from_status`.
///
/// Terminal states (approved, rejected) return an empty slice.
pub fn valid_transitions(from_status: &str) -> &'static [&'static str] {
    match from_status {
        STATUS_PENDING => &[STATUS_APPROVED, STATUS_REJECTED],
        _ => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: &str, to: &str) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate that a review decision is one of the accepted values.
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

/// Gate a new submission on the status of the applicant's latest application.
///
/// A user may resubmit only after a prior application was rejected; a
/// pending or approved latest application blocks the new one.
pub fn check_can_submit(latest_status: Option<&str>) -> Result<(), CoreError> {
    match latest_status {
        Some(STATUS_PENDING) => Err(CoreError::Conflict(
            "A pending application already exists".to_string(),
        )),
        Some(STATUS_APPROVED) => Err(CoreError::Conflict(
            "An approved application already exists".to_string(),
        )),
        _ => Ok(()),
    }
}
