// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use worksheet_domain::{
    DomainError, FormMode, Operation, format_date_code, format_time_code, format_timestamp_code,
};

/// Represents the person and machine submitting a worksheet.
///
/// Both values are supplied by the hosting environment, never typed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The initiating user's identifier.
    pub initiator: String,
    /// The workstation the submission came from.
    pub workstation: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `initiator` - The initiating user's identifier
    /// * `workstation` - The workstation identifier
    #[must_use]
    pub const fn new(initiator: String, workstation: String) -> Self {
        Self {
            initiator,
            workstation,
        }
    }
}

/// Errors raised while stamping a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditError {
    /// The mode never produces a submission.
    SubmissionNotPermitted(FormMode),
    /// The record counter cannot be advanced any further.
    CounterOverflow(u32),
    /// A timestamp could not be rendered.
    Domain(DomainError),
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubmissionNotPermitted(mode) => {
                write!(f, "Worksheets cannot be submitted in {mode} mode")
            }
            Self::CounterOverflow(previous) => {
                write!(f, "Record counter {previous} cannot be incremented")
            }
            Self::Domain(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AuditError {}

impl From<DomainError> for AuditError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

/// Computes the record counter written with a submission.
///
/// A created worksheet starts at 1 and every edit adds one. A deletion
/// leaves the counter as loaded.
///
/// # Errors
///
/// Returns an error in view mode or if the counter would overflow.
pub fn next_record_counter(mode: FormMode, previous: u32) -> Result<u32, AuditError> {
    match mode {
        FormMode::Create => Ok(1),
        FormMode::Edit => previous
            .checked_add(1)
            .ok_or(AuditError::CounterOverflow(previous)),
        FormMode::Delete => Ok(previous),
        FormMode::View => Err(AuditError::SubmissionNotPermitted(mode)),
    }
}

/// The audit fields stamped onto a worksheet at the moment of submission.
///
/// Any values carried over from a loaded record are discarded; the stamp
/// always reflects the submitting instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStamp {
    /// `YYYYMMDDHHmmss` of the submission.
    pub date_initiated: String,
    /// `YYYYMMDD` of the submission.
    pub overdue_date: String,
    /// `YYYYMMDD` of the submission.
    pub record_date: String,
    /// `HHmmss` of the submission.
    pub record_time: String,
    /// The initiating user.
    pub initiator: String,
    /// The submitting workstation.
    pub workstation: String,
    /// The persistence operation.
    pub operation: Operation,
    /// The record counter after this submission.
    pub record_counter: u32,
}

impl AuditStamp {
    /// Captures the audit fields for a submission.
    ///
    /// # Arguments
    ///
    /// * `actor` - Who is submitting
    /// * `mode` - The mode the form is open in
    /// * `previous_counter` - The record counter held by the form
    /// * `now` - The submitting instant
    ///
    /// # Errors
    ///
    /// Returns an error if the mode does not submit, the counter overflows,
    /// or the instant cannot be formatted.
    pub fn capture(
        actor: &Actor,
        mode: FormMode,
        previous_counter: u32,
        now: OffsetDateTime,
    ) -> Result<Self, AuditError> {
        let operation: Operation = mode
            .operation()
            .ok_or(AuditError::SubmissionNotPermitted(mode))?;
        let record_counter: u32 = next_record_counter(mode, previous_counter)?;
        let record_date: String = format_date_code(now.date())?;

        Ok(Self {
            date_initiated: format_timestamp_code(now)?,
            overdue_date: record_date.clone(),
            record_date,
            record_time: format_time_code(now)?,
            initiator: actor.initiator.clone(),
            workstation: actor.workstation.clone(),
            operation,
            record_counter,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn create_test_actor() -> Actor {
        Actor::new(String::from("user_id"), String::from("workstation"))
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = create_test_actor();

        assert_eq!(actor.initiator, "user_id");
        assert_eq!(actor.workstation, "workstation");
    }

    #[test]
    fn test_create_starts_counter_at_one() {
        assert_eq!(next_record_counter(FormMode::Create, 0), Ok(1));
        assert_eq!(next_record_counter(FormMode::Create, 7), Ok(1));
    }

    #[test]
    fn test_edit_increments_counter() {
        assert_eq!(next_record_counter(FormMode::Edit, 3), Ok(4));
    }

    #[test]
    fn test_delete_keeps_counter() {
        assert_eq!(next_record_counter(FormMode::Delete, 3), Ok(3));
    }

    #[test]
    fn test_view_never_submits() {
        assert_eq!(
            next_record_counter(FormMode::View, 3),
            Err(AuditError::SubmissionNotPermitted(FormMode::View))
        );
    }

    #[test]
    fn test_counter_overflow_is_reported() {
        assert_eq!(
            next_record_counter(FormMode::Edit, u32::MAX),
            Err(AuditError::CounterOverflow(u32::MAX))
        );
    }

    #[test]
    fn test_capture_stamps_submission_instant() {
        let now = datetime!(2024-06-30 14:05:09 UTC);
        let stamp: AuditStamp =
            AuditStamp::capture(&create_test_actor(), FormMode::Create, 0, now).unwrap();

        assert_eq!(stamp.date_initiated, "20240630140509");
        assert_eq!(stamp.record_date, "20240630");
        assert_eq!(stamp.overdue_date, "20240630");
        assert_eq!(stamp.record_time, "140509");
        assert_eq!(stamp.operation, Operation::Insert);
        assert_eq!(stamp.record_counter, 1);
        assert_eq!(stamp.initiator, "user_id");
    }

    #[test]
    fn test_capture_in_edit_mode_records_update() {
        let now = datetime!(2024-06-30 14:05:09 UTC);
        let stamp: AuditStamp =
            AuditStamp::capture(&create_test_actor(), FormMode::Edit, 3, now).unwrap();

        assert_eq!(stamp.operation, Operation::Update);
        assert_eq!(stamp.record_counter, 4);
    }

    #[test]
    fn test_capture_refuses_view_mode() {
        let now = datetime!(2024-06-30 14:05:09 UTC);
        let result = AuditStamp::capture(&create_test_actor(), FormMode::View, 3, now);

        assert!(matches!(
            result,
            Err(AuditError::SubmissionNotPermitted(FormMode::View))
        ));
    }
}
