// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::reference::{JOB_STAY_MAX_MONTHS, JOB_STAY_MAX_YEARS};

/// Validates that an approach percentage lies in `[0, 100]`.
///
/// # Errors
///
/// Returns an error if the value is out of range or not a number.
pub fn validate_percent(value: f64) -> Result<(), DomainError> {
    // Rule: NaN fails the range check
    if !(0.0..=100.0).contains(&value) {
        return Err(DomainError::PercentOutOfRange { value });
    }
    Ok(())
}

/// Validates a job stay year count against the picker range.
///
/// # Errors
///
/// Returns an error if the value is negative or above the picker's maximum.
pub fn validate_job_stay_years(value: i64) -> Result<u8, DomainError> {
    validate_job_stay("jobStayYear", value, JOB_STAY_MAX_YEARS)
}

/// Validates a job stay month count against the picker range.
///
/// # Errors
///
/// Returns an error if the value is negative or above the picker's maximum.
pub fn validate_job_stay_months(value: i64) -> Result<u8, DomainError> {
    validate_job_stay("jobStayMonth", value, JOB_STAY_MAX_MONTHS)
}

fn validate_job_stay(field: &'static str, value: i64, max: u8) -> Result<u8, DomainError> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or(DomainError::JobStayOutOfRange { field, value, max })
}
