// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date codecs used by the worksheet record and the form tree.
//!
//! The persisted record stores compact codes (`YYYYMMDD`,
//! `YYYYMMDDHHmmss`, `HHmmss`). The form tree holds ISO dates
//! (`YYYY-MM-DD`), and the audit log step displays `DD/MM/YYYY` and
//! `HH:mm:ss`.

use crate::error::DomainError;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const DATE_CODE: &[BorrowedFormatItem<'static>] = format_description!("[year][month][day]");
const TIMESTAMP_CODE: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day][hour][minute][second]");
const TIME_CODE: &[BorrowedFormatItem<'static>] = format_description!("[hour][minute][second]");
const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DISPLAY_DATE: &[BorrowedFormatItem<'static>] = format_description!("[day]/[month]/[year]");
const DISPLAY_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Prefix of generated worksheet identifiers.
pub const WORKSHEET_ID_PREFIX: &str = "WK";

fn format_with(
    value: impl Fn(&[BorrowedFormatItem<'static>]) -> Result<String, time::error::Format>,
    format: &[BorrowedFormatItem<'static>],
) -> Result<String, DomainError> {
    value(format).map_err(|e| DomainError::DateFormatting {
        reason: e.to_string(),
    })
}

fn parse_with(value: &str, format: &[BorrowedFormatItem<'static>]) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format).map_err(|e| DomainError::InvalidDateCode {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Formats a date as `YYYYMMDD`.
///
/// # Errors
///
/// Returns an error if the date cannot be rendered.
pub fn format_date_code(date: Date) -> Result<String, DomainError> {
    format_with(|f| date.format(f), DATE_CODE)
}

/// Parses a `YYYYMMDD` code.
///
/// # Errors
///
/// Returns an error if the input is not an 8-digit calendar date.
pub fn parse_date_code(value: &str) -> Result<Date, DomainError> {
    parse_with(value, DATE_CODE)
}

/// Formats an instant as `YYYYMMDDHHmmss`.
///
/// # Errors
///
/// Returns an error if the instant cannot be rendered.
pub fn format_timestamp_code(now: OffsetDateTime) -> Result<String, DomainError> {
    format_with(|f| now.format(f), TIMESTAMP_CODE)
}

/// Formats the time of day of an instant as `HHmmss`.
///
/// # Errors
///
/// Returns an error if the instant cannot be rendered.
pub fn format_time_code(now: OffsetDateTime) -> Result<String, DomainError> {
    format_with(|f| now.format(f), TIME_CODE)
}

/// Formats a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns an error if the date cannot be rendered.
pub fn format_iso_date(date: Date) -> Result<String, DomainError> {
    format_with(|f| date.format(f), ISO_DATE)
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an error if the input is not an ISO calendar date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    parse_with(value, ISO_DATE)
}

/// Formats an instant's date as `DD/MM/YYYY`.
///
/// # Errors
///
/// Returns an error if the instant cannot be rendered.
pub fn format_display_date(now: OffsetDateTime) -> Result<String, DomainError> {
    format_with(|f| now.format(f), DISPLAY_DATE)
}

/// Formats an instant's time of day as `HH:mm:ss`.
///
/// # Errors
///
/// Returns an error if the instant cannot be rendered.
pub fn format_display_time(now: OffsetDateTime) -> Result<String, DomainError> {
    format_with(|f| now.format(f), DISPLAY_TIME)
}

/// Generates a worksheet identifier from the creation instant.
///
/// # Errors
///
/// Returns an error if the instant cannot be rendered.
pub fn generate_worksheet_id(now: OffsetDateTime) -> Result<String, DomainError> {
    Ok(format!("{WORKSHEET_ID_PREFIX}{}", format_timestamp_code(now)?))
}
