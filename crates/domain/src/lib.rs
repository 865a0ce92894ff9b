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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod dates;
mod error;
mod grade;
mod mode;
mod reference;
mod validation;

#[cfg(test)]
mod tests;

pub use dates::{
    WORKSHEET_ID_PREFIX, format_date_code, format_display_date, format_display_time,
    format_iso_date, format_time_code, format_timestamp_code, generate_worksheet_id,
    parse_date_code, parse_iso_date,
};
pub use error::DomainError;
pub use grade::{Grade, mean_percent};
pub use mode::{FormMode, Operation};
pub use reference::{
    AuditMonth, AuditYear, Branch, DanglingReference, Designate, JOB_STAY_MAX_MONTHS,
    JOB_STAY_MAX_YEARS, KeyedEntry, PriorWorksheet, ReferenceData, User,
};
pub use validation::{validate_job_stay_months, validate_job_stay_years, validate_percent};
