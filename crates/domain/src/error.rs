// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A date code could not be parsed.
    InvalidDateCode {
        /// The offending input.
        value: String,
        /// The parser's explanation.
        reason: String,
    },
    /// A date or timestamp could not be rendered.
    DateFormatting {
        /// The formatter's explanation.
        reason: String,
    },
    /// A percentage lies outside `[0, 100]` or is not a number.
    PercentOutOfRange {
        /// The rejected value.
        value: f64,
    },
    /// A job stay counter exceeds the picker range.
    JobStayOutOfRange {
        /// Which counter (`jobStayYear` or `jobStayMonth`).
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// The largest permitted value.
        max: u8,
    },
    /// An unknown form mode label.
    InvalidMode(String),
    /// The reference data bundle could not be decoded.
    ReferenceDataParse(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateCode { value, reason } => {
                write!(f, "Invalid date '{value}': {reason}")
            }
            Self::DateFormatting { reason } => write!(f, "Failed to format date: {reason}"),
            Self::PercentOutOfRange { value } => {
                write!(f, "Percentage {value} must be between 0 and 100")
            }
            Self::JobStayOutOfRange { field, value, max } => {
                write!(f, "Invalid {field}: {value}. Must be between 0 and {max}")
            }
            Self::InvalidMode(mode) => write!(f, "Invalid form mode: {mode}"),
            Self::ReferenceDataParse(msg) => write!(f, "Invalid reference data: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
