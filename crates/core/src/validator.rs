// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::path::FieldPath;
use crate::values::{as_number, is_blank};
use serde_json::Value;
use worksheet_domain::parse_iso_date;

/// A validation rule attached to a field or field pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// The field must be filled.
    Required(String),
    /// A filled field must be a number no smaller than `min`.
    Min {
        /// The smallest accepted value.
        min: f64,
        /// Message shown when the rule fails.
        message: String,
    },
    /// A filled field must be a number no larger than `max`.
    Max {
        /// The largest accepted value.
        max: f64,
        /// Message shown when the rule fails.
        message: String,
    },
    /// A filled field must be a whole number within `min..=max`.
    IntegerRange {
        /// The smallest accepted value.
        min: i64,
        /// The largest accepted value.
        max: i64,
        /// Message shown when the rule fails.
        message: String,
    },
    /// A filled field must be an ISO calendar date.
    Date(String),
}

impl Rule {
    /// A required rule.
    #[must_use]
    pub fn required(message: &str) -> Self {
        Self::Required(message.to_string())
    }

    /// A lower bound rule.
    #[must_use]
    pub fn min(min: f64, message: &str) -> Self {
        Self::Min {
            min,
            message: message.to_string(),
        }
    }

    /// An upper bound rule.
    #[must_use]
    pub fn max(max: f64, message: &str) -> Self {
        Self::Max {
            max,
            message: message.to_string(),
        }
    }

    /// An inclusive whole-number range rule.
    #[must_use]
    pub fn integer_range(min: i64, max: i64, message: &str) -> Self {
        Self::IntegerRange {
            min,
            max,
            message: message.to_string(),
        }
    }

    /// A calendar date rule.
    #[must_use]
    pub fn date(message: &str) -> Self {
        Self::Date(message.to_string())
    }

    /// Checks a value, returning the error it raises, if any.
    ///
    /// Only `Required` fails on a blank value; the other rules leave blank
    /// fields to it.
    #[must_use]
    pub fn check(&self, path: &FieldPath, value: Option<&Value>) -> Option<FieldError> {
        let blank: bool = is_blank(value);
        let fail = |kind: FieldErrorKind, message: &str| {
            Some(FieldError {
                path: path.clone(),
                kind,
                message: message.to_string(),
            })
        };

        match self {
            Self::Required(message) if blank => fail(FieldErrorKind::Required, message),
            Self::Required(_) => None,
            _ if blank => None,
            Self::Min { min, message } => match value.and_then(as_number) {
                Some(n) if n >= *min => None,
                Some(_) => fail(FieldErrorKind::Range, message),
                None => fail(FieldErrorKind::Format, "Must be a number!"),
            },
            Self::Max { max, message } => match value.and_then(as_number) {
                Some(n) if n <= *max => None,
                Some(_) => fail(FieldErrorKind::Range, message),
                None => fail(FieldErrorKind::Format, "Must be a number!"),
            },
            Self::IntegerRange { min, max, message } => match value.and_then(as_number) {
                Some(n) if n.fract() != 0.0 => {
                    fail(FieldErrorKind::Format, "Must be a whole number!")
                }
                #[allow(clippy::cast_precision_loss)]
                Some(n) if n >= *min as f64 && n <= *max as f64 => None,
                Some(_) => fail(FieldErrorKind::Range, message),
                None => fail(FieldErrorKind::Format, "Must be a number!"),
            },
            Self::Date(message) => match value.and_then(Value::as_str).map(parse_iso_date) {
                Some(Ok(_)) => None,
                _ => fail(FieldErrorKind::Format, message),
            },
        }
    }
}

/// The category of a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldErrorKind {
    /// A mandatory field is empty.
    Required,
    /// A number is outside its permitted range.
    Range,
    /// A value does not parse.
    Format,
}

/// An inline error attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The concrete path of the field.
    pub path: FieldPath,
    /// The error category.
    pub kind: FieldErrorKind,
    /// The message shown next to the field.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
