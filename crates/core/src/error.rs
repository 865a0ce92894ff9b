// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use worksheet_domain::{DomainError, FormMode};

/// Errors that can occur while mutating the form state.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A path could not be parsed or cannot be written.
    InvalidPath(String),
    /// A path crosses a value of the wrong shape.
    ShapeMismatch {
        /// The path being written.
        path: String,
        /// What was expected at the failing step.
        expected: &'static str,
    },
    /// A sequence index is past the end.
    IndexOutOfRange {
        /// The sequence path.
        path: String,
        /// The requested index.
        index: usize,
        /// The sequence length.
        len: usize,
    },
    /// Removing the entry would leave the sequence empty.
    LastEntry {
        /// The sequence path.
        path: String,
    },
    /// The field is not editable in the current mode.
    ReadOnlyField {
        /// The field path.
        path: String,
        /// The mode the form is open in.
        mode: FormMode,
    },
    /// The chosen option is disabled for this field.
    OptionDisabled {
        /// The field path.
        path: String,
        /// The disabled option's key.
        key: String,
    },
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath(path) => write!(f, "Invalid field path: '{path}'"),
            Self::ShapeMismatch { path, expected } => {
                write!(f, "Cannot write '{path}': expected {expected}")
            }
            Self::IndexOutOfRange { path, index, len } => {
                write!(f, "Index {index} is out of range for '{path}' (length {len})")
            }
            Self::LastEntry { path } => {
                write!(f, "Cannot remove the last entry of '{path}'")
            }
            Self::ReadOnlyField { path, mode } => {
                write!(f, "Field '{path}' is read-only in {mode} mode")
            }
            Self::OptionDisabled { path, key } => {
                write!(f, "Option '{key}' is already taken and cannot be chosen for '{path}'")
            }
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
