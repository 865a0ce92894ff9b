// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use thiserror::Error;
use worksheet::{CoreError, FieldError};
use worksheet_audit::AuditError;
use worksheet_domain::{DomainError, FormMode};

/// Reasons a form cannot be turned into a record.
#[derive(Debug, Error, PartialEq)]
pub enum AssemblyError {
    /// One or more fields failed validation; nothing was submitted.
    #[error("{} field(s) failed validation", .0.len())]
    Validation(Vec<FieldError>),

    /// A field passed validation but does not hold the expected shape.
    #[error("Field '{path}' does not hold {expected}")]
    Malformed { path: String, expected: &'static str },

    /// The audit fields could not be stamped.
    #[error(transparent)]
    Audit(#[from] AuditError),

    /// A value broke a domain rule.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AssemblyError {
    /// Returns the field errors of a refused submission.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

/// Errors returned by the form container.
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    /// No form is open.
    #[error("No worksheet form is open")]
    NotOpen,

    /// The action is not offered in the current mode.
    #[error("{action} is not available in {mode} mode")]
    ActionUnavailable { action: &'static str, mode: FormMode },

    /// A mode that loads an existing worksheet was opened without one.
    #[error("{0} mode requires a worksheet to load")]
    MissingRecord(FormMode),

    /// A command was refused by the form.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The form could not be submitted.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    /// A value broke a domain rule.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
