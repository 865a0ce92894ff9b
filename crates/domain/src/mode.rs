// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The mode a worksheet form is opened in.
///
/// The mode decides which fields accept input, whether sequences can grow
/// or shrink, and what the submit action does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// A blank worksheet is being created.
    #[default]
    Create,
    /// An existing worksheet is being changed.
    Edit,
    /// An existing worksheet is shown read-only.
    View,
    /// An existing worksheet is shown read-only pending deletion.
    Delete,
}

impl FromStr for FormMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            "view" => Ok(Self::View),
            "delete" => Ok(Self::Delete),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for FormMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FormMode {
    /// Converts this mode to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::View => "view",
            Self::Delete => "delete",
        }
    }

    /// Returns whether the form loads an existing record in this mode.
    #[must_use]
    pub const fn loads_existing(&self) -> bool {
        !matches!(self, Self::Create)
    }

    /// Returns whether field input is locked.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::View | Self::Delete)
    }

    /// Returns whether entries may be appended to or removed from sequences.
    #[must_use]
    pub const fn allows_sequence_editing(&self) -> bool {
        matches!(self, Self::Create | Self::Edit)
    }

    /// Returns the persistence operation a submit performs, if any.
    ///
    /// View mode never submits.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::Create => Some(Operation::Insert),
            Self::Edit => Some(Operation::Update),
            Self::Delete => Some(Operation::Delete),
            Self::View => None,
        }
    }

    /// Returns the label shown in the audit log's operation field.
    #[must_use]
    pub const fn operation_label(&self) -> &'static str {
        match self.operation() {
            Some(op) => op.as_str(),
            None => "View",
        }
    }
}

/// The persistence operation recorded on a submitted worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// A new worksheet.
    Insert,
    /// A changed worksheet.
    Update,
    /// A removed worksheet.
    Delete,
}

impl Operation {
    /// Converts this operation to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "Insert",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
