// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::path::FieldPath;
use serde_json::Value;

/// A command represents user intent against an open form as data only.
///
/// Commands are the only way the container changes user-entered state.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Write a value into a field.
    Set {
        /// The field to write.
        path: FieldPath,
        /// The new value.
        value: Value,
    },
    /// Append an empty entry to a sequence.
    Append {
        /// The sequence.
        path: FieldPath,
    },
    /// Remove an entry from a sequence.
    Remove {
        /// The sequence.
        path: FieldPath,
        /// The entry to remove.
        index: usize,
    },
    /// Replace a whole subtree, clearing its errors.
    ResetSubtree {
        /// The subtree root.
        path: FieldPath,
        /// The replacement value.
        value: Value,
    },
}

impl Command {
    /// Returns the path the command targets.
    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        match self {
            Self::Set { path, .. }
            | Self::Append { path }
            | Self::Remove { path, .. }
            | Self::ResetSubtree { path, .. } => path,
        }
    }

    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Set { .. } => "Set",
            Self::Append { .. } => "Append",
            Self::Remove { .. } => "Remove",
            Self::ResetSubtree { .. } => "ResetSubtree",
        }
    }
}
