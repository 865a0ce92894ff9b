// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::fields;
use crate::path::{FieldPath, Segment};
use worksheet_domain::FormMode;

/// Whether a field accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAccess {
    /// The field accepts input.
    Editable,
    /// The field is rendered read-only.
    ReadOnly,
}

impl FieldAccess {
    /// Returns whether the field accepts input.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Editable)
    }
}

/// Decides whether a field accepts input in a mode.
///
/// Derived fields are never editable. The worksheet status is editable only
/// while editing. Everything else follows the mode: view and delete lock
/// the whole form.
#[must_use]
pub fn field_access(mode: FormMode, path: &FieldPath) -> FieldAccess {
    if is_derived(path) {
        return FieldAccess::ReadOnly;
    }
    if top_level_field(path) == Some(fields::WORKSHEET_STATUS) {
        return if mode == FormMode::Edit {
            FieldAccess::Editable
        } else {
            FieldAccess::ReadOnly
        };
    }
    if mode.is_read_only() {
        FieldAccess::ReadOnly
    } else {
        FieldAccess::Editable
    }
}

/// Returns whether the path names a derived field, at the top level or
/// inside a sequence entry.
#[must_use]
pub fn is_derived(path: &FieldPath) -> bool {
    let field: Option<&str> = match path.segments() {
        [Segment::Key(field)] | [Segment::Key(_), Segment::Index(_), Segment::Key(field)] => {
            Some(field.as_str())
        }
        _ => None,
    };
    field.is_some_and(|f| fields::DERIVED.contains(&f))
}

fn top_level_field(path: &FieldPath) -> Option<&str> {
    match path.segments().first() {
        Some(Segment::Key(field)) => Some(field),
        _ => None,
    }
}
