// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::fields;
use crate::path::{FieldPath, Segment};
use crate::values::reference;
use serde_json::Value;
use worksheet_domain::{
    JOB_STAY_MAX_MONTHS, JOB_STAY_MAX_YEARS, KeyedEntry, PriorWorksheet, ReferenceData, User,
};

/// An entry of a picker, annotated by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<T> {
    /// The underlying reference record.
    pub value: T,
    /// Whether the entry is already taken elsewhere.
    pub disabled: bool,
}

impl<T> SelectOption<T> {
    /// Wraps a record as an enabled option.
    pub const fn enabled(value: T) -> Self {
        Self {
            value,
            disabled: false,
        }
    }
}

/// Picker lists whose contents depend on the form state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionLists {
    /// Users offered for key officer slots.
    pub key_officer_users: Vec<SelectOption<User>>,
    /// Coverage areas offered to inspection team members.
    pub coverage_areas: Vec<SelectOption<KeyedEntry>>,
    /// Prior worksheets offered as the last audit visit.
    pub last_audit_visits: Vec<PriorWorksheet>,
}

impl OptionLists {
    /// Builds the lists with every entry enabled and no audit history.
    #[must_use]
    pub fn new(reference: &ReferenceData) -> Self {
        Self {
            key_officer_users: reference
                .users
                .iter()
                .cloned()
                .map(SelectOption::enabled)
                .collect(),
            coverage_areas: reference
                .coverage_areas
                .iter()
                .cloned()
                .map(SelectOption::enabled)
                .collect(),
            last_audit_visits: Vec::new(),
        }
    }

    /// Returns whether a user is taken by a key officer slot.
    #[must_use]
    pub fn is_user_disabled(&self, userid: &str) -> bool {
        self.key_officer_users
            .iter()
            .any(|o| o.disabled && o.value.userid == userid)
    }

    /// Returns whether a coverage area is taken by a team member.
    #[must_use]
    pub fn is_coverage_disabled(&self, key: &str) -> bool {
        self.coverage_areas
            .iter()
            .any(|o| o.disabled && o.value.key == key)
    }

    /// Finds a selection that picks an option already taken elsewhere.
    ///
    /// Options the field itself already holds remain selectable. Returns
    /// the key of the first conflicting option.
    #[must_use]
    pub fn conflicting_selection(
        &self,
        path: &FieldPath,
        value: &Value,
        current: Option<&Value>,
    ) -> Option<String> {
        match field_in_sequence(path) {
            Some((fields::KEY_OFFICERS, fields::STAFF_NAME)) => {
                let chosen: User = reference(Some(value))?;
                let held: Option<User> = reference(current);
                let unchanged: bool = held.is_some_and(|u| u.userid == chosen.userid);
                (!unchanged && self.is_user_disabled(&chosen.userid)).then_some(chosen.userid)
            }
            Some((fields::AUDIT_TEAMS, fields::COVERAGES)) => {
                let chosen: Vec<KeyedEntry> = reference(Some(value))?;
                let held: Vec<KeyedEntry> = reference(current).unwrap_or_default();
                chosen
                    .into_iter()
                    .find(|c| !held.contains(c) && self.is_coverage_disabled(&c.key))
                    .map(|c| c.key)
            }
            _ => None,
        }
    }
}

/// Splits `sequence[i].field` into its sequence and field names.
fn field_in_sequence(path: &FieldPath) -> Option<(&str, &str)> {
    match path.segments() {
        [Segment::Key(sequence), Segment::Index(_), Segment::Key(field)] => {
            Some((sequence.as_str(), field.as_str()))
        }
        _ => None,
    }
}

/// Job stay year picker values, 0 through 25.
#[must_use]
pub fn job_stay_year_options() -> Vec<u8> {
    (0..=JOB_STAY_MAX_YEARS).collect()
}

/// Job stay month picker values, 0 through 10.
#[must_use]
pub fn job_stay_month_options() -> Vec<u8> {
    (0..=JOB_STAY_MAX_MONTHS).collect()
}
