// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The six tabs of the worksheet form and the validators each registers.

use crate::fields;
use crate::path::FieldPath;
use crate::store::FormStore;
use crate::validator::Rule;
use worksheet_domain::{JOB_STAY_MAX_MONTHS, JOB_STAY_MAX_YEARS};

/// A tab of the worksheet form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Step {
    /// Branch, period, inspection type and introduction.
    #[default]
    Introduction,
    /// Key officers of the audited branch.
    KeyOfficers,
    /// Auditors, reviewers and approver.
    InspectionTeam,
    /// Audit objectives.
    Objectives,
    /// Audit approaches and coverage.
    Approaches,
    /// Workflow status and the audit trail.
    AuditLog,
}

impl Step {
    /// Every step, in tab order.
    pub const ALL: [Self; 6] = [
        Self::Introduction,
        Self::KeyOfficers,
        Self::InspectionTeam,
        Self::Objectives,
        Self::Approaches,
        Self::AuditLog,
    ];

    /// Returns the tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Introduction => "Introduction",
            Self::KeyOfficers => "Key Officers",
            Self::InspectionTeam => "Inspection Team",
            Self::Objectives => "Objectives",
            Self::Approaches => "Approaches",
            Self::AuditLog => "Audit Log and Status",
        }
    }

    /// Returns the zero-based tab position.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Introduction => 0,
            Self::KeyOfficers => 1,
            Self::InspectionTeam => 2,
            Self::Objectives => 3,
            Self::Approaches => 4,
            Self::AuditLog => 5,
        }
    }

    /// Returns the step at a tab position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the following step, staying on the last one.
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(self)
    }

    /// Returns the preceding step, staying on the first one.
    #[must_use]
    pub fn previous(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(self)
    }

    /// Registers the validators of this step's fields.
    pub fn register_validators(self, store: &mut FormStore) {
        for (path, rule) in self.validators() {
            store.register_validator(FieldPath::new(path), rule);
        }
    }

    fn validators(self) -> Vec<(&'static str, Rule)> {
        match self {
            Self::Introduction => vec![
                (fields::BRANCH_ID, Rule::required("Branch name is required!")),
                (fields::START_MONTH, Rule::required("Start Month is required!")),
                (fields::START_YEAR, Rule::required("Start Year is required!")),
                (fields::END_MONTH, Rule::required("End Month is required!")),
                (fields::END_YEAR, Rule::required("End Year is required!")),
                (
                    fields::VISIT_PERIOD_START,
                    Rule::required("Visit Period Start is required!"),
                ),
                (fields::VISIT_PERIOD_START, Rule::date("Invalid date!")),
                (
                    fields::VISIT_PERIOD_END,
                    Rule::required("Visit Period End is required!"),
                ),
                (fields::VISIT_PERIOD_END, Rule::date("Invalid date!")),
                (
                    fields::EXIT_MEETING_DATE,
                    Rule::required("Exit Meeting Date is required!"),
                ),
                (fields::EXIT_MEETING_DATE, Rule::date("Invalid date!")),
                (
                    fields::INSPECTION_TYPE,
                    Rule::required("Inspection Type is required!"),
                ),
            ],
            Self::KeyOfficers => vec![
                ("keyOfficers[*].staffName", Rule::required("Staff Name is required!")),
                ("keyOfficers[*].dateJoin", Rule::required("Length of Stay is required!")),
                ("keyOfficers[*].dateJoin", Rule::date("Invalid date!")),
                (
                    "keyOfficers[*].jobStayYear",
                    Rule::required("Job Stay Year is required!"),
                ),
                (
                    "keyOfficers[*].jobStayYear",
                    Rule::integer_range(
                        0,
                        i64::from(JOB_STAY_MAX_YEARS),
                        "Max value is 25!",
                    ),
                ),
                (
                    "keyOfficers[*].jobStayMonth",
                    Rule::required("Job Stay Month is required!"),
                ),
                (
                    "keyOfficers[*].jobStayMonth",
                    Rule::integer_range(
                        0,
                        i64::from(JOB_STAY_MAX_MONTHS),
                        "Max value is 10!",
                    ),
                ),
            ],
            Self::InspectionTeam => vec![
                ("auditTeams[*].auditorId", Rule::required("Auditor is required!")),
                (
                    "auditTeams[*].coverages",
                    Rule::required("Inspection Area is required!"),
                ),
                ("reviewers[*].reviewer", Rule::required("Reviewer is required!")),
                (fields::APPROVER, Rule::required("Approver is required!")),
            ],
            Self::Objectives => vec![(
                "auditObjectives[*].objective",
                Rule::required("Objective is required!"),
            )],
            Self::Approaches => vec![
                ("approaches[*].approach", Rule::required("Approach is required!")),
                (
                    "approaches[*].approachPercent",
                    Rule::required("Approach Percent is required!"),
                ),
                (
                    "approaches[*].approachPercent",
                    Rule::min(0.0, "Minimum value is 0!"),
                ),
                (
                    "approaches[*].approachPercent",
                    Rule::max(100.0, "Max value is 100!"),
                ),
            ],
            Self::AuditLog => vec![(
                fields::WORKSHEET_STATUS,
                Rule::required("Worksheet Status is required!"),
            )],
        }
    }
}

/// Registers the validators of every step.
pub fn register_all_validators(store: &mut FormStore) {
    for step in Step::ALL {
        step.register_validators(store);
    }
}
