// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only lookup tables backing the worksheet form.
//!
//! Every table maps a stable key to a descriptive record. The form tree
//! holds these records (never the bare keys) for every reference field.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Upper bound of the job stay year picker.
pub const JOB_STAY_MAX_YEARS: u8 = 25;

/// Upper bound of the job stay month picker.
pub const JOB_STAY_MAX_MONTHS: u8 = 10;

/// A branch that can be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// The branch code.
    pub branch_id: String,
    /// The branch's display name.
    pub branch_name: String,
}

impl Branch {
    /// Returns the option label, `"{branchId} - {branchName}"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.branch_id, self.branch_name)
    }
}

/// A month of the audit period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMonth {
    /// The month name, which is also its key.
    pub month_name: String,
}

/// A year of the audit period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditYear {
    /// The year label, which is also its key.
    pub audit_year: String,
}

/// A keyed entry with a description.
///
/// Inspection types, audit objectives, coverage areas and workflow states
/// all share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyedEntry {
    /// The stable key.
    pub key: String,
    /// The display text.
    pub description: String,
}

impl KeyedEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(key: &str, description: &str) -> Self {
        Self {
            key: key.to_string(),
            description: description.to_string(),
        }
    }
}

/// An application user who can staff or approve a worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's identifier.
    pub userid: String,
    /// Honorific.
    #[serde(default)]
    pub title: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name. Older fixtures spell the field `lastNamme`.
    #[serde(default, alias = "lastNamme")]
    pub last_name: String,
    /// The branch the user belongs to.
    #[serde(default)]
    pub branch_id: Option<String>,
    /// The user's grade level.
    #[serde(default)]
    pub grade_level: Option<String>,
    /// The user's designate id, resolved through the designate table.
    #[serde(default)]
    pub designate: Option<String>,
}

impl User {
    /// Returns the option label, `"{title}. {firstName} {lastName}"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}. {} {}", self.title, self.first_name, self.last_name)
    }
}

/// A role designation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designate {
    /// The designate id referenced by users.
    pub designate_id: String,
    /// The role's display name.
    pub designate_name: String,
}

/// A previously recorded worksheet, offered as the last audit visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorWorksheet {
    /// The worksheet identifier.
    pub worksheet_id: String,
    /// The audited branch.
    pub branch_id: String,
    /// The inspection type key.
    #[serde(default)]
    pub inspection_type: String,
}

impl PriorWorksheet {
    /// Returns the option label, `"{worksheetId} - {inspectionType}"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.worksheet_id, self.inspection_type)
    }
}

/// A foreign key in the reference data that points nowhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// The table holding the foreign key.
    pub table: &'static str,
    /// The record holding the foreign key.
    pub record: String,
    /// The field holding the foreign key.
    pub field: &'static str,
    /// The unresolved key.
    pub key: String,
}

impl std::fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' has unknown {} '{}'",
            self.table, self.record, self.field, self.key
        )
    }
}

/// The complete set of lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceData {
    /// Branches.
    pub branches: Vec<Branch>,
    /// Audit months.
    pub months: Vec<AuditMonth>,
    /// Audit years.
    pub years: Vec<AuditYear>,
    /// Inspection types.
    pub inspection_types: Vec<KeyedEntry>,
    /// Audit objectives.
    pub objectives: Vec<KeyedEntry>,
    /// Coverage areas, also used as approach options.
    pub coverage_areas: Vec<KeyedEntry>,
    /// Worksheet workflow states.
    pub workflow_states: Vec<KeyedEntry>,
    /// Users.
    pub users: Vec<User>,
    /// Role designations.
    pub designates: Vec<Designate>,
    /// Previously recorded worksheets.
    pub worksheets: Vec<PriorWorksheet>,
}

impl ReferenceData {
    /// Decodes a JSON bundle with one array per table.
    ///
    /// Missing tables decode as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundle is not valid JSON or a record has the
    /// wrong shape.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| DomainError::ReferenceDataParse(e.to_string()))
    }

    /// Looks up a branch by code.
    #[must_use]
    pub fn branch(&self, branch_id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.branch_id == branch_id)
    }

    /// Looks up a month by name.
    #[must_use]
    pub fn month(&self, month_name: &str) -> Option<&AuditMonth> {
        self.months.iter().find(|m| m.month_name == month_name)
    }

    /// Looks up a year by label.
    #[must_use]
    pub fn year(&self, audit_year: &str) -> Option<&AuditYear> {
        self.years.iter().find(|y| y.audit_year == audit_year)
    }

    /// Looks up an inspection type by key.
    #[must_use]
    pub fn inspection_type(&self, key: &str) -> Option<&KeyedEntry> {
        find_keyed(&self.inspection_types, key)
    }

    /// Looks up an audit objective by key.
    #[must_use]
    pub fn objective(&self, key: &str) -> Option<&KeyedEntry> {
        find_keyed(&self.objectives, key)
    }

    /// Looks up a coverage area by key.
    #[must_use]
    pub fn coverage_area(&self, key: &str) -> Option<&KeyedEntry> {
        find_keyed(&self.coverage_areas, key)
    }

    /// Looks up a workflow state by key.
    #[must_use]
    pub fn workflow_state(&self, key: &str) -> Option<&KeyedEntry> {
        find_keyed(&self.workflow_states, key)
    }

    /// Looks up a user by id.
    #[must_use]
    pub fn user(&self, userid: &str) -> Option<&User> {
        self.users.iter().find(|u| u.userid == userid)
    }

    /// Resolves a designate id to its display name.
    #[must_use]
    pub fn designate_name(&self, designate_id: &str) -> Option<&str> {
        self.designates
            .iter()
            .find(|d| d.designate_id == designate_id)
            .map(|d| d.designate_name.as_str())
    }

    /// Looks up a prior worksheet by id.
    #[must_use]
    pub fn prior_worksheet(&self, worksheet_id: &str) -> Option<&PriorWorksheet> {
        self.worksheets.iter().find(|w| w.worksheet_id == worksheet_id)
    }

    /// Returns the prior worksheets recorded for a branch.
    #[must_use]
    pub fn worksheets_for_branch(&self, branch_id: &str) -> Vec<&PriorWorksheet> {
        self.worksheets
            .iter()
            .filter(|w| w.branch_id == branch_id)
            .collect()
    }

    /// Lists foreign keys inside the tables that do not resolve.
    ///
    /// Checks user designates, user branches and prior worksheet branches.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling: Vec<DanglingReference> = Vec::new();

        for user in &self.users {
            if let Some(designate) = &user.designate
                && self.designate_name(designate).is_none()
            {
                dangling.push(DanglingReference {
                    table: "users",
                    record: user.userid.clone(),
                    field: "designate",
                    key: designate.clone(),
                });
            }
            if let Some(branch_id) = &user.branch_id
                && self.branch(branch_id).is_none()
            {
                dangling.push(DanglingReference {
                    table: "users",
                    record: user.userid.clone(),
                    field: "branchId",
                    key: branch_id.clone(),
                });
            }
        }

        for worksheet in &self.worksheets {
            if self.branch(&worksheet.branch_id).is_none() {
                dangling.push(DanglingReference {
                    table: "worksheets",
                    record: worksheet.worksheet_id.clone(),
                    field: "branchId",
                    key: worksheet.branch_id.clone(),
                });
            }
        }

        dangling
    }
}

fn find_keyed<'a>(table: &'a [KeyedEntry], key: &str) -> Option<&'a KeyedEntry> {
    table.iter().find(|e| e.key == key)
}
