// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persisted shape of a worksheet.
//!
//! References are flattened to their keys and dates are `YYYYMMDD` codes.
//! The wire names follow the stored records, including `keyofficers`,
//! `datejoin` and `auditTeam`; the form's own spellings are accepted as
//! aliases when reading.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use worksheet::values::as_number;
use worksheet_domain::{Grade, Operation};

/// A worksheet as submitted to and loaded from persistence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorksheetRecord {
    /// `WK` followed by the creation timestamp.
    pub worksheet_id: String,
    /// The audited branch.
    pub branch_id: String,
    /// Month name the audit period starts in.
    pub start_month: String,
    /// Year the audit period starts in.
    pub start_year: String,
    /// Month name the audit period ends in.
    pub end_month: String,
    /// Year the audit period ends in.
    pub end_year: String,
    /// `YYYYMMDD` start of the visit.
    pub visit_period_start: String,
    /// `YYYYMMDD` end of the visit.
    pub visit_period_end: String,
    /// `YYYYMMDD` of the exit meeting.
    pub exit_meeting_date: String,
    /// Inspection type key.
    pub inspection_type: String,
    /// The prior worksheet of the same branch, if any.
    pub last_audit_visit: Option<String>,
    /// Narrative introduction.
    pub audit_intro: String,
    /// Key officers of the branch.
    #[serde(rename = "keyofficers", alias = "keyOfficers")]
    pub key_officers: Vec<KeyOfficerRecord>,
    /// Inspection team members.
    #[serde(rename = "auditTeam", alias = "auditTeams")]
    pub audit_teams: Vec<AuditTeamRecord>,
    /// Reviewers.
    pub reviewers: Vec<ReviewerRecord>,
    /// Approver user id.
    pub approver: String,
    /// Approver designate id.
    pub approver_role: Option<String>,
    /// Chosen objectives.
    pub audit_objectives: Vec<ObjectiveRecord>,
    /// Free-text objectives.
    pub other_objectives: Option<String>,
    /// Free-text approach description.
    pub approach_detail: Option<String>,
    /// Approaches with their coverage.
    pub approaches: Vec<ApproachRecord>,
    /// Mean approach percentage.
    pub overall_coverage: Option<f64>,
    /// Grade of the mean approach percentage.
    pub overall_coverage_grade: Grade,
    /// Workflow state key.
    pub worksheet_status: String,
    /// `YYYYMMDDHHmmss` of the submission.
    pub date_initiated: String,
    /// `YYYYMMDD` of the submission.
    pub overdue_date: String,
    /// `YYYYMMDD` of the submission.
    pub record_date: String,
    /// `HHmmss` of the submission.
    pub record_time: String,
    /// Submitting user.
    pub initiator: String,
    /// Submitting workstation.
    pub workstation: String,
    /// Persistence operation.
    pub operation: Option<Operation>,
    /// Number of times the worksheet has been saved.
    #[serde(deserialize_with = "lenient_u32")]
    pub record_counter: u32,
}

/// A key officer entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyOfficerRecord {
    /// User id.
    pub staff_name: String,
    /// The user's grade level.
    pub grade_level: Option<String>,
    /// The user's role name.
    pub designate: Option<String>,
    /// `YYYYMMDD` the officer joined the branch.
    #[serde(rename = "datejoin", alias = "dateJoin")]
    pub date_join: String,
    /// Whole years at the branch.
    #[serde(deserialize_with = "lenient_u8")]
    pub job_stay_year: u8,
    /// Additional months at the branch.
    #[serde(deserialize_with = "lenient_u8")]
    pub job_stay_month: u8,
}

/// An inspection team member.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditTeamRecord {
    /// User id.
    pub auditor_id: String,
    /// The user's role name.
    pub auditor_role: Option<String>,
    /// Coverage areas owned by this member.
    pub specific_coverage: Vec<CoverageRecord>,
}

/// A coverage area owned by a team member.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoverageRecord {
    /// Coverage area key.
    pub area_inspected: String,
}

/// A reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewerRecord {
    /// User id.
    pub reviewer: String,
    /// The user's role name.
    pub reviewer_role: Option<String>,
}

/// A chosen objective.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectiveRecord {
    /// Objective key.
    pub objective_id: String,
}

/// An approach row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApproachRecord {
    /// Approach key.
    pub approach: String,
    /// Coverage percentage, 0 to 100.
    #[serde(deserialize_with = "lenient_f64")]
    pub approach_percent: Option<f64>,
    /// Grade of the percentage.
    pub approach_grade: Grade,
}

// Stored counters and pickers may arrive as numbers or numeric strings.

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value: Value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    as_number(&value)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a number, found {value}")))
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    lenient_number(deserializer)
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n: f64 = lenient_number(deserializer)?.unwrap_or(0.0);
    if n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!("{n} is not a counter")));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(n as u32)
}

fn lenient_u8<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let n: f64 = lenient_number(deserializer)?.unwrap_or(0.0);
    if n.fract() != 0.0 || n < 0.0 || n > f64::from(u8::MAX) {
        return Err(serde::de::Error::custom(format!("{n} is not a whole number of 0 to 255")));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(n as u8)
}
