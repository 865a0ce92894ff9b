// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Builds the persisted record from a validated form.

use crate::error::AssemblyError;
use crate::record::{
    ApproachRecord, AuditTeamRecord, CoverageRecord, KeyOfficerRecord, ObjectiveRecord,
    ReviewerRecord, WorksheetRecord,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::{debug, info};
use worksheet::values::{as_number, is_blank, reference};
use worksheet::{FieldPath, FormStore, fields};
use worksheet_audit::{Actor, AuditError, AuditStamp};
use worksheet_domain::{
    AuditMonth, AuditYear, Branch, FormMode, Grade, KeyedEntry, PriorWorksheet, User,
    format_date_code, parse_iso_date, validate_job_stay_months, validate_job_stay_years,
    validate_percent,
};

/// Assembles the record of a form about to be submitted.
///
/// The store's validators run first; their errors are recorded on the
/// store and returned, and nothing else happens. A valid form is flattened
/// to keys and date codes and stamped with the audit fields of `now`.
///
/// # Arguments
///
/// * `store` - The open form
/// * `mode` - The mode the form is open in
/// * `actor` - Who is submitting
/// * `now` - The submitting instant
///
/// # Errors
///
/// Returns an error if:
/// - The mode does not submit (view)
/// - Any field fails validation
/// - A field holds a value of the wrong shape or outside its domain
pub fn assemble(
    store: &mut FormStore,
    mode: FormMode,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<WorksheetRecord, AssemblyError> {
    if mode.operation().is_none() {
        return Err(AuditError::SubmissionNotPermitted(mode).into());
    }
    store.validate().map_err(AssemblyError::Validation)?;

    let tree: &Value = store.tree();
    let previous_counter: u32 = counter(tree.get(fields::RECORD_COUNTER));
    let stamp: AuditStamp = AuditStamp::capture(actor, mode, previous_counter, now)?;

    let branch: Branch = required(tree, fields::BRANCH_ID, "a branch")?;
    let start_month: AuditMonth = required(tree, fields::START_MONTH, "a month")?;
    let start_year: AuditYear = required(tree, fields::START_YEAR, "a year")?;
    let end_month: AuditMonth = required(tree, fields::END_MONTH, "a month")?;
    let end_year: AuditYear = required(tree, fields::END_YEAR, "a year")?;
    let inspection_type: KeyedEntry =
        required(tree, fields::INSPECTION_TYPE, "an inspection type")?;
    let last_audit_visit: Option<PriorWorksheet> = reference(tree.get(fields::LAST_AUDIT_VISIT));
    let approver: User = required(tree, fields::APPROVER, "a user")?;
    let status: KeyedEntry = required(tree, fields::WORKSHEET_STATUS, "a workflow state")?;

    let record: WorksheetRecord = WorksheetRecord {
        worksheet_id: string(tree.get(fields::WORKSHEET_ID)),
        branch_id: branch.branch_id,
        start_month: start_month.month_name,
        start_year: start_year.audit_year,
        end_month: end_month.month_name,
        end_year: end_year.audit_year,
        visit_period_start: date_code(tree, fields::VISIT_PERIOD_START)?,
        visit_period_end: date_code(tree, fields::VISIT_PERIOD_END)?,
        exit_meeting_date: date_code(tree, fields::EXIT_MEETING_DATE)?,
        inspection_type: inspection_type.key,
        last_audit_visit: last_audit_visit.map(|w| w.worksheet_id),
        audit_intro: string(tree.get(fields::AUDIT_INTRO)),
        key_officers: entries(tree, fields::KEY_OFFICERS, key_officer)?,
        audit_teams: entries(tree, fields::AUDIT_TEAMS, team_member)?,
        reviewers: entries(tree, fields::REVIEWERS, reviewer)?,
        approver: approver.userid,
        approver_role: approver.designate,
        audit_objectives: entries(tree, fields::AUDIT_OBJECTIVES, objective)?,
        other_objectives: optional_string(tree.get(fields::OTHER_OBJECTIVES)),
        approach_detail: optional_string(tree.get(fields::APPROACH_DETAIL)),
        approaches: entries(tree, fields::APPROACHES, approach)?,
        overall_coverage: tree.get(fields::OVERALL_COVERAGE).and_then(as_number),
        overall_coverage_grade: Grade::from_percent(
            tree.get(fields::OVERALL_COVERAGE).and_then(as_number),
        ),
        worksheet_status: status.key,
        date_initiated: stamp.date_initiated,
        overdue_date: stamp.overdue_date,
        record_date: stamp.record_date,
        record_time: stamp.record_time,
        initiator: stamp.initiator,
        workstation: stamp.workstation,
        operation: Some(stamp.operation),
        record_counter: stamp.record_counter,
    };

    info!(
        worksheet_id = %record.worksheet_id,
        operation = ?record.operation,
        record_counter = record.record_counter,
        "Assembled worksheet record"
    );
    Ok(record)
}

fn key_officer(row: &Value, at: &FieldPath) -> Result<KeyOfficerRecord, AssemblyError> {
    let staff: User = required_in(row, at, fields::STAFF_NAME, "a user")?;
    let years: i64 = whole(row, at, fields::JOB_STAY_YEAR)?;
    let months: i64 = whole(row, at, fields::JOB_STAY_MONTH)?;
    Ok(KeyOfficerRecord {
        staff_name: staff.userid,
        grade_level: optional_string(row.get(fields::GRADE_LEVEL)),
        designate: optional_string(row.get(fields::DESIGNATE)),
        date_join: date_code(row, fields::DATE_JOIN).map_err(|_| {
            malformed(&at.clone().key(fields::DATE_JOIN), "a calendar date")
        })?,
        job_stay_year: validate_job_stay_years(years)?,
        job_stay_month: validate_job_stay_months(months)?,
    })
}

fn team_member(row: &Value, at: &FieldPath) -> Result<AuditTeamRecord, AssemblyError> {
    let auditor: User = required_in(row, at, fields::AUDITOR_ID, "a user")?;
    let coverages: Vec<KeyedEntry> = required_in(row, at, fields::COVERAGES, "coverage areas")?;
    Ok(AuditTeamRecord {
        auditor_id: auditor.userid,
        auditor_role: optional_string(row.get(fields::AUDITOR_ROLE)),
        specific_coverage: coverages
            .into_iter()
            .map(|c| CoverageRecord {
                area_inspected: c.key,
            })
            .collect(),
    })
}

fn reviewer(row: &Value, at: &FieldPath) -> Result<ReviewerRecord, AssemblyError> {
    let user: User = required_in(row, at, fields::REVIEWER, "a user")?;
    Ok(ReviewerRecord {
        reviewer: user.userid,
        reviewer_role: optional_string(row.get(fields::REVIEWER_ROLE)),
    })
}

fn objective(row: &Value, at: &FieldPath) -> Result<ObjectiveRecord, AssemblyError> {
    let entry: KeyedEntry = required_in(row, at, fields::OBJECTIVE, "an objective")?;
    Ok(ObjectiveRecord {
        objective_id: entry.key,
    })
}

fn approach(row: &Value, at: &FieldPath) -> Result<ApproachRecord, AssemblyError> {
    let entry: KeyedEntry = required_in(row, at, fields::APPROACH, "an approach")?;
    let percent: f64 = row
        .get(fields::APPROACH_PERCENT)
        .and_then(as_number)
        .ok_or_else(|| malformed(&at.clone().key(fields::APPROACH_PERCENT), "a number"))?;
    validate_percent(percent)?;
    Ok(ApproachRecord {
        approach: entry.key,
        approach_percent: Some(percent),
        approach_grade: Grade::from_percent(Some(percent)),
    })
}

fn entries<T>(
    tree: &Value,
    sequence: &str,
    flatten: fn(&Value, &FieldPath) -> Result<T, AssemblyError>,
) -> Result<Vec<T>, AssemblyError> {
    let rows: &[Value] = tree
        .get(sequence)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if rows.is_empty() {
        return Err(malformed(&FieldPath::new(sequence), "at least one entry"));
    }
    debug!(sequence, count = rows.len(), "Flattening sequence");
    rows.iter()
        .enumerate()
        .map(|(i, row)| flatten(row, &FieldPath::new(sequence).index(i)))
        .collect()
}

fn required<T: DeserializeOwned>(
    tree: &Value,
    field: &str,
    expected: &'static str,
) -> Result<T, AssemblyError> {
    required_in(tree, &FieldPath::root(), field, expected)
}

fn required_in<T: DeserializeOwned>(
    object: &Value,
    at: &FieldPath,
    field: &str,
    expected: &'static str,
) -> Result<T, AssemblyError> {
    reference(object.get(field)).ok_or_else(|| malformed(&at.clone().key(field), expected))
}

fn whole(row: &Value, at: &FieldPath, field: &str) -> Result<i64, AssemblyError> {
    let n: f64 = row
        .get(field)
        .and_then(as_number)
        .filter(|n| n.fract() == 0.0)
        .ok_or_else(|| malformed(&at.clone().key(field), "a whole number"))?;
    #[allow(clippy::cast_possible_truncation)]
    Ok(n as i64)
}

fn date_code(object: &Value, field: &str) -> Result<String, AssemblyError> {
    let iso: &str = object
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(&FieldPath::new(field), "a calendar date"))?;
    Ok(format_date_code(parse_iso_date(iso)?)?)
}

fn counter(value: Option<&Value>) -> u32 {
    match value.and_then(as_number) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(n) if n >= 0.0 && n <= f64::from(u32::MAX) => n as u32,
        _ => 0,
    }
}

fn string(value: Option<&Value>) -> String {
    optional_string(value).unwrap_or_default()
}

fn optional_string(value: Option<&Value>) -> Option<String> {
    if is_blank(value) {
        return None;
    }
    match value? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn malformed(path: &FieldPath, expected: &'static str) -> AssemblyError {
    AssemblyError::Malformed {
        path: path.to_string(),
        expected,
    }
}
