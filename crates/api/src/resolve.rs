// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Turns a persisted record into a form tree.
//!
//! Every key is looked up in the reference tables and replaced by the full
//! record the pickers work with. A key that does not resolve becomes an
//! empty selection and is logged; loading never fails.

use crate::record::{ApproachRecord, AuditTeamRecord, KeyOfficerRecord, WorksheetRecord};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::warn;
use worksheet::fields;
use worksheet::values::{encode, number, text};
use worksheet_domain::{KeyedEntry, ReferenceData, format_iso_date, parse_date_code};

/// Builds the form tree of a persisted worksheet.
///
/// Derived fields are left for the rules engine to recompute.
#[must_use]
pub fn resolve(record: &WorksheetRecord, reference: &ReferenceData) -> Value {
    let mut tree: Map<String, Value> = Map::new();
    let mut put = |field: &str, value: Value| {
        tree.insert(field.to_string(), value);
    };

    put(fields::WORKSHEET_ID, json!(record.worksheet_id));
    put(
        fields::BRANCH_ID,
        found("branch", &record.branch_id, reference.branch(&record.branch_id)),
    );
    put(
        fields::START_MONTH,
        found("month", &record.start_month, reference.month(&record.start_month)),
    );
    put(
        fields::START_YEAR,
        found("year", &record.start_year, reference.year(&record.start_year)),
    );
    put(
        fields::END_MONTH,
        found("month", &record.end_month, reference.month(&record.end_month)),
    );
    put(
        fields::END_YEAR,
        found("year", &record.end_year, reference.year(&record.end_year)),
    );
    put(fields::VISIT_PERIOD_START, date(&record.visit_period_start));
    put(fields::VISIT_PERIOD_END, date(&record.visit_period_end));
    put(fields::EXIT_MEETING_DATE, date(&record.exit_meeting_date));
    put(
        fields::INSPECTION_TYPE,
        found(
            "inspection type",
            &record.inspection_type,
            reference.inspection_type(&record.inspection_type),
        ),
    );
    let last_visit: &str = record.last_audit_visit.as_deref().unwrap_or_default();
    put(
        fields::LAST_AUDIT_VISIT,
        found("worksheet", last_visit, reference.prior_worksheet(last_visit)),
    );
    put(fields::AUDIT_INTRO, json!(record.audit_intro));

    put(
        fields::KEY_OFFICERS,
        sequence(
            record
                .key_officers
                .iter()
                .map(|officer| key_officer(officer, reference))
                .collect(),
        ),
    );
    put(
        fields::AUDIT_TEAMS,
        sequence(
            record
                .audit_teams
                .iter()
                .map(|member| team_member(member, reference))
                .collect(),
        ),
    );
    put(
        fields::REVIEWERS,
        sequence(
            record
                .reviewers
                .iter()
                .map(|r| {
                    object([(
                        fields::REVIEWER,
                        found("user", &r.reviewer, reference.user(&r.reviewer)),
                    )])
                })
                .collect(),
        ),
    );
    put(
        fields::APPROVER,
        found("user", &record.approver, reference.user(&record.approver)),
    );

    put(
        fields::AUDIT_OBJECTIVES,
        sequence(
            record
                .audit_objectives
                .iter()
                .map(|o| {
                    object([(
                        fields::OBJECTIVE,
                        found(
                            "objective",
                            &o.objective_id,
                            reference.objective(&o.objective_id),
                        ),
                    )])
                })
                .collect(),
        ),
    );
    put(fields::OTHER_OBJECTIVES, text(record.other_objectives.as_deref()));
    put(fields::APPROACH_DETAIL, text(record.approach_detail.as_deref()));
    put(
        fields::APPROACHES,
        sequence(
            record
                .approaches
                .iter()
                .map(|a| approach(a, reference))
                .collect(),
        ),
    );

    put(
        fields::WORKSHEET_STATUS,
        found(
            "workflow state",
            &record.worksheet_status,
            reference.workflow_state(&record.worksheet_status),
        ),
    );
    put(fields::RECORD_COUNTER, json!(record.record_counter));

    Value::Object(tree)
}

fn key_officer(officer: &KeyOfficerRecord, reference: &ReferenceData) -> Value {
    object([
        (
            fields::STAFF_NAME,
            found("user", &officer.staff_name, reference.user(&officer.staff_name)),
        ),
        (fields::DATE_JOIN, date(&officer.date_join)),
        (fields::JOB_STAY_YEAR, json!(officer.job_stay_year)),
        (fields::JOB_STAY_MONTH, json!(officer.job_stay_month)),
    ])
}

fn team_member(member: &AuditTeamRecord, reference: &ReferenceData) -> Value {
    let coverages: Vec<KeyedEntry> = member
        .specific_coverage
        .iter()
        .filter_map(|c| {
            let area: Option<&KeyedEntry> = reference.coverage_area(&c.area_inspected);
            if area.is_none() {
                warn!(key = %c.area_inspected, "Unknown coverage area dropped on load");
            }
            area.cloned()
        })
        .collect();
    object([
        (
            fields::AUDITOR_ID,
            found("user", &member.auditor_id, reference.user(&member.auditor_id)),
        ),
        (fields::COVERAGES, encode(&coverages)),
    ])
}

fn approach(row: &ApproachRecord, reference: &ReferenceData) -> Value {
    object([
        (
            fields::APPROACH,
            found("approach", &row.approach, reference.coverage_area(&row.approach)),
        ),
        (
            fields::APPROACH_PERCENT,
            row.approach_percent.map_or(Value::Null, number),
        ),
    ])
}

/// A sequence with no rows loads as one empty entry, like a new form.
fn sequence(rows: Vec<Value>) -> Value {
    if rows.is_empty() {
        return Value::Array(vec![Value::Object(Map::new())]);
    }
    Value::Array(rows)
}

fn object<const N: usize>(members: [(&str, Value); N]) -> Value {
    Value::Object(
        members
            .into_iter()
            .map(|(field, value)| (field.to_string(), value))
            .collect(),
    )
}

/// Encodes a resolved reference, or null with a warning on a miss.
fn found<T: Serialize>(table: &'static str, key: &str, hit: Option<&T>) -> Value {
    match hit {
        Some(record) => encode(record),
        None => {
            if !key.is_empty() {
                warn!(table, key, "Reference lookup missed while loading worksheet");
            }
            Value::Null
        }
    }
}

/// Converts a `YYYYMMDD` code to the ISO date the form edits.
fn date(code: &str) -> Value {
    if code.is_empty() {
        return Value::Null;
    }
    match parse_date_code(code).and_then(format_iso_date) {
        Ok(iso) => Value::String(iso),
        Err(err) => {
            warn!(code, error = %err, "Unreadable date dropped on load");
            Value::Null
        }
    }
}
