// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    RecordingSink, create_test_environment, create_test_reference, fill_create_scenario, now,
    open, persisted_worksheet, user,
};
use crate::{
    ApiError, AssemblyError, CoverageRecord, FormContainer, HeaderAction, WorksheetRecord,
};
use serde_json::{Value, json};
use worksheet::values::encode;
use worksheet::{CoreError, FieldPath, Step};
use worksheet_domain::{FormMode, Grade, Operation, ReferenceData};

#[test]
fn test_create_scenario_submits_insert() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Create);
    fill_create_scenario(&mut container, &reference);
    let mut sink: RecordingSink = RecordingSink::default();

    let record: WorksheetRecord = container.submit(now(), &mut sink).unwrap();

    assert_eq!(record.operation, Some(Operation::Insert));
    assert_eq!(record.record_counter, 1);
    assert_eq!(record.overall_coverage, Some(70.0));
    assert_eq!(record.overall_coverage_grade, Grade::B);
    assert_eq!(record.approaches[0].approach_grade, Grade::B);
    assert_eq!(record.key_officers[0].staff_name, "U1");
    assert_eq!(record.key_officers[0].date_join, "20230110");
    assert_eq!(record.key_officers[0].job_stay_year, 2);
    assert_eq!(record.key_officers[0].job_stay_month, 3);
    assert_eq!(
        record.key_officers[0].designate.as_deref(),
        Some("Branch Manager")
    );
    assert_eq!(
        record.audit_teams[0].specific_coverage,
        vec![CoverageRecord {
            area_inspected: String::from("AREA_A"),
        }]
    );
    assert_eq!(record.reviewers[0].reviewer, "U3");
    assert_eq!(record.approver, "U4");
    // The submitted role is the approver's designate id.
    assert_eq!(record.approver_role.as_deref(), Some("D4"));
    assert_eq!(record.audit_objectives[0].objective_id, "OBJ_1");
    assert_eq!(record.worksheet_id, "WK20240315102030");
    assert_eq!(record.worksheet_status, "NEW");
    assert_eq!(record.visit_period_start, "20240201");
    assert_eq!(record.date_initiated, "20240315102030");
    assert_eq!(record.overdue_date, "20240315");
    assert_eq!(record.record_time, "102030");
    assert_eq!(record.initiator, "auditor-7");
    assert_eq!(record.workstation, "ws-42");

    assert_eq!(sink.submitted.len(), 1);
    assert_eq!(sink.submitted[0].1, FormMode::Create);
}

#[test]
fn test_submitted_record_uses_stored_wire_names() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Create);
    fill_create_scenario(&mut container, &reference);
    let mut sink: RecordingSink = RecordingSink::default();

    let record: WorksheetRecord = container.submit(now(), &mut sink).unwrap();
    let wire: Value = serde_json::to_value(&record).unwrap();

    assert_eq!(wire["keyofficers"][0]["staffName"], json!("U1"));
    assert_eq!(wire["keyofficers"][0]["datejoin"], json!("20230110"));
    assert_eq!(
        wire["auditTeam"][0]["specificCoverage"],
        json!([{ "areaInspected": "AREA_A" }])
    );
    assert_eq!(wire["auditObjectives"], json!([{ "objectiveId": "OBJ_1" }]));
    assert_eq!(wire["operation"], json!("Insert"));
    assert_eq!(wire["recordCounter"], json!(1));
}

#[test]
fn test_submit_resets_form_to_blank() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Create);
    fill_create_scenario(&mut container, &reference);
    let mut sink: RecordingSink = RecordingSink::default();

    container.submit(now(), &mut sink).unwrap();

    assert_eq!(container.value("branchId"), Some(&Value::Null));
    assert_eq!(
        container.value("approaches[0]"),
        Some(&json!({ "approachGrade": "No grade" }))
    );
    assert!(!container.options().unwrap().is_user_disabled("U1"));
}

#[test]
fn test_edit_scenario_increments_counter() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Edit);
    let mut sink: RecordingSink = RecordingSink::default();

    let record: WorksheetRecord = container.submit(now(), &mut sink).unwrap();

    assert_eq!(record.operation, Some(Operation::Update));
    assert_eq!(record.record_counter, 4);
    assert_eq!(record.worksheet_id, "WK20240101080000");
    assert_eq!(record.worksheet_status, "REVIEWED");
    assert_eq!(record.last_audit_visit.as_deref(), Some("WK20230101090000"));
    assert_eq!(record.key_officers[0].job_stay_year, 2);
    assert_eq!(sink.submitted[0].1, FormMode::Edit);
}

#[test]
fn test_two_approaches_average_to_b() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Edit);
    container.set("approaches[0].approachPercent", json!(50)).unwrap();
    container.append("approaches").unwrap();
    container
        .set(
            "approaches[1].approach",
            encode(reference.coverage_area("APP_2").unwrap()),
        )
        .unwrap();
    container.set("approaches[1].approachPercent", json!(90)).unwrap();

    assert_eq!(container.value("overallCoverage"), Some(&json!(70.0)));
    assert_eq!(container.value("overallCoverageGrade"), Some(&json!("B")));

    let mut sink: RecordingSink = RecordingSink::default();
    let record: WorksheetRecord = container.submit(now(), &mut sink).unwrap();
    assert_eq!(record.overall_coverage, Some(70.0));
    assert_eq!(record.overall_coverage_grade, Grade::B);
    assert_eq!(record.approaches[0].approach_grade, Grade::C);
    assert_eq!(record.approaches[1].approach_grade, Grade::A);
}

#[test]
fn test_invalid_form_is_not_submitted() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Create);
    let mut sink: RecordingSink = RecordingSink::default();

    let result: Result<WorksheetRecord, ApiError> = container.submit(now(), &mut sink);

    let errors = match result {
        Err(ApiError::Assembly(AssemblyError::Validation(errors))) => errors,
        other => panic!("expected validation errors, got {other:?}"),
    };
    assert!(errors.iter().any(|e| e.message == "Branch name is required!"));
    assert!(sink.submitted.is_empty());
    let store = container.store().unwrap();
    assert_eq!(
        store
            .error(&FieldPath::new("approver"))
            .map(|e| e.message.as_str()),
        Some("Approver is required!")
    );
}

#[test]
fn test_record_without_officers_or_reviewers_is_not_submitted() {
    let reference: ReferenceData = create_test_reference();
    let mut record: WorksheetRecord = persisted_worksheet();
    record.key_officers.clear();
    record.reviewers.clear();
    let mut container: FormContainer<'_> =
        FormContainer::new(&reference, create_test_environment());
    container.open(FormMode::Edit, Some(&record), now()).unwrap();
    let mut sink: RecordingSink = RecordingSink::default();

    let store = container.store().unwrap();
    assert_eq!(store.sequence_len(&FieldPath::new("keyOfficers")), 1);
    assert_eq!(store.sequence_len(&FieldPath::new("reviewers")), 1);

    let result: Result<WorksheetRecord, ApiError> = container.submit(now(), &mut sink);

    let errors = match result {
        Err(ApiError::Assembly(AssemblyError::Validation(errors))) => errors,
        other => panic!("expected validation errors, got {other:?}"),
    };
    assert!(errors.iter().any(|e| e.message == "Staff Name is required!"));
    assert!(errors.iter().any(|e| e.message == "Reviewer is required!"));
    assert!(sink.submitted.is_empty());
}

#[test]
fn test_out_of_range_percent_blocks_submit() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Edit);
    container
        .set("approaches[0].approachPercent", json!(120))
        .unwrap();
    let mut sink: RecordingSink = RecordingSink::default();

    let result: Result<WorksheetRecord, ApiError> = container.submit(now(), &mut sink);

    assert!(matches!(
        result,
        Err(ApiError::Assembly(AssemblyError::Validation(_)))
    ));
    assert!(sink.submitted.is_empty());
}

#[test]
fn test_view_mode_cannot_submit_or_edit() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::View);
    let mut sink: RecordingSink = RecordingSink::default();

    assert!(matches!(
        container.submit(now(), &mut sink),
        Err(ApiError::ActionUnavailable { action: "Save", .. })
    ));
    assert!(matches!(
        container.set("auditIntro", json!("changed")),
        Err(ApiError::Core(CoreError::ReadOnlyField { .. }))
    ));
    assert_eq!(
        container.header_action(),
        Some(HeaderAction::Save { enabled: false })
    );
    assert!(sink.submitted.is_empty());
}

#[test]
fn test_delete_mode_offers_delete() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Delete);
    let mut sink: RecordingSink = RecordingSink::default();

    assert_eq!(container.header_action(), Some(HeaderAction::Delete));
    container.delete(&mut sink).unwrap();
    assert_eq!(sink.deletes, 1);
}

#[test]
fn test_delete_outside_delete_mode_is_refused() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Edit);
    let mut sink: RecordingSink = RecordingSink::default();

    assert!(matches!(
        container.delete(&mut sink),
        Err(ApiError::ActionUnavailable { action: "Delete", .. })
    ));
    assert_eq!(sink.deletes, 0);
}

#[test]
fn test_cancel_dismisses_and_closes() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Edit);
    let mut sink: RecordingSink = RecordingSink::default();

    container.cancel(&mut sink);

    assert_eq!(sink.dismissals, 1);
    assert!(!container.is_open());
    assert!(matches!(
        container.set("auditIntro", json!("x")),
        Err(ApiError::NotOpen)
    ));
}

#[test]
fn test_loading_modes_require_a_record() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> =
        FormContainer::new(&reference, create_test_environment());
    assert!(matches!(
        container.open(FormMode::Edit, None, now()),
        Err(ApiError::MissingRecord(FormMode::Edit))
    ));
    assert!(!container.is_open());
}

#[test]
fn test_create_opens_with_display_defaults() {
    let reference: ReferenceData = create_test_reference();
    let container: FormContainer<'_> = open(&reference, FormMode::Create);

    assert_eq!(container.value("worksheetId"), Some(&json!("WK20240315102030")));
    assert_eq!(container.value("dateInitiated"), Some(&json!("15/03/2024")));
    assert_eq!(container.value("recordTime"), Some(&json!("10:20:30")));
    assert_eq!(container.value("operation"), Some(&json!("Insert")));
    assert_eq!(container.value("initiator"), Some(&json!("auditor-7")));
    assert_eq!(container.value("recordCounter"), Some(&json!(0)));
    assert_eq!(
        container.value("worksheetStatus").map(|s| &s["description"]),
        Some(&json!("New"))
    );
    assert_eq!(container.header_action(), Some(HeaderAction::Save { enabled: true }));
}

#[test]
fn test_tabs_clamp_and_reset_on_open() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Create);

    assert_eq!(container.tab(), Some(Step::Introduction));
    assert_eq!(container.previous_tab().unwrap(), Step::Introduction);
    container.select_tab(Step::AuditLog).unwrap();
    assert_eq!(container.next_tab().unwrap(), Step::AuditLog);

    container
        .open(FormMode::Create, None, now())
        .unwrap();
    assert_eq!(container.tab(), Some(Step::Introduction));
}

#[test]
fn test_last_audit_visit_waits_for_branch() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Create);
    let visit: Value = encode(reference.prior_worksheet("WK20230101090000").unwrap());

    assert!(!container.is_editable(&FieldPath::new("lastAuditVisit")));
    assert!(matches!(
        container.set("lastAuditVisit", visit.clone()),
        Err(ApiError::Core(CoreError::ReadOnlyField { .. }))
    ));

    container
        .set("branchId", encode(reference.branch("B01").unwrap()))
        .unwrap();
    container.set("lastAuditVisit", visit).unwrap();
    assert_eq!(
        container.options().unwrap().last_audit_visits.len(),
        1
    );

    container
        .set("branchId", encode(reference.branch("B02").unwrap()))
        .unwrap();
    assert_eq!(container.value("lastAuditVisit"), Some(&Value::Null));
    assert_eq!(
        container.options().unwrap().last_audit_visits[0].worksheet_id,
        "WK20230202090000"
    );
}

#[test]
fn test_removing_last_entry_is_refused() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Create);
    for sequence in ["keyOfficers", "auditTeams", "reviewers", "auditObjectives", "approaches"] {
        assert!(matches!(
            container.remove(sequence, 0),
            Err(ApiError::Core(CoreError::LastEntry { .. }))
        ));
    }
}

#[test]
fn test_coverage_taken_by_one_member_is_refused_for_another() {
    let reference: ReferenceData = create_test_reference();
    let mut container: FormContainer<'_> = open(&reference, FormMode::Edit);
    container.append("auditTeams").unwrap();
    container
        .set("auditTeams[1].auditorId", user(&reference, "U1"))
        .unwrap();

    let taken: Value = encode(&vec![reference.coverage_area("AREA_A").unwrap().clone()]);
    assert!(matches!(
        container.set("auditTeams[1].coverages", taken),
        Err(ApiError::Core(CoreError::OptionDisabled { .. }))
    ));
    assert!(container.options().unwrap().is_coverage_disabled("AREA_A"));
    assert!(!container.options().unwrap().is_coverage_disabled("AREA_B"));
}
