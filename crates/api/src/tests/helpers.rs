// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{FormContainer, FormEnvironment, WorksheetRecord, WorksheetSink};
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::macros::datetime;
use worksheet::values::encode;
use worksheet_domain::{FormMode, ReferenceData};

pub const REFERENCE_BUNDLE: &str = r#"{
    "branches": [
        { "branchId": "B01", "branchName": "Head Office" },
        { "branchId": "B02", "branchName": "Marina" }
    ],
    "months": [{ "monthName": "January" }, { "monthName": "June" }],
    "years": [{ "auditYear": "2024" }],
    "inspectionTypes": [{ "key": "ROUTINE", "description": "Routine inspection" }],
    "objectives": [
        { "key": "OBJ_1", "description": "Compliance" },
        { "key": "OBJ_2", "description": "Risk" }
    ],
    "coverageAreas": [
        { "key": "AREA_A", "description": "Cash" },
        { "key": "AREA_B", "description": "Loans" },
        { "key": "APP_1", "description": "Sampling" },
        { "key": "APP_2", "description": "Walkthrough" }
    ],
    "workflowStates": [
        { "key": "NEW", "description": "New" },
        { "key": "REVIEWED", "description": "Reviewed" }
    ],
    "users": [
        { "userid": "U1", "title": "Mr", "firstName": "Ade", "lastNamme": "Bello",
          "branchId": "B01", "gradeLevel": "GL08", "designate": "D1" },
        { "userid": "U2", "title": "Ms", "firstName": "Ife", "lastName": "Obi",
          "gradeLevel": "GL10", "designate": "D2" },
        { "userid": "U3", "title": "Dr", "firstName": "Tolu", "lastName": "Ade",
          "gradeLevel": "GL12", "designate": "D3" },
        { "userid": "U4", "title": "Mrs", "firstName": "Bisi", "lastName": "Eze",
          "gradeLevel": "GL14", "designate": "D4" }
    ],
    "designates": [
        { "designate_id": "D1", "designate_name": "Branch Manager" },
        { "designate_id": "D2", "designate_name": "Senior Auditor" },
        { "designate_id": "D3", "designate_name": "Audit Reviewer" },
        { "designate_id": "D4", "designate_name": "Chief Auditor" }
    ],
    "worksheets": [
        { "worksheetId": "WK20230101090000", "branchId": "B01", "inspectionType": "ROUTINE" },
        { "worksheetId": "WK20230202090000", "branchId": "B02", "inspectionType": "ROUTINE" }
    ]
}"#;

/// A worksheet as persistence hands it back, counter stored as text.
pub const PERSISTED_WORKSHEET: &str = r#"{
    "worksheetId": "WK20240101080000",
    "branchId": "B01",
    "startMonth": "January",
    "startYear": "2024",
    "endMonth": "June",
    "endYear": "2024",
    "visitPeriodStart": "20240201",
    "visitPeriodEnd": "20240210",
    "exitMeetingDate": "20240212",
    "inspectionType": "ROUTINE",
    "lastAuditVisit": "WK20230101090000",
    "auditIntro": "Routine half-year inspection",
    "keyofficers": [
        { "staffName": "U1", "gradeLevel": "GL08", "designate": "Branch Manager",
          "datejoin": "20230110", "jobStayYear": "2", "jobStayMonth": 3 }
    ],
    "auditTeam": [
        { "auditorId": "U2", "auditorRole": "Senior Auditor",
          "specificCoverage": [{ "areaInspected": "AREA_A" }] }
    ],
    "reviewers": [{ "reviewer": "U3", "reviewerRole": "Audit Reviewer" }],
    "approver": "U4",
    "approverRole": "D4",
    "auditObjectives": [{ "objectiveId": "OBJ_1" }],
    "otherObjectives": "None",
    "approachDetail": "Sampling of vouchers",
    "approaches": [{ "approach": "APP_1", "approachPercent": 70, "approachGrade": "B" }],
    "overallCoverage": 70,
    "overallCoverageGrade": "B",
    "worksheetStatus": "REVIEWED",
    "dateInitiated": "20240101080000",
    "overdueDate": "20240101",
    "recordDate": "20240101",
    "recordTime": "080000",
    "initiator": "someone",
    "workstation": "ws-01",
    "operation": "Insert",
    "recordCounter": "3"
}"#;

pub fn create_test_reference() -> ReferenceData {
    ReferenceData::from_json(REFERENCE_BUNDLE).unwrap()
}

pub fn create_test_environment() -> FormEnvironment {
    FormEnvironment::new(String::from("auditor-7"), String::from("ws-42"))
}

pub fn persisted_worksheet() -> WorksheetRecord {
    serde_json::from_str(PERSISTED_WORKSHEET).unwrap()
}

pub const fn now() -> OffsetDateTime {
    datetime!(2024-03-15 10:20:30 UTC)
}

pub fn open(reference: &ReferenceData, mode: FormMode) -> FormContainer<'_> {
    let mut container: FormContainer<'_> =
        FormContainer::new(reference, create_test_environment());
    let selected: Option<WorksheetRecord> = mode.loads_existing().then(persisted_worksheet);
    container.open(mode, selected.as_ref(), now()).unwrap();
    container
}

pub fn user(reference: &ReferenceData, userid: &str) -> Value {
    encode(reference.user(userid).unwrap())
}

/// Fills every field of a new worksheet with valid values.
pub fn fill_create_scenario(container: &mut FormContainer<'_>, reference: &ReferenceData) {
    container
        .set("branchId", encode(reference.branch("B01").unwrap()))
        .unwrap();
    container
        .set("startMonth", encode(reference.month("January").unwrap()))
        .unwrap();
    container
        .set("startYear", encode(reference.year("2024").unwrap()))
        .unwrap();
    container
        .set("endMonth", encode(reference.month("June").unwrap()))
        .unwrap();
    container
        .set("endYear", encode(reference.year("2024").unwrap()))
        .unwrap();
    container.set("visitPeriodStart", json!("2024-02-01")).unwrap();
    container.set("visitPeriodEnd", json!("2024-02-10")).unwrap();
    container.set("exitMeetingDate", json!("2024-02-12")).unwrap();
    container
        .set(
            "inspectionType",
            encode(reference.inspection_type("ROUTINE").unwrap()),
        )
        .unwrap();
    container
        .set("auditIntro", json!("Routine half-year inspection"))
        .unwrap();

    container
        .set("keyOfficers[0].staffName", user(reference, "U1"))
        .unwrap();
    container
        .set("keyOfficers[0].dateJoin", json!("2023-01-10"))
        .unwrap();
    container.set("keyOfficers[0].jobStayYear", json!(2)).unwrap();
    container.set("keyOfficers[0].jobStayMonth", json!(3)).unwrap();

    container
        .set("auditTeams[0].auditorId", user(reference, "U2"))
        .unwrap();
    container
        .set(
            "auditTeams[0].coverages",
            encode(&vec![reference.coverage_area("AREA_A").unwrap().clone()]),
        )
        .unwrap();
    container
        .set("reviewers[0].reviewer", user(reference, "U3"))
        .unwrap();
    container.set("approver", user(reference, "U4")).unwrap();

    container
        .set(
            "auditObjectives[0].objective",
            encode(reference.objective("OBJ_1").unwrap()),
        )
        .unwrap();

    container
        .set(
            "approaches[0].approach",
            encode(reference.coverage_area("APP_1").unwrap()),
        )
        .unwrap();
    container
        .set("approaches[0].approachPercent", json!(70))
        .unwrap();
}

/// Records every call the container makes.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub submitted: Vec<(WorksheetRecord, FormMode)>,
    pub deletes: usize,
    pub dismissals: usize,
}

impl WorksheetSink for RecordingSink {
    fn submit_form(&mut self, record: &WorksheetRecord, mode: FormMode) {
        self.submitted.push((record.clone(), mode));
    }

    fn delete_data(&mut self) {
        self.deletes += 1;
    }

    fn handle_form(&mut self) {
        self.dismissals += 1;
    }
}
