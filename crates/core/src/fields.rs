// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field names of the worksheet form tree.

pub const WORKSHEET_ID: &str = "worksheetId";
pub const BRANCH_ID: &str = "branchId";
pub const START_MONTH: &str = "startMonth";
pub const START_YEAR: &str = "startYear";
pub const END_MONTH: &str = "endMonth";
pub const END_YEAR: &str = "endYear";
pub const VISIT_PERIOD_START: &str = "visitPeriodStart";
pub const VISIT_PERIOD_END: &str = "visitPeriodEnd";
pub const EXIT_MEETING_DATE: &str = "exitMeetingDate";
pub const INSPECTION_TYPE: &str = "inspectionType";
pub const LAST_AUDIT_VISIT: &str = "lastAuditVisit";
pub const AUDIT_INTRO: &str = "auditIntro";

pub const KEY_OFFICERS: &str = "keyOfficers";
pub const STAFF_NAME: &str = "staffName";
pub const GRADE_LEVEL: &str = "gradeLevel";
pub const DESIGNATE: &str = "designate";
pub const DATE_JOIN: &str = "dateJoin";
pub const JOB_STAY_YEAR: &str = "jobStayYear";
pub const JOB_STAY_MONTH: &str = "jobStayMonth";

pub const AUDIT_TEAMS: &str = "auditTeams";
pub const AUDITOR_ID: &str = "auditorId";
pub const AUDITOR_ROLE: &str = "auditorRole";
pub const COVERAGES: &str = "coverages";

pub const REVIEWERS: &str = "reviewers";
pub const REVIEWER: &str = "reviewer";
pub const REVIEWER_ROLE: &str = "reviewerRole";

pub const APPROVER: &str = "approver";
pub const APPROVER_ROLE: &str = "approverRole";

pub const AUDIT_OBJECTIVES: &str = "auditObjectives";
pub const OBJECTIVE: &str = "objective";
pub const OTHER_OBJECTIVES: &str = "otherObjectives";

pub const APPROACH_DETAIL: &str = "approachDetail";
pub const APPROACHES: &str = "approaches";
pub const APPROACH: &str = "approach";
pub const APPROACH_PERCENT: &str = "approachPercent";
pub const APPROACH_GRADE: &str = "approachGrade";
pub const OVERALL_COVERAGE: &str = "overallCoverage";
pub const OVERALL_COVERAGE_GRADE: &str = "overallCoverageGrade";

pub const WORKSHEET_STATUS: &str = "worksheetStatus";
pub const DATE_INITIATED: &str = "dateInitiated";
pub const RECORD_DATE: &str = "recordDate";
pub const RECORD_TIME: &str = "recordTime";
pub const INITIATOR: &str = "initiator";
pub const WORKSTATION: &str = "workstation";
pub const OPERATION: &str = "operation";
pub const RECORD_COUNTER: &str = "recordCounter";

/// Sequences that always hold at least one entry.
pub const SEQUENCES: [&str; 5] = [
    KEY_OFFICERS,
    AUDIT_TEAMS,
    REVIEWERS,
    AUDIT_OBJECTIVES,
    APPROACHES,
];

/// Fields computed by the form and never typed in.
pub const DERIVED: [&str; 16] = [
    WORKSHEET_ID,
    GRADE_LEVEL,
    DESIGNATE,
    AUDITOR_ROLE,
    REVIEWER_ROLE,
    APPROVER_ROLE,
    APPROACH_GRADE,
    OVERALL_COVERAGE,
    OVERALL_COVERAGE_GRADE,
    DATE_INITIATED,
    RECORD_DATE,
    RECORD_TIME,
    INITIATOR,
    WORKSTATION,
    OPERATION,
    RECORD_COUNTER,
];
