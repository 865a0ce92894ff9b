// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::fields;
use serde_json::{Map, Value, json};

/// Returns the tree of a blank worksheet.
///
/// Every sequence holds one empty entry and the record counter starts at 0.
/// Identity and audit-trail display values are filled in by the caller.
#[must_use]
pub fn blank_tree() -> Value {
    let mut tree: Map<String, Value> = Map::new();
    for field in [
        fields::WORKSHEET_ID,
        fields::BRANCH_ID,
        fields::START_MONTH,
        fields::START_YEAR,
        fields::END_MONTH,
        fields::END_YEAR,
        fields::VISIT_PERIOD_START,
        fields::VISIT_PERIOD_END,
        fields::EXIT_MEETING_DATE,
        fields::INSPECTION_TYPE,
        fields::LAST_AUDIT_VISIT,
        fields::AUDIT_INTRO,
        fields::APPROVER,
        fields::APPROVER_ROLE,
        fields::OTHER_OBJECTIVES,
        fields::APPROACH_DETAIL,
        fields::OVERALL_COVERAGE,
        fields::OVERALL_COVERAGE_GRADE,
        fields::WORKSHEET_STATUS,
    ] {
        tree.insert(field.to_string(), Value::Null);
    }
    for sequence in fields::SEQUENCES {
        tree.insert(sequence.to_string(), json!([{}]));
    }
    tree.insert(fields::RECORD_COUNTER.to_string(), json!(0));
    Value::Object(tree)
}
