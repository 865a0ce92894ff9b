// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::values::encode;
use crate::{
    Command, CoreError, FieldPath, FormStore, OptionLists, RuleContext, RuleEngine, Transition,
    apply, blank_tree,
};
use serde_json::Value;
use worksheet_domain::{FormMode, ReferenceData};

pub const REFERENCE_BUNDLE: &str = r#"{
    "branches": [
        { "branchId": "B01", "branchName": "Head Office" },
        { "branchId": "B02", "branchName": "Marina" }
    ],
    "months": [{ "monthName": "January" }, { "monthName": "June" }],
    "years": [{ "auditYear": "2024" }],
    "inspectionTypes": [{ "key": "ROUTINE", "description": "Routine inspection" }],
    "objectives": [{ "key": "OBJ_1", "description": "Compliance" }],
    "coverageAreas": [
        { "key": "AREA_A", "description": "Cash" },
        { "key": "AREA_B", "description": "Loans" },
        { "key": "AREA_C", "description": "Treasury" },
        { "key": "APP_1", "description": "Sampling" }
    ],
    "workflowStates": [
        { "key": "NEW", "description": "New" },
        { "key": "APPROVED", "description": "Approved" }
    ],
    "users": [
        { "userid": "U1", "title": "Mr", "firstName": "Ade", "lastNamme": "Bello",
          "branchId": "B01", "gradeLevel": "GL08", "designate": "D1" },
        { "userid": "U2", "title": "Ms", "firstName": "Ife", "lastName": "Obi",
          "branchId": "B01", "gradeLevel": "GL10", "designate": "D2" },
        { "userid": "U3", "title": "Dr", "firstName": "Tolu", "lastName": "Ade",
          "gradeLevel": "GL12", "designate": "D3" },
        { "userid": "U4", "title": "Mrs", "firstName": "Bisi", "lastName": "Eze",
          "gradeLevel": "GL14", "designate": "D4" },
        { "userid": "U5", "title": "Mr", "firstName": "Kay", "lastName": "Olu",
          "designate": "D99" }
    ],
    "designates": [
        { "designate_id": "D1", "designate_name": "Branch Manager" },
        { "designate_id": "D2", "designate_name": "Senior Auditor" },
        { "designate_id": "D3", "designate_name": "Audit Reviewer" },
        { "designate_id": "D4", "designate_name": "Chief Auditor" }
    ],
    "worksheets": [
        { "worksheetId": "WK1", "branchId": "B01", "inspectionType": "ROUTINE" },
        { "worksheetId": "WK2", "branchId": "B02", "inspectionType": "ROUTINE" },
        { "worksheetId": "WK3", "branchId": "B01", "inspectionType": "SPOT" }
    ]
}"#;

pub fn create_test_reference() -> ReferenceData {
    ReferenceData::from_json(REFERENCE_BUNDLE).unwrap()
}

pub fn user_value(reference: &ReferenceData, userid: &str) -> Value {
    encode(reference.user(userid).unwrap())
}

pub fn branch_value(reference: &ReferenceData, branch_id: &str) -> Value {
    encode(reference.branch(branch_id).unwrap())
}

pub fn coverage_value(reference: &ReferenceData, keys: &[&str]) -> Value {
    let areas: Vec<_> = keys
        .iter()
        .map(|k| reference.coverage_area(k).unwrap().clone())
        .collect();
    encode(&areas)
}

pub fn path(path: &str) -> FieldPath {
    path.parse().unwrap()
}

/// An open form wired the way the container wires it.
pub struct TestForm {
    pub store: FormStore,
    pub options: OptionLists,
    pub engine: RuleEngine,
    pub reference: ReferenceData,
    pub mode: FormMode,
}

impl TestForm {
    pub fn open(mode: FormMode) -> Self {
        Self::open_with(mode, blank_tree())
    }

    pub fn open_with(mode: FormMode, tree: Value) -> Self {
        let reference: ReferenceData = create_test_reference();
        let mut form: Self = Self {
            store: FormStore::new(),
            options: OptionLists::new(&reference),
            engine: RuleEngine::worksheet(),
            reference,
            mode,
        };
        form.store.reset_all(tree);
        form.run_rules();
        form
    }

    pub fn run_rules(&mut self) -> usize {
        let mut ctx: RuleContext<'_> = RuleContext {
            store: &mut self.store,
            reference: &self.reference,
            mode: self.mode,
            options: &mut self.options,
        };
        self.engine.run(&mut ctx)
    }

    pub fn apply(&mut self, command: Command) -> Result<Transition, CoreError> {
        let mut ctx: RuleContext<'_> = RuleContext {
            store: &mut self.store,
            reference: &self.reference,
            mode: self.mode,
            options: &mut self.options,
        };
        apply(&self.engine, &mut ctx, command)
    }

    pub fn set(&mut self, at: &str, value: Value) -> Result<Transition, CoreError> {
        self.apply(Command::Set {
            path: path(at),
            value,
        })
    }

    pub fn value(&self, at: &str) -> Value {
        self.store.get(&path(at)).cloned().unwrap_or(Value::Null)
    }
}
