// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::path;
use crate::{FieldError, FormStore, Step, blank_tree, register_all_validators};
use serde_json::json;

#[test]
fn test_navigation_clamps_at_both_ends() {
    assert_eq!(Step::Introduction.previous(), Step::Introduction);
    assert_eq!(Step::Introduction.next(), Step::KeyOfficers);
    assert_eq!(Step::Approaches.next(), Step::AuditLog);
    assert_eq!(Step::AuditLog.next(), Step::AuditLog);
    assert_eq!(Step::AuditLog.previous(), Step::Approaches);
}

#[test]
fn test_steps_are_in_tab_order() {
    for (i, step) in Step::ALL.iter().enumerate() {
        assert_eq!(step.index(), i);
        assert_eq!(Step::from_index(i), Some(*step));
    }
    assert_eq!(Step::from_index(6), None);
    assert_eq!(Step::AuditLog.title(), "Audit Log and Status");
}

#[test]
fn test_blank_form_reports_required_fields() {
    let mut store: FormStore = FormStore::new();
    store.reset_all(blank_tree());
    register_all_validators(&mut store);

    let errors: Vec<FieldError> = store.validate().unwrap_err();
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();

    assert!(messages.contains(&"Branch name is required!"));
    assert!(messages.contains(&"Staff Name is required!"));
    assert!(messages.contains(&"Inspection Area is required!"));
    assert!(messages.contains(&"Objective is required!"));
    assert!(messages.contains(&"Approach Percent is required!"));
    assert!(messages.contains(&"Worksheet Status is required!"));
    assert_eq!(
        store
            .error(&path("approver"))
            .map(|e| e.message.as_str()),
        Some("Approver is required!")
    );
}

#[test]
fn test_job_stay_bounds() {
    let mut store: FormStore = FormStore::new();
    store.reset_all(json!({
        "keyOfficers": [{ "jobStayYear": 26, "jobStayMonth": 11 }]
    }));
    Step::KeyOfficers.register_validators(&mut store);
    let _ = store.validate();

    assert_eq!(
        store
            .error(&path("keyOfficers[0].jobStayYear"))
            .map(|e| e.message.as_str()),
        Some("Max value is 25!")
    );
    assert_eq!(
        store
            .error(&path("keyOfficers[0].jobStayMonth"))
            .map(|e| e.message.as_str()),
        Some("Max value is 10!")
    );
}

#[test]
fn test_blank_tree_holds_one_entry_per_sequence() {
    let mut store: FormStore = FormStore::new();
    store.reset_all(blank_tree());
    for sequence in crate::fields::SEQUENCES {
        assert_eq!(store.sequence_len(&path(sequence)), 1);
    }
    assert_eq!(store.get(&path("recordCounter")), Some(&json!(0)));
}

#[test]
fn test_key_officer_messages_and_optional_intro() {
    let mut store: FormStore = FormStore::new();
    store.reset_all(blank_tree());
    register_all_validators(&mut store);
    let _ = store.validate();

    let message = |field: &str| store.error(&path(field)).map(|e| e.message.clone());
    assert_eq!(
        message("keyOfficers[0].dateJoin").as_deref(),
        Some("Length of Stay is required!")
    );
    assert_eq!(
        message("keyOfficers[0].jobStayMonth").as_deref(),
        Some("Job Stay Month is required!")
    );
    assert_eq!(message("auditIntro"), None);
}
