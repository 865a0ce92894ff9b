// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{DerivedRule, RuleContext};
use crate::fields;
use crate::path::FieldPath;
use crate::values::{reference, text};
use serde_json::Value;
use worksheet_domain::User;

/// Fills the read-only role and grade fields paired with each user picker.
///
/// An unselected or unknown user yields null display values.
#[derive(Debug)]
pub struct RoleLookup {
    triggers: Vec<FieldPath>,
}

impl RoleLookup {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            triggers: vec![
                FieldPath::new("keyOfficers[*].staffName"),
                FieldPath::new("auditTeams[*].auditorId"),
                FieldPath::new("reviewers[*].reviewer"),
                FieldPath::new(fields::APPROVER),
            ],
        }
    }
}

impl Default for RoleLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl DerivedRule for RoleLookup {
    fn name(&self) -> &'static str {
        "role-lookup"
    }

    fn triggers(&self) -> &[FieldPath] {
        &self.triggers
    }

    fn recompute(&self, ctx: &mut RuleContext<'_>) {
        for (index, entry) in ctx.entries(fields::KEY_OFFICERS).iter().enumerate() {
            let user: Option<User> = reference(entry.get(fields::STAFF_NAME));
            let row: FieldPath = FieldPath::new(fields::KEY_OFFICERS).index(index);
            let grade_level: Value = text(user.as_ref().and_then(|u| u.grade_level.as_deref()));
            let designate: Value = role_of(ctx, user.as_ref());
            ctx.write(&row.clone().key(fields::GRADE_LEVEL), grade_level);
            ctx.write(&row.key(fields::DESIGNATE), designate);
        }

        fill_roles(ctx, fields::AUDIT_TEAMS, fields::AUDITOR_ID, fields::AUDITOR_ROLE);
        fill_roles(ctx, fields::REVIEWERS, fields::REVIEWER, fields::REVIEWER_ROLE);

        let approver: Option<User> = reference(ctx.store.get(&FieldPath::new(fields::APPROVER)));
        let role: Value = role_of(ctx, approver.as_ref());
        ctx.write(&FieldPath::new(fields::APPROVER_ROLE), role);
    }
}

fn fill_roles(ctx: &mut RuleContext<'_>, sequence: &str, user_field: &str, role_field: &str) {
    for (index, entry) in ctx.entries(sequence).iter().enumerate() {
        let user: Option<User> = reference(entry.get(user_field));
        let role: Value = role_of(ctx, user.as_ref());
        ctx.write(&FieldPath::new(sequence).index(index).key(role_field), role);
    }
}

fn role_of(ctx: &RuleContext<'_>, user: Option<&User>) -> Value {
    text(
        user.and_then(|u| u.designate.as_deref())
            .and_then(|d| ctx.reference.designate_name(d)),
    )
}
