// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{DerivedRule, RuleContext};
use crate::fields;
use crate::path::FieldPath;
use crate::values::reference;
use serde_json::Value;
use worksheet_domain::{Branch, FormMode, PriorWorksheet};

/// Narrows the last audit visit candidates to the selected branch.
///
/// In create mode a branch change also clears the chosen last audit visit,
/// since it may belong to the previous branch.
#[derive(Debug)]
pub struct BranchHistory {
    triggers: Vec<FieldPath>,
}

impl BranchHistory {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            triggers: vec![FieldPath::new(fields::BRANCH_ID)],
        }
    }
}

impl Default for BranchHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl DerivedRule for BranchHistory {
    fn name(&self) -> &'static str {
        "branch-history"
    }

    fn triggers(&self) -> &[FieldPath] {
        &self.triggers
    }

    fn recompute(&self, ctx: &mut RuleContext<'_>) {
        let branch: Option<Branch> = reference(ctx.store.get(&FieldPath::new(fields::BRANCH_ID)));

        ctx.options.last_audit_visits = branch.map_or_else(Vec::new, |b| {
            ctx.reference
                .worksheets_for_branch(&b.branch_id)
                .into_iter()
                .cloned()
                .collect::<Vec<PriorWorksheet>>()
        });

        if ctx.mode == FormMode::Create {
            ctx.write(&FieldPath::new(fields::LAST_AUDIT_VISIT), Value::Null);
        }
    }
}
