// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{DerivedRule, RuleContext};
use crate::fields;
use crate::path::FieldPath;
use crate::values::{encode, reference};
use std::collections::HashSet;
use tracing::warn;
use worksheet_domain::{KeyedEntry, User};

/// Disables every user already chosen as a key officer.
#[derive(Debug)]
pub struct KeyOfficerExclusion {
    triggers: Vec<FieldPath>,
}

impl KeyOfficerExclusion {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            triggers: vec![FieldPath::new(fields::KEY_OFFICERS)],
        }
    }
}

impl Default for KeyOfficerExclusion {
    fn default() -> Self {
        Self::new()
    }
}

impl DerivedRule for KeyOfficerExclusion {
    fn name(&self) -> &'static str {
        "key-officer-exclusion"
    }

    fn triggers(&self) -> &[FieldPath] {
        &self.triggers
    }

    fn recompute(&self, ctx: &mut RuleContext<'_>) {
        let chosen: HashSet<String> = ctx
            .entries(fields::KEY_OFFICERS)
            .iter()
            .filter_map(|entry| reference::<User>(entry.get(fields::STAFF_NAME)))
            .map(|user| user.userid)
            .collect();

        for option in &mut ctx.options.key_officer_users {
            option.disabled = chosen.contains(&option.value.userid);
        }
    }
}

/// Disables every coverage area already owned by a team member.
///
/// Ownership is global across the team: once any member holds an area, no
/// other member can pick it. The ownership set is rebuilt from scratch on
/// every pass, and if two entries somehow hold the same area the earlier
/// entry keeps it.
#[derive(Debug)]
pub struct CoverageExclusion {
    triggers: Vec<FieldPath>,
}

impl CoverageExclusion {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            triggers: vec![FieldPath::new(fields::AUDIT_TEAMS)],
        }
    }
}

impl Default for CoverageExclusion {
    fn default() -> Self {
        Self::new()
    }
}

impl DerivedRule for CoverageExclusion {
    fn name(&self) -> &'static str {
        "coverage-exclusion"
    }

    fn triggers(&self) -> &[FieldPath] {
        &self.triggers
    }

    fn recompute(&self, ctx: &mut RuleContext<'_>) {
        let mut owned: HashSet<String> = HashSet::new();

        for (index, entry) in ctx.entries(fields::AUDIT_TEAMS).iter().enumerate() {
            let Some(coverages) = reference::<Vec<KeyedEntry>>(entry.get(fields::COVERAGES))
            else {
                continue;
            };
            let held: usize = coverages.len();
            let kept: Vec<KeyedEntry> = coverages
                .into_iter()
                .filter(|c| owned.insert(c.key.clone()))
                .collect();
            if kept.len() != held {
                warn!(index, "Dropped coverage areas already owned by another member");
                let path: FieldPath = FieldPath::new(fields::AUDIT_TEAMS)
                    .index(index)
                    .key(fields::COVERAGES);
                ctx.write(&path, encode(&kept));
            }
        }

        for option in &mut ctx.options.coverage_areas {
            option.disabled = owned.contains(&option.value.key);
        }
    }
}
