// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reactive rules that keep derived fields and picker annotations in step
//! with the values they depend on.
//!
//! Each rule declares the paths it watches. After every mutation the engine
//! runs, in registration order, each rule whose trigger overlaps a changed
//! path. Rules write through [`FormStore::set_derived`], so their output
//! never queues another pass.

mod coverage;
mod exclusion;
mod history;
mod lookup;

pub use coverage::{OverallCoverage, RowGrade};
pub use exclusion::{CoverageExclusion, KeyOfficerExclusion};
pub use history::BranchHistory;
pub use lookup::RoleLookup;

use crate::options::OptionLists;
use crate::path::FieldPath;
use crate::store::FormStore;
use serde_json::Value;
use tracing::{debug, warn};
use worksheet_domain::{FormMode, ReferenceData};

/// Everything a rule may read or write during a pass.
pub struct RuleContext<'a> {
    /// The form's values.
    pub store: &'a mut FormStore,
    /// The lookup tables.
    pub reference: &'a ReferenceData,
    /// The mode the form is open in.
    pub mode: FormMode,
    /// The annotated picker lists.
    pub options: &'a mut OptionLists,
}

impl RuleContext<'_> {
    /// Writes a derived value, logging rather than propagating failures.
    ///
    /// A rule must never abort the pass, so a write that cannot land (for
    /// example because the tree has an unexpected shape) is dropped.
    pub fn write(&mut self, path: &FieldPath, value: Value) {
        if let Err(err) = self.store.set_derived(path, value) {
            warn!(path = %path, error = %err, "Dropped derived value");
        }
    }

    /// Returns the entries of a sequence, or an empty slice.
    #[must_use]
    pub fn entries(&self, sequence: &str) -> Vec<Value> {
        self.store
            .get(&FieldPath::new(sequence))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }
}

/// A derived-state rule.
pub trait DerivedRule {
    /// A short name used in logs.
    fn name(&self) -> &'static str;

    /// The paths whose changes trigger this rule.
    fn triggers(&self) -> &[FieldPath];

    /// Recomputes the rule's targets from the current state.
    fn recompute(&self, ctx: &mut RuleContext<'_>);
}

/// An ordered list of derived-state rules.
#[derive(Default)]
pub struct RuleEngine {
    rules: Vec<Box<dyn DerivedRule>>,
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.name()))
            .finish()
    }
}

impl RuleEngine {
    /// Creates an engine with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Creates an engine with the worksheet's rules.
    #[must_use]
    pub fn worksheet() -> Self {
        let mut engine: Self = Self::new();
        engine.register(Box::new(KeyOfficerExclusion::new()));
        engine.register(Box::new(CoverageExclusion::new()));
        engine.register(Box::new(RoleLookup::new()));
        engine.register(Box::new(OverallCoverage::new()));
        engine.register(Box::new(RowGrade::new()));
        engine.register(Box::new(BranchHistory::new()));
        engine
    }

    /// Appends a rule. Rules run in registration order.
    pub fn register(&mut self, rule: Box<dyn DerivedRule>) {
        self.rules.push(rule);
    }

    /// Returns the registered rule names, in order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Runs every rule triggered by the given changes.
    ///
    /// Returns the number of rules that ran.
    pub fn evaluate(&self, changes: &[FieldPath], ctx: &mut RuleContext<'_>) -> usize {
        let mut ran: usize = 0;
        for rule in &self.rules {
            let triggered: bool = changes
                .iter()
                .any(|changed| rule.triggers().iter().any(|t| t.overlaps(changed)));
            if triggered {
                debug!(rule = rule.name(), "Recomputing derived state");
                rule.recompute(ctx);
                ran += 1;
            }
        }
        ran
    }

    /// Drains the store's queued changes and runs the triggered rules.
    ///
    /// Returns the number of rules that ran.
    pub fn run(&self, ctx: &mut RuleContext<'_>) -> usize {
        let changes: Vec<FieldPath> = ctx.store.take_changes();
        if changes.is_empty() {
            return 0;
        }
        self.evaluate(&changes, ctx)
    }
}
