// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{DerivedRule, RuleContext};
use crate::fields;
use crate::path::FieldPath;
use crate::values::{as_number, number};
use serde_json::Value;
use worksheet_domain::{Grade, mean_percent};

fn percent_of(entry: &Value) -> Option<f64> {
    entry.get(fields::APPROACH_PERCENT).and_then(as_number)
}

/// Keeps `overallCoverage` at the mean of every approach percentage and
/// grades it.
///
/// Unfilled or unparsable percentages count as 0. With no approaches the
/// coverage is null.
#[derive(Debug)]
pub struct OverallCoverage {
    triggers: Vec<FieldPath>,
}

impl OverallCoverage {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            triggers: vec![FieldPath::new(fields::APPROACHES)],
        }
    }
}

impl Default for OverallCoverage {
    fn default() -> Self {
        Self::new()
    }
}

impl DerivedRule for OverallCoverage {
    fn name(&self) -> &'static str {
        "overall-coverage"
    }

    fn triggers(&self) -> &[FieldPath] {
        &self.triggers
    }

    fn recompute(&self, ctx: &mut RuleContext<'_>) {
        let percents: Vec<Option<f64>> = ctx
            .entries(fields::APPROACHES)
            .iter()
            .map(percent_of)
            .collect();
        let overall: Option<f64> = mean_percent(&percents);
        let grade: Grade = Grade::from_percent(overall);

        ctx.write(
            &FieldPath::new(fields::OVERALL_COVERAGE),
            overall.map_or(Value::Null, number),
        );
        ctx.write(
            &FieldPath::new(fields::OVERALL_COVERAGE_GRADE),
            Value::String(grade.as_str().to_string()),
        );
    }
}

/// Grades each approach row from its own percentage.
#[derive(Debug)]
pub struct RowGrade {
    triggers: Vec<FieldPath>,
}

impl RowGrade {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            triggers: vec![FieldPath::new("approaches[*].approachPercent")],
        }
    }
}

impl Default for RowGrade {
    fn default() -> Self {
        Self::new()
    }
}

impl DerivedRule for RowGrade {
    fn name(&self) -> &'static str {
        "row-grade"
    }

    fn triggers(&self) -> &[FieldPath] {
        &self.triggers
    }

    fn recompute(&self, ctx: &mut RuleContext<'_>) {
        for (index, entry) in ctx.entries(fields::APPROACHES).iter().enumerate() {
            let grade: Grade = Grade::from_percent(percent_of(entry));
            let path: FieldPath = FieldPath::new(fields::APPROACHES)
                .index(index)
                .key(fields::APPROACH_GRADE);
            ctx.write(&path, Value::String(grade.as_str().to_string()));
        }
    }
}
