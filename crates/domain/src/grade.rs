// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Letter grade awarded to a coverage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Grade {
    /// 80 to 100 inclusive.
    A,
    /// 60 to 79 inclusive.
    B,
    /// 30 to 59 inclusive.
    C,
    /// 29 or below.
    Fail,
    /// Missing, not a number, above 100, or inside a band gap.
    #[default]
    #[serde(rename = "No grade")]
    NoGrade,
}

impl Grade {
    /// Grades a percentage.
    ///
    /// The bands are closed integer ranges, so fractional values between
    /// two bands (for example 79.5) fall through to `NoGrade`. Negative
    /// values satisfy the `<= 29` band and grade as `Fail`.
    #[must_use]
    pub fn from_percent(percent: Option<f64>) -> Self {
        match percent {
            Some(p) if (80.0..=100.0).contains(&p) => Self::A,
            Some(p) if (60.0..=79.0).contains(&p) => Self::B,
            Some(p) if (30.0..=59.0).contains(&p) => Self::C,
            Some(p) if p <= 29.0 => Self::Fail,
            _ => Self::NoGrade,
        }
    }

    /// Returns the label shown in the grade field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::Fail => "Fail",
            Self::NoGrade => "No grade",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Arithmetic mean of a sequence of percentages.
///
/// Missing entries count as 0. Returns `None` for an empty sequence.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_percent(values: &[Option<f64>]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|v| v.unwrap_or(0.0)).sum();
    Some(sum / values.len() as f64)
}
