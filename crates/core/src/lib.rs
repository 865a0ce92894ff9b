// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod access;
mod apply;
mod command;
mod error;
pub mod fields;
mod options;
mod path;
pub mod rules;
mod steps;
mod store;
mod template;
mod validator;
pub mod values;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use access::{FieldAccess, field_access, is_derived};
pub use apply::{Transition, apply};
pub use command::Command;
pub use error::CoreError;
pub use options::{OptionLists, SelectOption, job_stay_month_options, job_stay_year_options};
pub use path::{FieldPath, Segment};
pub use rules::{DerivedRule, RuleContext, RuleEngine};
pub use steps::{Step, register_all_validators};
pub use store::{FormStore, WatchHandle};
pub use template::blank_tree;
pub use validator::{FieldError, FieldErrorKind, Rule};
