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
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assemble;
mod container;
mod environment;
mod error;
mod record;
mod resolve;
mod sink;

#[cfg(test)]
mod tests;

pub use assemble::assemble;
pub use container::{FormContainer, HeaderAction};
pub use environment::FormEnvironment;
pub use error::{ApiError, AssemblyError};
pub use record::{
    ApproachRecord, AuditTeamRecord, CoverageRecord, KeyOfficerRecord, ObjectiveRecord,
    ReviewerRecord, WorksheetRecord,
};
pub use resolve::resolve;
pub use sink::WorksheetSink;
