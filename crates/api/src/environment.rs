// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use worksheet_audit::Actor;

/// Who is using the form and from where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEnvironment {
    /// The signed-in user.
    pub initiator: String,
    /// The workstation name.
    pub workstation: String,
}

impl Default for FormEnvironment {
    fn default() -> Self {
        Self {
            initiator: String::from("user_id"),
            workstation: String::from("workstation"),
        }
    }
}

impl FormEnvironment {
    /// Creates an environment.
    #[must_use]
    pub const fn new(initiator: String, workstation: String) -> Self {
        Self {
            initiator,
            workstation,
        }
    }

    /// Returns the audit actor for submissions made in this environment.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.initiator.clone(), self.workstation.clone())
    }
}
