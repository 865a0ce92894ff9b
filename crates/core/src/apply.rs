// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::access::field_access;
use crate::command::Command;
use crate::error::CoreError;
use crate::fields;
use crate::path::{FieldPath, Segment};
use crate::rules::{RuleContext, RuleEngine};
use serde_json::Value;
use tracing::{debug, info, warn};

/// The outcome of applying a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The command that was applied.
    pub command: Command,
    /// The index of the appended entry, for `Append`.
    pub appended: Option<usize>,
    /// The entry removed, for `Remove`.
    pub removed: Option<Value>,
    /// How many rules recomputed derived state afterwards.
    pub rules_run: usize,
}

/// Applies a command to an open form and brings derived state up to date.
///
/// # Arguments
///
/// * `engine` - The rules to run after the mutation
/// * `ctx` - The form state, lookup tables, mode and picker lists
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(Transition)` describing what changed
/// * `Err(CoreError)` if the command is not permitted; the state is untouched
///
/// # Errors
///
/// Returns an error if:
/// - The target field is read-only in the current mode
/// - A sequence is edited outside create or edit mode
/// - The chosen option is already taken elsewhere
/// - The path does not fit the shape of the tree
pub fn apply(
    engine: &RuleEngine,
    ctx: &mut RuleContext<'_>,
    command: Command,
) -> Result<Transition, CoreError> {
    let path: &FieldPath = command.path();
    let mut appended: Option<usize> = None;
    let mut removed: Option<Value> = None;

    match &command {
        Command::Set { path, value } | Command::ResetSubtree { path, value } => {
            if !field_access(ctx.mode, path).is_editable() {
                return Err(read_only(path, ctx));
            }
            if let Some(key) =
                ctx.options
                    .conflicting_selection(path, value, ctx.store.get(path))
            {
                return Err(CoreError::OptionDisabled {
                    path: path.to_string(),
                    key,
                });
            }
            if matches!(command, Command::Set { .. }) {
                ctx.store.set(path, value.clone())?;
            } else {
                ctx.store.reset_subtree(path, value.clone())?;
            }
        }
        Command::Append { path } => {
            check_sequence_edit(path, ctx)?;
            appended = Some(ctx.store.append_to_sequence(path)?);
        }
        Command::Remove { path, index } => {
            check_sequence_edit(path, ctx)?;
            match ctx.store.remove_from_sequence(path, *index) {
                Ok(entry) => removed = Some(entry),
                Err(err) => {
                    warn!(path = %path, index, error = %err, "Refused sequence removal");
                    return Err(err);
                }
            }
        }
    }

    debug!(command = command.name(), path = %path, "Applied command");
    let rules_run: usize = engine.run(ctx);
    if appended.is_some() || removed.is_some() {
        info!(command = command.name(), path = %path, "Sequence changed");
    }

    Ok(Transition {
        command,
        appended,
        removed,
        rules_run,
    })
}

fn check_sequence_edit(path: &FieldPath, ctx: &RuleContext<'_>) -> Result<(), CoreError> {
    let is_sequence: bool = matches!(
        path.segments(),
        [Segment::Key(name)] if fields::SEQUENCES.contains(&name.as_str())
    );
    if !is_sequence {
        return Err(CoreError::InvalidPath(path.to_string()));
    }
    if !ctx.mode.allows_sequence_editing() {
        return Err(read_only(path, ctx));
    }
    Ok(())
}

fn read_only(path: &FieldPath, ctx: &RuleContext<'_>) -> CoreError {
    CoreError::ReadOnlyField {
        path: path.to_string(),
        mode: ctx.mode,
    }
}
