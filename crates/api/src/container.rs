// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The form container: one open worksheet form and its lifecycle.

use crate::assemble::assemble;
use crate::environment::FormEnvironment;
use crate::error::ApiError;
use crate::record::WorksheetRecord;
use crate::resolve::resolve;
use crate::sink::WorksheetSink;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::info;
use worksheet::values::{encode, is_blank};
use worksheet::{
    Command, CoreError, FieldPath, FormStore, OptionLists, RuleContext, RuleEngine, Step,
    Transition, apply, blank_tree, field_access, fields, register_all_validators,
};
use worksheet_audit::Actor;
use worksheet_domain::{
    FormMode, KeyedEntry, ReferenceData, format_display_date, format_display_time,
    generate_worksheet_id,
};

/// The workflow state a new worksheet starts in.
const NEW_STATUS: &str = "New";

/// The main action offered in the form header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    /// Submit the form.
    Save {
        /// Whether the button accepts clicks.
        enabled: bool,
    },
    /// Delete the loaded worksheet.
    Delete,
}

/// State of the currently open form. Dropped on close or reopen.
#[derive(Debug)]
struct Session {
    mode: FormMode,
    tab: Step,
    store: FormStore,
    options: OptionLists,
}

/// Hosts a worksheet form over a set of reference tables.
///
/// Opening the form, in any mode, discards whatever was open before.
#[derive(Debug)]
pub struct FormContainer<'a> {
    reference: &'a ReferenceData,
    environment: FormEnvironment,
    engine: RuleEngine,
    session: Option<Session>,
}

impl<'a> FormContainer<'a> {
    /// Creates a closed container.
    #[must_use]
    pub fn new(reference: &'a ReferenceData, environment: FormEnvironment) -> Self {
        Self {
            reference,
            environment,
            engine: RuleEngine::worksheet(),
            session: None,
        }
    }

    /// Opens the form in a mode.
    ///
    /// Create mode starts from a blank worksheet with a fresh id. The other
    /// modes load `selected`. Either way the first tab is shown and every
    /// derived field is computed before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if a loading mode has no worksheet to load, or the
    /// clock cannot be formatted.
    pub fn open(
        &mut self,
        mode: FormMode,
        selected: Option<&WorksheetRecord>,
        now: OffsetDateTime,
    ) -> Result<(), ApiError> {
        let mut tree: Value = if mode.loads_existing() {
            let record: &WorksheetRecord = selected.ok_or(ApiError::MissingRecord(mode))?;
            resolve(record, self.reference)
        } else {
            let mut tree: Value = blank_tree();
            tree[fields::WORKSHEET_ID] = Value::String(generate_worksheet_id(now)?);
            tree[fields::WORKSHEET_STATUS] = new_status(self.reference);
            tree
        };
        self.fill_display_defaults(&mut tree, mode, now)?;

        let mut store: FormStore = FormStore::new();
        register_all_validators(&mut store);
        store.reset_all(tree);

        self.session = Some(Session {
            mode,
            tab: Step::default(),
            store,
            options: OptionLists::new(self.reference),
        });
        self.run_rules()?;

        info!(mode = %mode, "Opened worksheet form");
        Ok(())
    }

    /// Closes the form, discarding its state.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            info!("Closed worksheet form");
        }
    }

    /// Returns whether a form is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the mode of the open form.
    #[must_use]
    pub fn mode(&self) -> Option<FormMode> {
        self.session.as_ref().map(|s| s.mode)
    }

    /// Returns the selected tab.
    #[must_use]
    pub fn tab(&self) -> Option<Step> {
        self.session.as_ref().map(|s| s.tab)
    }

    /// Returns the open form's store.
    #[must_use]
    pub fn store(&self) -> Option<&FormStore> {
        self.session.as_ref().map(|s| &s.store)
    }

    /// Returns the open form's picker lists.
    #[must_use]
    pub fn options(&self) -> Option<&OptionLists> {
        self.session.as_ref().map(|s| &s.options)
    }

    /// Reads a field of the open form.
    #[must_use]
    pub fn value(&self, path: &str) -> Option<&Value> {
        self.store().and_then(|s| s.get(&FieldPath::new(path)))
    }

    /// Selects a tab.
    ///
    /// # Errors
    ///
    /// Returns an error if no form is open.
    pub fn select_tab(&mut self, step: Step) -> Result<(), ApiError> {
        self.session_mut()?.tab = step;
        Ok(())
    }

    /// Moves to the next tab, staying on the last.
    ///
    /// # Errors
    ///
    /// Returns an error if no form is open.
    pub fn next_tab(&mut self) -> Result<Step, ApiError> {
        let session: &mut Session = self.session_mut()?;
        session.tab = session.tab.next();
        Ok(session.tab)
    }

    /// Moves to the previous tab, staying on the first.
    ///
    /// # Errors
    ///
    /// Returns an error if no form is open.
    pub fn previous_tab(&mut self) -> Result<Step, ApiError> {
        let session: &mut Session = self.session_mut()?;
        session.tab = session.tab.previous();
        Ok(session.tab)
    }

    /// Returns whether a field accepts input right now.
    ///
    /// On top of the mode rules, the last audit visit stays disabled until
    /// a branch is chosen.
    #[must_use]
    pub fn is_editable(&self, path: &FieldPath) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        if path.leaf_key() == Some(fields::LAST_AUDIT_VISIT)
            && is_blank(session.store.get(&FieldPath::new(fields::BRANCH_ID)))
        {
            return false;
        }
        field_access(session.mode, path).is_editable()
    }

    /// Applies a command to the open form.
    ///
    /// # Errors
    ///
    /// Returns an error if no form is open or the form refuses the command.
    pub fn apply(&mut self, command: Command) -> Result<Transition, ApiError> {
        if let Command::Set { path, .. } | Command::ResetSubtree { path, .. } = &command
            && !self.is_editable(path)
        {
            let mode: FormMode = self.mode().ok_or(ApiError::NotOpen)?;
            return Err(CoreError::ReadOnlyField {
                path: path.to_string(),
                mode,
            }
            .into());
        }

        let reference: &ReferenceData = self.reference;
        let engine: &RuleEngine = &self.engine;
        let session: &mut Session = self.session.as_mut().ok_or(ApiError::NotOpen)?;
        let mut ctx: RuleContext<'_> = RuleContext {
            store: &mut session.store,
            reference,
            mode: session.mode,
            options: &mut session.options,
        };
        Ok(apply(engine, &mut ctx, command)?)
    }

    /// Writes a field.
    ///
    /// # Errors
    ///
    /// See [`FormContainer::apply`]; a malformed path is refused as well.
    pub fn set(&mut self, path: &str, value: Value) -> Result<Transition, ApiError> {
        let path: FieldPath = path.parse()?;
        self.apply(Command::Set { path, value })
    }

    /// Appends an empty entry to a sequence.
    ///
    /// # Errors
    ///
    /// See [`FormContainer::apply`].
    pub fn append(&mut self, sequence: &str) -> Result<Transition, ApiError> {
        let path: FieldPath = sequence.parse()?;
        self.apply(Command::Append { path })
    }

    /// Removes an entry from a sequence.
    ///
    /// # Errors
    ///
    /// See [`FormContainer::apply`].
    pub fn remove(&mut self, sequence: &str, index: usize) -> Result<Transition, ApiError> {
        let path: FieldPath = sequence.parse()?;
        self.apply(Command::Remove { path, index })
    }

    /// Returns the main header action for the open form.
    #[must_use]
    pub fn header_action(&self) -> Option<HeaderAction> {
        self.mode().map(|mode| match mode {
            FormMode::Delete => HeaderAction::Delete,
            FormMode::View => HeaderAction::Save { enabled: false },
            FormMode::Create | FormMode::Edit => HeaderAction::Save { enabled: true },
        })
    }

    /// Submits the open form.
    ///
    /// The form is validated and assembled first; if that fails the errors
    /// stay on the store and the sink is not called. After a successful
    /// submit the form is reset to a blank worksheet in the same mode.
    ///
    /// # Errors
    ///
    /// Returns an error if no form is open, the mode is view, or the form
    /// does not validate.
    pub fn submit(
        &mut self,
        now: OffsetDateTime,
        sink: &mut impl WorksheetSink,
    ) -> Result<WorksheetRecord, ApiError> {
        let actor: Actor = self.environment.actor();
        let session: &mut Session = self.session.as_mut().ok_or(ApiError::NotOpen)?;
        let mode: FormMode = session.mode;
        if mode == FormMode::View {
            return Err(ApiError::ActionUnavailable {
                action: "Save",
                mode,
            });
        }

        let record: WorksheetRecord = assemble(&mut session.store, mode, &actor, now)?;
        sink.submit_form(&record, mode);
        info!(
            worksheet_id = %record.worksheet_id,
            mode = %mode,
            "Submitted worksheet"
        );

        self.reset_blank(now)?;
        Ok(record)
    }

    /// Deletes the loaded worksheet through the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if no form is open or the form is not in delete mode.
    pub fn delete(&mut self, sink: &mut impl WorksheetSink) -> Result<(), ApiError> {
        let mode: FormMode = self.mode().ok_or(ApiError::NotOpen)?;
        if mode != FormMode::Delete {
            return Err(ApiError::ActionUnavailable {
                action: "Delete",
                mode,
            });
        }
        sink.delete_data();
        info!(
            worksheet_id = ?self.value(fields::WORKSHEET_ID),
            "Deleted worksheet"
        );
        Ok(())
    }

    /// Dismisses the form through the sink and closes it.
    pub fn cancel(&mut self, sink: &mut impl WorksheetSink) {
        sink.handle_form();
        info!("Cancelled worksheet form");
        self.close();
    }

    fn session_mut(&mut self) -> Result<&mut Session, ApiError> {
        self.session.as_mut().ok_or(ApiError::NotOpen)
    }

    fn run_rules(&mut self) -> Result<usize, ApiError> {
        let reference: &ReferenceData = self.reference;
        let engine: &RuleEngine = &self.engine;
        let session: &mut Session = self.session.as_mut().ok_or(ApiError::NotOpen)?;
        let mut ctx: RuleContext<'_> = RuleContext {
            store: &mut session.store,
            reference,
            mode: session.mode,
            options: &mut session.options,
        };
        Ok(engine.run(&mut ctx))
    }

    /// Replaces the open form's values with a blank worksheet.
    fn reset_blank(&mut self, now: OffsetDateTime) -> Result<(), ApiError> {
        let mode: FormMode = self.mode().ok_or(ApiError::NotOpen)?;
        let mut tree: Value = blank_tree();
        if mode == FormMode::Create {
            tree[fields::WORKSHEET_ID] = Value::String(generate_worksheet_id(now)?);
            tree[fields::WORKSHEET_STATUS] = new_status(self.reference);
        }
        self.fill_display_defaults(&mut tree, mode, now)?;

        let options: OptionLists = OptionLists::new(self.reference);
        let session: &mut Session = self.session_mut()?;
        session.store.reset_all(tree);
        session.options = options;
        self.run_rules()?;
        Ok(())
    }

    /// Fills the read-only audit trail shown on the last tab.
    fn fill_display_defaults(
        &self,
        tree: &mut Value,
        mode: FormMode,
        now: OffsetDateTime,
    ) -> Result<(), ApiError> {
        let today: String = format_display_date(now)?;
        tree[fields::DATE_INITIATED] = Value::String(today.clone());
        tree[fields::RECORD_DATE] = Value::String(today);
        tree[fields::RECORD_TIME] = Value::String(format_display_time(now)?);
        tree[fields::INITIATOR] = Value::String(self.environment.initiator.clone());
        tree[fields::WORKSTATION] = Value::String(self.environment.workstation.clone());
        tree[fields::OPERATION] = Value::String(mode.operation_label().to_string());
        Ok(())
    }
}

/// Looks up the workflow state new worksheets start in.
///
/// Matches on key first, then on description.
fn new_status(reference: &ReferenceData) -> Value {
    reference
        .workflow_state(NEW_STATUS)
        .or_else(|| {
            reference
                .workflow_states
                .iter()
                .find(|s| s.description == NEW_STATUS)
        })
        .map_or(Value::Null, encode::<KeyedEntry>)
}
