// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::path::{FieldPath, Segment};
use crate::validator::{FieldError, Rule};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Identifies an active watch on a [`FormStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchHandle(usize);

#[derive(Debug, Clone)]
struct Watch {
    path: FieldPath,
    value: Value,
    version: u64,
}

/// The single source of truth for every field value of an open form.
///
/// Values live in one JSON tree addressed by [`FieldPath`]. Every mutation
/// refreshes the watches whose path overlaps the mutated path before it
/// returns, and user mutations are queued for the rules engine.
#[derive(Debug, Clone)]
pub struct FormStore {
    tree: Value,
    validators: Vec<(FieldPath, Rule)>,
    errors: BTreeMap<FieldPath, FieldError>,
    watches: Vec<Option<Watch>>,
    changes: Vec<FieldPath>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore {
    /// Creates a store holding an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: Value::Object(Map::new()),
            validators: Vec::new(),
            errors: BTreeMap::new(),
            watches: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// Returns the whole tree.
    #[must_use]
    pub const fn tree(&self) -> &Value {
        &self.tree
    }

    /// Reads the value at a concrete path.
    ///
    /// Patterns and missing paths read as `None`.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        lookup(&self.tree, path)
    }

    /// Writes a user value and queues the change for the rules engine.
    ///
    /// Missing intermediate objects are created. Any error recorded for the
    /// path or below it is cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is the root or a pattern, crosses a
    /// value of the wrong shape, or indexes past the end of a sequence.
    pub fn set(&mut self, path: &FieldPath, value: Value) -> Result<(), CoreError> {
        self.write(path, value)?;
        self.clear_errors_under(path);
        self.changes.push(path.clone());
        Ok(())
    }

    /// Writes a derived value without queueing a change.
    ///
    /// The rules engine writes through here so a rule's own output never
    /// retriggers the pass that produced it.
    ///
    /// # Errors
    ///
    /// Same as [`FormStore::set`].
    pub fn set_derived(&mut self, path: &FieldPath, value: Value) -> Result<(), CoreError> {
        if self.get(path) == Some(&value) {
            return Ok(());
        }
        self.write(path, value)
    }

    /// Replaces the whole tree and clears every validation error.
    ///
    /// Queues a root change, so every rule runs on the next pass.
    pub fn reset_all(&mut self, tree: Value) {
        debug!("Resetting form tree");
        self.tree = tree;
        self.errors.clear();
        self.changes.push(FieldPath::root());
        self.refresh_watches(&FieldPath::root());
    }

    /// Replaces one subtree and clears the errors recorded under it.
    ///
    /// # Errors
    ///
    /// Same as [`FormStore::set`].
    pub fn reset_subtree(&mut self, path: &FieldPath, value: Value) -> Result<(), CoreError> {
        self.set(path, value)
    }

    /// Appends an empty entry to a sequence, returning its index.
    ///
    /// A missing or null sequence is created.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not address a sequence.
    pub fn append_to_sequence(&mut self, path: &FieldPath) -> Result<usize, CoreError> {
        let slot: &mut Value = self.slot_mut(path)?;
        if slot.is_null() {
            *slot = Value::Array(Vec::new());
        }
        let Value::Array(items) = slot else {
            return Err(shape_mismatch(path, "a sequence"));
        };
        items.push(Value::Object(Map::new()));
        let index: usize = items.len() - 1;

        debug!(path = %path, index, "Appended sequence entry");
        self.changes.push(path.clone());
        self.refresh_watches(path);
        Ok(index)
    }

    /// Removes an entry from a sequence, returning it.
    ///
    /// Errors recorded anywhere in the sequence are cleared because the
    /// remaining entries shift position.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not address a sequence, the index
    /// is out of range, or the entry is the last one.
    pub fn remove_from_sequence(
        &mut self,
        path: &FieldPath,
        index: usize,
    ) -> Result<Value, CoreError> {
        let len: usize = match self.get(path) {
            Some(Value::Array(items)) => items.len(),
            _ => return Err(shape_mismatch(path, "a sequence")),
        };
        if index >= len {
            return Err(CoreError::IndexOutOfRange {
                path: path.to_string(),
                index,
                len,
            });
        }
        if len == 1 {
            return Err(CoreError::LastEntry {
                path: path.to_string(),
            });
        }
        let Value::Array(items) = self.slot_mut(path)? else {
            return Err(shape_mismatch(path, "a sequence"));
        };
        let removed: Value = items.remove(index);

        debug!(path = %path, index, "Removed sequence entry");
        self.clear_errors_under(path);
        self.changes.push(path.clone());
        self.refresh_watches(path);
        Ok(removed)
    }

    /// Returns the number of entries in a sequence (0 if absent).
    #[must_use]
    pub fn sequence_len(&self, path: &FieldPath) -> usize {
        self.get(path)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Attaches a validation rule to a field or field pattern.
    ///
    /// Rules on the same path are checked in registration order; the first
    /// failure is the one reported.
    pub fn register_validator(&mut self, path: FieldPath, rule: Rule) {
        self.validators.push((path, rule));
    }

    /// Checks every registered rule against the current tree.
    ///
    /// The resulting errors replace the recorded ones.
    ///
    /// # Errors
    ///
    /// Returns every field error found, in path order.
    pub fn validate(&mut self) -> Result<(), Vec<FieldError>> {
        let mut errors: BTreeMap<FieldPath, FieldError> = BTreeMap::new();

        for (pattern, rule) in &self.validators {
            for path in self.expand(pattern) {
                if errors.contains_key(&path) {
                    continue;
                }
                if let Some(error) = rule.check(&path, self.get(&path)) {
                    errors.insert(path, error);
                }
            }
        }

        self.errors = errors;
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.values().cloned().collect())
        }
    }

    /// Returns the recorded error for a field.
    #[must_use]
    pub fn error(&self, path: &FieldPath) -> Option<&FieldError> {
        self.errors.get(path)
    }

    /// Returns every recorded error, in path order.
    pub fn errors(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.values()
    }

    /// Expands a pattern into the concrete paths it addresses in the tree.
    ///
    /// A concrete path expands to itself whether or not it holds a value.
    #[must_use]
    pub fn expand(&self, pattern: &FieldPath) -> Vec<FieldPath> {
        let mut out: Vec<FieldPath> = Vec::new();
        expand_into(Some(&self.tree), FieldPath::root(), pattern.segments(), &mut out);
        out
    }

    /// Subscribes to a path, returning a handle to read it through.
    pub fn watch(&mut self, path: FieldPath) -> WatchHandle {
        let value: Value = self.get(&path).cloned().unwrap_or(Value::Null);
        self.watches.push(Some(Watch {
            path,
            value,
            version: 0,
        }));
        WatchHandle(self.watches.len() - 1)
    }

    /// Returns the current value behind a watch.
    #[must_use]
    pub fn watched(&self, handle: WatchHandle) -> Option<&Value> {
        self.watch_entry(handle).map(|w| &w.value)
    }

    /// Returns how many times a watch has been refreshed.
    #[must_use]
    pub fn watch_version(&self, handle: WatchHandle) -> Option<u64> {
        self.watch_entry(handle).map(|w| w.version)
    }

    /// Cancels a watch.
    pub fn unwatch(&mut self, handle: WatchHandle) {
        if let Some(slot) = self.watches.get_mut(handle.0) {
            *slot = None;
        }
    }

    /// Drains the user changes queued since the last call.
    pub fn take_changes(&mut self) -> Vec<FieldPath> {
        std::mem::take(&mut self.changes)
    }

    fn watch_entry(&self, handle: WatchHandle) -> Option<&Watch> {
        self.watches.get(handle.0).and_then(Option::as_ref)
    }

    fn write(&mut self, path: &FieldPath, value: Value) -> Result<(), CoreError> {
        if path.is_root() || path.is_pattern() {
            return Err(CoreError::InvalidPath(path.to_string()));
        }
        *self.slot_mut(path)? = value;
        debug!(path = %path, "Field written");
        self.refresh_watches(path);
        Ok(())
    }

    /// Walks to the slot a path addresses, creating missing objects.
    ///
    /// The path is checked against the tree first, so a failing path leaves
    /// the tree untouched.
    fn slot_mut(&mut self, path: &FieldPath) -> Result<&mut Value, CoreError> {
        check_writable(&self.tree, path)?;
        let mut current: &mut Value = &mut self.tree;
        for segment in path.segments() {
            current = match segment {
                Segment::Key(key) => {
                    if current.is_null() {
                        *current = Value::Object(Map::new());
                    }
                    match current {
                        Value::Object(map) => map.entry(key.clone()).or_insert(Value::Null),
                        _ => return Err(shape_mismatch(path, "an object")),
                    }
                }
                Segment::Index(index) => match current {
                    Value::Array(items) => {
                        let len: usize = items.len();
                        items
                            .get_mut(*index)
                            .ok_or_else(|| CoreError::IndexOutOfRange {
                                path: path.to_string(),
                                index: *index,
                                len,
                            })?
                    }
                    _ => return Err(shape_mismatch(path, "a sequence")),
                },
                Segment::AnyIndex => return Err(CoreError::InvalidPath(path.to_string())),
            };
        }
        Ok(current)
    }

    fn refresh_watches(&mut self, changed: &FieldPath) {
        let tree: &Value = &self.tree;
        for watch in self.watches.iter_mut().flatten() {
            if watch.path.overlaps(changed) {
                watch.value = lookup(tree, &watch.path).cloned().unwrap_or(Value::Null);
                watch.version += 1;
            }
        }
    }

    fn clear_errors_under(&mut self, path: &FieldPath) {
        self.errors.retain(|field, _| !path.is_prefix_of(field));
    }
}

fn lookup<'a>(tree: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current: &Value = tree;
    for segment in path.segments() {
        current = match segment {
            Segment::Key(key) => current.get(key)?,
            Segment::Index(index) => current.get(*index)?,
            Segment::AnyIndex => return None,
        };
    }
    Some(current)
}

fn check_writable(tree: &Value, path: &FieldPath) -> Result<(), CoreError> {
    let mut current: Option<&Value> = Some(tree);
    for segment in path.segments() {
        current = match (segment, current) {
            (Segment::Key(_), None | Some(Value::Null)) => None,
            (Segment::Key(key), Some(Value::Object(map))) => map.get(key),
            (Segment::Key(_), Some(_)) => return Err(shape_mismatch(path, "an object")),
            (Segment::Index(index), Some(Value::Array(items))) => {
                Some(items.get(*index).ok_or_else(|| CoreError::IndexOutOfRange {
                    path: path.to_string(),
                    index: *index,
                    len: items.len(),
                })?)
            }
            (Segment::Index(_), _) => return Err(shape_mismatch(path, "a sequence")),
            (Segment::AnyIndex, _) => return Err(CoreError::InvalidPath(path.to_string())),
        };
    }
    Ok(())
}

fn expand_into(
    value: Option<&Value>,
    prefix: FieldPath,
    rest: &[Segment],
    out: &mut Vec<FieldPath>,
) {
    match rest.split_first() {
        None => out.push(prefix),
        Some((Segment::AnyIndex, tail)) => {
            if let Some(Value::Array(items)) = value {
                for (i, item) in items.iter().enumerate() {
                    expand_into(Some(item), prefix.clone().index(i), tail, out);
                }
            }
        }
        Some((Segment::Key(key), tail)) => {
            expand_into(value.and_then(|v| v.get(key)), prefix.key(key), tail, out);
        }
        Some((Segment::Index(index), tail)) => {
            expand_into(value.and_then(|v| v.get(*index)), prefix.index(*index), tail, out);
        }
    }
}

fn shape_mismatch(path: &FieldPath, expected: &'static str) -> CoreError {
    CoreError::ShapeMismatch {
        path: path.to_string(),
        expected,
    }
}
