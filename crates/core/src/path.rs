// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use std::str::FromStr;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// An object member.
    Key(String),
    /// A sequence entry.
    Index(usize),
    /// Every entry of a sequence. Only meaningful in patterns.
    AnyIndex,
}

/// The address of a value in the form tree, written `keyOfficers[0].staffName`.
///
/// The empty path addresses the whole tree. Paths containing `[*]` are
/// patterns and address every entry of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The path of the whole tree.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parses a path known to be well formed.
    ///
    /// Malformed input yields the root path, which every mutating store
    /// operation rejects. Use [`FromStr`] for untrusted input.
    #[must_use]
    pub fn new(path: &str) -> Self {
        path.parse().unwrap_or_default()
    }

    /// Returns the segments of this path.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns whether this path contains a `[*]` wildcard.
    #[must_use]
    pub fn is_pattern(&self) -> bool {
        self.segments.contains(&Segment::AnyIndex)
    }

    /// Appends an object member.
    #[must_use]
    pub fn key(mut self, key: &str) -> Self {
        self.segments.push(Segment::Key(key.to_string()));
        self
    }

    /// Appends a sequence index.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    /// Returns the final object member name, if the path ends in one.
    #[must_use]
    pub fn leaf_key(&self) -> Option<&str> {
        match self.segments.last() {
            Some(Segment::Key(key)) => Some(key),
            _ => None,
        }
    }

    /// Returns whether `self` is a prefix of `other` (or equal to it).
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.segments.len() <= other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| segment_matches(a, b))
    }

    /// Returns whether a change at one path can affect a value at the other.
    ///
    /// Two paths overlap when one is an ancestor of, a descendant of, or
    /// equal to the other. `[*]` matches any index.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.segments
            .iter()
            .zip(&other.segments)
            .all(|(a, b)| segment_matches(a, b))
    }
}

fn segment_matches(a: &Segment, b: &Segment) -> bool {
    match (a, b) {
        (Segment::AnyIndex, Segment::Index(_) | Segment::AnyIndex)
        | (Segment::Index(_), Segment::AnyIndex) => true,
        _ => a == b,
    }
}

impl FromStr for FieldPath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidPath(s.to_string());
        let mut segments: Vec<Segment> = Vec::new();

        if s.is_empty() {
            return Ok(Self::root());
        }

        for part in s.split('.') {
            let (name, mut rest) = part.find('[').map_or((part, ""), |i| part.split_at(i));
            if name.is_empty() {
                return Err(invalid());
            }
            segments.push(Segment::Key(name.to_string()));
            while !rest.is_empty() {
                let close: usize = rest.find(']').ok_or_else(invalid)?;
                let inner: &str = &rest[1..close];
                if inner == "*" {
                    segments.push(Segment::AnyIndex);
                } else {
                    let index: usize = inner.parse().map_err(|_| invalid())?;
                    segments.push(Segment::Index(index));
                }
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(invalid());
                }
            }
        }

        Ok(Self { segments })
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::AnyIndex => write!(f, "[*]")?,
            }
        }
        Ok(())
    }
}
