// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CoreError, FieldPath, Segment};

#[test]
fn test_parses_nested_path() {
    let path: FieldPath = "keyOfficers[2].staffName".parse().unwrap();
    assert_eq!(
        path.segments(),
        &[
            Segment::Key(String::from("keyOfficers")),
            Segment::Index(2),
            Segment::Key(String::from("staffName")),
        ]
    );
    assert_eq!(path.to_string(), "keyOfficers[2].staffName");
    assert_eq!(path.leaf_key(), Some("staffName"));
    assert!(!path.is_pattern());
}

#[test]
fn test_parses_wildcard_pattern() {
    let path: FieldPath = "approaches[*].approachPercent".parse().unwrap();
    assert!(path.is_pattern());
    assert_eq!(path.to_string(), "approaches[*].approachPercent");
}

#[test]
fn test_rejects_malformed_paths() {
    for input in ["a..b", "a[", "a[x]", ".a", "a."] {
        let result: Result<FieldPath, CoreError> = input.parse();
        assert!(
            matches!(result, Err(CoreError::InvalidPath(_))),
            "{input} should be rejected"
        );
    }
}

#[test]
fn test_empty_string_is_root() {
    let path: FieldPath = "".parse().unwrap();
    assert!(path.is_root());
    assert!(FieldPath::new("a..b").is_root());
}

#[test]
fn test_builders_match_parsed_form() {
    let built: FieldPath = FieldPath::new("auditTeams").index(0).key("coverages");
    assert_eq!(built, FieldPath::new("auditTeams[0].coverages"));
}

#[test]
fn test_prefix_relation() {
    let parent: FieldPath = FieldPath::new("keyOfficers[0]");
    let child: FieldPath = FieldPath::new("keyOfficers[0].staffName");
    assert!(parent.is_prefix_of(&child));
    assert!(!child.is_prefix_of(&parent));
    assert!(FieldPath::root().is_prefix_of(&child));
}

#[test]
fn test_overlap_covers_ancestors_descendants_and_wildcards() {
    let pattern: FieldPath = FieldPath::new("approaches[*].approachPercent");
    assert!(pattern.overlaps(&FieldPath::new("approaches[3].approachPercent")));
    assert!(pattern.overlaps(&FieldPath::new("approaches")));
    assert!(pattern.overlaps(&FieldPath::root()));
    assert!(!pattern.overlaps(&FieldPath::new("approaches[3].approach")));
    assert!(!pattern.overlaps(&FieldPath::new("keyOfficers")));
}
