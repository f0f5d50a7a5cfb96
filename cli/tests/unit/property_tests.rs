//! Property-based tests for name validation, listing and config patching.
//!
//! Uses `proptest` to verify invariants across many random inputs.

use std::path::Path;

use proptest::prelude::*;

use dem_cli::domain::imgset::{build_listing, resolve_path, validate_name};
use dem_cli::domain::runtime_config::{PatchOutcome, point_at};

proptest! {
    /// A valid name always resolves to a direct child of the root.
    #[test]
    fn prop_valid_name_is_direct_child(name in "[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,30}") {
        prop_assume!(validate_name("create", &name).is_ok());
        let root = Path::new("/var/lib/dem");
        let path = resolve_path(root, &name);
        prop_assert_eq!(path.parent(), Some(root));
        prop_assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(name.as_str()));
    }

    /// Anything containing a separator is rejected.
    #[test]
    fn prop_names_with_separator_rejected(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let joined = format!("{a}/{b}");
        prop_assert!(validate_name("create", &joined).is_err());
    }

    /// Listing output is sorted, never shows `current`, and marks at most one entry.
    #[test]
    fn prop_listing_sorted_without_current(
        mut names in proptest::collection::btree_set("[a-z]{1,6}", 0..12)
            .prop_map(|s| s.into_iter().collect::<Vec<_>>()),
        pick in 0usize..12,
    ) {
        names.push("current".to_string());
        names.sort();
        let current = names.get(pick).cloned().unwrap_or_default();
        let listing = build_listing(Path::new("/r"), names, &current);
        let shown: Vec<_> = listing.imgsets.iter().map(|e| e.name.clone()).collect();
        let mut sorted = shown.clone();
        sorted.sort();
        prop_assert_eq!(&shown, &sorted);
        prop_assert!(!shown.iter().any(|n| n == "current"));
        prop_assert!(listing.imgsets.iter().filter(|e| e.active).count() <= 1);
    }

    /// Patching is idempotent and only ever changes one line.
    #[test]
    fn prop_point_at_idempotent(
        opts in "[a-z0-9 =.-]{0,20}",
        target in "/[a-z]{1,8}/[a-z]{1,8}",
        prefix in proptest::collection::vec("[A-Z_]{1,8}=[a-z]{0,5}", 0..4),
    ) {
        let mut text = prefix.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&format!("#DOCKER_OPTS=\"{opts}\"\n"));

        let PatchOutcome::Patched(once) = point_at(&text, &target) else {
            return Err(TestCaseError::fail("commented line not patched"));
        };
        prop_assert_eq!(point_at(&once, &target), PatchOutcome::AlreadySet);
        let changed = text.lines().zip(once.lines()).filter(|(a, b)| a != b).count();
        prop_assert_eq!(changed, 1);
        prop_assert_eq!(text.lines().count(), once.lines().count());
    }
}
