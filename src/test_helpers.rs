//! Shared test utilities for the template-naming test suite.
//!
//! Lookup helpers over a [`Catalog`] that panic with the available ids on a
//! miss, plus a fixture builder for scan tests.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = build_catalog(&["x_abcde_n.jpg", "x_abcde_w.jpg"], &FaceTypeRegistry::stock());
//! let group = find_group(&catalog, "x_abcde");
//! assert_group_ids(&catalog, &["x_abcde"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::{Catalog, TemplateGroup};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory containing empty files at the given relative paths.
pub fn setup_template_dir(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for file in files {
        touch(&tmp.path().join(file));
    }
    tmp
}

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}

// =========================================================================
// Catalog lookups — panics with a clear message on miss
// =========================================================================

/// Find a group by id. Panics if not found.
pub fn find_group<'a>(catalog: &'a Catalog, template_group_id: &str) -> &'a TemplateGroup {
    catalog.find_group(template_group_id).unwrap_or_else(|| {
        let ids: Vec<&str> = group_ids(catalog);
        panic!("group '{template_group_id}' not found. Available: {ids:?}")
    })
}

/// All group ids in catalog order.
pub fn group_ids(catalog: &Catalog) -> Vec<&str> {
    catalog
        .groups
        .iter()
        .map(|g| g.template_group_id.as_str())
        .collect()
}

/// Assert the catalog holds exactly these groups, in this order.
pub fn assert_group_ids(catalog: &Catalog, expected: &[&str]) {
    assert_eq!(group_ids(catalog), expected, "catalog group ids");
}
