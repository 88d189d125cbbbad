//! CLI output formatting for parse, group, and check results.
//!
//! # Information-First Display
//!
//! Every entity is shown by its identity first (the source name for parse
//! results, the `template_group_id` for groups) with details on indented
//! context lines underneath.
//!
//! # Output Format
//!
//! ## Parse
//!
//! ```text
//! 001 girl_young_hhhh5_n.jpg
//!     Group: girl_young_hhhh5
//!     Type: girl_young (face variants required)
//!     Code: hhhh5
//!     Face: narrow
//! 002 IMG_0001.JPG
//!     Invalid: unable to parse filename format
//! ```
//!
//! ## Group
//!
//! ```text
//! Groups
//! 001 girl_child_abc12 (1 render)
//!     both: girl_child_abc12.png
//! 002 girl_young_hhhh5 (2 renders, face variants required)
//!     narrow: girl_young_hhhh5_n.jpg
//!     wide: girl_young_hhhh5_w.jpg
//!
//! Invalid
//! 001 IMG_0001.JPG
//! ```
//!
//! ## Check
//!
//! ```text
//! 2 issues
//!     IMG_0001.JPG: unable to parse filename format
//!     woman_elder_aaaaa: missing wide variant
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::catalog::{Catalog, CatalogEntry, CatalogIssue, TemplateGroup};
use crate::face_types::FaceTypeRegistry;
use crate::naming::FaceType;

/// `7` → `"007"`; entries are numbered from 1 in listing order.
fn format_index(pos: usize) -> String {
    format!("{pos:03}")
}

/// Context lines sit four spaces deeper per level.
fn indent(level: usize) -> String {
    " ".repeat(4 * level)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Parse
// ============================================================================

pub fn format_parse_results(entries: &[CatalogEntry], registry: &FaceTypeRegistry) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        let parsed = &entry.parsed;
        lines.push(format!("{} {}", format_index(i + 1), entry.source));
        if !parsed.is_valid {
            let reason = parsed
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "invalid".to_string());
            lines.push(format!("{}Invalid: {}", indent(1), reason));
            continue;
        }
        lines.push(format!("{}Group: {}", indent(1), parsed.template_group_id));
        if registry.requires_face_type(&parsed.group_type) {
            lines.push(format!(
                "{}Type: {} (face variants required)",
                indent(1),
                parsed.group_type
            ));
        } else {
            lines.push(format!("{}Type: {}", indent(1), parsed.group_type));
        }
        lines.push(format!("{}Code: {}", indent(1), parsed.random_code));
        lines.push(format!("{}Face: {}", indent(1), parsed.face_type));
    }
    lines
}

pub fn print_parse_results(entries: &[CatalogEntry], registry: &FaceTypeRegistry) {
    for line in format_parse_results(entries, registry) {
        println!("{}", line);
    }
}

// ============================================================================
// Group
// ============================================================================

fn group_header(index: usize, group: &TemplateGroup) -> String {
    let renders = plural(group.render_count(), "render");
    if group.requires_face_type {
        format!(
            "{} {} ({}, face variants required)",
            format_index(index),
            group.template_group_id,
            renders
        )
    } else {
        format!(
            "{} {} ({})",
            format_index(index),
            group.template_group_id,
            renders
        )
    }
}

pub fn format_catalog(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();

    if !catalog.groups.is_empty() {
        lines.push("Groups".to_string());
        for (i, group) in catalog.groups.iter().enumerate() {
            lines.push(group_header(i + 1, group));
            for face_type in [FaceType::Narrow, FaceType::Wide, FaceType::Both] {
                for source in group.variants(face_type) {
                    lines.push(format!("{}{}: {}", indent(1), face_type, source));
                }
            }
        }
    }

    if !catalog.invalid.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Invalid".to_string());
        for (i, entry) in catalog.invalid.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), entry.source));
        }
    }

    if lines.is_empty() {
        lines.push("No template names".to_string());
    }
    lines
}

pub fn print_catalog(catalog: &Catalog) {
    for line in format_catalog(catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_issues(issues: &[CatalogIssue]) -> Vec<String> {
    if issues.is_empty() {
        return vec!["No issues".to_string()];
    }
    let mut lines = vec![plural(issues.len(), "issue")];
    lines.extend(issues.iter().map(|issue| format!("{}{}", indent(1), issue)));
    lines
}

pub fn print_issues(issues: &[CatalogIssue]) {
    for line in format_issues(issues) {
        println!("{}", line);
    }
}

// ============================================================================
// Registry lookups
// ============================================================================

pub fn format_requires(codes: &[String], registry: &FaceTypeRegistry) -> Vec<String> {
    codes
        .iter()
        .map(|code| {
            let answer = if registry.requires_face_type(code) {
                "face variants required"
            } else {
                "no face variants"
            };
            format!("{}: {}", code, answer)
        })
        .collect()
}

pub fn print_requires(codes: &[String], registry: &FaceTypeRegistry) {
    for line in format_requires(codes, registry) {
        println!("{}", line);
    }
}
