//! # Template Naming
//!
//! Filename grammar, variant grouping, and naming checks for photo templates.
//! A template's filename is its only metadata source before it is cataloged:
//!
//! ```text
//! girl_young_hhhh5_n.jpg
//! └──┬─────┘ └─┬─┘ │
//!  group type  code face (n = narrow, w = wide, absent = both)
//! ```
//!
//! # Pipeline
//!
//! ```text
//! names (args, stdin, or scan)  →  parse  →  group  →  check
//! ```
//!
//! Parsing is pure and total: every string produces a [`naming::ParsedFilename`],
//! invalid ones included. Grouping joins narrow and wide renders on their
//! shared `template_group_id`. Checking reports unparseable names, duplicate
//! renders, and face-type groups missing a render.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Filename grammar parser and derived fields |
//! | [`face_types`] | Registry of group types that need narrow/wide renders |
//! | [`catalog`] | Parallel batch parsing, variant grouping, issue detection |
//! | [`scan`] | Collects template filenames from a directory |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`output`] | CLI text rendering of parse, group, and check results |
//!
//! # Design Decisions
//!
//! ## Anchored Patterns, Not Token Splitting
//!
//! Group types contain underscores (`woman_mature`), so splitting on `_` cannot
//! tell the group from the code. The grammar is two anchored patterns whose
//! fixed-width tail (five-character code, optional marker) is matched from the
//! right; everything before it is the group type.
//!
//! ## Errors Stay In-Band
//!
//! A bad filename is data, not a failure. Callers get a result with
//! `is_valid = false` and decide for themselves whether to reject the upload.
//!
//! ## Registry Separate From Grammar
//!
//! Which groups need face variants is a catalog rule that changes on its own
//! schedule. It is a plain list, extendable from config, and the parser never
//! consults it.

pub mod catalog;
pub mod config;
pub mod face_types;
pub mod naming;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
