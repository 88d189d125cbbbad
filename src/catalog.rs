//! Grouping parsed template names into a catalog.
//!
//! A batch of filenames (from an upload, a directory, stdin) is parsed and the
//! valid entries are joined on `template_group_id`, so the narrow, wide, and
//! face-neutral renders of one scene end up side by side:
//!
//! ```text
//! girl_young_hhhh5_n.jpg ┐
//! girl_young_hhhh5_w.jpg ┴→ girl_young_hhhh5   narrow + wide
//! girl_child_abc12.png   ──→ girl_child_abc12   both
//! IMG_0001.JPG           ──→ invalid
//! ```
//!
//! [`Catalog::issues`] turns the grouped view into the list of problems the
//! `check` command reports: unparseable names, face-type groups missing a
//! render, and the same variant uploaded twice.

use crate::face_types::FaceTypeRegistry;
use crate::naming::{self, FaceType, ParseError, ParsedFilename};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, BufRead};

/// One input name and its parse result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub source: String,
    pub parsed: ParsedFilename,
}

/// All renders sharing one `template_group_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateGroup {
    pub template_group_id: String,
    pub group_type: String,
    pub random_code: String,
    /// Whether the registry demands separate narrow and wide renders.
    pub requires_face_type: bool,
    /// Source names of `_n` renders.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub narrow: Vec<String>,
    /// Source names of `_w` renders.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub wide: Vec<String>,
    /// Source names of renders without a face marker.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub both: Vec<String>,
}

impl TemplateGroup {
    fn new(parsed: &ParsedFilename, registry: &FaceTypeRegistry) -> Self {
        Self {
            template_group_id: parsed.template_group_id.clone(),
            group_type: parsed.group_type.clone(),
            random_code: parsed.random_code.clone(),
            requires_face_type: registry.requires_face_type(&parsed.group_type),
            narrow: Vec::new(),
            wide: Vec::new(),
            both: Vec::new(),
        }
    }

    /// Source names for one face type.
    pub fn variants(&self, face_type: FaceType) -> &[String] {
        match face_type {
            FaceType::Narrow => &self.narrow,
            FaceType::Wide => &self.wide,
            FaceType::Both => &self.both,
        }
    }

    fn variants_mut(&mut self, face_type: FaceType) -> &mut Vec<String> {
        match face_type {
            FaceType::Narrow => &mut self.narrow,
            FaceType::Wide => &mut self.wide,
            FaceType::Both => &mut self.both,
        }
    }

    /// Face types this group still needs. Always empty for groups that do not
    /// require face differentiation.
    pub fn missing_variants(&self) -> Vec<FaceType> {
        if !self.requires_face_type {
            return Vec::new();
        }
        [FaceType::Narrow, FaceType::Wide]
            .into_iter()
            .filter(|ft| self.variants(*ft).is_empty())
            .collect()
    }

    /// Total number of renders in the group.
    pub fn render_count(&self) -> usize {
        self.narrow.len() + self.wide.len() + self.both.len()
    }
}

/// Grouped view over a batch of names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Valid groups, sorted by `template_group_id`.
    pub groups: Vec<TemplateGroup>,
    /// Names that did not parse, in input order.
    pub invalid: Vec<CatalogEntry>,
}

/// A problem found while checking a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogIssue {
    InvalidName {
        source: String,
        error: ParseError,
    },
    MissingVariant {
        template_group_id: String,
        face_type: FaceType,
    },
    DuplicateVariant {
        template_group_id: String,
        face_type: FaceType,
        sources: Vec<String>,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::InvalidName { source, error } => write!(f, "{source}: {error}"),
            CatalogIssue::MissingVariant {
                template_group_id,
                face_type,
            } => write!(f, "{template_group_id}: missing {face_type} variant"),
            CatalogIssue::DuplicateVariant {
                template_group_id,
                face_type,
                sources,
            } => write!(
                f,
                "{template_group_id}: duplicate {face_type} variant ({})",
                sources.join(", ")
            ),
        }
    }
}

impl Catalog {
    /// List every problem in the catalog, invalid names first.
    ///
    /// With `require_face_variants` off, missing narrow/wide renders are not
    /// reported.
    pub fn issues(&self, require_face_variants: bool) -> Vec<CatalogIssue> {
        let mut issues: Vec<CatalogIssue> = self
            .invalid
            .iter()
            .map(|entry| CatalogIssue::InvalidName {
                source: entry.source.clone(),
                error: entry.parsed.error.unwrap_or(ParseError::UnrecognizedFormat),
            })
            .collect();

        for group in &self.groups {
            if require_face_variants {
                issues.extend(group.missing_variants().into_iter().map(|face_type| {
                    CatalogIssue::MissingVariant {
                        template_group_id: group.template_group_id.clone(),
                        face_type,
                    }
                }));
            }
            for face_type in [FaceType::Narrow, FaceType::Wide, FaceType::Both] {
                let sources = group.variants(face_type);
                if sources.len() > 1 {
                    issues.push(CatalogIssue::DuplicateVariant {
                        template_group_id: group.template_group_id.clone(),
                        face_type,
                        sources: sources.to_vec(),
                    });
                }
            }
        }
        issues
    }

    /// `Ok` when the catalog is clean, otherwise every issue found.
    pub fn check(&self, require_face_variants: bool) -> Result<(), Vec<CatalogIssue>> {
        let issues = self.issues(require_face_variants);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    pub fn find_group(&self, template_group_id: &str) -> Option<&TemplateGroup> {
        self.groups
            .binary_search_by(|g| g.template_group_id.as_str().cmp(template_group_id))
            .ok()
            .map(|i| &self.groups[i])
    }
}

/// Read one name per line, skipping empty lines.
///
/// Only the line terminator is removed: `" a_abcde"` reaches the parser with
/// its leading space, exactly as it would from the command line.
pub fn read_names<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.is_empty() {
            names.push(line);
        }
    }
    Ok(names)
}

/// Parse a batch of names in parallel, keeping input order.
pub fn parse_all<S>(names: &[S]) -> Vec<CatalogEntry>
where
    S: AsRef<str> + Sync,
{
    names
        .par_iter()
        .map(|name| {
            let source = name.as_ref();
            CatalogEntry {
                source: source.to_string(),
                parsed: naming::parse_template_filename(source),
            }
        })
        .collect()
}

/// Join parsed entries on `template_group_id`.
pub fn group_variants(entries: Vec<CatalogEntry>, registry: &FaceTypeRegistry) -> Catalog {
    let mut groups: BTreeMap<String, TemplateGroup> = BTreeMap::new();
    let mut invalid = Vec::new();

    for entry in entries {
        if !entry.parsed.is_valid {
            tracing::debug!(source = %entry.source, "skipping unparseable name");
            invalid.push(entry);
            continue;
        }
        let group = groups
            .entry(entry.parsed.template_group_id.clone())
            .or_insert_with(|| TemplateGroup::new(&entry.parsed, registry));
        group
            .variants_mut(entry.parsed.face_type)
            .push(entry.source);
    }

    let catalog = Catalog {
        groups: groups.into_values().collect(),
        invalid,
    };
    tracing::info!(
        groups = catalog.groups.len(),
        invalid = catalog.invalid.len(),
        "grouped template names"
    );
    catalog
}

/// Parse and group in one step.
pub fn build_catalog<S>(names: &[S], registry: &FaceTypeRegistry) -> Catalog
where
    S: AsRef<str> + Sync,
{
    group_variants(parse_all(names), registry)
}
