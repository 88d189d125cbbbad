//! Which template groups need separate narrow and wide renders.
//!
//! This is a business rule, not part of the filename grammar: `girl_child` is a
//! perfectly valid group type that simply does not require face variants.
//! The stock list lives in [`FACE_TYPE_GROUPS`]; deployments can extend it via
//! `[face_types] extra_groups` in `config.toml`, which builds a
//! [`FaceTypeRegistry`] without touching the stock list.

use std::collections::BTreeSet;

/// Group types whose templates must exist in both narrow and wide variants.
pub const FACE_TYPE_GROUPS: &[&str] = &[
    "girl_young",
    "woman_mature",
    "woman_elder",
    "man_young",
    "man_elder",
];

/// Whether a group type requires narrow/wide variants (case-insensitive).
pub fn requires_face_type(code: &str) -> bool {
    let code = code.to_ascii_lowercase();
    FACE_TYPE_GROUPS.contains(&code.as_str())
}

/// Stock face-type groups plus any configured extras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceTypeRegistry {
    extra: BTreeSet<String>,
}

impl Default for FaceTypeRegistry {
    fn default() -> Self {
        Self::stock()
    }
}

impl FaceTypeRegistry {
    /// Registry holding only [`FACE_TYPE_GROUPS`].
    pub fn stock() -> Self {
        Self {
            extra: BTreeSet::new(),
        }
    }

    /// Registry with additional group codes. Codes are lowercased; blanks are ignored.
    pub fn with_extra_groups<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = extra
            .into_iter()
            .map(|s| s.as_ref().trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { extra }
    }

    pub fn requires_face_type(&self, code: &str) -> bool {
        requires_face_type(code) || self.extra.contains(&code.to_ascii_lowercase())
    }

    /// All codes in this registry, stock first, then extras in sorted order.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = FACE_TYPE_GROUPS.to_vec();
        groups.extend(
            self.extra
                .iter()
                .map(String::as_str)
                .filter(|code| !FACE_TYPE_GROUPS.contains(code)),
        );
        groups
    }
}
