//! Filename grammar for photo templates.
//!
//! Every template image is named `<group_type>_<random_code>[_<face>].<ext>`:
//!
//! - `group_type`: letters and underscores, e.g. `girl_young`, `woman_mature`
//! - `random_code`: exactly five ASCII alphanumerics identifying the scene
//! - `face`: optional single `n` (narrow) or `w` (wide) marker
//!
//! ```text
//! girl_young_hhhh5_n.jpg  →  girl_young / hhhh5 / narrow  →  girl_young_hhhh5
//! girl_young_hhhh5_w.jpg  →  girl_young / hhhh5 / wide    →  girl_young_hhhh5
//! girl_child_abc12.png    →  girl_child / abc12 / both    →  girl_child_abc12
//! ```
//!
//! The narrow and wide renders of one scene share a `template_group_id`, which
//! is how the catalog links them (see [`crate::catalog`]).
//!
//! ## Disambiguation
//!
//! `group_type` may itself contain underscores, so the name cannot be split on
//! the first or last underscore. Both forms are anchored at each end and the
//! fixed-width code and marker are always the rightmost segments; `group_type`
//! absorbs everything to their left. The form with a face marker is tried
//! first. `girl_young_n` therefore parses as `girl` / `young` / narrow.
//!
//! Parsing is total: a name that fits neither form still yields a
//! [`ParsedFilename`], flagged invalid and carrying [`ParseError`].

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// `<group_type>_<random_code>_<n|w>`, whole basename.
static FORM_WITH_FACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]+)_([A-Za-z0-9]{5})_([nNwW])$").expect("face form must compile")
});

/// `<group_type>_<random_code>`, whole basename.
static FORM_WITHOUT_FACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]+)_([A-Za-z0-9]{5})$").expect("plain form must compile")
});

/// Group id used when an unparseable input has no characters to fall back on.
pub const EMPTY_NAME_GROUP_ID: &str = "unnamed";

/// Why a filename could not be parsed. Carried in-band, never returned as `Err`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("unable to parse filename format")]
    UnrecognizedFormat,
}

impl Serialize for ParseError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The literal face marker found in the filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceTypeSuffix {
    Narrow,
    Wide,
    None,
}

impl FaceTypeSuffix {
    /// Map a single marker character (`n`/`w`, any case).
    fn from_marker(marker: &str) -> Self {
        if marker.eq_ignore_ascii_case("n") {
            FaceTypeSuffix::Narrow
        } else if marker.eq_ignore_ascii_case("w") {
            FaceTypeSuffix::Wide
        } else {
            FaceTypeSuffix::None
        }
    }
}

/// Face shape a template render targets. `Both` means one render serves all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceType {
    Narrow,
    Wide,
    Both,
}

impl From<FaceTypeSuffix> for FaceType {
    fn from(suffix: FaceTypeSuffix) -> Self {
        match suffix {
            FaceTypeSuffix::Narrow => FaceType::Narrow,
            FaceTypeSuffix::Wide => FaceType::Wide,
            FaceTypeSuffix::None => FaceType::Both,
        }
    }
}

impl fmt::Display for FaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FaceType::Narrow => "narrow",
            FaceType::Wide => "wide",
            FaceType::Both => "both",
        })
    }
}

/// Result of parsing a template filename like `girl_young_hhhh5_n.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFilename {
    /// Input with the trailing `.ext` removed; lowercased when valid.
    pub basename: String,
    /// Lowercase category code, e.g. `girl_young`. Empty when invalid.
    pub group_type: String,
    /// Lowercase 5-character scene code. Empty when invalid.
    pub random_code: String,
    pub face_type_suffix: FaceTypeSuffix,
    pub face_type: FaceType,
    /// Key shared by all face variants of one scene. Never empty.
    pub template_group_id: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ParseError>,
}

impl ParsedFilename {
    fn matched(basename: &str, group_type: &str, random_code: &str, suffix: FaceTypeSuffix) -> Self {
        let group_type = group_type.to_ascii_lowercase();
        let random_code = random_code.to_ascii_lowercase();
        ParsedFilename {
            basename: basename.to_ascii_lowercase(),
            template_group_id: template_group_id(&group_type, &random_code),
            group_type,
            random_code,
            face_type_suffix: suffix,
            face_type: suffix.into(),
            is_valid: true,
            error: None,
        }
    }

    fn unparseable(filename: &str, basename: &str) -> Self {
        // An input like ".jpg" strips down to nothing; keep the id non-empty.
        let template_group_id = [basename, filename]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(EMPTY_NAME_GROUP_ID)
            .to_string();
        ParsedFilename {
            basename: basename.to_string(),
            group_type: String::new(),
            random_code: String::new(),
            face_type_suffix: FaceTypeSuffix::None,
            face_type: FaceType::Both,
            template_group_id,
            is_valid: false,
            error: Some(ParseError::UnrecognizedFormat),
        }
    }
}

/// Join a group type and random code into the shared variant key.
pub fn template_group_id(group_type: &str, random_code: &str) -> String {
    format!(
        "{}_{}",
        group_type.to_ascii_lowercase(),
        random_code.to_ascii_lowercase()
    )
}

/// Remove a trailing `.ext` (a dot followed by at least one non-dot character).
///
/// - `"a_abcde_n.jpg"` → `"a_abcde_n"`
/// - `"archive.tar.gz"` → `"archive.tar"`
/// - `"no_extension"` → `"no_extension"`
/// - `"trailing."` → `"trailing."`
pub fn strip_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => stem,
        _ => filename,
    }
}

/// Parse a template filename. Never fails; check [`ParsedFilename::is_valid`].
pub fn parse_template_filename(filename: &str) -> ParsedFilename {
    let basename = strip_extension(filename);

    if let Some(caps) = FORM_WITH_FACE.captures(basename) {
        return ParsedFilename::matched(
            basename,
            &caps[1],
            &caps[2],
            FaceTypeSuffix::from_marker(&caps[3]),
        );
    }
    if let Some(caps) = FORM_WITHOUT_FACE.captures(basename) {
        return ParsedFilename::matched(basename, &caps[1], &caps[2], FaceTypeSuffix::None);
    }

    tracing::trace!(filename, "filename does not match template grammar");
    ParsedFilename::unparseable(filename, basename)
}

pub fn is_valid_template_filename(filename: &str) -> bool {
    parse_template_filename(filename).is_valid
}

pub fn get_template_group_id(filename: &str) -> String {
    parse_template_filename(filename).template_group_id
}

pub fn get_face_type_from_filename(filename: &str) -> FaceType {
    parse_template_filename(filename).face_type
}
