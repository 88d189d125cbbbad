//! End-to-end checks of the public API: parse a realistic upload batch,
//! group it, and check it against the face-type registry.

use template_naming::catalog::{CatalogIssue, build_catalog};
use template_naming::face_types::{FaceTypeRegistry, requires_face_type};
use template_naming::naming::{
    FaceType, get_face_type_from_filename, get_template_group_id, is_valid_template_filename,
    parse_template_filename,
};

const UPLOAD: &[&str] = &[
    "girl_young_hhhh5_n.jpg",
    "girl_young_hhhh5_w.jpg",
    "woman_mature_7g7g7_N.PNG",
    "girl_child_abc12.jpg",
    "man_elder_zz9zz.webp",
    "IMG_0001.JPG",
];

#[test]
fn upload_batch_groups_and_checks() {
    let catalog = build_catalog(UPLOAD, &FaceTypeRegistry::stock());

    let ids: Vec<&str> = catalog
        .groups
        .iter()
        .map(|g| g.template_group_id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "girl_child_abc12",
            "girl_young_hhhh5",
            "man_elder_zz9zz",
            "woman_mature_7g7g7",
        ]
    );
    assert_eq!(catalog.invalid.len(), 1);

    let issues = catalog.issues(true);
    assert_eq!(
        issues,
        vec![
            CatalogIssue::InvalidName {
                source: "IMG_0001.JPG".into(),
                error: parse_template_filename("IMG_0001.JPG").error.unwrap(),
            },
            CatalogIssue::MissingVariant {
                template_group_id: "man_elder_zz9zz".into(),
                face_type: FaceType::Narrow,
            },
            CatalogIssue::MissingVariant {
                template_group_id: "man_elder_zz9zz".into(),
                face_type: FaceType::Wide,
            },
            CatalogIssue::MissingVariant {
                template_group_id: "woman_mature_7g7g7".into(),
                face_type: FaceType::Wide,
            },
        ]
    );
}

#[test]
fn every_name_yields_a_non_empty_group_id() {
    for name in UPLOAD.iter().chain(["", ".", "..jpg", " ", "\n"].iter()) {
        assert!(!get_template_group_id(name).is_empty(), "{name:?}");
    }
}

#[test]
fn convenience_queries_agree_with_parse() {
    for name in UPLOAD {
        let parsed = parse_template_filename(name);
        assert_eq!(is_valid_template_filename(name), parsed.is_valid);
        assert_eq!(get_template_group_id(name), parsed.template_group_id);
        assert_eq!(get_face_type_from_filename(name), parsed.face_type);
    }
}

#[test]
fn registry_is_independent_of_grammar() {
    // Grammatically valid, but no face differentiation needed.
    assert!(is_valid_template_filename("girl_child_abc12"));
    assert!(!requires_face_type("girl_child"));
    // Required, whatever the case.
    assert!(requires_face_type("GIRL_YOUNG"));
}

#[test]
fn parsing_from_many_threads_is_consistent() {
    let expected: Vec<_> = UPLOAD.iter().map(|n| parse_template_filename(n)).collect();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                UPLOAD
                    .iter()
                    .map(|n| parse_template_filename(n))
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
