//! Integration tests for orc-material.

use std::collections::HashSet;

use orc_material::units::{G_PER_M2, LB_PER_FT3};
use orc_material::{Material, MaterialError, MaterialKind, MaterialLibrary};

fn samples() -> Vec<Material> {
    vec![
        Material::bulk("Plywood", 630.0),
        Material::bulk("Styrofoam | EPS", 20.0),
        Material::surface("Ripstop nylon", 0.067),
        Material::line("Kevlar", 0.0013),
        Material::line("Elastic cord", 1.0e-7),
        Material::bulk("Tungsten", 19_250.0),
        Material::bulk("", 0.0),
    ]
}

#[test]
fn decode_inverts_encode() {
    for material in samples() {
        let decoded = Material::decode(&material.encode()).expect("encoded form should decode");
        assert_eq!(decoded.kind(), material.kind());
        assert_eq!(decoded.density(), material.density());
        assert_eq!(decoded.name(), material.name().replace('|', " "));
    }
}

#[test]
fn every_library_preset_round_trips() {
    let library = MaterialLibrary::with_defaults();
    for kind in MaterialKind::ALL {
        for material in library.of_kind(kind) {
            let decoded: Material = material.encode().parse().unwrap();
            assert_eq!(decoded, *material);
        }
    }
}

#[test]
fn equality_is_an_equivalence() {
    let a = Material::bulk("Birch", 670.0);
    let b = Material::bulk("Birch", 670.0 * (1.0 + 1e-10));
    let c = Material::bulk("Birch", 670.0 * (1.0 + 2e-10));
    assert_eq!(a, a);
    assert_eq!(a == b, b == a);
    assert!(a == b && b == c && a == c);
}

#[test]
fn kinds_never_compare_equal() {
    let line = Material::line("Nylon", 1.0);
    let surface = Material::surface("Nylon", 1.0);
    assert_ne!(line, surface);
    assert_ne!(line.cmp(&surface), std::cmp::Ordering::Equal);
}

#[test]
fn hash_set_deduplicates_equal_materials() {
    let mut set = HashSet::new();
    set.insert(Material::bulk("Oak", 750.0));
    set.insert(Material::bulk("Oak", 750.0 + 1e-9));
    set.insert(Material::surface("Oak", 750.0));
    assert_eq!(set.len(), 2);
}

#[test]
fn ordering_ignores_sub_millidensity_differences() {
    let a = Material::bulk("Pine", 530.0);
    let b = Material::bulk("Pine", 530.0004);
    assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
    assert!(a < Material::bulk("Pine", 530.01));
}

#[test]
fn display_name_in_other_units() {
    assert_eq!(
        Material::surface("Ripstop nylon", 0.067).display_name(&G_PER_M2),
        "Ripstop nylon (67 g/m²)"
    );
    assert_eq!(
        Material::bulk("Steel", 7850.0).display_name(&LB_PER_FT3),
        "Steel (490 lb/ft³)"
    );
}

#[test]
fn format_errors_are_reported_with_the_input() {
    let err = Material::decode("BULK|Plywood").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("BULK|Plywood"), "{message}");
    assert!(matches!(err, MaterialError::Format { .. }));
}

#[test]
fn materials_are_shared_not_copied() {
    let shared = Material::bulk("Cardboard", 680.0).shared();
    let holders: Vec<_> = (0..4).map(|_| shared.clone()).collect();
    assert_eq!(std::sync::Arc::strong_count(&shared), 5);
    assert!(holders.iter().all(|m| std::sync::Arc::ptr_eq(m, &shared)));
}
