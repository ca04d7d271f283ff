//! Library of named materials offered when building components.

use std::collections::BTreeMap;

use crate::error::{MaterialError, Result};
use crate::material::{Material, MaterialKind, SharedMaterial};

/// Named material presets, keyed by kind and name.
///
/// Registering a material with an existing kind and name replaces it.
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: BTreeMap<(MaterialKind, String), SharedMaterial>,
}

impl MaterialLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library with the built-in presets.
    pub fn with_defaults() -> Self {
        let mut library = Self::new();
        for material in default_materials() {
            library.register(material);
        }
        library
    }

    /// Add a material, returning the shared handle stored in the library.
    pub fn register(&mut self, material: Material) -> SharedMaterial {
        let shared = material.shared();
        self.materials.insert(
            (shared.kind(), shared.name().to_string()),
            SharedMaterial::clone(&shared),
        );
        shared
    }

    /// Look a material up by kind and name.
    pub fn get(&self, kind: MaterialKind, name: &str) -> Option<SharedMaterial> {
        self.materials.get(&(kind, name.to_string())).cloned()
    }

    /// All materials of one kind in material order.
    pub fn of_kind(&self, kind: MaterialKind) -> Vec<SharedMaterial> {
        let mut list: Vec<SharedMaterial> = self
            .materials
            .values()
            .filter(|m| m.kind() == kind)
            .cloned()
            .collect();
        list.sort();
        list
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Register one encoded material per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. Returns the number
    /// of materials registered.
    ///
    /// # Errors
    /// The first malformed line aborts loading with a [`MaterialError::Format`]
    /// whose reason carries the 1-based line number.
    pub fn load_encoded(&mut self, text: &str) -> Result<usize> {
        let mut count = 0usize;
        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let material = Material::decode(trimmed).map_err(|err| match err {
                MaterialError::Format { input, reason } => MaterialError::Format {
                    input,
                    reason: format!("line {}: {reason}", index + 1),
                },
                other => other,
            })?;
            self.register(material);
            count += 1;
        }
        tracing::debug!(count, "loaded encoded materials");
        Ok(count)
    }
}

// ─── Built-in presets ─────────────────────────────────────────────────

fn default_materials() -> Vec<Material> {
    vec![
        Material::bulk("Acrylic", 1190.0),
        Material::bulk("Aluminum", 2700.0),
        Material::bulk("Balsa", 170.0),
        Material::bulk("Basswood", 500.0),
        Material::bulk("Birch", 670.0),
        Material::bulk("Brass", 8600.0),
        Material::bulk("Cardboard", 680.0),
        Material::bulk("Carbon fiber", 1780.0),
        Material::bulk("Cork", 240.0),
        Material::bulk("Depron (XPS)", 40.0),
        Material::bulk("Fiberglass", 1850.0),
        Material::bulk("Kraft phenolic", 950.0),
        Material::bulk("Maple", 755.0),
        Material::bulk("Paper (office)", 820.0),
        Material::bulk("Pine", 530.0),
        Material::bulk("Plywood (birch)", 630.0),
        Material::bulk("Polycarbonate (Lexan)", 1200.0),
        Material::bulk("Polystyrene", 1050.0),
        Material::bulk("PVC", 1390.0),
        Material::bulk("Spruce", 450.0),
        Material::bulk("Steel", 7850.0),
        Material::bulk("Styrofoam (generic EPS)", 20.0),
        Material::bulk("Titanium", 4500.0),
        Material::bulk("Quantum tubing", 1050.0),
        Material::bulk("Blue tube", 1300.0),
        Material::surface("Ripstop nylon", 0.067),
        Material::surface("Mylar", 0.021),
        Material::surface("Polyethylene (thin)", 0.015),
        Material::surface("Polyethylene (heavy)", 0.040),
        Material::surface("Silk", 0.060),
        Material::surface("Paper (office)", 0.080),
        Material::surface("Cellophane", 0.018),
        Material::surface("Crêpe paper", 0.025),
        Material::line("Thread (heavy-duty)", 0.0003),
        Material::line("Elastic cord (round 2 mm, 1/16 in)", 0.0018),
        Material::line("Elastic cord (flat 6 mm, 1/4 in)", 0.0043),
        Material::line("Elastic cord (flat 12 mm, 1/2 in)", 0.008),
        Material::line("Elastic cord (flat 19 mm, 3/4 in)", 0.0012),
        Material::line("Elastic cord (flat 25 mm, 1 in)", 0.0016),
        Material::line("Braided nylon (2 mm, 1/16 in)", 0.001),
        Material::line("Braided nylon (3 mm, 1/8 in)", 0.0035),
        Material::line("Tubular nylon (11 mm, 7/16 in)", 0.013),
        Material::line("Tubular nylon (14 mm, 9/16 in)", 0.016),
        Material::line("Tubular nylon (25 mm, 1 in)", 0.029),
        Material::line("Kevlar thread", 0.0013),
    ]
}
