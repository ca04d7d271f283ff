//! Material value type.
//!
//! A material is a name plus a density. How the density combines with
//! geometry depends on the [`MaterialKind`]: mass per length for lines
//! (shock cords), mass per area for surfaces (parachute canopies, fin
//! coverings) and mass per volume for bulk solids (tubes, rings, bulkheads).
//!
//! Materials never change after construction and are shared between
//! components through [`SharedMaterial`].

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{MaterialError, Result};
use crate::numeric;
use crate::units::{DensityUnit, UnitGroup};

/// Reference-counted handle used by every component that uses a material.
pub type SharedMaterial = Arc<Material>;

/// Field separator of the storable encoding.
const SEPARATOR: char = '|';

/// Dimensional kind of a material's density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaterialKind {
    /// Density in mass per length
    Line,
    /// Density in mass per area
    Surface,
    /// Density in mass per volume
    Bulk,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 3] = [MaterialKind::Line, MaterialKind::Surface, MaterialKind::Bulk];

    /// Token used in the storable encoding.
    pub fn token(&self) -> &'static str {
        match self {
            MaterialKind::Line => "LINE",
            MaterialKind::Surface => "SURFACE",
            MaterialKind::Bulk => "BULK",
        }
    }

    /// Unit family a density of this kind is expressed in.
    pub fn unit_group(&self) -> UnitGroup {
        match self {
            MaterialKind::Line => UnitGroup::Line,
            MaterialKind::Surface => UnitGroup::Surface,
            MaterialKind::Bulk => UnitGroup::Bulk,
        }
    }
}

impl Display for MaterialKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for MaterialKind {
    type Err = MaterialError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "LINE" => Ok(MaterialKind::Line),
            "SURFACE" => Ok(MaterialKind::Surface),
            "BULK" => Ok(MaterialKind::Bulk),
            other => Err(MaterialError::Argument(other.to_string())),
        }
    }
}

impl TryFrom<u8> for MaterialKind {
    type Error = MaterialError;

    fn try_from(ordinal: u8) -> Result<Self> {
        MaterialKind::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or_else(|| MaterialError::Argument(format!("ordinal {ordinal}")))
    }
}

/// An immutable material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Material {
    name: String,
    density: f64,
    kind: MaterialKind,
}

impl Material {
    /// Negative and NaN densities are stored as zero.
    pub fn new(kind: MaterialKind, name: impl Into<String>, density: f64) -> Self {
        let density = if density >= 0.0 {
            density
        } else {
            tracing::debug!(density, "clamping material density to zero");
            0.0
        };
        Self {
            name: name.into(),
            density,
            kind,
        }
    }

    pub fn line(name: impl Into<String>, density: f64) -> Self {
        Self::new(MaterialKind::Line, name, density)
    }

    pub fn surface(name: impl Into<String>, density: f64) -> Self {
        Self::new(MaterialKind::Surface, name, density)
    }

    pub fn bulk(name: impl Into<String>, density: f64) -> Self {
        Self::new(MaterialKind::Bulk, name, density)
    }

    /// Factory keyed on a raw kind ordinal (0 = line, 1 = surface, 2 = bulk).
    ///
    /// # Errors
    /// Returns [`MaterialError::Argument`] for any ordinal outside the set.
    pub fn create(kind: u8, name: impl Into<String>, density: f64) -> Result<Self> {
        let kind = MaterialKind::try_from(kind)?;
        Ok(Self::new(kind, name, density))
    }

    /// Wrap into a shareable handle.
    pub fn shared(self) -> SharedMaterial {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Density in SI units of the material's kind.
    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    pub fn unit_group(&self) -> UnitGroup {
        self.kind.unit_group()
    }

    /// Name followed by the density shown in `unit`, e.g. `Cardboard (680 kg/m³)`.
    pub fn display_name(&self, unit: &DensityUnit) -> String {
        format!("{} ({})", self.name, unit.format(self.density))
    }

    /// Storable form `KIND|name|density`.
    ///
    /// Pipes inside the name are replaced by spaces so that the three
    /// fields split unambiguously.
    pub fn encode(&self) -> String {
        let name = self.name.replace(SEPARATOR, " ");
        // `{:?}` keeps a fractional part (630.0) and round-trips exactly.
        format!("{}{SEPARATOR}{}{SEPARATOR}{:?}", self.kind.token(), name, self.density)
    }

    /// Parse the storable form produced by [`Material::encode`].
    ///
    /// # Errors
    /// Returns [`MaterialError::Format`] when the input has fewer than three
    /// fields, an unknown kind token, or a density that is not a finite
    /// number. Negative densities are clamped like in [`Material::new`].
    pub fn decode(input: &str) -> Result<Self> {
        let fields: Vec<&str> = input.splitn(3, SEPARATOR).collect();
        if fields.len() < 3 {
            tracing::debug!(input, "rejected material string without three fields");
            return Err(MaterialError::format(
                input,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        }

        let kind = fields[0]
            .parse::<MaterialKind>()
            .map_err(|_| MaterialError::format(input, format!("unknown kind {:?}", fields[0])))?;

        let density = fields[2]
            .trim()
            .parse::<f64>()
            .map_err(|e| MaterialError::format(input, format!("invalid density: {e}")))?;
        if !density.is_finite() {
            return Err(MaterialError::format(input, "density is not finite"));
        }

        Ok(Self::new(kind, fields[1], density))
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && numeric::approx_eq(self.density, other.density)
    }
}

impl Eq for Material {}

impl Hash for Material {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Density is compared with a tolerance and therefore left out.
        self.kind.hash(state);
        self.name.hash(state);
    }
}

/// Density rounded to thousandths of its unit, the resolution materials sort at.
fn millidensity(density: f64) -> f64 {
    // Adding zero folds -0.0 into 0.0 for `total_cmp`.
    (density * 1000.0).round() + 0.0
}

impl Ord for Material {
    /// Name first, then density at millidensity resolution, then kind.
    ///
    /// Densities within the equality tolerance may still land in adjacent
    /// millidensity steps, so `Equal` is not implied by `==` for very large
    /// densities.
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| millidensity(self.density).total_cmp(&millidensity(other.density)))
            .then_with(|| self.kind.cmp(&other.kind))
    }
}

impl PartialOrd for Material {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Material {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name(&self.unit_group().default_unit()))
    }
}

impl FromStr for Material {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self> {
        Material::decode(s)
    }
}

impl From<Material> for String {
    fn from(material: Material) -> Self {
        material.encode()
    }
}

impl TryFrom<String> for Material {
    type Error = MaterialError;

    fn try_from(value: String) -> Result<Self> {
        Material::decode(&value)
    }
}
