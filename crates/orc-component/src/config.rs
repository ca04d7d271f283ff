//! Default dimensions and materials for newly created components.
//!
//! The defaults can be overridden from a JSON document; missing entries
//! fall back to the built-in values.
//!
//! ```json
//! {
//!   "centering_ring": {
//!     "material": "BULK|Plywood (birch)|630.0",
//!     "length": 0.003,
//!     "outer_radius": 0.0,
//!     "inner_radius": 0.0,
//!     "outer_radius_automatic": true,
//!     "inner_radius_automatic": true
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;

use orc_material::Material;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ring::RingKind;

/// Initial values for one ring kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingDefaults {
    pub material: Material,
    /// [m]
    pub length: f64,
    /// [m]
    pub outer_radius: f64,
    /// [m]
    pub inner_radius: f64,
    #[serde(default)]
    pub outer_radius_automatic: bool,
    #[serde(default)]
    pub inner_radius_automatic: bool,
}

/// Component defaults, one entry per ring kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    pub inner_tube: RingDefaults,
    pub tube_coupler: RingDefaults,
    pub centering_ring: RingDefaults,
    pub bulkhead: RingDefaults,
    pub engine_block: RingDefaults,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        let cardboard = Material::bulk("Cardboard", 680.0);
        let plywood = Material::bulk("Plywood (birch)", 630.0);
        Self {
            inner_tube: RingDefaults {
                material: cardboard.clone(),
                length: 0.07,
                outer_radius: 0.009,
                inner_radius: 0.0085,
                outer_radius_automatic: false,
                inner_radius_automatic: false,
            },
            tube_coupler: RingDefaults {
                material: cardboard.clone(),
                length: 0.06,
                outer_radius: 0.025,
                inner_radius: 0.0245,
                outer_radius_automatic: true,
                inner_radius_automatic: false,
            },
            centering_ring: RingDefaults {
                material: plywood.clone(),
                length: 0.002,
                outer_radius: 0.025,
                inner_radius: 0.009,
                outer_radius_automatic: true,
                inner_radius_automatic: true,
            },
            bulkhead: RingDefaults {
                material: plywood,
                length: 0.002,
                outer_radius: 0.025,
                inner_radius: 0.0,
                outer_radius_automatic: true,
                inner_radius_automatic: false,
            },
            engine_block: RingDefaults {
                material: cardboard,
                length: 0.005,
                outer_radius: 0.009,
                inner_radius: 0.004,
                outer_radius_automatic: true,
                inner_radius_automatic: false,
            },
        }
    }
}

impl ComponentConfig {
    pub fn defaults(&self, kind: RingKind) -> &RingDefaults {
        match kind {
            RingKind::InnerTube => &self.inner_tube,
            RingKind::TubeCoupler => &self.tube_coupler,
            RingKind::CenteringRing => &self.centering_ring,
            RingKind::Bulkhead => &self.bulkhead,
            RingKind::EngineBlock => &self.engine_block,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded component config");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
