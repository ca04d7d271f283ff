//! Materials for rocket structural components.
//!
//! This crate provides:
//! - **Material** values whose density is interpreted per length, per area or
//!   per volume depending on the [`MaterialKind`]
//! - **Storable encoding** (`KIND|name|density`) used when materials are
//!   persisted or exchanged
//! - **Density units** grouped by material kind for display
//! - **Material library** with the default presets offered by the editor

pub mod error;
pub mod library;
pub mod material;
pub mod numeric;
pub mod units;

pub use error::{MaterialError, Result};
pub use library::MaterialLibrary;
pub use material::{Material, MaterialKind, SharedMaterial};
pub use units::{DensityUnit, UnitGroup};
