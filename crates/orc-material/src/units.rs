//! Density units grouped by material kind.
//!
//! Densities are stored in SI (kg/m, kg/m², kg/m³). A [`DensityUnit`] only
//! affects how a density is shown to the user.

use serde::{Deserialize, Serialize};

use crate::numeric;

/// A display unit for density values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityUnit {
    /// Unit symbol, e.g. `kg/m³`
    pub symbol: &'static str,
    /// Size of one unit expressed in SI
    pub multiplier: f64,
}

impl DensityUnit {
    pub const fn new(symbol: &'static str, multiplier: f64) -> Self {
        Self { symbol, multiplier }
    }

    /// Convert an SI value into this unit.
    pub fn from_si(&self, value: f64) -> f64 {
        value / self.multiplier
    }

    /// Convert a value in this unit into SI.
    pub fn to_si(&self, value: f64) -> f64 {
        value * self.multiplier
    }

    /// Format an SI value in this unit with three significant digits.
    pub fn format(&self, value: f64) -> String {
        let shown = numeric::significant(self.from_si(value), 3);
        format!("{} {}", shown, self.symbol)
    }
}

pub const KG_PER_M: DensityUnit = DensityUnit::new("kg/m", 1.0);
pub const G_PER_M: DensityUnit = DensityUnit::new("g/m", 0.001);

pub const KG_PER_M2: DensityUnit = DensityUnit::new("kg/m²", 1.0);
pub const G_PER_M2: DensityUnit = DensityUnit::new("g/m²", 0.001);
pub const OZ_PER_IN2: DensityUnit = DensityUnit::new("oz/in²", 43.941_848_727);

pub const KG_PER_M3: DensityUnit = DensityUnit::new("kg/m³", 1.0);
pub const G_PER_CM3: DensityUnit = DensityUnit::new("g/cm³", 1000.0);
pub const LB_PER_FT3: DensityUnit = DensityUnit::new("lb/ft³", 16.018_463_4);

const LINE_UNITS: &[DensityUnit] = &[KG_PER_M, G_PER_M];
const SURFACE_UNITS: &[DensityUnit] = &[KG_PER_M2, G_PER_M2, OZ_PER_IN2];
const BULK_UNITS: &[DensityUnit] = &[KG_PER_M3, G_PER_CM3, LB_PER_FT3];

/// The unit family a density belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitGroup {
    /// Mass per length
    Line,
    /// Mass per area
    Surface,
    /// Mass per volume
    Bulk,
}

impl UnitGroup {
    /// All units of the group; the first one is the default.
    pub fn units(&self) -> &'static [DensityUnit] {
        match self {
            UnitGroup::Line => LINE_UNITS,
            UnitGroup::Surface => SURFACE_UNITS,
            UnitGroup::Bulk => BULK_UNITS,
        }
    }

    pub fn default_unit(&self) -> DensityUnit {
        self.units()[0]
    }

    /// Look a unit of this group up by its symbol.
    pub fn find(&self, symbol: &str) -> Option<DensityUnit> {
        self.units().iter().copied().find(|u| u.symbol == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_units_are_si() {
        assert_eq!(UnitGroup::Line.default_unit(), KG_PER_M);
        assert_eq!(UnitGroup::Surface.default_unit(), KG_PER_M2);
        assert_eq!(UnitGroup::Bulk.default_unit(), KG_PER_M3);
    }

    #[test]
    fn converts_and_formats() {
        assert_relative_eq!(G_PER_CM3.from_si(680.0), 0.68);
        assert_relative_eq!(G_PER_CM3.to_si(0.68), 680.0);
        assert_eq!(KG_PER_M3.format(680.0), "680 kg/m³");
        assert_eq!(G_PER_CM3.format(680.0), "0.68 g/cm³");
        assert_eq!(G_PER_M.format(0.0013), "1.3 g/m");
        // One ounce per square inch: 0.028349523125 kg / 0.00064516 m².
        assert_relative_eq!(
            OZ_PER_IN2.to_si(1.0),
            0.028_349_523_125 / 0.000_645_16,
            max_relative = 1e-9
        );
        assert_eq!(OZ_PER_IN2.format(0.067), "0.00152 oz/in²");
    }

    #[test]
    fn finds_units_by_symbol() {
        assert_eq!(UnitGroup::Bulk.find("lb/ft³"), Some(LB_PER_FT3));
        assert!(UnitGroup::Line.find("kg/m³").is_none());
    }
}
