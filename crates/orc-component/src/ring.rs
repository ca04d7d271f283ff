//! Hollow cylindrical components: inner tubes, tube couplers, centering
//! rings, bulkheads and engine blocks.
//!
//! ## Mass properties
//!
//! A ring of length `L`, outer radius `Ro`, inner radius `Ri` and density `ρ`
//! is integrated as a right hollow cylinder:
//! ```text
//! m     = ρ·π·(Ro² − Ri²)·L
//! I_lon = (3·(Ro² + Ri²) + L²) / 12     per unit mass, transverse axis
//! I_rot = (Ro² + Ri²) / 2               per unit mass, own axis
//! ```
//! The density is used as stored; pick a bulk material for a volumetric
//! interpretation.
//!
//! ## Automatic radii
//!
//! Either radius may be flagged automatic, meaning its value is solved from
//! the neighbouring components by the tree traversal. The flag never alters
//! the stored number; [`RingComponent::resolve_automatic`] is the entry point
//! the traversal uses to write the solved values.

use std::f64::consts::PI;
use std::fmt::{Display, Formatter};

use orc_material::SharedMaterial;
use serde::{Deserialize, Serialize};

use crate::cluster::ClusterConfiguration;
use crate::component::{Component, ComponentCore, clamp_non_negative};
use crate::config::ComponentConfig;
use crate::coordinate::Coordinate;
use crate::events::ChangeKind;

/// Mass of a hollow cylinder.
pub fn ring_mass(outer_radius: f64, inner_radius: f64, length: f64, density: f64) -> f64 {
    density * PI * (outer_radius.powi(2) - inner_radius.powi(2)) * length
}

/// Inertia per unit mass of a hollow cylinder about a diameter through its CG.
pub fn ring_longitudinal_unit_inertia(outer_radius: f64, inner_radius: f64, length: f64) -> f64 {
    (3.0 * (outer_radius.powi(2) + inner_radius.powi(2)) + length.powi(2)) / 12.0
}

/// Inertia per unit mass of a hollow cylinder about its axis.
pub fn ring_rotational_unit_inertia(outer_radius: f64, inner_radius: f64) -> f64 {
    (outer_radius.powi(2) + inner_radius.powi(2)) / 2.0
}

/// Structural role of a ring component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingKind {
    /// Motor mount or internal tube; the only clusterable ring
    InnerTube,
    TubeCoupler,
    CenteringRing,
    /// Solid disc; the inner radius is always zero
    Bulkhead,
    EngineBlock,
}

impl RingKind {
    pub const ALL: [RingKind; 5] = [
        RingKind::InnerTube,
        RingKind::TubeCoupler,
        RingKind::CenteringRing,
        RingKind::Bulkhead,
        RingKind::EngineBlock,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RingKind::InnerTube => "Inner tube",
            RingKind::TubeCoupler => "Tube coupler",
            RingKind::CenteringRing => "Centering ring",
            RingKind::Bulkhead => "Bulkhead",
            RingKind::EngineBlock => "Engine block",
        }
    }

    /// Identifier used in configuration files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            RingKind::InnerTube => "inner_tube",
            RingKind::TubeCoupler => "tube_coupler",
            RingKind::CenteringRing => "centering_ring",
            RingKind::Bulkhead => "bulkhead",
            RingKind::EngineBlock => "engine_block",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }

    pub fn is_clusterable(&self) -> bool {
        matches!(self, RingKind::InnerTube)
    }

    fn is_solid(&self) -> bool {
        matches!(self, RingKind::Bulkhead)
    }
}

impl Display for RingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A hollow cylindrical component.
///
/// `outer_radius >= inner_radius` holds after every edit.
#[derive(Debug)]
pub struct RingComponent {
    core: ComponentCore,
    kind: RingKind,
    outer_radius: f64,
    inner_radius: f64,
    outer_radius_automatic: bool,
    inner_radius_automatic: bool,
}

impl RingComponent {
    /// Create a ring with zero dimensions and explicit radii.
    pub fn new(kind: RingKind, material: SharedMaterial) -> Self {
        let core = ComponentCore::new(kind.label(), material);
        let core = if kind.is_clusterable() {
            core.with_cluster(ClusterConfiguration::Single)
        } else {
            core
        };
        Self {
            core,
            kind,
            outer_radius: 0.0,
            inner_radius: 0.0,
            outer_radius_automatic: false,
            inner_radius_automatic: false,
        }
    }

    /// Create a ring from the configured defaults of its kind.
    ///
    /// No listeners are attached yet, so no events are observable.
    pub fn from_config(kind: RingKind, config: &ComponentConfig) -> Self {
        let defaults = config.defaults(kind);
        let mut ring = Self::new(kind, defaults.material.clone().shared());
        ring.set_length(defaults.length);
        ring.set_outer_radius(defaults.outer_radius);
        ring.set_inner_radius(defaults.inner_radius);
        ring.set_outer_radius_automatic(defaults.outer_radius_automatic);
        ring.set_inner_radius_automatic(defaults.inner_radius_automatic);
        ring
    }

    /// Builder-style dimensions, mainly for tests and tools.
    pub fn with_dimensions(mut self, outer_radius: f64, inner_radius: f64, length: f64) -> Self {
        self.set_outer_radius(outer_radius);
        self.set_inner_radius(inner_radius);
        self.set_length(length);
        self
    }

    pub fn kind(&self) -> RingKind {
        self.kind
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    pub fn is_outer_radius_automatic(&self) -> bool {
        self.outer_radius_automatic
    }

    pub fn is_inner_radius_automatic(&self) -> bool {
        self.inner_radius_automatic
    }

    /// Negative radii are clamped to zero; the inner radius shrinks with it
    /// when it would exceed the new outer radius.
    pub fn set_outer_radius(&mut self, radius: f64) {
        let radius = clamp_non_negative(radius, "outer radius");
        if self.outer_radius == radius {
            return;
        }
        self.outer_radius = radius;
        if self.inner_radius > radius {
            self.inner_radius = radius;
        }
        self.fire_component_change(ChangeKind::Mass);
    }

    /// Negative radii are clamped to zero; the outer radius grows with it
    /// when the new inner radius exceeds it. Ignored for bulkheads.
    pub fn set_inner_radius(&mut self, radius: f64) {
        if self.kind.is_solid() {
            return;
        }
        let radius = clamp_non_negative(radius, "inner radius");
        if self.inner_radius == radius {
            return;
        }
        self.inner_radius = radius;
        if self.outer_radius < radius {
            self.outer_radius = radius;
        }
        self.fire_component_change(ChangeKind::Mass);
    }

    /// Set the wall thickness by moving the inner radius. The thickness is
    /// clamped into `[0, outer_radius]`. Ignored for bulkheads.
    pub fn set_thickness(&mut self, thickness: f64) {
        if self.kind.is_solid() {
            return;
        }
        let thickness = clamp_non_negative(thickness, "thickness").min(self.outer_radius);
        let inner = self.outer_radius - thickness;
        if self.inner_radius == inner {
            return;
        }
        self.inner_radius = inner;
        self.fire_component_change(ChangeKind::Mass);
    }

    pub fn set_outer_radius_automatic(&mut self, automatic: bool) {
        if self.outer_radius_automatic == automatic {
            return;
        }
        self.outer_radius_automatic = automatic;
        self.fire_component_change(ChangeKind::Mass);
    }

    pub fn set_inner_radius_automatic(&mut self, automatic: bool) {
        if self.inner_radius_automatic == automatic {
            return;
        }
        self.inner_radius_automatic = automatic;
        self.fire_component_change(ChangeKind::Mass);
    }

    /// Write radii solved from the surrounding components.
    ///
    /// Only the dimensions flagged automatic are updated; the others keep
    /// their explicit values. At most one event fires for the whole update.
    pub fn resolve_automatic(&mut self, outer_radius: f64, inner_radius: f64) {
        let mut outer = self.outer_radius;
        let mut inner = self.inner_radius;
        if self.outer_radius_automatic {
            outer = clamp_non_negative(outer_radius, "outer radius");
        }
        if self.inner_radius_automatic && !self.kind.is_solid() {
            inner = clamp_non_negative(inner_radius, "inner radius");
        }
        if inner > outer {
            // The explicitly held dimension wins.
            if self.outer_radius_automatic && !self.inner_radius_automatic {
                outer = inner;
            } else {
                inner = outer;
            }
        }
        if outer == self.outer_radius && inner == self.inner_radius {
            return;
        }
        self.outer_radius = outer;
        self.inner_radius = inner;
        self.fire_component_change(ChangeKind::Mass);
    }
}

impl Component for RingComponent {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn as_component(&self) -> &dyn Component {
        self
    }

    fn component_bounds(&self) -> Vec<Coordinate> {
        let r = self.outer_radius;
        let length = self.length();
        let mut bounds = Vec::with_capacity(8);
        for x in [0.0, length] {
            bounds.push(Coordinate::new(x, -r, -r));
            bounds.push(Coordinate::new(x, r, -r));
            bounds.push(Coordinate::new(x, r, r));
            bounds.push(Coordinate::new(x, -r, r));
        }
        bounds
    }

    fn component_cg(&self) -> Coordinate {
        Coordinate::weighted(self.length() / 2.0, 0.0, 0.0, self.component_mass())
    }

    fn component_mass(&self) -> f64 {
        ring_mass(
            self.outer_radius,
            self.inner_radius,
            self.length(),
            self.material().density(),
        ) * f64::from(self.cluster_count())
    }

    fn longitudinal_unit_inertia(&self) -> f64 {
        ring_longitudinal_unit_inertia(self.outer_radius, self.inner_radius, self.length())
    }

    fn rotational_unit_inertia(&self) -> f64 {
        ring_rotational_unit_inertia(self.outer_radius, self.inner_radius)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use orc_material::Material;

    use super::*;
    use crate::listener::RecordingListener;

    fn cardboard() -> SharedMaterial {
        Material::bulk("Cardboard", 680.0).shared()
    }

    fn tube() -> RingComponent {
        RingComponent::new(RingKind::InnerTube, Material::bulk("Polycarbonate", 1200.0).shared())
            .with_dimensions(0.02, 0.018, 0.1)
    }

    #[test]
    fn mass_is_hollow_cylinder_volume_times_density() {
        let expected = 1200.0 * PI * (0.02f64.powi(2) - 0.018f64.powi(2)) * 0.1;
        assert_relative_eq!(tube().component_mass(), expected, max_relative = 1e-12);
        assert_relative_eq!(tube().component_mass(), 0.02865, epsilon = 1e-5);
    }

    #[test]
    fn mass_is_linear_in_length_and_density() {
        let base = ring_mass(0.05, 0.04, 0.2, 700.0);
        assert_relative_eq!(ring_mass(0.05, 0.04, 0.4, 700.0), 2.0 * base, max_relative = 1e-12);
        assert_relative_eq!(ring_mass(0.05, 0.04, 0.2, 2100.0), 3.0 * base, max_relative = 1e-12);
    }

    #[test]
    fn unit_inertias_match_closed_form() {
        assert_relative_eq!(
            ring_longitudinal_unit_inertia(0.02, 0.018, 0.1),
            (3.0 * (0.0004 + 0.000324) + 0.01) / 12.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            ring_rotational_unit_inertia(0.02, 0.018),
            (0.0004 + 0.000324) / 2.0,
            max_relative = 1e-12
        );
        // A thin-walled tube approaches r² about its axis.
        assert_relative_eq!(ring_rotational_unit_inertia(1.0, 1.0), 1.0);
    }

    #[test]
    fn cg_is_at_half_length_with_mass_weight() {
        let ring = tube();
        let cg = ring.component_cg();
        assert_relative_eq!(cg.x(), 0.05);
        assert_eq!(cg.y(), 0.0);
        assert_eq!(cg.z(), 0.0);
        assert_relative_eq!(cg.weight, ring.component_mass());
    }

    #[test]
    fn bounds_span_both_ends_at_outer_radius() {
        let bounds = tube().component_bounds();
        assert_eq!(bounds.len(), 8);
        assert!(bounds.iter().all(|c| c.y().abs() == 0.02 && c.z().abs() == 0.02));
        assert_eq!(bounds.iter().filter(|c| c.x() == 0.0).count(), 4);
        assert_eq!(bounds.iter().filter(|c| c.x() == 0.1).count(), 4);
    }

    #[test]
    fn outer_radius_below_inner_drags_inner_down() {
        let mut ring = tube();
        ring.set_outer_radius(0.01);
        assert_eq!(ring.outer_radius(), 0.01);
        assert_eq!(ring.inner_radius(), 0.01);
        assert_eq!(ring.thickness(), 0.0);
    }

    #[test]
    fn inner_radius_above_outer_pushes_outer_up() {
        let mut ring = tube();
        ring.set_inner_radius(0.03);
        assert_eq!(ring.inner_radius(), 0.03);
        assert_eq!(ring.outer_radius(), 0.03);
    }

    #[test]
    fn thickness_moves_inner_radius_and_is_clamped() {
        let mut ring = tube();
        ring.set_thickness(0.005);
        assert_relative_eq!(ring.inner_radius(), 0.015);
        ring.set_thickness(1.0);
        assert_eq!(ring.inner_radius(), 0.0);
        ring.set_thickness(-1.0);
        assert_eq!(ring.inner_radius(), 0.02);
    }

    #[test]
    fn negative_radii_are_clamped() {
        let mut ring = tube();
        ring.set_inner_radius(-0.01);
        assert_eq!(ring.inner_radius(), 0.0);
        ring.set_outer_radius(-0.01);
        assert_eq!(ring.outer_radius(), 0.0);
    }

    #[test]
    fn automatic_flags_notify_but_keep_values() {
        let mut ring = tube();
        let recorder = Arc::new(RecordingListener::new());
        ring.add_listener(recorder.clone());

        ring.set_outer_radius_automatic(true);
        ring.set_outer_radius_automatic(true);
        ring.set_inner_radius_automatic(true);
        ring.set_inner_radius_automatic(false);

        assert!(ring.is_outer_radius_automatic());
        assert!(!ring.is_inner_radius_automatic());
        assert_eq!(ring.outer_radius(), 0.02);
        assert_eq!(recorder.count(), 3);
    }

    #[test]
    fn explicit_radius_edit_keeps_automatic_flag() {
        let mut ring = tube();
        ring.set_outer_radius_automatic(true);
        ring.set_outer_radius(0.03);
        assert!(ring.is_outer_radius_automatic());
    }

    #[test]
    fn resolve_only_touches_automatic_dimensions() {
        let mut ring = RingComponent::new(RingKind::CenteringRing, cardboard())
            .with_dimensions(0.03, 0.01, 0.003);
        ring.set_outer_radius_automatic(true);
        let recorder = Arc::new(RecordingListener::new());
        ring.add_listener(recorder.clone());

        ring.resolve_automatic(0.0325, 0.5);
        assert_eq!(ring.outer_radius(), 0.0325);
        assert_eq!(ring.inner_radius(), 0.01);
        assert_eq!(recorder.count(), 1);

        ring.resolve_automatic(0.0325, 0.0);
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn resolve_keeps_explicit_dimension_when_conflicting() {
        let mut ring = RingComponent::new(RingKind::CenteringRing, cardboard())
            .with_dimensions(0.03, 0.02, 0.003);
        ring.set_outer_radius_automatic(true);
        ring.resolve_automatic(0.015, 0.0);
        assert_eq!(ring.inner_radius(), 0.02);
        assert_eq!(ring.outer_radius(), 0.02);
    }

    #[test]
    fn bulkhead_stays_solid() {
        let mut bulkhead =
            RingComponent::new(RingKind::Bulkhead, cardboard()).with_dimensions(0.03, 0.01, 0.005);
        assert_eq!(bulkhead.inner_radius(), 0.0);
        bulkhead.set_thickness(0.01);
        assert_eq!(bulkhead.inner_radius(), 0.0);
        assert_relative_eq!(
            bulkhead.component_mass(),
            680.0 * PI * 0.0009 * 0.005,
            max_relative = 1e-12
        );
    }

    #[test]
    fn kind_keys_round_trip() {
        for kind in RingKind::ALL {
            assert_eq!(RingKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(RingKind::from_key("nose_cone"), None);
    }

    #[test]
    fn only_inner_tubes_cluster() {
        let mut tube = tube();
        tube.set_cluster_configuration(ClusterConfiguration::TripleRing);
        assert_eq!(tube.cluster_count(), 3);

        let mut coupler = RingComponent::new(RingKind::TubeCoupler, cardboard())
            .with_dimensions(0.02, 0.019, 0.05);
        let recorder = Arc::new(RecordingListener::new());
        coupler.add_listener(recorder.clone());
        coupler.set_cluster_configuration(ClusterConfiguration::Double);
        assert_eq!(coupler.cluster_count(), 1);
        assert!(!coupler.is_clusterable());
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn cluster_count_scales_mass_but_not_unit_inertia() {
        let single = tube();
        let mut quad = tube();
        quad.set_cluster_configuration(ClusterConfiguration::QuadRow);
        assert_relative_eq!(
            quad.component_mass(),
            4.0 * single.component_mass(),
            max_relative = 1e-12
        );
        assert_eq!(quad.longitudinal_unit_inertia(), single.longitudinal_unit_inertia());
        assert_relative_eq!(quad.component_cg().weight, quad.component_mass());
    }
}
