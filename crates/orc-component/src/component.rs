//! Component contract shared by all structural components.
//!
//! [`ComponentCore`] holds the state every component has (length, material,
//! radial placement, optional cluster configuration, listeners). The
//! [`Component`] trait builds the guarded mutators on top of it: each mutator
//! clamps its input, returns early when the value is unchanged, and
//! otherwise stores the value and fires exactly one change event.
//!
//! ## Radial placement
//!
//! A component may sit off its parent's axis at distance `r` in direction
//! `θ` (radians, 0 = +y). The Cartesian shift
//! ```text
//! shift_y = r·cos θ
//! shift_z = r·sin θ
//! ```
//! is cached and recomputed together with its source values.

use std::sync::Arc;

use orc_material::{SharedMaterial, numeric};

use crate::cluster::ClusterConfiguration;
use crate::coordinate::Coordinate;
use crate::events::{ChangeKind, ComponentId};
use crate::listener::{ChangeListener, ChangeNotifier};

/// State common to all components.
///
/// Setters return whether the stored value changed; they never notify.
#[derive(Debug)]
pub struct ComponentCore {
    id: ComponentId,
    name: String,
    length: f64,
    material: SharedMaterial,
    radial_position: f64,
    radial_direction: f64,
    shift_y: f64,
    shift_z: f64,
    cluster: Option<ClusterConfiguration>,
    notifier: ChangeNotifier,
}

impl ComponentCore {
    pub fn new(name: impl Into<String>, material: SharedMaterial) -> Self {
        Self {
            id: ComponentId::next(),
            name: name.into(),
            length: 0.0,
            material,
            radial_position: 0.0,
            radial_direction: 0.0,
            shift_y: 0.0,
            shift_z: 0.0,
            cluster: None,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Make the component clusterable, starting from `configuration`.
    pub fn with_cluster(mut self, configuration: ClusterConfiguration) -> Self {
        self.cluster = Some(configuration);
        self
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn material(&self) -> &SharedMaterial {
        &self.material
    }

    pub fn radial_position(&self) -> f64 {
        self.radial_position
    }

    pub fn radial_direction(&self) -> f64 {
        self.radial_direction
    }

    pub fn radial_shift(&self) -> (f64, f64) {
        (self.shift_y, self.shift_z)
    }

    pub fn cluster(&self) -> Option<ClusterConfiguration> {
        self.cluster
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut ChangeNotifier {
        &mut self.notifier
    }

    pub fn set_name(&mut self, name: &str) -> bool {
        if self.name == name {
            return false;
        }
        self.name = name.to_string();
        true
    }

    pub fn set_length(&mut self, length: f64) -> bool {
        let length = clamp_non_negative(length, "length");
        if self.length == length {
            return false;
        }
        self.length = length;
        true
    }

    pub fn set_material(&mut self, material: SharedMaterial) -> bool {
        if Arc::ptr_eq(&self.material, &material) || *self.material == *material {
            return false;
        }
        self.material = material;
        true
    }

    /// Non-finite directions are treated as zero.
    pub fn set_radial_direction(&mut self, direction: f64) -> bool {
        let direction = if direction.is_finite() {
            numeric::reduce_180(direction)
        } else {
            tracing::debug!(direction, "radial direction is not finite, using zero");
            0.0
        };
        if self.radial_direction == direction {
            return false;
        }
        self.radial_direction = direction;
        self.update_shift();
        true
    }

    pub fn set_radial_position(&mut self, position: f64) -> bool {
        let position = clamp_non_negative(position, "radial position");
        if self.radial_position == position {
            return false;
        }
        self.radial_position = position;
        self.update_shift();
        true
    }

    /// Replace the cluster configuration. Components that are not
    /// clusterable ignore the request.
    pub fn set_cluster(&mut self, configuration: ClusterConfiguration) -> bool {
        match self.cluster {
            None => {
                tracing::debug!(component = %self.id, "component is not clusterable");
                false
            }
            Some(current) if current == configuration => false,
            Some(_) => {
                self.cluster = Some(configuration);
                true
            }
        }
    }

    fn update_shift(&mut self) {
        self.shift_y = self.radial_position * self.radial_direction.cos();
        self.shift_z = self.radial_position * self.radial_direction.sin();
    }
}

/// Negative and NaN inputs become zero.
pub(crate) fn clamp_non_negative(value: f64, what: &str) -> f64 {
    if value >= 0.0 {
        value
    } else {
        tracing::debug!(value, what, "clamping to zero");
        0.0
    }
}

/// A structural component with geometry-derived mass properties.
pub trait Component {
    fn core(&self) -> &ComponentCore;

    fn core_mut(&mut self) -> &mut ComponentCore;

    /// Upcast used when handing the component to listeners.
    fn as_component(&self) -> &dyn Component;

    /// Extremal points of the component's silhouette, in component coordinates.
    fn component_bounds(&self) -> Vec<Coordinate>;

    /// CG in component coordinates, weighted by [`Component::component_mass`].
    ///
    /// The radial shift is not included; callers apply
    /// [`Component::shift_coordinates`].
    fn component_cg(&self) -> Coordinate;

    /// Mass of all cluster copies.
    fn component_mass(&self) -> f64;

    /// Inertia per unit mass about a transverse axis through the CG.
    fn longitudinal_unit_inertia(&self) -> f64;

    /// Inertia per unit mass about the component's own axis.
    fn rotational_unit_inertia(&self) -> f64;

    fn id(&self) -> ComponentId {
        self.core().id()
    }

    fn name(&self) -> &str {
        self.core().name()
    }

    fn length(&self) -> f64 {
        self.core().length()
    }

    fn material(&self) -> &SharedMaterial {
        self.core().material()
    }

    fn radial_position(&self) -> f64 {
        self.core().radial_position()
    }

    /// Direction of the radial offset in radians, within (−π, π].
    fn radial_direction(&self) -> f64 {
        self.core().radial_direction()
    }

    /// Cached `(y, z)` translation of the radial placement.
    fn radial_shift(&self) -> (f64, f64) {
        self.core().radial_shift()
    }

    fn is_clusterable(&self) -> bool {
        self.core().cluster().is_some()
    }

    fn cluster_configuration(&self) -> Option<ClusterConfiguration> {
        self.core().cluster()
    }

    /// Number of physical copies; 1 unless a cluster configuration is attached.
    fn cluster_count(&self) -> u32 {
        self.core().cluster().map_or(1, |c| c.count())
    }

    fn modification_id(&self) -> u64 {
        self.core().notifier().modification_id()
    }

    /// Absolute `(longitudinal, rotational)` inertia about the CG.
    fn component_inertia(&self) -> (f64, f64) {
        let mass = self.component_mass();
        (
            self.longitudinal_unit_inertia() * mass,
            self.rotational_unit_inertia() * mass,
        )
    }

    /// Translate points by the radial shift. The axial coordinate is unchanged.
    fn shift_coordinates(&self, mut points: Vec<Coordinate>) -> Vec<Coordinate> {
        let (dy, dz) = self.radial_shift();
        for point in points.iter_mut() {
            *point = point.add(0.0, dy, dz);
        }
        points
    }

    fn set_name(&mut self, name: &str) {
        if self.core_mut().set_name(name) {
            self.fire_component_change(ChangeKind::NonFunctional);
        }
    }

    /// Negative lengths are clamped to zero.
    fn set_length(&mut self, length: f64) {
        if self.core_mut().set_length(length) {
            self.fire_component_change(ChangeKind::Mass);
        }
    }

    fn set_material(&mut self, material: SharedMaterial) {
        if self.core_mut().set_material(material) {
            self.fire_component_change(ChangeKind::Mass);
        }
    }

    /// Direction in radians; normalized into (−π, π].
    fn set_radial_direction(&mut self, direction: f64) {
        if self.core_mut().set_radial_direction(direction) {
            self.fire_component_change(ChangeKind::Mass);
        }
    }

    /// Negative distances are clamped to zero.
    fn set_radial_position(&mut self, position: f64) {
        if self.core_mut().set_radial_position(position) {
            self.fire_component_change(ChangeKind::Mass);
        }
    }

    fn set_cluster_configuration(&mut self, configuration: ClusterConfiguration) {
        if self.core_mut().set_cluster(configuration) {
            self.fire_component_change(ChangeKind::Mass);
        }
    }

    fn add_listener(&mut self, listener: Arc<dyn ChangeListener>) {
        self.core_mut().notifier_mut().add_listener(listener);
    }

    fn remove_listener(&mut self, listener: &Arc<dyn ChangeListener>) -> bool {
        self.core_mut().notifier_mut().remove_listener(listener)
    }

    /// Record a change and deliver it to the listeners.
    ///
    /// Must only be called after the component's state is fully updated.
    fn fire_component_change(&mut self, kind: ChangeKind) {
        let id = self.id();
        let event = self.core_mut().notifier_mut().record(id, kind);
        let this = self.as_component();
        this.core().notifier().dispatch(this, &event);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use orc_material::Material;

    use super::*;
    use crate::listener::RecordingListener;

    /// Solid rod of unit cross-section, enough to exercise the provided methods.
    #[derive(Debug)]
    struct Rod {
        core: ComponentCore,
    }

    impl Rod {
        fn new() -> Self {
            Self {
                core: ComponentCore::new("Rod", Material::bulk("Aluminium", 2700.0).shared()),
            }
        }
    }

    impl Component for Rod {
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
            vec![Coordinate::origin(), Coordinate::new(self.length(), 0.0, 0.0)]
        }

        fn component_cg(&self) -> Coordinate {
            Coordinate::weighted(self.length() / 2.0, 0.0, 0.0, self.component_mass())
        }

        fn component_mass(&self) -> f64 {
            self.material().density() * self.length() * self.cluster_count() as f64
        }

        fn longitudinal_unit_inertia(&self) -> f64 {
            self.length().powi(2) / 12.0
        }

        fn rotational_unit_inertia(&self) -> f64 {
            0.0
        }
    }

    #[test]
    fn core_setters_report_changes() {
        let mut core = ComponentCore::new("Part", Material::bulk("Balsa", 170.0).shared());
        assert!(core.set_length(0.1));
        assert!(!core.set_length(0.1));
        assert!(core.set_length(-1.0));
        assert_eq!(core.length(), 0.0);
        assert!(!core.set_name("Part"));
        assert!(core.set_name("Other"));
    }

    #[test]
    fn core_accepts_equal_material_as_unchanged() {
        let balsa = Material::bulk("Balsa", 170.0).shared();
        let mut core = ComponentCore::new("Part", balsa.clone());
        assert!(!core.set_material(balsa));
        assert!(!core.set_material(Material::bulk("Balsa", 170.0).shared()));
        assert!(core.set_material(Material::surface("Balsa", 170.0).shared()));
    }

    #[test]
    fn direction_is_normalized_before_comparison() {
        let mut core = ComponentCore::new("Part", Material::bulk("Balsa", 170.0).shared());
        assert!(core.set_radial_direction(3.0 * PI / 2.0));
        assert_relative_eq!(core.radial_direction(), -PI / 2.0, epsilon = 1e-12);
        assert!(!core.set_radial_direction(-PI / 2.0));
    }

    #[test]
    fn non_finite_direction_falls_back_to_zero() {
        let mut rod = Rod::new();
        rod.set_radial_position(0.1);
        let recorder = Arc::new(RecordingListener::new());
        rod.add_listener(recorder.clone());

        rod.set_radial_direction(f64::NAN);
        rod.set_radial_direction(f64::NAN);
        assert_eq!(recorder.count(), 0);

        rod.set_radial_direction(1.0);
        rod.set_radial_direction(f64::INFINITY);
        rod.set_radial_direction(f64::NEG_INFINITY);
        rod.set_radial_direction(f64::NAN);
        assert_eq!(recorder.count(), 2);
        assert_eq!(rod.radial_direction(), 0.0);
        let (y, z) = rod.radial_shift();
        assert_relative_eq!(y, 0.1);
        assert_eq!(z, 0.0);
    }

    #[test]
    fn non_clusterable_core_ignores_cluster_changes() {
        let mut core = ComponentCore::new("Part", Material::bulk("Balsa", 170.0).shared());
        assert!(!core.set_cluster(ClusterConfiguration::Double));
        assert_eq!(core.cluster(), None);

        let mut clustered = ComponentCore::new("Mount", Material::bulk("Balsa", 170.0).shared())
            .with_cluster(ClusterConfiguration::Single);
        assert!(clustered.set_cluster(ClusterConfiguration::Double));
        assert!(!clustered.set_cluster(ClusterConfiguration::Double));
    }

    #[test]
    fn clamp_maps_nan_to_zero() {
        assert_eq!(clamp_non_negative(f64::NAN, "test"), 0.0);
        assert_eq!(clamp_non_negative(-0.5, "test"), 0.0);
        assert_eq!(clamp_non_negative(0.25, "test"), 0.25);
    }

    #[test]
    fn provided_methods_dispatch_through_the_trait() {
        let mut rod = Rod::new();
        let recorder = Arc::new(RecordingListener::new());
        rod.add_listener(recorder.clone());

        rod.set_length(0.5);
        rod.set_cluster_configuration(ClusterConfiguration::TripleRing);

        assert!(!rod.is_clusterable());
        assert_eq!(rod.cluster_count(), 1);
        assert_eq!(recorder.count(), 1);
        assert_eq!(rod.modification_id(), 1);
        assert_relative_eq!(rod.component_mass(), 1350.0);
        let (longitudinal, rotational) = rod.component_inertia();
        assert_relative_eq!(longitudinal, 1350.0 * 0.25 / 12.0);
        assert_eq!(rotational, 0.0);
    }

    #[test]
    fn shift_applies_to_every_bound() {
        let mut rod = Rod::new();
        rod.set_length(1.0);
        rod.set_radial_position(0.1);
        rod.set_radial_direction(0.0);
        let bounds = rod.shift_coordinates(rod.component_bounds());
        assert!(bounds.iter().all(|c| (c.y() - 0.1).abs() < 1e-15 && c.z() == 0.0));
        assert_eq!(bounds[1].x(), 1.0);
    }
}
