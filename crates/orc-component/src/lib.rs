//! Structural rocket components and their mass properties.
//!
//! This crate provides:
//! - **Component contract** ([`Component`]) exposing mass, CG, unit inertias,
//!   bounds and radial placement, with guarded mutators
//! - **Ring components** (inner tubes, couplers, centering rings, bulkheads,
//!   engine blocks) integrated as hollow cylinders
//! - **Change notification** ([`ChangeNotifier`], [`ChangeListener`]) fired
//!   once per state-changing edit so aggregates can be invalidated
//! - **Cluster configurations** contributing a copy count to mass
//! - **Component defaults** loadable from JSON

pub mod cluster;
pub mod component;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod events;
pub mod listener;
pub mod ring;

pub use cluster::ClusterConfiguration;
pub use component::{Component, ComponentCore};
pub use config::{ComponentConfig, RingDefaults};
pub use coordinate::Coordinate;
pub use error::{ConfigError, Result};
pub use events::{ChangeKind, ComponentChangeEvent, ComponentId};
pub use listener::{ChangeListener, ChangeNotifier, MassCache, RecordingListener, TracingListener};
pub use ring::{
    RingComponent, RingKind, ring_longitudinal_unit_inertia, ring_mass, ring_rotational_unit_inertia,
};
