//! Component change events.

use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a component instance, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub u64);

impl ComponentId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a change may have affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Mass, CG or inertia may differ
    Mass,
    /// Nothing physical changed (name, comments)
    NonFunctional,
}

impl ChangeKind {
    pub fn affects_mass(&self) -> bool {
        matches!(self, ChangeKind::Mass)
    }
}

/// A change raised by a component after the new state is in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentChangeEvent {
    /// Component that changed.
    pub source: ComponentId,
    pub kind: ChangeKind,
    /// Value of the component's modification counter after the change.
    pub modification: u64,
}

impl ComponentChangeEvent {
    pub fn new(source: ComponentId, kind: ChangeKind, modification: u64) -> Self {
        Self {
            source,
            kind,
            modification,
        }
    }
}
