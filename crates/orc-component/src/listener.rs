//! Change listeners and the per-component notifier.
//!
//! Dispatch is synchronous: a mutator updates its state, bumps the
//! modification counters and then calls every registered listener in
//! registration order on the calling thread before returning. Listeners
//! receive the component by shared reference, so they observe the fully
//! updated state and cannot re-enter a mutator.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::component::Component;
use crate::coordinate::Coordinate;
use crate::events::{ChangeKind, ComponentChangeEvent, ComponentId};

/// Receives change events raised by components.
pub trait ChangeListener: Send + Sync {
    /// Called once per state-changing mutation, after the state is consistent.
    fn component_changed(&self, component: &dyn Component, event: &ComponentChangeEvent);

    /// Returns a human-readable name for this listener.
    fn name(&self) -> &str;
}

/// Listener registry and modification counters owned by a component.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<Arc<dyn ChangeListener>>,
    modification: u64,
    mass_modification: u64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. The same listener may be registered on many components.
    pub fn add_listener(&mut self, listener: Arc<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    /// Removes a listener by identity. Returns whether it was registered.
    pub fn remove_listener<L: ChangeListener + ?Sized>(&mut self, listener: &Arc<L>) -> bool {
        let target = Arc::as_ptr(listener) as *const ();
        let before = self.listeners.len();
        self.listeners
            .retain(|registered| Arc::as_ptr(registered) as *const () != target);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of events fired so far.
    pub fn modification_id(&self) -> u64 {
        self.modification
    }

    /// Number of mass-affecting events fired so far.
    pub fn mass_modification_id(&self) -> u64 {
        self.mass_modification
    }

    /// Advance the counters and build the event for a change that just happened.
    pub(crate) fn record(&mut self, source: ComponentId, kind: ChangeKind) -> ComponentChangeEvent {
        self.modification += 1;
        if kind.affects_mass() {
            self.mass_modification += 1;
        }
        ComponentChangeEvent::new(source, kind, self.modification)
    }

    /// Deliver an event to every listener, in registration order.
    pub fn dispatch(&self, component: &dyn Component, event: &ComponentChangeEvent) {
        tracing::trace!(
            source = %event.source,
            kind = ?event.kind,
            listeners = self.listeners.len(),
            "dispatching component change"
        );
        for listener in &self.listeners {
            listener.component_changed(component, event);
        }
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.listeners.iter().map(|l| l.name()).collect();
        f.debug_struct("ChangeNotifier")
            .field("listeners", &names)
            .field("modification", &self.modification)
            .field("mass_modification", &self.mass_modification)
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A change as seen by [`RecordingListener`], with the values readable at dispatch time.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedChange {
    pub event: ComponentChangeEvent,
    pub length: f64,
    pub mass: f64,
}

/// Collects every event it receives, for tests and inspection.
#[derive(Debug, Default)]
pub struct RecordingListener {
    changes: Mutex<Vec<RecordedChange>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> Vec<RecordedChange> {
        lock(&self.changes).clone()
    }

    pub fn events(&self) -> Vec<ComponentChangeEvent> {
        lock(&self.changes).iter().map(|c| c.event).collect()
    }

    pub fn count(&self) -> usize {
        lock(&self.changes).len()
    }

    pub fn clear(&self) {
        lock(&self.changes).clear();
    }
}

impl ChangeListener for RecordingListener {
    fn component_changed(&self, component: &dyn Component, event: &ComponentChangeEvent) {
        lock(&self.changes).push(RecordedChange {
            event: *event,
            length: component.length(),
            mass: component.component_mass(),
        });
    }

    fn name(&self) -> &str {
        "recording_listener"
    }
}

/// Logs events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingListener;

impl ChangeListener for TracingListener {
    fn component_changed(&self, component: &dyn Component, event: &ComponentChangeEvent) {
        tracing::debug!(
            component = %event.source,
            name = component.name(),
            kind = ?event.kind,
            modification = event.modification,
            "component_changed"
        );
    }

    fn name(&self) -> &str {
        "tracing_listener"
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedCg {
    source: ComponentId,
    stamp: u64,
    cg: Coordinate,
}

/// Memoized CG and mass of a component.
///
/// The cached value is dropped when a mass event arrives and is also
/// checked against the component's mass modification counter, so a
/// stale value is never returned even if the cache was not registered
/// as a listener.
#[derive(Debug, Default)]
pub struct MassCache {
    cached: Mutex<Option<CachedCg>>,
    recomputations: AtomicUsize,
}

impl MassCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// CG of `component` weighted by its mass.
    pub fn cg(&self, component: &dyn Component) -> Coordinate {
        let stamp = component.core().notifier().mass_modification_id();
        let mut cached = lock(&self.cached);
        if let Some(entry) = cached.as_ref() {
            if entry.source == component.id() && entry.stamp == stamp {
                return entry.cg;
            }
        }

        let cg = component.component_cg();
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        *cached = Some(CachedCg {
            source: component.id(),
            stamp,
            cg,
        });
        cg
    }

    pub fn mass(&self, component: &dyn Component) -> f64 {
        self.cg(component).weight
    }

    pub fn is_valid(&self) -> bool {
        lock(&self.cached).is_some()
    }

    /// Number of times the CG was actually computed.
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }
}

impl ChangeListener for MassCache {
    fn component_changed(&self, _component: &dyn Component, event: &ComponentChangeEvent) {
        if event.kind.affects_mass() {
            *lock(&self.cached) = None;
        }
    }

    fn name(&self) -> &str {
        "mass_cache"
    }
}
