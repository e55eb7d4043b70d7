use crate::core::models::ids::ObjectKey;
use std::fmt;
use std::rc::{Rc, Weak};

/// Describes a state change. `source` is the object that was mutated; parents that
/// forward the event keep the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChemObjectChangeEvent {
    pub source: ObjectKey,
}

impl ChemObjectChangeEvent {
    pub fn new(source: ObjectKey) -> Self {
        Self { source }
    }
}

/// Receives change events synchronously, on the call stack of the mutation.
pub trait ChemObjectListener {
    fn state_changed(&self, event: &ChemObjectChangeEvent);
}

/// Weakly held listeners. Dropping the last `Rc` of a listener unregisters it.
#[derive(Default)]
pub struct ListenerList {
    listeners: Vec<Weak<dyn ChemObjectListener>>,
}

impl ListenerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: &Rc<dyn ChemObjectListener>) {
        if !self.contains(listener) {
            self.listeners.push(Rc::downgrade(listener));
        }
    }

    pub fn remove(&mut self, listener: &Rc<dyn ChemObjectListener>) -> bool {
        let before = self.listeners.len();
        let target = Rc::as_ptr(listener);
        self.listeners
            .retain(|weak| !std::ptr::addr_eq(weak.as_ptr(), target));
        self.listeners.len() != before
    }

    pub fn contains(&self, listener: &Rc<dyn ChemObjectListener>) -> bool {
        let target = Rc::as_ptr(listener);
        self.listeners
            .iter()
            .any(|weak| std::ptr::addr_eq(weak.as_ptr(), target))
    }

    /// Number of listeners that are still alive.
    pub fn len(&self) -> usize {
        self.listeners
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dispatch(&mut self, event: &ChemObjectChangeEvent) {
        self.listeners.retain(|weak| weak.strong_count() > 0);
        // Upgrade first so a listener dropped mid-dispatch is still valid for this call.
        let alive: Vec<Rc<dyn ChemObjectListener>> =
            self.listeners.iter().filter_map(Weak::upgrade).collect();
        for listener in alive {
            listener.state_changed(event);
        }
    }
}

impl fmt::Debug for ListenerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.len())
            .finish()
    }
}
