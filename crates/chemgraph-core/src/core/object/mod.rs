//! The ChemObject base shared by every entity stored in a `ChemSpace`.
//!
//! A [`ChemObject`] carries an optional identifier, a property bag, a set of boolean
//! [`ChemFlags`], a notification gate and a list of weakly held listeners. It also records
//! the parent objects that observe it so that change events can travel upwards.

pub mod event;
pub mod flags;
pub mod properties;

pub use event::{ChemObjectChangeEvent, ChemObjectListener, ListenerList};
pub use flags::ChemFlags;
pub use properties::{FromProperty, Properties, PropertyValue};

use crate::core::models::ids::ObjectKey;

#[derive(Debug)]
pub struct ChemObject {
    id: Option<String>,
    properties: Properties,
    flags: ChemFlags,
    notification: bool,
    pub(crate) listeners: ListenerList,
    pub(crate) parents: Vec<ObjectKey>,
}

impl ChemObject {
    pub fn new(notification: bool) -> Self {
        Self {
            id: None,
            properties: Properties::new(),
            flags: ChemFlags::empty(),
            notification,
            listeners: ListenerList::new(),
            parents: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub(crate) fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub(crate) fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    /// Typed property lookup; `None` when absent or stored with another type.
    pub fn property<T: FromProperty>(&self, key: &str) -> Option<T> {
        self.properties.get_as(key)
    }

    pub fn flags(&self) -> ChemFlags {
        self.flags
    }

    pub fn flag(&self, flag: ChemFlags) -> bool {
        self.flags.contains(flag)
    }

    pub(crate) fn set_flags(&mut self, flags: ChemFlags) {
        self.flags = flags;
    }

    pub(crate) fn set_flag(&mut self, flag: ChemFlags, value: bool) {
        self.flags.set(flag, value);
    }

    pub fn notification(&self) -> bool {
        self.notification
    }

    pub(crate) fn set_notification(&mut self, notification: bool) {
        self.notification = notification;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn parents(&self) -> &[ObjectKey] {
        &self.parents
    }

    pub(crate) fn add_parent(&mut self, parent: ObjectKey) {
        if !self.parents.contains(&parent) {
            self.parents.push(parent);
        }
    }

    pub(crate) fn remove_parent(&mut self, parent: ObjectKey) {
        self.parents.retain(|&p| p != parent);
    }
}

impl Default for ChemObject {
    fn default() -> Self {
        Self::new(true)
    }
}

// Listeners and parent links describe who observes this instance; a copy starts unobserved.
impl Clone for ChemObject {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            properties: self.properties.clone(),
            flags: self.flags,
            notification: self.notification,
            listeners: ListenerList::new(),
            parents: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter(Cell<usize>);

    impl ChemObjectListener for Counter {
        fn state_changed(&self, _event: &ChemObjectChangeEvent) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn dummy_key(n: u64) -> ObjectKey {
        ObjectKey::Atom(KeyData::from_ffi(n).into())
    }

    #[test]
    fn new_object_has_empty_defaults() {
        let object = ChemObject::default();
        assert!(object.id().is_none());
        assert!(object.properties().is_empty());
        assert!(object.flags().is_empty());
        assert!(object.notification());
        assert_eq!(object.listener_count(), 0);
    }

    #[test]
    fn clone_keeps_data_and_drops_observers() {
        let mut object = ChemObject::default();
        object.set_id(Some("a1".to_string()));
        object.properties_mut().insert("name", "carbon");
        object.set_flag(ChemFlags::VISITED, true);
        let listener: Rc<dyn ChemObjectListener> = Rc::new(Counter(Cell::new(0)));
        object.listeners.add(&listener);
        object.add_parent(dummy_key(1));

        let copy = object.clone();

        assert_eq!(copy.id(), Some("a1"));
        assert_eq!(copy.property::<String>("name").as_deref(), Some("carbon"));
        assert!(copy.flag(ChemFlags::VISITED));
        assert_eq!(copy.listener_count(), 0);
        assert!(copy.parents().is_empty());
        assert_eq!(object.listener_count(), 1);
    }

    #[test]
    fn cloned_properties_are_independent() {
        let mut object = ChemObject::default();
        object.properties_mut().insert("charge", 1.0);
        let mut copy = object.clone();
        copy.properties_mut().insert("charge", 2.0);
        assert_eq!(object.property::<f64>("charge"), Some(1.0));
        assert_eq!(copy.property::<f64>("charge"), Some(2.0));
    }

    #[test]
    fn parents_are_not_duplicated() {
        let mut object = ChemObject::default();
        object.add_parent(dummy_key(3));
        object.add_parent(dummy_key(3));
        assert_eq!(object.parents().len(), 1);
        object.remove_parent(dummy_key(3));
        assert!(object.parents().is_empty());
    }
}
