use super::ChemSpace;
use crate::core::models::ids::ObjectKey;
use crate::core::object::{
    ChemFlags, ChemObject, ChemObjectChangeEvent, ChemObjectListener, FromProperty, Properties,
    PropertyValue,
};
use crate::engine::config::BuilderFlavor;
use crate::engine::error::ChemError;
use std::collections::HashSet;
use std::rc::Rc;

impl ChemSpace {
    pub fn object(&self, key: impl Into<ObjectKey>) -> Result<&ChemObject, ChemError> {
        let key = key.into();
        self.object_entry(key).ok_or(ChemError::UnknownObject(key))
    }

    fn object_mut(&mut self, key: ObjectKey) -> Result<&mut ChemObject, ChemError> {
        self.object_entry_mut(key)
            .ok_or(ChemError::UnknownObject(key))
    }

    /// Applies `f` to an object's base data and notifies on success.
    fn update_object<R>(
        &mut self,
        key: impl Into<ObjectKey>,
        f: impl FnOnce(&mut ChemObject) -> R,
    ) -> Result<R, ChemError> {
        let key = key.into();
        let result = f(self.object_mut(key)?);
        self.notify_changed(key);
        Ok(result)
    }

    pub fn id(&self, key: impl Into<ObjectKey>) -> Result<Option<&str>, ChemError> {
        Ok(self.object(key)?.id())
    }

    pub fn set_id(&mut self, key: impl Into<ObjectKey>, id: Option<&str>) -> Result<(), ChemError> {
        self.update_object(key, |o| o.set_id(id.map(str::to_string)))
    }

    pub fn properties(&self, key: impl Into<ObjectKey>) -> Result<&Properties, ChemError> {
        Ok(self.object(key)?.properties())
    }

    /// A property converted to `T`; `None` when absent or of another type.
    pub fn property<T: FromProperty>(
        &self,
        key: impl Into<ObjectKey>,
        name: &str,
    ) -> Result<Option<T>, ChemError> {
        Ok(self.object(key)?.property(name))
    }

    pub fn set_property(
        &mut self,
        key: impl Into<ObjectKey>,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<(), ChemError> {
        self.update_object(key, |o| {
            o.properties_mut().insert(name, value);
        })
    }

    pub fn remove_property(
        &mut self,
        key: impl Into<ObjectKey>,
        name: &str,
    ) -> Result<Option<PropertyValue>, ChemError> {
        self.update_object(key, |o| o.properties_mut().remove(name))
    }

    /// Replaces the whole property map.
    pub fn set_properties(
        &mut self,
        key: impl Into<ObjectKey>,
        properties: Properties,
    ) -> Result<(), ChemError> {
        self.update_object(key, |o| *o.properties_mut() = properties)
    }

    /// Merges `properties` into the existing map, overwriting equal keys.
    pub fn add_properties(
        &mut self,
        key: impl Into<ObjectKey>,
        properties: Properties,
    ) -> Result<(), ChemError> {
        self.update_object(key, |o| o.properties_mut().extend(properties))
    }

    pub fn flags(&self, key: impl Into<ObjectKey>) -> Result<ChemFlags, ChemError> {
        Ok(self.object(key)?.flags())
    }

    pub fn flag(&self, key: impl Into<ObjectKey>, flag: ChemFlags) -> Result<bool, ChemError> {
        Ok(self.object(key)?.flag(flag))
    }

    pub fn set_flag(
        &mut self,
        key: impl Into<ObjectKey>,
        flag: ChemFlags,
        value: bool,
    ) -> Result<(), ChemError> {
        self.update_object(key, |o| o.set_flag(flag, value))
    }

    pub fn set_flags(
        &mut self,
        key: impl Into<ObjectKey>,
        flags: ChemFlags,
    ) -> Result<(), ChemError> {
        self.update_object(key, |o| o.set_flags(flags))
    }

    pub fn add_listener(
        &mut self,
        key: impl Into<ObjectKey>,
        listener: &Rc<dyn ChemObjectListener>,
    ) -> Result<(), ChemError> {
        self.object_mut(key.into())?.listeners.add(listener);
        Ok(())
    }

    pub fn remove_listener(
        &mut self,
        key: impl Into<ObjectKey>,
        listener: &Rc<dyn ChemObjectListener>,
    ) -> Result<bool, ChemError> {
        Ok(self.object_mut(key.into())?.listeners.remove(listener))
    }

    pub fn listener_count(&self, key: impl Into<ObjectKey>) -> Result<usize, ChemError> {
        Ok(self.object(key)?.listener_count())
    }

    pub fn notification(&self, key: impl Into<ObjectKey>) -> Result<bool, ChemError> {
        Ok(self.object(key)?.notification())
    }

    /// Opens or closes the notification gate. Toggling the gate itself is not an event.
    pub fn set_notification(
        &mut self,
        key: impl Into<ObjectKey>,
        enabled: bool,
    ) -> Result<(), ChemError> {
        self.object_mut(key.into())?.set_notification(enabled);
        Ok(())
    }

    /// Objects currently observing `key`.
    pub fn parents(&self, key: impl Into<ObjectKey>) -> Result<&[ObjectKey], ChemError> {
        Ok(self.object(key)?.parents())
    }

    /// Dispatches a change event originating at `origin` to its listeners and, transitively,
    /// to the listeners of every object it is attached to.
    ///
    /// An object whose notification gate is closed neither fires nor forwards. Silent
    /// spaces never dispatch.
    pub fn notify_changed(&mut self, origin: impl Into<ObjectKey>) {
        if self.config.flavor == BuilderFlavor::Silent {
            return;
        }
        let origin = origin.into();
        let event = ChemObjectChangeEvent::new(origin);
        let mut visited = HashSet::new();
        let mut pending = vec![origin];
        while let Some(key) = pending.pop() {
            if !visited.insert(key) {
                continue;
            }
            let Some(object) = self.object_entry_mut(key) else {
                continue;
            };
            if !object.notification() {
                continue;
            }
            object.listeners.dispatch(&event);
            pending.extend(object.parents.iter().copied());
        }
    }
}
