use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::extend::value::Value;

#[derive(Default)]
struct Properties {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl Properties {
    fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        let slot = self.index.remove(key)?;
        let (_, value) = self.entries.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        Some(value)
    }
}

/// Shared, mutable record whose keys enumerate in insertion order.
///
/// Every property is an own property; there is no prototype chain to delegate lookups to.
/// Re-assigning an existing key keeps its original position.
#[derive(Clone, Default)]
pub struct ObjectValue {
    properties: Rc<RefCell<Properties>>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.properties.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.borrow().entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.properties.borrow().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.borrow().index.contains_key(key)
    }

    /// Assigns `value` under `key`, returning the previous value if there was one.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.properties.borrow_mut().insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.properties.borrow_mut().remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.properties
            .borrow()
            .entries
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Snapshot of the own properties in enumeration order.
    ///
    /// The snapshot holds value handles, so no borrow of this object outlives the call.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.properties.borrow().entries.clone()
    }

    pub fn ptr_eq(&self, other: &ObjectValue) -> bool {
        Rc::ptr_eq(&self.properties, &other.properties)
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let left = self.properties.borrow();
        let right = other.properties.borrow();
        left.entries.len() == right.entries.len()
            && left
                .entries
                .iter()
                .all(|(key, value)| right.get(key) == Some(value))
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let properties = self.properties.borrow();
        f.debug_map()
            .entries(properties.entries.iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for ObjectValue
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let object = ObjectValue::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}
