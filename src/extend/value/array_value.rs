use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::extend::value::Value;

/// Shared, mutable ordered sequence.
///
/// Cloning an `ArrayValue` clones the handle, not the elements; use
/// [`DeepExtend::clone_array`](crate::extend::DeepExtend::clone_array) for an independent copy.
#[derive(Clone, Default)]
pub struct ArrayValue {
    values: Rc<RefCell<Vec<Value>>>,
}

impl ArrayValue {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: Rc::new(RefCell::new(values)),
        }
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.values.borrow().get(index).cloned()
    }

    /// Writes `value` at `index`, padding any gap with `Value::Undefined`.
    pub fn set(&self, index: usize, value: impl Into<Value>) {
        let mut values = self.values.borrow_mut();
        if index >= values.len() {
            values.resize(index + 1, Value::Undefined);
        }
        values[index] = value.into();
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.values.borrow_mut().push(value.into());
    }

    /// Snapshot of the element handles.
    pub fn to_vec(&self) -> Vec<Value> {
        self.values.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &ArrayValue) -> bool {
        Rc::ptr_eq(&self.values, &other.values)
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.values.borrow() == *other.values.borrow()
    }
}

impl fmt::Debug for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.borrow().iter()).finish()
    }
}

impl From<Vec<Value>> for ArrayValue {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl<V: Into<Value>> FromIterator<V> for ArrayValue {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let array: ArrayValue = [1, 2].into_iter().collect();
        let alias = array.clone();
        alias.push(3);
        assert_eq!(array.len(), 3);
        assert!(array.ptr_eq(&alias));
    }

    #[test]
    fn set_past_end_pads_with_undefined() {
        let array = ArrayValue::default();
        array.set(2, "x");
        assert_eq!(array.to_vec(), vec![Value::Undefined, Value::Undefined, Value::from("x")]);
    }

    #[test]
    fn equality_is_structural() {
        let left: ArrayValue = [1, 2].into_iter().collect();
        let right: ArrayValue = [1, 2].into_iter().collect();
        assert_eq!(left, right);
        assert!(!left.ptr_eq(&right));
    }
}
