use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde_json::Value as JsonValue;

/// Opaque value kind that is cloned atomically rather than traversed.
pub trait Specific: Any + fmt::Debug {
    /// Tag used by [`SpecificRegistry`](super::SpecificRegistry) to find the clone constructor.
    fn kind(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    /// Value equality against another specific value of any kind.
    fn same_value(&self, other: &dyn Specific) -> bool;

    /// JSON form, following what `JSON.stringify` produces for the equivalent built-in.
    fn to_json(&self) -> JsonValue;
}

/// Shared handle to a [`Specific`] value.
#[derive(Clone)]
pub struct SpecificValue {
    inner: Rc<dyn Specific>,
}

impl SpecificValue {
    pub fn new<T: Specific>(value: T) -> Self {
        Self {
            inner: Rc::new(value),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.inner.kind()
    }

    pub fn get(&self) -> &dyn Specific {
        self.inner.as_ref()
    }

    pub fn downcast_ref<T: Specific>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &SpecificValue) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.inner), Rc::as_ptr(&other.inner))
    }
}

impl PartialEq for SpecificValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.kind() == other.kind() && self.inner.same_value(other.get()))
    }
}

impl fmt::Debug for SpecificValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner.as_ref(), f)
    }
}
