//! Single place where a value is sorted into the merge policy it gets.

use crate::extend::specific::{SpecificRegistry, SpecificValue};
use crate::extend::value::{ArrayValue, ObjectValue, Value};

/// Merge policy for one value.
#[derive(Clone, Copy, Debug)]
pub enum ValueKind<'a> {
    /// Copied as-is: undefined, null, booleans, numbers, strings and functions.
    Scalar,
    /// Deep cloned, replacing whatever the target held.
    Array(&'a ArrayValue),
    /// Copy-constructed through the registry.
    Specific(&'a SpecificValue),
    /// Merged into an existing target object or cloned into a fresh one.
    Composite(Composite<'a>),
}

#[derive(Clone, Copy, Debug)]
pub enum Composite<'a> {
    Object(&'a ObjectValue),
    /// Specific value of an unregistered kind. It has no own properties.
    Opaque(&'a SpecificValue),
}

impl Composite<'_> {
    pub fn own_entries(&self) -> Vec<(String, Value)> {
        match self {
            Composite::Object(object) => object.entries(),
            Composite::Opaque(_) => Vec::new(),
        }
    }
}

pub fn classify<'a>(value: &'a Value, registry: &SpecificRegistry) -> ValueKind<'a> {
    match value {
        Value::Array(array) => ValueKind::Array(array),
        Value::Object(object) => ValueKind::Composite(Composite::Object(object)),
        Value::Specific(specific) if registry.recognizes(specific.kind()) => ValueKind::Specific(specific),
        Value::Specific(specific) => ValueKind::Composite(Composite::Opaque(specific)),
        Value::Undefined
        | Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::String(_)
        | Value::Function(_) => ValueKind::Scalar,
    }
}
