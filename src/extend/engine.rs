use std::sync::LazyLock;

use crate::extend::classify::{classify, Composite, ValueKind};
use crate::extend::error::{depth_limit_exceeded, ExtendResult};
use crate::extend::options::ExtendOptions;
use crate::extend::specific::SpecificValue;
use crate::extend::value::{ArrayValue, ObjectValue, Value};
use crate::logger::Logger;

/// Key that is never copied from a source, whatever its value.
pub const PROTO_KEY: &str = "__proto__";

static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("@deep-extend/engine"));
static DEFAULT_ENGINE: LazyLock<DeepExtend> = LazyLock::new(DeepExtend::default);

/// Recursive merge engine.
///
/// Holds only configuration; every call is independent and works on the values passed in.
#[derive(Clone, Debug, Default)]
pub struct DeepExtend {
    options: ExtendOptions,
}

impl DeepExtend {
    pub fn new(options: ExtendOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtendOptions {
        &self.options
    }

    /// Merges `args[1..]` into `args[0]` and returns the target.
    ///
    /// Returns `Ok(None)` when `args` is empty or its first element is not an object. A single
    /// argument is returned unchanged. Sources that are not objects are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use deep_extend_rs::extend::{DeepExtend, Value};
    /// use serde_json::json;
    ///
    /// let target = Value::from(json!({"a": {"x": 1, "y": 2}}));
    /// let source = Value::from(json!({"a": {"y": 3, "z": 4}}));
    ///
    /// let merged = DeepExtend::default()
    ///     .extend(&[target.clone(), source])
    ///     .unwrap()
    ///     .unwrap();
    /// assert!(merged.ptr_eq(&target));
    /// assert_eq!(merged, Value::from(json!({"a": {"x": 1, "y": 3, "z": 4}})));
    /// ```
    pub fn extend(&self, args: &[Value]) -> ExtendResult<Option<Value>> {
        let Some((first, sources)) = args.split_first() else {
            LOGGER.debug("extend called without a target");
            return Ok(None);
        };
        let Value::Object(target) = first else {
            LOGGER.debug_with(|| format!("extend target must be an object, got {}", first.type_name()));
            return Ok(None);
        };
        if sources.is_empty() {
            return Ok(Some(first.clone()));
        }

        self.extend_object(target, sources)?;
        Ok(Some(first.clone()))
    }

    /// Typed form of [`DeepExtend::extend`] for callers that already hold an object.
    pub fn extend_object(&self, target: &ObjectValue, sources: &[Value]) -> ExtendResult<ObjectValue> {
        for (position, source) in sources.iter().enumerate() {
            match source {
                Value::Object(source) => self.merge_entries(target, source.entries(), 0)?,
                other => LOGGER.debug_with(|| {
                    format!("skipping source #{} of type {}", position + 1, other.type_name())
                }),
            }
        }
        Ok(target.clone())
    }

    /// Independent copy of any value. Scalars come back as-is.
    pub fn deep_copy(&self, value: &Value) -> ExtendResult<Value> {
        let copy = match classify(value, self.options.registry()) {
            ValueKind::Scalar => value.clone(),
            ValueKind::Array(array) => Value::Array(self.clone_array(array)?),
            ValueKind::Specific(specific) => Value::Specific(self.clone_specific(specific)?),
            ValueKind::Composite(composite) => {
                let fresh = ObjectValue::new();
                self.merge_entries(&fresh, composite.own_entries(), 0)?;
                Value::Object(fresh)
            }
        };
        Ok(copy)
    }

    /// New array of the same length; nested arrays, objects and specific values are cloned.
    pub fn clone_array(&self, array: &ArrayValue) -> ExtendResult<ArrayValue> {
        self.clone_array_at(array, 0)
    }

    pub fn clone_specific(&self, value: &SpecificValue) -> ExtendResult<SpecificValue> {
        self.options.registry().clone_value(value)
    }

    fn merge_entries(
        &self,
        target: &ObjectValue,
        entries: Vec<(String, Value)>,
        depth: usize,
    ) -> ExtendResult<()> {
        for (key, value) in entries {
            if key == PROTO_KEY {
                LOGGER.debug("skipping __proto__ property");
                continue;
            }
            if let Value::Object(object) = &value {
                if object.ptr_eq(target) {
                    LOGGER.debug_with(|| format!("skipping self reference under `{key}`"));
                    continue;
                }
            }

            let merged = match classify(&value, self.options.registry()) {
                ValueKind::Scalar => value.clone(),
                ValueKind::Array(array) => Value::Array(self.clone_array_at(array, depth)?),
                ValueKind::Specific(specific) => Value::Specific(self.clone_specific(specific)?),
                ValueKind::Composite(composite) => match target.get(&key) {
                    Some(Value::Object(existing)) => {
                        let depth = self.descend(depth)?;
                        self.merge_entries(&existing, composite.own_entries(), depth)?;
                        Value::Object(existing)
                    }
                    _ => Value::Object(self.clone_composite(composite, depth)?),
                },
            };
            target.insert(key, merged);
        }
        Ok(())
    }

    fn clone_composite(&self, composite: Composite<'_>, depth: usize) -> ExtendResult<ObjectValue> {
        let depth = self.descend(depth)?;
        let fresh = ObjectValue::new();
        self.merge_entries(&fresh, composite.own_entries(), depth)?;
        Ok(fresh)
    }

    fn clone_array_at(&self, array: &ArrayValue, depth: usize) -> ExtendResult<ArrayValue> {
        let depth = self.descend(depth)?;
        let items = array.to_vec();
        let mut clone = Vec::with_capacity(items.len());
        for item in &items {
            let copy = match classify(item, self.options.registry()) {
                ValueKind::Scalar => item.clone(),
                ValueKind::Array(inner) => Value::Array(self.clone_array_at(inner, depth)?),
                ValueKind::Specific(specific) => Value::Specific(self.clone_specific(specific)?),
                ValueKind::Composite(composite) => Value::Object(self.clone_composite(composite, depth)?),
            };
            clone.push(copy);
        }
        Ok(ArrayValue::new(clone))
    }

    fn descend(&self, depth: usize) -> ExtendResult<usize> {
        let next = depth + 1;
        match self.options.max_depth() {
            Some(limit) if next > limit => Err(depth_limit_exceeded(limit)),
            _ => Ok(next),
        }
    }
}

/// Merges `args[1..]` into `args[0]` with the default options.
///
/// See [`DeepExtend::extend`].
pub fn deep_extend(args: &[Value]) -> ExtendResult<Option<Value>> {
    DEFAULT_ENGINE.extend(args)
}

/// Independent copy of `value` with the default options.
pub fn deep_copy(value: &Value) -> ExtendResult<Value> {
    DEFAULT_ENGINE.deep_copy(value)
}
