use crate::extend::error::ExtendResult;
use crate::extend::specific::{BufferValue, DateValue, PatternValue, SpecificValue};
use crate::extend::value::{ArrayValue, FunctionValue, ObjectValue};

/// Dynamic value accepted by the merge engine.
///
/// Arrays, objects, functions and specific values are shared handles, so two `Value`s can refer
/// to the same underlying storage. Use [`Value::ptr_eq`] for identity and `==` for structural
/// equality.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Function(FunctionValue),
    Array(ArrayValue),
    Object(ObjectValue),
    Specific(SpecificValue),
}

impl Value {
    /// Empty object.
    pub fn object() -> Self {
        Value::Object(ObjectValue::new())
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(ArrayValue::new(values))
    }

    pub fn buffer(bytes: &[u8]) -> Self {
        Value::Specific(SpecificValue::new(BufferValue::from_slice(bytes)))
    }

    /// Date at `millis` since the Unix epoch, or `None` when outside the representable range.
    pub fn date_from_millis(millis: i64) -> Option<Self> {
        DateValue::from_millis(millis).map(|date| Value::Specific(SpecificValue::new(date)))
    }

    pub fn pattern(source: &str, flags: &str) -> ExtendResult<Self> {
        let pattern = PatternValue::new(source, flags)?;
        Ok(Value::Specific(SpecificValue::new(pattern)))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_specific(&self) -> Option<&SpecificValue> {
        match self {
            Value::Specific(specific) => Some(specific),
            _ => None,
        }
    }

    /// Property lookup on objects; `None` for every other variant.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.as_object().and_then(|object| object.get(key))
    }

    /// Short type label, using the kind tag for specific values.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Specific(specific) => specific.kind(),
        }
    }

    /// Reference identity. Always `false` for scalars other than functions.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Function(left), Value::Function(right)) => left.ptr_eq(right),
            (Value::Array(left), Value::Array(right)) => left.ptr_eq(right),
            (Value::Object(left), Value::Object(right)) => left.ptr_eq(right),
            (Value::Specific(left), Value::Specific(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(left), Value::Bool(right)) => left == right,
            (Value::Number(left), Value::Number(right)) => left == right,
            (Value::String(left), Value::String(right)) => left == right,
            (Value::Function(left), Value::Function(right)) => left == right,
            (Value::Array(left), Value::Array(right)) => left == right,
            (Value::Object(left), Value::Object(right)) => left == right,
            (Value::Specific(left), Value::Specific(right)) => left == right,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<FunctionValue> for Value {
    fn from(value: FunctionValue) -> Self {
        Value::Function(value)
    }
}

impl From<ArrayValue> for Value {
    fn from(value: ArrayValue) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(ArrayValue::new(values))
    }
}

impl From<ObjectValue> for Value {
    fn from(value: ObjectValue) -> Self {
        Value::Object(value)
    }
}

impl From<SpecificValue> for Value {
    fn from(value: SpecificValue) -> Self {
        Value::Specific(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
