#![doc = include_str!("README.md")]
pub mod classify;
mod engine;
pub mod error;
pub mod json;
pub mod options;
pub mod specific;
pub mod value;

pub use engine::{deep_copy, deep_extend, DeepExtend, PROTO_KEY};
pub use error::{ExtendError, ExtendErrorCode, ExtendResult};
pub use json::{deep_copy_json, deep_extend_json};
pub use options::ExtendOptions;
pub use specific::{
    BufferValue, CloneFn, DateValue, PatternValue, Specific, SpecificRegistry, SpecificValue,
};
pub use value::{ArrayValue, FunctionValue, ObjectValue, Value};
