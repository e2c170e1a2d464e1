#![doc = include_str!("RUSTDOC.md")]

pub mod extend;
pub mod logger;

pub use extend::{deep_copy, deep_extend, DeepExtend, ExtendOptions, ExtendResult, Value};
