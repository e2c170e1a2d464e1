//! Opaque values that are copy-constructed instead of traversed.
//!
//! Each kind carries a tag; the [`SpecificRegistry`] maps tags to clone constructors so the
//! recognized set can change without touching the merge recursion.

mod buffer;
mod date;
mod pattern;
mod registry;
mod specific_value;

pub use buffer::{BufferValue, BUFFER_KIND};
pub use date::{DateValue, DATE_KIND};
pub use pattern::{PatternValue, PATTERN_KIND};
pub use registry::{CloneFn, SpecificRegistry};
pub use specific_value::{Specific, SpecificValue};
