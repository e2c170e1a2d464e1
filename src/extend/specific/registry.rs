use std::collections::HashMap;
use std::fmt;

use crate::extend::error::{unexpected_specific_value, ExtendResult};
use crate::extend::specific::buffer::clone_buffer;
use crate::extend::specific::date::clone_date;
use crate::extend::specific::pattern::clone_pattern;
use crate::extend::specific::{SpecificValue, BUFFER_KIND, DATE_KIND, PATTERN_KIND};

/// Copy constructor for one specific kind. Returns `None` when handed a value whose concrete
/// type it does not know.
pub type CloneFn = fn(&SpecificValue) -> Option<SpecificValue>;

/// Specific kinds the engine recognizes, keyed by kind tag.
///
/// Values whose kind is registered are copy-constructed during a merge. Values of any other
/// kind are treated as composites without own properties.
#[derive(Clone)]
pub struct SpecificRegistry {
    cloners: HashMap<&'static str, CloneFn>,
}

impl SpecificRegistry {
    pub fn empty() -> Self {
        Self {
            cloners: HashMap::new(),
        }
    }

    /// Buffer, date and pattern.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(BUFFER_KIND, clone_buffer);
        registry.register(DATE_KIND, clone_date);
        registry.register(PATTERN_KIND, clone_pattern);
        registry
    }

    /// Registers `clone` for `kind`, returning the constructor it replaced.
    pub fn register(&mut self, kind: &'static str, clone: CloneFn) -> Option<CloneFn> {
        self.cloners.insert(kind, clone)
    }

    pub fn unregister(&mut self, kind: &str) -> Option<CloneFn> {
        self.cloners.remove(kind)
    }

    pub fn recognizes(&self, kind: &str) -> bool {
        self.cloners.contains_key(kind)
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.cloners.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn clone_value(&self, value: &SpecificValue) -> ExtendResult<SpecificValue> {
        let kind = value.kind();
        let constructor = self
            .cloners
            .get(kind)
            .ok_or_else(|| unexpected_specific_value(kind))?;
        constructor(value).ok_or_else(|| unexpected_specific_value(kind))
    }
}

impl Default for SpecificRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for SpecificRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecificRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
