//! Engine configuration.

use crate::extend::error::{invalid_argument, ExtendResult};
use crate::extend::specific::SpecificRegistry;

/// Options for a [`DeepExtend`](crate::extend::DeepExtend) engine.
#[derive(Clone, Debug, Default)]
pub struct ExtendOptions {
    registry: SpecificRegistry,
    max_depth: Option<usize>,
}

impl ExtendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the set of recognized specific kinds.
    pub fn with_registry(mut self, registry: SpecificRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Caps how many nested objects and arrays a single call may descend into.
    ///
    /// Unbounded by default. A limit of zero is rejected.
    ///
    /// The limit is checked while merging, not up front. When it trips, keys merged before the
    /// failing one stay written and the target is left partially extended.
    pub fn with_max_depth(mut self, max_depth: usize) -> ExtendResult<Self> {
        validate_max_depth(max_depth)?;
        self.max_depth = Some(max_depth);
        Ok(self)
    }

    pub fn registry(&self) -> &SpecificRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SpecificRegistry {
        &mut self.registry
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

fn validate_max_depth(value: usize) -> ExtendResult<()> {
    if value == 0 {
        return Err(invalid_argument("max_depth must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unbounded_with_builtin_kinds() {
        let options = ExtendOptions::default();
        assert_eq!(options.max_depth(), None);
        assert_eq!(options.registry().kinds().len(), 3);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let err = ExtendOptions::new().with_max_depth(0).unwrap_err();
        assert_eq!(err.code_str(), "deep-extend/invalid-argument");
        assert_eq!(ExtendOptions::new().with_max_depth(4).unwrap().max_depth(), Some(4));
    }
}
