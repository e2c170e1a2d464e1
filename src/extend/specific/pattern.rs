use std::any::Any;
use std::fmt;

use regex_lite::Regex;
use serde_json::{Map, Value as JsonValue};

use crate::extend::error::{invalid_argument, ExtendResult};
use crate::extend::specific::{Specific, SpecificValue};

pub const PATTERN_KIND: &str = "pattern";

/// Accepted flags, in canonical order.
const FLAG_ORDER: &str = "dgimsuy";

/// Compiled regular expression that remembers its source and flags.
///
/// Only `i`, `m` and `s` change matching; the other accepted flags are kept for round-tripping.
#[derive(Clone, Debug)]
pub struct PatternValue {
    source: String,
    flags: String,
    regex: Regex,
}

impl PatternValue {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> ExtendResult<Self> {
        let source = source.into();
        let flags = canonical_flags(&flags.into())?;

        let inline: String = flags.chars().filter(|flag| matches!(flag, 'i' | 'm' | 's')).collect();
        let expression = if inline.is_empty() {
            source.clone()
        } else {
            format!("(?{inline}){source}")
        };
        let regex = Regex::new(&expression)
            .map_err(|err| invalid_argument(format!("Invalid regular expression /{source}/: {err}")))?;

        Ok(Self {
            source,
            flags,
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

fn canonical_flags(flags: &str) -> ExtendResult<String> {
    let mut seen = [false; FLAG_ORDER.len()];
    for flag in flags.chars() {
        let slot = FLAG_ORDER
            .find(flag)
            .ok_or_else(|| invalid_argument(format!("Invalid flags supplied to pattern constructor '{flags}'")))?;
        if seen[slot] {
            return Err(invalid_argument(format!(
                "Invalid flags supplied to pattern constructor '{flags}'"
            )));
        }
        seen[slot] = true;
    }
    Ok(FLAG_ORDER
        .chars()
        .zip(seen)
        .filter_map(|(flag, present)| present.then_some(flag))
        .collect())
}

impl fmt::Display for PatternValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

impl Specific for PatternValue {
    fn kind(&self) -> &'static str {
        PATTERN_KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_value(&self, other: &dyn Specific) -> bool {
        other
            .as_any()
            .downcast_ref::<PatternValue>()
            .is_some_and(|other| self.source == other.source && self.flags == other.flags)
    }

    fn to_json(&self) -> JsonValue {
        JsonValue::Object(Map::new())
    }
}

pub(crate) fn clone_pattern(value: &SpecificValue) -> Option<SpecificValue> {
    let source = value.downcast_ref::<PatternValue>()?;
    PatternValue::new(source.source(), source.flags())
        .ok()
        .map(SpecificValue::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_canonicalized() {
        let pattern = PatternValue::new("a+", "mgi").unwrap();
        assert_eq!(pattern.flags(), "gim");
        assert_eq!(pattern.to_string(), "/a+/gim");
    }

    #[test]
    fn case_insensitive_flag_affects_matching() {
        assert!(PatternValue::new("abc", "i").unwrap().is_match("xABCx"));
        assert!(!PatternValue::new("abc", "").unwrap().is_match("xABCx"));
    }

    #[test]
    fn rejects_unknown_and_duplicate_flags() {
        let err = PatternValue::new("a", "q").unwrap_err();
        assert_eq!(err.code_str(), "deep-extend/invalid-argument");
        assert!(PatternValue::new("a", "gg").is_err());
    }

    #[test]
    fn rejects_invalid_source() {
        assert!(PatternValue::new("(", "").is_err());
    }

    #[test]
    fn clone_rebuilds_from_source_and_flags() {
        let original = SpecificValue::new(PatternValue::new("^x$", "m").unwrap());
        let copy = clone_pattern(&original).unwrap();
        assert_eq!(copy, original);
        assert!(!copy.ptr_eq(&original));
        assert!(copy.downcast_ref::<PatternValue>().unwrap().is_match("a\nx\nb"));
    }
}
