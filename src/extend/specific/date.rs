use std::any::Any;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;

use crate::extend::specific::{Specific, SpecificValue};

pub const DATE_KIND: &str = "date";

/// UTC instant with millisecond precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateValue {
    instant: DateTime<Utc>,
}

impl DateValue {
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|instant| Self { instant })
    }

    /// Sub-millisecond precision is dropped.
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        let instant = DateTime::from_timestamp_millis(instant.timestamp_millis()).unwrap_or(instant);
        Self { instant }
    }

    pub fn now() -> Self {
        Self::from_instant(Utc::now())
    }

    /// Milliseconds since the Unix epoch.
    pub fn get_time(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn to_iso_string(&self) -> String {
        self.instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Specific for DateValue {
    fn kind(&self) -> &'static str {
        DATE_KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_value(&self, other: &dyn Specific) -> bool {
        other
            .as_any()
            .downcast_ref::<DateValue>()
            .is_some_and(|other| self == other)
    }

    fn to_json(&self) -> JsonValue {
        JsonValue::String(self.to_iso_string())
    }
}

pub(crate) fn clone_date(value: &SpecificValue) -> Option<SpecificValue> {
    let source = value.downcast_ref::<DateValue>()?;
    DateValue::from_millis(source.get_time()).map(SpecificValue::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_keeps_epoch_value() {
        let original = SpecificValue::new(DateValue::from_millis(1_500_000_000_123).unwrap());
        let copy = clone_date(&original).unwrap();
        assert_eq!(copy, original);
        assert!(!copy.ptr_eq(&original));
        assert_eq!(copy.downcast_ref::<DateValue>().unwrap().get_time(), 1_500_000_000_123);
    }

    #[test]
    fn iso_string_uses_millis_and_zulu() {
        let date = DateValue::from_millis(0).unwrap();
        assert_eq!(date.to_iso_string(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn from_instant_truncates_to_millis() {
        let instant = DateTime::from_timestamp(10, 1_234_567).unwrap();
        assert_eq!(DateValue::from_instant(instant).get_time(), 10_001);
    }
}
