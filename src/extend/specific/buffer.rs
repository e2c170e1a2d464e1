use std::any::Any;
use std::cell::RefCell;
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::BytesMut;
use serde_json::{json, Value as JsonValue};

use crate::extend::specific::{Specific, SpecificValue};

pub const BUFFER_KIND: &str = "buffer";

/// Fixed-length, mutable byte buffer.
pub struct BufferValue {
    bytes: RefCell<BytesMut>,
}

impl BufferValue {
    /// Zero-filled buffer of `len` bytes.
    pub fn alloc(len: usize) -> Self {
        Self {
            bytes: RefCell::new(BytesMut::zeroed(len)),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            bytes: RefCell::new(BytesMut::from(bytes)),
        }
    }

    pub fn from_base64(value: &str) -> Result<Self, base64::DecodeError> {
        STANDARD.decode(value).map(|bytes| Self::from_slice(&bytes))
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes.borrow()[..])
    }

    pub fn len(&self) -> usize {
        self.bytes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.borrow().get(index).copied()
    }

    /// Overwrites the byte at `index`. Writes outside the buffer are ignored.
    pub fn set(&self, index: usize, byte: u8) -> bool {
        match self.bytes.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = byte;
                true
            }
            None => false,
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.borrow().to_vec()
    }

    /// Copies as many leading bytes as fit into `target` and returns how many were copied.
    pub fn copy_into(&self, target: &BufferValue) -> usize {
        if std::ptr::eq(self, target) {
            return self.len();
        }
        let source = self.bytes.borrow();
        let mut destination = target.bytes.borrow_mut();
        let count = source.len().min(destination.len());
        destination[..count].copy_from_slice(&source[..count]);
        count
    }
}

impl Specific for BufferValue {
    fn kind(&self) -> &'static str {
        BUFFER_KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_value(&self, other: &dyn Specific) -> bool {
        other
            .as_any()
            .downcast_ref::<BufferValue>()
            .is_some_and(|other| self.bytes.borrow()[..] == other.bytes.borrow()[..])
    }

    fn to_json(&self) -> JsonValue {
        json!({ "type": "Buffer", "data": self.to_vec() })
    }
}

impl fmt::Debug for BufferValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<Buffer")?;
        for byte in self.bytes.borrow().iter() {
            write!(f, " {byte:02x}")?;
        }
        f.write_str(">")
    }
}

pub(crate) fn clone_buffer(value: &SpecificValue) -> Option<SpecificValue> {
    let source = value.downcast_ref::<BufferValue>()?;
    let copy = BufferValue::alloc(source.len());
    source.copy_into(&copy);
    Some(SpecificValue::new(copy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_copies_bytes_into_new_storage() {
        let original = SpecificValue::new(BufferValue::from_slice(&[1, 2, 3]));
        let copy = clone_buffer(&original).unwrap();
        assert_eq!(copy, original);
        assert!(!copy.ptr_eq(&original));

        copy.downcast_ref::<BufferValue>().unwrap().set(0, 9);
        assert_eq!(original.downcast_ref::<BufferValue>().unwrap().get(0), Some(1));
    }

    #[test]
    fn copy_into_truncates_to_target_length() {
        let source = BufferValue::from_slice(&[1, 2, 3]);
        let target = BufferValue::alloc(2);
        assert_eq!(source.copy_into(&target), 2);
        assert_eq!(target.to_vec(), vec![1, 2]);
    }

    #[test]
    fn base64_roundtrip() {
        let buffer = BufferValue::from_slice(b"deep");
        let decoded = BufferValue::from_base64(&buffer.to_base64()).unwrap();
        assert_eq!(decoded.to_vec(), b"deep");
    }

    #[test]
    fn json_matches_node_buffer_shape() {
        let buffer = BufferValue::from_slice(&[7, 8]);
        assert_eq!(buffer.to_json(), json!({"type": "Buffer", "data": [7, 8]}));
    }
}
