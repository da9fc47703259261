//! ArrayBuffer implementation
//!
//! An `ArrayBuffer` is a shared, fixed-length region of raw bytes. Every view
//! created over a buffer holds a clone of the same handle, so the bytes live
//! as long as the longest holder. The owner of the memory may *detach* the
//! buffer at any time; detachment releases the bytes and is observable by
//! every view through [`ArrayBuffer::is_detached`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::value::{JsError, JsResult};

/// Largest byte length an ArrayBuffer may be created with (2GB - 1)
pub const MAX_BYTE_LENGTH: usize = 2_147_483_647;

#[derive(Debug)]
struct BufferData {
    bytes: RefCell<Vec<u8>>,
    /// Liveness token; only ever flips from `false` to `true`.
    detached: Cell<bool>,
}

/// ArrayBuffer - represents a generic fixed-length raw binary data buffer
#[derive(Debug, Clone)]
pub struct ArrayBuffer {
    data: Rc<BufferData>,
}

impl ArrayBuffer {
    /// Create a new zero-filled ArrayBuffer with specified byte length
    pub fn new(byte_length: usize) -> JsResult<Self> {
        if byte_length > MAX_BYTE_LENGTH {
            return Err(JsError::range_error("Invalid array buffer length"));
        }
        Ok(Self::from_vec(vec![0u8; byte_length]))
    }

    /// Create an ArrayBuffer that takes ownership of existing bytes
    pub fn from_bytes(bytes: Vec<u8>) -> JsResult<Self> {
        if bytes.len() > MAX_BYTE_LENGTH {
            return Err(JsError::range_error("Invalid array buffer length"));
        }
        Ok(Self::from_vec(bytes))
    }

    fn from_vec(bytes: Vec<u8>) -> Self {
        ArrayBuffer {
            data: Rc::new(BufferData {
                bytes: RefCell::new(bytes),
                detached: Cell::new(false),
            }),
        }
    }

    /// Get the byte length of the buffer (0 once detached)
    pub fn byte_length(&self) -> usize {
        self.data.bytes.borrow().len()
    }

    /// Whether the buffer has been detached by its owner
    pub fn is_detached(&self) -> bool {
        self.data.detached.get()
    }

    /// Detach the buffer, releasing its bytes.
    ///
    /// This is the memory owner's operation; views and iterators only ever
    /// observe its effect. Detaching an already detached buffer is a no-op.
    pub fn detach(&self) {
        if self.data.detached.replace(true) {
            return;
        }
        let released = std::mem::take(&mut *self.data.bytes.borrow_mut());
        tracing::debug!(byte_length = released.len(), "ArrayBuffer detached");
    }

    /// Run `f` over the live bytes, or return `None` if detached
    pub(crate) fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> Option<R> {
        if self.is_detached() {
            return None;
        }
        Some(f(&self.data.bytes.borrow()))
    }

    /// Run `f` over the live bytes mutably, or return `None` if detached
    pub(crate) fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> Option<R> {
        if self.is_detached() {
            return None;
        }
        Some(f(&mut self.data.bytes.borrow_mut()))
    }
}
