//! TypedArray iteration built-ins
//!
//! This crate provides the built-in objects a JavaScript runtime needs to
//! iterate numeric array views:
//! - ArrayBuffer with owner-driven detachment
//! - TypedArray views for every numeric element kind, including the BigInt kinds
//! - `%ArrayIteratorPrototype%` iterators (`values()`, `keys()`, `entries()`)
//! - Built-in method tables with introspectable `length` metadata
//!
//! # Example
//!
//! ```
//! use builtins::{IteratorResult, JsValue, TypedArray, TypedArrayKind, TypedArrayValue};
//!
//! let arr = TypedArray::from_values(
//!     TypedArrayKind::Uint8,
//!     vec![TypedArrayValue::from_number(30.0), TypedArrayValue::from_number(40.0)],
//! )
//! .unwrap();
//!
//! let mut it = arr.values();
//! assert_eq!(it.next().unwrap(), IteratorResult::value(JsValue::number(30.0)));
//! assert_eq!(it.next().unwrap(), IteratorResult::value(JsValue::number(40.0)));
//! assert_eq!(it.next().unwrap(), IteratorResult::done());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod array_buffer;
pub mod iterator;
pub mod prototype;
pub mod typed_arrays;
pub mod value;

// Re-export main types for convenience
pub use array_buffer::{ArrayBuffer, MAX_BYTE_LENGTH};
pub use iterator::{ArrayIterator, ArrayIteratorKind, DetachPolicy, IteratorResult, IteratorState};
pub use prototype::{ArrayIteratorPrototype, BuiltinMethod, TypedArrayPrototype};
pub use typed_arrays::{ByteOrder, TypedArray, TypedArrayKind, TypedArrayValue, ENGINE_BYTE_ORDER};
pub use value::{BigIntValue, ErrorKind, JsError, JsResult, JsValue};
