//! JavaScript value representation for builtins
//!
//! This module provides the value type produced by the typed-array iteration
//! surface: numbers, BigInts, `undefined`, and the `[index, value]` pairs
//! yielded by entry iterators.

use std::fmt;

pub use core_types::{ErrorKind, JsError};
use num_bigint::BigInt as NumBigInt;

/// Result type for JavaScript operations
pub type JsResult<T> = Result<T, JsError>;

/// BigInt value wrapper for arbitrary precision integers
///
/// This type wraps num_bigint::BigInt so that 64-bit element values are
/// carried exactly, never through an `f64` approximation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BigIntValue {
    inner: NumBigInt,
}

impl BigIntValue {
    /// Create a new BigIntValue from a NumBigInt
    pub fn new(inner: NumBigInt) -> Self {
        BigIntValue { inner }
    }

    /// Get a reference to the inner BigInt
    pub fn inner(&self) -> &NumBigInt {
        &self.inner
    }
}

impl fmt::Display for BigIntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}n", self.inner)
    }
}

impl From<i64> for BigIntValue {
    fn from(n: i64) -> Self {
        BigIntValue::new(NumBigInt::from(n))
    }
}

impl From<u64> for BigIntValue {
    fn from(n: u64) -> Self {
        BigIntValue::new(NumBigInt::from(n))
    }
}

impl From<NumBigInt> for BigIntValue {
    fn from(n: NumBigInt) -> Self {
        BigIntValue::new(n)
    }
}

/// JavaScript value as observed by callers of the iteration surface
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    /// The `undefined` value, used as the absent marker of a done result
    Undefined,
    /// IEEE binary64 number
    Number(f64),
    /// Arbitrary precision integer
    BigInt(BigIntValue),
    /// Dense array of values (entry pairs)
    Array(Vec<JsValue>),
}

impl JsValue {
    /// Create undefined value
    pub fn undefined() -> Self {
        JsValue::Undefined
    }

    /// Create number value
    pub fn number(v: f64) -> Self {
        JsValue::Number(v)
    }

    /// Create BigInt value
    pub fn bigint(value: BigIntValue) -> Self {
        JsValue::BigInt(value)
    }

    /// Create array value from elements
    pub fn array_from(values: Vec<JsValue>) -> Self {
        JsValue::Array(values)
    }

    /// Check if value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }

    /// Check if value is a BigInt
    pub fn is_bigint(&self) -> bool {
        matches!(self, JsValue::BigInt(_))
    }

    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            JsValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as BigInt
    pub fn as_bigint(&self) -> Option<&BigIntValue> {
        match self {
            JsValue::BigInt(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsValue::Undefined => write!(f, "undefined"),
            JsValue::Number(n) => write!(f, "{}", n),
            JsValue::BigInt(b) => write!(f, "{}", b),
            JsValue::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
        }
    }
}
