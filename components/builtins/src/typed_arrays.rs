//! TypedArray family implementation
//!
//! This module provides the TypedArray view (Int8Array, Uint8Array, ...,
//! BigUint64Array) over an [`ArrayBuffer`]. A view has a fixed kind, byte
//! offset and length; its *effective* length drops to zero as soon as the
//! underlying buffer is detached.

use std::rc::Rc;

use num_bigint::BigInt as NumBigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive};

use crate::array_buffer::ArrayBuffer;
use crate::iterator::{ArrayIterator, ArrayIteratorKind, DetachPolicy};
use crate::value::{BigIntValue, JsError, JsResult, JsValue};

/// Byte order used to lay out multi-byte elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

impl ByteOrder {
    /// Reorder between this byte order and little-endian.
    ///
    /// The reordering is its own inverse, so the same call is used on the
    /// read path and the write path.
    fn arrange<const N: usize>(self, mut raw: [u8; N]) -> [u8; N] {
        if self == ByteOrder::Big {
            raw.reverse();
        }
        raw
    }
}

/// The byte order every TypedArray in the engine agrees on
pub const ENGINE_BYTE_ORDER: ByteOrder = ByteOrder::Little;

/// TypedArray element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedArrayKind {
    /// 8-bit signed integer
    Int8,
    /// 8-bit unsigned integer
    Uint8,
    /// 16-bit signed integer
    Int16,
    /// 16-bit unsigned integer
    Uint16,
    /// 32-bit signed integer
    Int32,
    /// 32-bit unsigned integer
    Uint32,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
    /// 64-bit signed BigInt
    BigInt64,
    /// 64-bit unsigned BigInt
    BigUint64,
}

impl TypedArrayKind {
    /// Every element kind, in constructor order
    pub const ALL: [TypedArrayKind; 10] = [
        TypedArrayKind::Uint8,
        TypedArrayKind::Uint16,
        TypedArrayKind::Uint32,
        TypedArrayKind::Int8,
        TypedArrayKind::Int16,
        TypedArrayKind::Int32,
        TypedArrayKind::Float32,
        TypedArrayKind::Float64,
        TypedArrayKind::BigUint64,
        TypedArrayKind::BigInt64,
    ];

    /// Get the byte size of each element for this kind
    pub fn bytes_per_element(&self) -> usize {
        match self {
            TypedArrayKind::Int8 | TypedArrayKind::Uint8 => 1,
            TypedArrayKind::Int16 | TypedArrayKind::Uint16 => 2,
            TypedArrayKind::Int32 | TypedArrayKind::Uint32 | TypedArrayKind::Float32 => 4,
            TypedArrayKind::Float64 | TypedArrayKind::BigInt64 | TypedArrayKind::BigUint64 => 8,
        }
    }

    /// Get the name of this TypedArray kind
    pub fn name(&self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
            TypedArrayKind::BigInt64 => "BigInt64Array",
            TypedArrayKind::BigUint64 => "BigUint64Array",
        }
    }

    /// Whether elements of this kind are BigInts rather than Numbers
    pub fn is_bigint(&self) -> bool {
        matches!(self, TypedArrayKind::BigInt64 | TypedArrayKind::BigUint64)
    }
}

/// TypedArray value representation
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArrayValue {
    /// Regular number value
    Number(f64),
    /// BigInt value, carried at full precision
    BigInt(BigIntValue),
}

impl TypedArrayValue {
    /// Create from a number
    pub fn from_number(n: f64) -> Self {
        TypedArrayValue::Number(n)
    }

    /// Create from a BigInt
    pub fn from_bigint(n: impl Into<BigIntValue>) -> Self {
        TypedArrayValue::BigInt(n.into())
    }

    /// Get the number, if this is a Number value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TypedArrayValue::Number(n) => Some(*n),
            TypedArrayValue::BigInt(_) => None,
        }
    }

    /// Get the BigInt, if this is a BigInt value
    pub fn as_bigint(&self) -> Option<&BigIntValue> {
        match self {
            TypedArrayValue::Number(_) => None,
            TypedArrayValue::BigInt(b) => Some(b),
        }
    }
}

impl From<TypedArrayValue> for JsValue {
    fn from(value: TypedArrayValue) -> Self {
        match value {
            TypedArrayValue::Number(n) => JsValue::Number(n),
            TypedArrayValue::BigInt(b) => JsValue::BigInt(b),
        }
    }
}

fn read_bytes<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut raw = [0u8; N];
    raw.copy_from_slice(&bytes[..N]);
    ENGINE_BYTE_ORDER.arrange(raw)
}

fn write_bytes<const N: usize>(out: &mut [u8], raw: [u8; N]) {
    out[..N].copy_from_slice(&ENGINE_BYTE_ORDER.arrange(raw));
}

/// Decode one element of `kind` from the start of `bytes`
fn decode_element(kind: TypedArrayKind, bytes: &[u8]) -> TypedArrayValue {
    use TypedArrayValue::Number;

    match kind {
        TypedArrayKind::Int8 => Number(bytes[0] as i8 as f64),
        TypedArrayKind::Uint8 => Number(bytes[0] as f64),
        TypedArrayKind::Int16 => Number(i16::from_le_bytes(read_bytes(bytes)) as f64),
        TypedArrayKind::Uint16 => Number(u16::from_le_bytes(read_bytes(bytes)) as f64),
        TypedArrayKind::Int32 => Number(i32::from_le_bytes(read_bytes(bytes)) as f64),
        TypedArrayKind::Uint32 => Number(u32::from_le_bytes(read_bytes(bytes)) as f64),
        TypedArrayKind::Float32 => Number(f32::from_le_bytes(read_bytes(bytes)) as f64),
        TypedArrayKind::Float64 => Number(f64::from_le_bytes(read_bytes(bytes))),
        TypedArrayKind::BigInt64 => {
            TypedArrayValue::from_bigint(i64::from_le_bytes(read_bytes(bytes)))
        }
        TypedArrayKind::BigUint64 => {
            TypedArrayValue::from_bigint(u64::from_le_bytes(read_bytes(bytes)))
        }
    }
}

/// Encode `value` as one element of `kind` into the start of `out`
fn encode_element(kind: TypedArrayKind, value: &TypedArrayValue, out: &mut [u8]) -> JsResult<()> {
    match kind {
        TypedArrayKind::Int8 | TypedArrayKind::Uint8 => {
            out[0] = to_uint_modular(number_for(kind, value)?, 8) as u8
        }
        TypedArrayKind::Int16 | TypedArrayKind::Uint16 => {
            let bits = to_uint_modular(number_for(kind, value)?, 16) as u16;
            write_bytes(out, bits.to_le_bytes())
        }
        TypedArrayKind::Int32 | TypedArrayKind::Uint32 => {
            let bits = to_uint_modular(number_for(kind, value)?, 32) as u32;
            write_bytes(out, bits.to_le_bytes())
        }
        TypedArrayKind::Float32 => {
            write_bytes(out, (number_for(kind, value)? as f32).to_le_bytes())
        }
        TypedArrayKind::Float64 => write_bytes(out, number_for(kind, value)?.to_le_bytes()),
        TypedArrayKind::BigInt64 | TypedArrayKind::BigUint64 => {
            let big = value.as_bigint().ok_or_else(|| {
                JsError::type_error(format!(
                    "Cannot convert a Number to a BigInt for {}",
                    kind.name()
                ))
            })?;
            write_bytes(out, bigint_to_u64_bits(big.inner()).to_le_bytes())
        }
    }
    Ok(())
}

fn number_for(kind: TypedArrayKind, value: &TypedArrayValue) -> JsResult<f64> {
    value.as_number().ok_or_else(|| {
        JsError::type_error(format!(
            "Cannot convert a BigInt value to a number for {}",
            kind.name()
        ))
    })
}

/// ToUint8/16/32: truncate toward zero and wrap modulo 2^bits.
///
/// The signed kinds share this encoding since the two's-complement bit
/// pattern of the wrapped value is identical.
fn to_uint_modular(n: f64, bits: i32) -> u64 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(2f64.powi(bits)) as u64
}

/// BigInt.asUintN(64): wrap modulo 2^64
fn bigint_to_u64_bits(n: &NumBigInt) -> u64 {
    let modulus = NumBigInt::one() << 64u32;
    n.mod_floor(&modulus).to_u64().unwrap_or(0)
}

#[derive(Debug)]
struct ViewData {
    buffer: ArrayBuffer,
    kind: TypedArrayKind,
    byte_offset: usize,
    length: usize,
}

/// Generic TypedArray implementation
///
/// Cloning a `TypedArray` yields another handle to the same view.
#[derive(Debug, Clone)]
pub struct TypedArray {
    inner: Rc<ViewData>,
}

impl TypedArray {
    /// Create a new zero-filled TypedArray with the given length
    pub fn new(kind: TypedArrayKind, length: usize) -> JsResult<Self> {
        let byte_length = length
            .checked_mul(kind.bytes_per_element())
            .ok_or_else(|| JsError::range_error("Invalid typed array length"))?;
        let buffer = ArrayBuffer::new(byte_length)?;
        Ok(Self::from_parts(buffer, kind, 0, length))
    }

    /// Create a TypedArray from an existing ArrayBuffer
    ///
    /// Fails with a RangeError if the requested window does not fit inside
    /// the buffer, and with a TypeError if the buffer is already detached.
    pub fn from_buffer(
        buffer: ArrayBuffer,
        kind: TypedArrayKind,
        byte_offset: Option<usize>,
        length: Option<usize>,
    ) -> JsResult<Self> {
        let offset = byte_offset.unwrap_or(0);
        let elem_size = kind.bytes_per_element();

        if offset % elem_size != 0 {
            return Err(JsError::range_error(format!(
                "Start offset of {} should be a multiple of {}",
                kind.name(),
                elem_size
            )));
        }

        if buffer.is_detached() {
            return Err(JsError::type_error("Cannot construct a view over a detached ArrayBuffer"));
        }

        let buf_len = buffer.byte_length();
        if offset > buf_len {
            return Err(JsError::range_error(format!(
                "Start offset {} is outside the bounds of the buffer",
                offset
            )));
        }

        let available_bytes = buf_len - offset;
        let len = match length {
            Some(l) => {
                let fits = l
                    .checked_mul(elem_size)
                    .is_some_and(|needed| needed <= available_bytes);
                if !fits {
                    return Err(JsError::range_error(format!("Invalid typed array length: {}", l)));
                }
                l
            }
            None => {
                if available_bytes % elem_size != 0 {
                    return Err(JsError::range_error(format!(
                        "Byte length of {} should be a multiple of {}",
                        kind.name(),
                        elem_size
                    )));
                }
                available_bytes / elem_size
            }
        };

        Ok(Self::from_parts(buffer, kind, offset, len))
    }

    /// Create a TypedArray from an array of values
    pub fn from_values(kind: TypedArrayKind, values: Vec<TypedArrayValue>) -> JsResult<Self> {
        let arr = TypedArray::new(kind, values.len())?;
        for (i, value) in values.iter().enumerate() {
            arr.set(i, value)?;
        }
        Ok(arr)
    }

    fn from_parts(
        buffer: ArrayBuffer,
        kind: TypedArrayKind,
        byte_offset: usize,
        length: usize,
    ) -> Self {
        TypedArray {
            inner: Rc::new(ViewData {
                buffer,
                kind,
                byte_offset,
                length,
            }),
        }
    }

    /// Whether the underlying buffer has been detached
    pub fn is_detached(&self) -> bool {
        self.inner.buffer.is_detached()
    }

    /// Get the number of readable elements (0 once detached)
    pub fn length(&self) -> usize {
        if self.is_detached() {
            0
        } else {
            self.inner.length
        }
    }

    /// Get the byte length of the view (0 once detached)
    pub fn byte_length(&self) -> usize {
        self.length() * self.inner.kind.bytes_per_element()
    }

    /// Get the byte offset into the buffer (0 once detached)
    pub fn byte_offset(&self) -> usize {
        if self.is_detached() {
            0
        } else {
            self.inner.byte_offset
        }
    }

    /// Get the underlying buffer
    pub fn buffer(&self) -> &ArrayBuffer {
        &self.inner.buffer
    }

    /// Get the element kind
    pub fn kind(&self) -> TypedArrayKind {
        self.inner.kind
    }

    /// Read the element at `index`, or `None` if it is not readable
    pub(crate) fn element_at(&self, index: usize) -> Option<TypedArrayValue> {
        if index >= self.length() {
            return None;
        }
        let kind = self.inner.kind;
        let start = self.inner.byte_offset + index * kind.bytes_per_element();
        self.inner
            .buffer
            .with_bytes(|bytes| decode_element(kind, &bytes[start..]))
    }

    /// Get the element at the given index
    pub fn get(&self, index: usize) -> JsResult<TypedArrayValue> {
        if self.is_detached() {
            return Err(JsError::type_error("TypedArray is backed by a detached ArrayBuffer"));
        }
        self.element_at(index)
            .ok_or_else(|| JsError::range_error(format!("Index {} out of bounds", index)))
    }

    /// Set the element at the given index
    pub fn set(&self, index: usize, value: &TypedArrayValue) -> JsResult<()> {
        if self.is_detached() {
            return Err(JsError::type_error("TypedArray is backed by a detached ArrayBuffer"));
        }
        if index >= self.inner.length {
            return Err(JsError::range_error(format!("Index {} out of bounds", index)));
        }
        let kind = self.inner.kind;
        let start = self.inner.byte_offset + index * kind.bytes_per_element();
        self.inner
            .buffer
            .with_bytes_mut(|bytes| encode_element(kind, value, &mut bytes[start..]))
            .unwrap_or_else(|| {
                Err(JsError::type_error("TypedArray is backed by a detached ArrayBuffer"))
            })
    }

    /// %TypedArray%.prototype.values()
    pub fn values(&self) -> ArrayIterator {
        ArrayIterator::new(self, ArrayIteratorKind::Values, DetachPolicy::Terminate)
    }

    /// %TypedArray%.prototype.keys()
    pub fn keys(&self) -> ArrayIterator {
        ArrayIterator::new(self, ArrayIteratorKind::Keys, DetachPolicy::Terminate)
    }

    /// %TypedArray%.prototype.entries()
    pub fn entries(&self) -> ArrayIterator {
        ArrayIterator::new(self, ArrayIteratorKind::Entries, DetachPolicy::Terminate)
    }

    /// Value iterator with an explicit policy for detachment mid-iteration
    pub fn values_with_policy(&self, policy: DetachPolicy) -> ArrayIterator {
        ArrayIterator::new(self, ArrayIteratorKind::Values, policy)
    }
}
