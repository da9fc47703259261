//! Built-in method tables
//!
//! Script code can introspect a built-in function's declared `length`, the
//! number of parameters it expects. These tables record that metadata next
//! to the native behaviour for `%TypedArray%.prototype` and
//! `%ArrayIteratorPrototype%`.

use std::fmt;

use crate::iterator::{ArrayIterator, IteratorResult};
use crate::typed_arrays::TypedArray;
use crate::value::JsResult;

/// A native built-in function with its introspectable metadata
#[derive(Clone, Copy)]
pub struct BuiltinMethod<B> {
    /// Property name on the prototype
    pub name: &'static str,
    /// Declared parameter count (the function's `length` property)
    pub length: u8,
    behaviour: B,
}

impl<B> fmt::Debug for BuiltinMethod<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinMethod")
            .field("name", &self.name)
            .field("length", &self.length)
            .finish()
    }
}

/// Behaviour of an iterator-creating `%TypedArray%.prototype` method
pub type TypedArrayBehaviour = fn(&TypedArray) -> ArrayIterator;

/// Behaviour of an `%ArrayIteratorPrototype%` method
pub type IteratorBehaviour = fn(&mut ArrayIterator) -> JsResult<IteratorResult>;

impl BuiltinMethod<TypedArrayBehaviour> {
    /// Invoke with `this` bound to a TypedArray
    pub fn call(&self, this: &TypedArray) -> ArrayIterator {
        (self.behaviour)(this)
    }
}

impl BuiltinMethod<IteratorBehaviour> {
    /// Invoke with `this` bound to an array iterator
    pub fn call(&self, this: &mut ArrayIterator) -> JsResult<IteratorResult> {
        (self.behaviour)(this)
    }
}

/// %TypedArray%.prototype
///
/// Every concrete constructor (`Uint8Array.prototype`, ...) inherits these
/// methods unchanged, so one table serves all element kinds.
pub struct TypedArrayPrototype;

impl TypedArrayPrototype {
    /// Iterator-creating methods
    pub const METHODS: &'static [BuiltinMethod<TypedArrayBehaviour>] = &[
        BuiltinMethod {
            name: "values",
            length: 0,
            behaviour: TypedArray::values,
        },
        BuiltinMethod {
            name: "keys",
            length: 0,
            behaviour: TypedArray::keys,
        },
        BuiltinMethod {
            name: "entries",
            length: 0,
            behaviour: TypedArray::entries,
        },
    ];

    /// Look up a method by name
    pub fn method(name: &str) -> Option<&'static BuiltinMethod<TypedArrayBehaviour>> {
        Self::METHODS.iter().find(|m| m.name == name)
    }
}

/// %ArrayIteratorPrototype%
pub struct ArrayIteratorPrototype;

impl ArrayIteratorPrototype {
    /// %ArrayIteratorPrototype%.next
    pub const NEXT: BuiltinMethod<IteratorBehaviour> = BuiltinMethod {
        name: "next",
        length: 0,
        behaviour: ArrayIterator::next,
    };
}
