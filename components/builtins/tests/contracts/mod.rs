//! Contract tests for builtins component
//!
//! These tests verify the public API of the TypedArray iteration surface.

mod array_iterator_tests;
