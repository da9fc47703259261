//! Core JavaScript error types.
//!
//! This crate provides the foundational error taxonomy shared by the runtime
//! components.
//!
//! # Overview
//!
//! - [`JsError`] - JavaScript errors carrying a kind and message
//! - [`ErrorKind`] - Types of JavaScript errors
//!
//! # Examples
//!
//! ```
//! use core_types::{JsError, ErrorKind};
//!
//! let error = JsError::type_error("ArrayBuffer is detached");
//! assert_eq!(error.kind, ErrorKind::TypeError);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;

pub use error::{ErrorKind, JsError};
