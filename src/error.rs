//! Error types for JSON serialization.
//!
//! Serialization fails in exactly three ways, mirroring the ECMAScript
//! `JSON.stringify` failure modes:
//!
//! - **Circular structure**: an object or array is reachable from itself
//!   through object/array edges
//! - **Stack overflow**: the recursion budget for nested composites is
//!   exhausted (see [`StringifyOptions::max_depth`](crate::StringifyOptions))
//! - **Host exception**: a `toJSON` hook or a property getter raised
//!
//! A root value that contributes no output (`undefined`, a function) is *not*
//! an error; [`stringify`](crate::stringify) reports it as `Ok(None)`.
//!
//! ## Examples
//!
//! ```rust
//! use json_stringify::{stringify, Error, JsObject, Value};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let object = Rc::new(RefCell::new(JsObject::new()));
//! object
//!     .borrow_mut()
//!     .insert("self", Value::Object(Rc::clone(&object)));
//!
//! let err = stringify(&Value::Object(object)).unwrap_err();
//! assert_eq!(err, Error::CircularStructure);
//! ```

use std::fmt;
use thiserror::Error;

/// All failures that can abort a serialization.
///
/// Any failure discards the partial output; there is no internal recovery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The graph contains a cycle of objects or arrays reachable from the
    /// root.
    #[error("converting circular structure to JSON")]
    CircularStructure,

    /// The nesting budget for composite values was exhausted.
    #[error("maximum call stack size exceeded")]
    StackOverflow,

    /// An exception raised by host code (a `toJSON` hook or a property
    /// getter), propagated unchanged.
    #[error("{0}")]
    Host(String),
}

impl Error {
    /// Creates a host exception with a display message.
    ///
    /// This is the constructor user hooks and getters should use to raise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_stringify::Error;
    ///
    /// let err = Error::host("boom");
    /// assert_eq!(err.to_string(), "boom");
    /// ```
    pub fn host<T: fmt::Display>(msg: T) -> Self {
        Error::Host(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
