//! # json_stringify
//!
//! An implementation of the ECMA-262 `JSON.stringify` algorithm (minimal
//! variant: no replacer, no indentation) over a dynamically-typed,
//! shared-mutable value graph.
//!
//! ## What it does
//!
//! The interesting engineering is not the JSON grammar; it is keeping
//! serialization linear while:
//!
//! - the final output length is unknown,
//! - the output encoding (ASCII bytes vs. UTF-16 code units) is decided
//!   dynamically as characters are appended,
//! - string escaping runs through a fixed lookup table with a branch-light
//!   fast path,
//! - cycle detection and a recursion budget interleave with user-supplied
//!   `toJSON` hooks that may mutate the graph mid-walk.
//!
//! Output accumulates in a rope of fixed-encoding segments. The buffer
//! starts narrow (one byte per code unit) and promotes to wide, once and
//! irreversibly, the first time a non-ASCII string is appended, so purely-ASCII
//! documents never pay for two-byte characters.
//!
//! ## Quick start
//!
//! ```rust
//! use json_stringify::{js, stringify};
//!
//! let value = js!({
//!     "id": 123,
//!     "name": "Alice",
//!     "tags": ["admin", "user"],
//!     "scores": [1, 2.5, null]
//! });
//!
//! let out = stringify(&value).unwrap().expect("objects always serialize");
//! assert_eq!(
//!     out.to_std_string(),
//!     r#"{"id":123,"name":"Alice","tags":["admin","user"],"scores":[1,2.5,null]}"#
//! );
//! ```
//!
//! ## `undefined` and functions
//!
//! Values that contribute nothing follow the `JSON.stringify` rules: `null`
//! as an array element, omitted entirely as an object member, and no output
//! at the root, which is why [`stringify`] returns `Result<Option<_>>`:
//!
//! ```rust
//! use json_stringify::{js, stringify, Value};
//!
//! assert!(stringify(&Value::Undefined).unwrap().is_none());
//!
//! let out = stringify(&js!({"a": undefined, "b": 1})).unwrap().unwrap();
//! assert_eq!(out.to_std_string(), r#"{"b":1}"#);
//! ```
//!
//! ## `toJSON` hooks
//!
//! ```rust
//! use json_stringify::{stringify, JsObject, Value};
//!
//! let mut stamp = JsObject::new();
//! stamp.insert("toJSON", Value::function(|_receiver, _args| {
//!     Ok(Value::from("2024-01-15T10:30:00Z"))
//! }));
//!
//! let out = stringify(&Value::object(stamp)).unwrap().unwrap();
//! assert_eq!(out.to_std_string(), r#""2024-01-15T10:30:00Z""#);
//! ```
//!
//! ## Failure modes
//!
//! Cyclic graphs, exhausted recursion budgets and raising hooks surface as
//! [`Error`] values; see the [`error`] module. There is no partial output on
//! failure.
//!
//! ## Scope
//!
//! No pretty printing, no sorted keys, no custom separators, no streaming
//! output, no replacer filters, and no parser; `serde_json` and friends
//! already cover reading JSON back.

mod accumulator;
pub mod error;
mod escape;
pub mod macros;
pub mod map;
pub mod options;
mod ser;
pub mod spec;
pub mod string;
pub mod value;

pub use error::{Error, Result};
pub use map::{Property, PropertyKey, PropertyMap};
pub use options::{StringifyOptions, DEFAULT_MAX_DEPTH};
pub use string::{CodeUnits, Encoding, JsString};
pub use value::{
    number_to_string, Elements, JsArray, JsObject, JsWrapper, NativeFunction, Value, Wrapped,
    WrapperClass,
};

/// Serializes a value to JSON text.
///
/// Returns `Ok(None)` when the root value contributes no output (undefined
/// or a function), otherwise `Ok(Some(text))` with the finished string in
/// its determined encoding: narrow when the whole output is ASCII, wide
/// otherwise.
///
/// # Examples
///
/// ```rust
/// use json_stringify::{js, stringify};
///
/// let out = stringify(&js!([1, "2", null])).unwrap().unwrap();
/// assert_eq!(out.to_std_string(), r#"[1,"2",null]"#);
/// ```
///
/// # Errors
///
/// Returns an error for cyclic graphs, exhausted recursion budgets, and
/// exceptions raised by `toJSON` hooks or getters.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify(value: &Value) -> Result<Option<JsString>> {
    stringify_with_options(value, StringifyOptions::default())
}

/// Serializes a value to JSON text with a custom configuration.
///
/// # Examples
///
/// ```rust
/// use json_stringify::{js, stringify_with_options, StringifyOptions};
///
/// let options = StringifyOptions::new().with_max_depth(16);
/// let out = stringify_with_options(&js!({"a": [1]}), options)
///     .unwrap()
///     .unwrap();
/// assert_eq!(out.to_std_string(), r#"{"a":[1]}"#);
/// ```
///
/// # Errors
///
/// Returns an error for cyclic graphs, exhausted recursion budgets, and
/// exceptions raised by `toJSON` hooks or getters.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify_with_options(
    value: &Value,
    options: StringifyOptions,
) -> Result<Option<JsString>> {
    ser::stringify_value(value, options)
}
