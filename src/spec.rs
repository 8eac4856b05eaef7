//! Output Format Notes
//!
//! This module documents the JSON profile this library emits. The output of
//! every successful serialization is well-formed JSON per ECMA-404, produced
//! under the ECMA-262 `JSON.stringify` rules with no replacer and no
//! indentation.
//!
//! # Value forms
//!
//! | Input | Output |
//! |-------|--------|
//! | `Null` | `null` |
//! | `Bool` | `true` / `false` |
//! | `Int` | canonical decimal (sign + digits, no leading zeros) |
//! | finite `Float` | shortest decimal that round-trips; `-0.0` prints `0` |
//! | `NaN` / `±Infinity` | `null` |
//! | `String` | quoted, escaped (see below) |
//! | `Array` | `[` elements `]`, comma separated |
//! | `Object` | `{` members `}`, own-key insertion order |
//! | `Wrapper` | the boxed primitive's form |
//! | `Undefined` / `Function` | nothing (see elision) |
//!
//! # Elision
//!
//! A value that contributes nothing (`Undefined`, `Function`) is handled by
//! position:
//!
//! - at the root, there is no output at all (`stringify` returns `Ok(None)`);
//! - as an array element, it emits `null` to keep indices aligned;
//! - as an object member, the entire member is omitted, key included.
//!
//! Member keys are therefore *deferred*: `"key":` is written only once the
//! member's value is known to produce output.
//!
//! # String escapes
//!
//! Inside string literals:
//!
//! - `"` and `\` escape as `\"` and `\\`;
//! - the controls U+0008, U+0009, U+000A, U+000C, U+000D use their short
//!   forms `\b \t \n \f \r`;
//! - every other control below U+0020 uses `\uXXXX` with lowercase hex;
//! - everything else, `/` and all code units at or above U+0080 included,
//!   passes through verbatim. Non-ASCII text is never `\uXXXX`-escaped.
//!
//! # Output encoding
//!
//! The result string is narrow (one byte per code unit, ASCII) when no
//! non-ASCII string was appended during the walk, and wide (UTF-16 code
//! units) otherwise. The switch is one-way and preserves all content emitted
//! before it.
//!
//! # `toJSON`
//!
//! An object, array or wrapper with a callable `toJSON` property (own or
//! inherited, for objects) is replaced by that hook's return value before
//! serialization, with the property key (integer keys in decimal string
//! form) as the hook's argument. The serializer re-dispatches on the
//! returned value's actual variant (a hook may return a composite, which is
//! walked in full), but applies the hook at most once per position: a
//! `toJSON` carried by the returned value itself does not fire again.
//!
//! # Failure modes
//!
//! A cycle through object/array edges aborts with a circular-structure
//! error; exhausting the nesting budget aborts with a stack-overflow error;
//! an exception raised by a hook or getter propagates unchanged. In every
//! failure case the partial output is discarded.
