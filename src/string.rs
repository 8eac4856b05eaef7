//! Host strings with two backing encodings.
//!
//! [`JsString`] stores a sequence of UTF-16 code units in one of two
//! representations:
//!
//! - **Narrow**: one byte per code unit, restricted to ASCII (`< 0x80`)
//! - **Wide**: two bytes per code unit
//!
//! Constructors canonicalize, so a string is wide exactly when it contains a
//! code unit `>= 0x80`. The serializer relies on this: appending any wide
//! string promotes the output buffer to the wide encoding, and a narrow
//! string can always be copied into a narrow buffer unit for unit.
//!
//! Strings are immutable once built. Because code units, not `char`s, are
//! the unit of storage, lone surrogates are representable; converting back to
//! a Rust [`String`] replaces them with U+FFFD.
//!
//! ## Examples
//!
//! ```rust
//! use json_stringify::{Encoding, JsString};
//!
//! let ascii = JsString::from("hello");
//! assert_eq!(ascii.encoding(), Encoding::Narrow);
//! assert_eq!(ascii.len(), 5);
//!
//! let accented = JsString::from("héllo");
//! assert_eq!(accented.encoding(), Encoding::Wide);
//! assert_eq!(accented.to_std_string(), "héllo");
//! ```

use std::fmt;

/// The character width of a string or output buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// One byte per code unit; ASCII only.
    Narrow,
    /// Two bytes per code unit.
    Wide,
}

/// An immutable host string of UTF-16 code units.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JsString {
    repr: Repr,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Repr {
    Narrow(Vec<u8>),
    Wide(Vec<u16>),
}

/// A contiguous read-only view of a string's code units.
#[derive(Clone, Copy, Debug)]
pub enum CodeUnits<'a> {
    Narrow(&'a [u8]),
    Wide(&'a [u16]),
}

impl JsString {
    /// Builds a string from raw UTF-16 code units, picking the narrow
    /// representation when every unit is ASCII.
    ///
    /// The units are taken verbatim; unpaired surrogates are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_stringify::{Encoding, JsString};
    ///
    /// let s = JsString::from_code_units(vec![0x68, 0x69]);
    /// assert_eq!(s.encoding(), Encoding::Narrow);
    /// assert_eq!(s.to_std_string(), "hi");
    /// ```
    #[must_use]
    pub fn from_code_units(units: Vec<u16>) -> Self {
        if units.iter().all(|&u| u < 0x80) {
            JsString {
                repr: Repr::Narrow(units.into_iter().map(|u| u as u8).collect()),
            }
        } else {
            JsString {
                repr: Repr::Wide(units),
            }
        }
    }

    /// Wraps ASCII bytes without re-checking or copying.
    pub(crate) fn from_narrow_bytes(bytes: Vec<u8>) -> Self {
        debug_assert!(bytes.iter().all(|&b| b < 0x80));
        JsString {
            repr: Repr::Narrow(bytes),
        }
    }

    /// Wraps code units as a wide string without canonicalizing. Used by the
    /// output buffer, whose encoding is decided by the promotion protocol
    /// rather than by content.
    pub(crate) fn from_wide_units(units: Vec<u16>) -> Self {
        JsString {
            repr: Repr::Wide(units),
        }
    }

    /// The number of code units (not bytes, not `char`s).
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Narrow(b) => b.len(),
            Repr::Wide(u) => u.len(),
        }
    }

    /// Returns `true` if the string has no code units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The backing representation width.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        match &self.repr {
            Repr::Narrow(_) => Encoding::Narrow,
            Repr::Wide(_) => Encoding::Wide,
        }
    }

    /// A borrowed view of the code units.
    #[must_use]
    pub fn code_units(&self) -> CodeUnits<'_> {
        match &self.repr {
            Repr::Narrow(b) => CodeUnits::Narrow(b),
            Repr::Wide(u) => CodeUnits::Wide(u),
        }
    }

    /// Converts to a Rust string, replacing unpaired surrogates with U+FFFD.
    #[must_use]
    pub fn to_std_string(&self) -> String {
        match &self.repr {
            Repr::Narrow(b) => b.iter().map(|&b| b as char).collect(),
            Repr::Wide(u) => String::from_utf16_lossy(u),
        }
    }
}

impl From<&str> for JsString {
    fn from(s: &str) -> Self {
        if s.is_ascii() {
            JsString {
                repr: Repr::Narrow(s.as_bytes().to_vec()),
            }
        } else {
            JsString {
                repr: Repr::Wide(s.encode_utf16().collect()),
            }
        }
    }
}

impl From<String> for JsString {
    fn from(s: String) -> Self {
        JsString::from(s.as_str())
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_std_string())
    }
}

impl PartialEq<str> for JsString {
    fn eq(&self, other: &str) -> bool {
        match &self.repr {
            // ASCII bytes and UTF-8 bytes coincide below 0x80.
            Repr::Narrow(b) => other.as_bytes() == &b[..],
            Repr::Wide(u) => other.encode_utf16().eq(u.iter().copied()),
        }
    }
}

impl PartialEq<&str> for JsString {
    fn eq(&self, other: &&str) -> bool {
        PartialEq::<str>::eq(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_strings_are_narrow() {
        let s = JsString::from("plain ascii");
        assert_eq!(s.encoding(), Encoding::Narrow);
        assert_eq!(s.len(), 11);
        assert_eq!(s, "plain ascii");
    }

    #[test]
    fn test_non_ascii_strings_are_wide() {
        let s = JsString::from("héllo");
        assert_eq!(s.encoding(), Encoding::Wide);
        assert_eq!(s.len(), 5);
        assert_eq!(s, "héllo");
    }

    #[test]
    fn test_code_unit_constructor_canonicalizes() {
        let narrow = JsString::from_code_units(vec![0x61, 0x62]);
        assert_eq!(narrow.encoding(), Encoding::Narrow);

        let wide = JsString::from_code_units(vec![0x61, 0x2028]);
        assert_eq!(wide.encoding(), Encoding::Wide);
    }

    #[test]
    fn test_supplementary_plane_uses_surrogate_pairs() {
        let s = JsString::from("𝄞");
        assert_eq!(s.encoding(), Encoding::Wide);
        assert_eq!(s.len(), 2);
        assert_eq!(s.to_std_string(), "𝄞");
    }

    #[test]
    fn test_lone_surrogate_is_representable() {
        let s = JsString::from_code_units(vec![0xD800]);
        assert_eq!(s.encoding(), Encoding::Wide);
        assert_eq!(s.len(), 1);
        assert_eq!(s.to_std_string(), "\u{FFFD}");
    }

    #[test]
    fn test_empty_string() {
        let s = JsString::from("");
        assert!(s.is_empty());
        assert_eq!(s.encoding(), Encoding::Narrow);
    }
}
