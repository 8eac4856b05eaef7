//! Ordered own-property storage for objects.
//!
//! This module provides [`PropertyMap`], a wrapper around [`IndexMap`] that
//! keeps properties in insertion order. Enumeration order is observable in
//! the serialized output (members are emitted in own-key order), so the map
//! must be deterministic and insertion-ordered, the reason for `IndexMap`
//! over `HashMap`.
//!
//! Keys are strings or non-negative integers ([`PropertyKey`]); values are
//! plain data or native getters ([`Property`]), so a property fetch can run
//! host code and raise.
//!
//! ## Examples
//!
//! ```rust
//! use json_stringify::{PropertyKey, PropertyMap, Value};
//!
//! let mut map = PropertyMap::new();
//! map.insert(PropertyKey::from("name"), Value::from("Alice"));
//! map.insert(PropertyKey::from("age"), Value::from(30));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec![PropertyKey::from("name"), PropertyKey::from("age")]);
//! ```

use indexmap::IndexMap;

use crate::string::JsString;
use crate::value::{NativeFunction, Value};

/// An own-property key: a string or a non-negative integer.
///
/// Integer keys keep their numeric identity (an element fetch at that index)
/// but stringify on the way out: both the argument handed to a `toJSON` hook
/// and the emitted member key are the decimal string form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Index(u32),
    Name(String),
}

impl PropertyKey {
    /// The string form of the key, as handed to `toJSON` and written to the
    /// output.
    #[must_use]
    pub fn to_js_string(&self) -> JsString {
        match self {
            PropertyKey::Index(i) => JsString::from(i.to_string().as_str()),
            PropertyKey::Name(s) => JsString::from(s.as_str()),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        PropertyKey::Name(name.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        PropertyKey::Name(name)
    }
}

impl From<u32> for PropertyKey {
    fn from(index: u32) -> Self {
        PropertyKey::Index(index)
    }
}

/// An own property: a plain value, or a getter whose invocation may raise.
#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    Data(Value),
    Getter(NativeFunction),
}

/// An ordered map of property keys to properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyMap(IndexMap<PropertyKey, Property>);

impl PropertyMap {
    /// Creates an empty `PropertyMap`.
    #[must_use]
    pub fn new() -> Self {
        PropertyMap(IndexMap::new())
    }

    /// Creates an empty `PropertyMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PropertyMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a data property. An existing property under the same key is
    /// replaced in place, keeping its position.
    pub fn insert(&mut self, key: impl Into<PropertyKey>, value: Value) -> Option<Property> {
        self.0.insert(key.into(), Property::Data(value))
    }

    /// Installs a getter-backed property.
    pub fn insert_getter(
        &mut self,
        key: impl Into<PropertyKey>,
        getter: NativeFunction,
    ) -> Option<Property> {
        self.0.insert(key.into(), Property::Getter(getter))
    }

    /// Removes a property, shifting later entries down.
    pub fn remove(&mut self, key: &PropertyKey) -> Option<Property> {
        self.0.shift_remove(key)
    }

    /// Returns the property under `key`, if present.
    #[must_use]
    pub fn get(&self, key: &PropertyKey) -> Option<&Property> {
        self.0.get(key)
    }

    /// The number of own properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no own properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, PropertyKey, Property> {
        self.0.keys()
    }

    /// Iterates over the key/property pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, PropertyKey, Property> {
        self.0.iter()
    }
}

impl IntoIterator for PropertyMap {
    type Item = (PropertyKey, Property);
    type IntoIter = indexmap::map::IntoIter<PropertyKey, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(PropertyKey, Value)> for PropertyMap {
    fn from_iter<T: IntoIterator<Item = (PropertyKey, Value)>>(iter: T) -> Self {
        PropertyMap(
            iter.into_iter()
                .map(|(k, v)| (k, Property::Data(v)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut map = PropertyMap::new();
        map.insert("zebra", Value::Int(1));
        map.insert("apple", Value::Int(2));
        map.insert(PropertyKey::Index(7), Value::Int(3));

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                PropertyKey::from("zebra"),
                PropertyKey::from("apple"),
                PropertyKey::Index(7),
            ]
        );
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut map = PropertyMap::new();
        map.insert("a", Value::Int(1));
        map.insert("b", Value::Int(2));
        assert!(map.insert("a", Value::Int(3)).is_some());

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec![PropertyKey::from("a"), PropertyKey::from("b")]);
        assert_eq!(
            map.get(&PropertyKey::from("a")),
            Some(&Property::Data(Value::Int(3)))
        );
    }

    #[test]
    fn test_index_keys_stringify() {
        assert_eq!(PropertyKey::Index(42).to_js_string(), "42");
        assert_eq!(PropertyKey::from("x").to_js_string(), "x");
    }
}
