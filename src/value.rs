//! The dynamically-typed value graph the serializer walks.
//!
//! [`Value`] is a tagged sum over every variant the serializer dispatches
//! on: the JSON-visible primitives, strings, composites, plus the variants
//! that only steer serialization: `Undefined` and `Function` contribute no
//! output, and `Wrapper` is a boxed primitive that unwraps on the way out.
//!
//! Composites ([`JsArray`], [`JsObject`], [`JsWrapper`]) are shared mutable
//! cells (`Rc<RefCell<_>>`):
//!
//! - graphs can alias and contain cycles (which serialization detects by
//!   pointer identity),
//! - `toJSON` hooks and getters can mutate the graph mid-walk,
//! - cloning a [`Value`] clones a handle, not the structure.
//!
//! ## Building values
//!
//! ```rust
//! use json_stringify::{js, stringify};
//!
//! let value = js!({
//!     "name": "Alice",
//!     "tags": ["admin", "user"],
//!     "age": 30
//! });
//!
//! let out = stringify(&value).unwrap().unwrap();
//! assert_eq!(
//!     out.to_std_string(),
//!     r#"{"name":"Alice","tags":["admin","user"],"age":30}"#
//! );
//! ```
//!
//! ## `toJSON` hooks
//!
//! Any composite can carry a `toJSON` property holding a [`Value::Function`];
//! the serializer invokes it with the value as receiver and the property key
//! (in string form) as the single argument, then serializes whatever it
//! returns.
//!
//! ```rust
//! use json_stringify::{stringify, JsObject, Value};
//!
//! let mut object = JsObject::new();
//! object.insert("toJSON", Value::function(|_receiver, _args| Ok(Value::Int(42))));
//!
//! let out = stringify(&Value::object(object)).unwrap().unwrap();
//! assert_eq!(out.to_std_string(), "42");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::map::{Property, PropertyKey, PropertyMap};
use crate::string::JsString;

/// A dynamically-typed value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// Contributes nothing to output: elided as an object member, `null` as
    /// an array element, no output at all at the root.
    Undefined,
    #[default]
    Null,
    Bool(bool),
    /// A machine-word signed integer.
    Int(i64),
    /// An IEEE-754 double. Non-finite values serialize as `null`.
    Float(f64),
    String(Rc<JsString>),
    Array(Rc<RefCell<JsArray>>),
    Object(Rc<RefCell<JsObject>>),
    /// Callable; treated like `Undefined` by serialization.
    Function(NativeFunction),
    /// A boxed primitive (`String`, `Number` or `Boolean` class).
    Wrapper(Rc<RefCell<JsWrapper>>),
}

impl Value {
    /// Wraps a string value.
    pub fn string(s: impl Into<JsString>) -> Value {
        Value::String(Rc::new(s.into()))
    }

    /// Moves an array into a fresh shared cell.
    #[must_use]
    pub fn array(array: JsArray) -> Value {
        Value::Array(Rc::new(RefCell::new(array)))
    }

    /// Moves an object into a fresh shared cell.
    #[must_use]
    pub fn object(object: JsObject) -> Value {
        Value::Object(Rc::new(RefCell::new(object)))
    }

    /// Moves a wrapper into a fresh shared cell.
    #[must_use]
    pub fn wrapper(wrapper: JsWrapper) -> Value {
        Value::Wrapper(Rc::new(RefCell::new(wrapper)))
    }

    /// Wraps a native function.
    pub fn function(f: impl Fn(&Value, &[Value]) -> Result<Value> + 'static) -> Value {
        Value::Function(NativeFunction::new(f))
    }

    /// Returns `true` if the value is `Undefined`.
    #[inline]
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns `true` if the value is `Null`.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::string(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::string(v)
    }
}

impl From<JsString> for Value {
    fn from(v: JsString) -> Self {
        Value::String(Rc::new(v))
    }
}

/// A callable host function, used for `toJSON` hooks and property getters.
///
/// Functions are opaque to serialization; as a value they behave like
/// `Undefined`.
#[derive(Clone)]
pub struct NativeFunction(Rc<dyn Fn(&Value, &[Value]) -> Result<Value>>);

impl NativeFunction {
    pub fn new(f: impl Fn(&Value, &[Value]) -> Result<Value> + 'static) -> Self {
        NativeFunction(Rc::new(f))
    }

    /// Invokes the function with the given receiver and arguments.
    pub fn call(&self, receiver: &Value, args: &[Value]) -> Result<Value> {
        (self.0)(receiver, args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeFunction")
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Element storage for arrays, specialized by kind.
///
/// The integer and float kinds cannot hold composites, so serializing them
/// never runs user code; the serializer exploits that with branch-free inner
/// loops. `Holey` reads missing slots as `Undefined`.
#[derive(Clone, Debug, PartialEq)]
pub enum Elements {
    Integers(Vec<i64>),
    Floats(Vec<f64>),
    Generic(Vec<Value>),
    Holey(Vec<Option<Value>>),
}

/// An ordered array of values.
#[derive(Clone, Debug, PartialEq)]
pub struct JsArray {
    elements: Elements,
    /// Named properties (a `toJSON` member, typically). Not enumerated by
    /// serialization.
    properties: PropertyMap,
}

impl JsArray {
    #[must_use]
    pub fn integers(items: Vec<i64>) -> Self {
        JsArray {
            elements: Elements::Integers(items),
            properties: PropertyMap::new(),
        }
    }

    #[must_use]
    pub fn floats(items: Vec<f64>) -> Self {
        JsArray {
            elements: Elements::Floats(items),
            properties: PropertyMap::new(),
        }
    }

    #[must_use]
    pub fn generic(items: Vec<Value>) -> Self {
        JsArray {
            elements: Elements::Generic(items),
            properties: PropertyMap::new(),
        }
    }

    /// An array with holes; `None` slots read as `Undefined`.
    #[must_use]
    pub fn holey(items: Vec<Option<Value>>) -> Self {
        JsArray {
            elements: Elements::Holey(items),
            properties: PropertyMap::new(),
        }
    }

    /// The array length.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.elements {
            Elements::Integers(v) => v.len(),
            Elements::Floats(v) => v.len(),
            Elements::Generic(v) => v.len(),
            Elements::Holey(v) => v.len(),
        }
    }

    /// Returns `true` if the array is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Indexed element access. Holes and out-of-range indices read as
    /// `Undefined`.
    #[must_use]
    pub fn element(&self, index: usize) -> Value {
        match &self.elements {
            Elements::Integers(v) => v.get(index).map_or(Value::Undefined, |&n| Value::Int(n)),
            Elements::Floats(v) => v.get(index).map_or(Value::Undefined, |&n| Value::Float(n)),
            Elements::Generic(v) => v.get(index).cloned().unwrap_or(Value::Undefined),
            Elements::Holey(v) => v
                .get(index)
                .and_then(Clone::clone)
                .unwrap_or(Value::Undefined),
        }
    }

    /// The backing element storage.
    #[must_use]
    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    /// Installs a named property (serialization only consults `toJSON`).
    pub fn set_property(&mut self, key: impl Into<PropertyKey>, value: Value) {
        self.properties.insert(key, value);
    }

    pub(crate) fn to_json_property(&self) -> Option<Property> {
        self.properties.get(&to_json_key()).cloned()
    }
}

/// An object with ordered own properties.
///
/// The prototype link exists for `toJSON` lookup only (the hook is found
/// own-or-inherited); own-property enumeration never walks it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsObject {
    properties: PropertyMap,
    prototype: Option<Rc<RefCell<JsObject>>>,
    global_target: Option<Rc<RefCell<JsObject>>>,
}

impl JsObject {
    /// Creates an empty object with no prototype.
    #[must_use]
    pub fn new() -> Self {
        JsObject::default()
    }

    /// Creates a transparent forwarding proxy: serialization enumerates the
    /// target's properties instead of the proxy's.
    #[must_use]
    pub fn global_proxy(target: Rc<RefCell<JsObject>>) -> Self {
        JsObject {
            properties: PropertyMap::new(),
            prototype: None,
            global_target: Some(target),
        }
    }

    /// Inserts a data property, keeping insertion order.
    pub fn insert(&mut self, key: impl Into<PropertyKey>, value: Value) {
        self.properties.insert(key, value);
    }

    /// Installs a getter-backed property; fetching it runs the getter, which
    /// may raise.
    pub fn insert_getter(
        &mut self,
        key: impl Into<PropertyKey>,
        getter: impl Fn(&Value, &[Value]) -> Result<Value> + 'static,
    ) {
        self.properties
            .insert_getter(key, NativeFunction::new(getter));
    }

    /// Removes an own property.
    pub fn remove(&mut self, key: &PropertyKey) -> Option<Property> {
        self.properties.remove(key)
    }

    /// Sets the prototype used for inherited `toJSON` lookup.
    pub fn set_prototype(&mut self, prototype: Rc<RefCell<JsObject>>) {
        self.prototype = Some(prototype);
    }

    /// A snapshot of the own enumerable keys, in insertion order.
    #[must_use]
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.properties.keys().cloned().collect()
    }

    /// The own property under `key`, if present.
    #[must_use]
    pub fn own_property(&self, key: &PropertyKey) -> Option<Property> {
        self.properties.get(key).cloned()
    }

    pub(crate) fn global_target(&self) -> Option<Rc<RefCell<JsObject>>> {
        self.global_target.clone()
    }

    /// `toJSON` lookup: own properties first, then up the prototype chain.
    pub(crate) fn to_json_property(&self) -> Option<Property> {
        let key = to_json_key();
        if let Some(p) = self.properties.get(&key) {
            return Some(p.clone());
        }
        let mut prototype = self.prototype.clone();
        while let Some(link) = prototype {
            let object = link.borrow();
            if let Some(p) = object.properties.get(&key) {
                return Some(p.clone());
            }
            prototype = object.prototype.clone();
        }
        None
    }
}

fn to_json_key() -> PropertyKey {
    PropertyKey::Name("toJSON".to_string())
}

/// The internal class of a boxed primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapperClass {
    String,
    Number,
    Boolean,
}

/// The primitive boxed by a wrapper.
#[derive(Clone, Debug, PartialEq)]
pub enum Wrapped {
    String(Rc<JsString>),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// A boxed primitive, serialized by unwrapping to the primitive it holds.
#[derive(Clone, Debug, PartialEq)]
pub struct JsWrapper {
    primitive: Wrapped,
    properties: PropertyMap,
}

impl JsWrapper {
    /// Boxes a string (`String` class).
    pub fn string(s: impl Into<JsString>) -> Self {
        JsWrapper {
            primitive: Wrapped::String(Rc::new(s.into())),
            properties: PropertyMap::new(),
        }
    }

    /// Boxes an integer (`Number` class).
    #[must_use]
    pub fn int(n: i64) -> Self {
        JsWrapper {
            primitive: Wrapped::Int(n),
            properties: PropertyMap::new(),
        }
    }

    /// Boxes a double (`Number` class).
    #[must_use]
    pub fn float(n: f64) -> Self {
        JsWrapper {
            primitive: Wrapped::Float(n),
            properties: PropertyMap::new(),
        }
    }

    /// Boxes a boolean (`Boolean` class).
    #[must_use]
    pub fn boolean(b: bool) -> Self {
        JsWrapper {
            primitive: Wrapped::Bool(b),
            properties: PropertyMap::new(),
        }
    }

    /// The wrapper's internal class.
    #[must_use]
    pub fn class(&self) -> WrapperClass {
        match self.primitive {
            Wrapped::String(_) => WrapperClass::String,
            Wrapped::Int(_) | Wrapped::Float(_) => WrapperClass::Number,
            Wrapped::Bool(_) => WrapperClass::Boolean,
        }
    }

    /// The boxed primitive.
    #[must_use]
    pub fn unboxed(&self) -> Wrapped {
        self.primitive.clone()
    }

    /// Installs a named property (serialization only consults `toJSON`).
    pub fn set_property(&mut self, key: impl Into<PropertyKey>, value: Value) {
        self.properties.insert(key, value);
    }

    pub(crate) fn to_json_property(&self) -> Option<Property> {
        self.properties.get(&to_json_key()).cloned()
    }
}

/// The decimal form of a finite double: shortest representation that parses
/// back to the same value, with negative zero printing as `0`.
///
/// # Examples
///
/// ```rust
/// use json_stringify::number_to_string;
///
/// assert_eq!(number_to_string(2.5), "2.5");
/// assert_eq!(number_to_string(2.0), "2");
/// assert_eq!(number_to_string(-0.0), "0");
/// ```
#[must_use]
pub fn number_to_string(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}
