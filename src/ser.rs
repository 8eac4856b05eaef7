//! The recursive serializer.
//!
//! [`Stringifier`] walks a [`Value`] graph and drives the output
//! accumulator. Per value it applies the `toJSON` hook, re-dispatches on the
//! (possibly replaced) variant, and either appends a literal, emits a string
//! through the escape tables, or recurses into a composite under the cycle
//! guard. Object member keys are deferred: a key is only written once its
//! value is known to produce output, so elided members leave no trace.
//!
//! String emission picks between two paths. When the worst-case escaped
//! length (eight units per input unit, plus quotes) fits in the active
//! segment, the inner loop writes straight into the segment with no
//! per-unit capacity checks; otherwise every unit goes through the checked
//! append. Both loops are monomorphized over the source and destination
//! widths.

use std::cell::RefCell;
use std::rc::Rc;

use crate::accumulator::{Accumulator, ActiveMut};
use crate::error::{Error, Result};
use crate::escape::SourceUnit;
use crate::map::{Property, PropertyKey};
use crate::options::StringifyOptions;
use crate::string::{CodeUnits, Encoding, JsString};
use crate::value::{number_to_string, Elements, JsArray, JsObject, Value, Wrapped};

/// What serializing one value did to the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Emit {
    /// Nothing was written; the value contributes no output. Distinct from
    /// writing an empty string.
    Unchanged,
    Written,
}

pub(crate) fn stringify_value(root: &Value, options: StringifyOptions) -> Result<Option<JsString>> {
    let mut ser = Stringifier {
        out: Accumulator::new(),
        open: Vec::new(),
        options,
    };
    let root_key = PropertyKey::Name(String::new());
    match ser.serialize(root, false, &root_key, false)? {
        Emit::Unchanged => Ok(None),
        Emit::Written => Ok(Some(ser.out.finalize())),
    }
}

struct Stringifier {
    out: Accumulator,
    /// Identities of the composites currently on the walk.
    open: Vec<usize>,
    options: StringifyOptions,
}

impl Stringifier {
    fn serialize(
        &mut self,
        value: &Value,
        comma: bool,
        key: &PropertyKey,
        defer_key: bool,
    ) -> Result<Emit> {
        let value = self.apply_to_json(value, key)?;
        match &value {
            Value::Undefined | Value::Function(_) => Ok(Emit::Unchanged),
            Value::Array(array) => {
                if defer_key {
                    self.emit_deferred_key(comma, key);
                }
                self.serialize_array(array)
            }
            Value::Wrapper(wrapper) => {
                if defer_key {
                    self.emit_deferred_key(comma, key);
                }
                let primitive = wrapper.borrow().unboxed();
                match primitive {
                    Wrapped::String(s) => self.emit_string(&s),
                    Wrapped::Int(n) => self.emit_decimal(n),
                    Wrapped::Float(n) => self.emit_float(n),
                    Wrapped::Bool(b) => {
                        self.out
                            .append_ascii(if b { "true" } else { "false" }.as_bytes());
                    }
                }
                Ok(Emit::Written)
            }
            Value::Object(object) => {
                if defer_key {
                    self.emit_deferred_key(comma, key);
                }
                self.serialize_object(object)
            }
            Value::String(s) => {
                if defer_key {
                    self.emit_deferred_key(comma, key);
                }
                self.emit_string(s);
                Ok(Emit::Written)
            }
            Value::Int(n) => {
                if defer_key {
                    self.emit_deferred_key(comma, key);
                }
                self.emit_decimal(*n);
                Ok(Emit::Written)
            }
            Value::Float(n) => {
                if defer_key {
                    self.emit_deferred_key(comma, key);
                }
                self.emit_float(*n);
                Ok(Emit::Written)
            }
            Value::Bool(b) => {
                if defer_key {
                    self.emit_deferred_key(comma, key);
                }
                self.out
                    .append_ascii(if *b { "true" } else { "false" }.as_bytes());
                Ok(Emit::Written)
            }
            Value::Null => {
                if defer_key {
                    self.emit_deferred_key(comma, key);
                }
                self.out.append_ascii(b"null");
                Ok(Emit::Written)
            }
        }
    }

    /// If the value is a composite carrying a callable `toJSON`, invokes it
    /// and returns its result; otherwise returns the value unchanged. The
    /// hook receives the value as receiver and the key in string form, and
    /// may return anything, including a composite the caller re-dispatches
    /// on.
    fn apply_to_json(&mut self, value: &Value, key: &PropertyKey) -> Result<Value> {
        let hook = match value {
            Value::Object(o) => o.borrow().to_json_property(),
            Value::Array(a) => a.borrow().to_json_property(),
            Value::Wrapper(w) => w.borrow().to_json_property(),
            _ => None,
        };
        let Some(property) = hook else {
            return Ok(value.clone());
        };
        let fetched = match property {
            Property::Data(v) => v,
            Property::Getter(getter) => getter.call(value, &[])?,
        };
        let Value::Function(hook) = fetched else {
            return Ok(value.clone());
        };
        let key_argument = Value::String(Rc::new(key.to_js_string()));
        hook.call(value, &[key_argument])
    }

    /// Writes the pending `"key":` prefix (and a separating comma) for an
    /// object member whose value is about to produce output.
    fn emit_deferred_key(&mut self, comma: bool, key: &PropertyKey) {
        if comma {
            self.out.append_byte(b',');
        }
        let key_string = key.to_js_string();
        self.emit_string(&key_string);
        self.out.append_byte(b':');
    }

    /// Enters a composite: checks the recursion budget, then scans the walk
    /// for the same identity.
    fn open_composite(&mut self, identity: usize) -> Result<()> {
        if self.open.len() >= self.options.max_depth {
            return Err(Error::StackOverflow);
        }
        if self.open.contains(&identity) {
            return Err(Error::CircularStructure);
        }
        self.open.push(identity);
        Ok(())
    }

    fn close_composite(&mut self) {
        self.open.pop();
    }

    fn serialize_array(&mut self, array: &Rc<RefCell<JsArray>>) -> Result<Emit> {
        self.open_composite(Rc::as_ptr(array) as usize)?;
        let walked = self.serialize_array_members(array);
        // The pop pairs with the push on every exit path, error included.
        self.close_composite();
        walked.map(|()| Emit::Written)
    }

    fn serialize_array_members(&mut self, array: &Rc<RefCell<JsArray>>) -> Result<()> {
        self.out.append_byte(b'[');
        let length = array.borrow().len();
        {
            let array_ref = array.borrow();
            match array_ref.elements() {
                // Integer and float storage holds no composites, so no user
                // code can run and a single borrow covers the whole loop.
                Elements::Integers(items) => {
                    for (i, &item) in items.iter().enumerate() {
                        if i > 0 {
                            self.out.append_byte(b',');
                        }
                        self.emit_decimal(item);
                    }
                    self.out.append_byte(b']');
                    return Ok(());
                }
                Elements::Floats(items) => {
                    for (i, &item) in items.iter().enumerate() {
                        if i > 0 {
                            self.out.append_byte(b',');
                        }
                        self.emit_float(item);
                    }
                    self.out.append_byte(b']');
                    return Ok(());
                }
                Elements::Generic(_) | Elements::Holey(_) => {}
            }
        }
        // Fetch one element per iteration and drop the borrow before
        // recursing: a toJSON hook may mutate the array under us.
        for i in 0..length {
            if i > 0 {
                self.out.append_byte(b',');
            }
            let element = array.borrow().element(i);
            let key = PropertyKey::Index(i as u32);
            match self.serialize(&element, false, &key, false)? {
                Emit::Written => {}
                Emit::Unchanged => self.out.append_ascii(b"null"),
            }
        }
        self.out.append_byte(b']');
        Ok(())
    }

    fn serialize_object(&mut self, object: &Rc<RefCell<JsObject>>) -> Result<Emit> {
        self.open_composite(Rc::as_ptr(object) as usize)?;
        let walked = self.serialize_object_members(object);
        self.close_composite();
        walked.map(|()| Emit::Written)
    }

    fn serialize_object_members(&mut self, object: &Rc<RefCell<JsObject>>) -> Result<()> {
        // A transparent forwarding proxy enumerates its target instead.
        let target = object.borrow().global_target();
        let object = match &target {
            Some(t) => t,
            None => object,
        };
        let keys = object.borrow().own_keys();
        self.out.append_byte(b'{');
        let mut comma = false;
        for key in &keys {
            let fetched = object.borrow().own_property(key);
            let value = match fetched {
                Some(Property::Data(v)) => v,
                Some(Property::Getter(getter)) => {
                    let receiver = Value::Object(Rc::clone(object));
                    getter.call(&receiver, &[])?
                }
                // A hook earlier in the walk may have removed the key; a
                // stale key reads as undefined and the member is elided.
                None => Value::Undefined,
            };
            if self.serialize(&value, comma, key, true)? == Emit::Written {
                comma = true;
            }
        }
        self.out.append_byte(b'}');
        Ok(())
    }

    fn emit_decimal(&mut self, n: i64) {
        self.out.append_ascii(n.to_string().as_bytes());
    }

    fn emit_float(&mut self, n: f64) {
        if n.is_finite() {
            self.out.append_ascii(number_to_string(n).as_bytes());
        } else {
            self.out.append_ascii(b"null");
        }
    }

    /// Escapes and appends a string with surrounding quotes.
    fn emit_string(&mut self, string: &JsString) {
        if self.out.encoding() == Encoding::Narrow && string.encoding() == Encoding::Wide {
            self.out.promote_to_wide();
        }
        // Worst-case escaped length: every unit expanding to a six-unit
        // escape, rounded up to a shift, plus the quotes.
        let worst_case = (string.len() << 3) + 2;
        if self.out.has_room(worst_case) {
            match (self.out.active_mut(), string.code_units()) {
                (ActiveMut::Narrow(dst), CodeUnits::Narrow(src)) => copy_escaped(src, dst),
                (ActiveMut::Wide(dst), CodeUnits::Narrow(src)) => copy_escaped(src, dst),
                (ActiveMut::Wide(dst), CodeUnits::Wide(src)) => copy_escaped(src, dst),
                (ActiveMut::Narrow(_), CodeUnits::Wide(_)) => {
                    unreachable!("wide sources force promotion before emission")
                }
            }
        } else {
            self.out.append_byte(b'"');
            match string.code_units() {
                CodeUnits::Narrow(units) => self.emit_units_checked(units),
                CodeUnits::Wide(units) => self.emit_units_checked(units),
            }
            self.out.append_byte(b'"');
        }
    }

    fn emit_units_checked<S: SourceUnit>(&mut self, units: &[S]) {
        for &unit in units {
            if unit.is_safe() {
                self.out.append_unit(unit.as_u16());
            } else {
                self.out.append_ascii(unit.escape());
            }
        }
    }
}

/// The unchecked emission loop: the caller has verified that the worst-case
/// escaped length fits in `dst`, so every write is a plain push.
fn copy_escaped<S, D>(src: &[S], dst: &mut Vec<D>)
where
    S: SourceUnit,
    D: Copy + From<u8> + From<S>,
{
    dst.push(D::from(b'"'));
    for &unit in src {
        if unit.is_safe() {
            dst.push(D::from(unit));
        } else {
            for &b in unit.escape() {
                dst.push(D::from(b));
            }
        }
    }
    dst.push(D::from(b'"'));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(value: &Value) -> String {
        stringify_value(value, StringifyOptions::default())
            .expect("serialization succeeds")
            .expect("value produces output")
            .to_std_string()
    }

    /// Straightforward reference escaping to check both emission paths
    /// against.
    fn reference_escape(s: &str) -> String {
        let mut out = String::from("\"");
        for c in s.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\u{8}' => out.push_str("\\b"),
                '\t' => out.push_str("\\t"),
                '\n' => out.push_str("\\n"),
                '\u{c}' => out.push_str("\\f"),
                '\r' => out.push_str("\\r"),
                c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }

    #[test]
    fn test_checked_and_unchecked_paths_agree() {
        // Sweep lengths across segment boundaries so short strings take the
        // in-segment path and long ones fall back to per-unit appends.
        for len in [0usize, 1, 2, 7, 31, 32, 33, 100, 257] {
            let plain: String = "ab".chars().cycle().take(len).collect();
            assert_eq!(emit(&Value::string(plain.as_str())), reference_escape(&plain));

            let escapes: String = "a\"\\\n\u{1}".chars().cycle().take(len).collect();
            assert_eq!(
                emit(&Value::string(escapes.as_str())),
                reference_escape(&escapes)
            );

            let wide: String = "aé\u{2028}".chars().cycle().take(len).collect();
            assert_eq!(emit(&Value::string(wide.as_str())), reference_escape(&wide));
        }
    }

    #[test]
    fn test_worst_case_expansion_spills_to_checked_path() {
        // 30 control characters escape to six units each; the first segment
        // cannot hold them, so this exercises sealing mid-string.
        let controls: String = std::iter::repeat('\u{1}').take(30).collect();
        assert_eq!(
            emit(&Value::string(controls.as_str())),
            reference_escape(&controls)
        );
    }

    #[test]
    fn test_promotion_midway_keeps_earlier_output() {
        let value = Value::array(JsArray::generic(vec![
            Value::from("ascii"),
            Value::from("wïde"),
        ]));
        assert_eq!(emit(&value), r#"["ascii","wïde"]"#);
    }
}
