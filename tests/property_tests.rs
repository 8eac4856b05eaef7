//! Property-based tests - the output of every successful serialization must
//! parse as JSON and agree with the input modulo JSON's type reductions
//! (integer/float unified, undefined and functions elided, key order kept).

use proptest::prelude::*;

use json_stringify::{stringify, Encoding, JsArray, JsObject, Property, Value};

fn arb_value(strings: &'static str) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e9..1.0e9f64).prop_map(Value::Float),
        Just(Value::Float(f64::NAN)),
        strings.prop_map(|s| Value::from(s.as_str())),
    ];
    leaf.prop_recursive(4, 48, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8)
                .prop_map(|elements| Value::array(JsArray::generic(elements))),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..8).prop_map(|members| {
                let mut object = JsObject::new();
                for (key, value) in members {
                    object.insert(key.as_str(), value);
                }
                Value::object(object)
            }),
        ]
    })
}

/// Compares a serialized-and-reparsed document against the input under
/// JSON's reductions.
fn matches(value: &Value, json: &serde_json::Value) -> bool {
    match value {
        // Elided values only reach here as array elements, where they emit
        // null.
        Value::Undefined | Value::Function(_) => json.is_null(),
        Value::Null => json.is_null(),
        Value::Bool(b) => json.as_bool() == Some(*b),
        Value::Int(i) => json.as_i64() == Some(*i),
        Value::Float(f) if !f.is_finite() => json.is_null(),
        Value::Float(f) => json.as_f64() == Some(*f),
        Value::String(s) => json.as_str().map_or(false, |j| s.to_std_string() == j),
        Value::Array(cell) => {
            let Some(items) = json.as_array() else {
                return false;
            };
            let array = cell.borrow();
            array.len() == items.len()
                && (0..array.len()).all(|i| matches(&array.element(i), &items[i]))
        }
        Value::Object(cell) => {
            let Some(members) = json.as_object() else {
                return false;
            };
            let object = cell.borrow();
            let mut expected = Vec::new();
            for key in object.own_keys() {
                if let Some(Property::Data(v)) = object.own_property(&key) {
                    if !matches!(v, Value::Undefined | Value::Function(_)) {
                        expected.push((key.to_js_string().to_std_string(), v));
                    }
                }
            }
            expected.len() == members.len()
                && expected
                    .iter()
                    .zip(members.iter())
                    .all(|((k, v), (jk, jv))| k == jk && matches(v, jv))
        }
        Value::Wrapper(_) => false,
    }
}

proptest! {
    #[test]
    fn prop_output_reparses_to_the_input(value in arb_value("[ -~]{0,12}")) {
        match stringify(&value) {
            Ok(Some(text)) => {
                let parsed: serde_json::Value = serde_json::from_str(&text.to_std_string())
                    .expect("output must be valid JSON");
                prop_assert!(matches(&value, &parsed), "mismatch for {}", text.to_std_string());
            }
            Ok(None) => prop_assert!(matches!(value, Value::Undefined | Value::Function(_))),
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }

    #[test]
    fn prop_unicode_output_reparses_to_the_input(value in arb_value("\\PC{0,8}")) {
        if let Ok(Some(text)) = stringify(&value) {
            let parsed: serde_json::Value = serde_json::from_str(&text.to_std_string())
                .expect("output must be valid JSON");
            prop_assert!(matches(&value, &parsed), "mismatch for {}", text.to_std_string());
        }
    }

    #[test]
    fn prop_ascii_graphs_serialize_narrow(value in arb_value("[ -~]{0,12}")) {
        if let Ok(Some(text)) = stringify(&value) {
            prop_assert_eq!(text.encoding(), Encoding::Narrow);
        }
    }

    #[test]
    fn prop_integers_round_trip_exactly(n in any::<i64>()) {
        let text = stringify(&Value::Int(n)).unwrap().unwrap();
        prop_assert_eq!(text.to_std_string(), n.to_string());
    }

    #[test]
    fn prop_finite_floats_round_trip_through_parse(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let text = stringify(&Value::Float(f)).unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text.to_std_string()).unwrap();
        prop_assert_eq!(parsed.as_f64(), Some(if f == 0.0 { 0.0 } else { f }));
    }

    #[test]
    fn prop_single_strings_reparse_verbatim(s in "\\PC{0,40}") {
        let text = stringify(&Value::from(s.as_str())).unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text.to_std_string()).unwrap();
        prop_assert_eq!(parsed.as_str(), Some(s.as_str()));
    }
}
