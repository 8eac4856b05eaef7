#[macro_export]
macro_rules! js {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle undefined
    (undefined) => {
        $crate::Value::Undefined
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::array($crate::JsArray::generic(::std::vec::Vec::new()))
    };

    // Handle non-empty array
    ([ $($element:tt),* $(,)? ]) => {
        $crate::Value::array($crate::JsArray::generic(vec![$($crate::js!($element)),*]))
    };

    // Handle empty object
    ({}) => {
        $crate::Value::object($crate::JsObject::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::JsObject::new();
        $(
            object.insert($key, $crate::js!($value));
        )*
        $crate::Value::object(object)
    }};

    // Fallback for any expression with a Value conversion
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{JsArray, JsObject, PropertyKey, Value};

    #[test]
    fn test_js_macro_primitives() {
        assert_eq!(js!(null), Value::Null);
        assert_eq!(js!(undefined), Value::Undefined);
        assert_eq!(js!(true), Value::Bool(true));
        assert_eq!(js!(false), Value::Bool(false));
        assert_eq!(js!(42), Value::Int(42));
        assert_eq!(js!(2.5), Value::Float(2.5));
        assert_eq!(js!("hello"), Value::string("hello"));
    }

    #[test]
    fn test_js_macro_arrays() {
        assert_eq!(js!([]), Value::array(JsArray::generic(vec![])));

        let array = js!([1, "two", null]);
        match array {
            Value::Array(cell) => {
                let array = cell.borrow();
                assert_eq!(array.len(), 3);
                assert_eq!(array.element(0), Value::Int(1));
                assert_eq!(array.element(1), Value::string("two"));
                assert_eq!(array.element(2), Value::Null);
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_js_macro_objects() {
        assert_eq!(js!({}), Value::object(JsObject::new()));

        let object = js!({
            "name": "Alice",
            "age": 30
        });

        match object {
            Value::Object(cell) => {
                let object = cell.borrow();
                assert_eq!(object.own_keys().len(), 2);
                assert_eq!(
                    object.own_property(&PropertyKey::from("name")),
                    Some(crate::Property::Data(Value::string("Alice")))
                );
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_js_macro_nesting() {
        let value = js!({
            "items": [1, 2, {"deep": true}],
            "empty": {}
        });
        assert!(value.is_object());
    }
}
