//! `toJSON` hooks: values that rewrite themselves on the way out.
//!
//! Run with: `cargo run --example to_json_hook`

use json_stringify::{js, stringify, JsObject, Value};

fn main() {
    // A timestamp-like object that serializes as its ISO string.
    let mut stamp = JsObject::new();
    stamp.insert("seconds", Value::Int(1_705_314_600));
    stamp.insert(
        "toJSON",
        Value::function(|_receiver, _args| Ok(Value::from("2024-01-15T10:30:00Z"))),
    );

    let mut event = JsObject::new();
    event.insert("name", Value::from("deploy"));
    event.insert("at", Value::object(stamp));

    let out = stringify(&Value::object(event)).unwrap().unwrap();
    println!("{}", out.to_std_string());

    // Hooks receive the property key and may return composites, which are
    // serialized in turn.
    let mut keyed = JsObject::new();
    keyed.insert(
        "toJSON",
        Value::function(|_receiver, args| {
            let key = match args.first() {
                Some(Value::String(s)) => s.to_std_string(),
                _ => String::new(),
            };
            Ok(js!({ "seen_key": key }))
        }),
    );

    let mut holder = JsObject::new();
    holder.insert("inner", Value::object(keyed));
    let out = stringify(&Value::object(holder)).unwrap().unwrap();
    println!("{}", out.to_std_string());
}
