//! Your first serialization: build a graph with `js!` and stringify it.
//!
//! Run with: `cargo run --example simple`

use json_stringify::{js, stringify, Value};

fn main() {
    let user = js!({
        "id": 123,
        "name": "Alice",
        "active": true,
        "tags": ["admin", "developer"],
        "score": 99.5
    });

    let out = stringify(&user).unwrap().expect("objects always serialize");
    println!("{}", out.to_std_string());

    // Undefined members disappear; undefined elements become null.
    let sparse = js!({
        "kept": [1, undefined, 2],
        "dropped": undefined
    });
    let out = stringify(&sparse).unwrap().unwrap();
    println!("{}", out.to_std_string());

    // A root that contributes nothing has no output at all.
    assert!(stringify(&Value::Undefined).unwrap().is_none());
}
