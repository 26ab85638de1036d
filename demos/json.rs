//! Pretty-print a JSON value with ANSI colors.
//!
//! Usage: `cargo run --example json [width]`

use serde_json::Value;
use wl_pretty::{bold, color, list, semi_braces, text, AnsiStyle, Color, Doc, PageWidth};

fn value_to_doc(value: &Value) -> Doc<AnsiStyle> {
    match value {
        Value::Null => text("null").annotate(color(Color::Magenta)),
        Value::Bool(b) => text(b.to_string()).annotate(color(Color::Magenta)),
        Value::Number(n) => text(n.to_string()).annotate(color(Color::Cyan)),
        Value::String(s) => text(format!("{:?}", s)).annotate(color(Color::Green)),
        Value::Array(items) => list(items.iter().map(value_to_doc).collect()),
        Value::Object(fields) => semi_braces(
            fields
                .iter()
                .map(|(key, val)| {
                    text(format!("{:?}", key)).annotate(bold()) + text(": ") + value_to_doc(val)
                })
                .collect(),
        ),
    }
}

fn main() {
    let sample = r#"
    {
        "name": "wl-pretty",
        "tags": ["layout", "wadler", "leijen"],
        "stable": false,
        "widths": [1, 8, 25, 80, null]
    }"#;
    let value: Value = serde_json::from_str(sample).unwrap();
    let width = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(40);

    let doc = value_to_doc(&value);
    let stream = doc.layout_pretty(PageWidth::available(width, 1.0));
    println!("{}", stream.render_ansi_string().unwrap());
}
