//! Structural rendering of values.
//!
//! `inspect` produces the full, untruncated text of a value; `obj_display`
//! in [`crate::display`] decides whether that text is short enough to embed
//! in a failure message.

use chrono::SecondsFormat;

use crate::value::{Function, Object, Value};

/// Nesting depth rendered before containers collapse to `[Array]`/`[Object]`.
pub const DEFAULT_DEPTH: usize = 2;

/// Renders `value` with the default depth.
#[must_use]
pub fn inspect(value: &Value) -> String {
    inspect_with(value, DEFAULT_DEPTH)
}

/// Renders `value`, collapsing containers nested deeper than `depth`.
#[must_use]
pub fn inspect_with(value: &Value, depth: usize) -> String {
    let mut out = String::new();
    render(value, 0, depth, &mut out);
    out
}

fn render(value: &Value, level: usize, depth: usize, out: &mut String) {
    match value {
        Value::Undefined => out.push_str("undefined"),
        Value::Null => out.push_str("null"),
        Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
        Value::Int(v) => out.push_str(&v.to_string()),
        Value::Float(v) => out.push_str(&render_float(*v)),
        Value::String(v) => render_string(v, out),
        Value::Array(items) => render_array(items, level, depth, out),
        Value::Object(obj) => render_object(obj, level, depth, out),
        Value::Function(f) => render_function(f, out),
        Value::Date(d) => out.push_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
    }
}

fn render_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if v == 0.0 && v.is_sign_negative() {
        "-0".to_string()
    } else {
        v.to_string()
    }
}

fn render_string(v: &str, out: &mut String) {
    out.push('\'');
    for c in v.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('\'');
}

fn render_array(items: &[Value], level: usize, depth: usize, out: &mut String) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    if level > depth {
        out.push_str("[Array]");
        return;
    }
    out.push_str("[ ");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        render(item, level + 1, depth, out);
    }
    out.push_str(" ]");
}

fn render_object(obj: &Object, level: usize, depth: usize, out: &mut String) {
    if obj.is_empty() {
        out.push_str("{}");
        return;
    }
    if level > depth {
        out.push_str("[Object]");
        return;
    }
    out.push_str("{ ");
    for (i, (key, value)) in obj.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if is_identifier(key) {
            out.push_str(key);
        } else {
            render_string(key, out);
        }
        out.push_str(": ");
        render(value, level + 1, depth, out);
    }
    out.push_str(" }");
}

fn render_function(f: &Function, out: &mut String) {
    match f.name() {
        Some(name) => {
            out.push_str("[Function ");
            out.push_str(name);
            out.push(']');
        }
        None => out.push_str("[Function <anonymous>]"),
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
