//! Literal interpolation for debug output.
//!
//! Produces human-readable SQL by substituting each `?` with the matching
//! bind value. Identifiers are not escaped and the result must never be
//! executed; use [`BuiltQuery`](crate::qb::BuiltQuery) for that.

use crate::qb::param::Value;

/// Render a single bind value as a SQL literal.
///
/// Integers print as digits, strings are double-quoted with `\` and `"`
/// escaped, and `true` prints as `1`. Every other value (including `false`)
/// renders as an empty string.
pub fn literal(value: &Value) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::Text(s) => {
            let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
            format!("\"{escaped}\"")
        }
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Float(_) | Value::Null => String::new(),
    }
}

/// Replace every `?` in `sql`, in order, with the literal of the next value.
///
/// Placeholders without a matching value render as an empty string.
pub fn interpolate(sql: &str, values: &[Value]) -> String {
    let mut out = String::with_capacity(sql.len() + values.len() * 4);
    let mut values = values.iter();

    for ch in sql.chars() {
        if ch == '?' {
            if let Some(v) = values.next() {
                out.push_str(&literal(v));
            }
        } else {
            out.push(ch);
        }
    }

    out
}
