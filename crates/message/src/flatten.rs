/// Flattening of nested attributes into sorted `path=value` pairs.
///
/// Map keys are sorted at every level so equal structures always produce the
/// same sequence regardless of how the map was built. Arrays use their
/// zero-based index as the path segment.

use std::fmt::Write;

use serde_json::{Map, Value};

use crate::ansi;
use crate::args::Arg;

pub const DEFAULT_DELIMITER: &str = ".";

/// Flatten `value` into ordered `(path, value)` leaf pairs.
///
/// `prefix` is prepended to every path; an empty `delimiter` falls back to `.`.
pub fn flatten(value: &Value, prefix: &str, delimiter: &str) -> Vec<(String, String)> {
    let delimiter = if delimiter.is_empty() { DEFAULT_DELIMITER } else { delimiter };
    let mut pairs = Vec::new();
    walk(prefix, value, delimiter, &mut pairs);
    pairs
}

pub fn flatten_map(map: &Map<String, Value>, prefix: &str, delimiter: &str) -> Vec<(String, String)> {
    let delimiter = if delimiter.is_empty() { DEFAULT_DELIMITER } else { delimiter };
    let mut pairs = Vec::new();
    walk_map(prefix, map, delimiter, &mut pairs);
    pairs
}

/// Flatten a message argument. Scalars produce a single pair with `prefix` as path.
pub fn flatten_arg(arg: &Arg, prefix: &str, delimiter: &str) -> Vec<(String, String)> {
    match arg {
        Arg::Map(map) => flatten_map(map, prefix, delimiter),
        Arg::Unsupported => Vec::new(),
        other => flatten(&other.to_json(), prefix, delimiter),
    }
}

fn walk(path: &str, value: &Value, delimiter: &str, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => walk_map(path, map, delimiter, pairs),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk(&join(path, &i.to_string(), delimiter), item, delimiter, pairs);
            }
        }
        scalar => pairs.push((path.to_string(), scalar_string(scalar))),
    }
}

fn walk_map(path: &str, map: &Map<String, Value>, delimiter: &str, pairs: &mut Vec<(String, String)>) {
    // serde_json may be built with `preserve_order`; never rely on map order
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    for key in keys {
        if let Some(value) = map.get(key) {
            walk(&join(path, key, delimiter), value, delimiter, pairs);
        }
    }
}

fn join(parent: &str, key: &str, delimiter: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", parent, delimiter, key)
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        // whole floats print without a trailing `.0`
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) => f.to_string(),
            None => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Render flattened pairs as `key=value` separated by single spaces.
///
/// Values containing a space are double-quoted. With `colors`, key and value
/// are wrapped independently.
pub fn render_pairs(pairs: &[(String, String)], colors: bool) -> String {
    let mut out = String::new();
    for (key, value) in pairs {
        let value = if value.contains(' ') {
            format!("\"{}\"", value)
        } else {
            value.clone()
        };

        let _ = if colors {
            write!(
                out,
                "{}={} ",
                ansi::paint(ansi::PROPERTY_KEY, key),
                ansi::paint(ansi::PROPERTY_VALUE, &value)
            )
        } else {
            write!(out, "{}={} ", key, value)
        };
    }
    out.trim().to_string()
}

/// Flattened `key=value` rendering of one argument with the default delimiter.
pub fn properties(arg: &Arg, colors: bool) -> String {
    render_pairs(&flatten_arg(arg, "", DEFAULT_DELIMITER), colors)
}
