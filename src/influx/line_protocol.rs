//! InfluxDB line protocol encoding
//!
//! `measurement[,tag=value...] field=value[,field=value...] timestamp_ns`

use std::fmt::Write;

use super::point::{FieldValue, MetricPoint};

/// Escape a measurement name (comma and space)
pub fn escape_measurement(s: &str) -> String {
    escape(s, &[',', ' '])
}

/// Escape a tag key, tag value or field key (comma, equals and space)
pub fn escape_key(s: &str) -> String {
    escape(s, &[',', '=', ' '])
}

/// Escape `special` characters and control characters that would end the
/// line. A trailing backslash is doubled so it cannot escape the separator
/// that follows.
fn escape(s: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if special.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    if s.ends_with('\\') {
        out.push('\\');
    }
    out
}

fn format_field(value: FieldValue) -> Option<String> {
    match value {
        FieldValue::Int(v) => Some(format!("{v}i")),
        FieldValue::Float(v) if v.is_finite() => Some(format!("{v}")),
        FieldValue::Float(_) => None,
    }
}

/// Encode one point as a single line without a trailing newline
///
/// Returns `None` when the point has no writable fields or its timestamp
/// does not fit in nanoseconds.
pub fn encode_point(point: &MetricPoint) -> Option<String> {
    let fields: Vec<String> = point
        .fields
        .iter()
        .filter_map(|(k, v)| format_field(*v).map(|v| format!("{}={v}", escape_key(k))))
        .collect();
    if fields.is_empty() {
        return None;
    }
    let ts = point.timestamp.timestamp_nanos_opt()?;

    let mut line = escape_measurement(point.measurement.as_str());
    for (k, v) in point.tags.iter().filter(|(_, v)| !v.is_empty()) {
        let _ = write!(line, ",{}={}", escape_key(k), escape_key(v));
    }
    line.push(' ');
    line.push_str(&fields.join(","));
    let _ = write!(line, " {ts}");

    Some(line)
}

/// Encode a batch, one line per writable point
pub fn encode_batch(points: &[MetricPoint]) -> String {
    let mut body = String::new();
    for line in points.iter().filter_map(encode_point) {
        body.push_str(&line);
        body.push('\n');
    }
    body
}
