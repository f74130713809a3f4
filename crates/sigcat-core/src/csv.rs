//! Row-oriented text codec for catalogue and join artifacts.
//!
//! The format is deliberately simple and slightly unusual: a plain header row
//! (field names in first-record insertion order), then one `\r\n`-terminated
//! row per record with every value wrapped in double quotes. Embedded commas
//! are backslash-escaped (`\,`) and embedded double quotes are tripled
//! (`"""`). The decoder reverses both escapes so that
//! `decode(encode(rows)) == rows` holds exactly.

use crate::{Error, Result};
use serde_json::{Map, Value};

/// Encodes ordered JSON objects as delimited text.
///
/// The header comes from the first object's keys; every object is encoded in
/// that key order. An empty input encodes to an empty string.
pub fn encode(rows: &[Map<String, Value>]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut out = String::new();
    for (i, header) in headers.iter().enumerate() {
        out.push_str(header);
        if i < headers.len() - 1 {
            out.push(',');
        }
    }
    out.push_str("\r\n");

    for row in rows {
        for (i, header) in headers.iter().enumerate() {
            let value = row.get(*header).map(value_text).unwrap_or_default();
            out.push('"');
            out.push_str(&escape(&value));
            out.push('"');
            if i < headers.len() - 1 {
                out.push(',');
            }
        }
        out.push_str("\r\n");
    }
    out
}

/// Decodes delimited text back into ordered JSON objects.
///
/// The first row is the header; subsequent non-empty rows must be wrapped in
/// double quotes with `","` as the field separator. Rows with fewer fields
/// than the header are padded with empty strings.
pub fn decode(csv: &str) -> Result<Vec<Map<String, Value>>> {
    let mut lines = csv.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    let Some(header_line) = lines.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<&str> = header_line.split(',').collect();

    let mut out = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let inner = line
            .strip_prefix('"')
            .and_then(|l| l.strip_suffix('"'))
            .ok_or_else(|| Error::Csv(format!("row is not quote-wrapped: {line}")))?;
        let fields: Vec<String> = inner.split("\",\"").map(unescape).collect();

        let mut row = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let value = fields.get(i).cloned().unwrap_or_default();
            row.insert((*header).to_string(), Value::String(value));
        }
        out.push(row);
    }
    Ok(out)
}

fn escape(value: &str) -> String {
    value.replace(',', "\\,").replace('"', "\"\"\"")
}

fn unescape(field: &str) -> String {
    field.replace("\"\"\"", "\"").replace("\\,", ",")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Serializes any JSON-array-shaped value into delimited text.
pub fn encode_value(value: &Value) -> Result<String> {
    let rows = value
        .as_array()
        .ok_or_else(|| Error::Csv("expected a JSON array of objects".to_string()))?;
    let maps: Vec<Map<String, Value>> = rows
        .iter()
        .map(|v| {
            v.as_object()
                .cloned()
                .ok_or_else(|| Error::Csv("expected a JSON object row".to_string()))
        })
        .collect::<Result<_>>()?;
    Ok(encode(&maps))
}
