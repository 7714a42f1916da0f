//! Parser Module - Upload normalization
//!
//! Input: raw bytes + declared format (CSV / JSON / TXT / LOG)
//! Output: ordered `Vec<NormalizedRecord>`
//!
//! Empty input là hợp lệ (empty Vec). Malformed input → `ParseError`,
//! pipeline dừng trước khi chạy detector nào.

mod record;

#[cfg(test)]
mod tests;

pub use record::{normalize_key, FieldValue, NormalizedRecord};

use serde_json::{Map, Value};

use super::error::ParseError;

/// Keys of a pre-combined detector result, in flatten order
const COMBINED_KEYS: &[&str] = &["host_based", "behavior_based", "signature_based"];

/// Generic field for line-oriented input
pub const LINE_FIELD: &str = "item";

/// Placeholder classification for line-oriented input
pub const LINE_TYPE_FIELD: &str = "type";
pub const LINE_TYPE_UNKNOWN: &str = "unknown";

// ============================================================================
// FORMAT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Header row + data rows
    Csv,
    /// Single JSON document
    Json,
    /// One item per line (.txt, .log)
    Text,
}

impl InputFormat {
    /// Map a file extension (`"csv"`, `".LOG"`, ...) to a format.
    pub fn from_extension(ext: &str) -> Result<Self, ParseError> {
        let ext = ext.trim().trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            "txt" | "log" => Ok(InputFormat::Text),
            _ => Err(ParseError::UnsupportedFormat(ext)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Json => "json",
            InputFormat::Text => "text",
        }
    }
}

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Parse raw upload bytes
pub fn parse(bytes: &[u8], format: InputFormat) -> Result<Vec<NormalizedRecord>, ParseError> {
    let text = std::str::from_utf8(bytes)?;
    // Spreadsheet exports often start with a BOM
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let records = match format {
        InputFormat::Csv => parse_csv(text)?,
        InputFormat::Json => parse_json(text)?,
        InputFormat::Text => parse_text(text),
    };

    log::debug!("Parsed {} {} records", records.len(), format.as_str());
    Ok(records)
}

// ============================================================================
// CSV
// ============================================================================

fn parse_csv(text: &str) -> Result<Vec<NormalizedRecord>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_key)
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = NormalizedRecord::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            if let Some(value) = FieldValue::from_cell(cell) {
                record.insert(header, value);
            }
        }
        records.push(record);
    }

    Ok(records)
}

// ============================================================================
// JSON
// ============================================================================

fn parse_json(text: &str) -> Result<Vec<NormalizedRecord>, ParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: Value = serde_json::from_str(text)?;

    match document {
        Value::Object(map) if is_combined_result(&map) => Ok(flatten_combined(map)),
        Value::Object(map) => Ok(vec![record_from_object(map)]),
        Value::Array(items) => Ok(items.into_iter().filter_map(record_from_value).collect()),
        other => Err(ParseError::UnexpectedShape(format!(
            "expected object or array, got {}",
            json_kind(&other)
        ))),
    }
}

/// An object made only of detector-outcome keys is a previously combined result.
fn is_combined_result(map: &Map<String, Value>) -> bool {
    !map.is_empty() && map.keys().all(|k| COMBINED_KEYS.contains(&k.as_str()))
}

fn flatten_combined(mut map: Map<String, Value>) -> Vec<NormalizedRecord> {
    let mut records = Vec::new();
    for key in COMBINED_KEYS {
        match map.remove(*key) {
            Some(Value::Array(items)) => records.extend(items.into_iter().filter_map(record_from_value)),
            Some(value) => records.extend(record_from_value(value)),
            None => {}
        }
    }
    records
}

fn record_from_value(value: Value) -> Option<NormalizedRecord> {
    match value {
        Value::Null => None,
        Value::Object(map) => Some(record_from_object(map)),
        scalar => Some(line_record(&scalar_text(&scalar))),
    }
}

fn record_from_object(map: Map<String, Value>) -> NormalizedRecord {
    let mut record = NormalizedRecord::new();
    for (key, value) in map {
        if let Some(field) = field_from_json(value) {
            record.insert(&key, field);
        }
    }
    record
}

fn field_from_json(value: Value) -> Option<FieldValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(FieldValue::Bool(b)),
        Value::Number(n) => n.as_f64().map(FieldValue::Number),
        Value::String(s) => Some(FieldValue::Text(s)),
        // Nested values are kept as their JSON text
        nested => Some(FieldValue::Text(nested.to_string())),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// TEXT / LOG
// ============================================================================

fn parse_text(text: &str) -> Vec<NormalizedRecord> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(line_record)
        .collect()
}

fn line_record(line: &str) -> NormalizedRecord {
    NormalizedRecord::new()
        .with(LINE_FIELD, line)
        .with(LINE_TYPE_FIELD, LINE_TYPE_UNKNOWN)
}
