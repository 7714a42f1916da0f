//! Normalized Record
//!
//! Schema-less key/value map ở boundary. Detectors không đọc trực tiếp map này
//! mà convert sang typed view riêng (HostSample, FlowSample, ...).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One scalar cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view. Text is parsed leniently; bools count as 0/1.
    /// `inf`, `NaN` and overflowing values count as absent.
    pub fn as_f64(&self) -> Option<f64> {
        let n = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
            FieldValue::Bool(b) => if *b { 1.0 } else { 0.0 },
        };
        n.is_finite().then_some(n)
    }

    /// Build from a CSV cell. Cells are untyped, so the text is kept as
    /// written (`007`, `1e3`); `as_f64` gives the numeric view.
    pub fn from_cell(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if cell.is_empty() {
            return None;
        }
        Some(FieldValue::Text(cell.to_string()))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Bool(b) => write!(f, "{}", b),
            // 42.0 → "42" (ports, pids, counts)
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// One flow, one process sample or one raw line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert with key normalization (trim, lowercase, spaces → `_`).
    pub fn insert(&mut self, key: &str, value: FieldValue) {
        self.fields.insert(normalize_key(key), value);
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// First alias present in the record
    pub fn first_of(&self, aliases: &[&str]) -> Option<&FieldValue> {
        aliases.iter().find_map(|alias| self.fields.get(*alias))
    }

    /// Numeric value of the first present alias. Unparsable counts as absent.
    pub fn number_of(&self, aliases: &[&str]) -> Option<f64> {
        self.first_of(aliases).and_then(FieldValue::as_f64)
    }

    /// Text value of the first present alias
    pub fn text_of(&self, aliases: &[&str]) -> Option<String> {
        self.first_of(aliases).map(|v| v.to_string())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }
}

/// Header normalization: `"Src IP"` → `"src_ip"`
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}
