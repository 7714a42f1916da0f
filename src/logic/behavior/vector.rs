//! Feature Vector - Model input
//!
//! One vector per scan: column-wise mean of every layout feature over all
//! records. Missing column → 0.

use serde::{Deserialize, Serialize};

use super::layout::{layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
use crate::logic::error::InferenceError;
use crate::logic::parser::NormalizedRecord;

/// Versioned feature vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub version: u8,
    pub layout_hash: u32,
    /// Values in FEATURE_LAYOUT order
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::from_values([0.0; FEATURE_COUNT])
    }

    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Aggregate a scan's records.
    ///
    /// Returns `Ok(None)` for zero records. A column that is present but holds
    /// a non-numeric value fails the extraction.
    pub fn from_records(records: &[NormalizedRecord]) -> Result<Option<Self>, InferenceError> {
        if records.is_empty() {
            return Ok(None);
        }

        let mut values = [0.0f32; FEATURE_COUNT];

        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            let mut sum = 0.0f64;
            let mut count = 0usize;

            for record in records {
                let Some(value) = record.get(name) else { continue };
                // Non-finite values are rejected by as_f64 too
                let number = value.as_f64().ok_or_else(|| {
                    InferenceError(format!("Non-numeric value '{}' in column {}", value, name))
                })?;
                sum += number;
                count += 1;
            }

            if count > 0 {
                values[i] = (sum / count as f64) as f32;
            }
        }

        Ok(Some(Self::from_values(values)))
    }

    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        super::layout::feature_index(name).map(|i| self.values[i])
    }

    /// Compatible with the layout this build was compiled with
    pub fn is_compatible(&self) -> bool {
        self.version == FEATURE_VERSION && self.layout_hash == layout_hash()
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}
