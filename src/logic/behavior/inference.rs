//! Inference Engine - ONNX Runtime Integration
//!
//! Load và chạy flow classifier (binary: 0 = clean, 1 = botnet).
//! Tách khỏi classifier để dễ swap artifact (hoặc stub trong tests).

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use super::layout::FEATURE_COUNT;
use super::vector::FeatureVector;
use crate::logic::error::InferenceError;

// ============================================================================
// ARTIFACT TRAIT
// ============================================================================

/// Raw artifact output for one feature vector
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPrediction {
    pub is_botnet: bool,
    /// [P(clean), P(botnet)]
    pub probabilities: [f32; 2],
}

impl ArtifactPrediction {
    /// Probability of the predicted class
    pub fn predicted_probability(&self) -> f32 {
        if self.is_botnet {
            self.probabilities[1]
        } else {
            self.probabilities[0]
        }
    }
}

/// Trait cho trained classifiers (ONNX, stubs, ...)
pub trait ClassifierArtifact: Send + Sync {
    fn name(&self) -> &str;
    fn predict(&self, features: &FeatureVector) -> Result<ArtifactPrediction, InferenceError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxArtifact {
    /// `run` needs exclusive access to the session
    session: Mutex<Session>,
    model_path: PathBuf,
    /// Class label output (int64), when the export has one
    label_output: Option<String>,
    /// Class probability output (float)
    probability_output: String,
}

impl OnnxArtifact {
    /// Load ONNX model từ file, optionally pinned to a SHA-256 digest
    pub fn load(model_path: &Path, expected_sha256: Option<&str>) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(InferenceError(format!("Model not found: {}", model_path.display())));
        }

        if let Some(expected) = expected_sha256 {
            verify_checksum(model_path, expected)?;
        }

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        // sklearn/xgboost exports: [label, probabilities]; single-output models
        // only carry probabilities.
        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let probability_output = output_names
            .last()
            .cloned()
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;
        let label_output = if output_names.len() > 1 {
            output_names.first().cloned()
        } else {
            None
        };

        log::info!("ONNX model loaded successfully (outputs: {:?})", output_names);

        Ok(Self {
            session: Mutex::new(session),
            model_path: model_path.to_path_buf(),
            label_output,
            probability_output,
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl ClassifierArtifact for OnnxArtifact {
    fn name(&self) -> &str {
        self.model_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx")
    }

    fn predict(&self, features: &FeatureVector) -> Result<ArtifactPrediction, InferenceError> {
        if !features.is_compatible() {
            return Err(InferenceError("Feature layout mismatch".to_string()));
        }

        let input_array = Array2::<f32>::from_shape_vec(
            (1, FEATURE_COUNT),
            features.as_array().to_vec(),
        ).map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let probabilities: Vec<f32> = {
            let output = outputs.get(&self.probability_output)
                .ok_or_else(|| InferenceError("No probability output".to_string()))?;
            let tensor = output.try_extract_tensor::<f32>()
                .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;
            tensor.1.to_vec()
        };

        let label: Option<i64> = self.label_output.as_ref()
            .and_then(|name| outputs.get(name))
            .and_then(|output| output.try_extract_tensor::<i64>().ok())
            .and_then(|tensor| tensor.1.first().copied());

        to_prediction(&probabilities, label)
    }
}

/// Normalize raw model output into a binary prediction
fn to_prediction(probabilities: &[f32], label: Option<i64>) -> Result<ArtifactPrediction, InferenceError> {
    let probabilities = match probabilities {
        [p_clean, p_botnet, ..] => [*p_clean, *p_botnet],
        // Single sigmoid output = P(botnet)
        [p_botnet] => [1.0 - *p_botnet, *p_botnet],
        [] => return Err(InferenceError("Empty probability output".to_string())),
    };

    if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0 || *p > 1.0) {
        return Err(InferenceError(format!("Invalid probabilities: {:?}", probabilities)));
    }

    let is_botnet = match label {
        Some(label) => label == 1,
        None => probabilities[1] > probabilities[0],
    };

    Ok(ArtifactPrediction { is_botnet, probabilities })
}

/// Xác minh checksum của model
pub fn verify_checksum(path: &Path, expected_hex: &str) -> Result<(), InferenceError> {
    let bytes = fs::read(path)
        .map_err(|e| InferenceError(format!("Failed to read model: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let actual = hex::encode(hasher.finalize());

    if actual.eq_ignore_ascii_case(expected_hex.trim()) {
        Ok(())
    } else {
        Err(InferenceError(format!(
            "Model checksum mismatch: expected {}, got {}",
            expected_hex, actual
        )))
    }
}
