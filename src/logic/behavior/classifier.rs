//! Behavior Classifier
//!
//! Mode được chọn lúc construction:
//! - `ModelBacked(artifact)` - FeatureVector → artifact → prediction
//! - `RuleBased` - heuristics trong `fallback.rs`
//!
//! Model path lỗi (vector rỗng, extraction, inference) → fallback cho call đó,
//! mode không đổi.

use std::path::Path;
use std::sync::Arc;

use super::fallback::{self, round2};
use super::inference::{ClassifierArtifact, OnnxArtifact};
use super::layout::FEATURE_COUNT;
use super::vector::FeatureVector;
use crate::logic::config::BehaviorThresholds;
use crate::logic::error::InferenceError;
use crate::logic::outcome::{BehaviorMethod, BehaviorOutcome, BehaviorPrediction};
use crate::logic::parser::NormalizedRecord;
use crate::logic::Detector;

#[derive(Clone)]
pub enum ClassifierMode {
    ModelBacked(Arc<dyn ClassifierArtifact>),
    RuleBased,
}

impl std::fmt::Debug for ClassifierMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierMode::ModelBacked(artifact) => write!(f, "ModelBacked({})", artifact.name()),
            ClassifierMode::RuleBased => write!(f, "RuleBased"),
        }
    }
}

pub struct BehaviorClassifier {
    mode: ClassifierMode,
    thresholds: BehaviorThresholds,
}

impl BehaviorClassifier {
    pub fn new(mode: ClassifierMode, thresholds: BehaviorThresholds) -> Self {
        Self { mode, thresholds }
    }

    pub fn rule_based(thresholds: BehaviorThresholds) -> Self {
        Self::new(ClassifierMode::RuleBased, thresholds)
    }

    pub fn with_artifact(artifact: Arc<dyn ClassifierArtifact>, thresholds: BehaviorThresholds) -> Self {
        Self::new(ClassifierMode::ModelBacked(artifact), thresholds)
    }

    /// Try the ONNX artifact at `model_path`; any load problem → RuleBased.
    pub fn load(model_path: &Path, expected_sha256: Option<&str>, thresholds: BehaviorThresholds) -> Self {
        if !model_path.exists() {
            log::warn!(
                "Model file {} not found. Using rule-based detection.",
                model_path.display()
            );
            return Self::rule_based(thresholds);
        }

        match OnnxArtifact::load(model_path, expected_sha256) {
            Ok(artifact) => Self::with_artifact(Arc::new(artifact), thresholds),
            Err(e) => {
                log::warn!("Error loading model: {}. Using rule-based detection.", e);
                Self::rule_based(thresholds)
            }
        }
    }

    pub fn mode(&self) -> &ClassifierMode {
        &self.mode
    }

    pub fn is_model_backed(&self) -> bool {
        matches!(self.mode, ClassifierMode::ModelBacked(_))
    }

    fn predict_with_model(
        &self,
        artifact: &dyn ClassifierArtifact,
        records: &[NormalizedRecord],
    ) -> Result<BehaviorOutcome, InferenceError> {
        let features = FeatureVector::from_records(records)?
            .ok_or_else(|| InferenceError("No records to extract features from".to_string()))?;

        let prediction = artifact.predict(&features)?;
        let confidence = round2(f64::from(prediction.predicted_probability()) * 100.0);
        let verdict = if prediction.is_botnet {
            BehaviorPrediction::Botnet
        } else {
            BehaviorPrediction::Clean
        };

        Ok(BehaviorOutcome {
            prediction: verdict,
            confidence,
            method: BehaviorMethod::Model,
            status: verdict.status(),
            anomalies: Vec::new(),
            anomaly_count: 0,
            message: format!(
                "ML model predicts {} traffic with {}% confidence",
                verdict.as_str(),
                confidence
            ),
            model: Some(artifact.name().to_string()),
            features_used: Some(FEATURE_COUNT),
        })
    }
}

impl Detector for BehaviorClassifier {
    type Outcome = BehaviorOutcome;

    fn detect(&self, records: &[NormalizedRecord]) -> BehaviorOutcome {
        match &self.mode {
            ClassifierMode::ModelBacked(artifact) => {
                match self.predict_with_model(artifact.as_ref(), records) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        log::warn!("ML detection error: {}. Falling back to rules.", e);
                        fallback::detect(records, &self.thresholds)
                    }
                }
            }
            ClassifierMode::RuleBased => fallback::detect(records, &self.thresholds),
        }
    }
}
