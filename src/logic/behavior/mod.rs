//! Behavior Module - Flow classification
//!
//! - `layout.rs` / `vector.rs` - Model input schema + aggregation
//! - `inference.rs` - Artifact trait + ONNX implementation
//! - `fallback.rs` - Rule-based heuristics
//! - `classifier.rs` - Mode selection + per-call fallback

pub mod classifier;
pub mod fallback;
pub mod inference;
pub mod layout;
pub mod vector;


pub use classifier::{BehaviorClassifier, ClassifierMode};
pub use inference::{ArtifactPrediction, ClassifierArtifact, OnnxArtifact};
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT};
pub use vector::FeatureVector;
