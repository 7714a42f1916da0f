//! Detection Outcome Types
//!
//! Kết quả của từng detector + combined outcome.
//! KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

use super::verdict::AdvisoryOpinion;

// ============================================================================
// SHARED ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionStatus {
    Clean,
    Detected,
    Suspicious,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Medium,
    High,
}

// ============================================================================
// SIGNATURE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatKind {
    MaliciousIp,
    MaliciousDomain,
}

/// Known-indicator hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureFinding {
    #[serde(rename = "type")]
    pub kind: ThreatKind,
    /// Case-folded matched value
    pub value: String,
    /// Record field the value came from
    pub field: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureOutcome {
    pub threats: Vec<SignatureFinding>,
    pub threat_count: usize,
    pub status: DetectionStatus,
    pub message: String,
}

// ============================================================================
// HOST
// ============================================================================

/// Process / host sample with at least one exceeded threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostFinding {
    pub process_name: String,
    pub pid: String,
    pub cpu: f64,
    pub memory: f64,
    pub connections: f64,
    pub flags: Vec<String>,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostOutcome {
    pub suspicious_processes: Vec<HostFinding>,
    pub suspicious_count: usize,
    pub status: DetectionStatus,
    pub message: String,
}

// ============================================================================
// BEHAVIOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BehaviorPrediction {
    Botnet,
    Suspicious,
    Clean,
}

impl BehaviorPrediction {
    pub fn status(&self) -> DetectionStatus {
        match self {
            BehaviorPrediction::Botnet => DetectionStatus::Detected,
            BehaviorPrediction::Suspicious => DetectionStatus::Suspicious,
            BehaviorPrediction::Clean => DetectionStatus::Clean,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorPrediction::Botnet => "BOTNET",
            BehaviorPrediction::Suspicious => "SUSPICIOUS",
            BehaviorPrediction::Clean => "CLEAN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorMethod {
    Model,
    RuleBased,
}

/// Flow flagged by the rule-based heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowAnomaly {
    /// `"src -> dst"`
    pub flow: String,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorOutcome {
    pub prediction: BehaviorPrediction,
    /// 0 - 100
    pub confidence: f64,
    pub method: BehaviorMethod,
    pub status: DetectionStatus,
    pub anomalies: Vec<FlowAnomaly>,
    pub anomaly_count: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features_used: Option<usize>,
}

// ============================================================================
// COMBINED
// ============================================================================

/// The three detector outcomes plus the advisory opinion, if one was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedOutcome {
    pub signature_based: SignatureOutcome,
    pub host_based: HostOutcome,
    pub behavior_based: BehaviorOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<AdvisoryOpinion>,
}

impl CombinedOutcome {
    pub fn new(signature: SignatureOutcome, host: HostOutcome, behavior: BehaviorOutcome) -> Self {
        Self {
            signature_based: signature,
            host_based: host,
            behavior_based: behavior,
            advisory: None,
        }
    }

    pub fn with_advisory(mut self, opinion: AdvisoryOpinion) -> Self {
        self.advisory = Some(opinion);
        self
    }
}
