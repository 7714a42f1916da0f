//! Verdict Types
//!
//! KHÔNG chứa logic - chỉ data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Final scan verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Infected,
    Suspicious,
    Clean,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Infected => "INFECTED",
            Verdict::Suspicious => "SUSPICIOUS",
            Verdict::Clean => "CLEAN",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
        };
        write!(f, "{}", s)
    }
}

/// Where an opinion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpinionSource {
    /// Local deterministic fallback
    RuleBased,
    /// Remote advisory service
    Advisory,
}

/// Advisory collaborator output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryOpinion {
    pub verdict: Verdict,
    pub risk_level: RiskLevel,
    pub explanation: String,
    pub recommendations: Vec<String>,
    #[serde(default = "default_source")]
    pub source: OpinionSource,
}

fn default_source() -> OpinionSource {
    OpinionSource::Advisory
}

/// Synthesizer output. Always complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictBundle {
    /// 0 - 100
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub verdict: Verdict,
    pub explanation: String,
    pub recommendations: Vec<String>,
}
