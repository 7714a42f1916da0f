//! Risk Scoring
//!
//! CORE LOGIC - Deterministic and Explainable
//!
//! score = signature + host + behavior, capped at 100
//! - signature: DETECTED → 40 + 10/threat (max 80)
//! - host: 10/suspicious process (max 30)
//! - behavior: confidence × 0.3 unless prediction is CLEAN

use crate::logic::outcome::{BehaviorPrediction, CombinedOutcome, DetectionStatus};

use super::types::{RiskLevel, Verdict};

// ============================================================================
// WEIGHTS
// ============================================================================

pub const SIGNATURE_BASE: f64 = 40.0;
pub const SIGNATURE_PER_THREAT: f64 = 10.0;
pub const SIGNATURE_MAX: f64 = 80.0;

pub const HOST_PER_PROCESS: f64 = 10.0;
pub const HOST_MAX: f64 = 30.0;

/// Applied to a 0-100 confidence
pub const BEHAVIOR_WEIGHT: f64 = 0.3;

pub const MAX_SCORE: u32 = 100;

// ============================================================================
// BANDS
// ============================================================================

pub const CRITICAL_MIN: u32 = 75;
pub const HIGH_MIN: u32 = 50;
pub const MEDIUM_MIN: u32 = 25;

/// Per-detector contributions, before rounding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub signature: f64,
    pub host: f64,
    pub behavior: f64,
}

impl ScoreBreakdown {
    pub fn of(combined: &CombinedOutcome) -> Self {
        let sig = &combined.signature_based;
        let signature = if sig.status == DetectionStatus::Detected {
            (SIGNATURE_BASE + SIGNATURE_PER_THREAT * sig.threat_count as f64).min(SIGNATURE_MAX)
        } else {
            0.0
        };

        let host = (HOST_PER_PROCESS * combined.host_based.suspicious_count as f64).min(HOST_MAX);

        let behavior_outcome = &combined.behavior_based;
        let behavior = if behavior_outcome.prediction == BehaviorPrediction::Clean {
            0.0
        } else {
            behavior_outcome.confidence.clamp(0.0, 100.0) * BEHAVIOR_WEIGHT
        };

        Self { signature, host, behavior }
    }

    pub fn total(&self) -> u32 {
        let sum = self.signature + self.host + self.behavior;
        (sum.round().clamp(0.0, MAX_SCORE as f64)) as u32
    }
}

/// Weighted risk score in [0, 100]
pub fn risk_score(combined: &CombinedOutcome) -> u32 {
    ScoreBreakdown::of(combined).total()
}

/// Fixed, non-overlapping bands
pub fn band(score: u32) -> (Verdict, RiskLevel) {
    match score.min(MAX_SCORE) {
        s if s >= CRITICAL_MIN => (Verdict::Infected, RiskLevel::Critical),
        s if s >= HIGH_MIN => (Verdict::Suspicious, RiskLevel::High),
        s if s >= MEDIUM_MIN => (Verdict::Suspicious, RiskLevel::Medium),
        _ => (Verdict::Clean, RiskLevel::Low),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(band(0), (Verdict::Clean, RiskLevel::Low));
        assert_eq!(band(24), (Verdict::Clean, RiskLevel::Low));
        assert_eq!(band(25), (Verdict::Suspicious, RiskLevel::Medium));
        assert_eq!(band(49), (Verdict::Suspicious, RiskLevel::Medium));
        assert_eq!(band(50), (Verdict::Suspicious, RiskLevel::High));
        assert_eq!(band(74), (Verdict::Suspicious, RiskLevel::High));
        assert_eq!(band(75), (Verdict::Infected, RiskLevel::Critical));
        assert_eq!(band(100), (Verdict::Infected, RiskLevel::Critical));
    }

    #[test]
    fn test_every_score_maps_to_one_band() {
        for score in 0..=MAX_SCORE {
            let (verdict, level) = band(score);
            let expected = match level {
                RiskLevel::Critical => Verdict::Infected,
                RiskLevel::High | RiskLevel::Medium => Verdict::Suspicious,
                RiskLevel::Low => Verdict::Clean,
            };
            assert_eq!(verdict, expected, "score {}", score);
        }
    }
}
