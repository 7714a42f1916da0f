//! Rule-based flow heuristics
//!
//! Dùng khi không có model, vector rỗng, hoặc inference lỗi.
//! Ba heuristics độc lập per record: packet count, byte volume, short flow.

use crate::logic::config::BehaviorThresholds;
use crate::logic::outcome::{BehaviorMethod, BehaviorOutcome, BehaviorPrediction, FlowAnomaly};
use crate::logic::parser::NormalizedRecord;

const PACKET_ALIASES: &[&str] = &["packets", "total_fwd_packets"];
const BYTE_ALIASES: &[&str] = &["bytes", "flow_bytes_s"];
const DURATION_ALIASES: &[&str] = &["flow_duration", "duration"];

/// confidence > 50 → BOTNET
const BOTNET_MIN_CONFIDENCE: f64 = 50.0;
/// confidence >= 20 → SUSPICIOUS
const SUSPICIOUS_MIN_CONFIDENCE: f64 = 20.0;

/// Typed view of one flow
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSample {
    pub src: String,
    pub dst: String,
    pub packets: f64,
    pub bytes: f64,
    /// None = unknown duration, never treated as short
    pub duration: Option<f64>,
}

impl FlowSample {
    pub fn from_record(record: &NormalizedRecord) -> Self {
        Self {
            src: record.text_of(&["src_ip"]).unwrap_or_else(|| "unknown".to_string()),
            dst: record.text_of(&["dst_ip"]).unwrap_or_else(|| "unknown".to_string()),
            packets: record.number_of(PACKET_ALIASES).unwrap_or(0.0),
            bytes: record.number_of(BYTE_ALIASES).unwrap_or(0.0),
            duration: record.number_of(DURATION_ALIASES),
        }
    }

    fn flags(&self, thresholds: &BehaviorThresholds) -> Vec<String> {
        let mut flags = Vec::new();

        if self.packets > thresholds.packets {
            flags.push(format!("High packet count: {}", self.packets));
        }
        if self.bytes > thresholds.bytes {
            flags.push(format!("Large data transfer: {} bytes", self.bytes));
        }
        // Very short flow → possible C&C beacon
        if let Some(duration) = self.duration {
            if duration < thresholds.min_flow_duration {
                flags.push(format!("Short flow: {}s", duration));
            }
        }

        flags
    }
}

/// Map a 0-100 anomaly confidence to a prediction tier
pub fn prediction_for(confidence: f64) -> BehaviorPrediction {
    if confidence > BOTNET_MIN_CONFIDENCE {
        BehaviorPrediction::Botnet
    } else if confidence >= SUSPICIOUS_MIN_CONFIDENCE {
        BehaviorPrediction::Suspicious
    } else {
        BehaviorPrediction::Clean
    }
}

/// Fallback heuristic detection
pub fn detect(records: &[NormalizedRecord], thresholds: &BehaviorThresholds) -> BehaviorOutcome {
    let anomalies: Vec<FlowAnomaly> = records
        .iter()
        .map(FlowSample::from_record)
        .filter_map(|flow| {
            let flags = flow.flags(thresholds);
            if flags.is_empty() {
                None
            } else {
                Some(FlowAnomaly {
                    flow: format!("{} -> {}", flow.src, flow.dst),
                    flags,
                })
            }
        })
        .collect();

    let confidence = if records.is_empty() {
        0.0
    } else {
        round2((anomalies.len() as f64 * 100.0 / records.len() as f64).min(100.0))
    };

    let prediction = prediction_for(confidence);
    let anomaly_count = anomalies.len();

    BehaviorOutcome {
        prediction,
        confidence,
        method: BehaviorMethod::RuleBased,
        status: prediction.status(),
        anomalies,
        anomaly_count,
        message: format!(
            "Rule-based analysis flagged {} of {} flows ({}% anomalous)",
            anomaly_count,
            records.len(),
            confidence
        ),
        model: None,
        features_used: None,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
