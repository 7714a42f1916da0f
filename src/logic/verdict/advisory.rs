//! Advisory Collaborator
//!
//! Contract: `advise(CombinedOutcome) -> {verdict, risk_level, explanation, recommendations}`
//!
//! - `HttpAdvisor` - remote service (JSON over HTTP)
//! - `OfflineAdvisor` - local deterministic bundle, no network
//!
//! Core phải chạy đúng khi không có advisory service.

use std::time::Duration;

use serde_json::json;

use crate::logic::config::AdvisoryConfig;
use crate::logic::error::AdvisoryError;
use crate::logic::outcome::CombinedOutcome;

use super::scoring::{band, risk_score};
use super::types::{AdvisoryOpinion, OpinionSource, Verdict};

pub trait Advisor: Send + Sync {
    fn advise(&self, combined: &CombinedOutcome) -> Result<AdvisoryOpinion, AdvisoryError>;
}

// ============================================================================
// LOCAL FALLBACK
// ============================================================================

const INFECTED_ACTIONS: &[&str] = &[
    "Immediately isolate the affected system from the network",
    "Run a full antivirus and anti-malware scan",
    "Check all detected IPs/domains and block them at firewall level",
    "Review and terminate suspicious processes identified",
    "Consider forensic analysis to determine infection vector",
];

const SUSPICIOUS_ACTIONS: &[&str] = &[
    "Monitor the flagged processes closely for 24-48 hours",
    "Review process executable locations and signatures",
    "Check network traffic logs for unusual patterns",
    "Update all security software and run deep scans",
];

const CLEAN_ACTIONS: &[&str] = &[
    "Continue regular monitoring and scheduled scans",
    "Keep signature databases updated",
    "Maintain security best practices",
    "Review logs periodically for emerging threats",
];

/// Recommended actions for a verdict tier
pub fn recommendations_for(verdict: Verdict) -> Vec<String> {
    let actions = match verdict {
        Verdict::Infected => INFECTED_ACTIONS,
        Verdict::Suspicious => SUSPICIOUS_ACTIONS,
        Verdict::Clean => CLEAN_ACTIONS,
    };
    actions.iter().map(|s| s.to_string()).collect()
}

/// Explanation text for a verdict tier, filled from the three outcomes
pub fn explanation_for(verdict: Verdict, combined: &CombinedOutcome) -> String {
    let threats = combined.signature_based.threat_count;
    let processes = combined.host_based.suspicious_count;
    let behavior = &combined.behavior_based;

    match verdict {
        Verdict::Infected => format!(
            "System shows strong indicators of botnet infection. {} known malicious signatures detected, \
             {} processes show anomalous resource usage and behavior analysis predicts {} traffic \
             ({}% confidence).",
            threats,
            processes,
            behavior.prediction.as_str(),
            behavior.confidence
        ),
        Verdict::Suspicious => format!(
            "System exhibits suspicious behavior patterns. {} known malicious signatures matched, \
             {} processes show anomalous resource usage and network traffic patterns show {}% \
             confidence of botnet activity.",
            threats, processes, behavior.confidence
        ),
        Verdict::Clean => "No significant threats detected across all three detection methods. \
                           System appears to be operating normally with no indicators of botnet infection."
            .to_string(),
    }
}

/// Deterministic opinion built only from the three detector outcomes
pub fn local_opinion(combined: &CombinedOutcome) -> AdvisoryOpinion {
    let (verdict, risk_level) = band(risk_score(combined));
    AdvisoryOpinion {
        verdict,
        risk_level,
        explanation: explanation_for(verdict, combined),
        recommendations: recommendations_for(verdict),
        source: OpinionSource::RuleBased,
    }
}

// ============================================================================
// OFFLINE
// ============================================================================

/// No-network advisor; reproduces the local fallback bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAdvisor;

impl Advisor for OfflineAdvisor {
    fn advise(&self, combined: &CombinedOutcome) -> Result<AdvisoryOpinion, AdvisoryError> {
        Ok(local_opinion(combined))
    }
}

// ============================================================================
// HTTP
// ============================================================================

pub struct HttpAdvisor {
    url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpAdvisor {
    pub fn new(config: &AdvisoryConfig) -> Self {
        Self {
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        }
    }

    fn request_body(combined: &CombinedOutcome) -> serde_json::Value {
        json!({
            "signature_based": combined.signature_based,
            "host_based": combined.host_based,
            "behavior_based": combined.behavior_based,
            "expected_keys": ["verdict", "risk_level", "explanation", "recommendations"],
        })
    }
}

impl Advisor for HttpAdvisor {
    fn advise(&self, combined: &CombinedOutcome) -> Result<AdvisoryOpinion, AdvisoryError> {
        if self.url.is_empty() {
            return Err(AdvisoryError::NotConfigured);
        }

        let mut request = ureq::post(&self.url)
            .timeout(self.timeout)
            .set("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            request = request.set("Authorization", &format!("Bearer {}", key));
        }

        let body = Self::request_body(combined).to_string();
        let response = request
            .send_string(&body)
            .map_err(|e| AdvisoryError::Network(e.to_string()))?;

        let content = response
            .into_string()
            .map_err(|e| AdvisoryError::Network(e.to_string()))?;

        parse_opinion(&content)
    }
}

/// Parse the service reply; the opinion may be wrapped in a markdown code fence.
fn parse_opinion(content: &str) -> Result<AdvisoryOpinion, AdvisoryError> {
    let trimmed = content.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed);

    let mut opinion: AdvisoryOpinion = serde_json::from_str(unfenced.trim())
        .map_err(|e| AdvisoryError::InvalidResponse(e.to_string()))?;

    if opinion.explanation.trim().is_empty() || opinion.recommendations.is_empty() {
        return Err(AdvisoryError::InvalidResponse("incomplete opinion".to_string()));
    }
    opinion.source = OpinionSource::Advisory;
    Ok(opinion)
}
