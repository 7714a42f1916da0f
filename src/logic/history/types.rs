//! History Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::outcome::CombinedOutcome;
use crate::logic::verdict::{RiskLevel, Verdict, VerdictBundle};

/// One completed scan. Serialized flat: the detector outcomes sit next to the
/// verdict fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub scan_id: String,
    pub timestamp: DateTime<Utc>,
    pub filename: String,
    pub file_size: u64,
    pub file_type: String,
    pub verdict: Verdict,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    #[serde(flatten)]
    pub results: CombinedOutcome,
    pub explanation: String,
    pub recommendations: Vec<String>,
}

impl ScanRecord {
    /// New record with a fresh scan id, stamped now
    pub fn new(
        filename: impl Into<String>,
        file_size: u64,
        file_type: impl Into<String>,
        results: CombinedOutcome,
        bundle: VerdictBundle,
    ) -> Self {
        Self {
            scan_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            filename: filename.into(),
            file_size,
            file_type: file_type.into(),
            verdict: bundle.verdict,
            risk_level: bundle.risk_level,
            risk_score: bundle.risk_score,
            results,
            explanation: bundle.explanation,
            recommendations: bundle.recommendations,
        }
    }
}

/// Verdict counts over the whole history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total: usize,
    pub infected: usize,
    pub clean: usize,
    pub suspicious: usize,
}

impl ScanStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ScanRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            match record.verdict {
                Verdict::Infected => stats.infected += 1,
                Verdict::Suspicious => stats.suspicious += 1,
                Verdict::Clean => stats.clean += 1,
            }
            stats
        })
    }
}
