//! Verdict Synthesizer
//!
//! Input: CombinedOutcome (3 detectors + optional advisory opinion)
//! Output: VerdictBundle
//!
//! Score, verdict và risk level chỉ phụ thuộc vào 3 detector outcomes.
//! Advisory opinion chỉ cung cấp text khi verdict của nó khớp với band.

use crate::logic::outcome::CombinedOutcome;

use super::advisory::{explanation_for, local_opinion, recommendations_for, Advisor, OfflineAdvisor};
use super::scoring::{band, risk_score};
use super::types::{AdvisoryOpinion, VerdictBundle};

pub struct VerdictSynthesizer {
    advisor: Box<dyn Advisor>,
}

impl VerdictSynthesizer {
    pub fn new(advisor: Box<dyn Advisor>) -> Self {
        Self { advisor }
    }

    /// Synthesizer without any remote collaborator
    pub fn offline() -> Self {
        Self::new(Box::new(OfflineAdvisor))
    }

    /// Ask the advisor; any failure resolves to the local opinion.
    pub fn consult(&self, combined: &CombinedOutcome) -> AdvisoryOpinion {
        match self.advisor.advise(combined) {
            Ok(opinion) => opinion,
            Err(e) => {
                log::warn!("Advisory unavailable ({}), using rule-based verdict", e);
                local_opinion(combined)
            }
        }
    }

    /// Build the final bundle. Pure: same input → same output.
    pub fn synthesize(&self, combined: &CombinedOutcome) -> VerdictBundle {
        let risk_score = risk_score(combined);
        let (verdict, risk_level) = band(risk_score);

        let (explanation, recommendations) = match &combined.advisory {
            Some(opinion) if opinion.verdict == verdict => {
                (opinion.explanation.clone(), opinion.recommendations.clone())
            }
            Some(opinion) => {
                log::debug!(
                    "Advisory verdict {} disagrees with scored verdict {}; using local text",
                    opinion.verdict,
                    verdict
                );
                (explanation_for(verdict, combined), recommendations_for(verdict))
            }
            None => (explanation_for(verdict, combined), recommendations_for(verdict)),
        };

        VerdictBundle {
            risk_score,
            risk_level,
            verdict,
            explanation,
            recommendations,
        }
    }
}

impl Default for VerdictSynthesizer {
    fn default() -> Self {
        Self::offline()
    }
}
