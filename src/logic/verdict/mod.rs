//! Verdict Module - Risk scoring & synthesis
//!
//! - `scoring.rs` - Weighted score + fixed bands
//! - `advisory.rs` - Advisor trait (HTTP / offline) + local fallback text
//! - `synthesizer.rs` - Final bundle

pub mod advisory;
pub mod scoring;
pub mod synthesizer;
pub mod types;


pub use advisory::{Advisor, HttpAdvisor, OfflineAdvisor};
pub use synthesizer::VerdictSynthesizer;
pub use types::{AdvisoryOpinion, OpinionSource, RiskLevel, Verdict, VerdictBundle};
