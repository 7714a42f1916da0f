//! Logic Module - Detection Engines & Verdict
//!
//! Chứa các engines xử lý: Parser, Signature, Host, Behavior, Verdict, History.
//!
//! ## Architecture
//! - `parser/` - Raw upload → normalized records
//! - `signature/`, `host/`, `behavior/` - Independent detectors
//! - `verdict/` - Risk scoring + advisory
//! - `history/` - Append-only scan log

// Shared
pub mod config;
pub mod error;
pub mod outcome;

// Input
pub mod parser;

// Detectors
pub mod signature;
pub mod host;
pub mod behavior;

// Synthesis & persistence
pub mod verdict;
pub mod history;
pub mod pipeline;

use parser::NormalizedRecord;

/// Common shape of the three detectors.
///
/// Detectors only read their reference data, so a single instance can be
/// shared across concurrent scans.
pub trait Detector: Send + Sync {
    type Outcome: Send;

    fn detect(&self, records: &[NormalizedRecord]) -> Self::Outcome;
}
