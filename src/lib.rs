//! Botnet Scan Core
//!
//! Parses uploaded telemetry, runs the three detectors (signature, host,
//! behavior), synthesizes a verdict and records every scan in history.

pub mod constants;
pub mod logic;

pub use logic::config::ScanConfig;
pub use logic::error::{ParseError, ScanError, StoreError};
pub use logic::history::{ScanRecord, ScanStats, ScanStore};
pub use logic::pipeline::ScanPipeline;
