//! Host Module - Resource-anomaly thresholds
//!
//! Input: process/host samples (CPU, memory, connection count)
//! Output: HostOutcome

mod scanner;

pub use scanner::{HostAnomalyScanner, HostSample};
