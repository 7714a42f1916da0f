//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Runtime overrides are read in `logic::config`.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "botscan";

// ============================================
// File locations (relative to the data dir)
// ============================================

/// Known-bad IP list, one per line
pub const MALICIOUS_IPS_FILE: &str = "malicious_ips.txt";

/// Known-bad domain list, one per line
pub const MALICIOUS_DOMAINS_FILE: &str = "malicious_domains.txt";

/// Trained flow classifier (ONNX export)
pub const MODEL_FILE: &str = "models/flow_classifier.onnx";

/// Scan history document
pub const HISTORY_FILE: &str = "scans/results.json";

// ============================================
// Host thresholds
// ============================================

/// CPU % threshold
pub const HOST_CPU_THRESHOLD: f64 = 80.0;

/// Memory MB threshold
pub const HOST_MEMORY_THRESHOLD: f64 = 500.0;

/// Number of open connections
pub const HOST_CONNECTION_THRESHOLD: f64 = 30.0;

// ============================================
// Behavior thresholds
// ============================================

pub const BEHAVIOR_PACKET_THRESHOLD: f64 = 1000.0;

/// 1 MB
pub const BEHAVIOR_BYTES_THRESHOLD: f64 = 1_000_000.0;

/// Seconds. Shorter flows look like C2 beacons.
pub const BEHAVIOR_FLOW_DURATION_MIN: f64 = 2.0;

// ============================================
// Advisory service
// ============================================

/// Default advisory request timeout (seconds)
pub const DEFAULT_ADVISORY_TIMEOUT: u64 = 20;
