//! Flow Feature Layout - Centralized Feature Definition
//!
//! **This file controls the model input schema**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The classifier artifact is trained against exactly this order.

use crc32fast::Hasher;

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Timing (0) ===
    "flow_duration",         // 0: Flow duration

    // === Volume (1-4) ===
    "total_fwd_packets",     // 1: Packets sent forward
    "total_bwd_packets",     // 2: Packets sent backward
    "fwd_pkt_len_mean",      // 3: Mean forward packet length
    "bwd_pkt_len_mean",      // 4: Mean backward packet length

    // === Rates (5-6) ===
    "flow_bytes_s",          // 5: Bytes per second
    "flow_pkts_s",           // 6: Packets per second

    // === Inter-arrival (7-9) ===
    "flow_iat_mean",         // 7: Mean inter-arrival time
    "fwd_iat_mean",          // 8: Mean forward inter-arrival time
    "bwd_iat_mean",          // 9: Mean backward inter-arrival time
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 10;

/// CRC32 of version + names, to detect layout mismatches at runtime
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }
    hasher.finalize()
}

/// Index of a feature by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_count_matches() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_stable() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("flow_duration"), Some(0));
        assert_eq!(feature_index("bwd_iat_mean"), Some(9));
        assert_eq!(feature_index("cpu_percent"), None);
    }
}
