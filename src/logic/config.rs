//! Configuration module
//!
//! Thresholds và file paths. Defaults nằm ở `constants.rs`,
//! override bằng environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants;

/// Host resource thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct HostThresholds {
    pub cpu_percent: f64,
    pub memory_mb: f64,
    pub connections: f64,
}

impl Default for HostThresholds {
    fn default() -> Self {
        Self {
            cpu_percent: constants::HOST_CPU_THRESHOLD,
            memory_mb: constants::HOST_MEMORY_THRESHOLD,
            connections: constants::HOST_CONNECTION_THRESHOLD,
        }
    }
}

/// Flow heuristics used by the rule-based behavior path
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorThresholds {
    pub packets: f64,
    pub bytes: f64,
    pub min_flow_duration: f64,
}

impl Default for BehaviorThresholds {
    fn default() -> Self {
        Self {
            packets: constants::BEHAVIOR_PACKET_THRESHOLD,
            bytes: constants::BEHAVIOR_BYTES_THRESHOLD,
            min_flow_duration: constants::BEHAVIOR_FLOW_DURATION_MIN,
        }
    }
}

/// Remote advisory endpoint. Absent → offline advisor.
#[derive(Debug, Clone)]
pub struct AdvisoryConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root for every relative path below
    pub data_dir: PathBuf,

    pub malicious_ips_file: PathBuf,
    pub malicious_domains_file: PathBuf,

    /// ONNX flow classifier
    pub model_path: PathBuf,

    /// Expected SHA-256 (hex) of the model file, if pinned
    pub model_sha256: Option<String>,

    pub history_file: PathBuf,

    pub host: HostThresholds,
    pub behavior: BehaviorThresholds,

    pub advisory: Option<AdvisoryConfig>,
}

impl ScanConfig {
    /// Config rooted at `data_dir` with default thresholds and no advisory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            malicious_ips_file: data_dir.join(constants::MALICIOUS_IPS_FILE),
            malicious_domains_file: data_dir.join(constants::MALICIOUS_DOMAINS_FILE),
            model_path: data_dir.join(constants::MODEL_FILE),
            model_sha256: None,
            history_file: data_dir.join(constants::HISTORY_FILE),
            host: HostThresholds::default(),
            behavior: BehaviorThresholds::default(),
            advisory: None,
            data_dir,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let data_dir = env::var("BOTSCAN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let mut config = Self::with_data_dir(data_dir);

        if let Some(path) = env_path("MALICIOUS_IPS_FILE") {
            config.malicious_ips_file = path;
        }
        if let Some(path) = env_path("MALICIOUS_DOMAINS_FILE") {
            config.malicious_domains_file = path;
        }
        if let Some(path) = env_path("MODEL_PATH") {
            config.model_path = path;
        }
        if let Some(path) = env_path("HISTORY_FILE") {
            config.history_file = path;
        }
        config.model_sha256 = env::var("MODEL_SHA256")
            .ok()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        config.host = HostThresholds {
            cpu_percent: env_f64("HOST_CPU_THRESHOLD", constants::HOST_CPU_THRESHOLD),
            memory_mb: env_f64("HOST_MEMORY_THRESHOLD", constants::HOST_MEMORY_THRESHOLD),
            connections: env_f64("HOST_CONNECTION_THRESHOLD", constants::HOST_CONNECTION_THRESHOLD),
        };

        config.behavior = BehaviorThresholds {
            packets: env_f64("BEHAVIOR_PACKET_THRESHOLD", constants::BEHAVIOR_PACKET_THRESHOLD),
            bytes: env_f64("BEHAVIOR_BYTES_THRESHOLD", constants::BEHAVIOR_BYTES_THRESHOLD),
            min_flow_duration: env_f64("BEHAVIOR_FLOW_DURATION_MIN", constants::BEHAVIOR_FLOW_DURATION_MIN),
        };

        config.advisory = env::var("ADVISORY_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| AdvisoryConfig {
                url,
                api_key: env::var("ADVISORY_API_KEY").ok().filter(|k| !k.is_empty()),
                timeout: Duration::from_secs(
                    env::var("ADVISORY_TIMEOUT_SECS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(constants::DEFAULT_ADVISORY_TIMEOUT),
                ),
            });

        config
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(constants::APP_NAME))
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Relative env paths resolve against the working directory, like any CLI path.
fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key).ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_data_dir() {
        let config = ScanConfig::with_data_dir("/tmp/botscan-test");
        assert_eq!(config.history_file, PathBuf::from("/tmp/botscan-test/scans/results.json"));
        assert_eq!(config.malicious_ips_file, PathBuf::from("/tmp/botscan-test/malicious_ips.txt"));
        assert!(config.advisory.is_none());
    }

    #[test]
    fn test_default_thresholds() {
        let config = ScanConfig::with_data_dir(".");
        assert_eq!(config.host.cpu_percent, 80.0);
        assert_eq!(config.host.connections, 30.0);
        assert_eq!(config.behavior.packets, 1000.0);
        assert_eq!(config.behavior.min_flow_duration, 2.0);
    }
}
