//! Host Anomaly Scanner
//!
//! Mỗi record được check độc lập với 3 ngưỡng: CPU, memory, connections.
//! 2+ flags → HIGH, 1 flag → MEDIUM.

use crate::logic::config::HostThresholds;
use crate::logic::outcome::{DetectionStatus, HostFinding, HostOutcome, Severity};
use crate::logic::parser::NormalizedRecord;
use crate::logic::Detector;

const CPU_ALIASES: &[&str] = &["cpu_percent", "cpu"];
const MEMORY_ALIASES: &[&str] = &["memory_percent", "memory_mb", "memory"];
const CONNECTION_ALIASES: &[&str] = &["connection_count", "connections"];
const NAME_ALIASES: &[&str] = &["process_name", "name"];
const PID_ALIASES: &[&str] = &["pid"];

/// Typed view of one host sample. Absent values are 0.
#[derive(Debug, Clone, PartialEq)]
pub struct HostSample {
    pub process_name: String,
    pub pid: String,
    pub cpu: f64,
    pub memory: f64,
    pub connections: f64,
}

impl HostSample {
    pub fn from_record(record: &NormalizedRecord) -> Self {
        Self {
            process_name: record.text_of(NAME_ALIASES).unwrap_or_else(|| "unknown".to_string()),
            pid: record.text_of(PID_ALIASES).unwrap_or_else(|| "N/A".to_string()),
            cpu: record.number_of(CPU_ALIASES).unwrap_or(0.0),
            memory: record.number_of(MEMORY_ALIASES).unwrap_or(0.0),
            connections: record.number_of(CONNECTION_ALIASES).unwrap_or(0.0),
        }
    }
}

pub struct HostAnomalyScanner {
    thresholds: HostThresholds,
}

impl HostAnomalyScanner {
    pub fn new(thresholds: HostThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &HostThresholds {
        &self.thresholds
    }

    /// Flags for one sample, in CPU → memory → connections order
    fn flags(&self, sample: &HostSample) -> Vec<String> {
        let mut flags = Vec::new();

        if sample.cpu > self.thresholds.cpu_percent {
            flags.push(format!("High CPU: {}%", sample.cpu));
        }
        if sample.memory > self.thresholds.memory_mb {
            flags.push(format!("High Memory: {}MB", sample.memory));
        }
        if sample.connections > self.thresholds.connections {
            flags.push(format!("High Connections: {}", sample.connections));
        }

        flags
    }
}

impl Default for HostAnomalyScanner {
    fn default() -> Self {
        Self::new(HostThresholds::default())
    }
}

impl Detector for HostAnomalyScanner {
    type Outcome = HostOutcome;

    fn detect(&self, records: &[NormalizedRecord]) -> HostOutcome {
        let suspicious_processes: Vec<HostFinding> = records
            .iter()
            .map(HostSample::from_record)
            .filter_map(|sample| {
                let flags = self.flags(&sample);
                if flags.is_empty() {
                    return None;
                }
                let severity = if flags.len() >= 2 { Severity::High } else { Severity::Medium };
                Some(HostFinding {
                    process_name: sample.process_name,
                    pid: sample.pid,
                    cpu: sample.cpu,
                    memory: sample.memory,
                    connections: sample.connections,
                    flags,
                    severity,
                })
            })
            .collect();

        let suspicious_count = suspicious_processes.len();
        let (status, message) = if suspicious_count > 0 {
            (DetectionStatus::Suspicious, format!("{} suspicious processes detected", suspicious_count))
        } else {
            (DetectionStatus::Normal, "All processes appear normal".to_string())
        };

        HostOutcome {
            suspicious_processes,
            suspicious_count,
            status,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flag_is_medium() {
        let records = vec![NormalizedRecord::new().with("cpu", 95.0).with("connections", 5.0)];
        let outcome = HostAnomalyScanner::default().detect(&records);

        assert_eq!(outcome.status, DetectionStatus::Suspicious);
        assert_eq!(outcome.suspicious_count, 1);
        let finding = &outcome.suspicious_processes[0];
        assert_eq!(finding.flags.len(), 1);
        assert_eq!(finding.severity, Severity::Medium);
        assert_eq!(finding.flags[0], "High CPU: 95%");
    }

    #[test]
    fn test_two_flags_is_high() {
        let records = vec![NormalizedRecord::new().with("cpu", 95.0).with("connections", 50.0)];
        let outcome = HostAnomalyScanner::default().detect(&records);

        let finding = &outcome.suspicious_processes[0];
        assert_eq!(finding.flags.len(), 2);
        assert_eq!(finding.severity, Severity::High);
    }

    #[test]
    fn test_absent_fields_default_to_zero() {
        let records = vec![
            NormalizedRecord::new().with("item", "1.2.3.4"),
            NormalizedRecord::new(),
        ];
        let outcome = HostAnomalyScanner::default().detect(&records);

        assert_eq!(outcome.status, DetectionStatus::Normal);
        assert_eq!(outcome.suspicious_count, 0);
    }

    #[test]
    fn test_aliases_and_identity() {
        let record = NormalizedRecord::new()
            .with("name", "xmrig")
            .with("pid", 4242.0)
            .with("memory_mb", 2048.0)
            .with("connection_count", 120.0)
            .with("cpu_percent", 99.5);
        let sample = HostSample::from_record(&record);

        assert_eq!(sample.process_name, "xmrig");
        assert_eq!(sample.pid, "4242");
        assert_eq!(sample.memory, 2048.0);

        let outcome = HostAnomalyScanner::default().detect(&[record]);
        let finding = &outcome.suspicious_processes[0];
        assert_eq!(finding.flags.len(), 3);
        assert_eq!(finding.severity, Severity::High);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let records = vec![NormalizedRecord::new().with("cpu", 80.0)];
        let outcome = HostAnomalyScanner::default().detect(&records);
        assert_eq!(outcome.suspicious_count, 0);
    }

    #[test]
    fn test_custom_thresholds() {
        let scanner = HostAnomalyScanner::new(HostThresholds {
            cpu_percent: 50.0,
            memory_mb: 100.0,
            connections: 10.0,
        });
        let records = vec![NormalizedRecord::new().with("cpu", 60.0)];
        assert_eq!(scanner.detect(&records).suspicious_count, 1);
    }
}
