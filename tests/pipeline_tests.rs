//! End-to-end scans through `ScanPipeline` with on-disk reference data.

use std::fs;

use tempfile::{tempdir, TempDir};

use botscan_core::logic::outcome::{BehaviorMethod, BehaviorPrediction, DetectionStatus, Severity, ThreatKind};
use botscan_core::logic::verdict::{RiskLevel, Verdict};
use botscan_core::{ScanConfig, ScanError, ScanPipeline, ScanStats};

fn setup() -> (TempDir, ScanConfig) {
    let dir = tempdir().unwrap();
    let config = ScanConfig::with_data_dir(dir.path());
    fs::write(&config.malicious_ips_file, "# feed\n1.2.3.4\n203.0.113.66\n").unwrap();
    fs::write(&config.malicious_domains_file, "evil-c2.example\n").unwrap();
    (dir, config)
}

#[test]
fn test_csv_flow_with_known_ip() {
    let (_dir, config) = setup();
    let pipeline = ScanPipeline::from_config(&config).unwrap();
    assert!(!pipeline.behavior().is_model_backed());

    let csv = "src_ip,dst_ip,packets,bytes,flow_duration\n\
               10.0.0.5,1.2.3.4,10,500,5\n";
    let record = pipeline.scan(csv.as_bytes(), "csv", "flows.csv").unwrap();

    let sig = &record.results.signature_based;
    assert_eq!(sig.status, DetectionStatus::Detected);
    assert_eq!(sig.threat_count, 1);
    assert_eq!(sig.threats[0].kind, ThreatKind::MaliciousIp);
    assert_eq!(sig.threats[0].value, "1.2.3.4");
    assert_eq!(sig.threats[0].field, "dst_ip");
    assert_eq!(sig.threats[0].severity, Severity::High);

    assert_eq!(record.results.host_based.status, DetectionStatus::Normal);
    assert_eq!(record.results.behavior_based.prediction, BehaviorPrediction::Clean);
    assert_eq!(record.results.behavior_based.method, BehaviorMethod::RuleBased);

    // 40 + 10 for one threat
    assert_eq!(record.risk_score, 50);
    assert_eq!(record.verdict, Verdict::Suspicious);
    assert_eq!(record.risk_level, RiskLevel::High);
    assert_eq!(record.filename, "flows.csv");
    assert_eq!(record.file_type, "csv");
    assert_eq!(record.file_size, csv.len() as u64);
    assert!(record.results.advisory.is_some());
}

#[test]
fn test_json_host_processes() {
    let (_dir, config) = setup();
    let pipeline = ScanPipeline::from_config(&config).unwrap();

    let json = r#"[
        {"process_name": "miner", "pid": 4242, "cpu_percent": 95, "memory_mb": 50},
        {"process_name": "worm", "pid": 31337, "cpu_percent": 95, "memory_mb": 900, "connections": 80},
        {"process_name": "sshd", "pid": 1, "cpu_percent": 1, "memory_mb": 5}
    ]"#;
    let record = pipeline.scan(json.as_bytes(), "json", "procs.json").unwrap();

    let host = &record.results.host_based;
    assert_eq!(host.status, DetectionStatus::Suspicious);
    assert_eq!(host.suspicious_count, 2);
    assert_eq!(host.suspicious_processes[0].process_name, "miner");
    assert_eq!(host.suspicious_processes[0].pid, "4242");
    assert_eq!(host.suspicious_processes[0].flags, vec!["High CPU: 95%".to_string()]);
    assert_eq!(host.suspicious_processes[0].severity, Severity::Medium);
    assert_eq!(host.suspicious_processes[1].flags.len(), 3);
    assert_eq!(host.suspicious_processes[1].severity, Severity::High);

    assert_eq!(record.results.signature_based.status, DetectionStatus::Clean);
    assert_eq!(record.risk_score, 20);
    assert_eq!(record.verdict, Verdict::Clean);
}

#[test]
fn test_text_lines_match_domains_not() {
    let (_dir, config) = setup();
    let pipeline = ScanPipeline::from_config(&config).unwrap();

    // Line records only carry `item`; no indicator field to match
    let text = "evil-c2.example\n1.2.3.4\n\n";
    let record = pipeline.scan(text.as_bytes(), ".log", "notes.log").unwrap();

    assert_eq!(record.file_type, "log");
    assert_eq!(record.results.signature_based.status, DetectionStatus::Clean);
    assert_eq!(record.verdict, Verdict::Clean);
}

#[test]
fn test_beaconing_flows_reach_critical() {
    let (_dir, config) = setup();
    let pipeline = ScanPipeline::from_config(&config).unwrap();

    let csv = "src_ip,dst_ip,domain,packets,bytes,flow_duration\n\
               10.0.0.5,1.2.3.4,evil-c2.example,20,300,0.5\n\
               10.0.0.5,203.0.113.66,,5000,2000000,0.1\n\
               10.0.0.6,8.8.8.8,,3,120,0.2\n";
    let record = pipeline.scan(csv.as_bytes(), "csv", "beacon.csv").unwrap();

    assert_eq!(record.results.signature_based.threat_count, 3);
    assert_eq!(record.results.behavior_based.prediction, BehaviorPrediction::Botnet);
    assert_eq!(record.results.behavior_based.anomaly_count, 3);
    assert_eq!(record.results.behavior_based.anomalies[0].flow, "10.0.0.5 -> 1.2.3.4");
    assert_eq!(record.verdict, Verdict::Infected);
    assert_eq!(record.risk_level, RiskLevel::Critical);
    assert_eq!(record.risk_score, 100);
}

#[test]
fn test_empty_upload_is_clean() {
    let (_dir, config) = setup();
    let pipeline = ScanPipeline::from_config(&config).unwrap();

    let record = pipeline.scan(b"", "json", "empty.json").unwrap();

    assert_eq!(record.results.behavior_based.confidence, 0.0);
    assert_eq!(record.results.behavior_based.prediction, BehaviorPrediction::Clean);
    assert_eq!(record.risk_score, 0);
    assert_eq!(record.verdict, Verdict::Clean);
    assert_eq!(record.risk_level, RiskLevel::Low);
}

#[test]
fn test_parse_errors_persist_nothing() {
    let (_dir, config) = setup();
    let pipeline = ScanPipeline::from_config(&config).unwrap();

    let err = pipeline.scan(b"{ broken", "json", "bad.json").unwrap_err();
    assert!(err.is_input_error());

    let err = pipeline.scan(b"MZ\x90\x00", "exe", "payload.exe").unwrap_err();
    assert!(matches!(err, ScanError::Parse(_)));

    assert!(pipeline.history().is_empty());
    assert!(!config.history_file.exists());
}

#[test]
fn test_history_and_stats_accumulate() {
    let (_dir, config) = setup();
    let pipeline = ScanPipeline::from_config(&config).unwrap();

    let first = pipeline
        .scan(b"src_ip,dst_ip\n10.0.0.1,1.2.3.4\n", "csv", "one.csv")
        .unwrap();
    let second = pipeline.scan(b"hello\n", "txt", "two.txt").unwrap();
    assert_ne!(first.scan_id, second.scan_id);

    let history = pipeline.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].scan_id, second.scan_id);
    assert_eq!(history[1].scan_id, first.scan_id);

    assert_eq!(pipeline.store().get_by_id(&first.scan_id).unwrap(), first);
    assert_eq!(
        pipeline.store().stats(),
        ScanStats { total: 2, infected: 0, clean: 1, suspicious: 1 }
    );

    // A fresh pipeline over the same data dir sees the same history
    let reopened = ScanPipeline::from_config(&config).unwrap();
    assert_eq!(reopened.history(), history);
}

#[test]
fn test_missing_indicator_files_are_created() {
    let dir = tempdir().unwrap();
    let config = ScanConfig::with_data_dir(dir.path().join("fresh"));

    let pipeline = ScanPipeline::from_config(&config).unwrap();

    assert!(config.malicious_ips_file.exists());
    assert!(config.malicious_domains_file.exists());
    let record = pipeline.scan(b"src_ip,dst_ip\n10.0.0.1,1.2.3.4\n", "csv", "a.csv").unwrap();
    assert_eq!(record.results.signature_based.status, DetectionStatus::Clean);
}

#[test]
fn test_concurrent_scans_share_pipeline() {
    let (_dir, config) = setup();
    let pipeline = ScanPipeline::from_config(&config).unwrap();

    std::thread::scope(|s| {
        for i in 0..8 {
            let pipeline = &pipeline;
            s.spawn(move || {
                let body = format!("src_ip,dst_ip\n10.0.0.{},1.2.3.4\n", i);
                pipeline.scan(body.as_bytes(), "csv", &format!("c{}.csv", i)).unwrap();
            });
        }
    });

    assert_eq!(pipeline.store().stats().total, 8);
}

#[test]
fn test_non_finite_cell_keeps_history_intact() {
    let (_dir, config) = setup();
    let pipeline = ScanPipeline::from_config(&config).unwrap();

    let first = pipeline.scan(b"src_ip,dst_ip\n10.0.0.1,9.9.9.9\n", "csv", "a.csv").unwrap();

    let second = pipeline
        .scan(b"process_name,cpu,memory_mb\nminer,inf,NaN\n", "csv", "b.csv")
        .unwrap();
    // Non-finite values read as absent
    assert_eq!(second.results.host_based.status, DetectionStatus::Normal);

    let third = pipeline.scan(b"hello\n", "txt", "c.txt").unwrap();

    let names: Vec<_> = pipeline.history().into_iter().map(|r| r.filename).collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&"a.csv".to_string()));
    assert_eq!(pipeline.store().get_by_id(&first.scan_id).unwrap(), first);
    assert_eq!(pipeline.store().get_by_id(&second.scan_id).unwrap(), second);
    assert_eq!(pipeline.store().get_by_id(&third.scan_id).unwrap(), third);
}

#[test]
fn test_csv_identifiers_rendered_as_written() {
    let (_dir, config) = setup();
    let pipeline = ScanPipeline::from_config(&config).unwrap();

    let csv = "process_name,pid,cpu_percent\nminer,007,95\n";
    let record = pipeline.scan(csv.as_bytes(), "csv", "procs.csv").unwrap();

    let finding = &record.results.host_based.suspicious_processes[0];
    assert_eq!(finding.pid, "007");
    assert_eq!(finding.cpu, 95.0);
    assert_eq!(finding.flags, vec!["High CPU: 95%".to_string()]);
}
