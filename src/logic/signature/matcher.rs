//! Signature Matcher
//!
//! Exact-match IP/domain fields của mỗi record với IndicatorSet.
//! Pure function của (records, indicators).

use std::sync::Arc;

use crate::logic::outcome::{DetectionStatus, Severity, SignatureFinding, SignatureOutcome, ThreatKind};
use crate::logic::parser::NormalizedRecord;
use crate::logic::Detector;

use super::indicators::IndicatorSet;

/// IP-bearing fields, checked in this order
pub const IP_FIELDS: &[&str] = &["src_ip", "dst_ip", "ip", "remote_ip"];

/// Domain-bearing fields, checked in this order
pub const DOMAIN_FIELDS: &[&str] = &["domain", "hostname", "dns_query"];

/// Typed view: the indicator-bearing values of one record, case-folded.
struct IndicatorCandidates {
    ips: Vec<(&'static str, String)>,
    domains: Vec<(&'static str, String)>,
}

impl IndicatorCandidates {
    fn from_record(record: &NormalizedRecord) -> Self {
        let collect = |fields: &[&'static str]| {
            fields
                .iter()
                .filter_map(|field| {
                    record
                        .get(field)
                        .map(|value| (*field, value.to_string().trim().to_lowercase()))
                })
                .collect::<Vec<_>>()
        };

        Self {
            ips: collect(IP_FIELDS),
            domains: collect(DOMAIN_FIELDS),
        }
    }
}

pub struct SignatureMatcher {
    indicators: Arc<IndicatorSet>,
}

impl SignatureMatcher {
    pub fn new(indicators: Arc<IndicatorSet>) -> Self {
        Self { indicators }
    }

    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    fn match_record(&self, record: &NormalizedRecord, threats: &mut Vec<SignatureFinding>) {
        let candidates = IndicatorCandidates::from_record(record);

        for (field, ip) in candidates.ips {
            if self.indicators.contains_ip(&ip) {
                threats.push(SignatureFinding {
                    kind: ThreatKind::MaliciousIp,
                    value: ip,
                    field: field.to_string(),
                    severity: Severity::High,
                });
            }
        }

        for (field, domain) in candidates.domains {
            if self.indicators.contains_domain(&domain) {
                threats.push(SignatureFinding {
                    kind: ThreatKind::MaliciousDomain,
                    value: domain,
                    field: field.to_string(),
                    severity: Severity::High,
                });
            }
        }
    }
}

impl Detector for SignatureMatcher {
    type Outcome = SignatureOutcome;

    fn detect(&self, records: &[NormalizedRecord]) -> SignatureOutcome {
        let mut threats = Vec::new();
        for record in records {
            self.match_record(record, &mut threats);
        }

        let threat_count = threats.len();
        let (status, message) = if threat_count > 0 {
            (DetectionStatus::Detected, format!("{} known threats detected", threat_count))
        } else {
            (DetectionStatus::Clean, "No known malicious signatures detected".to_string())
        };

        SignatureOutcome {
            threats,
            threat_count,
            status,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SignatureMatcher {
        let indicators = IndicatorSet::from_lists(["1.2.3.4", "6.6.6.6"], ["evil.com"]);
        SignatureMatcher::new(Arc::new(indicators))
    }

    #[test]
    fn test_ip_match_detected() {
        let records = vec![NormalizedRecord::new().with("src_ip", "1.2.3.4")];
        let outcome = matcher().detect(&records);

        assert_eq!(outcome.status, DetectionStatus::Detected);
        assert!(outcome.threat_count >= 1);
        assert_eq!(outcome.threats[0].kind, ThreatKind::MaliciousIp);
        assert_eq!(outcome.threats[0].field, "src_ip");
        assert_eq!(outcome.threats[0].severity, Severity::High);
    }

    #[test]
    fn test_no_indicator_fields_never_match() {
        let records = vec![
            NormalizedRecord::new().with("process_name", "1.2.3.4").with("cpu", 99.0),
            NormalizedRecord::new().with("item", "evil.com"),
        ];
        let outcome = matcher().detect(&records);

        assert_eq!(outcome.status, DetectionStatus::Clean);
        assert_eq!(outcome.threat_count, 0);
        assert!(outcome.threats.is_empty());
    }

    #[test]
    fn test_record_can_yield_multiple_findings() {
        let records = vec![NormalizedRecord::new()
            .with("src_ip", "6.6.6.6")
            .with("dst_ip", "1.2.3.4")
            .with("dns_query", "EVIL.COM")];
        let outcome = matcher().detect(&records);

        assert_eq!(outcome.threat_count, 3);
        // IP fields first, in candidate order, then domains
        assert_eq!(outcome.threats[0].field, "src_ip");
        assert_eq!(outcome.threats[1].field, "dst_ip");
        assert_eq!(outcome.threats[2].kind, ThreatKind::MaliciousDomain);
        assert_eq!(outcome.threats[2].value, "evil.com");
    }

    #[test]
    fn test_empty_indicator_set_is_clean() {
        let matcher = SignatureMatcher::new(Arc::new(IndicatorSet::new()));
        let records = vec![NormalizedRecord::new().with("ip", "1.2.3.4")];
        assert_eq!(matcher.detect(&records).status, DetectionStatus::Clean);
    }

    #[test]
    fn test_numeric_looking_csv_values_match_as_written() {
        use crate::logic::parser::{parse, InputFormat};

        let indicators = IndicatorSet::from_lists(Vec::<&str>::new(), ["1e3"]);
        let matcher = SignatureMatcher::new(Arc::new(indicators));

        let records = parse(b"hostname,domain\n1e3,1000\n", InputFormat::Csv).unwrap();
        let outcome = matcher.detect(&records);

        assert_eq!(outcome.threat_count, 1);
        assert_eq!(outcome.threats[0].value, "1e3");
        assert_eq!(outcome.threats[0].field, "hostname");
    }
}
