//! Scan Pipeline
//!
//! Flow:
//! 1. Parse upload → records (lỗi parse: dừng, không lưu gì)
//! 2. Signature / Host / Behavior chạy song song trên scoped threads
//! 3. Advisory opinion → VerdictBundle
//! 4. ScanRecord → ScanStore
//!
//! Services được build một lần (`from_config`) và share giữa các scan.

use std::sync::Arc;
use std::thread;

use crate::logic::behavior::BehaviorClassifier;
use crate::logic::config::ScanConfig;
use crate::logic::error::{ScanError, ScanResult};
use crate::logic::history::{ScanRecord, ScanStore};
use crate::logic::host::HostAnomalyScanner;
use crate::logic::outcome::CombinedOutcome;
use crate::logic::parser::{self, InputFormat, NormalizedRecord};
use crate::logic::signature::{IndicatorSet, SignatureMatcher};
use crate::logic::verdict::{HttpAdvisor, VerdictSynthesizer};
use crate::logic::Detector;

pub struct ScanPipeline {
    signature: SignatureMatcher,
    host: HostAnomalyScanner,
    behavior: BehaviorClassifier,
    synthesizer: VerdictSynthesizer,
    store: ScanStore,
}

impl ScanPipeline {
    pub fn new(
        signature: SignatureMatcher,
        host: HostAnomalyScanner,
        behavior: BehaviorClassifier,
        synthesizer: VerdictSynthesizer,
        store: ScanStore,
    ) -> Self {
        Self {
            signature,
            host,
            behavior,
            synthesizer,
            store,
        }
    }

    /// Build every service from config: indicator lists, model artifact,
    /// advisor and history file.
    pub fn from_config(config: &ScanConfig) -> ScanResult<Self> {
        let indicators = IndicatorSet::load(&config.malicious_ips_file, &config.malicious_domains_file)?;

        let behavior = BehaviorClassifier::load(
            &config.model_path,
            config.model_sha256.as_deref(),
            config.behavior.clone(),
        );

        let synthesizer = match &config.advisory {
            Some(advisory) => {
                log::info!("Advisory service enabled: {}", advisory.url);
                VerdictSynthesizer::new(Box::new(HttpAdvisor::new(advisory)))
            }
            None => VerdictSynthesizer::offline(),
        };

        log::info!(
            "Scan pipeline ready (behavior: {:?}, history: {})",
            behavior.mode(),
            config.history_file.display()
        );

        Ok(Self::new(
            SignatureMatcher::new(Arc::new(indicators)),
            HostAnomalyScanner::new(config.host.clone()),
            behavior,
            synthesizer,
            ScanStore::open(&config.history_file),
        ))
    }

    /// Scan one upload and record the result.
    ///
    /// `extension` selects the parser (`csv`, `json`, `txt`, `log`).
    pub fn scan(&self, bytes: &[u8], extension: &str, filename: &str) -> ScanResult<ScanRecord> {
        let format = InputFormat::from_extension(extension)?;
        let records = parser::parse(bytes, format)?;

        log::debug!("Parsed {} records from {} ({})", records.len(), filename, format.as_str());

        let combined = self.detect(&records)?;
        let opinion = self.synthesizer.consult(&combined);
        let combined = combined.with_advisory(opinion);
        let bundle = self.synthesizer.synthesize(&combined);

        let file_type = extension.trim().trim_start_matches('.').to_lowercase();
        let record = ScanRecord::new(filename, bytes.len() as u64, file_type, combined, bundle);

        self.store.append(&record)?;

        log::info!(
            "Scan {} ({}): {} / {} (score {})",
            record.scan_id,
            record.filename,
            record.verdict,
            record.risk_level,
            record.risk_score
        );

        Ok(record)
    }

    /// Run the three detectors concurrently over the same records.
    fn detect(&self, records: &[NormalizedRecord]) -> ScanResult<CombinedOutcome> {
        thread::scope(|s| {
            let signature = s.spawn(|| self.signature.detect(records));
            let host = s.spawn(|| self.host.detect(records));
            let behavior = s.spawn(|| self.behavior.detect(records));

            // Join all three before inspecting results
            let (signature, host, behavior) = (signature.join(), host.join(), behavior.join());
            let panicked = |name: &str| ScanError::Failed(format!("{} detector panicked", name));

            let signature = signature.map_err(|_| panicked("signature"))?;
            let host = host.map_err(|_| panicked("host"))?;
            let behavior = behavior.map_err(|_| panicked("behavior"))?;

            Ok(CombinedOutcome::new(signature, host, behavior))
        })
    }

    pub fn store(&self) -> &ScanStore {
        &self.store
    }

    /// All recorded scans, newest first
    pub fn history(&self) -> Vec<ScanRecord> {
        self.store.list_all()
    }

    pub fn behavior(&self) -> &BehaviorClassifier {
        &self.behavior
    }
}
