//! Indicator Set
//!
//! Known-bad IPs và domains, load một lần lúc startup, read-only sau đó.
//! File format: one indicator per line, `#` comments allowed.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    ips: HashSet<String>,
    domains: HashSet<String>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from in-memory lists (values are case-folded)
    pub fn from_lists<I, D, S, T>(ips: I, domains: D) -> Self
    where
        I: IntoIterator<Item = S>,
        D: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            ips: ips.into_iter().filter_map(|s| fold(s.as_ref())).collect(),
            domains: domains.into_iter().filter_map(|s| fold(s.as_ref())).collect(),
        }
    }

    /// Load both indicator files.
    ///
    /// A missing file is created empty so operators know where to drop lists.
    pub fn load(ips_path: &Path, domains_path: &Path) -> io::Result<Self> {
        let set = Self {
            ips: load_file(ips_path)?,
            domains: load_file(domains_path)?,
        };

        log::info!(
            "Loaded {} malicious IPs and {} domains",
            set.ips.len(),
            set.domains.len()
        );

        Ok(set)
    }

    /// `value` must already be case-folded
    pub fn contains_ip(&self, value: &str) -> bool {
        self.ips.contains(value)
    }

    /// `value` must already be case-folded
    pub fn contains_domain(&self, value: &str) -> bool {
        self.domains.contains(value)
    }

    pub fn ip_count(&self) -> usize {
        self.ips.len()
    }

    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ips.is_empty() && self.domains.is_empty()
    }
}

fn load_file(path: &Path) -> io::Result<HashSet<String>> {
    if !path.exists() {
        log::warn!("{} not found. Creating empty file.", path.display());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, "")?;
        return Ok(HashSet::new());
    }

    let content = fs::read_to_string(path)?;
    Ok(parse_lines(&content))
}

fn parse_lines(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        // Skip comments and empty lines
        .filter(|line| !line.starts_with('#') && !line.starts_with("//"))
        .filter_map(fold)
        .collect()
}

fn fold(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_skips_comments() {
        let set = parse_lines("# feodo\n1.2.3.4\n\n  5.6.7.8 \n// old\nEVIL.com\n");
        assert_eq!(set.len(), 3);
        assert!(set.contains("1.2.3.4"));
        assert!(set.contains("5.6.7.8"));
        assert!(set.contains("evil.com"));
    }

    #[test]
    fn test_missing_files_created_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ips = dir.path().join("intel").join("ips.txt");
        let domains = dir.path().join("intel").join("domains.txt");

        let set = IndicatorSet::load(&ips, &domains).unwrap();
        assert!(set.is_empty());
        assert!(ips.exists());
        assert!(domains.exists());
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let ips = dir.path().join("ips.txt");
        let domains = dir.path().join("domains.txt");
        fs::write(&ips, "1.2.3.4\n10.10.10.10\n").unwrap();
        fs::write(&domains, "Bad.Example\n").unwrap();

        let set = IndicatorSet::load(&ips, &domains).unwrap();
        assert_eq!(set.ip_count(), 2);
        assert_eq!(set.domain_count(), 1);
        assert!(set.contains_domain("bad.example"));
    }
}
