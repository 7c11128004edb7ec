//! Scan audit journal.
//!
//! Every classified pair gets one JSONL line regardless of outcome; this
//! file is the audit trail for signal-quality review.

use std::{fs::OpenOptions, io::Write, path::{Path, PathBuf}};

use anyhow::Result;
use serde_json::json;

use crate::domain::Classification;

pub struct ScanJournal {
    path: PathBuf,
}

impl ScanJournal {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn append(
        &self,
        ts: i64,
        pair_address: &str,
        symbol: &str,
        label: Classification,
    ) -> Result<()> {
        let record = json!({
            "ts": ts,
            "addr": pair_address,
            "sym": symbol,
            "pattern": label.as_str(),
        });
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(f, "{record}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.jsonl");
        let journal = ScanJournal::new(&path);

        journal
            .append(1_700_000_000, "PAIR1", "TST", Classification::GoodCandidate)
            .unwrap();
        journal
            .append(1_700_000_060, "PAIR2", "XYZ", Classification::LowVolume)
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["ts"], 1_700_000_000i64);
        assert_eq!(first["addr"], "PAIR1");
        assert_eq!(first["sym"], "TST");
        assert_eq!(first["pattern"], "GoodCandidate");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["pattern"], "LowVolume");
    }
}
