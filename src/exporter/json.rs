// file: src/exporter/json.rs
// description: json export of ask reports to a directory

use crate::error::Result;
use crate::models::AskReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedReport<'a> {
    pub exported_at: String,
    #[serde(flatten)]
    pub report: &'a AskReport,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn export_report(&self, report: &AskReport, pretty: bool) -> Result<PathBuf> {
        let now = Utc::now();
        let exported = ExportedReport {
            exported_at: now.to_rfc3339(),
            report,
        };

        let body = if pretty {
            serde_json::to_string_pretty(&exported)?
        } else {
            serde_json::to_string(&exported)?
        };

        let path = self.output_dir.join(Self::file_name(&report.question, now));
        fs::write(&path, body)?;

        info!("Exported report {} to {}", report.request_id, path.display());
        Ok(path)
    }

    pub fn file_name(question: &str, at: DateTime<Utc>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(question.as_bytes());
        let digest = format!("{:x}", hasher.finalize());

        format!("ask-{}-{}.json", at.format("%Y%m%dT%H%M%SZ"), &digest[..12])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AskStats, Document, FetchStatus, QueryBatch};
    use chrono::TimeZone;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn report() -> AskReport {
        AskReport {
            request_id: Uuid::new_v4(),
            question: "Tell me about HIV AIDS.".to_string(),
            query_batch: QueryBatch::new("HIV\nAIDS"),
            documents: vec![Document::new(
                "abstract".to_string(),
                "title".to_string(),
                vec!["HIV".to_string()],
            )],
            fetch_status: FetchStatus::Complete,
            answer: "An answer.".to_string(),
            stats: AskStats::default(),
        }
    }

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path().join("nested"));
        assert!(exporter.is_ok());
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_file_name_is_stable_for_question() {
        let at = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap();
        let a = JsonExporter::file_name("q", at);
        let b = JsonExporter::file_name("q", at);

        assert_eq!(a, b);
        assert!(a.starts_with("ask-20261014T093000Z-"));
        assert!(a.ends_with(".json"));
        assert_ne!(a, JsonExporter::file_name("other", at));
    }

    #[test]
    fn test_export_report_writes_flattened_json() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let report = report();

        let path = exporter.export_report(&report, true).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(written["question"], "Tell me about HIV AIDS.");
        assert_eq!(written["query_batch"], "HIV\nAIDS");
        assert_eq!(written["fetch_status"]["status"], "complete");
        assert!(written["exported_at"].is_string());
    }
}
