//! Append-only call log
//!
//! When the persisted `logging` flag is set, the facade appends one JSON
//! line per outbound call (timestamp, method, url, status, body) after
//! the response arrives, including responses that are then mapped to an
//! error. The log is a sink: nothing in the SDK reads it back.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

const LOG_FILE_NAME: &str = "requests.log";

/// One logged call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub at: DateTime<Utc>,
    pub method: String,
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Append-only JSON-lines log of outbound calls.
pub struct CallLog {
    path: PathBuf,
}

impl CallLog {
    /// Log writing to `requests.log` under `dir`. The directory is created
    /// on first append.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(LOG_FILE_NAME),
        }
    }

    /// Append one record as a single JSON line.
    pub async fn append(&self, record: &CallRecord) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| Error::Io(format!("creating log directory: {e}")))?;
        }

        let mut line = serde_json::to_string(record)
            .map_err(|e| Error::Io(format!("encoding call record: {e}")))?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| Error::Io(format!("opening call log: {e}")))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| Error::Io(format!("appending call record: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, status: u16) -> CallRecord {
        CallRecord {
            at: Utc::now(),
            method: "GET".into(),
            url: url.into(),
            status,
            body: "[]".into(),
        }
    }

    #[tokio::test]
    async fn appends_one_parseable_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let log = CallLog::new(dir.path().join("logs"));

        log.append(&record("http://api/a", 200)).await.unwrap();
        log.append(&record("http://api/b", 404)).await.unwrap();

        let contents = tokio::fs::read_to_string(dir.path().join("logs").join(LOG_FILE_NAME))
            .await
            .unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: CallRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.url, "http://api/a");
        assert_eq!(first.status, 200);

        let second: CallRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.status, 404);
    }

    #[tokio::test]
    async fn creates_the_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let log = CallLog::new(&nested);

        log.append(&record("http://api/a", 201)).await.unwrap();
        assert!(nested.join(LOG_FILE_NAME).exists());
    }
}
