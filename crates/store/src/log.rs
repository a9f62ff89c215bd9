//! Append-only durable log.
//!
//! One JSON record per line, with leading `#` header lines written on
//! creation. The log may live on a read-only or ephemeral filesystem, so
//! every failure here must be recoverable by the caller. Reads tolerate a
//! torn trailing line from a crash mid-write by skipping whatever does not
//! parse.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use intake_core::DemoRequest;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Header written when the log file is first created.
const FILE_HEADER: &str = "# Demo Requests Storage\n\
    # Format: One JSON object per line\n\
    # Each line contains: requestId, email, userType, socialHandle, socialPlatform, source, timestamp, ipAddress, createdAt\n\n";

/// Append-only record log at a fixed path.
#[derive(Debug, Clone)]
pub struct DurableLog {
    path: PathBuf,
}

impl DurableLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line, creating the file (with its
    /// header) on first use.
    pub async fn append(&self, record: &DemoRequest) -> std::io::Result<()> {
        let json = serde_json::to_string(record)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;
        let line = format!("{json}\n");

        match OpenOptions::new().append(true).open(&self.path).await {
            Ok(mut file) => {
                file.write_all(line.as_bytes()).await?;
                file.flush().await
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tokio::fs::write(&self.path, format!("{FILE_HEADER}{line}")).await
            }
            Err(e) => Err(e),
        }
    }

    /// Read every parseable record.
    ///
    /// Blank lines and `#` comment lines are skipped, as is any line that
    /// fails to parse. A missing or unreadable file reads as empty.
    pub async fn read_all(&self) -> Vec<DemoRequest> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Durable log unreadable, treating as empty"
                );
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match serde_json::from_str::<DemoRequest>(line) {
                Ok(record) => records.push(record),
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(
                path = %self.path.display(),
                skipped,
                "Skipped unparseable log lines"
            );
        }

        records
    }
}
