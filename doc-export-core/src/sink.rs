use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::contract::ArchiveSink;

/// Saves archives into a local directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    output_dir: PathBuf,
}

impl DirectorySink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl ArchiveSink for DirectorySink {
    async fn deliver(&self, archive_name: &str, content: Vec<u8>) -> std::io::Result<PathBuf> {
        if !self.output_dir.exists() {
            tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
                error!(error = ?e, path = %self.output_dir.display(), "Failed to create output directory");
                e
            })?;
            debug!(path = %self.output_dir.display(), "Created output directory");
        }

        let path = self.output_dir.join(archive_name);
        let size = content.len();
        tokio::fs::write(&path, content).await.map_err(|e| {
            error!(error = ?e, path = %path.display(), "Failed to write archive");
            e
        })?;
        info!(path = %path.display(), size, "Archive written");
        Ok(path)
    }
}
