//! Implements ColorStore using a JSON file.
//!
//! Stored as the legacy category-key map (`week-1-8`, ...); a missing or
//! partial file degrades to defaults instead of erroring.

use crate::domain::{ColorConfig, DomainError};
use crate::ports::ColorStore;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// JSON file-based color preference storage.
pub struct ColorStoreJson {
    path: std::path::PathBuf,
}

impl ColorStoreJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl ColorStore for ColorStoreJson {
    async fn load(&self) -> Result<ColorConfig, DomainError> {
        match fs::read_to_string(&self.path).await {
            Ok(s) => match serde_json::from_str::<ColorConfig>(&s) {
                Ok(partial) => Ok(ColorConfig::merged_over_defaults(partial)),
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "corrupt color config, using defaults");
                    Ok(ColorConfig::default())
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ColorConfig::default()),
            Err(e) => Err(DomainError::ColorStore(e.to_string())),
        }
    }

    async fn save(&self, colors: &ColorConfig) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(colors)
            .map_err(|e| DomainError::ColorStore(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::ColorStore(format!("create config dir: {e}")))?;
        }

        // Same write-replace pattern as the course cache.
        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::ColorStore(format!("create temp file: {e}")))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::ColorStore(format!("write temp file: {e}")))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::ColorStore(format!("sync temp file: {e}")))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::ColorStore(format!("atomic rename failed: {e}")))?;

        info!(path = %self.path.display(), "saved color preferences");
        Ok(())
    }
}
