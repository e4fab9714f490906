//! Implements CourseCache using a JSON file.
//!
//! Keeps the last fetched course list plus its fetch timestamp, so annotation
//! can re-run offline.

use crate::domain::{CourseRecord, DomainError};
use crate::ports::CourseCache;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheData {
    fetched_at: Option<DateTime<Utc>>,
    courses: Vec<CourseRecord>,
}

/// JSON file-based course cache.
pub struct CourseCacheJson {
    path: std::path::PathBuf,
}

impl CourseCacheJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Atomic save using the write-replace pattern:
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Atomic rename to target path
    async fn write_atomic(&self, data: &CacheData) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| DomainError::Cache(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Cache(format!("create cache dir: {e}")))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Cache(format!("create temp file: {e}")))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Cache(format!("write temp file: {e}")))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Cache(format!("sync temp file: {e}")))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Cache(format!("atomic rename failed: {e}")))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl CourseCache for CourseCacheJson {
    async fn load(&self) -> Result<Vec<CourseRecord>, DomainError> {
        let data: CacheData = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "corrupt course cache, treating as empty");
                CacheData::default()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => CacheData::default(),
            Err(e) => return Err(DomainError::Cache(e.to_string())),
        };
        Ok(data.courses)
    }

    async fn save(&self, courses: &[CourseRecord]) -> Result<(), DomainError> {
        let data = CacheData {
            fetched_at: Some(Utc::now()),
            courses: courses.to_vec(),
        };
        self.write_atomic(&data).await?;
        info!(
            path = %self.path.display(),
            count = courses.len(),
            "cached course data"
        );
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                info!(path = %self.path.display(), "cleared course cache");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Cache(e.to_string())),
        }
    }
}
