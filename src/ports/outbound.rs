//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters. These are the external collaborators of the
//! classification core: where course data comes from, where preferences live,
//! and where the annotated grid goes.

use crate::domain::{AnnotatedGrid, ColorConfig, CourseRecord, DomainError};

/// Scheduling-backend gateway. Fetches the current term's selected courses.
#[async_trait::async_trait]
pub trait CourseSource: Send + Sync {
    /// Fetch all course records (title + raw meeting text). Records without a
    /// usable title or meeting text are already filtered out.
    async fn fetch_courses(&self) -> Result<Vec<CourseRecord>, DomainError>;
}

/// Local cache of fetched course data, so annotation can re-run offline.
#[async_trait::async_trait]
pub trait CourseCache: Send + Sync {
    /// Load cached records. Returns an empty list when no cache exists.
    async fn load(&self) -> Result<Vec<CourseRecord>, DomainError>;

    /// Replace the cache with a fresh fetch.
    async fn save(&self, courses: &[CourseRecord]) -> Result<(), DomainError>;

    /// Drop the cached data.
    async fn clear(&self) -> Result<(), DomainError>;
}

/// Persisted color preferences. Load merges stored entries over defaults.
#[async_trait::async_trait]
pub trait ColorStore: Send + Sync {
    async fn load(&self) -> Result<ColorConfig, DomainError>;

    async fn save(&self, colors: &ColorConfig) -> Result<(), DomainError>;
}

/// Rendering sink for one annotation pass. Synchronous: the terminal adapter
/// writes directly; nothing here suspends.
pub trait GridRenderer: Send + Sync {
    /// Render the annotated grid, a legend and the per-category stats.
    fn render(&self, grid: &AnnotatedGrid, colors: &ColorConfig) -> Result<(), DomainError>;
}
