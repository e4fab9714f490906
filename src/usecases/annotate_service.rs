//! Classify-and-annotate flow: fetch (or load cached) courses -> pure
//! annotation pass -> render.
//!
//! The service is the explicit, idempotent entry point around the pure core:
//! it decides nothing about *when* to run — the UI (or any other trigger)
//! calls it, and re-running on unchanged input yields the same grid.

use crate::domain::{self, ColorConfig, CourseRecord, DomainError};
use crate::ports::{CourseCache, CourseSource, GridRenderer};
use std::sync::Arc;
use tracing::{info, warn};

/// Annotate service. Coordinates source, cache and renderer around the core.
pub struct AnnotateService {
    source: Arc<dyn CourseSource>,
    cache: Arc<dyn CourseCache>,
    renderer: Arc<dyn GridRenderer>,
}

impl AnnotateService {
    pub fn new(
        source: Arc<dyn CourseSource>,
        cache: Arc<dyn CourseCache>,
        renderer: Arc<dyn GridRenderer>,
    ) -> Self {
        Self {
            source,
            cache,
            renderer,
        }
    }

    /// Fetch fresh course data, cache it, annotate and render.
    pub async fn refresh_and_annotate(
        &self,
        colors: &ColorConfig,
    ) -> Result<AnnotateOutcome, DomainError> {
        let courses = self.source.fetch_courses().await?;
        if courses.is_empty() {
            warn!("course source returned no records");
        } else {
            self.cache.save(&courses).await?;
        }
        self.annotate_and_render(&courses, colors)
    }

    /// Annotate and render from the local cache, without touching the source.
    pub async fn annotate_cached(
        &self,
        colors: &ColorConfig,
    ) -> Result<AnnotateOutcome, DomainError> {
        let courses = self.cache.load().await?;
        self.annotate_and_render(&courses, colors)
    }

    /// Drop the cached course data.
    pub async fn clear_cache(&self) -> Result<(), DomainError> {
        self.cache.clear().await
    }

    fn annotate_and_render(
        &self,
        courses: &[CourseRecord],
        colors: &ColorConfig,
    ) -> Result<AnnotateOutcome, DomainError> {
        let grid = domain::annotate(courses, colors);
        info!(
            courses = courses.len(),
            cells = grid.stats.total,
            "annotated schedule grid"
        );
        self.renderer.render(&grid, colors)?;
        Ok(AnnotateOutcome {
            courses: courses.len(),
            cells: grid.stats.total,
        })
    }
}

/// Result of a single annotation pass.
#[derive(Debug, Default)]
pub struct AnnotateOutcome {
    pub courses: usize,
    pub cells: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnnotatedGrid;
    use std::sync::Mutex;

    struct FixedSource(Vec<CourseRecord>);

    #[async_trait::async_trait]
    impl CourseSource for FixedSource {
        async fn fetch_courses(&self) -> Result<Vec<CourseRecord>, DomainError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct MemoryCache(Mutex<Vec<CourseRecord>>);

    #[async_trait::async_trait]
    impl CourseCache for MemoryCache {
        async fn load(&self) -> Result<Vec<CourseRecord>, DomainError> {
            Ok(self.0.lock().unwrap().clone())
        }
        async fn save(&self, courses: &[CourseRecord]) -> Result<(), DomainError> {
            *self.0.lock().unwrap() = courses.to_vec();
            Ok(())
        }
        async fn clear(&self) -> Result<(), DomainError> {
            self.0.lock().unwrap().clear();
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingRenderer(Mutex<Vec<usize>>);

    impl GridRenderer for CountingRenderer {
        fn render(&self, grid: &AnnotatedGrid, _colors: &ColorConfig) -> Result<(), DomainError> {
            self.0.lock().unwrap().push(grid.stats.total);
            Ok(())
        }
    }

    fn service_with(
        courses: Vec<CourseRecord>,
    ) -> (AnnotateService, Arc<MemoryCache>, Arc<CountingRenderer>) {
        let cache = Arc::new(MemoryCache::default());
        let renderer = Arc::new(CountingRenderer::default());
        let service = AnnotateService::new(
            Arc::new(FixedSource(courses)),
            Arc::clone(&cache) as Arc<dyn CourseCache>,
            Arc::clone(&renderer) as Arc<dyn GridRenderer>,
        );
        (service, cache, renderer)
    }

    #[tokio::test]
    async fn refresh_caches_and_renders() {
        let courses = vec![CourseRecord::new("A", "星期一第1-2节{1-8周}")];
        let (service, cache, renderer) = service_with(courses);

        let outcome = service
            .refresh_and_annotate(&ColorConfig::default())
            .await
            .unwrap();

        assert_eq!(outcome.courses, 1);
        assert_eq!(outcome.cells, 2);
        assert_eq!(cache.load().await.unwrap().len(), 1);
        assert_eq!(renderer.0.lock().unwrap().as_slice(), &[2]);
    }

    #[tokio::test]
    async fn empty_fetch_does_not_overwrite_cache() {
        let (service, cache, _renderer) = service_with(vec![]);
        cache
            .save(&[CourseRecord::new("Kept", "星期二第1-1节{1-8周}")])
            .await
            .unwrap();

        let outcome = service
            .refresh_and_annotate(&ColorConfig::default())
            .await
            .unwrap();

        assert_eq!(outcome.courses, 0);
        assert_eq!(cache.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cached_pass_renders_same_grid() {
        let courses = vec![CourseRecord::new("A", "星期一第1-2节{1-8周}")];
        let (service, _cache, renderer) = service_with(courses);
        let colors = ColorConfig::default();

        service.refresh_and_annotate(&colors).await.unwrap();
        let cached = service.annotate_cached(&colors).await.unwrap();

        assert_eq!(cached.cells, 2);
        assert_eq!(renderer.0.lock().unwrap().as_slice(), &[2, 2]);
    }
}
