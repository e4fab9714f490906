//! Sample course source for running without a jwxt session.
//!
//! Returns a fixed demo schedule covering every week category, so the grid,
//! legend and stats can be exercised end to end.

use crate::domain::{CourseRecord, DomainError};
use crate::ports::CourseSource;
use std::time::Duration;
use tracing::info;

/// Offline course source with predetermined records.
///
/// Used when no jwxt session is configured. Simulates network latency with a
/// configurable delay.
pub struct SampleCourseSource {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl SampleCourseSource {
    /// Create a sample source with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create a sample source with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    fn records() -> Vec<CourseRecord> {
        vec![
            CourseRecord::new("高等数学A", "星期一第1-2节{1-8周}<br/>星期三第1-2节{1-8周}"),
            CourseRecord::new("大学物理", "星期一第1-2节{9-16周}"),
            CourseRecord::new("大学英语", "星期二第3-4节{1-16周}"),
            CourseRecord::new("体育", "星期四第5-6节{2周,6周,10周,14周}"),
            CourseRecord::new("程序设计", "星期五第7-8节{9-16周}"),
            CourseRecord::new("专业研讨", "星期五第9-10节"),
        ]
    }
}

impl Default for SampleCourseSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CourseSource for SampleCourseSource {
    async fn fetch_courses(&self) -> Result<Vec<CourseRecord>, DomainError> {
        info!("[SAMPLE] serving demo course records");
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        Ok(Self::records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{self, ColorConfig, WeekCategory};

    #[tokio::test]
    async fn test_sample_source() {
        let source = SampleCourseSource::with_delay(10);
        let courses = source.fetch_courses().await.unwrap();
        assert_eq!(courses.len(), 6);

        // The demo schedule exercises every category.
        let grid = domain::annotate(&courses, &ColorConfig::default());
        for category in WeekCategory::ALL {
            assert!(grid.stats.count(category) > 0, "missing {category}");
        }
    }
}
