//! Cell aggregator: course records -> annotated grid.
//!
//! Distributes each course over the cells its parsed slots occupy, unions the
//! week membership per cell, classifies once per cell and resolves the
//! configured color. Pure and idempotent; callers decide when to re-run it.

use crate::domain::entities::{
    AnnotatedGrid, CellAnnotation, CellId, ColorConfig, CourseRecord,
};
use crate::domain::{slots, weeks};
use std::collections::HashMap;

/// One classify-and-annotate pass over a fixed course list.
///
/// Courses with no parseable slots contribute to no cell. A cell's category
/// depends only on the union of its courses' week sets, so input order changes
/// at most the display order of `CellAnnotation::courses`.
pub fn annotate(courses: &[CourseRecord], colors: &ColorConfig) -> AnnotatedGrid {
    let mut buckets: HashMap<CellId, Vec<&CourseRecord>> = HashMap::new();

    for course in courses {
        for slot in slots::parse_slots(&course.meeting_text) {
            buckets.entry(slot.into()).or_default().push(course);
        }
    }

    let mut grid = AnnotatedGrid::default();
    for (cell, bucket) in buckets {
        let mut union = weeks::WeekSet::new();
        for course in &bucket {
            union.extend(weeks::extract_weeks(&course.meeting_text));
        }
        let category = weeks::classify(&union);
        grid.stats.record(category);

        // A course occupying several periods of the same block appears once
        // per cell; duplicate slot lines collapse here.
        let mut cell_courses: Vec<CourseRecord> = Vec::with_capacity(bucket.len());
        for course in bucket {
            if !cell_courses.iter().any(|c| c == course) {
                cell_courses.push(course.clone());
            }
        }

        grid.cells.insert(
            cell,
            CellAnnotation {
                courses: cell_courses,
                color: colors.resolve(category).to_string(),
                weeks: union,
                category,
            },
        );
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::WeekCategory;

    fn course(title: &str, meeting_text: &str) -> CourseRecord {
        CourseRecord::new(title, meeting_text)
    }

    #[test]
    fn end_to_end_shared_cell_unions_to_full_term() {
        let courses = vec![
            course("A", "星期一第1-2节{1-8周}"),
            course("B", "星期一第1-2节{9-16周}"),
        ];
        let grid = annotate(&courses, &ColorConfig::default());

        assert_eq!(grid.cells.len(), 2);
        for period in 1..=2 {
            let cell = &grid.cells[&CellId { day: 1, period }];
            assert_eq!(cell.courses.len(), 2);
            assert_eq!(cell.category, WeekCategory::FullTerm);
            assert_eq!(cell.color, "#e31212");
        }
        assert_eq!(grid.stats.count(WeekCategory::FullTerm), 2);
        assert_eq!(grid.stats.total, 2);
    }

    #[test]
    fn course_without_parseable_slots_contributes_nothing() {
        let courses = vec![course("C", "时间另行通知{1-8周}")];
        let grid = annotate(&courses, &ColorConfig::default());
        assert!(grid.cells.is_empty());
        assert_eq!(grid.stats.total, 0);
    }

    #[test]
    fn missing_week_info_classifies_unspecified() {
        let courses = vec![course("D", "星期五第7-8节")];
        let grid = annotate(&courses, &ColorConfig::default());
        let cell = &grid.cells[&CellId { day: 5, period: 7 }];
        assert_eq!(cell.category, WeekCategory::Unspecified);
        assert_eq!(cell.color, "#83fc0d");
    }

    #[test]
    fn annotation_is_idempotent() {
        let courses = vec![
            course("A", "星期一第1-2节{1-8周}"),
            course("B", "星期二第3-4节{2周,6周,10周}"),
        ];
        let colors = ColorConfig::default();
        let first = annotate(&courses, &colors);
        let second = annotate(&courses, &colors);

        assert_eq!(first.cells.len(), second.cells.len());
        for (cell, annotation) in &first.cells {
            let other = &second.cells[cell];
            assert_eq!(annotation.category, other.category);
            assert_eq!(annotation.color, other.color);
        }
    }

    #[test]
    fn category_is_order_independent() {
        let a = course("A", "星期一第1-2节{1-8周}");
        let b = course("B", "星期一第1-2节{9-16周}");
        let colors = ColorConfig::default();

        let forward = annotate(&[a.clone(), b.clone()], &colors);
        let reversed = annotate(&[b, a], &colors);

        for (cell, annotation) in &forward.cells {
            assert_eq!(annotation.category, reversed.cells[cell].category);
        }
    }

    #[test]
    fn multi_period_block_lists_course_once_per_cell() {
        let courses = vec![course("A", "星期四第1-3节{1-8周}")];
        let grid = annotate(&courses, &ColorConfig::default());
        assert_eq!(grid.cells.len(), 3);
        for annotation in grid.cells.values() {
            assert_eq!(annotation.courses.len(), 1);
        }
    }

    #[test]
    fn stats_count_cells_per_category() {
        let courses = vec![
            course("A", "星期一第1-1节{1-8周}"),
            course("B", "星期二第1-1节{9-16周}"),
            course("C", "星期三第1-1节{2周,6周}"),
        ];
        let grid = annotate(&courses, &ColorConfig::default());
        assert_eq!(grid.stats.count(WeekCategory::Weeks1to8), 1);
        assert_eq!(grid.stats.count(WeekCategory::Weeks9to16), 1);
        assert_eq!(grid.stats.count(WeekCategory::Irregular), 1);
        assert_eq!(grid.stats.total, 3);
    }
}
