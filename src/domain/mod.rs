//! Core domain layer. No external I/O dependencies.
//!
//! Entities, parsers and classification rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod grid;
pub mod slots;
pub mod weeks;

pub use entities::{
    AnnotatedGrid, CellAnnotation, CellId, ColorConfig, CourseRecord, GridStats, SlotOccupation,
    WeekCategory,
};
pub use errors::DomainError;
pub use grid::annotate;
pub use slots::parse_slots;
pub use weeks::{classify, extract_weeks, WeekSet};
