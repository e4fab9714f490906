//! week-tint: Tint a weekly course-schedule grid by week pattern, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
