//! Application use cases. Orchestrate domain logic via ports.

pub mod annotate_service;

pub use annotate_service::{AnnotateOutcome, AnnotateService};
