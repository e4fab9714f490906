//! Infrastructure adapters. Implement outbound ports.
//!
//! jwxt backend, filesystem, terminal UI. Map errors to DomainError.

pub mod jwxt;
pub mod persistence;
pub mod ui;
