//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. The core pipeline itself
//! never fails: malformed meeting text degrades to empty contributions or the
//! default category, so only the collaborators (fetch, storage, UI) error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Course source error: {0}")]
    Source(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Color store error: {0}")]
    ColorStore(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("UI error: {0}")]
    Ui(String),
}
