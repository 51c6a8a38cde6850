//! Error type for the renderer's API boundary.
//!
//! Geometric degeneracies (parallel rays, grazing hits, total internal
//! reflection) are not errors; they are resolved where they occur. Only
//! malformed inputs handed to the renderer surface here.

use thiserror::Error;

/// Errors returned by scene construction and rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Cannot build a BVH from an empty primitive list")]
    EmptyScene,

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),
}

pub type RenderResult<T> = Result<T, RenderError>;
