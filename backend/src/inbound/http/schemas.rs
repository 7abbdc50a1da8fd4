//! OpenAPI schema wrappers for domain types.
//!
//! The domain error type stays decoupled from utoipa; this wrapper mirrors
//! its wire form for documentation purposes only.

use serde::Serialize;
use utoipa::ToSchema;

/// Wire form of a domain error.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorSchema {
    /// Human-readable failure description.
    #[schema(example = "Point not found.")]
    pub message: String,
}
