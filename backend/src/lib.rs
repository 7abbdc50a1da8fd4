//! Backend library for the Ecopoint collection-point registry.
//!
//! Modules follow a hexagonal layout: `domain` holds entities and ports,
//! `inbound` exposes the HTTP adapter, and `outbound` provides the
//! PostgreSQL persistence adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Request-tracing middleware attached to every HTTP app instance.
pub use middleware::trace::Trace;
