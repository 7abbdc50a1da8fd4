//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O. The store handle is
//! constructed explicitly at startup and passed down; nothing here is
//! process-global.

use std::sync::Arc;

use crate::domain::ports::{ItemRepository, PointRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Catalog read port.
    pub items: Arc<dyn ItemRepository>,
    /// Point store port.
    pub points: Arc<dyn PointRepository>,
    /// Base URL prepended to stored image filenames, ending in a slash.
    pub uploads_base: Arc<str>,
}

impl HttpState {
    /// Construct state from port implementations and the uploads base URL.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{FixtureItemRepository, FixturePointRepository};
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureItemRepository),
    ///     Arc::new(FixturePointRepository),
    ///     "http://localhost:3333/uploads/",
    /// );
    /// let _items = state.items.clone();
    /// ```
    pub fn new(
        items: Arc<dyn ItemRepository>,
        points: Arc<dyn PointRepository>,
        uploads_base: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            items,
            points,
            uploads_base: uploads_base.into(),
        }
    }
}
