//! Port for creating and reading collection points.

use async_trait::async_trait;

use crate::domain::{Item, NewPoint, Point};

/// Errors raised by point repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointRepositoryError {
    /// Repository connection could not be established.
    #[error("point repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("point repository query failed: {message}")]
    Query { message: String },
}

impl PointRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for the point store.
///
/// `create` must persist the point row and all of its item associations in
/// one transaction: either everything commits or nothing is observable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointRepository: Send + Sync {
    /// Persist a new point and its item associations atomically, returning
    /// the created point with its generated identifier.
    async fn create(&self, draft: NewPoint) -> Result<Point, PointRepositoryError>;

    /// Look up a point and the items associated with it. Returns `None` when
    /// the identifier does not exist.
    async fn find_with_items(
        &self,
        id: i32,
    ) -> Result<Option<(Point, Vec<Item>)>, PointRepositoryError>;
}

/// Fixture implementation for tests that do not exercise point persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePointRepository;

#[async_trait]
impl PointRepository for FixturePointRepository {
    async fn create(&self, draft: NewPoint) -> Result<Point, PointRepositoryError> {
        Ok(draft.into_point(1))
    }

    async fn find_with_items(
        &self,
        _id: i32,
    ) -> Result<Option<(Point, Vec<Item>)>, PointRepositoryError> {
        Ok(None)
    }
}
