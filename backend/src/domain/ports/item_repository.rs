//! Port for reading the item catalog.

use async_trait::async_trait;

use crate::domain::Item;

/// Errors raised by item repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemRepositoryError {
    /// Repository connection could not be established.
    #[error("item repository connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("item repository query failed: {message}")]
    Query { message: String },
}

impl ItemRepositoryError {
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

/// Port for listing all catalog items. No pagination, no filtering.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Read every item row.
    async fn list(&self) -> Result<Vec<Item>, ItemRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureItemRepository;

#[async_trait]
impl ItemRepository for FixtureItemRepository {
    async fn list(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        Ok(Vec::new())
    }
}
