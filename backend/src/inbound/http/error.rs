//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and
//! status codes. Repository failures are mapped here as well so handlers can
//! use `?` throughout.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::ports::{ItemRepositoryError, PointRepositoryError};
use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        // Missing points are reported as a client error with a fixed
        // message; that shape is the published wire contract.
        ErrorCode::NotFound => StatusCode::BAD_REQUEST,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl From<ItemRepositoryError> for Error {
    fn from(err: ItemRepositoryError) -> Self {
        // Do not leak driver details to clients.
        error!(error = %err, "item repository failure promoted to domain error");
        match err {
            ItemRepositoryError::Connection { .. } => {
                Error::service_unavailable("Storage unavailable.")
            }
            ItemRepositoryError::Query { .. } => Error::internal("Internal server error."),
        }
    }
}

impl From<PointRepositoryError> for Error {
    fn from(err: PointRepositoryError) -> Self {
        error!(error = %err, "point repository failure promoted to domain error");
        match err {
            PointRepositoryError::Connection { .. } => {
                Error::service_unavailable("Storage unavailable.")
            }
            PointRepositoryError::Query { .. } => Error::internal("Internal server error."),
        }
    }
}
