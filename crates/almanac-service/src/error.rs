use salvo::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    StoreError(#[from] StoreError),

    #[error(transparent)]
    RfcError(#[from] almanac_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] almanac_core::error::CoreError),

    /// The path matches no known resource shape.
    #[error("No resource at address: {0}")]
    AddressNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed on {0}")]
    MethodNotAllowed(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ServiceError {
    /// Maps the error to the status code sent to the client.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AddressNotFound(_)
            | Self::NotFound(_)
            | Self::StoreError(StoreError::CollectionNotFound(_)) => StatusCode::NOT_FOUND,
            Self::RfcError(almanac_rfc::error::RfcError::XmlWrite(_)) | Self::StoreError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
            Self::BadRequest(_) | Self::RfcError(_) | Self::CoreError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
