//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{domain::products::records::ProductId, validation::ValidationErrors};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("invalid order payload: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("order not found")]
    NotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("product with id {0} not found")]
    ProductNotFound(ProductId),

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
