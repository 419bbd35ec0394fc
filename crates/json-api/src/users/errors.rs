//! User Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::Validation(errors) => StatusError::bad_request().brief(errors.to_string()),
        UsersServiceError::Conflict => StatusError::bad_request().brief("Email already exists"),
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::InvalidData => StatusError::bad_request().brief("Invalid user payload"),
        UsersServiceError::Sql(source) => {
            error!("user storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
