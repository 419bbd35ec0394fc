//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::payments::PaymentsServiceError;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::NotFound => StatusError::not_found().brief("Payment not found"),
        PaymentsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid payment payload")
        }
        token @ PaymentsServiceError::Token(_) => {
            error!("{token}");

            StatusError::internal_server_error().brief(token.to_string())
        }
        PaymentsServiceError::Encryption(source) => {
            error!("card data encryption failed: {source}");

            StatusError::internal_server_error().brief("Encryption failed")
        }
        PaymentsServiceError::Charge(source) => {
            error!("payment charge failed: {source}");

            StatusError::internal_server_error().brief("Failed to make payment")
        }
        PaymentsServiceError::Sql(source) => {
            error!("payment storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
