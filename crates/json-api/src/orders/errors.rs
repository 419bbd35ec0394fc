//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Validation(errors) => {
            StatusError::bad_request().brief(errors.to_string())
        }
        OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order payload"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::UserNotFound => StatusError::not_found().brief("User not found"),
        OrdersServiceError::ProductNotFound(product) => {
            StatusError::not_found().brief(format!("Product with ID {product} not found"))
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
