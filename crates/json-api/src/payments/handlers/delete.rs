//! Delete Payment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::payments::records::PaymentId;

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Delete Payment Handler
#[endpoint(
    tags("payments"),
    summary = "Delete Payment",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Payment deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payment ID"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "payments.delete", skip(id, depot), err)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let payment: PaymentId = id.into_id("Invalid payment ID")?;

    state
        .app
        .payments
        .delete_payment(payment)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
