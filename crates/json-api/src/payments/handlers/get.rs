//! Get Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::payments::records::{PaymentId, PaymentRecord};

use crate::{extensions::*, payments::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResponse {
    /// The unique identifier of the payment
    pub id: i64,

    pub user_id: i64,

    pub order_id: i64,

    pub amount: f64,

    /// Status reported by the payment gateway
    pub payment_status: String,

    /// The date and time the payment was recorded
    pub created_at: String,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(payment: PaymentRecord) -> Self {
        PaymentResponse {
            id: payment.id.into_i64(),
            user_id: payment.user_id.into_i64(),
            order_id: payment.order_id.into_i64(),
            amount: payment.amount,
            payment_status: payment.payment_status,
            created_at: payment.created_at.to_string(),
        }
    }
}

/// Get Payment Handler
#[endpoint(
    tags("payments"),
    summary = "Get Payment",
    responses(
        (status_code = StatusCode::OK, description = "Payment found"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payment ID"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let payment: PaymentId = id.into_id("Invalid payment ID")?;

    let payment = state
        .app
        .payments
        .get_payment(payment)
        .await
        .map_err(into_status_error)?;

    Ok(Json(payment.into()))
}
