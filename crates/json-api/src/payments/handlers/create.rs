//! Create Payment Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::{
    orders::records::OrderId, payments::data::NewPayment, users::records::UserId,
};

use crate::{
    extensions::*,
    payments::{errors::into_status_error, get::PaymentResponse},
    state::State,
};

/// Create Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePaymentRequest {
    pub user_id: i64,

    pub order_id: i64,

    pub amount: f64,

    /// Ignored. The gateway's status is stored instead.
    pub payment_status: Option<String>,
}

impl From<CreatePaymentRequest> for NewPayment {
    fn from(request: CreatePaymentRequest) -> Self {
        NewPayment {
            user_id: UserId::from_i64(request.user_id),
            order_id: OrderId::from_i64(request.order_id),
            amount: request.amount,
        }
    }
}

/// Create Payment Handler
///
/// Charges the order through the payment gateway and records the result.
#[endpoint(
    tags("payments"),
    summary = "Create Payment",
    responses(
        (status_code = StatusCode::CREATED, description = "Payment charged and recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Gateway, encryption or storage failure"),
    ),
)]
#[tracing::instrument(
    name = "payments.create",
    skip(json, depot, res),
    fields(order_id = tracing::field::Empty, amount = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePaymentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("order_id", request.order_id);
    span.record("amount", request.amount);

    let payment = state
        .app
        .payments
        .create_payment(request.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/payments/{}", payment.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(payment.into()))
}
