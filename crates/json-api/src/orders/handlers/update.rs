//! Update Order Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use storefront_app::orders::records::OrderId;

use crate::{
    extensions::*,
    orders::{create::OrderRequest, errors::into_status_error},
    responses::MessageResponse,
    state::State,
};

/// Order Update Handler
///
/// The stored order date is kept whatever the payload says.
#[endpoint(
    tags("orders"),
    summary = "Update Order",
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update",
    skip(id, json, depot),
    fields(order_id = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<OrderRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order: OrderId = id.into_id("Invalid order ID")?;
    let payload = json.into_inner().into_new_order()?;

    let span = tracing::Span::current();

    span.record("order_id", tracing::field::display(order));
    span.record("status", payload.status.as_str());

    state
        .app
        .orders
        .update_order(order, payload)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("Order updated successfully!")))
}
