//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::{
    orders::data::NewOrder, products::records::ProductId, users::records::UserId,
};

use crate::{
    extensions::*, orders::errors::into_status_error, responses::MessageResponse, state::State,
};

/// Order Request
///
/// Used to place an order and to replace one. `order_date` is ignored on
/// update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderRequest {
    pub user_id: Option<i64>,

    #[serde(default)]
    pub product_ids: Vec<i64>,

    pub total_price: Option<f64>,

    #[serde(default)]
    pub status: String,

    /// RFC 3339 timestamp; defaults to now
    pub order_date: Option<String>,
}

impl OrderRequest {
    pub(crate) fn into_new_order(self) -> Result<NewOrder, StatusError> {
        Ok(NewOrder {
            order_date: self.order_date.into_timestamp("order_date")?,
            user_id: self.user_id.map(UserId::from_i64),
            product_ids: self.product_ids.into_iter().map(ProductId::from_i64).collect(),
            total_price: self.total_price,
            status: self.status,
        })
    }
}

/// Create Order Handler
///
/// The user and every product must exist; the first missing product is
/// reported by id.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "User or product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(user_id = tracing::field::Empty, products_count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<OrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = json.into_inner().into_new_order()?;

    let span = tracing::Span::current();

    if let Some(user) = order.user_id {
        span.record("user_id", tracing::field::display(user));
    }

    span.record("products_count", order.product_ids.len());

    let id = state
        .app
        .orders
        .create_order(order)
        .await
        .map_err(into_status_error)?
        .id;

    res.add_header(LOCATION, format!("/orders/{id}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(order_id = %id, "created order");

    Ok(Json(MessageResponse::new("Order created successfully!")))
}
