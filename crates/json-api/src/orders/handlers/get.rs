//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::orders::records::{OrderId, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub id: i64,

    /// The user who placed the order
    pub user_id: i64,

    /// Ordered products, in the order they were submitted
    pub product_ids: Vec<i64>,

    pub total_price: f64,

    pub status: String,

    /// The date and time the order was placed
    pub order_date: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            id: order.id.into_i64(),
            user_id: order.user_id.into_i64(),
            product_ids: order.product_ids.into_iter().map(Into::into).collect(),
            total_price: order.total_price,
            status: order.status,
            order_date: order.order_date.to_string(),
        }
    }
}

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order ID"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order: OrderId = id.into_id("Invalid order ID")?;

    let order = state
        .app
        .orders
        .get_order(order)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
