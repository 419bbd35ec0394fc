//! Order Search Handlers

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use storefront_app::users::records::UserId;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, index::OrdersResponse},
    state::State,
};

/// Search Orders By Status
///
/// Exact match on the status text.
#[endpoint(
    tags("orders"),
    summary = "Search Orders By Status",
    responses(
        (status_code = StatusCode::OK, description = "Orders, or a message when there are none"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn by_status(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .search_orders_by_status(&status.into_inner().unwrap_or_default())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse::from_records(
        orders,
        "No orders found for the given status",
    )))
}

/// Search Orders By User
#[endpoint(
    tags("orders"),
    summary = "Search Orders By User",
    responses(
        (status_code = StatusCode::OK, description = "Orders, or a message when there are none"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid user ID"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn by_user(
    user: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user: UserId = user.into_id("Invalid user ID")?;

    let orders = state
        .app
        .orders
        .search_orders_by_user(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse::from_records(orders, "No orders found")))
}
