//! Delete Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::orders::records::OrderId;

use crate::{
    extensions::*, orders::errors::into_status_error, responses::MessageResponse, state::State,
};

/// Delete Order Handler
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    responses(
        (status_code = StatusCode::OK, description = "Order deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order ID"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "orders.delete", skip(id, depot), err)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order: OrderId = id.into_id("Invalid order ID")?;

    state
        .app
        .orders
        .delete_order(order)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("Order deleted successfully!")))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::orders_service;

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{id}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_order_success() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .withf(|order| *order == OrderId::from_i64(6))
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete("http://example.com/orders/6")
            .send(&make_service(orders))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Order deleted successfully!");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let mut res = TestClient::delete("http://example.com/orders/6")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(res.take_string().await?.contains("Order not found"));

        Ok(())
    }
}
