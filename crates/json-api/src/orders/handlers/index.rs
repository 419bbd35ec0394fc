//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::orders::records::OrderRecord;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    responses::MessageResponse,
    state::State,
};

/// Either the matching orders or, when there are none, an explanation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum OrdersResponse {
    Orders(Vec<OrderResponse>),
    Message(MessageResponse),
}

impl OrdersResponse {
    pub(crate) fn from_records(orders: Vec<OrderRecord>, when_empty: &str) -> Self {
        if orders.is_empty() {
            return Self::Message(MessageResponse::new(when_empty));
        }

        Self::Orders(orders.into_iter().map(Into::into).collect())
    }
}

/// Order Index Handler
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    responses(
        (status_code = StatusCode::OK, description = "Orders, or a message when there are none"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse::from_records(orders, "No orders found")))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use storefront_app::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{orders_service, storage_error};

    use super::{super::tests::make_order, *};

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_index_empty_returns_message() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().once().return_once(|| Ok(vec![]));

        let mut res = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body, serde_json::json!({ "message": "No orders found" }));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_orders_array() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .return_once(|| Ok(vec![make_order(1, 1, "new"), make_order(2, 1, "paid")]));

        let mut res = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        let body: Vec<OrderResponse> = res.take_json().await?;
        let statuses: Vec<&str> = body.iter().map(|order| order.status.as_str()).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(statuses, vec!["new", "paid"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .return_once(|| Err(OrdersServiceError::Sql(storage_error())));

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
