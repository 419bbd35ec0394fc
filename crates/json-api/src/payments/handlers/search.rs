//! Payment Search Handlers

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use storefront_app::{orders::records::OrderId, users::records::UserId};

use crate::{
    extensions::*,
    payments::{errors::into_status_error, get::PaymentResponse},
    state::State,
};

/// Search Payments By Status
#[endpoint(tags("payments"), summary = "Search Payments By Status")]
pub(crate) async fn by_status(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<PaymentResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let payments = state
        .app
        .payments
        .search_payments_by_status(&status.into_inner().unwrap_or_default())
        .await
        .map_err(into_status_error)?;

    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// Search Payments By User
#[endpoint(
    tags("payments"),
    summary = "Search Payments By User",
    responses(
        (status_code = StatusCode::OK, description = "Payments made by the user"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid user ID"),
    ),
)]
pub(crate) async fn by_user(
    user_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Vec<PaymentResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user: UserId = user_id.into_id("Invalid user ID")?;

    let payments = state
        .app
        .payments
        .search_payments_by_user(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// Search Payments By Order
#[endpoint(
    tags("payments"),
    summary = "Search Payments By Order",
    responses(
        (status_code = StatusCode::OK, description = "Payments made for the order"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order ID"),
    ),
)]
pub(crate) async fn by_order(
    order_id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Vec<PaymentResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order: OrderId = order_id.into_id("Invalid order ID")?;

    let payments = state
        .app
        .payments
        .search_payments_by_order(order)
        .await
        .map_err(into_status_error)?;

    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::payments::MockPaymentsService;

    use crate::test_helpers::payments_service;

    use super::{super::tests::make_payment, *};

    fn make_service(payments: MockPaymentsService) -> Service {
        payments_service(
            payments,
            Router::with_path("payments/search")
                .get(by_status)
                .push(Router::with_path("user/{user_id}").get(by_user))
                .push(Router::with_path("{order_id}").get(by_order)),
        )
    }

    #[tokio::test]
    async fn test_search_by_user_routes_before_order() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_search_payments_by_user()
            .once()
            .withf(|user| *user == UserId::from_i64(1))
            .return_once(|_| Ok(vec![make_payment(1, 3, "approved")]));

        payments.expect_search_payments_by_order().never();

        let mut res = TestClient::get("http://example.com/payments/search/user/1")
            .send(&make_service(payments))
            .await;

        let body: Vec<PaymentResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 1, "expected one payment");

        Ok(())
    }

    #[tokio::test]
    async fn test_search_by_order_forwards_id() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_search_payments_by_order()
            .once()
            .withf(|order| *order == OrderId::from_i64(3))
            .return_once(|_| Ok(vec![]));

        let mut res = TestClient::get("http://example.com/payments/search/3")
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "[]");

        Ok(())
    }

    #[tokio::test]
    async fn test_search_by_status_forwards_term() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_search_payments_by_status()
            .once()
            .withf(|status| status == "approved")
            .return_once(|_| Ok(vec![make_payment(1, 3, "approved")]));

        let res = TestClient::get("http://example.com/payments/search?status=approved")
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_search_by_invalid_order_returns_400() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments.expect_search_payments_by_order().never();

        let res = TestClient::get("http://example.com/payments/search/abc")
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
