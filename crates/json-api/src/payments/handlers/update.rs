//! Update Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::{
    orders::records::OrderId,
    payments::{data::PaymentUpdate, records::PaymentId},
    users::records::UserId,
};

use crate::{
    extensions::*,
    payments::{errors::into_status_error, get::PaymentResponse},
    state::State,
};

/// Update Payment Request
///
/// Only the fields present are written.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePaymentRequest {
    pub user_id: Option<i64>,
    pub order_id: Option<i64>,
    pub amount: Option<f64>,
    pub payment_status: Option<String>,
}

impl From<UpdatePaymentRequest> for PaymentUpdate {
    fn from(request: UpdatePaymentRequest) -> Self {
        PaymentUpdate {
            user_id: request.user_id.map(UserId::from_i64),
            order_id: request.order_id.map(OrderId::from_i64),
            amount: request.amount,
            payment_status: request.payment_status,
        }
    }
}

/// Payment Update Handler
#[endpoint(
    tags("payments"),
    summary = "Update Payment",
    responses(
        (status_code = StatusCode::OK, description = "Payment updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "payments.update",
    skip(id, json, depot),
    fields(payment_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<UpdatePaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let payment: PaymentId = id.into_id("Invalid payment ID")?;

    tracing::Span::current().record("payment_id", tracing::field::display(payment));

    let payment = state
        .app
        .payments
        .update_payment(payment, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(payment.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::payments::{MockPaymentsService, PaymentsServiceError};

    use crate::test_helpers::payments_service;

    use super::{super::tests::make_payment, *};

    fn make_service(payments: MockPaymentsService) -> Service {
        payments_service(payments, Router::with_path("payments/{id}").put(handler))
    }

    #[tokio::test]
    async fn test_update_payment_returns_updated_record() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_update_payment()
            .once()
            .withf(|payment, update| {
                *payment == PaymentId::from_i64(4)
                    && *update
                        == PaymentUpdate {
                            payment_status: Some("refunded".to_string()),
                            ..PaymentUpdate::default()
                        }
            })
            .return_once(|_, _| Ok(make_payment(4, 2, "refunded")));

        let mut res = TestClient::put("http://example.com/payments/4")
            .json(&json!({ "payment_status": "refunded" }))
            .send(&make_service(payments))
            .await;

        let body: PaymentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.payment_status, "refunded");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_payment_returns_404() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_update_payment()
            .once()
            .return_once(|_, _| Err(PaymentsServiceError::NotFound));

        let res = TestClient::put("http://example.com/payments/4")
            .json(&json!({ "amount": 12.5 }))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
