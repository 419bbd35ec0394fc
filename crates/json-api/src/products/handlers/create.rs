//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::products::data::NewProduct;

use crate::{
    extensions::*, products::errors::into_status_error, responses::MessageResponse, state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    /// Must be greater than zero
    pub price: Option<f64>,

    /// Must not be negative
    pub quantity: Option<i32>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            name: request.name,
            description: request.description,
            category: request.category,
            price: request.price,
            quantity: request.quantity,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "products.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let id = state
        .app
        .products
        .create_product(json.into_inner().into())
        .await
        .map_err(into_status_error)?
        .id;

    res.add_header(LOCATION, format!("/products/{id}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(MessageResponse::new("Product created successfully!")))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        products::{MockProductsService, ProductsServiceError},
        validation::Validate,
    };

    use crate::test_helpers::products_service;

    use super::{super::tests::make_product, *};

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").post(handler))
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| {
                *new == NewProduct {
                    name: "Kettle".to_string(),
                    description: "Boils water".to_string(),
                    category: "Kitchen".to_string(),
                    price: Some(24.99),
                    quantity: Some(10),
                }
            })
            .return_once(|_| Ok(make_product(9, "Kettle", "Kitchen")));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Kettle",
                "description": "Boils water",
                "category": "Kitchen",
                "price": 24.99,
                "quantity": 10
            }))
            .send(&make_service(products))
            .await;

        let body: MessageResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/products/9"));
        assert_eq!(body.message, "Product created successfully!");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_missing_price_returns_400() -> TestResult {
        let invalid = NewProduct {
            name: "Kettle".to_string(),
            description: "Boils water".to_string(),
            category: "Kitchen".to_string(),
            price: None,
            quantity: Some(1),
        };
        let errors = invalid.validate().err().ok_or("price is required")?;

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(move |new| *new == invalid)
            .return_once(move |_| Err(ProductsServiceError::Validation(errors)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Kettle",
                "description": "Boils water",
                "category": "Kitchen",
                "quantity": 1
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(res.take_string().await?.contains("price is required"));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_wrong_type_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Kettle", "price": "cheap" }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
