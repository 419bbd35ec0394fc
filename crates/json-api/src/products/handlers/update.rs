//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::products::{data::ProductUpdate, records::ProductId};

use crate::{
    extensions::*, products::errors::into_status_error, responses::MessageResponse, state::State,
};

/// Update Product Request
///
/// Only the fields present are written.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            category: request.category,
            price: request.price,
            quantity: request.quantity,
        }
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(id, json, depot),
    fields(
        product_id = tracing::field::Empty,
        price = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product: ProductId = id.into_id("Invalid product ID")?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("product_id", tracing::field::display(product));

    if let Some(price) = request.price {
        span.record("price", price);
    }

    if let Some(quantity) = request.quantity {
        span.record("quantity", quantity);
    }

    let updated = state
        .app
        .products
        .update_product(product, request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        product_id = %product,
        price = updated.price,
        quantity = updated.quantity,
        "updated product"
    );

    Ok(Json(MessageResponse::new("Product updated successfully!")))
}
