//! Product Search Handlers

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Search Products By Name
///
/// Case-insensitive substring match; an empty array when nothing matches.
#[endpoint(tags("products"), summary = "Search Products By Name")]
pub(crate) async fn by_name(
    name: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .search_products_by_name(&name.into_inner().unwrap_or_default())
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Search Products By Category
///
/// Case-insensitive substring match; an empty array when nothing matches.
#[endpoint(tags("products"), summary = "Search Products By Category")]
pub(crate) async fn by_category(
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .search_products_by_category(&category.into_inner().unwrap_or_default())
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
