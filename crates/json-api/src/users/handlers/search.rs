//! User Search Handlers

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse},
};

/// Search Users By Name
///
/// Case-sensitive substring match. No matches is reported as not found.
#[endpoint(
    tags("users"),
    summary = "Search Users By Name",
    responses(
        (status_code = StatusCode::OK, description = "Users found"),
        (status_code = StatusCode::NOT_FOUND, description = "Users not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn by_name(
    name: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let name = name.into_inner().unwrap_or_default();

    let users = state
        .app
        .users
        .search_users_by_name(&name)
        .await
        .map_err(into_status_error)?;

    if users.is_empty() {
        return Err(StatusError::not_found().brief("Users not found"));
    }

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Find User By Email
#[endpoint(
    tags("users"),
    summary = "Find User By Email",
    responses(
        (status_code = StatusCode::OK, description = "User found"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn by_email(
    email: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .find_user_by_email(&email.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
