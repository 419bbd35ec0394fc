//! User Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse},
};

/// User Index Handler
///
/// Returns every user. An empty store is reported as not found.
#[endpoint(
    tags("users"),
    summary = "List Users",
    responses(
        (status_code = StatusCode::OK, description = "Users found"),
        (status_code = StatusCode::NOT_FOUND, description = "Users not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .users
        .list_users()
        .await
        .map_err(into_status_error)?;

    if users.is_empty() {
        return Err(StatusError::not_found().brief("Users not found"));
    }

    Ok(Json(users.into_iter().map(Into::into).collect()))
}
