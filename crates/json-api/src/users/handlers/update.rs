//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::users::{data::UserUpdate, records::UserId};

use crate::{
    extensions::*, responses::MessageResponse, state::State, users::errors::into_status_error,
};

/// Update User Request
///
/// Only the fields present are written.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        UserUpdate {
            name: request.name,
            email: request.email,
            address: request.address,
            role: request.role,
        }
    }
}

/// User Update Handler
#[endpoint(
    tags("users"),
    summary = "Update User",
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload or email already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "users.update",
    skip(id, json, depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user: UserId = id.into_id("Invalid user ID")?;

    tracing::Span::current().record("user_id", tracing::field::display(user));

    state
        .app
        .users
        .update_user(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("User updated successfully!")))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::users_service;

    use super::{super::tests::make_user, *};

    fn make_service(users: MockUsersService) -> Service {
        users_service(users, Router::with_path("users/{id}").put(handler))
    }

    #[tokio::test]
    async fn test_update_user_forwards_present_fields_only() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_user()
            .once()
            .withf(|user, update| {
                *user == UserId::from_i64(3)
                    && *update
                        == UserUpdate {
                            address: Some("9 Oak Road".to_string()),
                            ..UserUpdate::default()
                        }
            })
            .return_once(|_, _| Ok(make_user(3, "John Doe", "john@example.com")));

        let mut res = TestClient::put("http://example.com/users/3")
            .json(&json!({ "address": "9 Oak Road" }))
            .send(&make_service(users))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "User updated successfully!");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_taken_email_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_user()
            .once()
            .return_once(|_, _| Err(UsersServiceError::Conflict));

        let mut res = TestClient::put("http://example.com/users/3")
            .json(&json!({ "email": "jane@example.com" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(res.take_string().await?.contains("Email already exists"));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_user()
            .once()
            .return_once(|_, _| Err(UsersServiceError::NotFound));

        let res = TestClient::put("http://example.com/users/99")
            .json(&json!({ "name": "Nobody" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
