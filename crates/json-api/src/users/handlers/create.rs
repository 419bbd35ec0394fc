//! Create User Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::users::data::NewUser;

use crate::{
    extensions::*, responses::MessageResponse, state::State, users::errors::into_status_error,
};

/// Create User Request
///
/// Omitted text fields are treated as empty and rejected by validation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateUserRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub address: String,

    /// Either `admin` or `client`
    #[serde(default)]
    pub role: String,

    /// RFC 3339 timestamp; defaults to now
    pub registration_date: Option<String>,
}

impl CreateUserRequest {
    fn into_new_user(self) -> Result<NewUser, StatusError> {
        Ok(NewUser {
            registration_date: self.registration_date.into_timestamp("registration_date")?,
            name: self.name,
            email: self.email,
            address: self.address,
            role: self.role,
        })
    }
}

/// Create User Handler
#[endpoint(
    tags("users"),
    summary = "Create User",
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload or email already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "users.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let new_user = json.into_inner().into_new_user()?;

    let id = state
        .app
        .users
        .create_user(new_user)
        .await
        .map_err(into_status_error)?
        .id;

    res.add_header(LOCATION, format!("/users/{id}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(user_id = %id, "created user");

    Ok(Json(MessageResponse::new("User created successfully!")))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        users::{MockUsersService, UsersServiceError},
        validation::Validate,
    };

    use crate::test_helpers::users_service;

    use super::{super::tests::make_user, *};

    fn make_service(users: MockUsersService) -> Service {
        users_service(users, Router::with_path("users").post(handler))
    }

    #[tokio::test]
    async fn test_create_user_success() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .withf(|new| {
                *new == NewUser {
                    name: "John Doe".to_string(),
                    email: "john@example.com".to_string(),
                    address: String::new(),
                    role: "client".to_string(),
                    registration_date: None,
                }
            })
            .return_once(|_| Ok(make_user(1, "John Doe", "john@example.com")));

        let mut res = TestClient::post("http://example.com/users")
            .json(&json!({ "name": "John Doe", "email": "john@example.com", "role": "client" }))
            .send(&make_service(users))
            .await;

        let body: MessageResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/users/1"));
        assert_eq!(body.message, "User created successfully!");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .return_once(|_| Err(UsersServiceError::Conflict));

        let mut res = TestClient::post("http://example.com/users")
            .json(&json!({ "name": "John Doe", "email": "john@example.com", "role": "client" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(res.take_string().await?.contains("Email already exists"));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_validation_messages_returned() -> TestResult {
        let invalid = NewUser {
            name: String::new(),
            email: "john.example.com".to_string(),
            address: String::new(),
            role: "owner".to_string(),
            registration_date: None,
        };
        let errors = invalid.validate().err().ok_or("payload should be invalid")?;

        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .withf(move |new| *new == invalid)
            .return_once(move |_| Err(UsersServiceError::Validation(errors)));

        let mut res = TestClient::post("http://example.com/users")
            .json(&json!({ "email": "john.example.com", "role": "owner" }))
            .send(&make_service(users))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(body.contains("name is required"), "unexpected body: {body}");
        assert!(body.contains("email is not valid"), "unexpected body: {body}");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_malformed_json_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_create_user().never();

        let res = TestClient::post("http://example.com/users")
            .raw_json("{\"name\": ")
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_bad_registration_date_returns_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_create_user().never();

        let res = TestClient::post("http://example.com/users")
            .json(&json!({
                "name": "John Doe",
                "email": "john@example.com",
                "role": "client",
                "registration_date": "last tuesday"
            }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
