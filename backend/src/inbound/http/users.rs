//! User directory HTTP handlers.
//!
//! ```text
//! POST /user {"username":"alice","email":"a@x.com"}
//! GET /users
//! DELETE /user/{userId}
//! ```

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, NewUser, User, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Message returned when the path segment is not an integer.
pub const INVALID_USER_ID_MESSAGE: &str = "Invalid userId format. Must be an integer.";

/// Registration request body for `POST /user`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "a@x.com")]
    pub email: String,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        NewUser::try_from_strings(value.username, value.email)
    }
}

/// Response body for a successful registration.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    #[schema(example = 1)]
    pub user_id: i32,
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let (field, code) = match err {
        UserValidationError::EmptyUsername => ("username", "empty_username"),
        UserValidationError::EmptyEmail => ("email", "empty_email"),
        UserValidationError::InvalidEmail => ("email", "invalid_email"),
        UserValidationError::InvalidId => ("userId", "invalid_user_id"),
    };
    Error::validation_failed(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// JSON extractor configuration reporting malformed bodies as 422.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let error = Error::validation_failed("request body is not a valid user payload")
        .with_details(json!({ "code": "invalid_json", "reason": err.to_string() }));
    error.into()
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Email already in use", body = Error),
        (status = 422, description = "Malformed or invalid payload", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = NewUser::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let id = state.users_command.register_user(user).await?;
    Ok(HttpResponse::Created().json(CreateUserResponse { user_id: id.get() }))
}

/// List users that have not been deleted.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Active users", body = [User]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Soft-delete a user.
#[utoipa::path(
    delete,
    path = "/user/{userId}",
    params(("userId" = i32, Path, description = "Identifier returned at registration")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid id, unknown user or already deleted", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{userId}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: UserId = path.parse().map_err(|_| {
        Error::invalid_request(INVALID_USER_ID_MESSAGE)
            .with_details(json!({ "field": "userId", "code": "invalid_user_id" }))
    })?;
    state.users_command.soft_delete_user(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
