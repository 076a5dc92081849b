//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! POST   /api/v1/users        {"name":"Ann","email":"ann@x.com","age":20}
//! PUT    /api/v1/users/{id}   {"age":30}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Handlers decode and validate, then call the driving ports. Validation
//! failures are answered with 400 before the service is invoked.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateUserRequest, UpdateUserRequest};
use crate::domain::{Error, User, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    EMAIL, NAME, missing_field_error, parse_user_id, user_field_error,
};

/// Confirmation returned by `DELETE /api/v1/users/{id}`.
pub const DELETED_MESSAGE: &str = "User deleted successfully";

/// Request body for `POST /api/v1/users`.
///
/// `name` and `email` are required; `age` defaults to zero (unset).
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequestBody {
    #[schema(example = "Ann")]
    pub name: Option<String>,
    #[schema(example = "ann@x.com")]
    pub email: Option<String>,
    #[schema(example = 20)]
    pub age: Option<i32>,
}

/// Request body for `PUT /api/v1/users/{id}`.
///
/// A field replaces the stored value only when it is present: a non-empty
/// string, or an age greater than zero.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequestBody {
    #[schema(example = "Ann")]
    pub name: Option<String>,
    #[schema(example = "ann@x.com")]
    pub email: Option<String>,
    #[schema(example = 30)]
    pub age: Option<i32>,
}

/// User representation returned by every users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserBody {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Ann")]
    pub name: String,
    #[schema(example = "ann@x.com")]
    pub email: String,
    #[schema(example = 20)]
    pub age: i32,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            age: user.age(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Body returned after a successful delete.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteUserResponseBody {
    #[schema(example = "User deleted successfully")]
    pub message: String,
}

/// Pick the raw input that triggered a validation failure.
fn rejected(error: UserValidationError, name: &str, email: &str) -> Error {
    let value = match error {
        UserValidationError::EmptyName => name,
        _ => email,
    };
    user_field_error(error, value)
}

impl TryFrom<CreateUserRequestBody> for CreateUserRequest {
    type Error = Error;

    fn try_from(body: CreateUserRequestBody) -> Result<Self, Self::Error> {
        let name = body.name.ok_or_else(|| missing_field_error(NAME))?;
        let email = body.email.ok_or_else(|| missing_field_error(EMAIL))?;
        let age = body.age.unwrap_or_default();
        CreateUserRequest::try_from_fields(name.as_str(), email.as_str(), age)
            .map_err(|err| rejected(err, &name, &email))
    }
}

impl TryFrom<UpdateUserRequestBody> for UpdateUserRequest {
    type Error = Error;

    fn try_from(body: UpdateUserRequestBody) -> Result<Self, Self::Error> {
        let name = body.name.unwrap_or_default();
        let email = body.email.unwrap_or_default();
        let age = body.age.unwrap_or_default();
        UpdateUserRequest::from_fields(name.as_str(), email.as_str(), age)
            .map_err(|err| rejected(err, &name, &email))
    }
}

/// List active users ordered by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Active users", body = [UserBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserBody>>> {
    let users = state.users.get_all_users().await?;
    Ok(web::Json(users.into_iter().map(UserBody::from).collect()))
}

/// Fetch one active user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserBody),
        (status = 400, description = "Identifier is not numeric", body = ErrorSchema),
        (status = 404, description = "No active user with this identifier", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserBody>> {
    let id = parse_user_id(&path.into_inner())?;
    let user = state.users.get_user_by_id(id).await?;
    Ok(web::Json(user.into()))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequestBody,
    responses(
        (status = 201, description = "User created", body = UserBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = CreateUserRequest::try_from(payload.into_inner())?;
    let user = state.users_command.create_user(request).await?;
    Ok(HttpResponse::Created().json(UserBody::from(user)))
}

/// Merge present fields into an active user.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    request_body = UpdateUserRequestBody,
    responses(
        (status = 200, description = "User after the merge", body = UserBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No active user with this identifier", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequestBody>,
) -> ApiResult<web::Json<UserBody>> {
    let id = parse_user_id(&path.into_inner())?;
    let request = UpdateUserRequest::try_from(payload.into_inner())?;
    let user = state.users_command.update_user(id, request).await?;
    Ok(web::Json(user.into()))
}

/// Soft-delete an active user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponseBody),
        (status = 400, description = "Identifier is not numeric", body = ErrorSchema),
        (status = 404, description = "No active user with this identifier", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteUserResponseBody>> {
    let id = parse_user_id(&path.into_inner())?;
    state.users_command.delete_user(id).await?;
    Ok(web::Json(DeleteUserResponseBody {
        message: DELETED_MESSAGE.to_owned(),
    }))
}

/// Register every users handler on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user);
}
