//! User endpoints.
//!
//! ```text
//! POST /api/v1/users {"firstName":"A","lastName":"B","mobile":"123","email":"a@b.com"}
//! GET  /api/v1/users?email=a@b.com
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::Api;
use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;

/// Query string for `GET /api/v1/users`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Email of the user to fetch.
    pub email: String,
}

/// Register a user.
///
/// Missing timestamps are filled in; string fields are trimmed before the
/// email check runs.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = User,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(api: web::Data<Api>, payload: web::Json<User>) -> ApiResult<HttpResponse> {
    let user = api.create_user(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Fetch a user by email.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(EmailQuery),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Email not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "readUserByEmail"
)]
#[get("/users")]
pub async fn read_user_by_email(
    api: web::Data<Api>,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<User>> {
    let user = api.read_user_by_email(&query.email).await?;
    Ok(web::Json(user))
}

#[cfg(test)]
mod tests;
