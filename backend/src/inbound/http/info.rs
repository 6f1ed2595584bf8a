//! Application info endpoint backed by the façade health bundle.

use actix_web::{get, web};

use crate::api::{Api, ApiHealth};

/// Release and uptime information.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses((status = 200, description = "Application info", body = ApiHealth)),
    tags = ["health"],
    operation_id = "appInfo",
    security([])
)]
#[get("/health")]
pub async fn app_info(api: web::Data<Api>) -> web::Json<ApiHealth> {
    web::Json(api.health())
}
