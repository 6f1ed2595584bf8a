//! HTTP inbound adapter.

use actix_web::web;

pub mod error;
pub mod health;
pub mod info;
pub mod paragraphs;
pub mod users;

pub use error::ApiResult;

/// Register the `/api/v1` routes and the extractor error handlers on a
/// scope. Callers mount it under `/api/v1` and provide `web::Data<Api>`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(users::create_user)
        .service(users::read_user_by_email)
        .service(info::app_info)
        .service(paragraphs::paragraph_by_topic);
}
