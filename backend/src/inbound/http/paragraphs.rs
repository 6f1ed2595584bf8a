//! Completion proxy endpoint.
//!
//! Always answers 200 with `text/plain`; an upstream failure yields an empty
//! body.

use actix_web::{HttpResponse, get, web};

use crate::api::Api;

/// Ask the completion proxy for a paragraph about `topic`.
#[utoipa::path(
    get,
    path = "/api/v1/paragraphs/{topic}",
    params(("topic" = String, Path, description = "Subject of the paragraph")),
    responses(
        (status = 200, description = "Generated paragraph, empty on upstream failure", body = String, content_type = "text/plain")
    ),
    tags = ["paragraphs"],
    operation_id = "paragraphByTopic"
)]
#[get("/paragraphs/{topic}")]
pub async fn paragraph_by_topic(api: web::Data<Api>, topic: web::Path<String>) -> HttpResponse {
    let text = api.paragraph_by_topic(&topic).await;
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(text)
}
