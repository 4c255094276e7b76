//! HTTP handlers and the service error to response mapping.

use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::services::ServiceError;

pub mod admin;
pub mod api;

/// Renders a service error as `{"error": message}` with a matching status.
pub fn service_error_response(err: &ServiceError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ServiceError::NotFound(_) => HttpResponse::NotFound().json(body),
        ServiceError::BadRequest(_) | ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::Configuration(_)
        | ServiceError::Notification(_)
        | ServiceError::Internal(_) => HttpResponse::InternalServerError().json(body),
    }
}

/// Registers every route; shared by the server and the route tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(api::confirm_opt_in)
            .service(api::capture_lead),
    )
    .service(
        web::scope("/admin")
            .service(admin::list_lead_captures)
            .service(admin::create_lead_capture)
            .service(admin::show_lead_capture)
            .service(admin::update_lead_capture)
            .service(admin::regenerate_api_key)
            .service(admin::example_request)
            .service(admin::capture_log),
    );
}
