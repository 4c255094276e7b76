//! Public endpoints called by external web forms.

use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::{Value, json};

use crate::domain::field::LeadFieldResolver;
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::capture::{self, CaptureOutcome};
use crate::services::opt_in;

#[post("/v1/lead-capture/{api_key}")]
pub async fn capture_lead(
    api_key: web::Path<String>,
    payload: web::Json<Value>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match capture::capture_lead(
        repo.get_ref(),
        &LeadFieldResolver,
        &api_key,
        payload.into_inner(),
    ) {
        Ok(CaptureOutcome::Deferred { .. } | CaptureOutcome::Captured(_)) => {
            HttpResponse::Ok().json(true)
        }
        Err(err) => service_error_response(&err),
    }
}

#[get("/v1/lead-capture/confirm-opt-in/{token}")]
pub async fn confirm_opt_in(
    token: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match opt_in::confirm_opt_in(repo.get_ref(), &LeadFieldResolver, &token) {
        Ok(status) => HttpResponse::Ok().json(json!({ "status": status })),
        Err(err) => service_error_response(&err),
    }
}
