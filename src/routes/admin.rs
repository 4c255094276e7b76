//! Admin endpoints managing lead capture configs.
//!
//! Mounted behind the hub's auth proxy; no authentication happens here.

use actix_web::{HttpResponse, Responder, get, post, put, web};

use crate::domain::field::LeadFieldResolver;
use crate::forms::lead_capture::LeadCaptureForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::lead_capture as service;

#[get("/lead-captures")]
pub async fn list_lead_captures(repo: web::Data<DieselRepository>) -> impl Responder {
    match service::list_lead_captures(repo.get_ref()) {
        Ok(captures) => HttpResponse::Ok().json(captures),
        Err(err) => service_error_response(&err),
    }
}

#[post("/lead-captures")]
pub async fn create_lead_capture(
    form: web::Json<LeadCaptureForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::create_lead_capture(repo.get_ref(), form.into_inner()) {
        Ok(capture) => HttpResponse::Created().json(capture),
        Err(err) => service_error_response(&err),
    }
}

#[get("/lead-captures/{id}")]
pub async fn show_lead_capture(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::get_lead_capture(repo.get_ref(), id.into_inner()) {
        Ok(capture) => HttpResponse::Ok().json(capture),
        Err(err) => service_error_response(&err),
    }
}

#[put("/lead-captures/{id}")]
pub async fn update_lead_capture(
    id: web::Path<i32>,
    form: web::Json<LeadCaptureForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::update_lead_capture(repo.get_ref(), id.into_inner(), form.into_inner()) {
        Ok(capture) => HttpResponse::Ok().json(capture),
        Err(err) => service_error_response(&err),
    }
}

#[post("/lead-captures/{id}/regenerate-key")]
pub async fn regenerate_api_key(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::regenerate_api_key(repo.get_ref(), id.into_inner()) {
        Ok(key) => HttpResponse::Ok().json(key),
        Err(err) => service_error_response(&err),
    }
}

#[get("/lead-captures/{id}/example-request")]
pub async fn example_request(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match service::example_request(
        repo.get_ref(),
        &LeadFieldResolver,
        &server_config.site_url,
        id.into_inner(),
    ) {
        Ok(example) => HttpResponse::Ok().json(example),
        Err(err) => service_error_response(&err),
    }
}

#[get("/lead-captures/{id}/log")]
pub async fn capture_log(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::list_capture_log(repo.get_ref(), id.into_inner()) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(err) => service_error_response(&err),
    }
}
