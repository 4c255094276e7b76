//! Admin operations on lead capture configs.

use log::{error, info};
use serde_json::{Map, Value};

use crate::domain::field::FieldResolver;
use crate::domain::lead_capture::{LeadCapture, LeadCaptureSettings, NewLeadCapture};
use crate::domain::lead_capture_log::LeadCaptureLogRecord;
use crate::domain::types::{ApiKey, LeadCaptureId};
use crate::dto::lead_capture::{ExampleRequest, RegeneratedKey};
use crate::forms::lead_capture::LeadCaptureForm;
use crate::repository::{LeadCaptureLogReader, LeadCaptureReader, LeadCaptureWriter};
use crate::services::{ServiceError, ServiceResult};

const LEAD_CAPTURE_NOT_FOUND: &str = "lead capture not found";

/// Ids that can never exist are reported like unknown ones.
fn lead_capture_id_from(id: i32) -> ServiceResult<LeadCaptureId> {
    LeadCaptureId::new(id)
        .map_err(|_| ServiceError::NotFound(LEAD_CAPTURE_NOT_FOUND.to_string()))
}

fn load_lead_capture<R>(repo: &R, id: LeadCaptureId) -> ServiceResult<LeadCapture>
where
    R: LeadCaptureReader + ?Sized,
{
    repo.get_lead_capture_by_id(id)
        .map_err(|err| {
            error!("Failed to load lead capture {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or_else(|| ServiceError::NotFound(LEAD_CAPTURE_NOT_FOUND.to_string()))
}

/// Validates the form and persists a new config with a freshly issued key.
pub fn create_lead_capture<R>(repo: &R, form: LeadCaptureForm) -> ServiceResult<LeadCapture>
where
    R: LeadCaptureWriter + ?Sized,
{
    let settings = LeadCaptureSettings::try_from(form)?;

    let capture = repo
        .create_lead_capture(&NewLeadCapture::new(settings))
        .map_err(|err| {
            error!("Failed to create lead capture: {err}");
            ServiceError::from(err)
        })?;

    info!("Created lead capture {}", capture.id);

    Ok(capture)
}

/// Replaces every editable attribute; the API key is left untouched.
pub fn update_lead_capture<R>(
    repo: &R,
    lead_capture_id: i32,
    form: LeadCaptureForm,
) -> ServiceResult<LeadCapture>
where
    R: LeadCaptureReader + LeadCaptureWriter + ?Sized,
{
    let id = lead_capture_id_from(lead_capture_id)?;
    let settings = LeadCaptureSettings::try_from(form)?;

    load_lead_capture(repo, id)?;

    let capture = repo.update_lead_capture(id, &settings).map_err(|err| {
        error!("Failed to update lead capture {id}: {err}");
        ServiceError::from(err)
    })?;

    Ok(capture)
}

pub fn get_lead_capture<R>(repo: &R, lead_capture_id: i32) -> ServiceResult<LeadCapture>
where
    R: LeadCaptureReader + ?Sized,
{
    load_lead_capture(repo, lead_capture_id_from(lead_capture_id)?)
}

pub fn list_lead_captures<R>(repo: &R) -> ServiceResult<Vec<LeadCapture>>
where
    R: LeadCaptureReader + ?Sized,
{
    repo.list_lead_captures().map_err(|err| {
        error!("Failed to list lead captures: {err}");
        ServiceError::from(err)
    })
}

/// Issues and stores a new API key. The previous key stops working.
pub fn regenerate_api_key<R>(repo: &R, lead_capture_id: i32) -> ServiceResult<RegeneratedKey>
where
    R: LeadCaptureReader + LeadCaptureWriter + ?Sized,
{
    let id = lead_capture_id_from(lead_capture_id)?;

    load_lead_capture(repo, id)?;

    let capture = repo
        .update_lead_capture_api_key(id, &ApiKey::generate())
        .map_err(|err| {
            error!("Failed to regenerate api key for lead capture {id}: {err}");
            ServiceError::from(err)
        })?;

    info!("Regenerated api key for lead capture {id}");

    Ok(RegeneratedKey {
        api_key: capture.api_key.into_inner(),
    })
}

/// Describes the request an external form has to send.
pub fn build_example_request<F>(
    resolver: &F,
    capture: &LeadCapture,
    site_url: &str,
) -> ExampleRequest
where
    F: FieldResolver + ?Sized,
{
    let mut payload = Map::new();
    for field in &capture.settings.field_list {
        for attribute in resolver.actual_attributes(field) {
            let key = attribute.key();
            payload.insert(key.to_string(), Value::String(format!("{{{key}}}")));
        }
    }

    ExampleRequest {
        method: "POST".to_string(),
        url: format!(
            "{}/api/v1/lead-capture/{}",
            site_url.trim_end_matches('/'),
            capture.api_key
        ),
        payload,
    }
}

pub fn example_request<R, F>(
    repo: &R,
    resolver: &F,
    site_url: &str,
    lead_capture_id: i32,
) -> ServiceResult<ExampleRequest>
where
    R: LeadCaptureReader + ?Sized,
    F: FieldResolver + ?Sized,
{
    let capture = load_lead_capture(repo, lead_capture_id_from(lead_capture_id)?)?;

    Ok(build_example_request(resolver, &capture, site_url))
}

/// Capture log of one config, newest first.
pub fn list_capture_log<R>(
    repo: &R,
    lead_capture_id: i32,
) -> ServiceResult<Vec<LeadCaptureLogRecord>>
where
    R: LeadCaptureReader + LeadCaptureLogReader + ?Sized,
{
    let id = lead_capture_id_from(lead_capture_id)?;

    load_lead_capture(repo, id)?;

    Ok(repo.list_lead_capture_log_records(id)?)
}
