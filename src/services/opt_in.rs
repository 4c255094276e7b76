//! Double opt-in: sending confirmation requests and applying confirmed
//! payloads.

use chrono::{Duration, Utc};
use log::{error, info};
use serde::Serialize;

use crate::domain::field::FieldResolver;
use crate::domain::job::OptInJobData;
use crate::domain::opt_in::{NewOptInConfirmation, OptInConfirmation};
use crate::domain::types::{ConfirmationToken, EmailAddress};
use crate::emailer::ConfirmationSender;
use crate::models::zmq::ZmqOptInConfirmationMessage;
use crate::repository::{
    CampaignReader, CampaignWriter, ContactReader, ContactWriter, LeadCaptureLogWriter,
    LeadCaptureReader, LeadReader, LeadWriter, OptInConfirmationReader, OptInConfirmationWriter,
};
use crate::services::capture::proceed_capture;
use crate::services::{ServiceError, ServiceResult};

const CONFIRMATION_NOT_FOUND: &str = "confirmation not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OptInStatus {
    Confirmed,
    AlreadyConfirmed,
}

/// Public link the recipient follows to confirm.
pub fn confirmation_url(site_url: &str, token: &ConfirmationToken) -> String {
    format!(
        "{}/api/v1/lead-capture/confirm-opt-in/{}",
        site_url.trim_end_matches('/'),
        token
    )
}

/// Handler of the queued `optInConfirmationJob`.
pub fn opt_in_confirmation_job<R, S>(
    repo: &R,
    sender: &S,
    site_url: &str,
    job_data: OptInJobData,
) -> ServiceResult<OptInConfirmation>
where
    R: LeadCaptureReader + OptInConfirmationWriter + ?Sized,
    S: ConfirmationSender + ?Sized,
{
    let capture = repo
        .get_lead_capture_by_id(job_data.lead_capture_id)?
        .ok_or_else(|| ServiceError::NotFound("lead capture not found".to_string()))?;

    let template_id = capture
        .settings
        .opt_in_confirmation_email_template_id
        .ok_or_else(|| {
            ServiceError::Configuration("no email template for opt-in confirmation".to_string())
        })?;

    let recipient = job_data
        .data
        .email_address()
        .ok_or_else(|| ServiceError::BadRequest("no email address in payload".to_string()))?;
    let recipient =
        EmailAddress::new(recipient).map_err(|err| ServiceError::BadRequest(err.to_string()))?;

    let terminate_at = Utc::now().naive_utc()
        + Duration::hours(i64::from(capture.settings.opt_in_confirmation_lifetime));

    let confirmation = repo
        .create_opt_in_confirmation(&NewOptInConfirmation::new(
            capture.id,
            job_data.data,
            terminate_at,
        ))
        .map_err(|err| {
            error!("Failed to create opt-in confirmation: {err}");
            ServiceError::from(err)
        })?;

    let message = ZmqOptInConfirmationMessage {
        lead_capture_id: capture.id.get(),
        template_id: template_id.get(),
        recipient: recipient.into_inner(),
        confirmation_url: confirmation_url(site_url, &confirmation.token),
        data: confirmation.data.as_value(),
    };

    sender.send_confirmation(&message)?;

    Ok(confirmation)
}

/// Applies the stored payload once; later calls report `AlreadyConfirmed`.
pub fn confirm_opt_in<R, F>(repo: &R, resolver: &F, token: &str) -> ServiceResult<OptInStatus>
where
    R: OptInConfirmationReader
        + OptInConfirmationWriter
        + LeadCaptureReader
        + LeadReader
        + LeadWriter
        + ContactReader
        + ContactWriter
        + CampaignReader
        + CampaignWriter
        + LeadCaptureLogWriter
        + ?Sized,
    F: FieldResolver + ?Sized,
{
    let token = ConfirmationToken::new(token)
        .map_err(|_| ServiceError::NotFound(CONFIRMATION_NOT_FOUND.to_string()))?;

    let confirmation = repo
        .get_opt_in_confirmation_by_token(&token)?
        .ok_or_else(|| ServiceError::NotFound(CONFIRMATION_NOT_FOUND.to_string()))?;

    if confirmation.is_confirmed() {
        return Ok(OptInStatus::AlreadyConfirmed);
    }

    if confirmation.is_expired(Utc::now().naive_utc()) {
        return Err(ServiceError::BadRequest(
            "confirmation link expired".to_string(),
        ));
    }

    let capture = repo
        .get_lead_capture_by_id(confirmation.lead_capture_id)?
        .ok_or_else(|| ServiceError::NotFound("lead capture not found".to_string()))?;

    if !repo.claim_opt_in_confirmation(confirmation.id)? {
        return Ok(OptInStatus::AlreadyConfirmed);
    }

    if let Err(err) = proceed_capture(repo, resolver, &capture, confirmation.data.clone()) {
        error!("Opt-in confirmation {} failed: {err}", confirmation.id);
        repo.release_opt_in_confirmation(confirmation.id)?;
        return Err(err);
    }

    info!("Opt-in confirmation {} confirmed", confirmation.id);

    Ok(OptInStatus::Confirmed)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::field::LeadFieldResolver;
    use crate::domain::lead_capture::{
        DEFAULT_OPT_IN_LIFETIME_HOURS, LeadCapture, LeadCaptureSettings,
    };
    use crate::domain::payload::CapturePayload;
    use crate::domain::types::{
        ApiKey, EmailTemplateId, LeadCaptureId, LeadCaptureName, OptInConfirmationId,
    };
    use crate::emailer::MockConfirmationSender;
    use crate::repository::mock::MockRepository;

    fn capture(template: Option<i32>) -> LeadCapture {
        let now = Utc::now().naive_utc();
        LeadCapture {
            id: LeadCaptureId::new(2).unwrap(),
            api_key: ApiKey::generate(),
            settings: LeadCaptureSettings {
                name: LeadCaptureName::new("Newsletter").unwrap(),
                field_list: vec!["emailAddress".to_string()],
                campaign_id: None,
                lead_source: None,
                target_list_id: None,
                subscribe_to_target_list: false,
                subscribe_contact_to_target_list: false,
                target_team_id: None,
                opt_in_confirmation: true,
                opt_in_confirmation_email_template_id: template
                    .and_then(|id| EmailTemplateId::new(id).ok()),
                opt_in_confirmation_lifetime: DEFAULT_OPT_IN_LIFETIME_HOURS,
            },
            created_at: now,
            updated_at: now,
        }
    }

    fn confirmation(new: &NewOptInConfirmation, confirmed: bool) -> OptInConfirmation {
        let now = Utc::now().naive_utc();
        OptInConfirmation {
            id: OptInConfirmationId::new(3).unwrap(),
            token: new.token.clone(),
            lead_capture_id: new.lead_capture_id,
            data: new.data.clone(),
            terminate_at: new.terminate_at,
            confirmed_at: confirmed.then_some(now),
            created_at: now,
        }
    }

    fn job_data() -> OptInJobData {
        OptInJobData {
            lead_capture_id: LeadCaptureId::new(2).unwrap(),
            data: CapturePayload::from_value(json!({"emailAddress": "a@x.com"})).unwrap(),
        }
    }

    #[test]
    fn confirmation_url_joins_site_url_and_token() {
        let token = ConfirmationToken::new("ffffffffffffffffffffffffffffffff").unwrap();

        assert_eq!(
            confirmation_url("https://crm.example.com/", &token),
            "https://crm.example.com/api/v1/lead-capture/confirm-opt-in/ffffffffffffffffffffffffffffffff"
        );
    }

    #[test]
    fn job_creates_confirmation_and_sends_request() {
        let mut repo = MockRepository::new();
        let mut sender = MockConfirmationSender::new();
        let capture = capture(Some(8));

        repo.expect_get_lead_capture_by_id()
            .times(1)
            .returning(move |_| Ok(Some(capture.clone())));
        repo.expect_create_opt_in_confirmation()
            .withf(|new| new.terminate_at > Utc::now().naive_utc() + Duration::hours(47))
            .times(1)
            .returning(|new| Ok(confirmation(new, false)));
        sender
            .expect_send_confirmation()
            .withf(|message| {
                message.template_id == 8
                    && message.recipient == "a@x.com"
                    && message
                        .confirmation_url
                        .starts_with("http://localhost/api/v1/lead-capture/confirm-opt-in/")
            })
            .times(1)
            .returning(|_| Ok(()));

        opt_in_confirmation_job(&repo, &sender, "http://localhost", job_data()).unwrap();
    }

    #[test]
    fn job_requires_template() {
        let mut repo = MockRepository::new();
        let mut sender = MockConfirmationSender::new();
        let capture = capture(None);

        repo.expect_get_lead_capture_by_id()
            .times(1)
            .returning(move |_| Ok(Some(capture.clone())));
        repo.expect_create_opt_in_confirmation().times(0);
        sender.expect_send_confirmation().times(0);

        let result = opt_in_confirmation_job(&repo, &sender, "http://localhost", job_data());

        assert!(matches!(result, Err(ServiceError::Configuration(_))));
    }

    #[test]
    fn already_confirmed_token_has_no_side_effects() {
        let mut repo = MockRepository::new();
        let new = NewOptInConfirmation::new(
            LeadCaptureId::new(2).unwrap(),
            job_data().data,
            Utc::now().naive_utc(),
        );
        let token = new.token.clone();
        let stored = confirmation(&new, true);

        repo.expect_get_opt_in_confirmation_by_token()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_get_lead_capture_by_id().times(0);
        repo.expect_claim_opt_in_confirmation().times(0);

        let status = confirm_opt_in(&repo, &LeadFieldResolver, token.as_str()).unwrap();

        assert_eq!(status, OptInStatus::AlreadyConfirmed);
    }

    #[test]
    fn expired_token_is_bad_request() {
        let mut repo = MockRepository::new();
        let new = NewOptInConfirmation::new(
            LeadCaptureId::new(2).unwrap(),
            job_data().data,
            Utc::now().naive_utc() - Duration::hours(1),
        );
        let token = new.token.clone();
        let stored = confirmation(&new, false);

        repo.expect_get_opt_in_confirmation_by_token()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_claim_opt_in_confirmation().times(0);

        let result = confirm_opt_in(&repo, &LeadFieldResolver, token.as_str());

        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    }

    #[test]
    fn unknown_token_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_opt_in_confirmation_by_token()
            .times(1)
            .returning(|_| Ok(None));

        let result = confirm_opt_in(
            &repo,
            &LeadFieldResolver,
            "00000000000000000000000000000000",
        );

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn token_claimed_by_another_request_has_no_side_effects() {
        let mut repo = MockRepository::new();
        let new = NewOptInConfirmation::new(
            LeadCaptureId::new(2).unwrap(),
            job_data().data,
            Utc::now().naive_utc() + Duration::hours(1),
        );
        let token = new.token.clone();
        let stored = confirmation(&new, false);
        let capture = capture(Some(8));

        repo.expect_get_opt_in_confirmation_by_token()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_get_lead_capture_by_id()
            .times(1)
            .returning(move |_| Ok(Some(capture.clone())));
        repo.expect_claim_opt_in_confirmation()
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_find_contact_by_identity().times(0);
        repo.expect_create_lead().times(0);
        repo.expect_create_lead_capture_log_record().times(0);

        let status = confirm_opt_in(&repo, &LeadFieldResolver, token.as_str()).unwrap();

        assert_eq!(status, OptInStatus::AlreadyConfirmed);
    }

    #[test]
    fn failed_capture_releases_the_token() {
        let mut repo = MockRepository::new();
        let new = NewOptInConfirmation::new(
            LeadCaptureId::new(2).unwrap(),
            job_data().data,
            Utc::now().naive_utc() + Duration::hours(1),
        );
        let token = new.token.clone();
        let stored = confirmation(&new, false);
        let mut capture = capture(Some(8));
        capture.settings.field_list.clear();

        repo.expect_get_opt_in_confirmation_by_token()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_get_lead_capture_by_id()
            .times(1)
            .returning(move |_| Ok(Some(capture.clone())));
        repo.expect_claim_opt_in_confirmation()
            .times(1)
            .returning(|_| Ok(true));
        repo.expect_release_opt_in_confirmation()
            .withf(|id| id.get() == 3)
            .times(1)
            .returning(|_| Ok(()));

        let result = confirm_opt_in(&repo, &LeadFieldResolver, token.as_str());

        assert!(matches!(result, Err(ServiceError::Configuration(_))));
    }
}
