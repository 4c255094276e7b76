//! Lead capture workflow: API key check, payload population, dedup against
//! leads and contacts, relationship linking and the audit log.

use log::{error, info};

use crate::domain::campaign::{CampaignAction, NewCampaignLogRecord};
use crate::domain::field::FieldResolver;
use crate::domain::job::{
    LEAD_CAPTURE_SERVICE, NewJob, OPT_IN_CONFIRMATION_METHOD, OptInJobData,
};
use crate::domain::lead::NewLead;
use crate::domain::lead_capture::{LeadCapture, LeadCaptureSettings};
use crate::domain::lead_capture_log::{
    LeadCaptureLogRecord, NewLeadCaptureLogRecord, TargetType,
};
use crate::domain::payload::CapturePayload;
use crate::domain::types::{ApiKey, CampaignId, JobId, LogDescription};
use crate::repository::{
    CampaignReader, CampaignWriter, ContactReader, ContactWriter, IdentityQuery, JobWriter,
    LeadCaptureLogWriter, LeadCaptureReader, LeadReader, LeadWriter,
};
use crate::services::{ServiceError, ServiceResult};

const INVALID_API_KEY: &str = "api key is not valid";
const NO_FIELD_LIST: &str = "no field list specified";
const NO_DATA: &str = "no appropriate data in payload";

/// Result of a call to [`capture_lead`].
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// Opt-in confirmation is required; a job was queued instead.
    Deferred { job_id: JobId },
    /// The payload was applied to a lead or contact.
    Captured(LeadCaptureLogRecord),
}

/// Entry point of the public capture endpoint.
pub fn capture_lead<R, F>(
    repo: &R,
    resolver: &F,
    api_key: &str,
    payload: serde_json::Value,
) -> ServiceResult<CaptureOutcome>
where
    R: LeadCaptureReader
        + LeadReader
        + LeadWriter
        + ContactReader
        + ContactWriter
        + CampaignReader
        + CampaignWriter
        + LeadCaptureLogWriter
        + JobWriter
        + ?Sized,
    F: FieldResolver + ?Sized,
{
    let api_key = ApiKey::new(api_key)
        .map_err(|_| ServiceError::NotFound(INVALID_API_KEY.to_string()))?;

    let capture = repo
        .get_lead_capture_by_api_key(&api_key)
        .map_err(|err| {
            error!("Failed to load lead capture by api key: {err}");
            ServiceError::from(err)
        })?
        .ok_or_else(|| ServiceError::NotFound(INVALID_API_KEY.to_string()))?;

    let payload = CapturePayload::from_value(payload)
        .map_err(|err| ServiceError::BadRequest(err.to_string()))?;

    if capture.settings.opt_in_confirmation && payload.email_address().is_some() {
        if capture
            .settings
            .opt_in_confirmation_email_template_id
            .is_none()
        {
            return Err(ServiceError::Configuration(
                "no email template for opt-in confirmation".to_string(),
            ));
        }

        populate_lead(resolver, &capture.settings, &payload)?;

        let data = OptInJobData {
            lead_capture_id: capture.id,
            data: payload,
        };
        let data = serde_json::to_value(&data)
            .map_err(|err| ServiceError::Internal(err.to_string()))?;

        let job = repo
            .create_job(&NewJob::new(
                LEAD_CAPTURE_SERVICE,
                OPT_IN_CONFIRMATION_METHOD,
                data,
            ))
            .map_err(|err| {
                error!("Failed to queue opt-in confirmation job: {err}");
                ServiceError::from(err)
            })?;

        info!(
            "Lead capture {} deferred to opt-in confirmation job {}",
            capture.id, job.id
        );

        return Ok(CaptureOutcome::Deferred { job_id: job.id });
    }

    proceed_capture(repo, resolver, &capture, payload).map(CaptureOutcome::Captured)
}

/// Builds a lead candidate from the payload entries named by the field list.
///
/// Source and campaign from the settings are always stamped on the result.
pub fn populate_lead<F>(
    resolver: &F,
    settings: &LeadCaptureSettings,
    payload: &CapturePayload,
) -> ServiceResult<NewLead>
where
    F: FieldResolver + ?Sized,
{
    if settings.field_list.is_empty() {
        return Err(ServiceError::Configuration(NO_FIELD_LIST.to_string()));
    }

    let mut lead = NewLead::default();
    let mut has_data = false;

    for field in &settings.field_list {
        for attribute in resolver.actual_attributes(field) {
            let Some(value) = payload.attribute(attribute) else {
                continue;
            };
            has_data |= !value.is_empty();
            lead.set_attribute(attribute, value.into_text())
                .map_err(|err| ServiceError::BadRequest(format!("{attribute}: {err}")))?;
        }
    }

    if !has_data {
        return Err(ServiceError::BadRequest(NO_DATA.to_string()));
    }

    lead.source = settings.lead_source.clone();
    lead.campaign_id = settings.campaign_id;

    Ok(lead)
}

/// Applies a validated payload: dedup, linking and the capture log record.
///
/// Writes are not rolled back when a later step fails.
pub fn proceed_capture<R, F>(
    repo: &R,
    resolver: &F,
    capture: &LeadCapture,
    payload: CapturePayload,
) -> ServiceResult<LeadCaptureLogRecord>
where
    R: LeadReader
        + LeadWriter
        + ContactReader
        + ContactWriter
        + CampaignReader
        + CampaignWriter
        + LeadCaptureLogWriter
        + ?Sized,
    F: FieldResolver + ?Sized,
{
    let settings = &capture.settings;
    let candidate = populate_lead(resolver, settings, &payload)?;

    let (contact, duplicate) = if candidate.has_identity() {
        let identity = IdentityQuery::from(&candidate);
        (
            repo.find_contact_by_identity(&identity)?,
            repo.find_lead_by_identity(&identity)?,
        )
    } else {
        (None, None)
    };

    let campaign = match settings.campaign_id {
        Some(campaign_id) => repo.get_campaign_by_id(campaign_id)?,
        None => None,
    };
    let campaign_id = campaign.map(|campaign| campaign.id);
    let target_list_id = settings.subscription_target_list();

    if let Some(contact) = contact {
        if let Some(target_list_id) = target_list_id
            && settings.subscribe_contact_to_target_list
            && !repo.is_contact_in_target_list(contact.id, target_list_id)?
        {
            repo.add_contact_to_target_list(contact.id, target_list_id)?;
            log_campaign_action(
                repo,
                campaign_id,
                CampaignAction::OptedIn,
                TargetType::Contact,
                contact.id.get(),
            )?;
        }

        return write_capture_log(
            repo,
            capture,
            TargetType::Contact,
            contact.id.get(),
            false,
            payload,
        );
    }

    let (lead, is_created) = match duplicate {
        Some(lead) => (lead, false),
        None => {
            let lead = repo.create_lead(&candidate).map_err(|err| {
                error!("Failed to create lead: {err}");
                ServiceError::from(err)
            })?;
            (lead, true)
        }
    };

    if let Some(team_id) = settings.target_team_id {
        repo.add_lead_to_team(lead.id, team_id)?;
    }

    if is_created {
        log_campaign_action(
            repo,
            campaign_id,
            CampaignAction::LeadCreated,
            TargetType::Lead,
            lead.id.get(),
        )?;
    }

    if let Some(target_list_id) = target_list_id
        && !repo.is_lead_in_target_list(lead.id, target_list_id)?
    {
        repo.add_lead_to_target_list(lead.id, target_list_id)?;
        log_campaign_action(
            repo,
            campaign_id,
            CampaignAction::OptedIn,
            TargetType::Lead,
            lead.id.get(),
        )?;
    }

    write_capture_log(
        repo,
        capture,
        TargetType::Lead,
        lead.id.get(),
        is_created,
        payload,
    )
}

fn log_campaign_action<R>(
    repo: &R,
    campaign_id: Option<CampaignId>,
    action: CampaignAction,
    parent_type: TargetType,
    parent_id: i32,
) -> ServiceResult<()>
where
    R: CampaignWriter + ?Sized,
{
    let Some(campaign_id) = campaign_id else {
        return Ok(());
    };

    repo.create_campaign_log_record(&NewCampaignLogRecord::new(
        campaign_id,
        action,
        parent_type,
        parent_id,
    ))?;

    Ok(())
}

fn write_capture_log<R>(
    repo: &R,
    capture: &LeadCapture,
    target_type: TargetType,
    target_id: i32,
    is_created: bool,
    payload: CapturePayload,
) -> ServiceResult<LeadCaptureLogRecord>
where
    R: LeadCaptureLogWriter + ?Sized,
{
    let description = payload
        .description()
        .and_then(|text| LogDescription::new(text).ok());

    let record = NewLeadCaptureLogRecord {
        lead_capture_id: capture.id,
        target_type,
        target_id,
        is_created,
        data: payload.into_value(),
        description,
    };

    let record = repo.create_lead_capture_log_record(&record).map_err(|err| {
        error!("Failed to write lead capture log record: {err}");
        ServiceError::from(err)
    })?;

    info!(
        "Lead capture {} applied to {} {} (created: {})",
        capture.id, target_type, target_id, is_created
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::domain::contact::Contact;
    use crate::domain::field::LeadFieldResolver;
    use crate::domain::job::{Job, JobStatus};
    use crate::domain::lead::Lead;
    use crate::domain::lead_capture::DEFAULT_OPT_IN_LIFETIME_HOURS;
    use crate::domain::types::{
        ContactId, EmailAddress, EmailTemplateId, LeadCaptureId, LeadCaptureLogRecordId,
        LeadCaptureName, LeadId, LeadSource, TargetListId, TeamId,
    };
    use crate::repository::mock::MockRepository;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn capture(fields: &[&str]) -> LeadCapture {
        let now = Utc::now().naive_utc();
        LeadCapture {
            id: LeadCaptureId::new(1).unwrap(),
            api_key: ApiKey::new(KEY).unwrap(),
            settings: LeadCaptureSettings {
                name: LeadCaptureName::new("Website").unwrap(),
                field_list: fields.iter().map(|f| f.to_string()).collect(),
                campaign_id: None,
                lead_source: None,
                target_list_id: None,
                subscribe_to_target_list: false,
                subscribe_contact_to_target_list: false,
                target_team_id: None,
                opt_in_confirmation: false,
                opt_in_confirmation_email_template_id: None,
                opt_in_confirmation_lifetime: DEFAULT_OPT_IN_LIFETIME_HOURS,
            },
            created_at: now,
            updated_at: now,
        }
    }

    fn lead_from(id: i32, new: &NewLead) -> Lead {
        let now = Utc::now().naive_utc();
        Lead {
            id: LeadId::new(id).unwrap(),
            salutation_name: new.salutation_name.clone(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            title: new.title.clone(),
            account_name: new.account_name.clone(),
            email_address: new.email_address.clone(),
            phone_number: new.phone_number.clone(),
            website: new.website.clone(),
            address_street: new.address_street.clone(),
            address_city: new.address_city.clone(),
            address_state: new.address_state.clone(),
            address_country: new.address_country.clone(),
            address_postal_code: new.address_postal_code.clone(),
            description: new.description.clone(),
            source: new.source.clone(),
            campaign_id: new.campaign_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn log_from(new: &NewLeadCaptureLogRecord) -> LeadCaptureLogRecord {
        LeadCaptureLogRecord {
            id: LeadCaptureLogRecordId::new(1).unwrap(),
            lead_capture_id: new.lead_capture_id,
            target_type: new.target_type,
            target_id: new.target_id,
            is_created: new.is_created,
            data: new.data.clone(),
            description: new.description.clone(),
            created_at: Utc::now().naive_utc(),
        }
    }

    fn expect_capture(repo: &mut MockRepository, capture: LeadCapture) {
        repo.expect_get_lead_capture_by_api_key()
            .times(1)
            .returning(move |_| Ok(Some(capture.clone())));
    }

    #[test]
    fn malformed_api_key_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_capture_by_api_key().times(0);

        let result = capture_lead(&repo, &LeadFieldResolver, "not-a-key", json!({}));

        assert!(matches!(result, Err(ServiceError::NotFound(msg)) if msg == INVALID_API_KEY));
    }

    #[test]
    fn unknown_api_key_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_capture_by_api_key()
            .times(1)
            .returning(|_| Ok(None));

        let result = capture_lead(&repo, &LeadFieldResolver, KEY, json!({}));

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn populate_requires_field_list() {
        let capture = capture(&[]);
        let payload = CapturePayload::from_value(json!({"firstName": "Jo"})).unwrap();

        let result = populate_lead(&LeadFieldResolver, &capture.settings, &payload);

        assert!(matches!(result, Err(ServiceError::Configuration(msg)) if msg == NO_FIELD_LIST));
    }

    #[test]
    fn populate_rejects_empty_or_unmapped_payloads() {
        let capture = capture(&["emailAddress", "firstName"]);

        for body in [
            json!({"firstName": "", "emailAddress": null}),
            json!({"password": "secret"}),
            json!({"firstName": false}),
        ] {
            let payload = CapturePayload::from_value(body).unwrap();
            let result = populate_lead(&LeadFieldResolver, &capture.settings, &payload);
            assert!(matches!(result, Err(ServiceError::BadRequest(msg)) if msg == NO_DATA));
        }
    }

    #[test]
    fn populate_expands_composite_fields_and_stamps_source() {
        let mut capture = capture(&["name", "address"]);
        capture.settings.lead_source = LeadSource::new("Web Site").ok();
        let payload = CapturePayload::from_value(json!({
            "firstName": "Jo",
            "lastName": "Doe",
            "addressCity": "Perm",
            "title": "ignored",
        }))
        .unwrap();

        let lead = populate_lead(&LeadFieldResolver, &capture.settings, &payload).unwrap();

        assert_eq!(lead.first_name.as_deref(), Some("Jo"));
        assert_eq!(lead.last_name.as_deref(), Some("Doe"));
        assert_eq!(lead.address_city.as_deref(), Some("Perm"));
        assert_eq!(lead.title, None);
        assert_eq!(lead.source.as_ref().map(|s| s.as_str()), Some("Web Site"));
    }

    #[test]
    fn populate_rejects_invalid_email() {
        let capture = capture(&["emailAddress"]);
        let payload = CapturePayload::from_value(json!({"emailAddress": "nope"})).unwrap();

        let result = populate_lead(&LeadFieldResolver, &capture.settings, &payload);

        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    }

    #[test]
    fn opt_in_capture_queues_job_without_creating_lead() {
        let mut repo = MockRepository::new();
        let mut capture = capture(&["emailAddress"]);
        capture.settings.opt_in_confirmation = true;
        capture.settings.opt_in_confirmation_email_template_id = EmailTemplateId::new(4).ok();
        expect_capture(&mut repo, capture);

        repo.expect_create_job()
            .withf(|job| {
                job.service_name == LEAD_CAPTURE_SERVICE
                    && job.method_name == OPT_IN_CONFIRMATION_METHOD
                    && job.data["leadCaptureId"] == json!(1)
                    && job.data["data"]["emailAddress"] == json!("a@x.com")
            })
            .times(1)
            .returning(|job| {
                Ok(Job {
                    id: JobId::new(9).unwrap(),
                    service_name: job.service_name.clone(),
                    method_name: job.method_name.clone(),
                    data: job.data.clone(),
                    status: JobStatus::Pending,
                    attempts: 0,
                    created_at: Utc::now().naive_utc(),
                    executed_at: None,
                })
            });
        repo.expect_create_lead().times(0);
        repo.expect_create_lead_capture_log_record().times(0);

        let outcome =
            capture_lead(&repo, &LeadFieldResolver, KEY, json!({"emailAddress": "a@x.com"}))
                .unwrap();

        assert_eq!(
            outcome,
            CaptureOutcome::Deferred {
                job_id: JobId::new(9).unwrap()
            }
        );
    }

    #[test]
    fn opt_in_without_template_is_configuration_error() {
        let mut repo = MockRepository::new();
        let mut capture = capture(&["emailAddress"]);
        capture.settings.opt_in_confirmation = true;
        expect_capture(&mut repo, capture);
        repo.expect_create_job().times(0);

        let result =
            capture_lead(&repo, &LeadFieldResolver, KEY, json!({"emailAddress": "a@x.com"}));

        assert!(matches!(result, Err(ServiceError::Configuration(_))));
    }

    #[test]
    fn new_lead_is_created_and_logged() {
        let mut repo = MockRepository::new();
        expect_capture(&mut repo, capture(&["emailAddress", "firstName"]));

        repo.expect_find_contact_by_identity()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_find_lead_by_identity()
            .withf(|query| query.email.as_ref().map(EmailAddress::as_str) == Some("a@x.com"))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create_lead()
            .withf(|lead| lead.first_name.as_deref() == Some("Jo"))
            .times(1)
            .returning(|lead| Ok(lead_from(7, lead)));
        repo.expect_create_campaign_log_record().times(0);
        repo.expect_create_lead_capture_log_record()
            .withf(|record| {
                record.target_type == TargetType::Lead
                    && record.target_id == 7
                    && record.is_created
                    && record.data["firstName"] == json!("Jo")
            })
            .times(1)
            .returning(|record| Ok(log_from(record)));

        let outcome = capture_lead(
            &repo,
            &LeadFieldResolver,
            KEY,
            json!({"emailAddress": "a@x.com", "firstName": "Jo"}),
        )
        .unwrap();

        assert!(matches!(outcome, CaptureOutcome::Captured(record) if record.is_created));
    }

    #[test]
    fn duplicate_lead_is_linked_not_recreated() {
        let mut repo = MockRepository::new();
        let mut capture = capture(&["emailAddress"]);
        capture.settings.target_team_id = TeamId::new(3).ok();
        capture.settings.target_list_id = TargetListId::new(5).ok();
        capture.settings.subscribe_to_target_list = true;
        expect_capture(&mut repo, capture);

        let existing = lead_from(
            11,
            &NewLead {
                email_address: EmailAddress::new("a@x.com").ok(),
                ..NewLead::default()
            },
        );

        repo.expect_find_contact_by_identity()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_find_lead_by_identity()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create_lead().times(0);
        repo.expect_add_lead_to_team()
            .withf(|lead_id, team_id| lead_id.get() == 11 && team_id.get() == 3)
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_is_lead_in_target_list()
            .times(1)
            .returning(|_, _| Ok(true));
        repo.expect_add_lead_to_target_list().times(0);
        repo.expect_create_lead_capture_log_record()
            .withf(|record| record.target_id == 11 && !record.is_created)
            .times(1)
            .returning(|record| Ok(log_from(record)));

        capture_lead(&repo, &LeadFieldResolver, KEY, json!({"emailAddress": "A@X.com"}))
            .unwrap();
    }

    #[test]
    fn contact_match_subscribes_contact_only() {
        let mut repo = MockRepository::new();
        let mut capture = capture(&["emailAddress"]);
        capture.settings.target_list_id = TargetListId::new(5).ok();
        capture.settings.subscribe_to_target_list = true;
        capture.settings.subscribe_contact_to_target_list = true;
        capture.settings.target_team_id = TeamId::new(3).ok();
        expect_capture(&mut repo, capture);

        let contact = Contact {
            id: ContactId::new(21).unwrap(),
            first_name: None,
            last_name: None,
            email_address: EmailAddress::new("a@x.com").ok(),
            phone_number: None,
            created_at: Utc::now().naive_utc(),
        };

        repo.expect_find_contact_by_identity()
            .times(1)
            .returning(move |_| Ok(Some(contact.clone())));
        repo.expect_find_lead_by_identity()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_is_contact_in_target_list()
            .times(1)
            .returning(|_, _| Ok(false));
        repo.expect_add_contact_to_target_list()
            .withf(|contact_id, list_id| contact_id.get() == 21 && list_id.get() == 5)
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_create_lead().times(0);
        repo.expect_add_lead_to_team().times(0);
        repo.expect_create_lead_capture_log_record()
            .withf(|record| {
                record.target_type == TargetType::Contact
                    && record.target_id == 21
                    && !record.is_created
            })
            .times(1)
            .returning(|record| Ok(log_from(record)));

        capture_lead(&repo, &LeadFieldResolver, KEY, json!({"emailAddress": "a@x.com"}))
            .unwrap();
    }

    #[test]
    fn candidate_without_identity_skips_dedup_lookup() {
        let mut repo = MockRepository::new();
        expect_capture(&mut repo, capture(&["firstName"]));

        repo.expect_find_contact_by_identity().times(0);
        repo.expect_find_lead_by_identity().times(0);
        repo.expect_create_lead()
            .times(1)
            .returning(|lead| Ok(lead_from(4, lead)));
        repo.expect_create_lead_capture_log_record()
            .withf(|record| record.target_id == 4 && record.is_created)
            .times(1)
            .returning(|record| Ok(log_from(record)));

        capture_lead(&repo, &LeadFieldResolver, KEY, json!({"firstName": "Jo"})).unwrap();
    }
}
