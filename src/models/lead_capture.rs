//! Diesel models for lead capture configs.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde_json::json;

use crate::domain::{
    lead_capture::{
        LeadCapture as DomainLeadCapture, LeadCaptureSettings,
        NewLeadCapture as DomainNewLeadCapture,
    },
    types::{
        ApiKey, CampaignId, EmailTemplateId, LeadCaptureId, LeadCaptureName, LeadSource,
        TargetListId, TeamId, TypeConstraintError,
    },
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::lead_captures)]
/// Diesel model for [`crate::domain::lead_capture::LeadCapture`].
pub struct LeadCapture {
    pub id: i32,
    pub name: String,
    pub api_key: String,
    pub field_list: String, // JSON array of field names
    pub campaign_id: Option<i32>,
    pub lead_source: Option<String>,
    pub target_list_id: Option<i32>,
    pub subscribe_to_target_list: bool,
    pub subscribe_contact_to_target_list: bool,
    pub target_team_id: Option<i32>,
    pub opt_in_confirmation: bool,
    pub opt_in_confirmation_email_template_id: Option<i32>,
    pub opt_in_confirmation_lifetime: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::lead_captures)]
pub struct NewLeadCapture<'a> {
    pub name: &'a str,
    pub api_key: &'a str,
    pub field_list: String,
    pub campaign_id: Option<i32>,
    pub lead_source: Option<&'a str>,
    pub target_list_id: Option<i32>,
    pub subscribe_to_target_list: bool,
    pub subscribe_contact_to_target_list: bool,
    pub target_team_id: Option<i32>,
    pub opt_in_confirmation: bool,
    pub opt_in_confirmation_email_template_id: Option<i32>,
    pub opt_in_confirmation_lifetime: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::lead_captures)]
#[diesel(treat_none_as_null = true)]
/// Editable columns; `api_key` is deliberately absent.
pub struct UpdateLeadCapture<'a> {
    pub name: &'a str,
    pub field_list: String,
    pub campaign_id: Option<i32>,
    pub lead_source: Option<&'a str>,
    pub target_list_id: Option<i32>,
    pub subscribe_to_target_list: bool,
    pub subscribe_contact_to_target_list: bool,
    pub target_team_id: Option<i32>,
    pub opt_in_confirmation: bool,
    pub opt_in_confirmation_email_template_id: Option<i32>,
    pub opt_in_confirmation_lifetime: i32,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<LeadCapture> for DomainLeadCapture {
    type Error = TypeConstraintError;

    fn try_from(db: LeadCapture) -> Result<Self, Self::Error> {
        let field_list: Vec<String> = serde_json::from_str(&db.field_list).unwrap_or_default();

        Ok(Self {
            id: LeadCaptureId::new(db.id)?,
            api_key: ApiKey::new(db.api_key)?,
            settings: LeadCaptureSettings {
                name: LeadCaptureName::new(db.name)?,
                field_list,
                campaign_id: db.campaign_id.map(CampaignId::new).transpose()?,
                lead_source: db.lead_source.map(LeadSource::new).transpose()?,
                target_list_id: db.target_list_id.map(TargetListId::new).transpose()?,
                subscribe_to_target_list: db.subscribe_to_target_list,
                subscribe_contact_to_target_list: db.subscribe_contact_to_target_list,
                target_team_id: db.target_team_id.map(TeamId::new).transpose()?,
                opt_in_confirmation: db.opt_in_confirmation,
                opt_in_confirmation_email_template_id: db
                    .opt_in_confirmation_email_template_id
                    .map(EmailTemplateId::new)
                    .transpose()?,
                opt_in_confirmation_lifetime: db.opt_in_confirmation_lifetime,
            },
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewLeadCapture> for NewLeadCapture<'a> {
    fn from(capture: &'a DomainNewLeadCapture) -> Self {
        let settings = &capture.settings;
        let now = Utc::now().naive_utc();
        Self {
            name: settings.name.as_str(),
            api_key: capture.api_key.as_str(),
            field_list: json!(settings.field_list).to_string(),
            campaign_id: settings.campaign_id.map(CampaignId::get),
            lead_source: settings.lead_source.as_ref().map(LeadSource::as_str),
            target_list_id: settings.target_list_id.map(TargetListId::get),
            subscribe_to_target_list: settings.subscribe_to_target_list,
            subscribe_contact_to_target_list: settings.subscribe_contact_to_target_list,
            target_team_id: settings.target_team_id.map(TeamId::get),
            opt_in_confirmation: settings.opt_in_confirmation,
            opt_in_confirmation_email_template_id: settings
                .opt_in_confirmation_email_template_id
                .map(EmailTemplateId::get),
            opt_in_confirmation_lifetime: settings.opt_in_confirmation_lifetime,
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> From<&'a LeadCaptureSettings> for UpdateLeadCapture<'a> {
    fn from(settings: &'a LeadCaptureSettings) -> Self {
        Self {
            name: settings.name.as_str(),
            field_list: json!(settings.field_list).to_string(),
            campaign_id: settings.campaign_id.map(CampaignId::get),
            lead_source: settings.lead_source.as_ref().map(LeadSource::as_str),
            target_list_id: settings.target_list_id.map(TargetListId::get),
            subscribe_to_target_list: settings.subscribe_to_target_list,
            subscribe_contact_to_target_list: settings.subscribe_contact_to_target_list,
            target_team_id: settings.target_team_id.map(TeamId::get),
            opt_in_confirmation: settings.opt_in_confirmation,
            opt_in_confirmation_email_template_id: settings
                .opt_in_confirmation_email_template_id
                .map(EmailTemplateId::get),
            opt_in_confirmation_lifetime: settings.opt_in_confirmation_lifetime,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead_capture::DEFAULT_OPT_IN_LIFETIME_HOURS;

    fn db_capture() -> LeadCapture {
        let now = Utc::now().naive_utc();
        LeadCapture {
            id: 4,
            name: "Landing".to_string(),
            api_key: "0123456789abcdef0123456789abcdef".to_string(),
            field_list: r#"["emailAddress","name"]"#.to_string(),
            campaign_id: Some(2),
            lead_source: Some("Web Site".to_string()),
            target_list_id: None,
            subscribe_to_target_list: false,
            subscribe_contact_to_target_list: false,
            target_team_id: Some(9),
            opt_in_confirmation: false,
            opt_in_confirmation_email_template_id: None,
            opt_in_confirmation_lifetime: DEFAULT_OPT_IN_LIFETIME_HOURS,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn db_capture_into_domain() {
        let domain = DomainLeadCapture::try_from(db_capture()).unwrap();

        assert_eq!(domain.id.get(), 4);
        assert_eq!(domain.settings.field_list, vec!["emailAddress", "name"]);
        assert_eq!(domain.settings.campaign_id.map(CampaignId::get), Some(2));
        assert_eq!(domain.settings.target_team_id.map(TeamId::get), Some(9));
        assert_eq!(
            domain.settings.lead_source.as_ref().map(LeadSource::as_str),
            Some("Web Site")
        );
    }

    #[test]
    fn corrupted_api_key_is_rejected() {
        let mut db = db_capture();
        db.api_key = "short".to_string();

        assert_eq!(
            DomainLeadCapture::try_from(db),
            Err(TypeConstraintError::InvalidToken)
        );
    }

    #[test]
    fn update_changeset_serializes_field_list() {
        let domain = DomainLeadCapture::try_from(db_capture()).unwrap();

        let changes: UpdateLeadCapture = (&domain.settings).into();

        assert_eq!(changes.field_list, r#"["emailAddress","name"]"#);
        assert_eq!(changes.campaign_id, Some(2));
        assert_eq!(changes.lead_source, Some("Web Site"));
    }
}
