//! Lead capture configuration: one public intake endpoint per record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ApiKey, CampaignId, EmailTemplateId, LeadCaptureId, LeadCaptureName, LeadSource,
    TargetListId, TeamId, TypeConstraintError,
};

/// Default opt-in confirmation link lifetime, in hours.
pub const DEFAULT_OPT_IN_LIFETIME_HOURS: i32 = 48;

/// Admin-editable part of a lead capture config. The API key is not part of
/// it and can only change through key regeneration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LeadCaptureSettings {
    pub name: LeadCaptureName,
    /// Logical lead field names accepted from the payload.
    pub field_list: Vec<String>,
    pub campaign_id: Option<CampaignId>,
    pub lead_source: Option<LeadSource>,
    pub target_list_id: Option<TargetListId>,
    pub subscribe_to_target_list: bool,
    pub subscribe_contact_to_target_list: bool,
    pub target_team_id: Option<TeamId>,
    pub opt_in_confirmation: bool,
    pub opt_in_confirmation_email_template_id: Option<EmailTemplateId>,
    pub opt_in_confirmation_lifetime: i32,
}

impl LeadCaptureSettings {
    /// Rejects an opt-in flow without a confirmation template.
    pub fn validate(&self) -> Result<(), TypeConstraintError> {
        if self.opt_in_confirmation && self.opt_in_confirmation_email_template_id.is_none() {
            return Err(TypeConstraintError::InvalidValue(
                "opt-in confirmation requires an email template".to_string(),
            ));
        }
        if self.opt_in_confirmation_lifetime <= 0 {
            return Err(TypeConstraintError::InvalidValue(
                "opt-in confirmation lifetime must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Target list to subscribe captured records to, when enabled.
    pub fn subscription_target_list(&self) -> Option<TargetListId> {
        if self.subscribe_to_target_list {
            self.target_list_id
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LeadCapture {
    pub id: LeadCaptureId,
    pub api_key: ApiKey,
    #[serde(flatten)]
    pub settings: LeadCaptureSettings,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewLeadCapture {
    pub api_key: ApiKey,
    pub settings: LeadCaptureSettings,
}

impl NewLeadCapture {
    /// Attaches a freshly generated API key to the settings.
    #[must_use]
    pub fn new(settings: LeadCaptureSettings) -> Self {
        Self {
            api_key: ApiKey::generate(),
            settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LeadCaptureSettings {
        LeadCaptureSettings {
            name: LeadCaptureName::new("Website form").unwrap(),
            field_list: vec!["emailAddress".to_string()],
            campaign_id: None,
            lead_source: None,
            target_list_id: TargetListId::new(3).ok(),
            subscribe_to_target_list: false,
            subscribe_contact_to_target_list: false,
            target_team_id: None,
            opt_in_confirmation: false,
            opt_in_confirmation_email_template_id: None,
            opt_in_confirmation_lifetime: DEFAULT_OPT_IN_LIFETIME_HOURS,
        }
    }

    #[test]
    fn opt_in_without_template_is_invalid() {
        let mut settings = settings();
        settings.opt_in_confirmation = true;

        assert!(settings.validate().is_err());

        settings.opt_in_confirmation_email_template_id = EmailTemplateId::new(1).ok();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn target_list_requires_subscription_flag() {
        let mut settings = settings();
        assert_eq!(settings.subscription_target_list(), None);

        settings.subscribe_to_target_list = true;
        assert_eq!(settings.subscription_target_list(), TargetListId::new(3).ok());
    }

    #[test]
    fn new_lead_capture_gets_fresh_key() {
        let first = NewLeadCapture::new(settings());
        let second = NewLeadCapture::new(settings());

        assert_ne!(first.api_key, second.api_key);
    }
}
