use serde::Deserialize;
use validator::Validate;

use crate::domain::lead_capture::{DEFAULT_OPT_IN_LIFETIME_HOURS, LeadCaptureSettings};
use crate::domain::types::{
    CampaignId, EmailTemplateId, LeadCaptureName, LeadSource, TargetListId, TeamId,
    TypeConstraintError,
};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Admin form used for both creating and updating a lead capture.
///
/// The API key is not part of the form; it is issued by the service.
pub struct LeadCaptureForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Logical lead field names, e.g. `name`, `emailAddress`, `address`.
    #[serde(default)]
    pub field_list: Vec<String>,
    pub campaign_id: Option<i32>,
    pub lead_source: Option<String>,
    pub target_list_id: Option<i32>,
    #[serde(default)]
    pub subscribe_to_target_list: bool,
    #[serde(default)]
    pub subscribe_contact_to_target_list: bool,
    pub target_team_id: Option<i32>,
    #[serde(default)]
    pub opt_in_confirmation: bool,
    pub opt_in_confirmation_email_template_id: Option<i32>,
    /// Hours a confirmation link stays valid.
    #[validate(range(min = 1))]
    pub opt_in_confirmation_lifetime: Option<i32>,
}

fn optional_id<T>(value: Option<i32>) -> Result<Option<T>, FormError>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    Ok(value.map(T::try_from).transpose()?)
}

impl TryFrom<LeadCaptureForm> for LeadCaptureSettings {
    type Error = FormError;

    fn try_from(form: LeadCaptureForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let mut field_list: Vec<String> = Vec::with_capacity(form.field_list.len());
        for field in form.field_list {
            let field = field.trim();
            if !field.is_empty() && !field_list.iter().any(|f| f == field) {
                field_list.push(field.to_string());
            }
        }

        let lead_source = form
            .lead_source
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(LeadSource::new)
            .transpose()?;

        let settings = LeadCaptureSettings {
            name: LeadCaptureName::new(form.name)?,
            field_list,
            campaign_id: optional_id::<CampaignId>(form.campaign_id)?,
            lead_source,
            target_list_id: optional_id::<TargetListId>(form.target_list_id)?,
            subscribe_to_target_list: form.subscribe_to_target_list,
            subscribe_contact_to_target_list: form.subscribe_contact_to_target_list,
            target_team_id: optional_id::<TeamId>(form.target_team_id)?,
            opt_in_confirmation: form.opt_in_confirmation,
            opt_in_confirmation_email_template_id: optional_id::<EmailTemplateId>(
                form.opt_in_confirmation_email_template_id,
            )?,
            opt_in_confirmation_lifetime: form
                .opt_in_confirmation_lifetime
                .unwrap_or(DEFAULT_OPT_IN_LIFETIME_HOURS),
        };

        settings.validate()?;

        Ok(settings)
    }
}
