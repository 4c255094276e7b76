use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    opt_in::{
        NewOptInConfirmation as DomainNewOptInConfirmation,
        OptInConfirmation as DomainOptInConfirmation,
    },
    payload::CapturePayload,
    types::{ConfirmationToken, LeadCaptureId, OptInConfirmationId, TypeConstraintError},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::opt_in_confirmations)]
pub struct OptInConfirmation {
    pub id: i32,
    pub token: String,
    pub lead_capture_id: i32,
    pub data: String,
    pub terminate_at: NaiveDateTime,
    pub confirmed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::opt_in_confirmations)]
pub struct NewOptInConfirmation<'a> {
    pub token: &'a str,
    pub lead_capture_id: i32,
    pub data: String,
    pub terminate_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl TryFrom<OptInConfirmation> for DomainOptInConfirmation {
    type Error = TypeConstraintError;

    fn try_from(confirmation: OptInConfirmation) -> Result<Self, Self::Error> {
        let data = serde_json::from_str(&confirmation.data)
            .map_err(|e| TypeConstraintError::InvalidValue(e.to_string()))
            .and_then(CapturePayload::from_value)?;

        Ok(Self {
            id: OptInConfirmationId::new(confirmation.id)?,
            token: ConfirmationToken::new(confirmation.token)?,
            lead_capture_id: LeadCaptureId::new(confirmation.lead_capture_id)?,
            data,
            terminate_at: confirmation.terminate_at,
            confirmed_at: confirmation.confirmed_at,
            created_at: confirmation.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewOptInConfirmation> for NewOptInConfirmation<'a> {
    fn from(confirmation: &'a DomainNewOptInConfirmation) -> Self {
        Self {
            token: confirmation.token.as_str(),
            lead_capture_id: confirmation.lead_capture_id.get(),
            data: confirmation.data.as_value().to_string(),
            terminate_at: confirmation.terminate_at,
            created_at: Utc::now().naive_utc(),
        }
    }
}
