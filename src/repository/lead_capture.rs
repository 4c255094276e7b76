//! Repository implementation for lead capture configs.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        lead_capture::{LeadCapture, LeadCaptureSettings, NewLeadCapture},
        types::{ApiKey, LeadCaptureId},
    },
    models::lead_capture::{
        LeadCapture as DbLeadCapture, NewLeadCapture as DbNewLeadCapture,
        UpdateLeadCapture as DbUpdateLeadCapture,
    },
    repository::{
        DieselRepository, LeadCaptureReader, LeadCaptureWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl LeadCaptureReader for DieselRepository {
    fn get_lead_capture_by_id(&self, id: LeadCaptureId) -> RepositoryResult<Option<LeadCapture>> {
        use crate::schema::lead_captures;

        let mut conn = self.conn()?;

        let capture = lead_captures::table
            .find(id.get())
            .first::<DbLeadCapture>(&mut conn)
            .optional()?;

        capture
            .map(LeadCapture::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_lead_capture_by_api_key(
        &self,
        api_key: &ApiKey,
    ) -> RepositoryResult<Option<LeadCapture>> {
        use crate::schema::lead_captures;

        let mut conn = self.conn()?;

        let capture = lead_captures::table
            .filter(lead_captures::api_key.eq(api_key.as_str()))
            .order(lead_captures::id.asc())
            .first::<DbLeadCapture>(&mut conn)
            .optional()?;

        capture
            .map(LeadCapture::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_lead_captures(&self) -> RepositoryResult<Vec<LeadCapture>> {
        use crate::schema::lead_captures;

        let mut conn = self.conn()?;

        lead_captures::table
            .order(lead_captures::id.asc())
            .load::<DbLeadCapture>(&mut conn)?
            .into_iter()
            .map(|db| LeadCapture::try_from(db).map_err(RepositoryError::from))
            .collect()
    }
}

impl LeadCaptureWriter for DieselRepository {
    fn create_lead_capture(&self, new_capture: &NewLeadCapture) -> RepositoryResult<LeadCapture> {
        use crate::schema::lead_captures;

        let mut conn = self.conn()?;

        let insertable: DbNewLeadCapture = new_capture.into();

        let db_capture = diesel::insert_into(lead_captures::table)
            .values(&insertable)
            .get_result::<DbLeadCapture>(&mut conn)?;

        LeadCapture::try_from(db_capture).map_err(RepositoryError::from)
    }

    fn update_lead_capture(
        &self,
        id: LeadCaptureId,
        settings: &LeadCaptureSettings,
    ) -> RepositoryResult<LeadCapture> {
        use crate::schema::lead_captures;

        let mut conn = self.conn()?;

        let changes: DbUpdateLeadCapture = settings.into();

        let db_capture = diesel::update(lead_captures::table.find(id.get()))
            .set(&changes)
            .get_result::<DbLeadCapture>(&mut conn)?;

        LeadCapture::try_from(db_capture).map_err(RepositoryError::from)
    }

    fn update_lead_capture_api_key(
        &self,
        id: LeadCaptureId,
        api_key: &ApiKey,
    ) -> RepositoryResult<LeadCapture> {
        use crate::schema::lead_captures;

        let mut conn = self.conn()?;

        let db_capture = diesel::update(lead_captures::table.find(id.get()))
            .set((
                lead_captures::api_key.eq(api_key.as_str()),
                lead_captures::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbLeadCapture>(&mut conn)?;

        LeadCapture::try_from(db_capture).map_err(RepositoryError::from)
    }
}
