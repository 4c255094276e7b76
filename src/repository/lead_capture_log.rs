use diesel::prelude::*;

use crate::{
    domain::{
        lead_capture_log::{LeadCaptureLogRecord, NewLeadCaptureLogRecord},
        types::LeadCaptureId,
    },
    models::lead_capture_log::{
        LeadCaptureLogRecord as DbLeadCaptureLogRecord,
        NewLeadCaptureLogRecord as DbNewLeadCaptureLogRecord,
    },
    repository::{
        DieselRepository, LeadCaptureLogReader, LeadCaptureLogWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl LeadCaptureLogReader for DieselRepository {
    fn list_lead_capture_log_records(
        &self,
        lead_capture_id: LeadCaptureId,
    ) -> RepositoryResult<Vec<LeadCaptureLogRecord>> {
        use crate::schema::lead_capture_log_records;

        let mut conn = self.conn()?;

        lead_capture_log_records::table
            .filter(lead_capture_log_records::lead_capture_id.eq(lead_capture_id.get()))
            .order((
                lead_capture_log_records::created_at.desc(),
                lead_capture_log_records::id.desc(),
            ))
            .load::<DbLeadCaptureLogRecord>(&mut conn)?
            .into_iter()
            .map(|db| LeadCaptureLogRecord::try_from(db).map_err(RepositoryError::from))
            .collect()
    }
}

impl LeadCaptureLogWriter for DieselRepository {
    fn create_lead_capture_log_record(
        &self,
        record: &NewLeadCaptureLogRecord,
    ) -> RepositoryResult<LeadCaptureLogRecord> {
        use crate::schema::lead_capture_log_records;

        let mut conn = self.conn()?;

        let insertable: DbNewLeadCaptureLogRecord = record.into();

        let db_record = diesel::insert_into(lead_capture_log_records::table)
            .values(&insertable)
            .get_result::<DbLeadCaptureLogRecord>(&mut conn)?;

        LeadCaptureLogRecord::try_from(db_record).map_err(RepositoryError::from)
    }
}
