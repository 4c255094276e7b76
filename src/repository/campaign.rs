use diesel::prelude::*;

use crate::{
    domain::{
        campaign::{Campaign, CampaignLogRecord, NewCampaignLogRecord},
        types::CampaignId,
    },
    models::campaign::{
        Campaign as DbCampaign, CampaignLogRecord as DbCampaignLogRecord,
        NewCampaignLogRecord as DbNewCampaignLogRecord,
    },
    repository::{
        CampaignReader, CampaignWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CampaignReader for DieselRepository {
    fn get_campaign_by_id(&self, id: CampaignId) -> RepositoryResult<Option<Campaign>> {
        use crate::schema::campaigns;

        let mut conn = self.conn()?;

        let campaign = campaigns::table
            .find(id.get())
            .first::<DbCampaign>(&mut conn)
            .optional()?;

        campaign
            .map(Campaign::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_campaign_log_records(
        &self,
        campaign_id: CampaignId,
    ) -> RepositoryResult<Vec<CampaignLogRecord>> {
        use crate::schema::campaign_log_records;

        let mut conn = self.conn()?;

        campaign_log_records::table
            .filter(campaign_log_records::campaign_id.eq(campaign_id.get()))
            .order(campaign_log_records::id.asc())
            .load::<DbCampaignLogRecord>(&mut conn)?
            .into_iter()
            .map(|db| CampaignLogRecord::try_from(db).map_err(RepositoryError::from))
            .collect()
    }
}

impl CampaignWriter for DieselRepository {
    fn create_campaign_log_record(
        &self,
        record: &NewCampaignLogRecord,
    ) -> RepositoryResult<CampaignLogRecord> {
        use crate::schema::campaign_log_records;

        let mut conn = self.conn()?;

        let insertable: DbNewCampaignLogRecord = record.into();

        let db_record = diesel::insert_into(campaign_log_records::table)
            .values(&insertable)
            .get_result::<DbCampaignLogRecord>(&mut conn)?;

        CampaignLogRecord::try_from(db_record).map_err(RepositoryError::from)
    }
}
