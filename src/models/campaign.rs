//! Diesel models for campaigns and their attribution log.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    campaign::{
        Campaign as DomainCampaign, CampaignLogRecord as DomainCampaignLogRecord,
        NewCampaignLogRecord as DomainNewCampaignLogRecord,
    },
    lead_capture_log::TargetType,
    types::{CampaignId, CampaignLogRecordId, TypeConstraintError},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::campaigns)]
pub struct Campaign {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Campaign, foreign_key = campaign_id))]
#[diesel(table_name = crate::schema::campaign_log_records)]
pub struct CampaignLogRecord {
    pub id: i32,
    pub campaign_id: i32,
    pub action: String,
    pub parent_type: String,
    pub parent_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::campaign_log_records)]
pub struct NewCampaignLogRecord {
    pub campaign_id: i32,
    pub action: String,
    pub parent_type: String,
    pub parent_id: i32,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Campaign> for DomainCampaign {
    type Error = TypeConstraintError;

    fn try_from(campaign: Campaign) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CampaignId::new(campaign.id)?,
            name: campaign.name,
        })
    }
}

impl TryFrom<CampaignLogRecord> for DomainCampaignLogRecord {
    type Error = TypeConstraintError;

    fn try_from(record: CampaignLogRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CampaignLogRecordId::new(record.id)?,
            campaign_id: CampaignId::new(record.campaign_id)?,
            action: record.action.into(),
            parent_type: TargetType::try_from(record.parent_type.as_str())?,
            parent_id: record.parent_id,
            created_at: record.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewCampaignLogRecord> for NewCampaignLogRecord {
    fn from(record: &'a DomainNewCampaignLogRecord) -> Self {
        Self {
            campaign_id: record.campaign_id.get(),
            action: record.action.to_string(),
            parent_type: record.parent_type.to_string(),
            parent_id: record.parent_id,
            created_at: Utc::now().naive_utc(),
        }
    }
}
