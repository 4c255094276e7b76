//! Diesel models for the lead capture audit log.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    lead_capture_log::{
        LeadCaptureLogRecord as DomainLeadCaptureLogRecord,
        NewLeadCaptureLogRecord as DomainNewLeadCaptureLogRecord, TargetType,
    },
    types::{LeadCaptureId, LeadCaptureLogRecordId, LogDescription, TypeConstraintError},
};
use crate::models::lead_capture::LeadCapture;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(LeadCapture, foreign_key = lead_capture_id))]
#[diesel(table_name = crate::schema::lead_capture_log_records)]
pub struct LeadCaptureLogRecord {
    pub id: i32,
    pub lead_capture_id: i32,
    pub target_type: String,
    pub target_id: i32,
    pub is_created: bool,
    pub data: String, // store JSON text in the DB
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::lead_capture_log_records)]
pub struct NewLeadCaptureLogRecord<'a> {
    pub lead_capture_id: i32,
    pub target_type: String,
    pub target_id: i32,
    pub is_created: bool,
    pub data: String,
    pub description: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<LeadCaptureLogRecord> for DomainLeadCaptureLogRecord {
    type Error = TypeConstraintError;

    fn try_from(record: LeadCaptureLogRecord) -> Result<Self, Self::Error> {
        let data = serde_json::from_str(&record.data).unwrap_or_default();

        Ok(Self {
            id: LeadCaptureLogRecordId::new(record.id)?,
            lead_capture_id: LeadCaptureId::new(record.lead_capture_id)?,
            target_type: TargetType::try_from(record.target_type.as_str())?,
            target_id: record.target_id,
            is_created: record.is_created,
            data,
            description: record.description.map(LogDescription::new).transpose()?,
            created_at: record.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewLeadCaptureLogRecord> for NewLeadCaptureLogRecord<'a> {
    fn from(record: &'a DomainNewLeadCaptureLogRecord) -> Self {
        Self {
            lead_capture_id: record.lead_capture_id.get(),
            target_type: record.target_type.to_string(),
            target_id: record.target_id,
            is_created: record.is_created,
            data: record.data.to_string(),
            description: record.description.as_ref().map(LogDescription::as_str),
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_record_stores_payload_as_json_text() {
        let domain = DomainNewLeadCaptureLogRecord {
            lead_capture_id: LeadCaptureId::new(1).unwrap(),
            target_type: TargetType::Contact,
            target_id: 12,
            is_created: false,
            data: json!({"emailAddress": "a@x.com"}),
            description: LogDescription::new("hello").ok(),
        };

        let insertable: NewLeadCaptureLogRecord = (&domain).into();

        assert_eq!(insertable.target_type, "Contact");
        assert_eq!(insertable.data, r#"{"emailAddress":"a@x.com"}"#);
        assert_eq!(insertable.description, Some("hello"));
    }
}
