//! Append-only audit trail of successful captures.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{
    LeadCaptureId, LeadCaptureLogRecordId, LogDescription, TypeConstraintError,
};

/// Kind of record that received captured data.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TargetType {
    Lead,
    Contact,
}

impl Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetType::Lead => write!(f, "Lead"),
            TargetType::Contact => write!(f, "Contact"),
        }
    }
}

impl TryFrom<&str> for TargetType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Lead" => Ok(TargetType::Lead),
            "Contact" => Ok(TargetType::Contact),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown target type {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LeadCaptureLogRecord {
    pub id: LeadCaptureLogRecordId,
    pub lead_capture_id: LeadCaptureId,
    pub target_type: TargetType,
    pub target_id: i32,
    pub is_created: bool,
    pub data: Value,
    pub description: Option<LogDescription>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewLeadCaptureLogRecord {
    pub lead_capture_id: LeadCaptureId,
    pub target_type: TargetType,
    pub target_id: i32,
    pub is_created: bool,
    pub data: Value,
    pub description: Option<LogDescription>,
}
