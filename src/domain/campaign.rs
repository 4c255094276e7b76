use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::lead_capture_log::TargetType;
use crate::domain::types::{CampaignId, CampaignLogRecordId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
}

/// Campaign attribution events emitted by lead capture.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CampaignAction {
    LeadCreated,
    OptedIn,
    Other(String),
}

impl Display for CampaignAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignAction::LeadCreated => write!(f, "Lead Created"),
            CampaignAction::OptedIn => write!(f, "Opted In"),
            CampaignAction::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CampaignAction {
    fn from(s: &str) -> Self {
        match s {
            "Lead Created" => CampaignAction::LeadCreated,
            "Opted In" => CampaignAction::OptedIn,
            _ => CampaignAction::Other(s.to_string()),
        }
    }
}

impl From<String> for CampaignAction {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CampaignLogRecord {
    pub id: CampaignLogRecordId,
    pub campaign_id: CampaignId,
    pub action: CampaignAction,
    pub parent_type: TargetType,
    pub parent_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCampaignLogRecord {
    pub campaign_id: CampaignId,
    pub action: CampaignAction,
    pub parent_type: TargetType,
    pub parent_id: i32,
}

impl NewCampaignLogRecord {
    #[must_use]
    pub fn new(
        campaign_id: CampaignId,
        action: CampaignAction,
        parent_type: TargetType,
        parent_id: i32,
    ) -> Self {
        Self {
            campaign_id,
            action,
            parent_type,
            parent_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_round_trips_through_labels() {
        assert_eq!(CampaignAction::LeadCreated.to_string(), "Lead Created");
        assert_eq!(CampaignAction::from("Opted In"), CampaignAction::OptedIn);
        assert_eq!(
            CampaignAction::from("Bounced"),
            CampaignAction::Other("Bounced".to_string())
        );
    }
}
