//! Pending double opt-in confirmations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::payload::CapturePayload;
use crate::domain::types::{ConfirmationToken, LeadCaptureId, OptInConfirmationId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OptInConfirmation {
    pub id: OptInConfirmationId,
    pub token: ConfirmationToken,
    pub lead_capture_id: LeadCaptureId,
    pub data: CapturePayload,
    pub terminate_at: NaiveDateTime,
    pub confirmed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl OptInConfirmation {
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now > self.terminate_at
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewOptInConfirmation {
    pub token: ConfirmationToken,
    pub lead_capture_id: LeadCaptureId,
    pub data: CapturePayload,
    pub terminate_at: NaiveDateTime,
}

impl NewOptInConfirmation {
    /// Issues a fresh token valid until `terminate_at`.
    #[must_use]
    pub fn new(
        lead_capture_id: LeadCaptureId,
        data: CapturePayload,
        terminate_at: NaiveDateTime,
    ) -> Self {
        Self {
            token: ConfirmationToken::generate(),
            lead_capture_id,
            data,
            terminate_at,
        }
    }
}
