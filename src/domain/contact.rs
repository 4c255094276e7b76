use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ContactId, EmailAddress, PhoneNumber};

/// CRM contact owned by the entity store; lead capture only matches and
/// subscribes it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<EmailAddress>,
    pub phone_number: Option<PhoneNumber>,
    pub created_at: NaiveDateTime,
}
