use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request published to the emailer service asking it to render and send an
/// opt-in confirmation email.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ZmqOptInConfirmationMessage {
    pub lead_capture_id: i32,
    pub template_id: i32,
    pub recipient: String,
    pub confirmation_url: String,
    /// Original payload, available to the template as placeholders.
    #[serde(default)]
    pub data: Value,
}
