//! Externally submitted capture payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::field::LeadAttribute;
use crate::domain::types::TypeConstraintError;

/// Scalar value found for an attribute in a payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadValue {
    /// `null`, `false` or a blank string.
    Empty,
    Text(String),
}

impl PayloadValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadValue::Empty)
    }

    /// Returns the trimmed text, if any.
    pub fn into_text(self) -> Option<String> {
        match self {
            PayloadValue::Empty => None,
            PayloadValue::Text(text) => Some(text),
        }
    }
}

/// Flat JSON object received on the capture endpoint.
///
/// The raw object is retained as-is for the job queue and the audit log;
/// reads go through [`CapturePayload::attribute`], which only understands
/// scalar values of known lead attributes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapturePayload(Map<String, Value>);

impl CapturePayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Accepts only JSON objects.
    pub fn from_value(value: Value) -> Result<Self, TypeConstraintError> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(TypeConstraintError::InvalidValue(
                "payload must be a JSON object".to_string(),
            )),
        }
    }

    /// Looks up a lead attribute.
    ///
    /// `None` means the key is absent or holds an array/object; present
    /// scalars are stringified and trimmed.
    pub fn attribute(&self, attribute: LeadAttribute) -> Option<PayloadValue> {
        scalar(self.0.get(attribute.key())?)
    }

    /// Non-empty email address carried by the payload, if any.
    pub fn email_address(&self) -> Option<String> {
        self.attribute(LeadAttribute::EmailAddress)
            .and_then(PayloadValue::into_text)
    }

    /// Non-empty `description` entry, used for the capture log.
    pub fn description(&self) -> Option<String> {
        self.attribute(LeadAttribute::Description)
            .and_then(PayloadValue::into_text)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn scalar(value: &Value) -> Option<PayloadValue> {
    let text = match value {
        Value::Null | Value::Bool(false) => return Some(PayloadValue::Empty),
        Value::Bool(true) => "1".to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        Value::Array(_) | Value::Object(_) => return None,
    };

    if text.is_empty() {
        Some(PayloadValue::Empty)
    } else {
        Some(PayloadValue::Text(text))
    }
}
