//! DTOs returned by the lead capture admin endpoints.

use serde::Serialize;
use serde_json::{Map, Value};

/// Ready-to-use request illustrating how to call a capture endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleRequest {
    pub method: String,
    pub url: String,
    pub payload: Map<String, Value>,
}

/// Result payload of the regenerate-key action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegeneratedKey {
    pub api_key: String,
}
