//! Deferred work items processed by the job worker.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::payload::CapturePayload;
use crate::domain::types::{JobId, LeadCaptureId, TypeConstraintError};

/// Service name under which lead capture jobs are queued.
pub const LEAD_CAPTURE_SERVICE: &str = "LeadCapture";
/// Method name of the opt-in confirmation job.
pub const OPT_IN_CONFIRMATION_METHOD: &str = "optInConfirmationJob";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Success,
    Failed,
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "Pending"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Success => write!(f, "Success"),
            JobStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl TryFrom<&str> for JobStatus {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Pending" => Ok(JobStatus::Pending),
            "Running" => Ok(JobStatus::Running),
            "Success" => Ok(JobStatus::Success),
            "Failed" => Ok(JobStatus::Failed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown job status {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub service_name: String,
    pub method_name: String,
    pub data: Value,
    pub status: JobStatus,
    pub attempts: i32,
    pub created_at: NaiveDateTime,
    pub executed_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewJob {
    pub service_name: String,
    pub method_name: String,
    pub data: Value,
}

impl NewJob {
    #[must_use]
    pub fn new(
        service_name: impl Into<String>,
        method_name: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            method_name: method_name.into(),
            data,
        }
    }
}

/// Data carried by an `optInConfirmationJob`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptInJobData {
    pub lead_capture_id: LeadCaptureId,
    pub data: CapturePayload,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn opt_in_job_data_uses_camel_case_keys() {
        let data = OptInJobData {
            lead_capture_id: LeadCaptureId::new(5).unwrap(),
            data: CapturePayload::from_value(json!({"emailAddress": "a@x.com"})).unwrap(),
        };

        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(
            value,
            json!({"leadCaptureId": 5, "data": {"emailAddress": "a@x.com"}})
        );
        let back: OptInJobData = serde_json::from_value(value).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn job_status_parses_known_labels() {
        assert_eq!(JobStatus::try_from("Failed"), Ok(JobStatus::Failed));
        assert!(JobStatus::try_from("Queued").is_err());
    }
}
