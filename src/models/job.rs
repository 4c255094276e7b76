use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    job::{Job as DomainJob, JobStatus, NewJob as DomainNewJob},
    types::{JobId, TypeConstraintError},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::jobs)]
pub struct Job {
    pub id: i32,
    pub service_name: String,
    pub method_name: String,
    pub data: String,
    pub status: String,
    pub attempts: i32,
    pub created_at: NaiveDateTime,
    pub executed_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::jobs)]
pub struct NewJob<'a> {
    pub service_name: &'a str,
    pub method_name: &'a str,
    pub data: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Job> for DomainJob {
    type Error = TypeConstraintError;

    fn try_from(job: Job) -> Result<Self, Self::Error> {
        let data = serde_json::from_str(&job.data).unwrap_or_default();

        Ok(Self {
            id: JobId::new(job.id)?,
            service_name: job.service_name,
            method_name: job.method_name,
            data,
            status: JobStatus::try_from(job.status.as_str())?,
            attempts: job.attempts,
            created_at: job.created_at,
            executed_at: job.executed_at,
        })
    }
}

impl<'a> From<&'a DomainNewJob> for NewJob<'a> {
    fn from(job: &'a DomainNewJob) -> Self {
        Self {
            service_name: &job.service_name,
            method_name: &job.method_name,
            data: job.data.to_string(),
            status: JobStatus::Pending.to_string(),
            created_at: Utc::now().naive_utc(),
        }
    }
}
