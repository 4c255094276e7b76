//! Dispatch of persisted background jobs.

use log::{error, info};

use crate::domain::job::{
    Job, JobStatus, LEAD_CAPTURE_SERVICE, OPT_IN_CONFIRMATION_METHOD, OptInJobData,
};
use crate::emailer::ConfirmationSender;
use crate::repository::{JobReader, JobWriter, LeadCaptureReader, OptInConfirmationWriter};
use crate::services::opt_in::opt_in_confirmation_job;
use crate::services::{ServiceError, ServiceResult};

/// Outcome counts of one [`process_pending_jobs`] batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JobBatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl JobBatchReport {
    pub fn processed(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Runs up to `limit` pending jobs in FIFO order.
///
/// A failing job is marked `Failed` and does not stop the batch.
pub fn process_pending_jobs<R, S>(
    repo: &R,
    sender: &S,
    site_url: &str,
    limit: usize,
) -> ServiceResult<JobBatchReport>
where
    R: JobReader + JobWriter + LeadCaptureReader + OptInConfirmationWriter + ?Sized,
    S: ConfirmationSender + ?Sized,
{
    let mut report = JobBatchReport::default();

    for pending in repo.list_pending_jobs(limit)? {
        let job = repo.start_job(pending.id)?;

        let status = match dispatch_job(repo, sender, site_url, &job) {
            Ok(()) => {
                info!(
                    "Job {} ({}::{}) succeeded",
                    job.id, job.service_name, job.method_name
                );
                report.succeeded += 1;
                JobStatus::Success
            }
            Err(err) => {
                error!(
                    "Job {} ({}::{}) failed: {err}",
                    job.id, job.service_name, job.method_name
                );
                report.failed += 1;
                JobStatus::Failed
            }
        };

        repo.finish_job(job.id, status)?;
    }

    Ok(report)
}

fn dispatch_job<R, S>(repo: &R, sender: &S, site_url: &str, job: &Job) -> ServiceResult<()>
where
    R: LeadCaptureReader + OptInConfirmationWriter + ?Sized,
    S: ConfirmationSender + ?Sized,
{
    match (job.service_name.as_str(), job.method_name.as_str()) {
        (LEAD_CAPTURE_SERVICE, OPT_IN_CONFIRMATION_METHOD) => {
            let data: OptInJobData = serde_json::from_value(job.data.clone())
                .map_err(|err| ServiceError::BadRequest(format!("invalid job data: {err}")))?;
            opt_in_confirmation_job(repo, sender, site_url, data)?;
            Ok(())
        }
        (service, method) => Err(ServiceError::Internal(format!(
            "no handler for {service}::{method}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::types::JobId;
    use crate::emailer::MockConfirmationSender;
    use crate::repository::mock::MockRepository;

    fn job(id: i32, service: &str, method: &str, data: Value) -> Job {
        Job {
            id: JobId::new(id).unwrap(),
            service_name: service.to_string(),
            method_name: method.to_string(),
            data,
            status: JobStatus::Pending,
            attempts: 0,
            created_at: Utc::now().naive_utc(),
            executed_at: None,
        }
    }

    #[test]
    fn failing_job_does_not_stop_batch() {
        let mut repo = MockRepository::new();
        let sender = MockConfirmationSender::new();
        let pending = vec![
            job(1, "Unknown", "run", json!({})),
            job(2, LEAD_CAPTURE_SERVICE, OPT_IN_CONFIRMATION_METHOD, json!({"bad": 1})),
        ];
        let started = pending.clone();

        repo.expect_list_pending_jobs()
            .withf(|limit| *limit == 10)
            .times(1)
            .returning(move |_| Ok(pending.clone()));
        repo.expect_start_job()
            .times(2)
            .returning(move |id| {
                Ok(started
                    .iter()
                    .find(|job| job.id == id)
                    .cloned()
                    .unwrap())
            });
        repo.expect_finish_job()
            .withf(|_, status| *status == JobStatus::Failed)
            .times(2)
            .returning(|_, _| Ok(()));

        let report = process_pending_jobs(&repo, &sender, "http://localhost", 10).unwrap();

        assert_eq!(
            report,
            JobBatchReport {
                succeeded: 0,
                failed: 2
            }
        );
        assert_eq!(report.processed(), 2);
    }

    #[test]
    fn empty_queue_is_a_no_op() {
        let mut repo = MockRepository::new();
        let sender = MockConfirmationSender::new();

        repo.expect_list_pending_jobs()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        repo.expect_start_job().times(0);

        let report = process_pending_jobs(&repo, &sender, "http://localhost", 5).unwrap();

        assert_eq!(report.processed(), 0);
    }
}
