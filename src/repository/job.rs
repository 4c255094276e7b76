//! Repository implementation for the persisted job queue.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        job::{Job, JobStatus, NewJob},
        types::JobId,
    },
    models::job::{Job as DbJob, NewJob as DbNewJob},
    repository::{
        DieselRepository, JobReader, JobWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl JobReader for DieselRepository {
    fn list_pending_jobs(&self, limit: usize) -> RepositoryResult<Vec<Job>> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;

        jobs::table
            .filter(jobs::status.eq(JobStatus::Pending.to_string()))
            .order((jobs::created_at.asc(), jobs::id.asc()))
            .limit(limit as i64)
            .load::<DbJob>(&mut conn)?
            .into_iter()
            .map(|db| Job::try_from(db).map_err(RepositoryError::from))
            .collect()
    }
}

impl JobWriter for DieselRepository {
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;

        let insertable: DbNewJob = new_job.into();

        let db_job = diesel::insert_into(jobs::table)
            .values(&insertable)
            .get_result::<DbJob>(&mut conn)?;

        Job::try_from(db_job).map_err(RepositoryError::from)
    }

    fn start_job(&self, id: JobId) -> RepositoryResult<Job> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;

        let db_job = diesel::update(jobs::table.find(id.get()))
            .set((
                jobs::status.eq(JobStatus::Running.to_string()),
                jobs::attempts.eq(jobs::attempts + 1),
            ))
            .get_result::<DbJob>(&mut conn)?;

        Job::try_from(db_job).map_err(RepositoryError::from)
    }

    fn finish_job(&self, id: JobId, status: JobStatus) -> RepositoryResult<()> {
        use crate::schema::jobs;

        let mut conn = self.conn()?;

        let affected = diesel::update(jobs::table.find(id.get()))
            .set((
                jobs::status.eq(status.to_string()),
                jobs::executed_at.eq(Some(Utc::now().naive_utc())),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
