use crate::{
    db::{DbConnection, DbPool},
    domain::{
        campaign::{Campaign, CampaignLogRecord, NewCampaignLogRecord},
        contact::Contact,
        job::{Job, JobStatus, NewJob},
        lead::{Lead, NewLead},
        lead_capture::{LeadCapture, LeadCaptureSettings, NewLeadCapture},
        lead_capture_log::{LeadCaptureLogRecord, NewLeadCaptureLogRecord},
        opt_in::{NewOptInConfirmation, OptInConfirmation},
        types::{
            ApiKey, CampaignId, ConfirmationToken, ContactId, EmailAddress, JobId, LeadCaptureId,
            LeadId, OptInConfirmationId, PhoneNumber, TargetListId, TeamId,
        },
    },
    repository::errors::RepositoryResult,
};

pub mod campaign;
pub mod contact;
pub mod errors;
pub mod job;
pub mod lead;
pub mod lead_capture;
pub mod lead_capture_log;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod opt_in;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Dedup lookup matching any record whose email OR phone equals the given
/// values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityQuery {
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
}

impl IdentityQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: EmailAddress) -> Self {
        self.email = Some(email);
        self
    }

    pub fn phone(mut self, phone: PhoneNumber) -> Self {
        self.phone = Some(phone);
        self
    }
}

impl From<&NewLead> for IdentityQuery {
    fn from(lead: &NewLead) -> Self {
        Self {
            email: lead.email_address.clone(),
            phone: lead.phone_number.clone(),
        }
    }
}

pub trait LeadCaptureReader {
    fn get_lead_capture_by_id(&self, id: LeadCaptureId) -> RepositoryResult<Option<LeadCapture>>;
    fn get_lead_capture_by_api_key(&self, api_key: &ApiKey)
    -> RepositoryResult<Option<LeadCapture>>;
    fn list_lead_captures(&self) -> RepositoryResult<Vec<LeadCapture>>;
}

pub trait LeadCaptureWriter {
    fn create_lead_capture(&self, new_capture: &NewLeadCapture) -> RepositoryResult<LeadCapture>;
    fn update_lead_capture(
        &self,
        id: LeadCaptureId,
        settings: &LeadCaptureSettings,
    ) -> RepositoryResult<LeadCapture>;
    fn update_lead_capture_api_key(
        &self,
        id: LeadCaptureId,
        api_key: &ApiKey,
    ) -> RepositoryResult<LeadCapture>;
}

pub trait LeadReader {
    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>>;
    fn find_lead_by_identity(&self, query: &IdentityQuery) -> RepositoryResult<Option<Lead>>;
    fn is_lead_in_target_list(
        &self,
        lead_id: LeadId,
        target_list_id: TargetListId,
    ) -> RepositoryResult<bool>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    fn add_lead_to_team(&self, lead_id: LeadId, team_id: TeamId) -> RepositoryResult<()>;
    fn add_lead_to_target_list(
        &self,
        lead_id: LeadId,
        target_list_id: TargetListId,
    ) -> RepositoryResult<()>;
}

pub trait ContactReader {
    fn find_contact_by_identity(&self, query: &IdentityQuery)
    -> RepositoryResult<Option<Contact>>;
    fn is_contact_in_target_list(
        &self,
        contact_id: ContactId,
        target_list_id: TargetListId,
    ) -> RepositoryResult<bool>;
}

pub trait ContactWriter {
    fn add_contact_to_target_list(
        &self,
        contact_id: ContactId,
        target_list_id: TargetListId,
    ) -> RepositoryResult<()>;
}

pub trait CampaignReader {
    fn get_campaign_by_id(&self, id: CampaignId) -> RepositoryResult<Option<Campaign>>;
    fn list_campaign_log_records(
        &self,
        campaign_id: CampaignId,
    ) -> RepositoryResult<Vec<CampaignLogRecord>>;
}

pub trait CampaignWriter {
    fn create_campaign_log_record(
        &self,
        record: &NewCampaignLogRecord,
    ) -> RepositoryResult<CampaignLogRecord>;
}

pub trait LeadCaptureLogReader {
    fn list_lead_capture_log_records(
        &self,
        lead_capture_id: LeadCaptureId,
    ) -> RepositoryResult<Vec<LeadCaptureLogRecord>>;
}

pub trait LeadCaptureLogWriter {
    fn create_lead_capture_log_record(
        &self,
        record: &NewLeadCaptureLogRecord,
    ) -> RepositoryResult<LeadCaptureLogRecord>;
}

pub trait JobReader {
    fn list_pending_jobs(&self, limit: usize) -> RepositoryResult<Vec<Job>>;
}

pub trait JobWriter {
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job>;
    /// Moves a job to `Running` and counts the attempt.
    fn start_job(&self, id: JobId) -> RepositoryResult<Job>;
    fn finish_job(&self, id: JobId, status: JobStatus) -> RepositoryResult<()>;
}

pub trait OptInConfirmationReader {
    fn get_opt_in_confirmation_by_token(
        &self,
        token: &ConfirmationToken,
    ) -> RepositoryResult<Option<OptInConfirmation>>;
}

pub trait OptInConfirmationWriter {
    fn create_opt_in_confirmation(
        &self,
        confirmation: &NewOptInConfirmation,
    ) -> RepositoryResult<OptInConfirmation>;
    /// Sets `confirmed_at` only if it is unset; false when already claimed.
    fn claim_opt_in_confirmation(&self, id: OptInConfirmationId) -> RepositoryResult<bool>;
    fn release_opt_in_confirmation(&self, id: OptInConfirmationId) -> RepositoryResult<()>;
}
