//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::campaign::{Campaign, CampaignLogRecord, NewCampaignLogRecord};
use crate::domain::contact::Contact;
use crate::domain::job::{Job, JobStatus, NewJob};
use crate::domain::lead::{Lead, NewLead};
use crate::domain::lead_capture::{LeadCapture, LeadCaptureSettings, NewLeadCapture};
use crate::domain::lead_capture_log::{LeadCaptureLogRecord, NewLeadCaptureLogRecord};
use crate::domain::opt_in::{NewOptInConfirmation, OptInConfirmation};
use crate::domain::types::{
    ApiKey, CampaignId, ConfirmationToken, ContactId, JobId, LeadCaptureId, LeadId,
    OptInConfirmationId, TargetListId, TeamId,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CampaignReader, CampaignWriter, ContactReader, ContactWriter, IdentityQuery, JobReader,
    JobWriter, LeadCaptureLogReader, LeadCaptureLogWriter, LeadCaptureReader, LeadCaptureWriter,
    LeadReader, LeadWriter, OptInConfirmationReader, OptInConfirmationWriter,
};

mock! {
    pub Repository {}

    impl LeadCaptureReader for Repository {
        fn get_lead_capture_by_id(&self, id: LeadCaptureId) -> RepositoryResult<Option<LeadCapture>>;
        fn get_lead_capture_by_api_key(
            &self,
            api_key: &ApiKey,
        ) -> RepositoryResult<Option<LeadCapture>>;
        fn list_lead_captures(&self) -> RepositoryResult<Vec<LeadCapture>>;
    }

    impl LeadCaptureWriter for Repository {
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

    impl LeadReader for Repository {
        fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>>;
        fn find_lead_by_identity(&self, query: &IdentityQuery) -> RepositoryResult<Option<Lead>>;
        fn is_lead_in_target_list(
            &self,
            lead_id: LeadId,
            target_list_id: TargetListId,
        ) -> RepositoryResult<bool>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        fn add_lead_to_team(&self, lead_id: LeadId, team_id: TeamId) -> RepositoryResult<()>;
        fn add_lead_to_target_list(
            &self,
            lead_id: LeadId,
            target_list_id: TargetListId,
        ) -> RepositoryResult<()>;
    }

    impl ContactReader for Repository {
        fn find_contact_by_identity(
            &self,
            query: &IdentityQuery,
        ) -> RepositoryResult<Option<Contact>>;
        fn is_contact_in_target_list(
            &self,
            contact_id: ContactId,
            target_list_id: TargetListId,
        ) -> RepositoryResult<bool>;
    }

    impl ContactWriter for Repository {
        fn add_contact_to_target_list(
            &self,
            contact_id: ContactId,
            target_list_id: TargetListId,
        ) -> RepositoryResult<()>;
    }

    impl CampaignReader for Repository {
        fn get_campaign_by_id(&self, id: CampaignId) -> RepositoryResult<Option<Campaign>>;
        fn list_campaign_log_records(
            &self,
            campaign_id: CampaignId,
        ) -> RepositoryResult<Vec<CampaignLogRecord>>;
    }

    impl CampaignWriter for Repository {
        fn create_campaign_log_record(
            &self,
            record: &NewCampaignLogRecord,
        ) -> RepositoryResult<CampaignLogRecord>;
    }

    impl LeadCaptureLogReader for Repository {
        fn list_lead_capture_log_records(
            &self,
            lead_capture_id: LeadCaptureId,
        ) -> RepositoryResult<Vec<LeadCaptureLogRecord>>;
    }

    impl LeadCaptureLogWriter for Repository {
        fn create_lead_capture_log_record(
            &self,
            record: &NewLeadCaptureLogRecord,
        ) -> RepositoryResult<LeadCaptureLogRecord>;
    }

    impl JobReader for Repository {
        fn list_pending_jobs(&self, limit: usize) -> RepositoryResult<Vec<Job>>;
    }

    impl JobWriter for Repository {
        fn create_job(&self, new_job: &NewJob) -> RepositoryResult<Job>;
        fn start_job(&self, id: JobId) -> RepositoryResult<Job>;
        fn finish_job(&self, id: JobId, status: JobStatus) -> RepositoryResult<()>;
    }

    impl OptInConfirmationReader for Repository {
        fn get_opt_in_confirmation_by_token(
            &self,
            token: &ConfirmationToken,
        ) -> RepositoryResult<Option<OptInConfirmation>>;
    }

    impl OptInConfirmationWriter for Repository {
        fn create_opt_in_confirmation(
            &self,
            confirmation: &NewOptInConfirmation,
        ) -> RepositoryResult<OptInConfirmation>;
        fn claim_opt_in_confirmation(&self, id: OptInConfirmationId) -> RepositoryResult<bool>;
        fn release_opt_in_confirmation(&self, id: OptInConfirmationId) -> RepositoryResult<()>;
    }
}
