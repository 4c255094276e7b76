//! Repository implementation for leads and their team/target list links.

use diesel::prelude::*;

use crate::{
    domain::{
        lead::{Lead, NewLead},
        types::{LeadId, TargetListId, TeamId},
    },
    models::lead::{
        Lead as DbLead, NewLead as DbNewLead, NewLeadTargetList as DbNewLeadTargetList,
        NewLeadTeam as DbNewLeadTeam,
    },
    repository::{
        DieselRepository, IdentityQuery, LeadReader, LeadWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let lead = leads::table
            .find(id.get())
            .first::<DbLead>(&mut conn)
            .optional()?;

        lead.map(Lead::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn find_lead_by_identity(&self, query: &IdentityQuery) -> RepositoryResult<Option<Lead>> {
        use crate::schema::leads;

        let mut items = leads::table.into_boxed::<diesel::sqlite::Sqlite>();

        items = match (&query.email, &query.phone) {
            (Some(email), Some(phone)) => items.filter(
                leads::email_address
                    .eq(email.as_str())
                    .or(leads::phone_number.eq(phone.as_str())),
            ),
            (Some(email), None) => items.filter(leads::email_address.eq(email.as_str())),
            (None, Some(phone)) => items.filter(leads::phone_number.eq(phone.as_str())),
            (None, None) => return Ok(None),
        };

        let mut conn = self.conn()?;

        let lead = items
            .order(leads::id.asc())
            .first::<DbLead>(&mut conn)
            .optional()?;

        lead.map(Lead::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn is_lead_in_target_list(
        &self,
        lead_id: LeadId,
        target_list_id: TargetListId,
    ) -> RepositoryResult<bool> {
        use crate::schema::lead_target_lists;

        let mut conn = self.conn()?;

        let exists = diesel::select(diesel::dsl::exists(
            lead_target_lists::table
                .filter(lead_target_lists::lead_id.eq(lead_id.get()))
                .filter(lead_target_lists::target_list_id.eq(target_list_id.get())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let insertable: DbNewLead = new_lead.into();

        let db_lead = diesel::insert_into(leads::table)
            .values(&insertable)
            .get_result::<DbLead>(&mut conn)?;

        Lead::try_from(db_lead).map_err(RepositoryError::from)
    }

    fn add_lead_to_team(&self, lead_id: LeadId, team_id: TeamId) -> RepositoryResult<()> {
        use crate::schema::lead_teams;

        let mut conn = self.conn()?;

        diesel::insert_or_ignore_into(lead_teams::table)
            .values(&DbNewLeadTeam {
                lead_id: lead_id.get(),
                team_id: team_id.get(),
            })
            .execute(&mut conn)?;

        Ok(())
    }

    fn add_lead_to_target_list(
        &self,
        lead_id: LeadId,
        target_list_id: TargetListId,
    ) -> RepositoryResult<()> {
        use crate::schema::lead_target_lists;

        let mut conn = self.conn()?;

        diesel::insert_or_ignore_into(lead_target_lists::table)
            .values(&DbNewLeadTargetList {
                lead_id: lead_id.get(),
                target_list_id: target_list_id.get(),
            })
            .execute(&mut conn)?;

        Ok(())
    }
}
