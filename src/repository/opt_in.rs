use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        opt_in::{NewOptInConfirmation, OptInConfirmation},
        types::{ConfirmationToken, OptInConfirmationId},
    },
    models::opt_in::{
        NewOptInConfirmation as DbNewOptInConfirmation,
        OptInConfirmation as DbOptInConfirmation,
    },
    repository::{
        DieselRepository, OptInConfirmationReader, OptInConfirmationWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl OptInConfirmationReader for DieselRepository {
    fn get_opt_in_confirmation_by_token(
        &self,
        token: &ConfirmationToken,
    ) -> RepositoryResult<Option<OptInConfirmation>> {
        use crate::schema::opt_in_confirmations;

        let mut conn = self.conn()?;

        let confirmation = opt_in_confirmations::table
            .filter(opt_in_confirmations::token.eq(token.as_str()))
            .first::<DbOptInConfirmation>(&mut conn)
            .optional()?;

        confirmation
            .map(OptInConfirmation::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl OptInConfirmationWriter for DieselRepository {
    fn create_opt_in_confirmation(
        &self,
        confirmation: &NewOptInConfirmation,
    ) -> RepositoryResult<OptInConfirmation> {
        use crate::schema::opt_in_confirmations;

        let mut conn = self.conn()?;

        let insertable: DbNewOptInConfirmation = confirmation.into();

        let db_confirmation = diesel::insert_into(opt_in_confirmations::table)
            .values(&insertable)
            .get_result::<DbOptInConfirmation>(&mut conn)?;

        OptInConfirmation::try_from(db_confirmation).map_err(RepositoryError::from)
    }

    fn claim_opt_in_confirmation(&self, id: OptInConfirmationId) -> RepositoryResult<bool> {
        use crate::schema::opt_in_confirmations;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            opt_in_confirmations::table
                .find(id.get())
                .filter(opt_in_confirmations::confirmed_at.is_null()),
        )
        .set(opt_in_confirmations::confirmed_at.eq(Some(Utc::now().naive_utc())))
        .execute(&mut conn)?;

        Ok(affected > 0)
    }

    fn release_opt_in_confirmation(&self, id: OptInConfirmationId) -> RepositoryResult<()> {
        use crate::schema::opt_in_confirmations;

        let mut conn = self.conn()?;

        let affected = diesel::update(opt_in_confirmations::table.find(id.get()))
            .set(opt_in_confirmations::confirmed_at.eq(None::<chrono::NaiveDateTime>))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
