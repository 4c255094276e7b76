//! Repository implementation for contact matching and subscriptions.

use diesel::prelude::*;

use crate::{
    domain::{
        contact::Contact,
        types::{ContactId, TargetListId},
    },
    models::contact::{Contact as DbContact, NewContactTargetList as DbNewContactTargetList},
    repository::{
        ContactReader, ContactWriter, DieselRepository, IdentityQuery,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ContactReader for DieselRepository {
    fn find_contact_by_identity(
        &self,
        query: &IdentityQuery,
    ) -> RepositoryResult<Option<Contact>> {
        use crate::schema::contacts;

        let mut items = contacts::table.into_boxed::<diesel::sqlite::Sqlite>();

        items = match (&query.email, &query.phone) {
            (Some(email), Some(phone)) => items.filter(
                contacts::email_address
                    .eq(email.as_str())
                    .or(contacts::phone_number.eq(phone.as_str())),
            ),
            (Some(email), None) => items.filter(contacts::email_address.eq(email.as_str())),
            (None, Some(phone)) => items.filter(contacts::phone_number.eq(phone.as_str())),
            (None, None) => return Ok(None),
        };

        let mut conn = self.conn()?;

        let contact = items
            .order(contacts::id.asc())
            .first::<DbContact>(&mut conn)
            .optional()?;

        contact
            .map(Contact::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn is_contact_in_target_list(
        &self,
        contact_id: ContactId,
        target_list_id: TargetListId,
    ) -> RepositoryResult<bool> {
        use crate::schema::contact_target_lists;

        let mut conn = self.conn()?;

        let exists = diesel::select(diesel::dsl::exists(
            contact_target_lists::table
                .filter(contact_target_lists::contact_id.eq(contact_id.get()))
                .filter(contact_target_lists::target_list_id.eq(target_list_id.get())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }
}

impl ContactWriter for DieselRepository {
    fn add_contact_to_target_list(
        &self,
        contact_id: ContactId,
        target_list_id: TargetListId,
    ) -> RepositoryResult<()> {
        use crate::schema::contact_target_lists;

        let mut conn = self.conn()?;

        diesel::insert_or_ignore_into(contact_target_lists::table)
            .values(&DbNewContactTargetList {
                contact_id: contact_id.get(),
                target_list_id: target_list_id.get(),
            })
            .execute(&mut conn)?;

        Ok(())
    }
}
