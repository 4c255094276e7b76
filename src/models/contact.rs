use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{
    contact::Contact as DomainContact,
    types::{ContactId, EmailAddress, PhoneNumber, TypeConstraintError},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::contacts)]
pub struct Contact {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contact_target_lists)]
pub struct NewContactTargetList {
    pub contact_id: i32,
    pub target_list_id: i32,
}

impl TryFrom<Contact> for DomainContact {
    type Error = TypeConstraintError;

    fn try_from(contact: Contact) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactId::new(contact.id)?,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email_address: contact.email_address.map(EmailAddress::new).transpose()?,
            phone_number: contact.phone_number.map(PhoneNumber::new).transpose()?,
            created_at: contact.created_at,
        })
    }
}
