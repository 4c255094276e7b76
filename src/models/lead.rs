use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    lead::{Lead as DomainLead, NewLead as DomainNewLead},
    types::{CampaignId, EmailAddress, LeadId, LeadSource, PhoneNumber, TypeConstraintError},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::leads)]
/// Diesel model for [`crate::domain::lead::Lead`].
pub struct Lead {
    pub id: i32,
    pub salutation_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub account_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub address_street: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_country: Option<String>,
    pub address_postal_code: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub campaign_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
/// Insertable form of [`Lead`].
pub struct NewLead<'a> {
    pub salutation_name: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub title: Option<&'a str>,
    pub account_name: Option<&'a str>,
    pub email_address: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub website: Option<&'a str>,
    pub address_street: Option<&'a str>,
    pub address_city: Option<&'a str>,
    pub address_state: Option<&'a str>,
    pub address_country: Option<&'a str>,
    pub address_postal_code: Option<&'a str>,
    pub description: Option<&'a str>,
    pub source: Option<&'a str>,
    pub campaign_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::lead_teams)]
pub struct NewLeadTeam {
    pub lead_id: i32,
    pub team_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::lead_target_lists)]
pub struct NewLeadTargetList {
    pub lead_id: i32,
    pub target_list_id: i32,
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LeadId::new(lead.id)?,
            salutation_name: lead.salutation_name,
            first_name: lead.first_name,
            last_name: lead.last_name,
            title: lead.title,
            account_name: lead.account_name,
            email_address: lead.email_address.map(EmailAddress::new).transpose()?,
            phone_number: lead.phone_number.map(PhoneNumber::new).transpose()?,
            website: lead.website,
            address_street: lead.address_street,
            address_city: lead.address_city,
            address_state: lead.address_state,
            address_country: lead.address_country,
            address_postal_code: lead.address_postal_code,
            description: lead.description,
            source: lead.source.map(LeadSource::new).transpose()?,
            campaign_id: lead.campaign_id.map(CampaignId::new).transpose()?,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(lead: &'a DomainNewLead) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            salutation_name: lead.salutation_name.as_deref(),
            first_name: lead.first_name.as_deref(),
            last_name: lead.last_name.as_deref(),
            title: lead.title.as_deref(),
            account_name: lead.account_name.as_deref(),
            email_address: lead.email_address.as_ref().map(EmailAddress::as_str),
            phone_number: lead.phone_number.as_ref().map(PhoneNumber::as_str),
            website: lead.website.as_deref(),
            address_street: lead.address_street.as_deref(),
            address_city: lead.address_city.as_deref(),
            address_state: lead.address_state.as_deref(),
            address_country: lead.address_country.as_deref(),
            address_postal_code: lead.address_postal_code.as_deref(),
            description: lead.description.as_deref(),
            source: lead.source.as_ref().map(LeadSource::as_str),
            campaign_id: lead.campaign_id.map(CampaignId::get),
            created_at: now,
            updated_at: now,
        }
    }
}
