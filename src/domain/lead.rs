use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::field::LeadAttribute;
use crate::domain::types::{
    CampaignId, EmailAddress, LeadId, LeadSource, PhoneNumber, TypeConstraintError,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub salutation_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub account_name: Option<String>,
    pub email_address: Option<EmailAddress>,
    pub phone_number: Option<PhoneNumber>,
    pub website: Option<String>,
    pub address_street: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_country: Option<String>,
    pub address_postal_code: Option<String>,
    pub description: Option<String>,
    pub source: Option<LeadSource>,
    pub campaign_id: Option<CampaignId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Lead candidate populated from a capture payload.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NewLead {
    pub salutation_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub account_name: Option<String>,
    pub email_address: Option<EmailAddress>,
    pub phone_number: Option<PhoneNumber>,
    pub website: Option<String>,
    pub address_street: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub address_country: Option<String>,
    pub address_postal_code: Option<String>,
    pub description: Option<String>,
    pub source: Option<LeadSource>,
    pub campaign_id: Option<CampaignId>,
}

impl NewLead {
    /// Assigns a single attribute, replacing any earlier value.
    ///
    /// `None` clears the attribute. Email addresses are validated; phone
    /// numbers are normalized.
    pub fn set_attribute(
        &mut self,
        attribute: LeadAttribute,
        value: Option<String>,
    ) -> Result<(), TypeConstraintError> {
        match attribute {
            LeadAttribute::EmailAddress => {
                self.email_address = value.map(EmailAddress::new).transpose()?;
            }
            LeadAttribute::PhoneNumber => {
                self.phone_number = value.map(PhoneNumber::new).transpose()?;
            }
            LeadAttribute::SalutationName => self.salutation_name = value,
            LeadAttribute::FirstName => self.first_name = value,
            LeadAttribute::LastName => self.last_name = value,
            LeadAttribute::Title => self.title = value,
            LeadAttribute::AccountName => self.account_name = value,
            LeadAttribute::Website => self.website = value,
            LeadAttribute::AddressStreet => self.address_street = value,
            LeadAttribute::AddressCity => self.address_city = value,
            LeadAttribute::AddressState => self.address_state = value,
            LeadAttribute::AddressCountry => self.address_country = value,
            LeadAttribute::AddressPostalCode => self.address_postal_code = value,
            LeadAttribute::Description => self.description = value,
        }
        Ok(())
    }

    /// True when the candidate carries a dedup key.
    pub fn has_identity(&self) -> bool {
        self.email_address.is_some() || self.phone_number.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_attribute_routes_values_to_fields() {
        let mut lead = NewLead::default();

        lead.set_attribute(LeadAttribute::FirstName, Some("Jo".into()))
            .unwrap();
        lead.set_attribute(LeadAttribute::AddressCity, Some("Perm".into()))
            .unwrap();
        lead.set_attribute(LeadAttribute::EmailAddress, Some("A@X.com".into()))
            .unwrap();

        assert_eq!(lead.first_name.as_deref(), Some("Jo"));
        assert_eq!(lead.address_city.as_deref(), Some("Perm"));
        assert_eq!(
            lead.email_address.as_ref().map(EmailAddress::as_str),
            Some("a@x.com")
        );
        assert!(lead.has_identity());
    }

    #[test]
    fn set_attribute_rejects_invalid_email() {
        let mut lead = NewLead::default();

        let result = lead.set_attribute(LeadAttribute::EmailAddress, Some("nope".into()));

        assert_eq!(result, Err(TypeConstraintError::InvalidEmail));
        assert!(!lead.has_identity());
    }

    #[test]
    fn set_attribute_none_clears_value() {
        let mut lead = NewLead {
            title: Some("CEO".into()),
            ..NewLead::default()
        };

        lead.set_attribute(LeadAttribute::Title, None).unwrap();

        assert_eq!(lead.title, None);
    }
}
