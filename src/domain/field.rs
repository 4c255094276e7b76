//! Lead field metadata: the closed set of storable lead attributes and the
//! resolver mapping admin-facing field names onto them.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Storable lead attribute that a capture payload may populate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeadAttribute {
    SalutationName,
    FirstName,
    LastName,
    Title,
    AccountName,
    EmailAddress,
    PhoneNumber,
    Website,
    AddressStreet,
    AddressCity,
    AddressState,
    AddressCountry,
    AddressPostalCode,
    Description,
}

impl LeadAttribute {
    /// Payload key carrying this attribute.
    pub const fn key(self) -> &'static str {
        match self {
            LeadAttribute::SalutationName => "salutationName",
            LeadAttribute::FirstName => "firstName",
            LeadAttribute::LastName => "lastName",
            LeadAttribute::Title => "title",
            LeadAttribute::AccountName => "accountName",
            LeadAttribute::EmailAddress => "emailAddress",
            LeadAttribute::PhoneNumber => "phoneNumber",
            LeadAttribute::Website => "website",
            LeadAttribute::AddressStreet => "addressStreet",
            LeadAttribute::AddressCity => "addressCity",
            LeadAttribute::AddressState => "addressState",
            LeadAttribute::AddressCountry => "addressCountry",
            LeadAttribute::AddressPostalCode => "addressPostalCode",
            LeadAttribute::Description => "description",
        }
    }
}

impl Display for LeadAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Maps a logical field name to the attributes that store it.
pub trait FieldResolver {
    /// Returns an empty list for fields that are unknown or not capturable.
    fn actual_attributes(&self, field: &str) -> Vec<LeadAttribute>;
}

/// Static metadata of the CRM `Lead` entity.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeadFieldResolver;

impl FieldResolver for LeadFieldResolver {
    fn actual_attributes(&self, field: &str) -> Vec<LeadAttribute> {
        use LeadAttribute::*;

        match field {
            "name" => vec![SalutationName, FirstName, LastName],
            "salutationName" => vec![SalutationName],
            "firstName" => vec![FirstName],
            "lastName" => vec![LastName],
            "title" => vec![Title],
            "accountName" => vec![AccountName],
            "emailAddress" => vec![EmailAddress],
            "phoneNumber" => vec![PhoneNumber],
            "website" => vec![Website],
            "address" => vec![
                AddressStreet,
                AddressCity,
                AddressState,
                AddressCountry,
                AddressPostalCode,
            ],
            "description" => vec![Description],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_fields_expand_to_all_parts() {
        let resolver = LeadFieldResolver;

        let keys: Vec<_> = resolver
            .actual_attributes("name")
            .into_iter()
            .map(LeadAttribute::key)
            .collect();

        assert_eq!(keys, vec!["salutationName", "firstName", "lastName"]);
        assert_eq!(resolver.actual_attributes("address").len(), 5);
    }

    #[test]
    fn unknown_fields_resolve_to_nothing() {
        let resolver = LeadFieldResolver;

        assert!(resolver.actual_attributes("password").is_empty());
        assert!(resolver.actual_attributes("").is_empty());
    }
}
