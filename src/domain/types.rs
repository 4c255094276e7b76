//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, well-formed API keys) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::{ops::Deref, str::FromStr};

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Provided key or token is not 32 lowercase hex characters.
    #[error("invalid token format")]
    InvalidToken,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(LeadCaptureId, "Unique identifier for a lead capture config.");
id_newtype!(LeadId, "Unique identifier for a lead.");
id_newtype!(ContactId, "Unique identifier for a contact.");
id_newtype!(CampaignId, "Unique identifier for a marketing campaign.");
id_newtype!(TargetListId, "Unique identifier for a target list.");
id_newtype!(TeamId, "Unique identifier for a team.");
id_newtype!(EmailTemplateId, "Unique identifier for an email template.");
id_newtype!(JobId, "Unique identifier for a queued job.");
id_newtype!(
    LeadCaptureLogRecordId,
    "Unique identifier for a lead capture log record."
);
id_newtype!(
    CampaignLogRecordId,
    "Unique identifier for a campaign log record."
);
id_newtype!(
    OptInConfirmationId,
    "Unique identifier for a pending opt-in confirmation."
);

/// Lower-cased and validated email address of a lead or contact.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for EmailAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Normalizes a phone number string to E.164 format.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Phone number used as a dedup key.
///
/// Numbers carrying an international prefix are stored in E.164; anything
/// the parser rejects is kept as trimmed input so web forms with local
/// numbers still match on exact text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = NonEmptyString::new(value)?;
        let normalized =
            normalize_phone_to_e164(raw.as_str()).unwrap_or_else(|_| raw.into_inner());
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    LeadCaptureName,
    "Admin-facing label of a lead capture config."
);

non_empty_string_newtype!(
    LeadSource,
    "Lead source label stamped onto captured leads."
);

/// Free-text note attached to a capture log record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogDescription(String);

impl LogDescription {
    /// Constructs a sanitized, trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(sanitized)?;
        Ok(Self(inner.into_inner()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for LogDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LogDescription> for String {
    fn from(value: LogDescription) -> Self {
        value.0
    }
}

/// Number of random bytes behind keys and tokens.
const TOKEN_BYTES: usize = 16;

/// Returns 128 random bits encoded as 32 lowercase hex characters.
fn random_hex_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    hex::encode(bytes)
}

fn is_hex_token(value: &str) -> bool {
    value.len() == TOKEN_BYTES * 2
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Macro to generate random 128-bit hex secrets.
macro_rules! hex_token_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh random value. Uniqueness is not checked.
            pub fn generate() -> Self {
                Self(random_hex_token())
            }

            /// Wraps an existing value, requiring 32 lowercase hex characters.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                if is_hex_token(&value) {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::InvalidToken)
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

hex_token_newtype!(
    ApiKey,
    "Secret identifying a public lead capture endpoint."
);

hex_token_newtype!(
    ConfirmationToken,
    "Secret embedded in an opt-in confirmation link."
);

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn id_newtype_rejects_non_positive_values() {
        assert_eq!(LeadId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(LeadId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(LeadId::new(7).map(LeadId::get), Ok(7));
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = EmailAddress::new("  Jo@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "jo@example.com");
        assert_eq!(
            EmailAddress::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn phone_is_normalized_when_parseable() {
        let phone = PhoneNumber::new("+7 (912) 345-67-89").unwrap();
        assert_eq!(phone.as_str(), "+79123456789");
    }

    #[test]
    fn phone_falls_back_to_trimmed_input() {
        let phone = PhoneNumber::new("  555-0100 ").unwrap();
        assert_eq!(phone.as_str(), "555-0100");
        assert_eq!(PhoneNumber::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn generated_api_keys_are_lowercase_hex() {
        let keys: HashSet<String> = (0..64).map(|_| ApiKey::generate().into_inner()).collect();

        assert_eq!(keys.len(), 64);
        for key in keys {
            assert_eq!(key.len(), 32);
            assert!(
                key.chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
            );
            assert!(ApiKey::new(key).is_ok());
        }
    }

    #[test]
    fn api_key_rejects_malformed_values() {
        assert_eq!(ApiKey::new("abc"), Err(TypeConstraintError::InvalidToken));
        assert_eq!(
            ApiKey::new("0123456789ABCDEF0123456789ABCDEF"),
            Err(TypeConstraintError::InvalidToken)
        );
        assert!("0123456789abcdef0123456789abcdef".parse::<ApiKey>().is_ok());
    }

    #[test]
    fn log_description_strips_markup() {
        let description = LogDescription::new("<script>x()</script>Call me").unwrap();
        assert_eq!(description.as_str(), "Call me");
    }
}
