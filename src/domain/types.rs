//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty identifiers and names,
//! normalized/validated email) so that once a value reaches the domain layer it
//! can be treated as trusted by the list views.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
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

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
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
    RecordId,
    "Identifier assigned by the remote API. Numeric ids are kept in their decimal form."
);

non_empty_string_newtype!(PersonName, "Display name of a user, client or broker.");

non_empty_string_newtype!(CompanyName, "Registered name of an insured or broker company.");

non_empty_string_newtype!(
    CertificateNumber,
    "Certificate number as printed on the issued document."
);

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
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

/// Phone number as the API sent it, with its E.164 form when it parses.
///
/// Search runs over both, so `555-2671` and `+14155552671` find the same
/// record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber {
    display: String,
    e164: Option<String>,
}

impl PhoneNumber {
    /// Trims the input. Blank input is rejected; unparsable numbers are kept
    /// without an E.164 form.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let display = value.into().trim().to_string();
        if display.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        let e164 = normalize_phone_to_e164(&display).ok();
        Ok(Self { display, e164 })
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }

    pub fn e164(&self) -> Option<&str> {
        self.e164.as_deref()
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_non_empty() {
        let name = PersonName::new("  Jane Roe ").unwrap();
        assert_eq!(name.as_str(), "Jane Roe");
        assert_eq!(
            PersonName::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn email_is_lowercased() {
        let email = EmailAddress::new(" Broker@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "broker@example.com");
        assert_eq!(
            EmailAddress::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn phone_keeps_display_and_e164_forms() {
        let phone = PhoneNumber::new("+1 415-555-2671").unwrap();
        assert_eq!(phone.as_str(), "+1 415-555-2671");
        assert_eq!(phone.e164(), Some("+14155552671"));

        let extension = PhoneNumber::new(" ext. 42 ").unwrap();
        assert_eq!(extension.as_str(), "ext. 42");
        assert_eq!(extension.e164(), None);

        assert_eq!(PhoneNumber::new("  "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn record_id_deserializes_through_constraints() {
        let id: RecordId = serde_json::from_str("\"  17 \"").unwrap();
        assert_eq!(id.as_str(), "17");
        assert!(serde_json::from_str::<RecordId>("\"\"").is_err());
    }
}
