//! Customer contact details collected at checkout.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

// International dialing: optional '+', no leading zero, at most 15 digits.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("phone pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A form field of [`CustomerInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone number",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid phone number")]
    InvalidPhone,
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::Required(field) => *field,
            FieldError::InvalidEmail => Field::Email,
            FieldError::InvalidPhone => Field::Phone,
        }
    }
}

/// Every failing field of a form, in field order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field() == field)
    }
}

impl CustomerInfo {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Checks every field and reports all failures at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::Required(Field::Name));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::Required(Field::Email));
        } else if !EMAIL.is_match(email) {
            errors.push(FieldError::InvalidEmail);
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.push(FieldError::Required(Field::Phone));
        } else if !PHONE.is_match(phone) {
            errors.push(FieldError::InvalidPhone);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_customer() {
        let customer = CustomerInfo::new("Ada", "ada@example.com", "+14155550123");
        assert!(customer.validate().is_ok());
    }

    #[test]
    fn test_all_fields_required() {
        let err = CustomerInfo::new(" ", "", "").validate().unwrap_err();
        assert_eq!(
            err.errors,
            vec![
                FieldError::Required(Field::Name),
                FieldError::Required(Field::Email),
                FieldError::Required(Field::Phone),
            ]
        );
        assert_eq!(
            err.to_string(),
            "Name is required; Email is required; Phone number is required"
        );
    }

    #[test]
    fn test_invalid_email_and_phone() {
        let err = CustomerInfo::new("Ada", "ada.example.com", "0123")
            .validate()
            .unwrap_err();
        assert_eq!(err.for_field(Field::Email), Some(&FieldError::InvalidEmail));
        assert_eq!(err.for_field(Field::Phone), Some(&FieldError::InvalidPhone));
        assert_eq!(err.for_field(Field::Name), None);
    }

    #[test]
    fn test_phone_pattern_bounds() {
        let with = |phone: &str| CustomerInfo::new("Ada", "a@b.co", phone).validate();
        assert!(with("12").is_ok());
        assert!(with("123456789012345").is_ok());
        assert!(with("1234567890123456").is_err());
        assert!(with("1").is_err());
        assert!(with("+1 415 555").is_err());
    }
}
