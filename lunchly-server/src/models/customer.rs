//! Customer names, contact details and the customer entity

use once_cell::sync::Lazy;
use regex::Regex;

use super::validation::optional_text;
use super::{CustomerId, Entity, ValidationError};

/// Maximum length for a first or last name
const MAX_NAME_LEN: usize = 100;

/// Maximum length for customer notes
const MAX_NOTES_LEN: usize = 2000;

/// Digits with the usual separators, optional leading `+`.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9(][0-9 ().-]{2,31}$").expect("invalid phone regex")
});

/// Validated first or last name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Create a name for the given field.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 100 characters
    ///
    /// # Example
    /// ```
    /// use lunchly_server::models::PersonName;
    ///
    /// assert!(PersonName::new("first name", "Jane").is_ok());
    /// assert!(PersonName::new("last name", "   ").is_err());
    /// ```
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub(crate) fn from_db(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated phone number, kept as typed by the customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    /// Parse an optional phone number. Blank input means "no phone".
    pub fn optional(s: Option<&str>) -> Result<Option<Self>, ValidationError> {
        let Some(trimmed) = s.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        if !PHONE_RE.is_match(trimmed) || !trimmed.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "phone",
                reason: "must contain digits, spaces, dashes, dots or parentheses",
            });
        }

        Ok(Some(Self(trimmed.to_owned())))
    }

    pub(crate) fn from_db(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Customer that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone: Option<Phone>,
    pub notes: Option<String>,
}

impl CustomerDraft {
    /// Validate raw form values into a draft.
    pub fn new(
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: PersonName::new("first name", first_name)?,
            last_name: PersonName::new("last name", last_name)?,
            phone: Phone::optional(phone)?,
            notes: optional_text("notes", notes, MAX_NOTES_LEN)?,
        })
    }
}

/// Stored customer.
///
/// Only the repository hands these out, so the id always names a row that
/// existed when the value was read or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone: Option<Phone>,
    pub notes: Option<String>,
}

impl Customer {
    pub(crate) fn from_draft(id: CustomerId, draft: CustomerDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            phone: draft.phone,
            notes: draft.notes,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.as_str(), self.last_name.as_str())
    }

    /// Replace every mutable field with the draft's values. The id is kept.
    pub fn apply(&mut self, draft: CustomerDraft) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.phone = draft.phone;
        self.notes = draft.notes;
    }
}

pub type CustomerEntity = Entity<CustomerDraft, Customer>;

impl From<CustomerDraft> for CustomerEntity {
    fn from(draft: CustomerDraft) -> Self {
        Entity::Transient(draft)
    }
}

impl From<Customer> for CustomerEntity {
    fn from(customer: Customer) -> Self {
        Entity::Persisted(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Customer {
        let draft = CustomerDraft::new("Jane", "Smith", Some("555-0100"), None).unwrap();
        Customer::from_draft(CustomerId::from_db(7), draft)
    }

    #[test]
    fn names_are_trimmed() {
        let name = PersonName::new("first name", "  Jane ").unwrap();
        assert_eq!(name.as_str(), "Jane");
    }

    #[test]
    fn rejects_empty_names() {
        let err = CustomerDraft::new("", "Smith", None, None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "first name" });

        let err = CustomerDraft::new("Jane", "  ", None, None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "last name" });
    }

    #[test]
    fn name_max_length() {
        assert!(PersonName::new("first name", &"a".repeat(100)).is_ok());
        let err = PersonName::new("first name", &"a".repeat(101)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 100, .. }));
    }

    #[test]
    fn phone_formats() {
        assert!(Phone::optional(Some("555-555-1234")).unwrap().is_some());
        assert!(Phone::optional(Some("+1 (415) 555.0100")).unwrap().is_some());
        assert!(Phone::optional(Some("")).unwrap().is_none());
        assert!(Phone::optional(None).unwrap().is_none());

        let err = Phone::optional(Some("call me maybe")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "phone", .. }));
    }

    #[test]
    fn phone_needs_a_digit() {
        for punctuation_only in ["(((", "(.-)", "( - )"] {
            let err = Phone::optional(Some(punctuation_only)).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidFormat { field: "phone", .. }));
        }
        assert!(Phone::optional(Some("(12)")).unwrap().is_some());
    }

    #[test]
    fn full_name_joins_with_space() {
        assert_eq!(jane().full_name(), "Jane Smith");
    }

    #[test]
    fn apply_keeps_id() {
        let mut customer = jane();
        let draft = CustomerDraft::new("Janet", "Jones", None, Some("regular")).unwrap();
        customer.apply(draft);

        assert_eq!(customer.id().get(), 7);
        assert_eq!(customer.full_name(), "Janet Jones");
        assert_eq!(customer.phone, None);
        assert_eq!(customer.notes.as_deref(), Some("regular"));
    }

    #[test]
    fn entity_tags() {
        let draft = CustomerDraft::new("Jane", "Smith", None, None).unwrap();
        assert!(!CustomerEntity::from(draft).is_persisted());
        assert!(CustomerEntity::from(jane()).is_persisted());
    }
}
