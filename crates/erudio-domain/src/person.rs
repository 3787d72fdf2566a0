//! Person entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A person registered in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Person {
    /// Database identifier; `None` until persisted.
    pub id: Option<i64>,

    #[validate(length(max = 80))]
    pub first_name: String,

    #[validate(length(max = 80))]
    pub last_name: String,

    #[validate(length(max = 100))]
    pub address: String,

    #[validate(length(max = 6))]
    pub gender: String,

    /// Disabled people stay listed but are flagged.
    pub enabled: bool,

    pub birth_day: Option<NaiveDate>,
}

impl Person {
    /// Creates an enabled, not-yet-persisted person.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            gender: gender.into(),
            enabled: true,
            birth_day: None,
        }
    }

    /// Sets the identifier, as done by the persistence layer.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_birth_day(mut self, birth_day: NaiveDate) -> Self {
        self.birth_day = Some(birth_day);
        self
    }

    /// Returns true once the person has been saved.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An empty, enabled person.
impl Default for Person {
    fn default() -> Self {
        Self::new("", "", "", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_new_person_is_enabled_and_transient() {
        let person = Person::new("Nelson", "Piquet", "Brasilia - DF - Brasil", "Male");
        assert!(person.enabled);
        assert!(!person.is_persisted());
        assert_eq!(person.full_name(), "Nelson Piquet");
    }

    #[test]
    fn test_with_id_and_birth_day() {
        let birth = NaiveDate::from_ymd_opt(1952, 8, 17).unwrap();
        let person = Person::new("Nelson", "Piquet", "Brasilia", "Male")
            .with_id(7)
            .with_birth_day(birth);
        assert_eq!(person.id, Some(7));
        assert_eq!(person.birth_day, Some(birth));
    }

    #[test]
    fn test_default_person_is_enabled() {
        assert!(Person::default().enabled);
    }

    #[test]
    fn test_gender_length_validated() {
        let person = Person::new("Ada", "Lovelace", "London", "Unknown");
        assert!(person.validate().is_err());
    }
}
