use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{AddressType, PersonIdentity};

/// Longest name accepted for either the first name or the surname.
pub const MAX_NAME_LENGTH: usize = 100;

/// Outcome of structural validation of a [`PersonIdentity`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        ValidationResult {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Checks an identity record before it is sent to the provider.
pub trait InputValidator: Send + Sync {
    fn validate(&self, person_identity: &PersonIdentity) -> ValidationResult;
}

/// Default structural rules for identity records.
#[derive(Clone, Copy, Debug, Default)]
pub struct PersonIdentityValidator;

impl PersonIdentityValidator {
    fn validate_on(&self, person_identity: &PersonIdentity, today: NaiveDate) -> ValidationResult {
        let mut errors = Vec::new();

        check_name("firstName", &person_identity.first_name, &mut errors);
        check_name("surname", &person_identity.surname, &mut errors);

        if person_identity.date_of_birth > today {
            errors.push("dateOfBirth must not be in the future".to_owned());
        }

        if person_identity.addresses.is_empty() {
            errors.push("addresses must contain at least one address".to_owned());
        }

        for (i, address) in person_identity.addresses.iter().enumerate() {
            for (field, value) in [
                ("postTown", &address.post_town),
                ("street", &address.street),
                ("postal", &address.postal),
            ] {
                if value.trim().is_empty() {
                    errors.push(format!("addresses[{i}].{field} must not be blank"));
                }
            }
        }

        let current = person_identity
            .addresses
            .iter()
            .filter(|a| a.address_type == AddressType::Current)
            .count();
        if current > 1 {
            errors.push("addresses must contain at most one CURRENT address".to_owned());
        }

        ValidationResult::from_errors(errors)
    }
}

impl InputValidator for PersonIdentityValidator {
    fn validate(&self, person_identity: &PersonIdentity) -> ValidationResult {
        self.validate_on(person_identity, Utc::now().date_naive())
    }
}

fn check_name(field: &str, value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{field} must not be blank"));
    } else if value.chars().count() > MAX_NAME_LENGTH {
        errors.push(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        ));
    }
}
