//! Customer domain model, create-time validation, and the partial-update
//! merge rules.
//!
//! This is the canonical in-process shape. It carries no wire or column
//! encodings: `gender` is a plain enum and `birth_date` a calendar date.
//! Each boundary owns its own encode/decode table.

use chrono::NaiveDate;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of `name` and `surname`, in characters.
pub const MAX_NAME_LEN: u64 = 100;

/// Maximum length of `country`, in characters.
pub const MAX_COUNTRY_LEN: u64 = 50;

/// Entity label used in [`CoreError::NotFound`].
pub const ENTITY: &str = "Customer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Every variant, for exhaustive encode/decode checks.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];
}

/// A persisted customer.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Customer {
    /// Assigned by storage on creation; never client-supplied.
    pub id: DbId,
    #[validate(length(min = 1, max = MAX_NAME_LEN, message = "must be 1 to 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = MAX_NAME_LEN, message = "must be 1 to 100 characters"))]
    pub surname: String,
    #[validate(range(min = 1, message = "must be positive"))]
    pub number: i32,
    pub gender: Gender,
    #[validate(length(min = 1, max = MAX_COUNTRY_LEN, message = "must be 1 to 50 characters"))]
    pub country: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub dependants: i32,
    pub birth_date: NaiveDate,
}

/// A customer that has not been persisted yet (no `id`).
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewCustomer {
    #[validate(length(min = 1, max = MAX_NAME_LEN, message = "must be 1 to 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = MAX_NAME_LEN, message = "must be 1 to 100 characters"))]
    pub surname: String,
    #[validate(range(min = 1, message = "must be positive"))]
    pub number: i32,
    pub gender: Gender,
    #[validate(length(min = 1, max = MAX_COUNTRY_LEN, message = "must be 1 to 50 characters"))]
    pub country: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub dependants: i32,
    pub birth_date: NaiveDate,
}

impl NewCustomer {
    /// Check the create-time field rules. Must pass before any storage call.
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)
    }
}

impl Customer {
    /// Attach the storage-assigned identifier to a new customer.
    pub fn from_new(id: DbId, new: NewCustomer) -> Self {
        Self {
            id,
            name: new.name,
            surname: new.surname,
            number: new.number,
            gender: new.gender,
            country: new.country,
            dependants: new.dependants,
            birth_date: new.birth_date,
        }
    }

    /// Check the same field rules as [`NewCustomer::ensure_valid`], e.g. on
    /// the result of a merge.
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)
    }
}

/// A sparse update. `None` means the caller did not supply the field.
///
/// There is deliberately no `id` field: the target is always addressed
/// separately and can never be rewritten through the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub number: Option<i32>,
    pub gender: Option<Gender>,
    pub country: Option<String>,
    pub dependants: Option<i32>,
    pub birth_date: Option<NaiveDate>,
}

impl CustomerPatch {
    /// True when the patch sets no field at all.
    pub fn is_empty(&self) -> bool {
        let Self {
            name,
            surname,
            number,
            gender,
            country,
            dependants,
            birth_date,
        } = self;
        name.is_none()
            && surname.is_none()
            && number.is_none()
            && gender.is_none()
            && country.is_none()
            && dependants.is_none()
            && birth_date.is_none()
    }

    /// Merge this patch over `current`.
    ///
    /// Present fields replace, absent fields keep their current value, and
    /// the `id` is always the current one. Applying the same patch twice
    /// gives the same result as applying it once.
    pub fn apply(self, current: Customer) -> Customer {
        let Self {
            name,
            surname,
            number,
            gender,
            country,
            dependants,
            birth_date,
        } = self;

        Customer {
            id: current.id,
            name: name.unwrap_or(current.name),
            surname: surname.unwrap_or(current.surname),
            number: number.unwrap_or(current.number),
            gender: gender.unwrap_or(current.gender),
            country: country.unwrap_or(current.country),
            dependants: dependants.unwrap_or(current.dependants),
            birth_date: birth_date.unwrap_or(current.birth_date),
        }
    }
}

/// Collapse `validator` output into a single deterministic message.
fn validation_error(errors: ValidationErrors) -> CoreError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            format!("{field} {}", reasons.join(", "))
        })
        .collect();
    fields.sort();
    CoreError::Validation(fields.join("; "))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn alice() -> Customer {
        Customer {
            id: 1,
            name: "Alice".into(),
            surname: "Smith".into(),
            number: 100,
            gender: Gender::Female,
            country: "UK".into(),
            dependants: 0,
            birth_date: date(1985, 6, 15),
        }
    }

    fn ron() -> NewCustomer {
        NewCustomer {
            name: "Ron".into(),
            surname: "Burgandy".into(),
            number: 333,
            gender: Gender::Male,
            country: "USA".into(),
            dependants: 0,
            birth_date: date(1990, 2, 2),
        }
    }

    // -- merge ---------------------------------------------------------------

    #[test]
    fn patch_replaces_only_supplied_fields() {
        let patch = CustomerPatch {
            name: Some("Alice Updated".into()),
            ..Default::default()
        };

        let merged = patch.apply(alice());

        assert_eq!(merged.id, 1);
        assert_eq!(merged.name, "Alice Updated");
        assert_eq!(merged.surname, "Smith");
        assert_eq!(merged.dependants, 0);
        assert_eq!(merged.birth_date, date(1985, 6, 15));
    }

    #[test]
    fn full_patch_replaces_every_field_but_id() {
        let patch = CustomerPatch {
            name: Some("Bob".into()),
            surname: Some("Jones".into()),
            number: Some(7),
            gender: Some(Gender::Male),
            country: Some("Canada".into()),
            dependants: Some(3),
            birth_date: Some(date(1970, 12, 31)),
        };

        let merged = patch.apply(alice());

        assert_eq!(
            merged,
            Customer {
                id: 1,
                name: "Bob".into(),
                surname: "Jones".into(),
                number: 7,
                gender: Gender::Male,
                country: "Canada".into(),
                dependants: 3,
                birth_date: date(1970, 12, 31),
            }
        );
    }

    #[test]
    fn empty_patch_is_identity() {
        let patch = CustomerPatch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.apply(alice()), alice());
    }

    #[test]
    fn applying_twice_equals_applying_once() {
        let patch = CustomerPatch {
            surname: Some("Doe".into()),
            dependants: Some(2),
            gender: Some(Gender::Male),
            ..Default::default()
        };

        let once = patch.clone().apply(alice());
        let twice = patch.clone().apply(patch.apply(alice()));

        assert_eq!(once, twice);
    }

    #[test]
    fn is_empty_detects_any_single_field() {
        let patch = CustomerPatch {
            birth_date: Some(date(2000, 1, 1)),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    // -- validation ------------------------------------------------------------

    #[test]
    fn valid_new_customer_passes() {
        assert!(ron().ensure_valid().is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut input = ron();
        input.name = String::new();
        assert_matches!(
            input.ensure_valid(),
            Err(CoreError::Validation(msg)) if msg.contains("name")
        );
    }

    #[test]
    fn overlong_country_is_rejected() {
        let mut input = ron();
        input.country = "x".repeat(MAX_COUNTRY_LEN as usize + 1);
        assert_matches!(
            input.ensure_valid(),
            Err(CoreError::Validation(msg)) if msg.contains("country")
        );
    }

    #[test]
    fn name_at_max_length_is_accepted() {
        let mut input = ron();
        input.surname = "y".repeat(MAX_NAME_LEN as usize);
        assert!(input.ensure_valid().is_ok());
    }

    #[test]
    fn persisted_customer_enforces_the_same_length_limits() {
        let mut customer = alice();
        customer.name = "n".repeat(MAX_NAME_LEN as usize);
        customer.country = "c".repeat(MAX_COUNTRY_LEN as usize);
        assert!(customer.ensure_valid().is_ok());

        customer.name.push('n');
        customer.country.push('c');
        let err = customer.ensure_valid().unwrap_err();
        let CoreError::Validation(msg) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(msg.contains("name"));
        assert!(msg.contains("country"));
    }

    #[test]
    fn non_positive_number_and_negative_dependants_are_rejected() {
        let mut input = ron();
        input.number = 0;
        input.dependants = -1;

        let err = input.ensure_valid().unwrap_err();
        let CoreError::Validation(msg) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(msg.contains("dependants"));
        assert!(msg.contains("number"));
        // Fields are reported in a stable order.
        assert!(msg.find("dependants") < msg.find("number"));
    }

    #[test]
    fn merged_customer_is_revalidated() {
        let patch = CustomerPatch {
            surname: Some(String::new()),
            ..Default::default()
        };
        let merged = patch.apply(alice());
        assert_matches!(merged.ensure_valid(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn from_new_attaches_id() {
        let customer = Customer::from_new(9, ron());
        assert_eq!(customer.id, 9);
        assert_eq!(customer.name, "Ron");
        assert_eq!(customer.birth_date, date(1990, 2, 2));
    }
}
