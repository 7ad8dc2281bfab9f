//! Customer persistence representation and the domain <-> row mappers.
//!
//! Columns mirror the domain fields one to one; the only re-encoding is
//! `gender`, which is stored as the text values allowed by the
//! `ck_customers_gender` constraint.

use chrono::NaiveDate;
use registry_core::customer::{Customer, CustomerPatch, Gender, NewCustomer};
use registry_core::error::CoreError;
use registry_core::types::DbId;
use sqlx::FromRow;

/// A row from the `customers` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CustomerRow {
    pub id: DbId,
    pub name: String,
    pub surname: String,
    pub number: i32,
    pub gender: String,
    pub country: String,
    pub dependants: i32,
    pub birth_date: NaiveDate,
}

/// Values for an insert. `id` is assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomerRow {
    pub name: String,
    pub surname: String,
    pub number: i32,
    pub gender: &'static str,
    pub country: String,
    pub dependants: i32,
    pub birth_date: NaiveDate,
}

/// Column values for a partial update. Only `Some` columns are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerColumnChanges {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub number: Option<i32>,
    pub gender: Option<&'static str>,
    pub country: Option<String>,
    pub dependants: Option<i32>,
    pub birth_date: Option<NaiveDate>,
}

impl CustomerColumnChanges {
    pub fn is_empty(&self) -> bool {
        self.changed_columns().is_empty()
    }

    /// Names of the columns this update will write, in table order.
    pub fn changed_columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::new();
        if self.name.is_some() {
            columns.push("name");
        }
        if self.surname.is_some() {
            columns.push("surname");
        }
        if self.number.is_some() {
            columns.push("number");
        }
        if self.gender.is_some() {
            columns.push("gender");
        }
        if self.country.is_some() {
            columns.push("country");
        }
        if self.dependants.is_some() {
            columns.push("dependants");
        }
        if self.birth_date.is_some() {
            columns.push("birth_date");
        }
        columns
    }

    /// Write the present columns over `row`, as the database would.
    pub fn apply_to_row(&self, row: &mut CustomerRow) {
        if let Some(name) = &self.name {
            row.name.clone_from(name);
        }
        if let Some(surname) = &self.surname {
            row.surname.clone_from(surname);
        }
        if let Some(number) = self.number {
            row.number = number;
        }
        if let Some(gender) = self.gender {
            row.gender = gender.to_string();
        }
        if let Some(country) = &self.country {
            row.country.clone_from(country);
        }
        if let Some(dependants) = self.dependants {
            row.dependants = dependants;
        }
        if let Some(birth_date) = self.birth_date {
            row.birth_date = birth_date;
        }
    }
}

// ---------------------------------------------------------------------------
// Gender column encoding
// ---------------------------------------------------------------------------

const GENDER_MALE: &str = "Male";
const GENDER_FEMALE: &str = "Female";

pub fn gender_to_column(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => GENDER_MALE,
        Gender::Female => GENDER_FEMALE,
    }
}

/// Decode a stored gender. Matching is exact; any other value means the row
/// bypassed the table constraint and is reported as an internal error.
pub fn gender_from_column(value: &str) -> Result<Gender, CoreError> {
    match value {
        GENDER_MALE => Ok(Gender::Male),
        GENDER_FEMALE => Ok(Gender::Female),
        other => Err(CoreError::Internal(format!(
            "unrecognised gender value in customers row: '{other}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Mappers
// ---------------------------------------------------------------------------

pub fn domain_to_row(customer: &Customer) -> CustomerRow {
    CustomerRow {
        id: customer.id,
        name: customer.name.clone(),
        surname: customer.surname.clone(),
        number: customer.number,
        gender: gender_to_column(customer.gender).to_string(),
        country: customer.country.clone(),
        dependants: customer.dependants,
        birth_date: customer.birth_date,
    }
}

pub fn row_to_domain(row: CustomerRow) -> Result<Customer, CoreError> {
    Ok(Customer {
        id: row.id,
        gender: gender_from_column(&row.gender)?,
        name: row.name,
        surname: row.surname,
        number: row.number,
        country: row.country,
        dependants: row.dependants,
        birth_date: row.birth_date,
    })
}

pub fn new_customer_to_row(customer: &NewCustomer) -> NewCustomerRow {
    NewCustomerRow {
        name: customer.name.clone(),
        surname: customer.surname.clone(),
        number: customer.number,
        gender: gender_to_column(customer.gender),
        country: customer.country.clone(),
        dependants: customer.dependants,
        birth_date: customer.birth_date,
    }
}

pub fn patch_to_column_changes(patch: &CustomerPatch) -> CustomerColumnChanges {
    CustomerColumnChanges {
        name: patch.name.clone(),
        surname: patch.surname.clone(),
        number: patch.number,
        gender: patch.gender.map(gender_to_column),
        country: patch.country.clone(),
        dependants: patch.dependants,
        birth_date: patch.birth_date,
    }
}
