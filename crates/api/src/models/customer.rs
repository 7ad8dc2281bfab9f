//! Customer API representation.
//!
//! The shapes exchanged with transport callers: identifiers are opaque
//! strings, dates are `YYYY-MM-DD` strings, and gender uses the graph API's
//! upper-case enum spelling.

use registry_core::customer::Gender;
use serde::{Deserialize, Serialize};

/// Gender as spelled on the wire: `"MALE"` / `"FEMALE"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiGender {
    #[serde(rename = "MALE")]
    Male,
    #[serde(rename = "FEMALE")]
    Female,
}

impl From<Gender> for ApiGender {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => ApiGender::Male,
            Gender::Female => ApiGender::Female,
        }
    }
}

impl From<ApiGender> for Gender {
    fn from(gender: ApiGender) -> Self {
        match gender {
            ApiGender::Male => Gender::Male,
            ApiGender::Female => Gender::Female,
        }
    }
}

/// A customer as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub number: i32,
    pub gender: ApiGender,
    pub country: String,
    pub dependants: i32,
    pub birth_date: String,
}

/// Payload for creating a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerInput {
    pub name: String,
    pub surname: String,
    pub number: i32,
    pub gender: ApiGender,
    pub country: String,
    /// Defaults to 0 if omitted.
    pub dependants: Option<i32>,
    pub birth_date: String,
}

/// Payload for updating a customer. All fields are optional; an omitted
/// (or `null`) field leaves the stored value unchanged.
///
/// Unknown fields, including `id`, are rejected: the target is addressed by
/// the path only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCustomerInput {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub number: Option<i32>,
    pub gender: Option<ApiGender>,
    pub country: Option<String>,
    pub dependants: Option<i32>,
    pub birth_date: Option<String>,
}
