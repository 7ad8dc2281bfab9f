//! Conversions between the API representation and the domain model.
//!
//! Every direction is its own function. Date strings are parsed strictly;
//! a malformed date fails the whole conversion.

use registry_core::customer::{Customer, CustomerPatch, NewCustomer};
use registry_core::dates::{format_iso_date, parse_iso_date};
use registry_core::error::CoreError;
use registry_core::types::parse_db_id;

use crate::models::customer::{CreateCustomerInput, CustomerResponse, UpdateCustomerInput};

pub fn domain_to_api(customer: &Customer) -> CustomerResponse {
    CustomerResponse {
        id: customer.id.to_string(),
        name: customer.name.clone(),
        surname: customer.surname.clone(),
        number: customer.number,
        gender: customer.gender.into(),
        country: customer.country.clone(),
        dependants: customer.dependants,
        birth_date: format_iso_date(customer.birth_date),
    }
}

/// Map a sequence, preserving order. No input yields an empty list.
pub fn domain_to_api_slice(customers: &[Customer]) -> Vec<CustomerResponse> {
    customers.iter().map(domain_to_api).collect()
}

pub fn api_to_domain(customer: &CustomerResponse) -> Result<Customer, CoreError> {
    Ok(Customer {
        id: parse_db_id(&customer.id)?,
        name: customer.name.clone(),
        surname: customer.surname.clone(),
        number: customer.number,
        gender: customer.gender.into(),
        country: customer.country.clone(),
        dependants: customer.dependants,
        birth_date: parse_iso_date("birth_date", &customer.birth_date)?,
    })
}

pub fn create_input_to_domain(input: CreateCustomerInput) -> Result<NewCustomer, CoreError> {
    let birth_date = parse_iso_date("birth_date", &input.birth_date)?;
    Ok(NewCustomer {
        name: input.name,
        surname: input.surname,
        number: input.number,
        gender: input.gender.into(),
        country: input.country,
        dependants: input.dependants.unwrap_or(0),
        birth_date,
    })
}

pub fn update_input_to_patch(input: UpdateCustomerInput) -> Result<CustomerPatch, CoreError> {
    let birth_date = input
        .birth_date
        .as_deref()
        .map(|raw| parse_iso_date("birth_date", raw))
        .transpose()?;

    Ok(CustomerPatch {
        name: input.name,
        surname: input.surname,
        number: input.number,
        gender: input.gender.map(Into::into),
        country: input.country,
        dependants: input.dependants,
        birth_date,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use registry_core::customer::Gender;

    use super::*;
    use crate::models::customer::ApiGender;

    fn john() -> Customer {
        Customer {
            id: 1,
            name: "John".into(),
            surname: "Doe".into(),
            number: 12345,
            gender: Gender::Male,
            country: "USA".into(),
            dependants: 2,
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        }
    }

    fn create_input(birth_date: &str) -> CreateCustomerInput {
        CreateCustomerInput {
            name: "Ron".into(),
            surname: "Burgandy".into(),
            number: 333,
            gender: ApiGender::Male,
            country: "USA".into(),
            dependants: None,
            birth_date: birth_date.into(),
        }
    }

    #[test]
    fn domain_to_api_formats_id_date_and_gender() {
        let api = domain_to_api(&john());

        assert_eq!(api.id, "1");
        assert_eq!(api.birth_date, "1990-01-01");
        assert_eq!(api.gender, ApiGender::Male);
        assert_eq!(api.dependants, 2);
    }

    #[test]
    fn api_and_domain_are_inverses_for_every_gender() {
        for gender in Gender::ALL {
            let mut customer = john();
            customer.gender = gender;
            assert_eq!(api_to_domain(&domain_to_api(&customer)).unwrap(), customer);
        }
    }

    #[test]
    fn api_to_domain_rejects_bad_id_and_bad_date() {
        let mut api = domain_to_api(&john());
        api.id = "abc".into();
        assert_matches!(api_to_domain(&api), Err(CoreError::InvalidIdentifier(_)));

        let mut api = domain_to_api(&john());
        api.birth_date = "01/01/1990".into();
        assert_matches!(api_to_domain(&api), Err(CoreError::MalformedDate { .. }));
    }

    #[test]
    fn slice_mapping_preserves_order_and_handles_empty() {
        assert!(domain_to_api_slice(&[]).is_empty());

        let mut second = john();
        second.id = 2;
        second.name = "Bob".into();
        let mapped = domain_to_api_slice(&[john(), second]);

        let ids: Vec<&str> = mapped.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn create_input_defaults_dependants_to_zero() {
        let customer = create_input_to_domain(create_input("1990-02-02")).unwrap();

        assert_eq!(customer.dependants, 0);
        assert_eq!(customer.gender, Gender::Male);
        assert_eq!(customer.birth_date, NaiveDate::from_ymd_opt(1990, 2, 2).unwrap());
    }

    #[test]
    fn create_input_with_malformed_date_fails() {
        assert_matches!(
            create_input_to_domain(create_input("31-02-1990")),
            Err(CoreError::MalformedDate { field: "birth_date", .. })
        );
    }

    #[test]
    fn update_input_maps_only_present_fields() {
        let patch = update_input_to_patch(UpdateCustomerInput {
            name: Some("Alice Updated".into()),
            gender: Some(ApiGender::Female),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(patch.name.as_deref(), Some("Alice Updated"));
        assert_eq!(patch.gender, Some(Gender::Female));
        assert!(patch.surname.is_none());
        assert!(patch.birth_date.is_none());
    }

    #[test]
    fn update_input_with_malformed_date_fails_whole_update() {
        let result = update_input_to_patch(UpdateCustomerInput {
            name: Some("Still Alice".into()),
            birth_date: Some("1990-13-01".into()),
            ..Default::default()
        });

        assert_matches!(result, Err(CoreError::MalformedDate { .. }));
    }
}
