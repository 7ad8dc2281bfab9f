//! Customer service: the boundary between transport request shapes and the
//! repository.
//!
//! Converts API payloads to domain values, rejects payloads with nothing in
//! them, forwards to [`CustomerRepository`], and converts results back. It
//! holds no state beyond the repository handle.

use registry_core::error::CoreError;
use registry_core::types::parse_db_id;
use registry_db::repositories::CustomerRepository;

use crate::mapper::{
    create_input_to_domain, domain_to_api, domain_to_api_slice, update_input_to_patch,
};
use crate::models::customer::{CreateCustomerInput, CustomerResponse, UpdateCustomerInput};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository) -> Self {
        Self { repo }
    }

    pub async fn create_customer(
        &self,
        input: CreateCustomerInput,
    ) -> Result<CustomerResponse, CoreError> {
        let customer = create_input_to_domain(input)?;
        let created = self.repo.create(customer).await?;
        Ok(domain_to_api(&created))
    }

    pub async fn get_customer(&self, id: &str) -> Result<CustomerResponse, CoreError> {
        let customer = self.repo.get_by_id(id).await?;
        Ok(domain_to_api(&customer))
    }

    pub async fn get_all_customers(&self) -> Result<Vec<CustomerResponse>, CoreError> {
        let customers = self.repo.get_all().await?;
        Ok(domain_to_api_slice(&customers))
    }

    /// Apply a sparse update. A payload that sets no field is rejected.
    ///
    /// The identifier is checked before the payload, so a bad id is reported
    /// as such whatever the body contains.
    pub async fn update_customer(
        &self,
        id: &str,
        input: UpdateCustomerInput,
    ) -> Result<CustomerResponse, CoreError> {
        parse_db_id(id)?;
        let patch = update_input_to_patch(input)?;
        if patch.is_empty() {
            return Err(CoreError::Validation(
                "update payload must set at least one field".to_string(),
            ));
        }

        let updated = self.repo.update(id, patch).await?;
        Ok(domain_to_api(&updated))
    }

    /// Returns `true` once the customer is gone; a missing customer is an
    /// error, not `false`.
    pub async fn delete_customer(&self, id: &str) -> Result<bool, CoreError> {
        self.repo.delete(id).await?;
        Ok(true)
    }

    pub async fn is_healthy(&self) -> bool {
        self.repo.is_healthy().await
    }
}
