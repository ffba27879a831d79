use reqwest::Method;
use tracing::{info, instrument};

use crate::domain::{Customer, CustomerInput, Id, Listing};
use crate::error::ActionError;
use crate::request_framework::{LogSummary, Resource, ResourceClient, Updatable};

impl Resource for Customer {
    type Id = Id;
    type Create = CustomerInput;

    const NAME: &'static str = "customer";
    const LABEL: &'static str = "Customer";
    const COLLECTION: &'static str = "/api/customers";
}

impl Updatable for Customer {
    type Update = CustomerInput;

    const UPDATE_METHOD: Method = Method::PUT;
}

// Email stays out of info records; the full body is logged at debug.
impl LogSummary for Customer {
    fn log_success(&self, action: &str) {
        info!(customer_id = self.id(), name = self.name(), "{} succeeded", action);
    }
}

impl LogSummary for Listing<Customer> {
    fn log_success(&self, action: &str) {
        info!(customer_count = self.len(), "{} succeeded", action);
    }
}

/// Client for the customer endpoints.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl_resource_client!(CustomerClient, Customer, customer);

impl CustomerClient {
    /// Replaces the customer record (`PUT`).
    #[instrument(skip(self, customer))]
    pub async fn update_customer(&self, id: Id, customer: &CustomerInput) -> Result<Customer, ActionError> {
        self.inner.update(id, customer).await
    }

    #[instrument(skip(self))]
    pub async fn get_all_customers(&self) -> Result<Listing<Customer>, ActionError> {
        self.inner.list().await
    }
}
