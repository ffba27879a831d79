use reqwest::Method;
use tracing::{info, instrument};

use crate::domain::{Id, Listing, Product, ProductCreate, ProductPatch, ProductSearch};
use crate::error::ActionError;
use crate::request_framework::{LogSummary, Operation, Resource, ResourceClient, Updatable};

impl Resource for Product {
    type Id = Id;
    type Create = ProductCreate;

    const NAME: &'static str = "product";
    const LABEL: &'static str = "Product";
    const COLLECTION: &'static str = "/api/products";
}

impl Updatable for Product {
    type Update = ProductPatch;

    const UPDATE_METHOD: Method = Method::PATCH;
}

impl LogSummary for Product {
    fn log_success(&self, action: &str) {
        info!(
            product_id = self.id(),
            name = self.name(),
            price = self.price(),
            "{} succeeded",
            action
        );
    }
}

impl LogSummary for Listing<Product> {
    fn log_success(&self, action: &str) {
        info!(product_count = self.len(), "{} succeeded", action);
    }
}

/// Client for the product endpoints.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_resource_client!(ProductClient, Product, product);

impl ProductClient {
    /// Partial update (`PATCH`); unset fields are left alone server-side.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: Id, patch: &ProductPatch) -> Result<Product, ActionError> {
        self.inner.update(id, patch).await
    }

    /// Store id and query are recorded on the span, so they appear on every
    /// record the call emits.
    #[instrument(skip(self))]
    pub async fn get_products_by_store(&self, store_id: Id) -> Result<Listing<Product>, ActionError> {
        let op = Operation::new(
            ResourceClient::<Product>::action("getByStore"),
            Method::GET,
            format!("/api/products/store/{store_id}"),
            "Failed to fetch products",
        );
        self.inner.api().execute(op, None).await
    }

    #[instrument(skip(self), fields(query = %search.query, store_id = search.store_id))]
    pub async fn search_products(&self, search: &ProductSearch) -> Result<Listing<Product>, ActionError> {
        let op = Operation::new(
            ResourceClient::<Product>::action("search"),
            Method::GET,
            format!(
                "/api/products/store/{}/search?q={}",
                search.store_id,
                urlencoding::encode(&search.query)
            ),
            "Search failed",
        );
        self.inner.api().execute(op, None).await
    }
}
