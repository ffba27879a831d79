use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{as_number, pass_through_record, Id};

pass_through_record! {
    /// Represents a product in a store's catalog.
    Product
}

impl Product {
    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }

    /// Price as a number, also when the backend sends a decimal string.
    pub fn price(&self) -> Option<f64> {
        self.field("price").and_then(as_number)
    }

    pub fn category(&self) -> Option<&str> {
        self.field("category").and_then(Value::as_str)
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<Id>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keyword search within one store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSearch {
    pub query: String,
    pub store_id: Id,
}

impl ProductSearch {
    pub fn new(query: impl Into<String>, store_id: Id) -> Self {
        Self {
            query: query.into(),
            store_id,
        }
    }
}
