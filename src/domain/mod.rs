pub mod customer;
pub mod listing;
pub mod product;
pub mod refund;

pub use customer::*;
pub use listing::*;
pub use product::*;
pub use refund::*;

use serde_json::Value;

/// Backend identifiers are numeric.
pub type Id = i64;

/// Declares a response record that keeps the backend's JSON exactly as sent
/// and reads typed fields from it on demand.
macro_rules! pass_through_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(serde_json::Value);

        impl $name {
            pub fn as_value(&self) -> &serde_json::Value {
                &self.0
            }

            pub fn into_value(self) -> serde_json::Value {
                self.0
            }

            /// Raw field lookup; `None` when the body is not an object.
            pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
                self.0.get(key)
            }

            pub fn id(&self) -> Option<$crate::domain::Id> {
                self.field("id").and_then($crate::domain::as_id)
            }
        }

        impl From<serde_json::Value> for $name {
            fn from(body: serde_json::Value) -> Self {
                Self(body)
            }
        }
    };
}

pub(crate) use pass_through_record;

/// Numeric ids, also accepted when the backend sends them as strings.
pub(crate) fn as_id(value: &Value) -> Option<Id> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Amounts and prices, also accepted as decimal strings.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}
