use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::pass_through_record;

pass_through_record! {
    /// A customer as returned by the backend, unchanged.
    Customer
}

impl Customer {
    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.field("email").and_then(Value::as_str)
    }
}

/// Body for creating or replacing a customer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomerInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            extra: Map::new(),
        }
    }

    /// Adds a field the backend accepts that has no typed slot here.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_survives_unchanged_including_nulls() {
        let wire = json!({ "id": 1, "name": null, "email": null, "loyaltyPoints": 40 });
        let customer = Customer::from(wire.clone());

        assert_eq!(customer.id(), Some(1));
        assert_eq!(customer.name(), None);
        assert_eq!(customer.field("loyaltyPoints"), Some(&json!(40)));
        assert_eq!(serde_json::to_value(&customer).unwrap(), wire);
    }

    #[test]
    fn input_serializes_flat() {
        let input = CustomerInput::new("A", "a@x.com").with_field("phone", "555");
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({ "name": "A", "email": "a@x.com", "phone": "555" })
        );
    }
}
