use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A collection response, kept exactly as the backend sent it.
///
/// Items are read lazily as `T`. A body that is not an array yields no items
/// but is still returned unchanged by [`Listing::as_value`].
pub struct Listing<T> {
    body: Value,
    _item: PhantomData<fn() -> T>,
}

impl<T> Listing<T> {
    pub fn as_value(&self) -> &Value {
        &self.body
    }

    pub fn into_value(self) -> Value {
        self.body
    }

    pub fn len(&self) -> usize {
        self.body.as_array().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: From<Value>> Listing<T> {
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.body
            .as_array()
            .into_iter()
            .flatten()
            .map(|item| T::from(item.clone()))
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.body.as_array()?.get(index).cloned().map(T::from)
    }

    pub fn items(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T> From<Value> for Listing<T> {
    fn from(body: Value) -> Self {
        Self {
            body,
            _item: PhantomData,
        }
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::from(Value::Array(Vec::new()))
    }
}

impl<T> Clone for Listing<T> {
    fn clone(&self) -> Self {
        Self::from(self.body.clone())
    }
}

impl<T> PartialEq for Listing<T> {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

impl<T> fmt::Debug for Listing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listing").field(&self.body).finish()
    }
}

impl<T> Serialize for Listing<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Listing<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use serde_json::json;

    #[test]
    fn items_are_read_from_an_array_body() {
        let listing: Listing<Product> = json!([{ "id": 1, "name": "Chair" }, { "id": 2 }]).into();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.get(0).and_then(|p| p.name().map(str::to_owned)), Some("Chair".into()));
        assert_eq!(listing.items()[1].name(), None);
        assert!(listing.get(2).is_none());
    }

    #[test]
    fn non_array_body_is_kept_but_has_no_items() {
        let body = json!({ "items": [1, 2], "page": 1 });
        let listing: Listing<Product> = body.clone().into();
        assert!(listing.is_empty());
        assert_eq!(listing.iter().count(), 0);
        assert_eq!(serde_json::to_value(&listing).unwrap(), body);
    }
}
