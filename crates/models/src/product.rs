use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// The fixed set of categories a product may be filed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Books,
    Clothes,
    Food,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Books,
        Category::Clothes,
        Category::Food,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Books => "books",
            Category::Clothes => "clothes",
            Category::Food => "food",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Comma-separated list used in validation messages.
    pub fn allowed_list() -> String {
        Self::ALL.iter().map(Category::as_str).collect::<Vec<_>>().join(", ")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub score: f64,
    pub comment: String,
}

/// Stored product record.
///
/// Fields beyond the known ones are kept in `extra` and serialized inline, so
/// a full replace stores the caller's payload shallowly merged over the id.
/// `ratings` is owned by the store and never taken from a payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: Vec<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Build the record that replaces an existing one: the path id, every
    /// field of the payload, and the carried-over ratings.
    ///
    /// The payload must already have passed the product predicate; a shape
    /// that still cannot be read into a record is reported as a
    /// [`ModelError::Validation`].
    pub fn from_payload(
        id: &str,
        mut payload: Map<String, Value>,
        ratings: Vec<Rating>,
    ) -> Result<Self, ModelError> {
        payload.remove("ratings");
        payload.insert("id".into(), Value::String(id.to_string()));
        let mut product: Product = serde_json::from_value(Value::Object(payload))
            .map_err(|e| ModelError::Validation(e.to_string()))?;
        product.ratings = ratings;
        Ok(product)
    }
}

/// The two records every fresh product store starts with.
pub fn seed() -> Vec<Product> {
    vec![
        Product {
            id: "1".into(),
            name: "Laptop Pro 14".into(),
            description: Some("14 inch laptop with 16GB RAM".into()),
            price: 999.99,
            category: vec![Category::Electronics],
            tags: Some(vec!["computer".into(), "portable".into()]),
            in_stock: Some(true),
            ratings: vec![Rating { score: 5.0, comment: "Fast and light".into() }],
            extra: Map::new(),
        },
        Product {
            id: "2".into(),
            name: "Clean Code".into(),
            description: Some("A handbook of agile software craftsmanship".into()),
            price: 39.9,
            category: vec![Category::Books],
            tags: None,
            in_stock: Some(true),
            ratings: Vec::new(),
            extra: Map::new(),
        },
    ]
}
