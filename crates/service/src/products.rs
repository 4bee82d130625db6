use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use models::product::{self, Product};

use crate::errors::ServiceError;
use crate::repository::ProductRepository;
use crate::storage::memory_map_store::MemoryMapStore;
use crate::validation::{PayloadValidator, ProductPredicate};

/// In-memory product store keyed by caller-supplied string ids.
///
/// Replace runs [`ProductPredicate`] on every payload regardless of any gate
/// in front of the store, so stored records always satisfy it.
pub struct ProductStore {
    records: MemoryMapStore<String, Product>,
    predicate: ProductPredicate,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::with_products(Vec::new())
    }
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with [`product::seed`].
    pub fn seeded() -> Self {
        Self::with_products(product::seed())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let records = MemoryMapStore::with_entries(products.into_iter().map(|p| (p.id.clone(), p)));
        Self { records, predicate: ProductPredicate }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Product, ServiceError> {
        self.records
            .get(&id.to_string())
            .await
            .ok_or_else(|| ServiceError::not_found("product"))
    }

    /// Full replace. An absent id wins over an invalid payload; otherwise the
    /// payload is validated exhaustively and, if clean, stored together with
    /// the ratings of the record it replaces.
    #[instrument(skip(self, payload))]
    pub async fn replace(&self, id: &str, mut payload: Value) -> Result<Product, ServiceError> {
        let predicate = &self.predicate;
        self.records
            .update_map(|map| {
                let existing = map.get(id).ok_or_else(|| ServiceError::not_found("product"))?;

                let report = predicate.validate(&mut payload);
                if !report.is_valid() {
                    debug!(violations = report.len(), "product payload rejected");
                    return Err(ServiceError::Validation(report.into_errors()));
                }
                let Value::Object(fields) = payload else {
                    return Err(ServiceError::Validation(vec!["body must be a JSON object".into()]));
                };

                let replacement = Product::from_payload(id, fields, existing.ratings.clone())?;
                map.insert(id.to_string(), replacement.clone());
                Ok(replacement)
            })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if self.records.remove(&id.to_string()).await {
            Ok(())
        } else {
            Err(ServiceError::not_found("product"))
        }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn get_by_id(&self, id: &str) -> Result<Product, ServiceError> { self.get_by_id(id).await }
    async fn replace(&self, id: &str, payload: Value) -> Result<Product, ServiceError> { self.replace(id, payload).await }
    async fn delete(&self, id: &str) -> Result<(), ServiceError> { self.delete(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::product::{Category, Rating};
    use serde_json::json;

    fn laptop_update() -> Value {
        json!({
            "name": "Laptop Pro 16",
            "price": 1299.5,
            "category": ["electronics"],
            "inStock": false
        })
    }

    #[tokio::test]
    async fn seeded_store_serves_both_records() -> Result<(), ServiceError> {
        let store = ProductStore::seeded();
        assert_eq!(store.get_by_id("1").await?.price, 999.99);
        assert_eq!(store.get_by_id("2").await?.category, vec![Category::Books]);
        assert!(matches!(store.get_by_id("3").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn replace_keeps_existing_ratings_and_drops_supplied_ones() -> Result<(), ServiceError> {
        let store = ProductStore::seeded();
        let before = store.get_by_id("1").await?.ratings;

        let mut payload = laptop_update();
        payload["ratings"] = json!([{"score": 1, "comment": "injected"}]);
        let updated = store.replace("1", payload).await?;

        assert_eq!(updated.ratings, before);
        assert_eq!(updated.name, "Laptop Pro 16");
        assert_eq!(updated.in_stock, Some(false));
        // full replace: fields absent from the payload are gone
        assert_eq!(updated.tags, None);
        assert_eq!(updated.description, None);
        assert_eq!(store.get_by_id("1").await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn replace_without_prior_ratings_yields_empty_ratings() -> Result<(), ServiceError> {
        let store = ProductStore::seeded();
        let updated = store.replace("2", json!({"name": "Refactoring", "price": 45, "category": ["books"]})).await?;
        assert_eq!(updated.ratings, Vec::<Rating>::new());
        Ok(())
    }

    #[tokio::test]
    async fn payload_id_does_not_move_the_record() -> Result<(), ServiceError> {
        let store = ProductStore::seeded();
        let mut payload = laptop_update();
        payload["id"] = json!("42");
        let updated = store.replace("1", payload).await?;
        assert_eq!(updated.id, "1");
        assert!(store.get_by_id("42").await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn missing_id_wins_over_invalid_payload() {
        let store = ProductStore::seeded();
        let res = store.replace("404", json!({"name": "L", "price": -1})).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn invalid_payload_reports_every_violation_and_keeps_record() -> Result<(), ServiceError> {
        let store = ProductStore::seeded();
        let res = store.replace("1", json!({"name": "L", "price": -1, "category": ["toys"]})).await;
        match res {
            Err(ServiceError::Validation(errors)) => assert!(errors.len() >= 3),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(store.get_by_id("1").await?.name, "Laptop Pro 14");
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_permanent() -> Result<(), ServiceError> {
        let store = ProductStore::seeded();
        store.delete("2").await?;
        assert!(matches!(store.get_by_id("2").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.delete("2").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            store.replace("2", laptop_update()).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_has_nothing() {
        let store = ProductStore::new();
        assert!(store.get_by_id("1").await.is_err());
    }
}
