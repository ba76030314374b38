use crate::models::{Property, PropertyUpdate};
use crate::search::{sort_newest_first, Pagination, Predicate};
use crate::store::{PropertyStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local store, for development runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    properties: RwLock<Vec<Property>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(properties: Vec<Property>) -> Self {
        Self {
            properties: RwLock::new(properties),
        }
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn find(&self, predicate: &Predicate, window: &Pagination) -> StoreResult<Vec<Property>> {
        let properties = self.properties.read().await;
        let mut matching: Vec<Property> = properties
            .iter()
            .filter(|p| predicate.matches(p))
            .cloned()
            .collect();
        sort_newest_first(&mut matching);
        Ok(window.slice(&matching))
    }

    async fn count(&self, predicate: &Predicate) -> StoreResult<u64> {
        let properties = self.properties.read().await;
        Ok(properties.iter().filter(|p| predicate.matches(p)).count() as u64)
    }

    async fn get(&self, property_id: &str) -> StoreResult<Option<Property>> {
        let properties = self.properties.read().await;
        Ok(properties
            .iter()
            .find(|p| p.property_id == property_id)
            .cloned())
    }

    async fn insert(&self, property: Property) -> StoreResult<Property> {
        let mut properties = self.properties.write().await;
        if properties.iter().any(|p| p.property_id == property.property_id) {
            return Err(StoreError::Duplicate(property.property_id));
        }
        debug!(property_id = %property.property_id, "Inserting property");
        properties.push(property.clone());
        Ok(property)
    }

    async fn update(
        &self,
        property_id: &str,
        update: PropertyUpdate,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<Property>> {
        let mut properties = self.properties.write().await;
        let Some(property) = properties.iter_mut().find(|p| p.property_id == property_id) else {
            return Ok(None);
        };
        property.apply(update, at);
        Ok(Some(property.clone()))
    }

    async fn delete(&self, property_id: &str) -> StoreResult<bool> {
        let mut properties = self.properties.write().await;
        let before = properties.len();
        properties.retain(|p| p.property_id != property_id);
        Ok(properties.len() != before)
    }

    async fn replace_all(&self, replacement: Vec<Property>) -> StoreResult<u64> {
        let mut properties = self.properties.write().await;
        *properties = replacement;
        Ok(properties.len() as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_properties;
    use crate::search::FilterSpec;

    fn store() -> MemoryStore {
        MemoryStore::with_properties(sample_properties())
    }

    async fn stored(store: &MemoryStore) -> u64 {
        let everything = Predicate::from_filter(&FilterSpec::default());
        store.count(&everything).await.unwrap()
    }

    #[tokio::test]
    async fn find_orders_newest_first_and_counts_all_matches() {
        let store = store();
        let predicate = Predicate::from_filter(&FilterSpec::default());
        let window = Pagination::new(Some(1), Some(2));

        let page = store.find(&predicate, &window).await.unwrap();
        let ids: Vec<_> = page.iter().map(|p| p.property_id.as_str()).collect();
        assert_eq!(ids, ["prop_003", "prop_005"]);
        assert_eq!(store.count(&predicate).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn duplicate_insert_leaves_store_untouched() {
        let store = store();
        let mut copy = sample_properties().remove(0);
        copy.description = Some("changed".to_string());

        let err = store.insert(copy).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(id) if id == "prop_001"));
        assert_eq!(stored(&store).await, 6);
        let stored = store.get("prop_001").await.unwrap().unwrap();
        assert_ne!(stored.description.as_deref(), Some("changed"));
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids() {
        let store = store();
        let updated = store
            .update("missing", PropertyUpdate::default(), Utc::now())
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(!store.delete("missing").await.unwrap());
        assert_eq!(stored(&store).await, 6);

        assert!(store.delete("prop_002").await.unwrap());
        assert!(store.get("prop_002").await.unwrap().is_none());
    }
}
