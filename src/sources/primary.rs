use crate::error::SourceError;
use crate::models::Property;
use crate::search::{FilterSpec, Pagination, Predicate};
use crate::sources::traits::PropertySource;
use crate::sources::types::{Acceptance, ResultPage, Tier};
use crate::store::PropertyStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Adapter over the persistent document store
pub struct PrimarySource {
    store: Arc<dyn PropertyStore>,
}

impl PrimarySource {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PropertySource for PrimarySource {
    async fn search(&self, filter: &FilterSpec) -> Result<ResultPage, SourceError> {
        let predicate = Predicate::from_filter(filter);
        let window = Pagination::new(filter.page, filter.limit);

        let properties = self.store.find(&predicate, &window).await?;
        // Total over the whole predicate, not just this page
        let total = self.store.count(&predicate).await?;

        debug!(
            backend = self.store.backend_name(),
            returned = properties.len(),
            total,
            "Primary search finished"
        );
        Ok(ResultPage::new(properties, &window, total))
    }

    async fn fetch_one(&self, property_id: &str) -> Result<Option<Property>, SourceError> {
        Ok(self.store.get(property_id).await?)
    }

    fn tier(&self) -> Tier {
        Tier::Primary
    }

    fn acceptance(&self) -> Acceptance {
        Acceptance::AnyResult
    }
}
