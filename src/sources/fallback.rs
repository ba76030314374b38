use crate::error::SourceError;
use crate::models::{sample_properties, Property};
use crate::search::{sort_newest_first, FilterSpec, Pagination, Predicate};
use crate::sources::traits::PropertySource;
use crate::sources::types::{Acceptance, ResultPage, Tier};
use async_trait::async_trait;
use tracing::info;

/// Last-resort adapter over a fixed, embedded dataset. Never fails.
#[derive(Debug, Clone)]
pub struct StaticSource {
    properties: Vec<Property>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::with_properties(sample_properties())
    }

    pub fn with_properties(mut properties: Vec<Property>) -> Self {
        sort_newest_first(&mut properties);
        Self { properties }
    }

    /// Same filter semantics as every other tier, applied in memory
    pub fn filter(&self, filter: &FilterSpec) -> ResultPage {
        let predicate = Predicate::from_filter(filter);
        let window = Pagination::new(filter.page, filter.limit);

        let matching: Vec<Property> = self
            .properties
            .iter()
            .filter(|p| predicate.matches(p))
            .cloned()
            .collect();

        info!(matched = matching.len(), "Serving static fallback listings");
        ResultPage::new(window.slice(&matching), &window, matching.len() as u64)
    }

    pub fn lookup(&self, property_id: &str) -> Option<Property> {
        self.properties
            .iter()
            .find(|p| p.property_id == property_id)
            .cloned()
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertySource for StaticSource {
    async fn search(&self, filter: &FilterSpec) -> Result<ResultPage, SourceError> {
        Ok(self.filter(filter))
    }

    async fn fetch_one(&self, property_id: &str) -> Result<Option<Property>, SourceError> {
        Ok(self.lookup(property_id))
    }

    fn tier(&self) -> Tier {
        Tier::Fallback
    }

    fn acceptance(&self) -> Acceptance {
        Acceptance::AnyResult
    }
}
