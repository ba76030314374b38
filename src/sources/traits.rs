use crate::error::SourceError;
use crate::models::Property;
use crate::search::FilterSpec;
use crate::sources::types::{Acceptance, ResultPage, Tier};
use async_trait::async_trait;

/// Common trait for all property data sources
/// The search orchestrator tries implementations in rank order
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Run a filtered, paginated search
    async fn search(&self, filter: &FilterSpec) -> Result<ResultPage, SourceError>;

    /// Look up one property by its `propertyId`
    async fn fetch_one(&self, property_id: &str) -> Result<Option<Property>, SourceError>;

    fn tier(&self) -> Tier;

    /// Whether an empty successful answer ends the search
    fn acceptance(&self) -> Acceptance {
        Acceptance::NonEmpty
    }
}
