use crate::search::FilterSpec;
use crate::sources::{Acceptance, LookupOutcome, PropertySource, SearchOutcome, StaticSource, Tier};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs a query against ranked data sources, strictly one after another.
///
/// Ranked tiers may fail or come back with an answer their [`Acceptance`]
/// rejects; either way the next tier is tried. After the last ranked tier
/// the embedded [`StaticSource`] answers unconditionally, so every search
/// ends with a result page and never with an error.
pub struct SearchOrchestrator {
    ranked: Vec<Arc<dyn PropertySource>>,
    last_resort: StaticSource,
}

impl SearchOrchestrator {
    pub fn new(last_resort: StaticSource) -> Self {
        Self {
            ranked: Vec::new(),
            last_resort,
        }
    }

    /// Append a tier below the ones already registered
    pub fn with_tier(mut self, source: Arc<dyn PropertySource>) -> Self {
        self.ranked.push(source);
        self
    }

    pub fn tiers(&self) -> Vec<Tier> {
        self.ranked
            .iter()
            .map(|s| s.tier())
            .chain(std::iter::once(Tier::Fallback))
            .collect()
    }

    pub async fn search(&self, filter: &FilterSpec) -> SearchOutcome {
        for source in &self.ranked {
            let tier = source.tier();
            match source.search(filter).await {
                Ok(page) if source.acceptance() == Acceptance::AnyResult || !page.is_empty() => {
                    debug!(%tier, returned = page.properties.len(), "Search answered");
                    return SearchOutcome { page, tier };
                }
                Ok(_) => {
                    debug!(%tier, "Tier returned no properties, trying next");
                }
                Err(err) => {
                    warn!(%tier, error = %err, retryable = err.is_retryable(), "Tier failed, trying next");
                }
            }
        }

        info!("All ranked tiers exhausted, answering from static listings");
        SearchOutcome {
            page: self.last_resort.filter(filter),
            tier: Tier::Fallback,
        }
    }

    /// `None` only if no tier, including the static one, knows the id
    pub async fn fetch_one(&self, property_id: &str) -> Option<LookupOutcome> {
        for source in &self.ranked {
            let tier = source.tier();
            match source.fetch_one(property_id).await {
                Ok(Some(property)) => return Some(LookupOutcome { property, tier }),
                Ok(None) => debug!(%tier, property_id, "Property not in tier, trying next"),
                Err(err) => warn!(%tier, property_id, error = %err, "Lookup failed, trying next"),
            }
        }

        self.last_resort
            .lookup(property_id)
            .map(|property| LookupOutcome {
                property,
                tier: Tier::Fallback,
            })
    }
}
