use crate::models::Property;
use crate::search::{PageInfo, Pagination};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which data source answered a query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// The persistent document store
    Primary,
    /// The third-party listings API
    External,
    /// The embedded static dataset
    Fallback,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Primary => "primary",
            Tier::External => "external",
            Tier::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// When a tier's successful answer is final
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Any successful answer, including an empty one
    AnyResult,
    /// Only an answer with at least one property
    NonEmpty,
}

/// Ordered batch of properties plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub properties: Vec<Property>,
    pub pagination: PageInfo,
}

impl ResultPage {
    pub fn new(properties: Vec<Property>, window: &Pagination, total: u64) -> Self {
        Self {
            properties,
            pagination: window.info(total),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A result page tagged with the tier that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub page: ResultPage,
    pub tier: Tier,
}

/// A single property tagged with the tier that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome {
    pub property: Property,
    pub tier: Tier,
}
