use crate::config::ExternalApiSettings;
use crate::error::SourceError;
use crate::models::{Property, PropertyType};
use crate::search::{FilterSpec, Pagination};
use crate::sources::traits::PropertySource;
use crate::sources::types::{ResultPage, Tier};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

/// Read-only adapter over the third-party listings API
pub struct ExternalApiSource {
    client: Client,
    base_url: Url,
    api_key: String,
    host: String,
}

/// Query string understood by the listings API
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ListingQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bathrooms: Option<f64>,
    limit: u64,
    offset: u64,
}

impl<'a> ListingQuery<'a> {
    fn new(filter: &'a FilterSpec, window: &Pagination) -> Self {
        Self {
            city: filter.city.as_deref(),
            state: filter.state.as_deref(),
            property_type: filter.property_type,
            min_price: filter.min_price,
            max_price: filter.max_price,
            bedrooms: filter.bedrooms,
            bathrooms: filter.bathrooms,
            limit: window.limit(),
            offset: window.skip(),
        }
    }
}

impl ExternalApiSource {
    /// Create a new API adapter from its settings
    pub fn new(settings: &ExternalApiSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .with_context(|| format!("Invalid listings API URL '{}'", settings.base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Listings API URL '{}' cannot carry a path", settings.base_url);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("rental-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        info!(base_url = %settings.base_url, "External listings API enabled");

        Ok(Self {
            client,
            base_url,
            api_key: settings.api_key.clone(),
            host: settings.host.clone(),
        })
    }

    /// Base URL extended by `segments`, each percent-encoded as one segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, url: &Url) -> reqwest::RequestBuilder {
        self.client
            .get(url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_HOST_HEADER, &self.host)
    }

    async fn fetch_body(&self, request: reqwest::RequestBuilder, url: &Url) -> Result<(StatusCode, String), SourceError> {
        let response = request.send().await.map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })?;
        debug!(%status, bytes = body.len(), "Listings API answered");
        Ok((status, body))
    }
}

#[async_trait]
impl PropertySource for ExternalApiSource {
    async fn search(&self, filter: &FilterSpec) -> Result<ResultPage, SourceError> {
        let window = Pagination::new(filter.page, filter.limit);
        let endpoint = self.endpoint(&["properties"]);

        let request = self.request(&endpoint).query(&ListingQuery::new(filter, &window));
        let (status, body) = self.fetch_body(request, &endpoint).await?;
        let url = endpoint.to_string();

        if !status.is_success() {
            warn!(%status, "Listings API returned status");
            return Err(SourceError::Status { url, status });
        }

        let properties: Vec<Property> =
            serde_json::from_str(&body).map_err(|source| SourceError::Malformed { url, source })?;

        // The API does not report a grand total; count what is known so far.
        let total = window.skip() + properties.len() as u64;
        Ok(ResultPage::new(properties, &window, total))
    }

    async fn fetch_one(&self, property_id: &str) -> Result<Option<Property>, SourceError> {
        let endpoint = self.endpoint(&["properties", property_id]);
        let (status, body) = self.fetch_body(self.request(&endpoint), &endpoint).await?;
        let url = endpoint.to_string();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            warn!(%status, property_id, "Listings API returned status");
            return Err(SourceError::Status { url, status });
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|source| SourceError::Malformed { url, source })
    }

    fn tier(&self) -> Tier {
        Tier::External
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_carries_only_present_constraints() {
        let filter = FilterSpec::default()
            .city("Maui")
            .property_type(PropertyType::Villa)
            .page(3, 10);
        let window = Pagination::new(filter.page, filter.limit);
        let encoded = serde_json::to_value(ListingQuery::new(&filter, &window)).unwrap();

        assert_eq!(
            encoded,
            serde_json::json!({
                "city": "Maui",
                "propertyType": "Villa",
                "limit": 10,
                "offset": 20
            })
        );
    }
}
