use rental_scout::{
    config::ExternalApiSettings,
    error::SourceError,
    models::{sample_properties, Property},
    search::{FilterSpec, SearchOrchestrator},
    sources::{ExternalApiSource, PrimarySource, PropertySource, StaticSource, Tier},
    store::MemoryStore,
};
use std::sync::Arc;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

struct TestHelper {
    mock_server: MockServer,
    source: ExternalApiSource,
}

impl TestHelper {
    async fn new() -> TestHelper {
        let mock_server = MockServer::start().await;
        let source = ExternalApiSource::new(&ExternalApiSettings {
            base_url: format!("{}/", mock_server.uri()),
            api_key: "test-key".to_string(),
            host: "listings.test".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        TestHelper {
            mock_server,
            source,
        }
    }
}

fn remote_listings() -> Vec<Property> {
    sample_properties()
        .into_iter()
        .filter(|p| p.address.state == "HI")
        .map(|mut p| {
            p.property_id = format!("remote_{}", p.property_id);
            p
        })
        .collect()
}

#[tokio::test]
async fn search_maps_filter_to_query_and_returns_listings() {
    let helper = TestHelper::new().await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .and(query_param("city", "Maui"))
        .and(query_param("propertyType", "Villa"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "5"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("X-RapidAPI-Host", "listings.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_listings()))
        .expect(1)
        .mount(&helper.mock_server)
        .await;

    let filter = FilterSpec::default()
        .city("Maui")
        .property_type(rental_scout::models::PropertyType::Villa)
        .page(2, 5);
    let page = helper.source.search(&filter).await.unwrap();

    assert_eq!(page.properties.len(), 1);
    assert_eq!(page.properties[0].property_id, "remote_prop_002");
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.total, 6);
}

#[tokio::test]
async fn non_success_status_is_a_retryable_failure() {
    let helper = TestHelper::new().await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&helper.mock_server)
        .await;

    let err = helper.source.search(&FilterSpec::default()).await.unwrap_err();

    assert!(matches!(err, SourceError::Status { status, .. } if status.as_u16() == 503));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn malformed_payload_fails_without_partial_data() {
    let helper = TestHelper::new().await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{"propertyId": "half", "address": 42}]"#),
        )
        .mount(&helper.mock_server)
        .await;

    let err = helper.source.search(&FilterSpec::default()).await.unwrap_err();

    assert!(matches!(err, SourceError::Malformed { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn fetch_one_treats_404_as_absent() {
    let helper = TestHelper::new().await;

    Mock::given(method("GET"))
        .and(path("/properties/remote_prop_002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&remote_listings()[0]))
        .mount(&helper.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/properties/unknown"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&helper.mock_server)
        .await;

    let found = helper.source.fetch_one("remote_prop_002").await.unwrap();
    assert_eq!(found.unwrap().address.city, "Maui");

    assert!(helper.source.fetch_one("unknown").await.unwrap().is_none());
}

#[tokio::test]
async fn listings_without_host_or_extras_are_accepted() {
    let helper = TestHelper::new().await;

    let bare = serde_json::json!([{
        "propertyId": "rm_1",
        "address": { "line1": "5 Shore Ln", "city": "Kihei", "state": "HI", "zipCode": "96753" },
        "physical": { "bedrooms": 2, "bathrooms": 1, "squareFootage": 800, "lotSize": 0.1, "yearBuilt": 1990 },
        "financial": { "listPrice": 210, "monthlyRent": 5200, "pricePerSquareFoot": 0.26 },
        "propertyType": "Condo",
        "listDate": "2024-02-01"
    }]);
    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bare))
        .mount(&helper.mock_server)
        .await;

    let page = helper.source.search(&FilterSpec::default()).await.unwrap();

    assert_eq!(page.properties.len(), 1);
    let listing = &page.properties[0];
    assert_eq!(listing.property_id, "rm_1");
    assert!(listing.host.is_none());
    assert_eq!(listing.ratings.count, 0);
}

#[tokio::test]
async fn fetch_one_keeps_the_id_inside_one_path_segment() {
    let helper = TestHelper::new().await;

    Mock::given(method("GET"))
        .and(path("/properties/..%2Fadmin%3Fx=1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&helper.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&remote_listings()[0]))
        .expect(0)
        .mount(&helper.mock_server)
        .await;

    let found = helper.source.fetch_one("../admin?x=1").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn orchestrator_uses_external_when_primary_fails() {
    let helper = TestHelper::new().await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_listings()))
        .mount(&helper.mock_server)
        .await;

    let orchestrator = SearchOrchestrator::new(StaticSource::new())
        .with_tier(Arc::new(FailingPrimary))
        .with_tier(Arc::new(helper.source));

    let outcome = orchestrator.search(&FilterSpec::default()).await;

    assert_eq!(outcome.tier, Tier::External);
    let ids: Vec<_> = outcome
        .page
        .properties
        .iter()
        .map(|p| p.property_id.as_str())
        .collect();
    assert_eq!(ids, ["remote_prop_002"]);
}

#[tokio::test]
async fn orchestrator_skips_empty_external_answer() {
    let helper = TestHelper::new().await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<Property>::new()))
        .mount(&helper.mock_server)
        .await;

    let orchestrator = SearchOrchestrator::new(StaticSource::new())
        .with_tier(Arc::new(FailingPrimary))
        .with_tier(Arc::new(helper.source));

    let outcome = orchestrator.search(&FilterSpec::default().city("Sedona")).await;

    assert_eq!(outcome.tier, Tier::Fallback);
    assert_eq!(outcome.page.properties[0].property_id, "prop_004");
}

#[tokio::test]
async fn healthy_primary_is_never_bypassed() {
    let helper = TestHelper::new().await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_listings()))
        .expect(0)
        .mount(&helper.mock_server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let orchestrator = SearchOrchestrator::new(StaticSource::new())
        .with_tier(Arc::new(PrimarySource::new(store)))
        .with_tier(Arc::new(helper.source));

    let outcome = orchestrator.search(&FilterSpec::default()).await;
    assert_eq!(outcome.tier, Tier::Primary);
    assert!(outcome.page.is_empty());
}

/// Primary tier stand-in that always errors
struct FailingPrimary;

#[async_trait::async_trait]
impl PropertySource for FailingPrimary {
    async fn search(&self, _: &FilterSpec) -> Result<rental_scout::sources::ResultPage, SourceError> {
        Err(SourceError::Store(rental_scout::store::StoreError::Duplicate(
            "unreachable".to_string(),
        )))
    }

    async fn fetch_one(&self, _: &str) -> Result<Option<Property>, SourceError> {
        Ok(None)
    }

    fn tier(&self) -> Tier {
        Tier::Primary
    }

    fn acceptance(&self) -> rental_scout::sources::Acceptance {
        rental_scout::sources::Acceptance::AnyResult
    }
}
