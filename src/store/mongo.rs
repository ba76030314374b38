use crate::config::StoreSettings;
use crate::models::{timestamp, Property, PropertyUpdate};
use crate::search::{Clause, Pagination, Predicate};
use crate::store::{PropertyStore, StoreError, StoreResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, to_document, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};
use tracing::{debug, info};

const DUPLICATE_KEY: i32 = 11000;

/// Property collection in MongoDB
pub struct MongoStore {
    client: Client,
    collection: Collection<Property>,
}

impl MongoStore {
    /// Connect and make sure the collection's indexes exist
    pub async fn connect(settings: &StoreSettings) -> Result<Self> {
        info!(database = %settings.database, collection = %settings.collection, "Connecting to MongoDB");

        let client = Client::with_uri_str(&settings.uri)
            .await
            .context("Failed to create MongoDB client")?;
        let collection = client
            .database(&settings.database)
            .collection::<Property>(&settings.collection);

        let store = Self { client, collection };
        store
            .ensure_indexes()
            .await
            .context("Failed to create property indexes")?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> StoreResult<()> {
        let unique = IndexModel::builder()
            .keys(doc! { "propertyId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let secondary = [
            doc! { "address.city": 1, "address.state": 1 },
            doc! { "financial.listPrice": 1 },
            doc! { "physical.bedrooms": 1, "physical.bathrooms": 1 },
            doc! { "propertyType": 1, "listingStatus": 1 },
            doc! { "createdAt": -1 },
        ]
        .into_iter()
        .map(|keys| IndexModel::builder().keys(keys).build());

        let models: Vec<IndexModel> = std::iter::once(unique).chain(secondary).collect();
        self.collection.create_indexes(models).await?;
        debug!("Property indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl PropertyStore for MongoStore {
    async fn find(&self, predicate: &Predicate, window: &Pagination) -> StoreResult<Vec<Property>> {
        let filter = to_filter(predicate);
        debug!(?filter, skip = window.skip(), limit = window.limit(), "Querying properties");

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .skip(window.skip())
            .limit(i64::try_from(window.limit()).unwrap_or(i64::MAX))
            .await?;
        let properties: Vec<Property> = cursor.try_collect().await?;
        Ok(properties)
    }

    async fn count(&self, predicate: &Predicate) -> StoreResult<u64> {
        Ok(self.collection.count_documents(to_filter(predicate)).await?)
    }

    async fn get(&self, property_id: &str) -> StoreResult<Option<Property>> {
        Ok(self
            .collection
            .find_one(doc! { "propertyId": property_id })
            .await?)
    }

    async fn insert(&self, property: Property) -> StoreResult<Property> {
        match self.collection.insert_one(&property).await {
            Ok(_) => Ok(property),
            Err(err) if is_duplicate_key(&err) => Err(StoreError::Duplicate(property.property_id)),
            Err(err) => Err(err.into()),
        }
    }

    async fn update(
        &self,
        property_id: &str,
        update: PropertyUpdate,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<Property>> {
        let mut set = to_document(&update.normalized())?;
        set.insert("updatedAt", timestamp::to_bson(at));

        Ok(self
            .collection
            .find_one_and_update(doc! { "propertyId": property_id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete(&self, property_id: &str) -> StoreResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "propertyId": property_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn replace_all(&self, properties: Vec<Property>) -> StoreResult<u64> {
        let removed = self.collection.delete_many(doc! {}).await?;
        info!(removed = removed.deleted_count, "Cleared property collection");

        if properties.is_empty() {
            return Ok(0);
        }
        let inserted = self.collection.insert_many(&properties).await?;
        Ok(inserted.inserted_ids.len() as u64)
    }

    async fn close(&self) {
        info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}

/// Render a predicate as a MongoDB filter document
pub fn to_filter(predicate: &Predicate) -> Document {
    let mut filter = Document::new();
    for clause in predicate.clauses() {
        match clause {
            Clause::Contains { field, needle } => {
                filter.insert(
                    field.path(),
                    doc! { "$regex": regex::escape(needle), "$options": "i" },
                );
            }
            Clause::Equals { field, value } => {
                filter.insert(field.path(), value.as_str());
            }
            Clause::Range { field, min, max } => {
                let mut bounds = Document::new();
                if let Some(min) = min {
                    bounds.insert("$gte", Bson::Double(*min));
                }
                if let Some(max) = max {
                    bounds.insert("$lte", Bson::Double(*max));
                }
                filter.insert(field.path(), bounds);
            }
        }
    }
    filter
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}
