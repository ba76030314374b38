use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::error::AppError;
use crate::models::{Property, PropertyDraft, PropertyUpdate};
use crate::search::{FilterSpec, Pagination, Predicate};
use crate::store::StoreError;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

const DUPLICATE_ID: &str = "Property with this ID already exists";

/// `GET /properties`: filtered page straight from the document store
pub async fn list_properties(
    State(state): State<AppState>,
    query: Result<Query<FilterSpec>, QueryRejection>,
) -> Result<ApiResponse<Vec<Property>>, AppError> {
    let Query(filter) = query?;
    let predicate = Predicate::from_filter(&filter);
    let window = Pagination::new(filter.page, filter.limit);

    let properties = state
        .store
        .find(&predicate, &window)
        .await
        .map_err(AppError::upstream("Failed to fetch properties"))?;
    let total = state
        .store
        .count(&predicate)
        .await
        .map_err(AppError::upstream("Failed to fetch properties"))?;

    Ok(ApiResponse::data(properties).with_pagination(window.info(total)))
}

/// `POST /properties`
pub async fn create_property(
    State(state): State<AppState>,
    body: Result<Json<PropertyDraft>, JsonRejection>,
) -> Result<(StatusCode, ApiResponse<Property>), AppError> {
    let Json(draft) = body?;
    let property = draft.into_property(Utc::now())?;

    let existing = state
        .store
        .get(&property.property_id)
        .await
        .map_err(AppError::upstream("Failed to create property"))?;
    if existing.is_some() {
        return Err(AppError::Validation(DUPLICATE_ID.to_string()));
    }

    let property = match state.store.insert(property).await {
        Ok(property) => property,
        // Lost a race with a concurrent create
        Err(StoreError::Duplicate(_)) => return Err(AppError::Validation(DUPLICATE_ID.to_string())),
        Err(err) => return Err(AppError::upstream("Failed to create property")(err)),
    };

    info!(property_id = %property.property_id, "Property created");
    Ok((
        StatusCode::CREATED,
        ApiResponse::data(property).with_message("Property created successfully"),
    ))
}

/// `GET /properties/{id}`
pub async fn get_property(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Property>, AppError> {
    let Path(property_id) = path?;

    state
        .store
        .get(&property_id)
        .await
        .map_err(AppError::upstream("Failed to fetch property"))?
        .map(ApiResponse::data)
        .ok_or(AppError::NotFound)
}

/// `PUT /properties/{id}`: merge present fields, refresh `updatedAt`
pub async fn update_property(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<PropertyUpdate>, JsonRejection>,
) -> Result<ApiResponse<Property>, AppError> {
    let Path(property_id) = path?;
    let Json(update) = body?;
    update.validate()?;

    let property = state
        .store
        .update(&property_id, update, Utc::now())
        .await
        .map_err(AppError::upstream("Failed to update property"))?
        .ok_or(AppError::NotFound)?;

    info!(%property_id, "Property updated");
    Ok(ApiResponse::data(property).with_message("Property updated successfully"))
}

/// `DELETE /properties/{id}`
pub async fn delete_property(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<()>, AppError> {
    let Path(property_id) = path?;

    let deleted = state
        .store
        .delete(&property_id)
        .await
        .map_err(AppError::upstream("Failed to delete property"))?;
    if !deleted {
        return Err(AppError::NotFound);
    }

    info!(%property_id, "Property deleted");
    Ok(ApiResponse::message("Property deleted successfully"))
}
