use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::error::AppError;
use crate::models::Property;
use crate::search::FilterSpec;
use axum::extract::{
    rejection::{PathRejection, QueryRejection},
    Path, Query, State,
};

/// `GET /search`: runs the fallback chain and reports which tier answered
pub async fn search_properties(
    State(state): State<AppState>,
    query: Result<Query<FilterSpec>, QueryRejection>,
) -> Result<ApiResponse<Vec<Property>>, AppError> {
    let Query(filter) = query?;
    let outcome = state.search.search(&filter).await;

    Ok(ApiResponse::data(outcome.page.properties)
        .with_pagination(outcome.page.pagination)
        .with_source(outcome.tier))
}

/// `GET /search/{id}`
pub async fn lookup_property(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Property>, AppError> {
    let Path(property_id) = path?;

    let outcome = state
        .search
        .fetch_one(&property_id)
        .await
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::data(outcome.property).with_source(outcome.tier))
}
