//! Generic CRUD handlers.
//!
//! Every route is served by one of these functions, instantiated per
//! [`Resource`]: `list::<Note>`, `create::<Bookmark>`, and so on.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use keepsake_core::{validate, Entity, EntityQuery, FieldError, ValidatedFields};

use crate::error::{ApiError, Operation, StoreResultExt};
use crate::resource::Resource;
use crate::response::{DataResponse, HealthResponse, ListResponse, MessageResponse};
use crate::AppState;

/// List query parameters. All optional.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Free-text search.
    pub q: Option<String>,
    /// Comma-separated tags; matches any.
    pub tags: Option<String>,
    /// Only the exact value `true` filters.
    pub favorite: Option<String>,
}

impl ListParams {
    /// Collect parameters from raw query pairs.
    ///
    /// The first occurrence of a repeated key wins and unknown keys are
    /// ignored, so a list request never fails on its query string.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut params.q,
                "tags" => &mut params.tags,
                "favorite" => &mut params.favorite,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// Parse a path id. Anything that is not a UUID cannot name an entity.
fn parse_id<R: Resource>(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(R::KIND))
}

/// Parse and validate a request body against the kind's rules.
fn validate_body<R: Resource>(body: &Bytes) -> Result<ValidatedFields, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        ApiError::Validation(vec![FieldError::new(
            "body",
            format!("Request body must be valid JSON: {}", e),
            None,
        )])
    })?;
    validate(R::RULES, &value).map_err(ApiError::Validation)
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/{collection}`
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse<R>>, ApiError> {
    let params = ListParams::from_pairs(pairs);
    let query = EntityQuery::from_params(
        params.q.as_deref(),
        params.tags.as_deref(),
        params.favorite.as_deref(),
    );
    let items = R::repository(&state)
        .find(&query)
        .await
        .or_api_error(Operation::List, R::KIND)?;

    debug!(
        subsystem = "api",
        kind = %R::KIND.as_str(),
        op = "list",
        query = params.q.as_deref().unwrap_or(""),
        tag_count = query.tags.as_ref().map_or(0, Vec::len),
        favorites_only = query.favorites_only,
        result_count = items.len(),
        "Listed entities"
    );
    Ok(Json(ListResponse::new(items)))
}

/// `GET /api/{collection}/:id`
pub async fn get<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<R>>, ApiError> {
    let id = parse_id::<R>(&id)?;
    let entity = R::repository(&state)
        .fetch(id)
        .await
        .or_api_error(Operation::Get, R::KIND)?;
    Ok(Json(DataResponse::new(entity)))
}

/// `POST /api/{collection}`
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<DataResponse<R>>), ApiError> {
    let fields = validate_body::<R>(&body)?;
    let draft = R::prepare_create(&state, R::draft_from_fields(fields)).await;
    let entity = R::repository(&state)
        .insert(draft)
        .await
        .or_api_error(Operation::Create, R::KIND)?;

    info!(
        subsystem = "api",
        kind = %R::KIND.as_str(),
        op = "create",
        entity_id = %entity.id(),
        "Created entity"
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(entity))))
}

/// `PUT /api/{collection}/:id`
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<DataResponse<R>>, ApiError> {
    let fields = validate_body::<R>(&body)?;
    let id = parse_id::<R>(&id)?;
    let entity = R::repository(&state)
        .replace(id, R::draft_from_fields(fields))
        .await
        .or_api_error(Operation::Update, R::KIND)?;

    info!(
        subsystem = "api",
        kind = %R::KIND.as_str(),
        op = "update",
        entity_id = %id,
        "Updated entity"
    );
    Ok(Json(DataResponse::new(entity)))
}

/// `DELETE /api/{collection}/:id`
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id::<R>(&id)?;
    R::repository(&state)
        .delete(id)
        .await
        .or_api_error(Operation::Delete, R::KIND)?;

    info!(
        subsystem = "api",
        kind = %R::KIND.as_str(),
        op = "delete",
        entity_id = %id,
        "Deleted entity"
    );
    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully",
        R::KIND.label()
    ))))
}
