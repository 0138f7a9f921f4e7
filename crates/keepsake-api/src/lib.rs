//! # keepsake-api
//!
//! HTTP surface for keepsake: `/api/notes` and `/api/bookmarks` CRUD with
//! search, tag, and favorite filters, plus `/health`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod resource;
pub mod response;

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::error;
use uuid::Uuid;

use keepsake_core::{Bookmark, EntityRepository, MetadataFetcher, Note};
use keepsake_db::MemoryRepository;

pub use config::{parse_allowed_origins, ServerConfig, StoreKind};
pub use error::{ApiError, Operation};
pub use resource::Resource;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn EntityRepository<Note>>,
    pub bookmarks: Arc<dyn EntityRepository<Bookmark>>,
    pub fetcher: Arc<dyn MetadataFetcher>,
}

impl AppState {
    pub fn new(
        notes: Arc<dyn EntityRepository<Note>>,
        bookmarks: Arc<dyn EntityRepository<Bookmark>>,
        fetcher: Arc<dyn MetadataFetcher>,
    ) -> Self {
        Self {
            notes,
            bookmarks,
            fetcher,
        }
    }

    /// State backed by fresh in-memory repositories.
    pub fn in_memory(fetcher: Arc<dyn MetadataFetcher>) -> Self {
        Self::new(
            Arc::new(MemoryRepository::<Note>::new()),
            Arc::new(MemoryRepository::<Bookmark>::new()),
            fetcher,
        )
    }
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(subsystem = "api", component = "panic", error = detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "error": "Internal server error"})),
    )
        .into_response()
}

/// Mount one resource at `/api/{collection}` and `/api/{collection}/:id`.
fn with_resource<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    use handlers::{create, delete, get as get_one, list, update};

    let base = format!("/api/{}", R::KIND.collection());
    router
        .route(&base, get(list::<R>).post(create::<R>))
        .route(
            &format!("{base}/:id"),
            get(get_one::<R>).put(update::<R>).delete(delete::<R>),
        )
}

/// Build the application with all middleware.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new().route("/health", get(handlers::health_check));
    let router = with_resource::<Bookmark>(with_resource::<Note>(router));

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(Duration::from_secs(3600)),
        )
        .layer(RequestBodyLimitLayer::new(config.body_limit))
        .with_state(state)
}
