use std::{any::Any, sync::Arc};

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use service::wishlist::WishlistService;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::errors::ApiError;

pub mod health;
pub mod wishlist;

/// Shared handler state; built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub wishlist: WishlistService,
    pub service_name: Arc<str>,
}

impl AppState {
    pub fn new(wishlist: WishlistService, service_name: impl Into<Arc<str>>) -> Self {
        Self { wishlist, service_name: service_name.into() }
    }
}

fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Turn a panic inside `op`'s handler into a 500 `<op>_failed` response.
pub fn catch_panic(
    op: &'static str,
) -> CatchPanicLayer<impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static> {
    CatchPanicLayer::custom(move |err: Box<dyn Any + Send + 'static>| {
        ApiError::internal(op, format!("panic: {}", panic_message(err.as_ref()))).into_response()
    })
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Build the full application router: health, wishlist routes, CORS, body limit, tracing
pub fn build_router(state: AppState, cors: CorsLayer, body_limit_bytes: usize) -> Router {
    let api = Router::new()
        .route("/api/health", get(health::health).layer(catch_panic("health")))
        .route("/api/wishlist/save", post(wishlist::save).layer(catch_panic("save")))
        .route("/api/wishlist/get", get(wishlist::get).layer(catch_panic("get")))
        .route("/api/wishlist/clear", post(wishlist::clear).layer(catch_panic("clear")));

    api.fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
