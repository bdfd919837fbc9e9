use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::wishlist::{InMemoryListStore, ListStore, WishlistService};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};

/// Every origin may call the API.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the application over `store` using the wishlist/body-limit settings of `cfg`.
pub fn build_app(cfg: &AppConfig, store: Arc<dyn ListStore>) -> Router {
    let wishlist = WishlistService::new(store, cfg.wishlist.item_mode);
    let state = AppState::new(wishlist, cfg.wishlist.service_name.as_str());
    routes::build_router(state, build_cors(), cfg.wishlist.body_limit_bytes)
}

/// Load host/port from the validated config
fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(cfg.bind_addr().parse()?)
}

/// Serve with a fresh in-memory store until `shutdown` resolves.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store: Arc<dyn ListStore> = Arc::new(InMemoryListStore::new());
    let app = build_app(&cfg, store);

    let addr = load_bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        item_mode = %cfg.wishlist.item_mode,
        body_limit_bytes = cfg.wishlist.body_limit_bytes,
        "wishlist backend listening"
    );
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}
