//! Route registration: merges every module's routes under one CORS layer.

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::Router;
use cover_core::Module;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Build the complete router.
///
/// The API is called straight from the browser form, so any origin may use it.
pub fn build_router(modules: &[Box<dyn Module>]) -> Router {
    let mut app = Router::new();
    for module in modules {
        info!("Mounting {} routes", module.name());
        app = app.merge(module.routes());
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    app.layer(cors)
}
