use std::path::Path;

use axum::{
    http::{header, HeaderValue, Method},
    response::Redirect,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, routes};

const INDEX_PATH: &str = "/static/index.html";

pub fn create(app_state: AppState, static_dir: impl AsRef<Path>, app_url: &str) -> Router<()> {
    let cors = match HeaderValue::from_str(app_url) {
        Ok(origin) => CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(AllowOrigin::exact(origin)),
        Err(err) => {
            tracing::warn!("Ignoring invalid app url '{}' for CORS: {}", app_url, err);
            CorsLayer::new()
        }
    };

    Router::new()
        .route("/", get(|| async { Redirect::temporary(INDEX_PATH) }))
        .nest("/activities", routes::activities::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
