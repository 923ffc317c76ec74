//! JSON API for the person registry.
//!
//! Exposes an axum [`Router`] backed by any
//! [`registro_core::store::PersonStore`].
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/list` | Bare JSON array, newest first, at most 500 rows |
//! | `POST` | `/save` | Body: [`PersonInput`](registro_core::PersonInput); `id` 0 creates (201), >0 updates (200) |
//! | `GET`, `DELETE` | `/delete?id=<id>` | 404 if the id does not exist |
//!
//! Every path answers `OPTIONS` with an empty 200 and carries permissive CORS
//! headers.

pub mod config;
pub mod error;
pub mod people;

use std::sync::Arc;

use axum::{
  Router,
  http::{
    HeaderValue, Method,
    header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
  },
  routing::{get, post},
};
use registro_core::store::PersonStore;
use tower_http::{
  cors::{Any, CorsLayer},
  set_header::SetResponseHeaderLayer,
  trace::TraceLayer,
};

pub use config::ServerConfig;
pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PersonStore + 'static,
{
  Router::new()
    .route("/list", get(people::list::<S>))
    .route("/save", post(people::save::<S>))
    .route("/delete", get(people::delete::<S>).delete(people::delete::<S>))
    .layer(cors_layer())
    .layer(SetResponseHeaderLayer::if_not_present(
      ACCESS_CONTROL_ALLOW_METHODS,
      HeaderValue::from_static(ALLOWED_METHODS),
    ))
    .layer(SetResponseHeaderLayer::if_not_present(
      ACCESS_CONTROL_ALLOW_HEADERS,
      HeaderValue::from_static("Content-Type"),
    ))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}

/// Sent as `Access-Control-Allow-Methods` on non-preflight responses, which
/// [`CorsLayer`] leaves without it.
const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Wide-open CORS: any origin, the usual verbs, JSON bodies.
///
/// Pre-flight `OPTIONS` requests are answered by the layer itself with an
/// empty 200 and never reach a handler.
pub fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([
      Method::GET,
      Method::POST,
      Method::PUT,
      Method::DELETE,
      Method::OPTIONS,
    ])
    .allow_headers([CONTENT_TYPE])
}

#[cfg(test)]
mod tests;
