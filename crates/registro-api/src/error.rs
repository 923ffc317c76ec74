//! API error types and [`axum::response::IntoResponse`] implementations.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use registro_core::Envelope;
use serde_json::json;
use thiserror::Error;

/// An error returned by the `/save` and `/delete` handlers, rendered as a
/// failed [`Envelope`].
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  #[error(transparent)]
  Store(registro_core::Error),
}

impl From<registro_core::Error> for ApiError {
  fn from(e: registro_core::Error) -> Self {
    use registro_core::Error as E;
    match e {
      E::Validation(_) | E::MissingId | E::InvalidId(_) => ApiError::BadRequest(e.to_string()),
      E::NotFound(_) => ApiError::NotFound(e.to_string()),
      E::StoreUnavailable(_) => ApiError::Store(e),
    }
  }
}

impl From<registro_core::ValidationError> for ApiError {
  fn from(e: registro_core::ValidationError) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl ApiError {
  fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    if let ApiError::Store(e) = &self {
      tracing::error!(error = %e, "store fault");
    }
    (self.status(), Json(Envelope::failure(self.to_string()))).into_response()
  }
}

/// Failure of `GET /list`, rendered as `{"error": "..."}` rather than an
/// envelope.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ListError(#[from] registro_core::Error);

impl IntoResponse for ListError {
  fn into_response(self) -> Response {
    tracing::error!(error = %self.0, "listing failed");
    (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(json!({ "error": self.0.to_string() })),
    )
      .into_response()
  }
}
