//! Handlers for the three person endpoints.

use std::sync::Arc;

use axum::{
  Json,
  body::Bytes,
  extract::{Query, State, rejection::QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use registro_core::{
  Envelope, PersonInput, PersonRow, ValidationError, lenient,
  service::{self, Upserted},
  store::PersonStore,
};
use serde_json::{Value, json};

use crate::error::{ApiError, ListError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /list`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<PersonRow>>, ListError>
where
  S: PersonStore,
{
  let rows = service::list(store.as_ref()).await?;
  tracing::debug!(count = rows.len(), "listed people");
  Ok(Json(rows))
}

// ─── Save ─────────────────────────────────────────────────────────────────────

/// Decode a save body. Anything other than a non-empty JSON object is
/// malformed.
pub fn parse_save_body(body: &[u8]) -> Result<PersonInput, ValidationError> {
  let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::MalformedBody)?;
  match &value {
    Value::Object(map) if !map.is_empty() => {}
    _ => return Err(ValidationError::MalformedBody),
  }
  serde_json::from_value(value).map_err(|_| ValidationError::MalformedBody)
}

/// `POST /save`: 201 + the created row when `id` is 0, 200 on update.
///
/// The body is read raw so that malformed JSON produces an envelope instead
/// of axum's plain-text rejection.
pub async fn save<S>(State(store): State<Arc<S>>, body: Bytes) -> Result<Response, ApiError>
where
  S: PersonStore,
{
  let input = parse_save_body(&body)?;

  match service::upsert(store.as_ref(), input).await? {
    Upserted::Created(person) => {
      tracing::info!(id = %person.id, "person created");
      let envelope = Envelope::success("Persona registrada correctamente")
        .with_datos(json!(PersonRow::from(&person)));
      Ok((StatusCode::CREATED, Json(envelope)).into_response())
    }
    Upserted::Updated { id, matched } => {
      if matched {
        tracing::info!(%id, "person updated");
      } else {
        tracing::warn!(%id, "update matched no row");
      }
      let envelope = Envelope::success("Persona actualizada correctamente");
      Ok((StatusCode::OK, Json(envelope)).into_response())
    }
  }
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// The `id` of a delete request, read from the raw query pairs.
///
/// Repeated keys never fail the request: the last `id` wins. The value is
/// parsed leniently, so `"5abc"` still means 5. A blank value or a bare `"0"`
/// counts as absent.
pub fn delete_id(pairs: &[(String, String)]) -> Option<i64> {
  let (_, raw) = pairs.iter().rev().find(|(key, _)| key == "id")?;
  let raw = raw.trim();
  if raw.is_empty() || raw == "0" {
    return None;
  }
  Some(lenient::parse_int_prefix(raw))
}

/// `GET /delete?id=<id>` or `DELETE /delete?id=<id>`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Envelope>, ApiError>
where
  S: PersonStore,
{
  let Query(pairs) = query.map_err(|e| {
    tracing::debug!(error = %e, "unreadable delete query");
    ApiError::BadRequest("ID no válido".to_owned())
  })?;

  let id = service::delete(store.as_ref(), delete_id(&pairs)).await?;
  tracing::info!(%id, "person deleted");
  Ok(Json(
    Envelope::success("Persona eliminada del registro").with_datos(json!({ "id": id })),
  ))
}
