//! Error types for `registro-core`.
//!
//! [`ValidationError`] messages are user-facing and end up verbatim in the
//! `mensaje` field of the JSON envelope.

use thiserror::Error;

use crate::person::PersonId;

/// A client-fixable problem with a save request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Datos JSON no válidos")]
  MalformedBody,

  #[error("El {0} es requerido")]
  MissingField(&'static str),

  #[error("La edad debe estar entre 18 y 99 años")]
  OutOfRange(i64),

  #[error("Género no válido: {0:?}")]
  InvalidGender(String),
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("ID no proporcionado")]
  MissingId,

  #[error("ID no válido")]
  InvalidId(i64),

  #[error("Persona no encontrada")]
  NotFound(PersonId),

  #[error("Error: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error from any [`PersonStore`](crate::store::PersonStore).
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::StoreUnavailable(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
