//! The `PersonStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `registro-store-sqlite`).
//! The service layer and the HTTP API depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::person::{Person, PersonFields, PersonId};

/// Abstraction over the persistence layer holding person rows.
///
/// Timestamps (`fecha_creado`, `fecha_actualizado`) and ids are assigned by
/// the store. Every method is one self-contained unit of work: whatever
/// connection it uses is released before the returned future resolves.
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Up to `limit` rows, newest (highest id) first.
  fn list(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  ///
  /// The request path only needs [`exists`](Self::exists); this is for
  /// reading back single rows when checking a backend.
  fn get(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  fn exists(&self, id: PersonId) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Insert a new row, allocating a fresh id that is never reused.
  fn insert(
    &self,
    fields: PersonFields,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Overwrite the mutable fields of `id` and bump `fecha_actualizado`.
  ///
  /// Returns whether a row matched. A missing id is not an error.
  fn update(
    &self,
    id: PersonId,
    fields: PersonFields,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete `id`. Returns whether a row was removed.
  fn delete(&self, id: PersonId) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
