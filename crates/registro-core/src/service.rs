//! The three CRUD operations: list, upsert and delete.
//!
//! Each operation validates its input, translates it into [`PersonStore`]
//! calls and reports failures through the [`Error`] taxonomy. Generic over
//! the backend so the HTTP layer and the tests can share it.

use crate::{
  error::{Error, Result},
  person::{Person, PersonId, PersonInput, PersonRow},
  store::PersonStore,
  validate::validate,
};

/// Maximum number of rows returned by [`list`].
pub const LIST_LIMIT: usize = 500;

/// Result of a successful [`upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted {
  Created(Person),
  /// `matched` is `false` when no row had that id; the write still counts as
  /// a success.
  Updated { id: PersonId, matched: bool },
}

/// Newest-first listing, capped at [`LIST_LIMIT`] rows.
pub async fn list<S>(store: &S) -> Result<Vec<PersonRow>>
where
  S: PersonStore,
{
  let people = store.list(LIST_LIMIT).await.map_err(Error::store)?;
  Ok(people.iter().map(PersonRow::from).collect())
}

/// Create (`id` ≤ 0) or update (`id` > 0) a person.
///
/// Validation happens before the store is touched.
pub async fn upsert<S>(store: &S, input: PersonInput) -> Result<Upserted>
where
  S: PersonStore,
{
  let validated = validate(&input)?;

  match validated.target {
    None => {
      let person = store.insert(validated.fields).await.map_err(Error::store)?;
      Ok(Upserted::Created(person))
    }
    Some(id) => {
      let matched = store.update(id, validated.fields).await.map_err(Error::store)?;
      Ok(Upserted::Updated { id, matched })
    }
  }
}

/// Delete by id after confirming the row exists.
///
/// `id` is `None` when the caller supplied nothing at all. The existence
/// check and the delete are two separate store calls.
pub async fn delete<S>(store: &S, id: Option<i64>) -> Result<PersonId>
where
  S: PersonStore,
{
  let raw = id.ok_or(Error::MissingId)?;
  if raw <= 0 {
    return Err(Error::InvalidId(raw));
  }
  let id = PersonId(raw);

  if !store.exists(id).await.map_err(Error::store)? {
    return Err(Error::NotFound(id));
  }
  store.delete(id).await.map_err(Error::store)?;
  Ok(id)
}
