//! [`SqliteStore`], the SQLite implementation of [`PersonStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use registro_core::{Person, PersonFields, PersonId, store::PersonStore};

use crate::{
  Result,
  encode::{PERSON_COLUMNS, RawPerson, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person registry backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Each store
/// call runs as one closure on the connection thread, so a request holds the
/// connection only for the duration of that closure.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    tracing::debug!(path = %path.as_ref().display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = crate::Error;

  async fn list(&self, limit: usize) -> Result<Vec<Person>> {
    let limit_val = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS} FROM personas ORDER BY id DESC LIMIT ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn get(&self, id: PersonId) -> Result<Option<Person>> {
    let id_val = id.get();

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM personas WHERE id = ?1"),
            rusqlite::params![id_val],
            RawPerson::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn exists(&self, id: PersonId) -> Result<bool> {
    let id_val = id.get();

    let exists = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT 1 FROM personas WHERE id = ?1",
            rusqlite::params![id_val],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false))
      })
      .await?;

    Ok(exists)
  }

  async fn insert(&self, fields: PersonFields) -> Result<Person> {
    let now = Utc::now();
    let now_str = encode_dt(now);
    let genero = fields.genero.as_str();
    let row = fields.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO personas (
             nombre, apellido, edad, genero, ocupacion, distrito,
             fecha_creado, fecha_actualizado
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
          rusqlite::params![
            row.nombre,
            row.apellido,
            row.edad,
            genero,
            row.ocupacion,
            row.distrito,
            now_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Person::from_fields(PersonId(id), fields, now))
  }

  async fn update(&self, id: PersonId, fields: PersonFields) -> Result<bool> {
    let id_val = id.get();
    let now_str = encode_dt(Utc::now());
    let genero = fields.genero.as_str();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE personas SET
             nombre = ?1,
             apellido = ?2,
             edad = ?3,
             genero = ?4,
             ocupacion = ?5,
             distrito = ?6,
             fecha_actualizado = ?7
           WHERE id = ?8",
          rusqlite::params![
            fields.nombre,
            fields.apellido,
            fields.edad,
            genero,
            fields.ocupacion,
            fields.distrito,
            now_str,
            id_val,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete(&self, id: PersonId) -> Result<bool> {
    let id_val = id.get();

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM personas WHERE id = ?1", rusqlite::params![id_val])?)
      })
      .await?;

    Ok(removed > 0)
  }
}
