//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, gender as its one-letter code.

use chrono::{DateTime, Utc};
use registro_core::{Gender, Person, PersonId};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` that decodes into [`RawPerson`].
pub const PERSON_COLUMNS: &str = "id, nombre, apellido, edad, genero, ocupacion, distrito, \
                                  fecha_creado, fecha_actualizado";

/// Raw values read directly from a `personas` row.
pub struct RawPerson {
  pub id:                i64,
  pub nombre:            String,
  pub apellido:          String,
  pub edad:              i64,
  pub genero:            String,
  pub ocupacion:         String,
  pub distrito:          String,
  pub fecha_creado:      String,
  pub fecha_actualizado: String,
}

impl RawPerson {
  /// Read a row selected with [`PERSON_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawPerson {
      id:                row.get(0)?,
      nombre:            row.get(1)?,
      apellido:          row.get(2)?,
      edad:              row.get(3)?,
      genero:            row.get(4)?,
      ocupacion:         row.get(5)?,
      distrito:          row.get(6)?,
      fecha_creado:      row.get(7)?,
      fecha_actualizado: row.get(8)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    let id = self.id;
    let corrupt = |detail: String| Error::CorruptRow { id, detail };

    Ok(Person {
      id:                PersonId(id),
      edad:              u8::try_from(self.edad)
        .map_err(|_| corrupt(format!("edad out of range: {}", self.edad)))?,
      genero:            Gender::from_code(&self.genero)
        .ok_or_else(|| corrupt(format!("unknown genero: {:?}", self.genero)))?,
      nombre:            self.nombre,
      apellido:          self.apellido,
      ocupacion:         self.ocupacion,
      distrito:          self.distrito,
      fecha_creado:      decode_dt(&self.fecha_creado)?,
      fecha_actualizado: decode_dt(&self.fecha_actualizado)?,
    })
  }
}
