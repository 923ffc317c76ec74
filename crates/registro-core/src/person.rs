//! Person, the single entity of the registry, in its stored, validated and
//! wire shapes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Display format for `fecha_creado` on read: `DD/MM/YYYY`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

// ─── Identity ────────────────────────────────────────────────────────────────

/// Server-assigned row id. Always positive once persisted.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl PersonId {
  pub fn get(self) -> i64 { self.0 }
}

impl fmt::Display for PersonId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

// ─── Gender ──────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Gender {
  #[default]
  M,
  F,
}

impl Gender {
  pub fn as_str(self) -> &'static str {
    match self {
      Gender::M => "M",
      Gender::F => "F",
    }
  }

  /// Parse the stored/wire code. Only `"M"` and `"F"` are accepted.
  pub fn from_code(code: &str) -> Option<Self> {
    match code {
      "M" => Some(Gender::M),
      "F" => Some(Gender::F),
      _ => None,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Gender::M => "Masculino",
      Gender::F => "Femenino",
    }
  }
}

// ─── Stored row ──────────────────────────────────────────────────────────────

/// The mutable fields of a person, already trimmed and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFields {
  pub nombre:    String,
  pub apellido:  String,
  pub edad:      u8,
  pub genero:    Gender,
  pub ocupacion: String,
  pub distrito:  String,
}

/// A persisted person row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:                PersonId,
  pub nombre:            String,
  pub apellido:          String,
  pub edad:              u8,
  pub genero:            Gender,
  pub ocupacion:         String,
  pub distrito:          String,
  /// Set once by the store at insert time; never updated.
  pub fecha_creado:      DateTime<Utc>,
  /// Set by the store at insert time and on every update.
  pub fecha_actualizado: DateTime<Utc>,
}

impl Person {
  /// Build the row a store is about to insert under `id` at `now`.
  pub fn from_fields(id: PersonId, fields: PersonFields, now: DateTime<Utc>) -> Self {
    Self {
      id,
      nombre: fields.nombre,
      apellido: fields.apellido,
      edad: fields.edad,
      genero: fields.genero,
      ocupacion: fields.ocupacion,
      distrito: fields.distrito,
      fecha_creado: now,
      fecha_actualizado: now,
    }
  }

  pub fn full_name(&self) -> String { format!("{} {}", self.nombre, self.apellido) }
}

// ─── Wire shapes ─────────────────────────────────────────────────────────────

/// One element of the `GET /list` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRow {
  pub id:           i64,
  pub nombre:       String,
  pub apellido:     String,
  pub edad:         u8,
  pub genero:       Gender,
  pub ocupacion:    String,
  pub distrito:     String,
  /// `DD/MM/YYYY`
  pub fecha_creado: String,
}

impl From<&Person> for PersonRow {
  fn from(p: &Person) -> Self {
    PersonRow {
      id:           p.id.get(),
      nombre:       p.nombre.clone(),
      apellido:     p.apellido.clone(),
      edad:         p.edad,
      genero:       p.genero,
      ocupacion:    p.ocupacion.clone(),
      distrito:     p.distrito.clone(),
      fecha_creado: p.fecha_creado.format(DATE_FORMAT).to_string(),
    }
  }
}

/// The body of a `POST /save` request, before validation.
///
/// Deserialisation is lenient: numbers may arrive as strings and text fields
/// as numbers, matching what browser forms tend to send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInput {
  /// `0` (or absent) creates a new person; a positive id updates one.
  #[serde(default, deserialize_with = "lenient::int")]
  pub id:        i64,
  #[serde(default, deserialize_with = "lenient::text")]
  pub nombre:    Option<String>,
  #[serde(default, deserialize_with = "lenient::text")]
  pub apellido:  Option<String>,
  #[serde(default, deserialize_with = "lenient::int")]
  pub edad:      i64,
  #[serde(default, deserialize_with = "lenient::text")]
  pub genero:    Option<String>,
  #[serde(default, deserialize_with = "lenient::text")]
  pub ocupacion: Option<String>,
  #[serde(default, deserialize_with = "lenient::text")]
  pub distrito:  Option<String>,
}

impl From<&PersonRow> for PersonInput {
  fn from(row: &PersonRow) -> Self {
    PersonInput {
      id:        row.id,
      nombre:    Some(row.nombre.clone()),
      apellido:  Some(row.apellido.clone()),
      edad:      i64::from(row.edad),
      genero:    Some(row.genero.as_str().to_owned()),
      ocupacion: Some(row.ocupacion.clone()),
      distrito:  Some(row.distrito.clone()),
    }
  }
}
