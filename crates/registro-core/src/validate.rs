//! Validation and normalisation of save requests.
//!
//! Pure functions only. Nothing here escapes text for SQL; the store binds
//! every value as a statement parameter.

use crate::{
  error::ValidationError,
  person::{Gender, PersonFields, PersonId, PersonInput},
};

/// Inclusive age bounds.
pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 99;

/// What a save request resolves to once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
  /// `None` creates a new person; `Some` updates an existing one.
  pub target: Option<PersonId>,
  pub fields: PersonFields,
}

/// Validate and normalise `input`.
///
/// Checks run in a fixed order (`nombre`, `apellido`, `edad`, `genero`) and
/// the first failure is reported. Text fields are trimmed; `ocupacion` and
/// `distrito` may be empty.
pub fn validate(input: &PersonInput) -> Result<Validated, ValidationError> {
  let nombre = required(input.nombre.as_deref(), "nombre")?;
  let apellido = required(input.apellido.as_deref(), "apellido")?;

  if !(MIN_AGE..=MAX_AGE).contains(&input.edad) {
    return Err(ValidationError::OutOfRange(input.edad));
  }
  let edad = u8::try_from(input.edad).map_err(|_| ValidationError::OutOfRange(input.edad))?;

  let genero = match input.genero.as_deref().map(str::trim) {
    None | Some("") => Gender::default(),
    Some(code) => Gender::from_code(code)
      .ok_or_else(|| ValidationError::InvalidGender(code.to_owned()))?,
  };

  let target = (input.id > 0).then_some(PersonId(input.id));

  Ok(Validated {
    target,
    fields: PersonFields {
      nombre,
      apellido,
      edad,
      genero,
      ocupacion: trimmed(input.ocupacion.as_deref()),
      distrito: trimmed(input.distrito.as_deref()),
    },
  })
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
  match value.map(str::trim) {
    Some(v) if !v.is_empty() => Ok(v.to_owned()),
    _ => Err(ValidationError::MissingField(field)),
  }
}

fn trimmed(value: Option<&str>) -> String { value.map(str::trim).unwrap_or_default().to_owned() }
