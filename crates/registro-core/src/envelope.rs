//! The uniform JSON wrapper returned by the mutating endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "exito": bool, "mensaje": string, "datos"?: object }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
  pub exito:   bool,
  pub mensaje: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub datos:   Option<Value>,
}

impl Envelope {
  pub fn success(mensaje: impl Into<String>) -> Self {
    Self { exito: true, mensaje: mensaje.into(), datos: None }
  }

  pub fn failure(mensaje: impl Into<String>) -> Self {
    Self { exito: false, mensaje: mensaje.into(), datos: None }
  }

  pub fn with_datos(mut self, datos: Value) -> Self {
    self.datos = Some(datos);
    self
  }
}
