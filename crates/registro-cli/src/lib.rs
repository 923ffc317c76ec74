//! Terminal client for the Registro de Personas API.
//!
//! [`app::App`] owns the client state and key handling, [`records`] and
//! [`view`] hold the pure filtering and projection logic, and [`ui`] draws a
//! frame from an `App`.

pub mod app;
pub mod client;
pub mod form;
pub mod notice;
pub mod records;
pub mod ui;
pub mod view;
