//! Core types and trait definitions for the person registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend, the JSON API and the terminal client all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod district;
pub mod envelope;
pub mod error;
pub mod lenient;
pub mod person;
pub mod service;
pub mod store;
pub mod validate;

pub use envelope::Envelope;
pub use error::{Error, Result, ValidationError};
pub use person::{Gender, Person, PersonFields, PersonId, PersonInput, PersonRow};
