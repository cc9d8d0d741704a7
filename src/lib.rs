//! FX order ticket engine.
//!
//! Derives a single effective order from layered state (defaults, user
//! preferences, external intent, user edits), validates it field-by-field
//! against schema rules and server truth with race-condition-safe async
//! checks, and submits it through a create/amend order gateway.

pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod intent;
pub mod models;
pub mod refdata;
pub mod schema;
pub mod store;
pub mod submit;
pub mod tls;
pub mod validation;
pub mod visibility;

pub use error::{OrderpadError, Result};
