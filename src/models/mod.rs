//! Shared wire and domain models for the order ticket.
//!
//! Contains the core order vocabulary (sides, order types, amounts,
//! accounts, expiry policies) and the request/response types exchanged
//! with the order gateway and the reference-data service.

pub mod field_check;
pub mod order;
pub mod refdata;
pub mod submit_order;
