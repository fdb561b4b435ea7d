//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates the `Record` implementation and field-name constants that let a
//! typed listing struct flow through the roster engine.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
