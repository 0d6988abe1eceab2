//! Core types for the SI-Pedipontren institution registry.
//!
//! This crate holds the record schema, the in-memory repository, the
//! dashboard aggregation and the working-copy editor. It has no terminal or
//! network dependencies; the `pontren` binary builds on top of it.

pub mod aid;
pub mod editor;
pub mod error;
pub mod institution;
pub mod metadata;
pub mod seed;
pub mod stats;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
