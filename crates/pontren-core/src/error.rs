//! Error types for `pontren-core`.

use std::path::PathBuf;

use thiserror::Error;

use crate::institution::InstitutionType;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid field path: {0:?}")]
  InvalidPath(String),

  #[error("invalid value for {path:?}: {reason}")]
  InvalidValue { path: String, reason: String },

  #[error("{kind} record carries foreign field {field:?}")]
  VariantMismatch {
    kind:  InstitutionType,
    field: String,
  },

  #[error("unknown institution type: {0:?}")]
  UnknownType(String),

  #[error("duplicate institution id: {0:?}")]
  DuplicateId(String),

  #[error("institution id must not be empty")]
  EmptyId,

  #[error("reading {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
