//! The `InstitutionStore` trait and its in-memory implementation.
//!
//! The store is the single mutation entry point for records. Reads hand out
//! copies; writes replace whole records. Higher layers (the editor, the
//! terminal dashboard) depend on the trait, not on [`MemoryStore`].

use std::collections::HashSet;

use uuid::Uuid;

use crate::{
  Error, Result,
  institution::{Institution, InstitutionType},
};

/// What a [`InstitutionStore::save`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
  /// A new id; the record was appended.
  Inserted,
  /// An existing id; the record was replaced at its original position.
  Replaced,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an institution store backend.
///
/// Mutations take `&mut self`: there is exactly one writer, and no caller
/// can hold a reference into the record list across a mutation. A failed
/// mutation leaves the list unchanged.
pub trait InstitutionStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All records in insertion order.
  fn list(&self) -> Result<Vec<Institution>, Self::Error>;

  /// Records of one type, in insertion order.
  fn list_by_type(
    &self,
    kind: InstitutionType,
  ) -> Result<Vec<Institution>, Self::Error> {
    let mut records = self.list()?;
    records.retain(|r| r.kind() == kind);
    Ok(records)
  }

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(&self, id: &str) -> Result<Option<Institution>, Self::Error>;

  /// Build an empty record of type `kind` with an id not yet in the store.
  /// The record is not stored until it is saved.
  fn create(&self, kind: InstitutionType) -> Result<Institution, Self::Error>;

  /// Insert or replace `item` by its id. No field-level merge happens; the
  /// stored record becomes exactly `item`.
  fn save(&mut self, item: Institution) -> Result<SaveOutcome, Self::Error>;

  /// Remove the record with `id`. Returns `false` (and changes nothing) if
  /// no such record exists.
  fn delete(&mut self, id: &str) -> Result<bool, Self::Error>;
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// An ordered, in-process record list. Nothing outlives the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  records: Vec<Institution>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Start from `records`, which must have unique, non-empty ids.
  pub fn from_records(records: Vec<Institution>) -> Result<Self> {
    {
      let mut seen = HashSet::new();
      for record in &records {
        if record.id().is_empty() {
          return Err(Error::EmptyId);
        }
        if !seen.insert(record.id()) {
          return Err(Error::DuplicateId(record.id().to_owned()));
        }
      }
    }
    Ok(Self { records })
  }

  /// A read-only view of the current list.
  pub fn records(&self) -> &[Institution] { &self.records }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  pub fn contains(&self, id: &str) -> bool { self.position(id).is_some() }

  fn position(&self, id: &str) -> Option<usize> {
    self.records.iter().position(|r| r.id() == id)
  }

  fn fresh_id(&self) -> String {
    loop {
      let id = Uuid::new_v4().simple().to_string();
      if !self.contains(&id) {
        return id;
      }
    }
  }
}

impl InstitutionStore for MemoryStore {
  type Error = Error;

  fn list(&self) -> Result<Vec<Institution>> { Ok(self.records.clone()) }

  fn list_by_type(&self, kind: InstitutionType) -> Result<Vec<Institution>> {
    Ok(
      self
        .records
        .iter()
        .filter(|r| r.kind() == kind)
        .cloned()
        .collect(),
    )
  }

  fn get(&self, id: &str) -> Result<Option<Institution>> {
    Ok(self.position(id).map(|i| self.records[i].clone()))
  }

  fn create(&self, kind: InstitutionType) -> Result<Institution> {
    let record = Institution::empty(kind, self.fresh_id());
    tracing::debug!(id = record.id(), %kind, "created empty record");
    Ok(record)
  }

  fn save(&mut self, item: Institution) -> Result<SaveOutcome> {
    if item.id().is_empty() {
      return Err(Error::EmptyId);
    }
    match self.position(item.id()) {
      Some(index) => {
        tracing::debug!(id = item.id(), index, "replacing record");
        self.records[index] = item;
        Ok(SaveOutcome::Replaced)
      }
      None => {
        tracing::debug!(id = item.id(), kind = %item.kind(), "appending record");
        self.records.push(item);
        Ok(SaveOutcome::Inserted)
      }
    }
  }

  fn delete(&mut self, id: &str) -> Result<bool> {
    match self.position(id) {
      Some(index) => {
        self.records.remove(index);
        tracing::debug!(id, "deleted record");
        Ok(true)
      }
      None => {
        tracing::debug!(id, "delete of unknown id ignored");
        Ok(false)
      }
    }
  }
}
