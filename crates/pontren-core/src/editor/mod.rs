//! The working-copy editor behind the add/edit form.
//!
//! An [`Editor`] owns a detached clone of one record. Every change goes
//! through a validated [`FieldPath`]; nothing reaches the store until
//! [`Editor::commit`], which replaces the stored record wholesale.

mod layout;
mod path;

pub use layout::{FormItem, FormSection, FormTab, sections};
pub use path::{
  AchievementField, BasicField, BpjsField, EducationField, ExtracurricularField,
  FieldKind, FieldPath, FieldValue, LegalityField, LevelField, Room, StatsField,
  VisionField,
};

use crate::{
  Error, Result,
  institution::{Institution, InstitutionType},
  store::InstitutionStore,
};

#[derive(Debug, Clone)]
pub struct Editor {
  original: Institution,
  working:  Institution,
  is_new:   bool,
  revision: u64,
}

impl Editor {
  /// Start editing a copy of `record`. `is_new` marks a record that is not
  /// yet in the store.
  pub fn new(record: Institution, is_new: bool) -> Self {
    Self {
      original: record.clone(),
      working: record,
      is_new,
      revision: 0,
    }
  }

  /// Edit a fresh, unsaved record of type `kind`.
  pub fn for_new<S: InstitutionStore>(
    store: &S,
    kind: InstitutionType,
  ) -> Result<Self, S::Error> {
    Ok(Self::new(store.create(kind)?, true))
  }

  /// Edit the stored record with `id`; `None` when there is no such record.
  pub fn for_existing<S: InstitutionStore>(
    store: &S,
    id: &str,
  ) -> Result<Option<Self>, S::Error> {
    Ok(store.get(id)?.map(|record| Self::new(record, false)))
  }

  // ─── State ─────────────────────────────────────────────────────────────────

  /// The working copy.
  pub fn record(&self) -> &Institution { &self.working }

  pub fn kind(&self) -> InstitutionType { self.working.kind() }

  pub fn is_new(&self) -> bool { self.is_new }

  /// Modal title.
  pub fn title(&self) -> &'static str {
    if self.is_new { "Tambah Lembaga Baru" } else { "Edit Data Lembaga" }
  }

  /// Bumped on every successful change. Views compare revisions to notice
  /// that the working copy moved.
  pub fn revision(&self) -> u64 { self.revision }

  /// Whether the working copy differs from the record it was opened with.
  pub fn is_dirty(&self) -> bool { self.working != self.original }

  pub fn sections(&self, tab: FormTab) -> Vec<FormSection> {
    sections(self.kind(), tab)
  }

  // ─── Field access ──────────────────────────────────────────────────────────

  pub fn value(&self, path: &FieldPath) -> Result<FieldValue> {
    path.read(&self.working)
  }

  /// Parse `path` and set it to `value`.
  pub fn update_field(&mut self, path: &str, value: impl Into<FieldValue>) -> Result<()> {
    let path: FieldPath = path.parse()?;
    self.set(&path, value.into())
  }

  /// Set an already-parsed field. On error the working copy is unchanged.
  pub fn set(&mut self, path: &FieldPath, value: FieldValue) -> Result<()> {
    path.write(&mut self.working, value)?;
    self.revision += 1;
    tracing::trace!(%path, revision = self.revision, "field updated");
    Ok(())
  }

  /// Set a field from raw form input, parsed for the field's kind.
  pub fn update_input(&mut self, path: &FieldPath, raw: &str) -> Result<()> {
    let value = FieldValue::parse(path.kind(), raw).map_err(|reason| {
      Error::InvalidValue { path: path.to_string(), reason }
    })?;
    self.set(path, value)
  }

  pub fn has_facility(&self, label: &str) -> bool {
    self.working.base().facilities.iter().any(|f| f == label)
  }

  /// Add `label` to the facility list, or remove every occurrence of it.
  pub fn toggle_facility(&mut self, label: &str) {
    let facilities = &mut self.working.base_mut().facilities;
    if facilities.iter().any(|f| f == label) {
      facilities.retain(|f| f != label);
    } else {
      facilities.push(label.to_owned());
    }
    self.revision += 1;
  }

  // ─── Completion ────────────────────────────────────────────────────────────

  /// Save the working copy, replacing any stored record with the same id.
  /// The editor stays usable, so a failed save can be retried.
  pub fn commit<S: InstitutionStore>(&self, store: &mut S) -> Result<Institution, S::Error> {
    let outcome = store.save(self.working.clone())?;
    tracing::info!(
      id = self.working.id(),
      kind = %self.kind(),
      ?outcome,
      "record saved"
    );
    Ok(self.working.clone())
  }

  /// Discard the working copy. The store is never touched.
  pub fn cancel(self) {
    tracing::debug!(id = self.working.id(), dirty = self.is_dirty(), "edit cancelled");
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    aid::AidProgram,
    institution::LevelKind,
    store::{MemoryStore, InstitutionStore},
  };

  fn ponpes() -> Editor { Editor::new(Institution::empty(InstitutionType::Ponpes, "p"), true) }

  fn tpq() -> Editor { Editor::new(Institution::empty(InstitutionType::Tpq, "t"), true) }

  #[test]
  fn update_nested_stage_field() {
    let mut editor = ponpes();
    editor.update_field("levels.ula.students.male", 40u32).unwrap();
    editor.update_field("levels.ula.type", LevelKind::Madrasah).unwrap();
    let p = editor.record().as_ponpes().unwrap();
    assert_eq!(p.levels.ula.students.male, 40);
    assert_eq!(p.levels.ula.kind, LevelKind::Madrasah);
    assert_eq!(p.levels.wustha.students.male, 0);
    assert_eq!(editor.revision(), 2);
    assert!(editor.is_dirty());
  }

  #[test]
  fn foreign_variant_path_is_rejected() {
    let mut editor = tpq();
    let err = editor.update_field("levels.ula.type", "pkpps").unwrap_err();
    assert!(matches!(err, Error::InvalidPath(ref p) if p == "levels.ula.type"));
    let err = editor.update_field("financialAid.pip.2021", 5u64).unwrap_err();
    assert!(matches!(err, Error::InvalidPath(_)));
    assert_eq!(editor.revision(), 0);
    assert!(!editor.is_dirty());
  }

  #[test]
  fn unknown_path_is_rejected() {
    let mut editor = ponpes();
    assert!(matches!(
      editor.update_field("basic.nmae", "x"),
      Err(Error::InvalidPath(_))
    ));
  }

  #[test]
  fn update_input_parses_by_kind() {
    let mut editor = ponpes();
    let bos = FieldPath::aid(AidProgram::Bos, "2023");
    editor.update_input(&bos, "60000000").unwrap();
    assert_eq!(editor.value(&bos).unwrap(), FieldValue::Number(60_000_000));

    editor.update_input(&bos, "").unwrap();
    assert_eq!(editor.value(&bos).unwrap(), FieldValue::Number(0));

    let err = editor.update_input(&bos, "enam puluh").unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));

    let kind: FieldPath = "levels.ulya.type".parse().unwrap();
    editor.update_input(&kind, "diknas").unwrap();
    assert_eq!(editor.value(&kind).unwrap(), FieldValue::Level(LevelKind::Diknas));
    assert!(editor.update_input(&kind, "pesantren").is_err());
  }

  #[test]
  fn toggle_facility_adds_then_removes() {
    let mut editor = tpq();
    editor.toggle_facility("WC");
    assert!(editor.has_facility("WC"));
    editor.toggle_facility("WC");
    assert!(!editor.has_facility("WC"));
    assert_eq!(editor.revision(), 2);
  }

  #[test]
  fn commit_saves_and_cancel_does_not() {
    let mut store = MemoryStore::new();
    let mut editor = Editor::for_new(&store, InstitutionType::Mdt).unwrap();
    assert_eq!(editor.title(), "Tambah Lembaga Baru");
    editor.update_field("basic.name", "MDT Al-Ikhlas").unwrap();
    let saved = editor.commit(&mut store).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(saved.id()).unwrap().unwrap().name(), "MDT Al-Ikhlas");

    let mut editor = Editor::for_existing(&store, saved.id()).unwrap().unwrap();
    assert_eq!(editor.title(), "Edit Data Lembaga");
    editor.update_field("basic.name", "Diubah").unwrap();
    editor.cancel();
    assert_eq!(store.get(saved.id()).unwrap().unwrap().name(), "MDT Al-Ikhlas");
  }

  #[test]
  fn for_existing_unknown_id_is_none() {
    let store = MemoryStore::new();
    assert!(Editor::for_existing(&store, "nope").unwrap().is_none());
  }
}
