//! Cross-module scenarios: seed data through the store, the editor and the
//! dashboard aggregation.

use serde_json::json;

use crate::{
  Error,
  editor::Editor,
  institution::{Institution, InstitutionType},
  seed,
  stats::DashboardStats,
  store::{InstitutionStore, MemoryStore, SaveOutcome},
};

fn seeded() -> MemoryStore {
  MemoryStore::from_records(seed::mock_data()).expect("seed ids are unique")
}

fn ids(store: &MemoryStore) -> Vec<String> {
  store.records().iter().map(|r| r.id().to_owned()).collect()
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[test]
fn saving_same_record_twice_keeps_length_and_position() {
  let mut s = seeded();
  let extra = s.create(InstitutionType::Rtq).unwrap();
  s.save(extra.clone()).unwrap();
  let before = ids(&s);

  let seed = s.get("1").unwrap().unwrap();
  assert_eq!(s.save(seed.clone()).unwrap(), SaveOutcome::Replaced);
  assert_eq!(s.save(seed).unwrap(), SaveOutcome::Replaced);
  assert_eq!(ids(&s), before);
}

#[test]
fn replaced_record_keeps_its_index() {
  let mut s = seeded();
  let extra = s.create(InstitutionType::Mdt).unwrap();
  s.save(extra).unwrap();

  let mut seed = s.get("1").unwrap().unwrap();
  seed.base_mut().basic.name = "Renamed".into();
  s.save(seed).unwrap();
  assert_eq!(s.records()[0].name(), "Renamed");
}

#[test]
fn saving_unknown_id_appends() {
  let mut s = seeded();
  let before = s.len();
  let record = Institution::empty(InstitutionType::Paudqu, "new-id");
  assert_eq!(s.save(record).unwrap(), SaveOutcome::Inserted);
  assert_eq!(s.len(), before + 1);
  assert_eq!(s.records().last().unwrap().id(), "new-id");
}

#[test]
fn deleting_unknown_id_is_a_no_op() {
  let mut s = seeded();
  let before = s.list().unwrap();
  assert!(!s.delete("missing").unwrap());
  assert_eq!(s.list().unwrap(), before);
}

#[test]
fn delete_removes_existing_record() {
  let mut s = seeded();
  assert!(s.delete("1").unwrap());
  assert!(s.is_empty());
  assert!(s.get("1").unwrap().is_none());
}

#[test]
fn save_with_empty_id_fails_without_change() {
  let mut s = seeded();
  let err = s.save(Institution::empty(InstitutionType::Tpq, "")).unwrap_err();
  assert!(matches!(err, Error::EmptyId));
  assert_eq!(s.len(), 1);
}

#[test]
fn from_records_rejects_duplicate_ids() {
  let records = vec![
    Institution::empty(InstitutionType::Tpq, "a"),
    Institution::empty(InstitutionType::Rtq, "a"),
  ];
  assert!(matches!(
    MemoryStore::from_records(records),
    Err(Error::DuplicateId(ref id)) if id == "a"
  ));
}

#[test]
fn create_does_not_store_and_yields_fresh_ids() {
  let s = seeded();
  let a = s.create(InstitutionType::Tpq).unwrap();
  let b = s.create(InstitutionType::Tpq).unwrap();
  assert_ne!(a.id(), b.id());
  assert!(!a.id().is_empty());
  assert_eq!(s.len(), 1);
}

#[test]
fn list_by_type_filters_in_order() {
  let mut s = seeded();
  for kind in [InstitutionType::Tpq, InstitutionType::Rtq, InstitutionType::Tpq] {
    let record = s.create(kind).unwrap();
    s.save(record).unwrap();
  }
  let tpq = s.list_by_type(InstitutionType::Tpq).unwrap();
  assert_eq!(tpq.len(), 2);
  assert_eq!(tpq[0].id(), s.records()[1].id());
  assert!(s.list_by_type(InstitutionType::Mdt).unwrap().is_empty());
}

// ─── Record skeletons ────────────────────────────────────────────────────────

#[test]
fn created_ponpes_and_tpq_have_opposite_shapes() {
  let s = MemoryStore::new();

  let ponpes = serde_json::to_value(s.create(InstitutionType::Ponpes).unwrap()).unwrap();
  assert_eq!(ponpes["levels"]["wustha"]["personnel"]["teachers"], 0);
  assert!(ponpes.get("studentEducationLevels").is_none());

  let tpq = serde_json::to_value(s.create(InstitutionType::Tpq).unwrap()).unwrap();
  assert_eq!(tpq["studentEducationLevels"]["femaleSmp"], 0);
  assert!(tpq.get("levels").is_none());
  assert_eq!(tpq["facilities"], json!([]));
  assert_eq!(tpq["financialAid"]["bos"], json!({}));
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

#[test]
fn seed_plus_new_tpq_updates_dashboard() {
  let mut s = seeded();
  let mut editor = Editor::for_new(&s, InstitutionType::Tpq).unwrap();
  editor.update_field("basic.name", "TPQ Nurul Iman").unwrap();
  editor.update_field("stats.totalStudents", 40u32).unwrap();
  editor.commit(&mut s).unwrap();

  let stats = DashboardStats::compute(s.records());
  assert_eq!(stats.total, 2);
  assert_eq!(stats.students, 1290);
  assert_eq!(stats.count(InstitutionType::Ponpes), 1);
  assert_eq!(stats.count(InstitutionType::Tpq), 1);
  for kind in [InstitutionType::Mdt, InstitutionType::Rtq, InstitutionType::Paudqu] {
    assert_eq!(stats.count(kind), 0);
  }
}

#[test]
fn seed_bos_growth_starts_at_fifty_million() {
  let stats = DashboardStats::compute(seeded().records());
  assert_eq!(stats.growth[0].year, "2021");
  assert_eq!(stats.growth[0].bos, 50.0);
  assert_eq!(stats.current_bos(), 70.0);
  assert_eq!(stats.teachers, 85);
}

#[test]
fn totals_are_independent_of_stage_counts() {
  let mut s = seeded();
  let mut editor = Editor::for_existing(&s, "1").unwrap().unwrap();
  editor.update_field("levels.ula.students.male", 999u32).unwrap();
  editor.commit(&mut s).unwrap();

  let stats = DashboardStats::compute(s.records());
  assert_eq!(stats.students, 1250);
}

#[test]
fn deleting_seed_empties_dashboard() {
  let mut s = seeded();
  s.delete("1").unwrap();
  let stats = DashboardStats::compute(s.records());
  assert_eq!(stats.total, 0);
  assert_eq!(stats.current_bos(), 0.0);
}

// ─── Editor against the store ────────────────────────────────────────────────

#[test]
fn edit_replaces_whole_record_on_commit_only() {
  let mut s = seeded();
  let mut editor = Editor::for_existing(&s, "1").unwrap().unwrap();
  editor.update_field("financialAid.bos.2025", 80_000_000u64).unwrap();
  editor.update_field("buildingFloors.kitchen", 2u32).unwrap();

  assert_eq!(s.get("1").unwrap().unwrap().bos().get("2025"), 70_000_000);

  editor.commit(&mut s).unwrap();
  let stored = s.get("1").unwrap().unwrap();
  assert_eq!(stored.bos().get("2025"), 80_000_000);
  assert_eq!(stored.as_ponpes().unwrap().building_floors.kitchen, 2);
  assert_eq!(s.len(), 1);
}

#[test]
fn seed_file_with_mixed_variants_loads() {
  let tpq = serde_json::to_value(Institution::empty(InstitutionType::Tpq, "2")).unwrap();
  let mut raw = serde_json::to_value(seed::mock_data()).unwrap();
  raw.as_array_mut().unwrap().push(tpq);

  let records = seed::parse(&raw.to_string()).unwrap();
  let s = MemoryStore::from_records(records).unwrap();
  assert_eq!(s.len(), 2);
  assert_eq!(s.records()[1].kind(), InstitutionType::Tpq);
}
