//! Dashboard aggregation.
//!
//! Statistics are always recomputed from the full record list; nothing here
//! is cached or maintained incrementally. Output order is fixed (type
//! declaration order, chronological years) regardless of input order.

use serde::Serialize;

use crate::{
  aid::{MILLION, YEARS},
  institution::{Institution, InstitutionType},
  metadata,
};

/// Number of records of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
  pub kind:  InstitutionType,
  pub label: &'static str,
  pub count: usize,
}

/// Total BOS aid for one year, in millions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotal {
  pub year: &'static str,
  pub bos:  f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
  pub total:    usize,
  pub students: u64,
  pub teachers: u64,
  pub by_type:  Vec<TypeCount>,
  pub growth:   Vec<YearTotal>,
}

impl DashboardStats {
  pub fn compute(records: &[Institution]) -> Self {
    let students = records
      .iter()
      .map(|r| u64::from(r.stats().total_students))
      .sum();
    let teachers = records
      .iter()
      .map(|r| u64::from(r.stats().total_teachers))
      .sum();

    let by_type = InstitutionType::all()
      .map(|kind| TypeCount {
        kind,
        label: metadata::label(kind),
        count: records.iter().filter(|r| r.kind() == kind).count(),
      })
      .collect();

    let growth = YEARS
      .iter()
      .map(|&year| {
        let total = records
          .iter()
          .map(|r| r.bos().get(year))
          .fold(0u64, u64::saturating_add);
        YearTotal { year, bos: total as f64 / MILLION }
      })
      .collect();

    Self {
      total: records.len(),
      students,
      teachers,
      by_type,
      growth,
    }
  }

  /// BOS for the latest year of the window, in millions.
  pub fn current_bos(&self) -> f64 {
    self.growth.last().map(|y| y.bos).unwrap_or(0.0)
  }

  pub fn count(&self, kind: InstitutionType) -> usize {
    self
      .by_type
      .iter()
      .find(|t| t.kind == kind)
      .map(|t| t.count)
      .unwrap_or(0)
  }

  /// The largest per-type count, used to scale the distribution bars.
  pub fn max_count(&self) -> usize {
    self.by_type.iter().map(|t| t.count).max().unwrap_or(0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(kind: InstitutionType, id: &str, students: u32, bos_2021: u64) -> Institution {
    let mut r = Institution::empty(kind, id);
    r.base_mut().stats.total_students = students;
    r.base_mut().stats.total_teachers = students / 10;
    match &mut r {
      Institution::Ponpes(p) => p.financial_aid.bos.set("2021", bos_2021),
      Institution::Tpq(c) | Institution::Mdt(c) | Institution::Rtq(c) | Institution::Paudqu(c) => {
        c.financial_aid.bos.set("2021", bos_2021)
      }
    }
    r
  }

  #[test]
  fn empty_list_still_lists_every_type_and_year() {
    let stats = DashboardStats::compute(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.by_type.len(), 5);
    assert!(stats.by_type.iter().all(|t| t.count == 0));
    let years: Vec<_> = stats.growth.iter().map(|y| y.year).collect();
    assert_eq!(years, YEARS);
    assert_eq!(stats.current_bos(), 0.0);
  }

  #[test]
  fn counts_sum_to_total() {
    let records = vec![
      record(InstitutionType::Rtq, "a", 10, 0),
      record(InstitutionType::Ponpes, "b", 100, 0),
      record(InstitutionType::Rtq, "c", 20, 0),
      record(InstitutionType::Paudqu, "d", 5, 0),
    ];
    let stats = DashboardStats::compute(&records);
    let sum: usize = stats.by_type.iter().map(|t| t.count).sum();
    assert_eq!(sum, stats.total);
    assert_eq!(stats.students, 135);
    assert_eq!(stats.teachers, 10 / 10 + 100 / 10 + 20 / 10 + 5 / 10);
    assert_eq!(stats.count(InstitutionType::Rtq), 2);
    assert_eq!(stats.max_count(), 2);
  }

  #[test]
  fn type_order_ignores_insertion_order() {
    let records = vec![
      record(InstitutionType::Paudqu, "a", 0, 0),
      record(InstitutionType::Tpq, "b", 0, 0),
    ];
    let kinds: Vec<_> = DashboardStats::compute(&records)
      .by_type
      .iter()
      .map(|t| t.kind)
      .collect();
    assert_eq!(kinds, InstitutionType::all().collect::<Vec<_>>());
  }

  #[test]
  fn missing_bos_year_contributes_zero() {
    let records = vec![
      record(InstitutionType::Ponpes, "a", 0, 3_000_000),
      record(InstitutionType::Mdt, "b", 0, 0),
    ];
    let stats = DashboardStats::compute(&records);
    assert_eq!(stats.growth[0].bos, 3.0);
    assert_eq!(stats.growth[1].bos, 0.0);
  }

  #[test]
  fn huge_bos_amounts_saturate_instead_of_overflowing() {
    let records = vec![
      record(InstitutionType::Tpq, "a", 0, u64::MAX),
      record(InstitutionType::Tpq, "b", 0, u64::MAX),
    ];
    let stats = DashboardStats::compute(&records);
    assert_eq!(stats.growth[0].bos, u64::MAX as f64 / MILLION);
  }

  #[test]
  fn bos_outside_the_year_window_is_ignored() {
    let mut r = record(InstitutionType::Ponpes, "a", 0, 2_000_000);
    let bos = &mut r.as_ponpes_mut().unwrap().financial_aid.bos;
    bos.set("2020", 9_000_000);
    bos.set("2030", 9_000_000);

    let stats = DashboardStats::compute(&[r]);
    let years: Vec<_> = stats.growth.iter().map(|y| y.year).collect();
    assert_eq!(years, YEARS);
    assert_eq!(stats.growth[0].bos, 2.0);
    assert!(stats.growth[1..].iter().all(|y| y.bos == 0.0));
  }

  #[test]
  fn labels_come_from_metadata() {
    let stats = DashboardStats::compute(&[]);
    assert_eq!(stats.by_type[0].label, "Pondok Pesantren");
    assert_eq!(stats.by_type[1].label, "TPQ / TPA");
  }
}
