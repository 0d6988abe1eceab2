//! Year-keyed amounts and the financial-aid programs they are tracked for.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The fixed reporting window, oldest first. Aggregation and the form only
/// ever read these keys.
pub const YEARS: [&str; 5] = ["2021", "2022", "2023", "2024", "2025"];

/// Base currency units per million, the unit the dashboard charts use.
pub const MILLION: f64 = 1_000_000.0;

// ─── YearData ────────────────────────────────────────────────────────────────

/// A mapping from year to an amount (currency base units or head counts).
///
/// Keys outside [`YEARS`] may be written; they are kept but never aggregated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearData(BTreeMap<String, u64>);

impl YearData {
  pub fn new() -> Self { Self::default() }

  /// The amount recorded for `year`, 0 when absent.
  pub fn get(&self, year: &str) -> u64 {
    self.0.get(year).copied().unwrap_or(0)
  }

  pub fn set(&mut self, year: impl Into<String>, amount: u64) {
    self.0.insert(year.into(), amount);
  }

  /// Amounts for the fixed window in chronological order.
  pub fn window(&self) -> [u64; YEARS.len()] { YEARS.map(|y| self.get(y)) }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
    self.0.iter().map(|(k, v)| (k.as_str(), *v))
  }
}

impl<K: Into<String>> FromIterator<(K, u64)> for YearData {
  fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }
}

// ─── Programs ────────────────────────────────────────────────────────────────

/// A government financial-aid program. The serialized name is the key used
/// under `financialAid` in a record.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum AidProgram {
  Bos,
  Incentive,
  Pip,
  Inkubasi,
  Bop,
  Other,
}

impl AidProgram {
  /// Section heading shown on the finance tab.
  pub fn label(self) -> &'static str {
    match self {
      Self::Bos => "Bantuan Operasional Sekolah (BOS)",
      Self::Incentive => "Bantuan Insentif",
      Self::Pip => "Bantuan PIP",
      Self::Inkubasi => "Bantuan Inkubasi",
      Self::Bop => "Bantuan BOP",
      Self::Other => "Bantuan Lainnya",
    }
  }

  pub fn key(self) -> &'static str { self.into() }
}

/// Financial aid tracked for a boarding school: every program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PonpesAid {
  pub bos:       YearData,
  pub incentive: YearData,
  pub pip:       YearData,
  pub inkubasi:  YearData,
  pub bop:       YearData,
  pub other:     YearData,
}

impl PonpesAid {
  pub const PROGRAMS: [AidProgram; 6] = [
    AidProgram::Bos,
    AidProgram::Incentive,
    AidProgram::Pip,
    AidProgram::Inkubasi,
    AidProgram::Bop,
    AidProgram::Other,
  ];

  pub fn program(&self, program: AidProgram) -> &YearData {
    match program {
      AidProgram::Bos => &self.bos,
      AidProgram::Incentive => &self.incentive,
      AidProgram::Pip => &self.pip,
      AidProgram::Inkubasi => &self.inkubasi,
      AidProgram::Bop => &self.bop,
      AidProgram::Other => &self.other,
    }
  }

  pub fn program_mut(&mut self, program: AidProgram) -> &mut YearData {
    match program {
      AidProgram::Bos => &mut self.bos,
      AidProgram::Incentive => &mut self.incentive,
      AidProgram::Pip => &mut self.pip,
      AidProgram::Inkubasi => &mut self.inkubasi,
      AidProgram::Bop => &mut self.bop,
      AidProgram::Other => &mut self.other,
    }
  }
}

/// Financial aid tracked for the community education forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityAid {
  pub bos:       YearData,
  pub incentive: YearData,
  pub other:     YearData,
}

impl CommunityAid {
  pub const PROGRAMS: [AidProgram; 3] =
    [AidProgram::Bos, AidProgram::Incentive, AidProgram::Other];

  /// `None` for programs community institutions do not receive.
  pub fn program(&self, program: AidProgram) -> Option<&YearData> {
    match program {
      AidProgram::Bos => Some(&self.bos),
      AidProgram::Incentive => Some(&self.incentive),
      AidProgram::Other => Some(&self.other),
      AidProgram::Pip | AidProgram::Inkubasi | AidProgram::Bop => None,
    }
  }

  pub fn program_mut(&mut self, program: AidProgram) -> Option<&mut YearData> {
    match program {
      AidProgram::Bos => Some(&mut self.bos),
      AidProgram::Incentive => Some(&mut self.incentive),
      AidProgram::Other => Some(&mut self.other),
      AidProgram::Pip | AidProgram::Inkubasi | AidProgram::Bop => None,
    }
  }
}
