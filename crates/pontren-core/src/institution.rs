//! Institution records: the tagged union at the heart of the registry.
//!
//! A record is either a boarding school ([`PonpesInstitution`]) or one of the
//! four community education forms, which all share
//! [`CommunityInstitution`]. The JSON form is a single object tagged by
//! `"type"` with camelCase field names.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{
  Error, Result,
  aid::{AidProgram, CommunityAid, PonpesAid, YearData},
};

// ─── Type tag ────────────────────────────────────────────────────────────────

/// The five kinds of institution, in display order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum InstitutionType {
  Ponpes,
  Tpq,
  Mdt,
  Rtq,
  Paudqu,
}

impl InstitutionType {
  pub fn is_ponpes(self) -> bool { matches!(self, Self::Ponpes) }

  /// All types in declaration order.
  pub fn all() -> impl Iterator<Item = Self> { Self::iter() }
}

// ─── Shared sections ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicProfile {
  pub name:        String,
  pub tagline:     String,
  pub description: String,
  pub address:     String,
  pub phone:       String,
  pub email:       String,
  pub website:     String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legality {
  pub leader:           String,
  pub license_number:   String,
  pub foundation:       String,
  /// Reference to the foundation's legal decree.
  pub legality_details: String,
  pub social_media:     String,
  pub gmaps_url:        String,
}

/// Headline figures. The totals are entered directly and are not derived
/// from the per-stage counts, so the two may disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
  pub year_founded:   String,
  pub total_students: u32,
  pub total_teachers: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extracurriculars {
  pub sports: String,
  pub arts:   String,
  #[serde(default)]
  pub others: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionMisi {
  pub vision:         String,
  pub mision:         String,
  pub program:        String,
  #[serde(default)]
  pub yearly_program: String,
  #[serde(default)]
  pub calendar:       String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Documentation {
  pub google_drive_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements {
  pub education: String,
  pub sports:    String,
  pub arts:      String,
}

/// BPJS enrollment counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bpjs {
  pub teacher_health: u32,
  pub teacher_work:   u32,
  pub staff_health:   u32,
  pub staff_work:     u32,
}

/// Fields every record carries regardless of type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseInstitution {
  pub id:               String,
  pub basic:            BasicProfile,
  pub legality:         Legality,
  pub stats:            Stats,
  pub extracurriculars: Extracurriculars,
  pub vision_misi:      VisionMisi,
  pub documentation:    Documentation,
  pub facilities:       Vec<String>,
  pub achievements:     Achievements,
}

impl BaseInstitution {
  pub fn with_id(id: impl Into<String>) -> Self {
    Self { id: id.into(), ..Self::default() }
  }
}

// ─── Boarding school ─────────────────────────────────────────────────────────

/// Curriculum track of a boarding-school stage. Unset serializes as `""`.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LevelKind {
  #[default]
  #[serde(rename = "")]
  #[strum(serialize = "")]
  Unset,
  Pkpps,
  Madrasah,
  Diknas,
}

impl LevelKind {
  /// The selectable options, without `Unset`.
  pub const OPTIONS: [LevelKind; 3] =
    [LevelKind::Pkpps, LevelKind::Madrasah, LevelKind::Diknas];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentCount {
  pub male:   u32,
  pub female: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personnel {
  pub teachers: u32,
  pub staff:    u32,
}

/// Enrollment and staffing for one boarding-school stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationLevelDetail {
  #[serde(rename = "type")]
  pub kind:            LevelKind,
  pub students:        StudentCount,
  pub personnel:       Personnel,
  pub bpjs:            Bpjs,
  pub un_participants: YearData,
  pub un_graduates:    YearData,
}

/// The three boarding-school stages.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
  Ula,
  Wustha,
  Ulya,
}

impl Stage {
  /// The general-education equivalent shown next to the stage name.
  pub fn equivalent(self) -> &'static str {
    match self {
      Self::Ula => "MI/SD",
      Self::Wustha => "MTS/SMP",
      Self::Ulya => "MA/SMA",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Levels {
  pub ula:    EducationLevelDetail,
  pub wustha: EducationLevelDetail,
  pub ulya:   EducationLevelDetail,
}

impl Levels {
  pub fn stage(&self, stage: Stage) -> &EducationLevelDetail {
    match stage {
      Stage::Ula => &self.ula,
      Stage::Wustha => &self.wustha,
      Stage::Ulya => &self.ulya,
    }
  }

  pub fn stage_mut(&mut self, stage: Stage) -> &mut EducationLevelDetail {
    match stage {
      Stage::Ula => &mut self.ula,
      Stage::Wustha => &mut self.wustha,
      Stage::Ulya => &mut self.ulya,
    }
  }
}

/// Room counters for boarding-school buildings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingFloors {
  pub office:      u32,
  pub mosque:      u32,
  pub dorm_male:   u32,
  pub dorm_female: u32,
  pub classroom:   u32,
  pub library:     u32,
  pub hall:        u32,
  pub kitchen:     u32,
}

/// A boarding school (pondok pesantren).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PonpesInstitution {
  #[serde(flatten)]
  pub base:                  BaseInstitution,
  pub financial_aid:         PonpesAid,
  pub levels:                Levels,
  pub university_acceptance: YearData,
  pub university_names:      String,
  pub kitab_kuning:          String,
  pub building_floors:       BuildingFloors,
}

// ─── Community education forms ───────────────────────────────────────────────

/// Flat enrollment counters used by the community forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentEducationLevels {
  pub male_sd:    u32,
  pub female_sd:  u32,
  pub male_smp:   u32,
  pub female_smp: u32,
  pub male_sma:   u32,
  pub female_sma: u32,
  pub teachers:   u32,
  pub staff:      u32,
}

/// A TPQ, MDT, RTQ or PAUDQU record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityInstitution {
  #[serde(flatten)]
  pub base:                     BaseInstitution,
  pub financial_aid:            CommunityAid,
  pub student_education_levels: StudentEducationLevels,
  pub munaqasyah_participants:  YearData,
  pub munaqasyah_graduates:     YearData,
  pub bpjs:                     Bpjs,
  pub subjects:                 String,
  pub learning_books:           String,
  pub media:                    String,
}

// ─── Institution ─────────────────────────────────────────────────────────────

/// Top-level keys only a boarding-school record may carry.
pub const PONPES_FIELDS: [&str; 5] = [
  "levels",
  "universityAcceptance",
  "universityNames",
  "kitabKuning",
  "buildingFloors",
];

/// Top-level keys only a community record may carry.
pub const COMMUNITY_FIELDS: [&str; 7] = [
  "studentEducationLevels",
  "munaqasyahParticipants",
  "munaqasyahGraduates",
  "bpjs",
  "subjects",
  "learningBooks",
  "media",
];

/// `financialAid` keys only a boarding-school record may carry.
pub const PONPES_AID_FIELDS: [&str; 3] = ["pip", "inkubasi", "bop"];

/// An institution record. The variant is the record's type; the shape of the
/// type-specific sections follows from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Institution {
  #[serde(rename = "PONPES")]
  Ponpes(PonpesInstitution),
  #[serde(rename = "TPQ")]
  Tpq(CommunityInstitution),
  #[serde(rename = "MDT")]
  Mdt(CommunityInstitution),
  #[serde(rename = "RTQ")]
  Rtq(CommunityInstitution),
  #[serde(rename = "PAUDQU")]
  Paudqu(CommunityInstitution),
}

impl Institution {
  /// A fully-populated empty record of type `kind`: zero counters, empty
  /// text, empty year maps.
  pub fn empty(kind: InstitutionType, id: impl Into<String>) -> Self {
    let base = BaseInstitution::with_id(id);
    let community = || CommunityInstitution { base: base.clone(), ..Default::default() };
    match kind {
      InstitutionType::Ponpes => {
        Self::Ponpes(PonpesInstitution { base: base.clone(), ..Default::default() })
      }
      InstitutionType::Tpq => Self::Tpq(community()),
      InstitutionType::Mdt => Self::Mdt(community()),
      InstitutionType::Rtq => Self::Rtq(community()),
      InstitutionType::Paudqu => Self::Paudqu(community()),
    }
  }

  /// Decode a record from JSON, rejecting records whose field set does not
  /// match their declared type.
  pub fn from_json(value: Value) -> Result<Self> {
    let Some(obj) = value.as_object() else {
      return Ok(serde_json::from_value(value)?);
    };
    let Some(tag) = obj.get("type").and_then(Value::as_str) else {
      return Ok(serde_json::from_value(value)?);
    };
    let kind: InstitutionType =
      tag.parse().map_err(|_| Error::UnknownType(tag.to_owned()))?;

    let mismatch = |field: &str| Error::VariantMismatch {
      kind,
      field: field.to_owned(),
    };

    if kind.is_ponpes() {
      if let Some(field) = COMMUNITY_FIELDS.iter().find(|f| obj.contains_key(**f)) {
        return Err(mismatch(field));
      }
    } else {
      if let Some(field) = PONPES_FIELDS.iter().find(|f| obj.contains_key(**f)) {
        return Err(mismatch(field));
      }
      let aid = obj.get("financialAid").and_then(Value::as_object);
      if let Some(aid) = aid
        && let Some(key) = PONPES_AID_FIELDS.iter().find(|k| aid.contains_key(**k))
      {
        return Err(mismatch(&format!("financialAid.{key}")));
      }
    }

    Ok(serde_json::from_value(value)?)
  }

  pub fn kind(&self) -> InstitutionType {
    match self {
      Self::Ponpes(_) => InstitutionType::Ponpes,
      Self::Tpq(_) => InstitutionType::Tpq,
      Self::Mdt(_) => InstitutionType::Mdt,
      Self::Rtq(_) => InstitutionType::Rtq,
      Self::Paudqu(_) => InstitutionType::Paudqu,
    }
  }

  pub fn base(&self) -> &BaseInstitution {
    match self {
      Self::Ponpes(p) => &p.base,
      Self::Tpq(c) | Self::Mdt(c) | Self::Rtq(c) | Self::Paudqu(c) => &c.base,
    }
  }

  pub fn base_mut(&mut self) -> &mut BaseInstitution {
    match self {
      Self::Ponpes(p) => &mut p.base,
      Self::Tpq(c) | Self::Mdt(c) | Self::Rtq(c) | Self::Paudqu(c) => &mut c.base,
    }
  }

  pub fn id(&self) -> &str { &self.base().id }

  pub fn name(&self) -> &str { &self.base().basic.name }

  pub fn stats(&self) -> &Stats { &self.base().stats }

  /// The BOS (school operational aid) amounts, present on every type.
  pub fn bos(&self) -> &YearData {
    match self {
      Self::Ponpes(p) => &p.financial_aid.bos,
      Self::Tpq(c) | Self::Mdt(c) | Self::Rtq(c) | Self::Paudqu(c) => {
        &c.financial_aid.bos
      }
    }
  }

  /// Amounts for `program`; `None` when this type does not receive it.
  pub fn aid(&self, program: AidProgram) -> Option<&YearData> {
    match self {
      Self::Ponpes(p) => Some(p.financial_aid.program(program)),
      Self::Tpq(c) | Self::Mdt(c) | Self::Rtq(c) | Self::Paudqu(c) => {
        c.financial_aid.program(program)
      }
    }
  }

  pub fn aid_mut(&mut self, program: AidProgram) -> Option<&mut YearData> {
    match self {
      Self::Ponpes(p) => Some(p.financial_aid.program_mut(program)),
      Self::Tpq(c) | Self::Mdt(c) | Self::Rtq(c) | Self::Paudqu(c) => {
        c.financial_aid.program_mut(program)
      }
    }
  }

  /// The aid programs this type tracks, in form order.
  pub fn programs(&self) -> &'static [AidProgram] {
    match self {
      Self::Ponpes(_) => &PonpesAid::PROGRAMS,
      _ => &CommunityAid::PROGRAMS,
    }
  }

  pub fn as_ponpes(&self) -> Option<&PonpesInstitution> {
    match self {
      Self::Ponpes(p) => Some(p),
      _ => None,
    }
  }

  pub fn as_ponpes_mut(&mut self) -> Option<&mut PonpesInstitution> {
    match self {
      Self::Ponpes(p) => Some(p),
      _ => None,
    }
  }

  pub fn as_community(&self) -> Option<&CommunityInstitution> {
    match self {
      Self::Ponpes(_) => None,
      Self::Tpq(c) | Self::Mdt(c) | Self::Rtq(c) | Self::Paudqu(c) => Some(c),
    }
  }

  pub fn as_community_mut(&mut self) -> Option<&mut CommunityInstitution> {
    match self {
      Self::Ponpes(_) => None,
      Self::Tpq(c) | Self::Mdt(c) | Self::Rtq(c) | Self::Paudqu(c) => Some(c),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn type_tags_serialize_uppercase() {
    let tags: Vec<String> = InstitutionType::all().map(|t| t.to_string()).collect();
    assert_eq!(tags, ["PONPES", "TPQ", "MDT", "RTQ", "PAUDQU"]);
    assert_eq!(
      serde_json::to_value(InstitutionType::Paudqu).unwrap(),
      json!("PAUDQU")
    );
  }

  #[test]
  fn empty_ponpes_has_all_stages_and_no_community_fields() {
    let record = Institution::empty(InstitutionType::Ponpes, "x");
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["type"], "PONPES");
    for stage in ["ula", "wustha", "ulya"] {
      assert_eq!(value["levels"][stage]["type"], "");
      assert_eq!(value["levels"][stage]["students"]["male"], 0);
    }
    assert!(value.get("studentEducationLevels").is_none());
    assert!(value["financialAid"].get("pip").is_some());
  }

  #[test]
  fn empty_community_has_flat_levels_and_no_stages() {
    let record = Institution::empty(InstitutionType::Tpq, "x");
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["type"], "TPQ");
    assert_eq!(value["studentEducationLevels"]["maleSd"], 0);
    assert!(value.get("levels").is_none());
    assert!(value["financialAid"].get("pip").is_none());
  }

  #[test]
  fn json_round_trip_keeps_variant() {
    let record = Institution::empty(InstitutionType::Rtq, "abc");
    let value = serde_json::to_value(&record).unwrap();
    let back = Institution::from_json(value).unwrap();
    assert_eq!(back, record);
    assert_eq!(back.kind(), InstitutionType::Rtq);
  }

  #[test]
  fn from_json_rejects_foreign_top_level_field() {
    let mut value =
      serde_json::to_value(Institution::empty(InstitutionType::Mdt, "a")).unwrap();
    value["kitabKuning"] = json!("Jurumiyah");
    let err = Institution::from_json(value).unwrap_err();
    assert!(
      matches!(err, Error::VariantMismatch { kind: InstitutionType::Mdt, ref field } if field == "kitabKuning")
    );
  }

  #[test]
  fn from_json_rejects_ponpes_aid_on_community_record() {
    let mut value =
      serde_json::to_value(Institution::empty(InstitutionType::Tpq, "a")).unwrap();
    value["financialAid"]["bop"] = json!({});
    let err = Institution::from_json(value).unwrap_err();
    assert!(matches!(err, Error::VariantMismatch { ref field, .. } if field == "financialAid.bop"));
  }

  #[test]
  fn from_json_rejects_missing_variant_section() {
    let mut value =
      serde_json::to_value(Institution::empty(InstitutionType::Ponpes, "a")).unwrap();
    value.as_object_mut().unwrap().remove("levels");
    assert!(matches!(
      Institution::from_json(value),
      Err(Error::Serialization(_))
    ));
  }

  #[test]
  fn from_json_rejects_unknown_type() {
    let value = json!({ "type": "SMA", "id": "1" });
    assert!(matches!(
      Institution::from_json(value),
      Err(Error::UnknownType(ref t)) if t == "SMA"
    ));
  }

  #[test]
  fn level_kind_unset_is_empty_string() {
    assert_eq!(serde_json::to_value(LevelKind::Unset).unwrap(), json!(""));
    assert_eq!("".parse::<LevelKind>().unwrap(), LevelKind::Unset);
    assert_eq!("diknas".parse::<LevelKind>().unwrap(), LevelKind::Diknas);
  }
}
