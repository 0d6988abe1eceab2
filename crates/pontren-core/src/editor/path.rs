//! Validated field paths.
//!
//! A [`FieldPath`] names one editable leaf of an [`Institution`]. Paths are
//! parsed from the dotted form used in the record's JSON shape
//! (`levels.ula.students.male`, `financialAid.bos.2021`, …) into a closed
//! enum, so a typo fails with [`Error::InvalidPath`] instead of creating a
//! stray field.

use std::{fmt, str::FromStr};

use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::{
  Error, Result,
  aid::AidProgram,
  institution::{
    Achievements, BasicProfile, Bpjs, BuildingFloors, EducationLevelDetail,
    Extracurriculars, Institution, InstitutionType, LevelKind, Legality, Stage,
    Stats, StudentEducationLevels, VisionMisi,
  },
};

// ─── Values ──────────────────────────────────────────────────────────────────

/// The shape of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  /// Free text.
  Text,
  /// A head or room count (`u32`).
  Count,
  /// A year-keyed amount (`u64`).
  Amount,
  /// A boarding-school stage track.
  LevelKind,
  /// A list of labels.
  List,
}

impl fmt::Display for FieldKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Text => "text",
      Self::Count => "count",
      Self::Amount => "amount",
      Self::LevelKind => "level type",
      Self::List => "list",
    })
  }
}

/// A value written to or read from a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
  Text(String),
  Number(u64),
  Level(LevelKind),
  List(Vec<String>),
}

impl FieldValue {
  /// Parse raw form input for a field of `kind`.
  ///
  /// Numbers accept surrounding whitespace and treat empty input as 0.
  /// Lists are comma separated; blank entries are dropped.
  pub fn parse(kind: FieldKind, raw: &str) -> Result<Self, String> {
    match kind {
      FieldKind::Text => Ok(Self::Text(raw.to_owned())),
      FieldKind::Count | FieldKind::Amount => {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
          return Ok(Self::Number(0));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
          return Err(format!("{trimmed:?} is not a whole number"));
        }
        trimmed
          .parse()
          .map(Self::Number)
          .map_err(|_| format!("{trimmed:?} is too large"))
      }
      FieldKind::LevelKind => raw
        .trim()
        .to_lowercase()
        .parse()
        .map(Self::Level)
        .map_err(|_| format!("{raw:?} is not one of pkpps, madrasah, diknas")),
      FieldKind::List => Ok(Self::List(
        raw
          .split(',')
          .map(str::trim)
          .filter(|s| !s.is_empty())
          .map(str::to_owned)
          .collect(),
      )),
    }
  }

  fn describe(&self) -> &'static str {
    match self {
      Self::Text(_) => "text",
      Self::Number(_) => "number",
      Self::Level(_) => "level type",
      Self::List(_) => "list",
    }
  }
}

impl fmt::Display for FieldValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Text(s) => f.write_str(s),
      Self::Number(n) => write!(f, "{n}"),
      Self::Level(k) => write!(f, "{k}"),
      Self::List(items) => f.write_str(&items.join(", ")),
    }
  }
}

impl From<&str> for FieldValue {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

impl From<String> for FieldValue {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<u64> for FieldValue {
  fn from(n: u64) -> Self { Self::Number(n) }
}

impl From<u32> for FieldValue {
  fn from(n: u32) -> Self { Self::Number(n.into()) }
}

impl From<LevelKind> for FieldValue {
  fn from(k: LevelKind) -> Self { Self::Level(k) }
}

impl From<Vec<String>> for FieldValue {
  fn from(items: Vec<String>) -> Self { Self::List(items) }
}

// ─── Field groups ────────────────────────────────────────────────────────────

/// Declares a group of same-typed fields of one record section, with
/// accessors into that section.
macro_rules! field_group {
  (
    $(#[$meta:meta])*
    $name:ident in $target:ty => $out:ty {
      $($variant:ident => $field:ident),+ $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr,
    )]
    #[strum(serialize_all = "camelCase")]
    pub enum $name {
      $($variant),+
    }

    impl $name {
      pub fn get(self, target: &$target) -> &$out {
        match self {
          $(Self::$variant => &target.$field),+
        }
      }

      pub fn get_mut(self, target: &mut $target) -> &mut $out {
        match self {
          $(Self::$variant => &mut target.$field),+
        }
      }

      /// The field's key in the record's JSON shape.
      pub fn key(self) -> &'static str { self.into() }
    }
  };
}

field_group! {
  BasicField in BasicProfile => String {
    Name => name,
    Tagline => tagline,
    Description => description,
    Address => address,
    Phone => phone,
    Email => email,
    Website => website,
  }
}

field_group! {
  LegalityField in Legality => String {
    Leader => leader,
    LicenseNumber => license_number,
    Foundation => foundation,
    LegalityDetails => legality_details,
    SocialMedia => social_media,
    GmapsUrl => gmaps_url,
  }
}

field_group! {
  ExtracurricularField in Extracurriculars => String {
    Sports => sports,
    Arts => arts,
    Others => others,
  }
}

field_group! {
  VisionField in VisionMisi => String {
    Vision => vision,
    Mision => mision,
    Program => program,
    YearlyProgram => yearly_program,
    Calendar => calendar,
  }
}

field_group! {
  AchievementField in Achievements => String {
    Education => education,
    Sports => sports,
    Arts => arts,
  }
}

field_group! {
  BpjsField in Bpjs => u32 {
    TeacherHealth => teacher_health,
    TeacherWork => teacher_work,
    StaffHealth => staff_health,
    StaffWork => staff_work,
  }
}

field_group! {
  /// Boarding-school building rooms.
  Room in BuildingFloors => u32 {
    Office => office,
    Mosque => mosque,
    DormMale => dorm_male,
    DormFemale => dorm_female,
    Classroom => classroom,
    Library => library,
    Hall => hall,
    Kitchen => kitchen,
  }
}

field_group! {
  /// Flat enrollment counters of the community forms.
  EducationField in StudentEducationLevels => u32 {
    MaleSd => male_sd,
    FemaleSd => female_sd,
    MaleSmp => male_smp,
    FemaleSmp => female_smp,
    MaleSma => male_sma,
    FemaleSma => female_sma,
    Teachers => teachers,
    Staff => staff,
  }
}

/// `stats.*` mixes a text field with two counters, so it is spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum StatsField {
  YearFounded,
  TotalStudents,
  TotalTeachers,
}

impl StatsField {
  pub fn key(self) -> &'static str { self.into() }

  fn kind(self) -> FieldKind {
    match self {
      Self::YearFounded => FieldKind::Text,
      Self::TotalStudents | Self::TotalTeachers => FieldKind::Count,
    }
  }

  fn read(self, stats: &Stats) -> FieldValue {
    match self {
      Self::YearFounded => FieldValue::Text(stats.year_founded.clone()),
      Self::TotalStudents => stats.total_students.into(),
      Self::TotalTeachers => stats.total_teachers.into(),
    }
  }
}

/// A leaf inside one boarding-school stage (`levels.<stage>.*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelField {
  Kind,
  StudentsMale,
  StudentsFemale,
  Teachers,
  Staff,
  Bpjs(BpjsField),
  UnParticipants(String),
  UnGraduates(String),
}

impl LevelField {
  fn parse(segments: &[&str]) -> Option<Self> {
    Some(match segments {
      ["type"] => Self::Kind,
      ["students", "male"] => Self::StudentsMale,
      ["students", "female"] => Self::StudentsFemale,
      ["personnel", "teachers"] => Self::Teachers,
      ["personnel", "staff"] => Self::Staff,
      ["bpjs", field] => Self::Bpjs(field.parse().ok()?),
      ["unParticipants", year] => Self::UnParticipants(year_key(year)?),
      ["unGraduates", year] => Self::UnGraduates(year_key(year)?),
      _ => return None,
    })
  }

  fn kind(&self) -> FieldKind {
    match self {
      Self::Kind => FieldKind::LevelKind,
      Self::UnParticipants(_) | Self::UnGraduates(_) => FieldKind::Amount,
      _ => FieldKind::Count,
    }
  }

  fn count_mut<'a>(&self, level: &'a mut EducationLevelDetail) -> Option<&'a mut u32> {
    Some(match self {
      Self::StudentsMale => &mut level.students.male,
      Self::StudentsFemale => &mut level.students.female,
      Self::Teachers => &mut level.personnel.teachers,
      Self::Staff => &mut level.personnel.staff,
      Self::Bpjs(f) => f.get_mut(&mut level.bpjs),
      Self::Kind | Self::UnParticipants(_) | Self::UnGraduates(_) => return None,
    })
  }

  fn read(&self, level: &EducationLevelDetail) -> FieldValue {
    match self {
      Self::Kind => FieldValue::Level(level.kind),
      Self::StudentsMale => level.students.male.into(),
      Self::StudentsFemale => level.students.female.into(),
      Self::Teachers => level.personnel.teachers.into(),
      Self::Staff => level.personnel.staff.into(),
      Self::Bpjs(f) => (*f.get(&level.bpjs)).into(),
      Self::UnParticipants(year) => level.un_participants.get(year).into(),
      Self::UnGraduates(year) => level.un_graduates.get(year).into(),
    }
  }

  /// Fails without touching `level` when `value` is not this field's kind.
  fn write(&self, level: &mut EducationLevelDetail, value: Converted) -> Result<()> {
    match (self, value) {
      (Self::Kind, Converted::Level(kind)) => level.kind = kind,
      (Self::UnParticipants(year), Converted::Amount(n)) => {
        level.un_participants.set(year.clone(), n)
      }
      (Self::UnGraduates(year), Converted::Amount(n)) => {
        level.un_graduates.set(year.clone(), n)
      }
      (field, Converted::Count(n)) => {
        let slot = field
          .count_mut(level)
          .ok_or_else(|| Error::InvalidPath(field.to_string()))?;
        *slot = n;
      }
      (field, _) => return Err(Error::InvalidPath(field.to_string())),
    }
    Ok(())
  }
}

impl fmt::Display for LevelField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Kind => f.write_str("type"),
      Self::StudentsMale => f.write_str("students.male"),
      Self::StudentsFemale => f.write_str("students.female"),
      Self::Teachers => f.write_str("personnel.teachers"),
      Self::Staff => f.write_str("personnel.staff"),
      Self::Bpjs(b) => write!(f, "bpjs.{}", b.key()),
      Self::UnParticipants(y) => write!(f, "unParticipants.{y}"),
      Self::UnGraduates(y) => write!(f, "unGraduates.{y}"),
    }
  }
}

fn year_key(segment: &str) -> Option<String> {
  (!segment.is_empty()).then(|| segment.to_owned())
}

// ─── FieldPath ───────────────────────────────────────────────────────────────

/// One editable leaf of an institution record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
  // ── Every type ───────────────────────────────────────────────────────────
  Basic(BasicField),
  Legality(LegalityField),
  Stats(StatsField),
  Extracurricular(ExtracurricularField),
  VisionMisi(VisionField),
  DriveLink,
  Facilities,
  Achievement(AchievementField),
  Aid { program: AidProgram, year: String },

  // ── Boarding schools ─────────────────────────────────────────────────────
  Level { stage: Stage, field: LevelField },
  UniversityAcceptance(String),
  UniversityNames,
  KitabKuning,
  BuildingFloor(Room),

  // ── Community forms ──────────────────────────────────────────────────────
  Education(EducationField),
  MunaqasyahParticipants(String),
  MunaqasyahGraduates(String),
  Bpjs(BpjsField),
  Subjects,
  LearningBooks,
  Media,
}

/// A value already checked against the kind of the field it targets.
enum Converted {
  Text(String),
  Count(u32),
  Amount(u64),
  Level(LevelKind),
  List(Vec<String>),
}

impl FieldPath {
  pub fn aid(program: AidProgram, year: &str) -> Self {
    Self::Aid { program, year: year.to_owned() }
  }

  pub fn level(stage: Stage, field: LevelField) -> Self {
    Self::Level { stage, field }
  }

  pub fn kind(&self) -> FieldKind {
    match self {
      Self::Stats(f) => f.kind(),
      Self::Facilities => FieldKind::List,
      Self::Aid { .. }
      | Self::UniversityAcceptance(_)
      | Self::MunaqasyahParticipants(_)
      | Self::MunaqasyahGraduates(_) => FieldKind::Amount,
      Self::Level { field, .. } => field.kind(),
      Self::BuildingFloor(_) | Self::Education(_) | Self::Bpjs(_) => FieldKind::Count,
      Self::Basic(_)
      | Self::Legality(_)
      | Self::Extracurricular(_)
      | Self::VisionMisi(_)
      | Self::DriveLink
      | Self::Achievement(_)
      | Self::UniversityNames
      | Self::KitabKuning
      | Self::Subjects
      | Self::LearningBooks
      | Self::Media => FieldKind::Text,
    }
  }

  /// Whether records of type `kind` have this field.
  pub fn applies_to(&self, kind: InstitutionType) -> bool {
    match self {
      Self::Level { .. }
      | Self::UniversityAcceptance(_)
      | Self::UniversityNames
      | Self::KitabKuning
      | Self::BuildingFloor(_) => kind.is_ponpes(),
      Self::Education(_)
      | Self::MunaqasyahParticipants(_)
      | Self::MunaqasyahGraduates(_)
      | Self::Bpjs(_)
      | Self::Subjects
      | Self::LearningBooks
      | Self::Media => !kind.is_ponpes(),
      Self::Aid { program, .. } => match program {
        AidProgram::Pip | AidProgram::Inkubasi | AidProgram::Bop => kind.is_ponpes(),
        AidProgram::Bos | AidProgram::Incentive | AidProgram::Other => true,
      },
      Self::Basic(_)
      | Self::Legality(_)
      | Self::Stats(_)
      | Self::Extracurricular(_)
      | Self::VisionMisi(_)
      | Self::DriveLink
      | Self::Facilities
      | Self::Achievement(_) => true,
    }
  }

  fn invalid(&self) -> Error { Error::InvalidPath(self.to_string()) }

  /// The current value of this field in `record`.
  pub fn read(&self, record: &Institution) -> Result<FieldValue> {
    if !self.applies_to(record.kind()) {
      return Err(self.invalid());
    }
    let base = record.base();
    let ponpes = || record.as_ponpes().ok_or_else(|| self.invalid());
    let community = || record.as_community().ok_or_else(|| self.invalid());

    Ok(match self {
      Self::Basic(f) => FieldValue::Text(f.get(&base.basic).clone()),
      Self::Legality(f) => FieldValue::Text(f.get(&base.legality).clone()),
      Self::Stats(f) => f.read(&base.stats),
      Self::Extracurricular(f) => FieldValue::Text(f.get(&base.extracurriculars).clone()),
      Self::VisionMisi(f) => FieldValue::Text(f.get(&base.vision_misi).clone()),
      Self::DriveLink => FieldValue::Text(base.documentation.google_drive_link.clone()),
      Self::Facilities => FieldValue::List(base.facilities.clone()),
      Self::Achievement(f) => FieldValue::Text(f.get(&base.achievements).clone()),
      Self::Aid { program, year } => {
        let data = record.aid(*program).ok_or_else(|| self.invalid())?;
        data.get(year).into()
      }
      Self::Level { stage, field } => field.read(ponpes()?.levels.stage(*stage)),
      Self::UniversityAcceptance(year) => {
        ponpes()?.university_acceptance.get(year).into()
      }
      Self::UniversityNames => FieldValue::Text(ponpes()?.university_names.clone()),
      Self::KitabKuning => FieldValue::Text(ponpes()?.kitab_kuning.clone()),
      Self::BuildingFloor(room) => (*room.get(&ponpes()?.building_floors)).into(),
      Self::Education(f) => (*f.get(&community()?.student_education_levels)).into(),
      Self::MunaqasyahParticipants(year) => {
        community()?.munaqasyah_participants.get(year).into()
      }
      Self::MunaqasyahGraduates(year) => {
        community()?.munaqasyah_graduates.get(year).into()
      }
      Self::Bpjs(f) => (*f.get(&community()?.bpjs)).into(),
      Self::Subjects => FieldValue::Text(community()?.subjects.clone()),
      Self::LearningBooks => FieldValue::Text(community()?.learning_books.clone()),
      Self::Media => FieldValue::Text(community()?.media.clone()),
    })
  }

  /// Check `value` against this field's kind without touching any record.
  fn convert(&self, value: FieldValue) -> Result<Converted> {
    let mismatch = |got: &FieldValue| Error::InvalidValue {
      path:   self.to_string(),
      reason: format!("expected {}, got {}", self.kind(), got.describe()),
    };
    match (self.kind(), value) {
      (FieldKind::Text, FieldValue::Text(s)) => Ok(Converted::Text(s)),
      (FieldKind::Count, FieldValue::Number(n)) => u32::try_from(n)
        .map(Converted::Count)
        .map_err(|_| Error::InvalidValue {
          path:   self.to_string(),
          reason: format!("{n} is too large for a count"),
        }),
      (FieldKind::Amount, FieldValue::Number(n)) => Ok(Converted::Amount(n)),
      (FieldKind::LevelKind, FieldValue::Level(k)) => Ok(Converted::Level(k)),
      (FieldKind::LevelKind, FieldValue::Text(s)) => s
        .parse()
        .map(Converted::Level)
        .map_err(|_| Error::InvalidValue {
          path:   self.to_string(),
          reason: format!("{s:?} is not a level type"),
        }),
      (FieldKind::List, FieldValue::List(items)) => Ok(Converted::List(items)),
      (_, other) => Err(mismatch(&other)),
    }
  }

  /// Set this field in `record` to `value`.
  ///
  /// Fails without modifying `record` when the field does not exist on the
  /// record's type or `value` does not fit the field.
  pub fn write(&self, record: &mut Institution, value: FieldValue) -> Result<()> {
    if !self.applies_to(record.kind()) {
      return Err(self.invalid());
    }
    let value = self.convert(value)?;

    match (self, value) {
      (Self::Basic(f), Converted::Text(s)) => *f.get_mut(&mut record.base_mut().basic) = s,
      (Self::Legality(f), Converted::Text(s)) => {
        *f.get_mut(&mut record.base_mut().legality) = s
      }
      (Self::Stats(StatsField::YearFounded), Converted::Text(s)) => {
        record.base_mut().stats.year_founded = s
      }
      (Self::Stats(StatsField::TotalStudents), Converted::Count(n)) => {
        record.base_mut().stats.total_students = n
      }
      (Self::Stats(StatsField::TotalTeachers), Converted::Count(n)) => {
        record.base_mut().stats.total_teachers = n
      }
      (Self::Extracurricular(f), Converted::Text(s)) => {
        *f.get_mut(&mut record.base_mut().extracurriculars) = s
      }
      (Self::VisionMisi(f), Converted::Text(s)) => {
        *f.get_mut(&mut record.base_mut().vision_misi) = s
      }
      (Self::DriveLink, Converted::Text(s)) => {
        record.base_mut().documentation.google_drive_link = s
      }
      (Self::Facilities, Converted::List(items)) => record.base_mut().facilities = items,
      (Self::Achievement(f), Converted::Text(s)) => {
        *f.get_mut(&mut record.base_mut().achievements) = s
      }
      (Self::Aid { program, year }, Converted::Amount(n)) => {
        let invalid = self.invalid();
        record.aid_mut(*program).ok_or(invalid)?.set(year.clone(), n)
      }
      (Self::Level { stage, field }, value) => {
        let invalid = self.invalid();
        let ponpes = record.as_ponpes_mut().ok_or(invalid)?;
        field
          .write(ponpes.levels.stage_mut(*stage), value)
          .map_err(|_| self.invalid())?
      }
      (Self::UniversityAcceptance(year), Converted::Amount(n)) => {
        let invalid = self.invalid();
        let ponpes = record.as_ponpes_mut().ok_or(invalid)?;
        ponpes.university_acceptance.set(year.clone(), n)
      }
      (Self::UniversityNames, Converted::Text(s)) => {
        let invalid = self.invalid();
        record.as_ponpes_mut().ok_or(invalid)?.university_names = s
      }
      (Self::KitabKuning, Converted::Text(s)) => {
        let invalid = self.invalid();
        record.as_ponpes_mut().ok_or(invalid)?.kitab_kuning = s
      }
      (Self::BuildingFloor(room), Converted::Count(n)) => {
        let invalid = self.invalid();
        *room.get_mut(&mut record.as_ponpes_mut().ok_or(invalid)?.building_floors) = n
      }
      (Self::Education(f), Converted::Count(n)) => {
        let invalid = self.invalid();
        let community = record.as_community_mut().ok_or(invalid)?;
        *f.get_mut(&mut community.student_education_levels) = n
      }
      (Self::MunaqasyahParticipants(year), Converted::Amount(n)) => {
        let invalid = self.invalid();
        let community = record.as_community_mut().ok_or(invalid)?;
        community.munaqasyah_participants.set(year.clone(), n)
      }
      (Self::MunaqasyahGraduates(year), Converted::Amount(n)) => {
        let invalid = self.invalid();
        let community = record.as_community_mut().ok_or(invalid)?;
        community.munaqasyah_graduates.set(year.clone(), n)
      }
      (Self::Bpjs(f), Converted::Count(n)) => {
        let invalid = self.invalid();
        *f.get_mut(&mut record.as_community_mut().ok_or(invalid)?.bpjs) = n
      }
      (Self::Subjects, Converted::Text(s)) => {
        let invalid = self.invalid();
        record.as_community_mut().ok_or(invalid)?.subjects = s
      }
      (Self::LearningBooks, Converted::Text(s)) => {
        let invalid = self.invalid();
        record.as_community_mut().ok_or(invalid)?.learning_books = s
      }
      (Self::Media, Converted::Text(s)) => {
        let invalid = self.invalid();
        record.as_community_mut().ok_or(invalid)?.media = s
      }
      // `convert` only yields the variant matching `self.kind()`.
      _ => return Err(self.invalid()),
    }
    Ok(())
  }
}

impl FromStr for FieldPath {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let invalid = || Error::InvalidPath(s.to_owned());
    let segments: Vec<&str> = s.split('.').collect();

    let path = match segments.as_slice() {
      ["basic", f] => Self::Basic(f.parse().map_err(|_| invalid())?),
      ["legality", f] => Self::Legality(f.parse().map_err(|_| invalid())?),
      ["stats", f] => Self::Stats(f.parse().map_err(|_| invalid())?),
      ["extracurriculars", f] => {
        Self::Extracurricular(f.parse().map_err(|_| invalid())?)
      }
      ["visionMisi", f] => Self::VisionMisi(f.parse().map_err(|_| invalid())?),
      ["documentation", "googleDriveLink"] => Self::DriveLink,
      ["facilities"] => Self::Facilities,
      ["achievements", f] => Self::Achievement(f.parse().map_err(|_| invalid())?),
      ["financialAid", program, year] => Self::Aid {
        program: program.parse().map_err(|_| invalid())?,
        year:    year_key(year).ok_or_else(invalid)?,
      },
      ["levels", stage, rest @ ..] => Self::Level {
        stage: stage.parse().map_err(|_| invalid())?,
        field: LevelField::parse(rest).ok_or_else(invalid)?,
      },
      ["universityAcceptance", year] => {
        Self::UniversityAcceptance(year_key(year).ok_or_else(invalid)?)
      }
      ["universityNames"] => Self::UniversityNames,
      ["kitabKuning"] => Self::KitabKuning,
      ["buildingFloors", room] => Self::BuildingFloor(room.parse().map_err(|_| invalid())?),
      ["studentEducationLevels", f] => Self::Education(f.parse().map_err(|_| invalid())?),
      ["munaqasyahParticipants", year] => {
        Self::MunaqasyahParticipants(year_key(year).ok_or_else(invalid)?)
      }
      ["munaqasyahGraduates", year] => {
        Self::MunaqasyahGraduates(year_key(year).ok_or_else(invalid)?)
      }
      ["bpjs", f] => Self::Bpjs(f.parse().map_err(|_| invalid())?),
      ["subjects"] => Self::Subjects,
      ["learningBooks"] => Self::LearningBooks,
      ["media"] => Self::Media,
      _ => return Err(invalid()),
    };
    Ok(path)
  }
}

impl fmt::Display for FieldPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Basic(b) => write!(f, "basic.{}", b.key()),
      Self::Legality(l) => write!(f, "legality.{}", l.key()),
      Self::Stats(s) => write!(f, "stats.{}", s.key()),
      Self::Extracurricular(e) => write!(f, "extracurriculars.{}", e.key()),
      Self::VisionMisi(v) => write!(f, "visionMisi.{}", v.key()),
      Self::DriveLink => f.write_str("documentation.googleDriveLink"),
      Self::Facilities => f.write_str("facilities"),
      Self::Achievement(a) => write!(f, "achievements.{}", a.key()),
      Self::Aid { program, year } => write!(f, "financialAid.{}.{year}", program.key()),
      Self::Level { stage, field } => write!(f, "levels.{stage}.{field}"),
      Self::UniversityAcceptance(y) => write!(f, "universityAcceptance.{y}"),
      Self::UniversityNames => f.write_str("universityNames"),
      Self::KitabKuning => f.write_str("kitabKuning"),
      Self::BuildingFloor(r) => write!(f, "buildingFloors.{}", r.key()),
      Self::Education(e) => write!(f, "studentEducationLevels.{}", e.key()),
      Self::MunaqasyahParticipants(y) => write!(f, "munaqasyahParticipants.{y}"),
      Self::MunaqasyahGraduates(y) => write!(f, "munaqasyahGraduates.{y}"),
      Self::Bpjs(b) => write!(f, "bpjs.{}", b.key()),
      Self::Subjects => f.write_str("subjects"),
      Self::LearningBooks => f.write_str("learningBooks"),
      Self::Media => f.write_str("media"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_and_displays_nested_paths() {
    for raw in [
      "basic.name",
      "legality.licenseNumber",
      "stats.totalStudents",
      "documentation.googleDriveLink",
      "financialAid.bos.2021",
      "levels.ula.students.male",
      "levels.wustha.type",
      "levels.ulya.bpjs.staffWork",
      "levels.ula.unGraduates.2024",
      "buildingFloors.dormFemale",
      "studentEducationLevels.maleSma",
      "munaqasyahGraduates.2023",
      "facilities",
    ] {
      let path: FieldPath = raw.parse().unwrap();
      assert_eq!(path.to_string(), raw);
    }
  }

  #[test]
  fn rejects_unknown_paths() {
    for raw in [
      "",
      "basic",
      "basic.nmae",
      "levels.tsanawiyah.type",
      "levels.ula.students",
      "financialAid.bsu.2021",
      "financialAid.bos.",
      "bpjs.teacherHealth.extra",
    ] {
      assert!(
        matches!(raw.parse::<FieldPath>(), Err(Error::InvalidPath(ref p)) if p == raw),
        "{raw:?} should not parse"
      );
    }
  }

  #[test]
  fn variant_applicability() {
    let stage: FieldPath = "levels.ula.type".parse().unwrap();
    assert!(stage.applies_to(InstitutionType::Ponpes));
    assert!(!stage.applies_to(InstitutionType::Tpq));

    let pip = FieldPath::aid(AidProgram::Pip, "2021");
    assert!(!pip.applies_to(InstitutionType::Mdt));
    let bos = FieldPath::aid(AidProgram::Bos, "2021");
    assert!(bos.applies_to(InstitutionType::Mdt));

    let media: FieldPath = "media".parse().unwrap();
    assert!(!media.applies_to(InstitutionType::Ponpes));
  }

  #[test]
  fn parse_input_by_kind() {
    assert_eq!(FieldValue::parse(FieldKind::Count, " 12 "), Ok(FieldValue::Number(12)));
    assert_eq!(FieldValue::parse(FieldKind::Amount, ""), Ok(FieldValue::Number(0)));
    assert!(FieldValue::parse(FieldKind::Count, "-3").is_err());
    assert!(FieldValue::parse(FieldKind::Count, "+7").is_err());
    assert!(FieldValue::parse(FieldKind::Amount, "1_000").is_err());
    assert!(FieldValue::parse(FieldKind::Amount, "99999999999999999999").is_err());
    assert_eq!(
      FieldValue::parse(FieldKind::LevelKind, "Madrasah"),
      Ok(FieldValue::Level(LevelKind::Madrasah))
    );
    assert_eq!(
      FieldValue::parse(FieldKind::List, "WC, , Kantor"),
      Ok(FieldValue::List(vec!["WC".into(), "Kantor".into()]))
    );
  }

  #[test]
  fn write_rejects_wrong_value_kind_without_change() {
    let mut record = Institution::empty(InstitutionType::Tpq, "a");
    let before = record.clone();
    let path: FieldPath = "bpjs.teacherHealth".parse().unwrap();
    let err = path.write(&mut record, "lots".into()).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));
    assert_eq!(record, before);
  }

  #[test]
  fn write_rejects_oversized_count() {
    let mut record = Institution::empty(InstitutionType::Tpq, "a");
    let path: FieldPath = "stats.totalStudents".parse().unwrap();
    let err = path
      .write(&mut record, FieldValue::Number(u64::from(u32::MAX) + 1))
      .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));
  }

  #[test]
  fn level_write_rejects_mismatched_value_without_change() {
    let mut level = EducationLevelDetail::default();
    let before = level.clone();

    let err = LevelField::Kind.write(&mut level, Converted::Count(3)).unwrap_err();
    assert!(matches!(err, Error::InvalidPath(ref p) if p == "type"));

    let err = LevelField::UnParticipants("2021".into())
      .write(&mut level, Converted::Count(3))
      .unwrap_err();
    assert!(matches!(err, Error::InvalidPath(_)));

    assert!(LevelField::Teachers.write(&mut level, Converted::Amount(3)).is_err());
    assert_eq!(level, before);

    LevelField::Teachers.write(&mut level, Converted::Count(4)).unwrap();
    assert_eq!(level.personnel.teachers, 4);
  }
}
