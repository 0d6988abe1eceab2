//! Form layout: which fields appear on which tab, per institution type.

use strum::{EnumIter, IntoEnumIterator};

use super::path::{
  AchievementField, BasicField, BpjsField, EducationField, ExtracurricularField,
  FieldPath, LegalityField, LevelField, Room, StatsField, VisionField,
};
use crate::{
  aid::{AidProgram, YEARS},
  institution::{InstitutionType, Stage},
  metadata::COMMUNITY_FACILITIES,
};

/// The five tabs of the editing form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
pub enum FormTab {
  #[default]
  Basic,
  Legality,
  Education,
  Finance,
  Facilities,
}

impl FormTab {
  pub fn label(self) -> &'static str {
    match self {
      Self::Basic => "Dasar & Profil",
      Self::Legality => "Legalitas & Org",
      Self::Education => "Pendidikan & Santri",
      Self::Finance => "Keuangan & Bantuan",
      Self::Facilities => "Fasilitas & Dokumentasi",
    }
  }

  pub fn all() -> impl Iterator<Item = Self> { Self::iter() }

  pub fn next(self) -> Self {
    Self::iter()
      .cycle()
      .skip_while(|t| *t != self)
      .nth(1)
      .unwrap_or_default()
  }

  pub fn prev(self) -> Self {
    let tabs: Vec<_> = Self::iter().collect();
    let index = tabs.iter().position(|t| *t == self).unwrap_or(0);
    tabs[(index + tabs.len() - 1) % tabs.len()]
  }
}

/// One row of a form section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormItem {
  /// A labelled input bound to a field.
  Input { label: String, path: FieldPath },
  /// A checkbox adding or removing a facility label.
  Facility(&'static str),
}

impl FormItem {
  fn input(label: impl Into<String>, path: FieldPath) -> Self {
    Self::Input { label: label.into(), path }
  }

  pub fn label(&self) -> &str {
    match self {
      Self::Input { label, .. } => label,
      Self::Facility(label) => label,
    }
  }

  pub fn path(&self) -> Option<&FieldPath> {
    match self {
      Self::Input { path, .. } => Some(path),
      Self::Facility(_) => None,
    }
  }
}

/// A titled group of items on a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSection {
  pub title: String,
  pub items: Vec<FormItem>,
}

impl FormSection {
  fn new(title: impl Into<String>, items: Vec<FormItem>) -> Self {
    Self { title: title.into(), items }
  }
}

/// The sections of `tab` for a record of type `kind`.
pub fn sections(kind: InstitutionType, tab: FormTab) -> Vec<FormSection> {
  match tab {
    FormTab::Basic => basic(),
    FormTab::Legality => legality(),
    FormTab::Education if kind.is_ponpes() => ponpes_education(),
    FormTab::Education => community_education(),
    FormTab::Finance => finance(kind),
    FormTab::Facilities => facilities(kind),
  }
}

fn basic() -> Vec<FormSection> {
  use BasicField::*;
  let profile = [
    ("Nama Lembaga", Name),
    ("Tagline / Motto", Tagline),
    ("Deskripsi Singkat", Description),
    ("Alamat Lengkap", Address),
    ("Telepon", Phone),
    ("Email", Email),
    ("Website", Website),
  ]
  .into_iter()
  .map(|(label, f)| FormItem::input(label, FieldPath::Basic(f)))
  .chain([
    FormItem::input("Tahun Berdiri", FieldPath::Stats(StatsField::YearFounded)),
    FormItem::input("Total Santri", FieldPath::Stats(StatsField::TotalStudents)),
    FormItem::input("Total Pengajar", FieldPath::Stats(StatsField::TotalTeachers)),
  ])
  .collect();

  let vision = [
    ("Visi", VisionField::Vision),
    ("Misi", VisionField::Mision),
    ("Program Unggulan", VisionField::Program),
    ("Program Tahunan", VisionField::YearlyProgram),
    ("Kalender Pendidikan", VisionField::Calendar),
  ]
  .into_iter()
  .map(|(label, f)| FormItem::input(label, FieldPath::VisionMisi(f)))
  .collect();

  vec![
    FormSection::new("Profil Lembaga", profile),
    FormSection::new("Visi & Misi", vision),
  ]
}

fn legality() -> Vec<FormSection> {
  use LegalityField::*;
  let items = [
    ("Nama Pimpinan", Leader),
    ("Nomor Izin / NSP", LicenseNumber),
    ("Nama Yayasan", Foundation),
    ("Legalitas Yayasan (SK)", LegalityDetails),
    ("Media Sosial", SocialMedia),
    ("URL Google Maps", GmapsUrl),
  ]
  .into_iter()
  .map(|(label, f)| FormItem::input(label, FieldPath::Legality(f)))
  .collect();
  vec![FormSection::new("Legalitas & Organisasi", items)]
}

fn bpjs_items(path: impl Fn(BpjsField) -> FieldPath) -> impl Iterator<Item = FormItem> {
  [
    ("BPJS Guru (Kes)", BpjsField::TeacherHealth),
    ("BPJS Guru (Ket)", BpjsField::TeacherWork),
    ("BPJS Staf (Kes)", BpjsField::StaffHealth),
    ("BPJS Staf (Ket)", BpjsField::StaffWork),
  ]
  .into_iter()
  .map(move |(label, f)| FormItem::input(label, path(f)))
}

fn year_items(
  prefix: &'static str,
  path: impl Fn(String) -> FieldPath,
) -> impl Iterator<Item = FormItem> {
  YEARS.into_iter().map(move |year| {
    let label = if prefix.is_empty() { year.to_owned() } else { format!("{prefix} {year}") };
    FormItem::input(label, path(year.to_owned()))
  })
}

fn ponpes_education() -> Vec<FormSection> {
  let mut sections: Vec<FormSection> = Stage::iter()
    .map(|stage| {
      let at = move |field| FieldPath::level(stage, field);
      let items = [
        ("Jenis", LevelField::Kind),
        ("Santri (L)", LevelField::StudentsMale),
        ("Santri (P)", LevelField::StudentsFemale),
        ("Guru", LevelField::Teachers),
        ("Staf", LevelField::Staff),
      ]
      .into_iter()
      .map(|(label, f)| FormItem::input(label, at(f)))
      .chain(bpjs_items(move |f| at(LevelField::Bpjs(f))))
      .chain(year_items("Peserta UN", move |y| at(LevelField::UnParticipants(y))))
      .chain(year_items("Lulusan UN", move |y| at(LevelField::UnGraduates(y))))
      .collect();
      FormSection::new(format!("Tingkat {stage} / {}", stage.equivalent()), items)
    })
    .collect();

  let university = year_items("Diterima PT", FieldPath::UniversityAcceptance)
    .chain([FormItem::input("Nama Perguruan Tinggi", FieldPath::UniversityNames)])
    .collect();
  sections.push(FormSection::new("Penerimaan Perguruan Tinggi", university));
  sections.push(FormSection::new("Kurikulum & Materi", vec![FormItem::input(
    "Kitab Kuning yang Diajarkan",
    FieldPath::KitabKuning,
  )]));
  sections
}

fn community_education() -> Vec<FormSection> {
  use EducationField::*;
  let students = [
    ("Santri (L) SD/MI", MaleSd),
    ("Santri (P) SD/MI", FemaleSd),
    ("Santri (L) SMP/MTs", MaleSmp),
    ("Santri (P) SMP/MTs", FemaleSmp),
    ("Santri (L) SMA/MA", MaleSma),
    ("Santri (P) SMA/MA", FemaleSma),
    ("Pendidik", Teachers),
    ("Tenaga Kependidikan", Staff),
  ]
  .into_iter()
  .map(|(label, f)| FormItem::input(label, FieldPath::Education(f)))
  .chain(bpjs_items(FieldPath::Bpjs))
  .collect();

  let munaqasyah = year_items("Peserta", FieldPath::MunaqasyahParticipants)
    .chain(year_items("Lulus", FieldPath::MunaqasyahGraduates))
    .collect();

  let curriculum = vec![
    FormItem::input("Mata Pelajaran", FieldPath::Subjects),
    FormItem::input("Buku Pembelajaran", FieldPath::LearningBooks),
    FormItem::input("Media Pembelajaran (TV, Sound, dll)", FieldPath::Media),
  ];

  vec![
    FormSection::new("Santri & Pendidik", students),
    FormSection::new("Munaqasyah", munaqasyah),
    FormSection::new("Kurikulum & Materi", curriculum),
  ]
}

fn finance(kind: InstitutionType) -> Vec<FormSection> {
  let programs: &[AidProgram] = if kind.is_ponpes() {
    &crate::aid::PonpesAid::PROGRAMS
  } else {
    &crate::aid::CommunityAid::PROGRAMS
  };
  programs
    .iter()
    .map(|&program| {
      let items = year_items("", move |y| FieldPath::Aid { program, year: y }).collect();
      FormSection::new(format!("{} per Tahun", program.label()), items)
    })
    .collect()
}

fn facilities(kind: InstitutionType) -> Vec<FormSection> {
  let building = if kind.is_ponpes() {
    Room::iter()
      .map(|room| FormItem::input(room.key().to_uppercase(), FieldPath::BuildingFloor(room)))
      .chain([FormItem::input("Fasilitas Lainnya", FieldPath::Facilities)])
      .collect()
  } else {
    COMMUNITY_FACILITIES.into_iter().map(FormItem::Facility).collect()
  };

  let achievements = [
    ("Prestasi Pendidikan", FieldPath::Achievement(AchievementField::Education)),
    ("Prestasi Olahraga", FieldPath::Achievement(AchievementField::Sports)),
    ("Prestasi Seni & Budaya", FieldPath::Achievement(AchievementField::Arts)),
    ("Tautan Foto Dokumentasi (G-Drive)", FieldPath::DriveLink),
  ]
  .into_iter()
  .map(|(label, path)| FormItem::input(label, path))
  .collect();

  let extracurricular = [
    ("Kegiatan Olahraga", ExtracurricularField::Sports),
    ("Kegiatan Seni", ExtracurricularField::Arts),
    ("Kegiatan Lainnya", ExtracurricularField::Others),
  ]
  .into_iter()
  .map(|(label, f)| FormItem::input(label, FieldPath::Extracurricular(f)))
  .collect();

  vec![
    FormSection::new("Lantai Gedung / Fasilitas Bangunan", building),
    FormSection::new("Prestasi & Dokumentasi", achievements),
    FormSection::new("Kegiatan Ekstrakurikuler", extracurricular),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  fn paths(kind: InstitutionType) -> Vec<FieldPath> {
    FormTab::all()
      .flat_map(|tab| sections(kind, tab))
      .flat_map(|s| s.items)
      .filter_map(|item| item.path().cloned())
      .collect()
  }

  #[test]
  fn every_layout_path_applies_to_its_type() {
    for kind in InstitutionType::all() {
      for path in paths(kind) {
        assert!(path.applies_to(kind), "{path} shown on a {kind} form");
      }
    }
  }

  #[test]
  fn ponpes_education_has_three_stage_blocks() {
    let titles: Vec<_> = sections(InstitutionType::Ponpes, FormTab::Education)
      .into_iter()
      .map(|s| s.title)
      .collect();
    assert_eq!(&titles[..3], [
      "Tingkat ula / MI/SD",
      "Tingkat wustha / MTS/SMP",
      "Tingkat ulya / MA/SMA",
    ]);
  }

  #[test]
  fn finance_sections_follow_owned_programs() {
    assert_eq!(sections(InstitutionType::Ponpes, FormTab::Finance).len(), 6);
    let community = sections(InstitutionType::Rtq, FormTab::Finance);
    assert_eq!(community.len(), 3);
    assert_eq!(community[0].title, "Bantuan Operasional Sekolah (BOS) per Tahun");
    assert_eq!(community[0].items.len(), YEARS.len());
  }

  #[test]
  fn community_facilities_are_checkboxes() {
    let building = &sections(InstitutionType::Tpq, FormTab::Facilities)[0];
    assert_eq!(building.items.len(), COMMUNITY_FACILITIES.len());
    assert!(building.items.iter().all(|i| matches!(i, FormItem::Facility(_))));
  }

  #[test]
  fn tabs_cycle_both_ways() {
    assert_eq!(FormTab::Facilities.next(), FormTab::Basic);
    assert_eq!(FormTab::Basic.prev(), FormTab::Facilities);
    assert_eq!(FormTab::Legality.next(), FormTab::Education);
    let labels: Vec<_> = FormTab::all().map(FormTab::label).collect();
    assert_eq!(labels[0], "Dasar & Profil");
  }
}
