//! Initial records the dashboard starts from.

use std::path::Path;

use serde_json::Value;

use crate::{
  Error, Result,
  aid::{PonpesAid, YearData},
  institution::{
    Achievements, BaseInstitution, BasicProfile, Documentation, Institution,
    Legality, PonpesInstitution, Stats, VisionMisi,
  },
};

fn years(amounts: [u64; 5]) -> YearData {
  crate::aid::YEARS.into_iter().zip(amounts).collect()
}

/// The built-in seed: a single boarding school.
pub fn mock_data() -> Vec<Institution> {
  let base = BaseInstitution {
    id:               "1".into(),
    basic:            BasicProfile {
      name:        "Pondok Pesantren Sultan Hasanuddin".into(),
      tagline:     "Mencetak Generasi Qurani yang Berintelektual".into(),
      description: "Pesantren modern tertua di Gowa dengan fokus pada Tahfidz dan Sains."
        .into(),
      address:     "Jl. Poros Limbung No. 22, Gowa".into(),
      phone:       "08123456789".into(),
      email:       "sultan@ponpes.id".into(),
      website:     "www.sultanhsn.id".into(),
    },
    legality:         Legality {
      leader:           "KH. Dr. Ahmad Mansur".into(),
      license_number:   "PONTREN/GW/2023/001".into(),
      foundation:       "Yayasan Pendidikan Sultan Hasanuddin".into(),
      legality_details: "SK Menkumham No. AHU-001234.2020".into(),
      social_media:     "@sultanhsn_gowa".into(),
      gmaps_url:        "https://maps.google.com/?q=Gowa".into(),
    },
    stats:            Stats {
      year_founded:   "1995".into(),
      total_students: 1250,
      total_teachers: 85,
    },
    extracurriculars: Default::default(),
    vision_misi:      VisionMisi {
      vision: "Menjadi pusat keunggulan pendidikan Islam di Sulawesi Selatan.".into(),
      mision: "Menyelenggarakan pendidikan formal dan informal berbasis pesantren."
        .into(),
      program: "Tahfidz 30 Juz, Penguasaan Kitab Kuning".into(),
      ..Default::default()
    },
    documentation:    Documentation {
      google_drive_link: "https://drive.google.com/...".into(),
    },
    facilities:       vec![
      "Asrama AC".into(),
      "Laboratorium Bahasa".into(),
      "Gedung Serbaguna".into(),
    ],
    achievements:     Achievements {
      education: "Juara 1 MQK Tingkat Provinsi 2023".into(),
      sports:    "Juara 2 Pencak Silat Nasional".into(),
      arts:      "Juara Harapan Kaligrafi".into(),
    },
  };

  let financial_aid = PonpesAid {
    bos: years([50_000_000, 55_000_000, 60_000_000, 65_000_000, 70_000_000]),
    incentive: years([10_000_000, 12_000_000, 15_000_000, 18_000_000, 20_000_000]),
    other: years([5_000_000, 5_000_000, 7_000_000, 10_000_000, 12_000_000]),
    ..Default::default()
  };

  vec![Institution::Ponpes(PonpesInstitution {
    base,
    financial_aid,
    ..Default::default()
  })]
}

/// Load records from a JSON file holding an array of institutions.
///
/// Every element goes through [`Institution::from_json`], so a record whose
/// fields do not match its type fails the whole load.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Institution>> {
  let path = path.as_ref();
  let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })?;
  let records = parse(&raw)?;
  tracing::info!(path = %path.display(), count = records.len(), "loaded seed file");
  Ok(records)
}

/// Parse a JSON array of institutions.
pub fn parse(raw: &str) -> Result<Vec<Institution>> {
  let values: Vec<Value> = serde_json::from_str(raw)?;
  values.into_iter().map(Institution::from_json).collect()
}
