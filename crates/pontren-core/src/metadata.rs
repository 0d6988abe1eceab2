//! Display metadata: labels, color tags and the fixed option lists the
//! dashboard offers.

use crate::institution::InstitutionType;

/// The palette family a type is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
  Emerald,
  Sky,
  Indigo,
  Amber,
  Rose,
}

pub fn label(kind: InstitutionType) -> &'static str {
  match kind {
    InstitutionType::Ponpes => "Pondok Pesantren",
    InstitutionType::Tpq => "TPQ / TPA",
    InstitutionType::Mdt => "Madrasah Diniyah (MDT)",
    InstitutionType::Rtq => "Rumah Tahfidz (RTQ)",
    InstitutionType::Paudqu => "PAUDQU",
  }
}

pub fn color(kind: InstitutionType) -> ColorTag {
  match kind {
    InstitutionType::Ponpes => ColorTag::Emerald,
    InstitutionType::Tpq => ColorTag::Sky,
    InstitutionType::Mdt => ColorTag::Indigo,
    InstitutionType::Rtq => ColorTag::Amber,
    InstitutionType::Paudqu => ColorTag::Rose,
  }
}

/// Facility checklist offered to the community forms.
pub const COMMUNITY_FACILITIES: [&str; 5] =
  ["Kantor", "Ruang Belajar", "WC", "Masjid/Mushalla", "Perpustakaan"];

pub const REGION: &str = "Kabupaten Gowa";
pub const OFFICE: &str = "Kemenag Gowa";

/// Prompt shown before a record is removed.
pub const DELETE_PROMPT: &str = "Apakah Anda yakin ingin menghapus data ini?";

// ─── Export ──────────────────────────────────────────────────────────────────

/// Export targets. Neither produces a file; the dashboard only acknowledges
/// the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
  Excel,
  Pdf,
}

impl ExportFormat {
  pub fn notice(self) -> &'static str {
    match self {
      Self::Excel => "Mengekspor ke Excel...",
      Self::Pdf => "Mengekspor ke PDF...",
    }
  }
}
