//! Institution detail: every section of one record, scrollable.

use pontren_core::{
  aid::{MILLION, YEARS, YearData},
  institution::{Bpjs, CommunityInstitution, Institution, LevelKind, PonpesInstitution, Stage},
  metadata,
};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

use super::type_color;
use crate::app::App;

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render the detail view into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(record) = app.selected_record() else {
    let hint = Paragraph::new("Pilih lembaga dan tekan Enter.")
      .style(Style::default().fg(Color::DarkGray))
      .block(Block::default().borders(Borders::ALL));
    f.render_widget(hint, area);
    return;
  };

  let block = Block::default()
    .title(format!(" {} ", record.name()))
    .title_bottom(Line::from(" [e] Edit Data  [d] Hapus "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(type_color(record.kind())));

  let lines = lines(record);
  let max_scroll = lines.len().saturating_sub(1);
  let scroll_offset = app.detail_scroll.min(max_scroll) as u16;
  let para = Paragraph::new(lines)
    .block(block)
    .wrap(Wrap { trim: false })
    .scroll((scroll_offset, 0));
  f.render_widget(para, area);
}

// ─── Line builders ────────────────────────────────────────────────────────────

fn heading(title: &str) -> Line<'static> {
  Line::from(Span::styled(
    title.to_string(),
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  ))
}

fn field(label: &str, value: impl ToString) -> Line<'static> {
  let value = value.to_string();
  let value_style = if value.is_empty() {
    Style::default().fg(Color::DarkGray)
  } else {
    Style::default()
  };
  Line::from(vec![
    Span::styled(format!("  {label:<24}"), Style::default().fg(Color::Gray)),
    Span::styled(if value.is_empty() { "-".into() } else { value }, value_style),
  ])
}

/// One line with the five window years of `data`.
fn years(label: &str, data: &YearData) -> Line<'static> {
  let values: Vec<String> = YEARS
    .iter()
    .zip(data.window())
    .map(|(year, v)| format!("{year}: {v}"))
    .collect();
  field(label, values.join("  "))
}

/// Like [`years`], in millions of rupiah.
fn amounts(label: &str, data: &YearData) -> Line<'static> {
  let values: Vec<String> = YEARS
    .iter()
    .zip(data.window())
    .map(|(year, v)| format!("{year}: {}", v as f64 / MILLION))
    .collect();
  field(label, format!("{} (Jt)", values.join("  ")))
}

fn bpjs(lines: &mut Vec<Line<'static>>, bpjs: &Bpjs) {
  lines.push(field(
    "BPJS Guru (Kes/Ket)",
    format!("{} / {}", bpjs.teacher_health, bpjs.teacher_work),
  ));
  lines.push(field(
    "BPJS Staf (Kes/Ket)",
    format!("{} / {}", bpjs.staff_health, bpjs.staff_work),
  ));
}

fn lines(record: &Institution) -> Vec<Line<'static>> {
  let base = record.base();
  let mut lines = vec![
    Line::from(Span::styled(
      metadata::label(record.kind()),
      Style::default().fg(type_color(record.kind())),
    )),
    Line::from(Span::styled(
      base.basic.tagline.clone(),
      Style::default().add_modifier(Modifier::ITALIC),
    )),
    Line::from(""),
    heading("Profil"),
    field("Deskripsi", &base.basic.description),
    field("Alamat", &base.basic.address),
    field("Telepon", &base.basic.phone),
    field("Email", &base.basic.email),
    field("Website", &base.basic.website),
    field("Tahun Berdiri", &base.stats.year_founded),
    field("Total Santri", base.stats.total_students),
    field("Total Pengajar", base.stats.total_teachers),
    Line::from(""),
    heading("Legalitas & Organisasi"),
    field("Pimpinan", &base.legality.leader),
    field("Nomor Izin / NSP", &base.legality.license_number),
    field("Yayasan", &base.legality.foundation),
    field("Legalitas Yayasan (SK)", &base.legality.legality_details),
    field("Media Sosial", &base.legality.social_media),
    field("Google Maps", &base.legality.gmaps_url),
    Line::from(""),
    heading("Visi & Misi"),
    field("Visi", &base.vision_misi.vision),
    field("Misi", &base.vision_misi.mision),
    field("Program Unggulan", &base.vision_misi.program),
    field("Program Tahunan", &base.vision_misi.yearly_program),
    field("Kalender Pendidikan", &base.vision_misi.calendar),
    Line::from(""),
  ];

  match record {
    Institution::Ponpes(p) => ponpes(&mut lines, p),
    Institution::Tpq(c) | Institution::Mdt(c) | Institution::Rtq(c) | Institution::Paudqu(c) => {
      community(&mut lines, c)
    }
  }

  lines.push(heading("Keuangan & Bantuan"));
  for &program in record.programs() {
    if let Some(data) = record.aid(program) {
      lines.push(amounts(program.label(), data));
    }
  }
  lines.push(Line::from(""));

  lines.push(heading("Fasilitas & Dokumentasi"));
  lines.push(field("Fasilitas", base.facilities.join(", ")));
  lines.push(field("Prestasi Pendidikan", &base.achievements.education));
  lines.push(field("Prestasi Olahraga", &base.achievements.sports));
  lines.push(field("Prestasi Seni & Budaya", &base.achievements.arts));
  lines.push(field("Dokumentasi (G-Drive)", &base.documentation.google_drive_link));
  lines.push(field("Ekstrakurikuler Olahraga", &base.extracurriculars.sports));
  lines.push(field("Ekstrakurikuler Seni", &base.extracurriculars.arts));
  lines.push(field("Ekstrakurikuler Lainnya", &base.extracurriculars.others));
  lines
}

fn ponpes(lines: &mut Vec<Line<'static>>, p: &PonpesInstitution) {
  lines.push(heading("Pendidikan & Santri"));
  for stage in Stage::iter() {
    let level = p.levels.stage(stage);
    let kind = match level.kind {
      LevelKind::Unset => "-".to_string(),
      kind => kind.to_string(),
    };
    lines.push(Line::from(Span::styled(
      format!(" Tingkat {stage} / {} ({kind})", stage.equivalent()),
      Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(field(
      "Santri (L/P)",
      format!("{} / {}", level.students.male, level.students.female),
    ));
    lines.push(field(
      "Guru / Staf",
      format!("{} / {}", level.personnel.teachers, level.personnel.staff),
    ));
    bpjs(lines, &level.bpjs);
    lines.push(years("Peserta UN", &level.un_participants));
    lines.push(years("Lulusan UN", &level.un_graduates));
  }
  lines.push(years("Diterima PT", &p.university_acceptance));
  lines.push(field("Perguruan Tinggi", &p.university_names));
  lines.push(field("Kitab Kuning", &p.kitab_kuning));

  let floors = &p.building_floors;
  lines.push(field(
    "Lantai Gedung",
    format!(
      "kantor {} · masjid {} · asrama L {} · asrama P {} · kelas {} · perpustakaan {} · aula {} · dapur {}",
      floors.office,
      floors.mosque,
      floors.dorm_male,
      floors.dorm_female,
      floors.classroom,
      floors.library,
      floors.hall,
      floors.kitchen
    ),
  ));
  lines.push(Line::from(""));
}

fn community(lines: &mut Vec<Line<'static>>, c: &CommunityInstitution) {
  let levels = &c.student_education_levels;
  lines.push(heading("Pendidikan & Santri"));
  lines.push(field("Santri SD/MI (L/P)", format!("{} / {}", levels.male_sd, levels.female_sd)));
  lines.push(field("Santri SMP/MTs (L/P)", format!("{} / {}", levels.male_smp, levels.female_smp)));
  lines.push(field("Santri SMA/MA (L/P)", format!("{} / {}", levels.male_sma, levels.female_sma)));
  lines.push(field("Pendidik / Tendik", format!("{} / {}", levels.teachers, levels.staff)));
  bpjs(lines, &c.bpjs);
  lines.push(years("Peserta Munaqasyah", &c.munaqasyah_participants));
  lines.push(years("Lulus Munaqasyah", &c.munaqasyah_graduates));
  lines.push(field("Mata Pelajaran", &c.subjects));
  lines.push(field("Buku Pembelajaran", &c.learning_books));
  lines.push(field("Media Pembelajaran", &c.media));
  lines.push(Line::from(""));
}
