//! TUI rendering. Orchestrates all panes.

pub mod dashboard;
pub mod form;
pub mod institution_detail;
pub mod institution_list;

use chrono::Local;
use pontren_core::{
  institution::InstitutionType,
  metadata::{self, ColorTag, DELETE_PROMPT, OFFICE},
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::{App, Screen, sidebar};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  if let Some(form) = &app.form {
    form::draw(f, centered(area, 90, 90), form);
  }
  if app.pending_delete.is_some() {
    draw_confirm(f, centered(area, 50, 20));
  }
}

/// Terminal color for a type's palette family.
pub fn type_color(kind: InstitutionType) -> Color {
  match metadata::color(kind) {
    ColorTag::Emerald => Color::Green,
    ColorTag::Sky => Color::LightBlue,
    ColorTag::Indigo => Color::Blue,
    ColorTag::Amber => Color::Yellow,
    ColorTag::Rose => Color::LightRed,
  }
}

/// A rectangle of `pct_x` by `pct_y` percent centered in `area`.
pub fn centered(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage((100 - pct_y) / 2),
      Constraint::Percentage(pct_y),
      Constraint::Percentage((100 - pct_y) / 2),
    ])
    .split(area);
  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage((100 - pct_x) / 2),
      Constraint::Percentage(pct_x),
      Constraint::Percentage((100 - pct_x) / 2),
    ])
    .split(rows[1])[1]
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%d %B %Y").to_string();

  let left = Span::styled(
    format!(" SI-Pedipontren · {}", app.screen.heading()),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("[x] Excel  [p] PDF  {date} "),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  // Fixed-width sidebar, content fills the rest.
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Length(28), Constraint::Min(0)])
    .split(area);

  draw_sidebar(f, cols[0], app);

  match app.screen {
    Screen::Dashboard => dashboard::draw(f, cols[1], &app.stats),
    Screen::List(kind) => institution_list::draw(f, cols[1], app, kind),
    Screen::Detail(_) => institution_detail::draw(f, cols[1], app),
  }
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(Line::from(vec![
      Span::styled(" SI-Pedipontren ", Style::default().add_modifier(Modifier::BOLD)),
      Span::styled(format!("{OFFICE} "), Style::default().fg(Color::Green)),
    ]))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let current = match app.screen {
    Screen::Detail(kind) => Screen::List(kind),
    other => other,
  };

  let items: Vec<ListItem> = sidebar()
    .enumerate()
    .map(|(i, entry)| {
      let (label, color) = match entry.kind() {
        None => ("Dashboard", Color::White),
        Some(kind) => (metadata::label(kind), type_color(kind)),
      };
      let style = if entry == current {
        Style::default()
          .bg(Color::Green)
          .fg(Color::Black)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default()
      };
      ListItem::new(Line::from(vec![
        Span::styled(format!("{i} "), Style::default().fg(Color::DarkGray)),
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(label, style),
      ]))
    })
    .collect();

  f.render_widget(List::new(items).block(block), area);
}

fn draw_confirm(f: &mut Frame, area: Rect) {
  let block = Block::default()
    .title(" Hapus Data ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  let text = vec![
    Line::from(DELETE_PROMPT),
    Line::from(""),
    Line::from(Span::styled(
      "[y] Ya, hapus   [n] Batal",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Clear, area);
  f.render_widget(Paragraph::new(text).block(block), area);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = if app.pending_delete.is_some() {
    ("HAPUS", "y confirm  n/Esc cancel")
  } else if let Some(form) = &app.form {
    if form.input.is_some() {
      ("INPUT", "Type value  Enter apply  Esc discard")
    } else {
      ("FORM", "Tab/←→ tab  ↑↓/jk field  Enter edit  Space toggle  s Simpan Data  Esc Batal")
    }
  } else {
    match app.screen {
      Screen::List(_) if app.filter_active => {
        ("SEARCH", "Type to filter  Esc cancel  Enter select")
      }
      Screen::Dashboard => ("NORMAL", "Tab/0-5 navigate  a Tambah Lembaga  q quit"),
      Screen::List(_) => (
        "NORMAL",
        "↑↓/jk navigate  / search  Enter detail  a add  e edit  d delete  q quit",
      ),
      Screen::Detail(_) => ("DETAIL", "↑↓/jk scroll  e Edit Data  d delete  Esc back  q quit"),
    }
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
