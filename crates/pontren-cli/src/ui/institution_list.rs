//! Institution list, one entry per record of the selected type.

use pontren_core::{
  institution::InstitutionType,
  metadata::{self, REGION},
};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::type_color;
use crate::app::App;

/// Render the list of `kind` records into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App, kind: InstitutionType) {
  let filtered = app.filtered_records();
  let total = app.stats.count(kind);

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" {} ({}/{}) ", metadata::label(kind), filtered.len(), total)
  } else {
    format!(" {} ({}) ", metadata::label(kind), total)
  };

  let block = Block::default()
    .title(title)
    .title_bottom(Line::from(format!(" {REGION} · [a] Tambah Lembaga ")))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(type_color(kind)));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  if filtered.is_empty() && app.filter.is_empty() {
    f.render_widget(
      Paragraph::new("Belum ada data. Tekan [a] untuk menambah lembaga.")
        .style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  // Two lines per record: name, then address and headline figures.
  let items: Vec<ListItem> = filtered
    .iter()
    .map(|record| {
      let name = if record.name().is_empty() { "(tanpa nama)" } else { record.name() };
      let stats = record.stats();
      ListItem::new(vec![
        Line::from(Span::styled(
          name.to_string(),
          Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
          Span::styled(
            format!("  {}", record.base().basic.address),
            Style::default().fg(Color::DarkGray),
          ),
          Span::styled(
            format!(
              "  {} santri · {} pengajar",
              stats.total_students, stats.total_teachers
            ),
            Style::default().fg(type_color(kind)),
          ),
        ]),
      ])
    })
    .collect();

  // Filter bar at the bottom of the inner area.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let mut state = ListState::default();
  state.select(if filtered.is_empty() {
    None
  } else {
    Some(app.list_cursor)
  });

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
      .highlight_symbol("▌"),
    inner_area,
    &mut state,
  );
}
