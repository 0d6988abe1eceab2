//! Add/edit modal: tab bar, sectioned inputs and the save/cancel footer.

use pontren_core::{
  editor::{FormItem, FormTab},
  metadata,
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs},
};

use super::type_color;
use crate::app::FormState;

/// Render the form modal into `area`.
pub fn draw(f: &mut Frame, area: Rect, form: &FormState) {
  let editor = &form.editor;
  let kind = editor.kind();

  let block = Block::default()
    .title(format!(" {} ", editor.title()))
    .title_bottom(Line::from(" [s] Simpan Data  [Esc] Batal "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(type_color(kind)));
  let inner = block.inner(area);
  f.render_widget(Clear, area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // type
      Constraint::Length(1), // tabs
      Constraint::Min(0),    // fields
    ])
    .split(inner);

  let dirty = if editor.is_dirty() { "  (belum disimpan)" } else { "" };
  f.render_widget(
    Paragraph::new(Line::from(vec![
      Span::styled(
        format!("Tipe: {}", metadata::label(kind)),
        Style::default().fg(Color::Gray),
      ),
      Span::styled(dirty, Style::default().fg(Color::Yellow)),
    ])),
    rows[0],
  );

  let tabs: Vec<Line> = FormTab::all().map(|t| Line::from(t.label())).collect();
  let selected = FormTab::all().position(|t| t == form.tab).unwrap_or(0);
  f.render_widget(
    Tabs::new(tabs)
      .select(selected)
      .highlight_style(
        Style::default()
          .fg(type_color(kind))
          .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
      )
      .divider("│"),
    rows[1],
  );

  draw_fields(f, rows[2], form);
}

fn draw_fields(f: &mut Frame, area: Rect, form: &FormState) {
  let editor = &form.editor;
  let label_width = 36;

  let mut items: Vec<ListItem> = Vec::new();
  let mut selected_row = None;
  let mut index = 0;

  for section in editor.sections(form.tab) {
    items.push(ListItem::new(Line::from("")));
    items.push(ListItem::new(Line::from(Span::styled(
      section.title,
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ))));

    for item in section.items {
      let is_cursor = index == form.cursor;
      if is_cursor {
        selected_row = Some(items.len());
      }

      let line = match &item {
        FormItem::Input { label, path } => {
          let value = match (&form.input, is_cursor) {
            (Some(buffer), true) => Span::styled(
              format!("{buffer}_"),
              Style::default().fg(Color::Yellow),
            ),
            _ => match editor.value(path) {
              Ok(v) => Span::raw(v.to_string()),
              Err(e) => Span::styled(e.to_string(), Style::default().fg(Color::Red)),
            },
          };
          Line::from(vec![
            Span::styled(format!("  {label:<label_width$}"), Style::default().fg(Color::Gray)),
            value,
          ])
        }
        FormItem::Facility(label) => {
          let mark = if editor.has_facility(label) { "[x]" } else { "[ ]" };
          Line::from(vec![
            Span::styled(format!("  {mark} "), Style::default().fg(Color::Green)),
            Span::raw(*label),
          ])
        }
      };
      items.push(ListItem::new(line));
      index += 1;
    }
  }

  let mut state = ListState::default();
  state.select(selected_row);

  f.render_stateful_widget(
    List::new(items).highlight_style(Style::default().bg(Color::DarkGray)),
    area,
    &mut state,
  );
}
