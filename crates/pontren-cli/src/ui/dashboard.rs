//! Dashboard: stat cards, type distribution and the BOS trend.

use pontren_core::{metadata::OFFICE, stats::DashboardStats};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{BarChart, Block, Borders, Paragraph},
};

use super::type_color;

/// Render the dashboard into `area`.
pub fn draw(f: &mut Frame, area: Rect, stats: &DashboardStats) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(5), Constraint::Min(0)])
    .split(area);

  draw_cards(f, rows[0], stats);

  let charts = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(rows[1]);

  draw_distribution(f, charts[0], stats);
  draw_growth(f, charts[1], stats);
}

// ─── Cards ────────────────────────────────────────────────────────────────────

fn draw_cards(f: &mut Frame, area: Rect, stats: &DashboardStats) {
  let cells = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 4); 4])
    .split(area);

  let cards = [
    ("Total Lembaga", stats.total.to_string(), Color::Green, OFFICE),
    ("Total Santri", group_thousands(stats.students), Color::LightBlue, "Terverifikasi"),
    ("Total Pengajar", group_thousands(stats.teachers), Color::Blue, "BPJS & Non-BPJS"),
    ("Dana BOS (Jt)", format!("Rp {}", stats.current_bos()), Color::Yellow, "Tahun Berjalan"),
  ];

  for ((label, value, color, sub), cell) in cards.into_iter().zip(cells.iter()) {
    let block = Block::default()
      .title(format!(" {label} "))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(color));
    let text = vec![
      Line::from(Span::styled(
        value,
        Style::default().add_modifier(Modifier::BOLD),
      )),
      Line::from(Span::styled(sub, Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(text).block(block), *cell);
  }
}

/// `1290` → `1.290`, the Indonesian thousands separator.
fn group_thousands(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push('.');
    }
    out.push(c);
  }
  out
}

// ─── Charts ───────────────────────────────────────────────────────────────────

fn draw_distribution(f: &mut Frame, area: Rect, stats: &DashboardStats) {
  let block = Block::default()
    .title(" Distribusi Lembaga ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let label_width = stats.by_type.iter().map(|t| t.label.len()).max().unwrap_or(0);
  // Room left for the bar after the label and the count.
  let bar_room = (inner.width as usize).saturating_sub(label_width + 8);
  let max = stats.max_count().max(1);

  let lines: Vec<Line> = stats
    .by_type
    .iter()
    .map(|t| {
      let len = t.count * bar_room / max;
      Line::from(vec![
        Span::raw(format!("{:<label_width$} ", t.label)),
        Span::styled("█".repeat(len), Style::default().fg(type_color(t.kind))),
        Span::styled(format!(" {}", t.count), Style::default().add_modifier(Modifier::BOLD)),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_growth(f: &mut Frame, area: Rect, stats: &DashboardStats) {
  let data: Vec<(&str, u64)> = stats
    .growth
    .iter()
    .map(|y| (y.year, y.bos.round() as u64))
    .collect();

  let chart = BarChart::default()
    .block(
      Block::default()
        .title(" Tren Anggaran BOS (Jutaan Rp) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    )
    .data(data.as_slice())
    .bar_width(6)
    .bar_gap(2)
    .bar_style(Style::default().fg(Color::Green))
    .value_style(Style::default().fg(Color::Black).bg(Color::Green));

  f.render_widget(chart, area);
}
