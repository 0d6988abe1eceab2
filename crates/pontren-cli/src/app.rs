//! Application state machine and event dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use pontren_core::{
  editor::{Editor, FormItem, FormTab},
  institution::{Institution, InstitutionType},
  metadata::{self, ExportFormat},
  stats::DashboardStats,
  store::{InstitutionStore, MemoryStore},
};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Sector-wide statistics.
  Dashboard,
  /// Cards for every institution of one type.
  List(InstitutionType),
  /// One record of the given type, full width.
  Detail(InstitutionType),
}

impl Screen {
  /// The type the screen is scoped to; `None` on the dashboard.
  pub fn kind(self) -> Option<InstitutionType> {
    match self {
      Self::Dashboard => None,
      Self::List(kind) | Self::Detail(kind) => Some(kind),
    }
  }

  /// Header title.
  pub fn heading(self) -> String {
    match self.kind() {
      None => "Statistik Sektoral".into(),
      Some(kind) => format!("Data {}", metadata::label(kind)),
    }
  }
}

/// Sidebar entries, top to bottom.
pub fn sidebar() -> impl Iterator<Item = Screen> {
  std::iter::once(Screen::Dashboard).chain(InstitutionType::all().map(Screen::List))
}

// ─── Form ─────────────────────────────────────────────────────────────────────

/// The add/edit modal.
pub struct FormState {
  pub editor: Editor,
  pub tab:    FormTab,
  /// Index into [`FormState::items`].
  pub cursor: usize,
  /// Text being typed into the selected input, if any.
  pub input:  Option<String>,
}

impl FormState {
  fn new(editor: Editor) -> Self {
    Self {
      editor,
      tab: FormTab::default(),
      cursor: 0,
      input: None,
    }
  }

  /// Every item on the current tab, section headings left out.
  pub fn items(&self) -> Vec<FormItem> {
    self
      .editor
      .sections(self.tab)
      .into_iter()
      .flat_map(|s| s.items)
      .collect()
  }

  fn selected(&self) -> Option<FormItem> { self.items().into_iter().nth(self.cursor) }

  fn switch_tab(&mut self, tab: FormTab) {
    self.tab = tab;
    self.cursor = 0;
    self.input = None;
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen.
  pub screen: Screen,

  /// The record repository; the only place records are mutated.
  pub store: MemoryStore,

  /// Aggregates over `store`, recomputed after every mutation.
  pub stats: DashboardStats,

  /// Current fuzzy-filter string (only active when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* list.
  pub list_cursor: usize,

  /// Scroll offset within the detail view.
  pub detail_scroll: usize,

  /// Id of the record shown on the detail screen.
  pub selected_id: Option<String>,

  /// Open add/edit form.
  pub form: Option<FormState>,

  /// Id awaiting delete confirmation.
  pub pending_delete: Option<String>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl App {
  pub fn new(store: MemoryStore) -> Self {
    let stats = DashboardStats::compute(store.records());
    Self {
      screen: Screen::Dashboard,
      store,
      stats,
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      detail_scroll: 0,
      selected_id: None,
      form: None,
      pending_delete: None,
      status_msg: String::new(),
    }
  }

  /// Recompute the dashboard and keep the cursor in range.
  fn refresh(&mut self) {
    self.stats = DashboardStats::compute(self.store.records());
    let len = self.filtered_records().len();
    self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Records of the current screen's type that match the filter query.
  pub fn filtered_records(&self) -> Vec<&Institution> {
    let Some(kind) = self.screen.kind() else {
      return Vec::new();
    };
    let records = self.store.records().iter().filter(|r| r.kind() == kind);
    if self.filter.is_empty() {
      return records.collect();
    }
    let matcher = SkimMatcherV2::default();
    records
      .filter(|r| {
        matcher.fuzzy_match(r.name(), &self.filter).is_some()
          || matcher
            .fuzzy_match(&r.base().basic.address, &self.filter)
            .is_some()
      })
      .collect()
  }

  /// The record under the list cursor in the filtered view, if any.
  pub fn cursor_record(&self) -> Option<&Institution> {
    self.filtered_records().get(self.list_cursor).copied()
  }

  /// The record shown on the detail screen.
  pub fn selected_record(&self) -> Option<&Institution> {
    let id = self.selected_id.as_deref()?;
    self.store.records().iter().find(|r| r.id() == id)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.pending_delete.is_some() {
      self.handle_confirm_key(key);
      return Ok(true);
    }
    if self.form.is_some() {
      self.handle_form_key(key);
      return Ok(true);
    }
    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Tab => self.cycle_sidebar(1),
      KeyCode::BackTab => self.cycle_sidebar(-1),
      KeyCode::Char(c @ '0'..='5') => {
        let index = c as usize - '0' as usize;
        if let Some(screen) = sidebar().nth(index) {
          self.go_to(screen);
        }
      }
      KeyCode::Char('a') => self.open_add(),
      KeyCode::Char('x') => self.export(ExportFormat::Excel),
      KeyCode::Char('p') => self.export(ExportFormat::Pdf),
      _ => match self.screen {
        Screen::Dashboard => {}
        Screen::List(_) => self.handle_list_key(key),
        Screen::Detail(_) => self.handle_detail_key(key),
      },
    }
    Ok(true)
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        // Open the detail straight away when exactly one record matches.
        let only = match self.filtered_records().as_slice() {
          [only] => Some(only.id().to_owned()),
          _ => None,
        };
        if let Some(id) = only {
          self.open_detail(id);
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  fn handle_list_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_records().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_record().map(|r| r.id().to_owned()) {
          self.open_detail(id);
        }
      }
      KeyCode::Char('e') => {
        if let Some(id) = self.cursor_record().map(|r| r.id().to_owned()) {
          self.open_edit(&id);
        }
      }
      KeyCode::Char('d') => {
        if let Some(id) = self.cursor_record().map(|r| r.id().to_owned()) {
          self.pending_delete = Some(id);
        }
      }
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  fn handle_detail_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => self.close_detail(),
      KeyCode::Down | KeyCode::Char('j') => self.detail_scroll += 1,
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }
      KeyCode::Char('e') => {
        if let Some(id) = self.selected_id.clone() {
          self.open_edit(&id);
        }
      }
      KeyCode::Char('d') => self.pending_delete = self.selected_id.clone(),
      _ => {}
    }
  }

  fn handle_confirm_key(&mut self, key: KeyEvent) {
    let Some(id) = self.pending_delete.take() else {
      return;
    };
    match key.code {
      KeyCode::Char('y') | KeyCode::Char('Y') => self.delete(&id),
      KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
        tracing::debug!(id, "delete declined");
      }
      // Anything else leaves the prompt up.
      _ => self.pending_delete = Some(id),
    }
  }

  fn handle_form_key(&mut self, key: KeyEvent) {
    let Some(form) = self.form.as_mut() else {
      return;
    };

    if let Some(buffer) = form.input.as_mut() {
      match key.code {
        KeyCode::Esc => form.input = None,
        KeyCode::Backspace => {
          buffer.pop();
        }
        KeyCode::Char(c) => buffer.push(c),
        KeyCode::Enter => {
          let raw = form.input.take().unwrap_or_default();
          if let Some(FormItem::Input { path, .. }) = form.selected() {
            match form.editor.update_input(&path, &raw) {
              Ok(()) => self.status_msg.clear(),
              Err(e) => {
                self.status_msg = format!("Error: {e}");
                form.input = Some(raw);
              }
            }
          }
        }
        _ => {}
      }
      return;
    }

    match key.code {
      KeyCode::Esc => self.close_form(),
      KeyCode::Char('s') => self.save_form(),
      KeyCode::Tab | KeyCode::Right => form.switch_tab(form.tab.next()),
      KeyCode::BackTab | KeyCode::Left => form.switch_tab(form.tab.prev()),
      KeyCode::Down | KeyCode::Char('j') => {
        if form.cursor + 1 < form.items().len() {
          form.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => form.cursor = form.cursor.saturating_sub(1),
      KeyCode::Enter | KeyCode::Char(' ') => match form.selected() {
        Some(FormItem::Input { path, .. }) => {
          let current = form.editor.value(&path).map(|v| v.to_string());
          match current {
            Ok(text) => form.input = Some(text),
            Err(e) => self.status_msg = format!("Error: {e}"),
          }
        }
        Some(FormItem::Facility(label)) => form.editor.toggle_facility(label),
        None => {}
      },
      _ => {}
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  fn go_to(&mut self, screen: Screen) {
    self.screen = screen;
    self.filter.clear();
    self.filter_active = false;
    self.list_cursor = 0;
    self.selected_id = None;
    self.status_msg.clear();
  }

  fn cycle_sidebar(&mut self, step: isize) {
    let entries: Vec<Screen> = sidebar().collect();
    let current = match self.screen {
      Screen::Detail(kind) => Screen::List(kind),
      other => other,
    };
    let index = entries.iter().position(|s| *s == current).unwrap_or(0);
    let next = (index as isize + step).rem_euclid(entries.len() as isize) as usize;
    self.go_to(entries[next]);
  }

  fn open_detail(&mut self, id: String) {
    if let Some(kind) = self.screen.kind() {
      self.selected_id = Some(id);
      self.detail_scroll = 0;
      self.screen = Screen::Detail(kind);
    }
  }

  fn close_detail(&mut self) {
    if let Screen::Detail(kind) = self.screen {
      self.screen = Screen::List(kind);
    }
    self.selected_id = None;
  }

  /// "Tambah Lembaga": a blank record of the current type, PONPES on the
  /// dashboard.
  fn open_add(&mut self) {
    let kind = self.screen.kind().unwrap_or(InstitutionType::Ponpes);
    match Editor::for_new(&self.store, kind) {
      Ok(editor) => {
        tracing::info!(%kind, "add form opened");
        self.form = Some(FormState::new(editor));
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  /// "Edit Data".
  fn open_edit(&mut self, id: &str) {
    match Editor::for_existing(&self.store, id) {
      Ok(Some(editor)) => {
        tracing::info!(id, "edit form opened");
        self.form = Some(FormState::new(editor));
      }
      Ok(None) => self.status_msg = format!("Error: no record with id {id}"),
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  /// "Simpan Data": replace the stored record with the working copy.
  fn save_form(&mut self) {
    let Some(form) = self.form.as_ref() else {
      return;
    };
    match form.editor.commit(&mut self.store) {
      Ok(saved) => {
        self.status_msg = format!("Tersimpan: {}", saved.name());
        self.form = None;
        self.refresh();
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  /// "Batal": drop the working copy.
  fn close_form(&mut self) {
    if let Some(form) = self.form.take() {
      form.editor.cancel();
    }
  }

  fn delete(&mut self, id: &str) {
    match self.store.delete(id) {
      Ok(true) => {
        tracing::info!(id, "record deleted");
        self.status_msg = "Data dihapus".into();
        if self.selected_id.as_deref() == Some(id) {
          self.close_detail();
        }
        self.refresh();
      }
      Ok(false) => self.status_msg = format!("Error: no record with id {id}"),
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  fn export(&mut self, format: ExportFormat) {
    tracing::info!(?format, "export requested");
    self.status_msg = format.notice().into();
  }
}

#[cfg(test)]
mod tests {
  use pontren_core::seed;

  use super::*;

  fn app() -> App {
    App::new(MemoryStore::from_records(seed::mock_data()).unwrap())
  }

  fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
  }

  fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
      press(app, KeyCode::Char(c));
    }
  }

  // ─── Navigation ─────────────────────────────────────────────────────────────

  #[test]
  fn tab_walks_the_sidebar() {
    let mut app = app();
    assert_eq!(app.screen, Screen::Dashboard);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.screen, Screen::List(InstitutionType::Ponpes));
    press(&mut app, KeyCode::BackTab);
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.screen, Screen::List(InstitutionType::Paudqu));
    press(&mut app, KeyCode::Char('0'));
    assert_eq!(app.screen.heading(), "Statistik Sektoral");
  }

  #[test]
  fn enter_opens_detail_and_esc_returns() {
    let mut app = app();
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.screen, Screen::Detail(InstitutionType::Ponpes));
    assert_eq!(app.selected_record().unwrap().id(), "1");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.screen, Screen::List(InstitutionType::Ponpes));
  }

  #[test]
  fn filter_narrows_the_list() {
    let mut app = app();
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Char('/'));
    type_str(&mut app, "zzzz");
    assert!(app.filtered_records().is_empty());
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.filtered_records().len(), 1);
  }

  // ─── Add / edit ─────────────────────────────────────────────────────────────

  #[test]
  fn add_from_dashboard_defaults_to_ponpes() {
    let mut app = app();
    press(&mut app, KeyCode::Char('a'));
    let form = app.form.as_ref().unwrap();
    assert_eq!(form.editor.kind(), InstitutionType::Ponpes);
    assert_eq!(form.editor.title(), "Tambah Lembaga Baru");
  }

  #[test]
  fn add_and_save_updates_store_and_stats() {
    let mut app = app();
    press(&mut app, KeyCode::Char('2'));
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.form.as_ref().unwrap().editor.kind(), InstitutionType::Tpq);

    // The first input on the first tab is the name.
    press(&mut app, KeyCode::Enter);
    type_str(&mut app, "TPQ Nurul Iman");
    press(&mut app, KeyCode::Enter);

    app
      .form
      .as_mut()
      .unwrap()
      .editor
      .update_field("stats.totalStudents", 40u32)
      .unwrap();
    press(&mut app, KeyCode::Char('s'));

    assert!(app.form.is_none());
    assert_eq!(app.store.len(), 2);
    assert_eq!(app.stats.students, 1290);
    assert_eq!(app.stats.count(InstitutionType::Tpq), 1);
    assert_eq!(app.filtered_records()[0].name(), "TPQ Nurul Iman");
  }

  #[test]
  fn bad_number_input_is_reported_and_kept() {
    let mut app = app();
    press(&mut app, KeyCode::Char('a'));
    // Ninth item on the first tab: total students.
    for _ in 0..8 {
      press(&mut app, KeyCode::Down);
    }
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Backspace);
    type_str(&mut app, "abc");
    press(&mut app, KeyCode::Enter);
    assert!(app.status_msg.starts_with("Error:"));
    let form = app.form.as_ref().unwrap();
    assert_eq!(form.input.as_deref(), Some("abc"));
    assert!(!form.editor.is_dirty());
  }

  #[test]
  fn cancel_leaves_store_untouched() {
    let mut app = app();
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Char('e'));
    app
      .form
      .as_mut()
      .unwrap()
      .editor
      .update_field("basic.name", "Diubah")
      .unwrap();
    press(&mut app, KeyCode::Esc);
    assert!(app.form.is_none());
    assert_eq!(app.store.records()[0].name(), "Pondok Pesantren Sultan Hasanuddin");
  }

  #[test]
  fn facility_checkbox_toggles_on_community_form() {
    let mut app = app();
    press(&mut app, KeyCode::Char('3'));
    press(&mut app, KeyCode::Char('a'));
    for _ in 0..4 {
      press(&mut app, KeyCode::Tab);
    }
    let form = app.form.as_ref().unwrap();
    assert_eq!(form.tab, FormTab::Facilities);
    assert_eq!(form.items()[0], FormItem::Facility("Kantor"));
    press(&mut app, KeyCode::Char(' '));
    assert!(app.form.as_ref().unwrap().editor.has_facility("Kantor"));
  }

  // ─── Delete ─────────────────────────────────────────────────────────────────

  #[test]
  fn declining_delete_changes_nothing() {
    let mut app = app();
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.pending_delete.as_deref(), Some("1"));
    press(&mut app, KeyCode::Char('n'));
    assert!(app.pending_delete.is_none());
    assert_eq!(app.store.len(), 1);
    assert_eq!(app.stats.total, 1);
  }

  #[test]
  fn confirming_delete_removes_and_recomputes() {
    let mut app = app();
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    assert!(app.store.is_empty());
    assert_eq!(app.stats.total, 0);
    assert_eq!(app.screen, Screen::List(InstitutionType::Ponpes));
  }

  // ─── Export ─────────────────────────────────────────────────────────────────

  #[test]
  fn export_only_shows_a_notice() {
    let mut app = app();
    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.status_msg, "Mengekspor ke Excel...");
    press(&mut app, KeyCode::Char('p'));
    assert_eq!(app.status_msg, "Mengekspor ke PDF...");
    assert_eq!(app.store.len(), 1);
  }

  #[test]
  fn q_quits() {
    let mut app = app();
    assert!(!press(&mut app, KeyCode::Char('q')));
  }
}
