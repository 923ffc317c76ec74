//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use registro_core::{Envelope, Gender, PersonRow, district::DISTRICTS};

use crate::{
  client::{ApiClient, ClientError},
  form::PersonForm,
  notice::Notices,
  records::{Filters, Records},
};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Browsing the table.
  Table,
  /// Typing into the name filter.
  Search,
  /// The create/edit modal is open.
  Form,
  /// Waiting for the user to confirm deleting this id.
  ConfirmDelete(i64),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Server rows and the filtered view.
  pub records: Records,

  pub filters: Filters,

  /// Modal form contents. Reset whenever the modal closes.
  pub form: PersonForm,

  /// Cursor position within the *visible* rows.
  pub cursor: usize,

  /// A `GET /list` is in flight.
  pub loading: bool,

  /// The event loop should reload before reading the next key.
  pub pending_load: bool,

  pub notices: Notices,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  /// Create an [`App`] with no records and an initial load queued.
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::Table,
      records: Records::default(),
      filters: Filters::default(),
      form: PersonForm::create(),
      cursor: 0,
      loading: false,
      pending_load: true,
      notices: Notices::default(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  pub fn begin_load(&mut self) {
    self.pending_load = false;
    self.loading = true;
  }

  /// Apply the outcome of a `GET /list`. Clears the loading flag either way.
  pub fn finish_load(&mut self, result: Result<Vec<PersonRow>, ClientError>) {
    self.loading = false;
    match result {
      Ok(rows) => {
        tracing::debug!(count = rows.len(), "records loaded");
        self.records.replace(rows, &self.filters);
        self.clamp_cursor();
      }
      Err(e) => {
        tracing::warn!(error = %e, "load failed");
        self.notices.error(e.to_string());
      }
    }
  }

  /// Fetch the full list from the server and replace the local copy.
  pub async fn load(&mut self) {
    self.begin_load();
    let result = self.client.list_people().await;
    self.finish_load(result);
  }

  // ── Filtering ─────────────────────────────────────────────────────────────

  fn refilter(&mut self) {
    self.records.refilter(&self.filters);
    self.clamp_cursor();
  }

  fn clamp_cursor(&mut self) {
    self.cursor = self.cursor.min(self.records.visible().len().saturating_sub(1));
  }

  /// The row under the cursor, if any.
  pub fn selected(&self) -> Option<&PersonRow> { self.records.visible().get(self.cursor) }

  fn cycle_gender_filter(&mut self) {
    self.filters.genero = match self.filters.genero {
      None => Some(Gender::M),
      Some(Gender::M) => Some(Gender::F),
      Some(Gender::F) => None,
    };
    self.refilter();
  }

  /// Step through "all districts" followed by the fixed list.
  fn cycle_district_filter(&mut self, forward: bool) {
    let current = self
      .filters
      .distrito
      .as_deref()
      .and_then(registro_core::district::position);
    let next = match (current, forward) {
      (None, true) => Some(0),
      (None, false) => Some(DISTRICTS.len() - 1),
      (Some(i), true) => (i + 1 < DISTRICTS.len()).then_some(i + 1),
      (Some(i), false) => i.checked_sub(1),
    };
    self.filters.distrito = next.map(|i| DISTRICTS[i].to_owned());
    self.refilter();
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.screen {
      Screen::Table => return self.handle_table_key(key),
      Screen::Search => self.handle_search_key(key),
      Screen::Form => self.handle_form_key(key).await,
      Screen::ConfirmDelete(id) => self.handle_confirm_key(key, id).await,
    }
    true
  }

  fn handle_table_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.records.visible().len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }

      // Filters
      KeyCode::Char('/') => self.screen = Screen::Search,
      KeyCode::Char('g') => self.cycle_gender_filter(),
      KeyCode::Char('d') => self.cycle_district_filter(true),
      KeyCode::Char('D') => self.cycle_district_filter(false),
      KeyCode::Char('o') => {
        self.filters.order = self.filters.order.next();
        self.refilter();
      }
      KeyCode::Char('c') => {
        self.filters = Filters::default();
        self.refilter();
      }

      // Records
      KeyCode::Char('n') => {
        self.form = PersonForm::create();
        self.screen = Screen::Form;
      }
      KeyCode::Char('e') | KeyCode::Enter => {
        if let Some(id) = self.selected().map(|r| r.id) {
          self.open_edit(id);
        }
      }
      KeyCode::Char('x') | KeyCode::Delete => {
        if let Some(id) = self.selected().map(|r| r.id) {
          self.screen = Screen::ConfirmDelete(id);
        }
      }
      KeyCode::Char('r') => self.pending_load = true,

      _ => {}
    }
    true
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filters.nombre.clear();
        self.screen = Screen::Table;
      }
      KeyCode::Enter => self.screen = Screen::Table,
      KeyCode::Backspace => {
        self.filters.nombre.pop();
      }
      KeyCode::Char(c) => self.filters.nombre.push(c),
      _ => return,
    }
    self.cursor = 0;
    self.refilter();
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.close_form(),
      KeyCode::Enter => self.submit_form().await,
      KeyCode::Tab | KeyCode::Down => self.form.next_field(),
      KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
      KeyCode::Right => self.form.cycle(true),
      KeyCode::Left => self.form.cycle(false),
      KeyCode::Backspace => self.form.pop_char(),
      KeyCode::Char(c) => self.form.push_char(c),
      _ => {}
    }
  }

  async fn handle_confirm_key(&mut self, key: KeyEvent, id: i64) {
    self.screen = Screen::Table;
    if matches!(key.code, KeyCode::Char('s' | 'S' | 'y' | 'Y')) {
      self.delete(id).await;
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  /// Open the modal pre-filled with record `id` from the full list.
  pub fn open_edit(&mut self, id: i64) {
    match self.records.find(id) {
      Some(row) => {
        self.form = PersonForm::edit(row);
        self.screen = Screen::Form;
      }
      None => self.notices.error("Persona no encontrada"),
    }
  }

  fn close_form(&mut self) {
    self.form = PersonForm::create();
    self.screen = Screen::Table;
  }

  async fn submit_form(&mut self) {
    let input = match self.form.to_input() {
      Ok(input) => input,
      Err(msg) => {
        self.notices.error(msg);
        return;
      }
    };

    let result = self.client.save_person(&input).await;
    if self.apply_outcome(result, "Error desconocido") {
      self.close_form();
    }
  }

  async fn delete(&mut self, id: i64) {
    let result = self.client.delete_person(id).await;
    self.apply_outcome(result, "Error al eliminar");
  }

  /// Turn a mutation's envelope into a notice. Success queues a reload.
  fn apply_outcome(&mut self, result: Result<Envelope, ClientError>, fallback: &str) -> bool {
    match result {
      Ok(env) if env.exito => {
        tracing::info!(mensaje = %env.mensaje, "mutation succeeded");
        self.notices.success(env.mensaje);
        self.pending_load = true;
        true
      }
      Ok(env) => {
        let msg = if env.mensaje.is_empty() { fallback.to_owned() } else { env.mensaje };
        self.notices.error(msg);
        false
      }
      Err(e) => {
        tracing::warn!(error = %e, "mutation failed");
        self.notices.error(e.to_string());
        false
      }
    }
  }
}
