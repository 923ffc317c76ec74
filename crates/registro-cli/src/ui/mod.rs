//! TUI rendering: orchestrates all panes.

pub mod form;
pub mod table;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::{
  app::{App, Screen},
  notice::NoticeKind,
};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, filter bar, table, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(1), // filters
      Constraint::Min(0),    // table
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_filters(f, rows[1], app);
  table::draw(f, rows[2], app);
  draw_status(f, rows[3], app);

  if app.screen == Screen::Form {
    form::draw(f, area, &app.form);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%d/%m/%Y").to_string();

  let left = Span::styled(
    " Registro de Personas",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let count = Span::styled(
    format!("  {} registros", app.records.visible().len()),
    Style::default().fg(Color::Cyan),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let used = left.width() + count.width() + right.width();
  let pad = usize::from(area.width).saturating_sub(used);

  let line = Line::from(vec![left, count, Span::raw(" ".repeat(pad)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Filter bar ───────────────────────────────────────────────────────────────

fn draw_filters(f: &mut Frame, area: Rect, app: &App) {
  let filters = &app.filters;
  let label = Style::default().fg(Color::DarkGray);
  let value = Style::default().fg(Color::Yellow);

  let search = if app.screen == Screen::Search {
    format!("{}_", filters.nombre)
  } else if filters.nombre.is_empty() {
    "todos".to_string()
  } else {
    filters.nombre.clone()
  };
  let genero = filters.genero.map_or("todos", |g| g.label());
  let distrito = filters.distrito.as_deref().unwrap_or("todos");

  let line = Line::from(vec![
    Span::styled(" Buscar: ", label),
    Span::styled(search, value),
    Span::styled("  Género: ", label),
    Span::styled(genero, value),
    Span::styled("  Distrito: ", label),
    Span::styled(distrito, value),
    Span::styled("  Orden: ", label),
    Span::styled(filters.order.label(), value),
  ]);
  f.render_widget(Paragraph::new(line), area);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  if let Some(notice) = app.notices.latest() {
    let bg = match notice.kind {
      NoticeKind::Success => Color::Green,
      NoticeKind::Error => Color::Red,
    };
    let line = Line::from(Span::styled(
      format!(" {} ", notice.text),
      Style::default()
        .fg(Color::White)
        .bg(bg)
        .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
    return;
  }

  let (mode_label, hints) = match &app.screen {
    Screen::Table => (
      "NORMAL",
      "↑↓/jk mover  / buscar  g género  d/D distrito  o orden  c limpiar  n nuevo  e editar  x eliminar  r recargar  q salir",
    ),
    Screen::Search => ("BUSCAR", "Escribe para filtrar  Enter aceptar  Esc limpiar"),
    Screen::Form => ("FORM", "Tab/↑↓ campo  ←→ opción  Enter guardar  Esc cancelar"),
    Screen::ConfirmDelete(_) => (
      "ELIMINAR",
      "¿Seguro que deseas eliminar este registro?  s sí  cualquier otra tecla cancela",
    ),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {hints}"), Style::default().fg(Color::DarkGray));

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
