//! Records table, the main panel.

use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::{
  app::App,
  view::{self, EMPTY_MESSAGE, HEADERS, TableView},
};

const WIDTHS: [Constraint; 7] = [
  Constraint::Length(6),
  Constraint::Min(18),
  Constraint::Length(13),
  Constraint::Length(8),
  Constraint::Min(12),
  Constraint::Min(16),
  Constraint::Length(11),
];

/// Render the visible records into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let total = app.records.all().len();
  let shown = app.records.visible().len();

  // Title with count.
  let title = if shown == total {
    format!(" Personas ({total}) ")
  } else {
    format!(" Personas ({shown}/{total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if app.loading {
    draw_message(f, area, block, "Cargando…");
    return;
  }

  let rows = match view::project(app.records.visible()) {
    TableView::Empty => {
      draw_message(f, area, block, EMPTY_MESSAGE);
      return;
    }
    TableView::Rows(rows) => rows,
  };

  let header = Row::new(HEADERS.map(Cell::from)).style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );

  let body = rows.into_iter().map(|row| {
    let style = if row.is_female {
      Style::default().fg(Color::Magenta)
    } else {
      Style::default()
    };
    Row::new(row.cells.map(Cell::from)).style(style)
  });

  let mut state = TableState::default();
  state.select(Some(app.cursor));

  f.render_stateful_widget(
    Table::new(body, WIDTHS)
      .header(header)
      .block(block)
      .row_highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    area,
    &mut state,
  );
}

fn draw_message(f: &mut Frame, area: Rect, block: Block, text: &str) {
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(text))
      .alignment(Alignment::Center)
      .style(Style::default().fg(Color::DarkGray)),
    inner,
  );
}
