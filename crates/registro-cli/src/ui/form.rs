//! Create/edit modal, drawn over the table.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::form::{Field, PersonForm};

const WIDTH: u16 = 56;

pub fn draw(f: &mut Frame, area: Rect, form: &PersonForm) {
  let height = u16::try_from(Field::ALL.len()).unwrap_or(6) + 4;
  let modal = centered(area, WIDTH, height);

  let block = Block::default()
    .title(form.title())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(modal);
  f.render_widget(Clear, modal);
  f.render_widget(block, modal);

  let mut lines: Vec<Line> = Field::ALL
    .iter()
    .map(|&field| {
      let focused = field == form.focus;
      let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      let mut value = form.value(field);
      if focused && !field.is_choice() {
        value.push('_');
      }
      Line::from(vec![
        Span::styled(format!(" {:<10} ", field.label()), label_style),
        Span::raw(value),
      ])
    })
    .collect();

  lines.push(Line::default());
  lines.push(Line::from(Span::styled(
    " Enter guardar · Esc cancelar",
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(Paragraph::new(lines), inner);
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}
