//! Pure projection of visible records into the table view model.

use registro_core::{Gender, PersonRow};

/// Column headers, in display order.
pub const HEADERS: [&str; 7] = ["ID", "Nombre", "Género", "Edad", "Ocupación", "Distrito", "Registro"];

/// Shown in place of the table when there is nothing to list.
pub const EMPTY_MESSAGE: &str = "No hay personas registradas";

/// One table row, every cell already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
  pub id:        i64,
  pub cells:     [String; 7],
  pub is_female: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
  Empty,
  Rows(Vec<RowView>),
}

pub fn project(rows: &[PersonRow]) -> TableView {
  if rows.is_empty() {
    return TableView::Empty;
  }
  TableView::Rows(rows.iter().map(row_view).collect())
}

fn row_view(row: &PersonRow) -> RowView {
  RowView {
    id:        row.id,
    cells:     [
      format!("#{}", row.id),
      format!("{} {}", row.nombre, row.apellido),
      gender_cell(row.genero),
      format!("{} años", row.edad),
      row.ocupacion.clone(),
      format!("📍 {}", row.distrito),
      row.fecha_creado.clone(),
    ],
    is_female: row.genero == Gender::F,
  }
}

fn gender_cell(genero: Gender) -> String {
  let icon = match genero {
    Gender::M => "👨",
    Gender::F => "👩",
  };
  format!("{icon} {}", genero.label())
}
