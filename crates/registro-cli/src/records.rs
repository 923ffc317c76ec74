//! Client-side record state: the full list fetched from the server and the
//! filtered/sorted view derived from it.
//!
//! Everything here is synchronous and free of I/O. The full list is only ever
//! replaced wholesale by [`Records::replace`]; the view is recomputed from it
//! and never written back.

use registro_core::{Gender, PersonRow};

// ─── Sort order ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
  /// Highest id first.
  #[default]
  Recent,
  /// Lowest id first.
  Oldest,
  /// Oldest person first.
  Age,
  /// Keep the order the rows arrived in.
  AsLoaded,
}

impl SortOrder {
  /// Parse a selector key. Unknown keys keep the loaded order.
  pub fn from_key(key: &str) -> Self {
    match key {
      "reciente" => SortOrder::Recent,
      "antiguo" => SortOrder::Oldest,
      "edad" => SortOrder::Age,
      _ => SortOrder::AsLoaded,
    }
  }

  pub fn key(self) -> &'static str {
    match self {
      SortOrder::Recent => "reciente",
      SortOrder::Oldest => "antiguo",
      SortOrder::Age => "edad",
      SortOrder::AsLoaded => "",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      SortOrder::Recent => "Más recientes",
      SortOrder::Oldest => "Más antiguos",
      SortOrder::Age => "Mayor edad",
      SortOrder::AsLoaded => "Sin orden",
    }
  }

  /// The selector cycles through the three named orders.
  pub fn next(self) -> Self {
    match self {
      SortOrder::Recent => SortOrder::Oldest,
      SortOrder::Oldest => SortOrder::Age,
      SortOrder::Age | SortOrder::AsLoaded => SortOrder::Recent,
    }
  }
}

// ─── Filters ──────────────────────────────────────────────────────────────────

/// The current filter selection. Empty/`None` criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
  /// Case-insensitive substring of `nombre` or `apellido`.
  pub nombre:   String,
  pub genero:   Option<Gender>,
  pub distrito: Option<String>,
  pub order:    SortOrder,
}

impl Filters {
  pub fn matches(&self, row: &PersonRow) -> bool { self.matches_with(&self.nombre.to_lowercase(), row) }

  /// `needle` is `self.nombre`, already lowercased.
  fn matches_with(&self, needle: &str, row: &PersonRow) -> bool {
    let name_ok = needle.is_empty()
      || row.nombre.to_lowercase().contains(needle)
      || row.apellido.to_lowercase().contains(needle);
    name_ok
      && self.genero.is_none_or(|g| row.genero == g)
      && self.distrito.as_deref().is_none_or(|d| row.distrito == d)
  }
}

/// Filter `all` by `filters`, then sort. Sorting is stable, so ties keep their
/// relative order from `all`.
pub fn apply_filters(all: &[PersonRow], filters: &Filters) -> Vec<PersonRow> {
  let needle = filters.nombre.to_lowercase();
  let mut visible: Vec<PersonRow> = all
    .iter()
    .filter(|row| filters.matches_with(&needle, row))
    .cloned()
    .collect();

  match filters.order {
    SortOrder::Recent => visible.sort_by(|a, b| b.id.cmp(&a.id)),
    SortOrder::Oldest => visible.sort_by(|a, b| a.id.cmp(&b.id)),
    SortOrder::Age => visible.sort_by(|a, b| b.edad.cmp(&a.edad)),
    SortOrder::AsLoaded => {}
  }
  visible
}

// ─── Records ──────────────────────────────────────────────────────────────────

/// The client's copy of the server's rows plus the derived view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Records {
  all:     Vec<PersonRow>,
  visible: Vec<PersonRow>,
}

impl Records {
  pub fn all(&self) -> &[PersonRow] { &self.all }

  pub fn visible(&self) -> &[PersonRow] { &self.visible }

  /// Replace the full list with a fresh server copy and recompute the view.
  pub fn replace(&mut self, rows: Vec<PersonRow>, filters: &Filters) {
    self.all = rows;
    self.refilter(filters);
  }

  /// Recompute the view from the unchanged full list.
  pub fn refilter(&mut self, filters: &Filters) { self.visible = apply_filters(&self.all, filters); }

  /// Look a record up in the full list (not just the view).
  pub fn find(&self, id: i64) -> Option<&PersonRow> { self.all.iter().find(|r| r.id == id) }
}
