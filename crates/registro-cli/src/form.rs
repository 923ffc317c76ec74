//! The create/edit modal form and its pre-submit checks.

use registro_core::{
  Gender, PersonInput, PersonRow, ValidationError,
  district::{self, DISTRICTS},
  lenient::parse_int_prefix,
  validate::{MAX_AGE, MIN_AGE},
};

// ─── Field ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Field {
  #[default]
  Nombre,
  Apellido,
  Edad,
  Genero,
  Ocupacion,
  Distrito,
}

impl Field {
  pub const ALL: [Field; 6] = [
    Field::Nombre,
    Field::Apellido,
    Field::Edad,
    Field::Genero,
    Field::Ocupacion,
    Field::Distrito,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Field::Nombre => "Nombre",
      Field::Apellido => "Apellido",
      Field::Edad => "Edad",
      Field::Genero => "Género",
      Field::Ocupacion => "Ocupación",
      Field::Distrito => "Distrito",
    }
  }

  /// Choice fields are changed with ←/→ instead of typed into.
  pub fn is_choice(self) -> bool { matches!(self, Field::Genero | Field::Distrito) }

  fn index(self) -> usize { Field::ALL.iter().position(|f| *f == self).unwrap_or(0) }
}

// ─── Form ─────────────────────────────────────────────────────────────────────

/// Modal form state. `editing` is `None` when creating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonForm {
  pub editing:   Option<i64>,
  pub nombre:    String,
  pub apellido:  String,
  pub edad:      String,
  pub genero:    Gender,
  pub ocupacion: String,
  /// Empty until a district is picked.
  pub distrito:  String,
  pub focus:     Field,
}

impl PersonForm {
  /// A blank form for a new person.
  pub fn create() -> Self { Self::default() }

  /// A form pre-filled from an existing record.
  pub fn edit(row: &PersonRow) -> Self {
    Self {
      editing:   Some(row.id),
      nombre:    row.nombre.clone(),
      apellido:  row.apellido.clone(),
      edad:      row.edad.to_string(),
      genero:    row.genero,
      ocupacion: row.ocupacion.clone(),
      distrito:  row.distrito.clone(),
      focus:     Field::Nombre,
    }
  }

  pub fn title(&self) -> &'static str {
    if self.editing.is_some() { " ✏️ Editar Persona " } else { " ➕ Registrar Nueva Persona " }
  }

  /// Display text for `field`.
  pub fn value(&self, field: Field) -> String {
    match field {
      Field::Nombre => self.nombre.clone(),
      Field::Apellido => self.apellido.clone(),
      Field::Edad => self.edad.clone(),
      Field::Genero => format!("◀ {} ▶", self.genero.label()),
      Field::Ocupacion => self.ocupacion.clone(),
      Field::Distrito if self.distrito.is_empty() => "◀ Selecciona un distrito ▶".into(),
      Field::Distrito => format!("◀ {} ▶", self.distrito),
    }
  }

  // ── Editing ───────────────────────────────────────────────────────────────

  pub fn next_field(&mut self) {
    self.focus = Field::ALL[(self.focus.index() + 1) % Field::ALL.len()];
  }

  pub fn prev_field(&mut self) {
    let len = Field::ALL.len();
    self.focus = Field::ALL[(self.focus.index() + len - 1) % len];
  }

  /// Type `c` into the focused text field. `edad` only takes digits.
  pub fn push_char(&mut self, c: char) {
    match self.focus {
      Field::Nombre => self.nombre.push(c),
      Field::Apellido => self.apellido.push(c),
      Field::Edad if c.is_ascii_digit() && self.edad.len() < 3 => self.edad.push(c),
      Field::Ocupacion => self.ocupacion.push(c),
      _ => {}
    }
  }

  pub fn pop_char(&mut self) {
    let target = match self.focus {
      Field::Nombre => &mut self.nombre,
      Field::Apellido => &mut self.apellido,
      Field::Edad => &mut self.edad,
      Field::Ocupacion => &mut self.ocupacion,
      Field::Genero | Field::Distrito => return,
    };
    target.pop();
  }

  /// Step the focused choice field forwards or backwards.
  pub fn cycle(&mut self, forward: bool) {
    match self.focus {
      Field::Genero => {
        self.genero = match self.genero {
          Gender::M => Gender::F,
          Gender::F => Gender::M,
        };
      }
      Field::Distrito => {
        let len = DISTRICTS.len();
        let next = match (district::position(&self.distrito), forward) {
          (Some(i), true) => (i + 1) % len,
          (Some(i), false) => (i + len - 1) % len,
          (None, true) => 0,
          (None, false) => len - 1,
        };
        self.distrito = DISTRICTS[next].to_owned();
      }
      _ => {}
    }
  }

  // ── Submission ────────────────────────────────────────────────────────────

  /// Check the form before it is sent and build the request body.
  ///
  /// The error is the notification text.
  pub fn to_input(&self) -> Result<PersonInput, String> {
    let nombre = self.nombre.trim();
    let apellido = self.apellido.trim();
    if nombre.is_empty() || apellido.is_empty() {
      return Err("Nombre y apellido son requeridos".into());
    }

    let edad = parse_int_prefix(self.edad.trim());
    if !(MIN_AGE..=MAX_AGE).contains(&edad) {
      return Err(ValidationError::OutOfRange(edad).to_string());
    }

    let ocupacion = self.ocupacion.trim();
    if ocupacion.is_empty() || self.distrito.is_empty() {
      return Err("Ocupación y distrito son requeridos".into());
    }

    Ok(PersonInput {
      id: self.editing.unwrap_or(0),
      nombre: Some(nombre.to_owned()),
      apellido: Some(apellido.to_owned()),
      edad,
      genero: Some(self.genero.as_str().to_owned()),
      ocupacion: Some(ocupacion.to_owned()),
      distrito: Some(self.distrito.clone()),
    })
  }
}

#[cfg(test)]
mod tests {
  use registro_core::validate::validate;

  use super::*;

  fn filled() -> PersonForm {
    PersonForm {
      nombre: " Juan ".into(),
      apellido: "Pérez".into(),
      edad: "28".into(),
      ocupacion: "Trabaja".into(),
      distrito: "Los Olivos".into(),
      ..PersonForm::create()
    }
  }

  #[test]
  fn filled_form_passes_server_validation() {
    let input = filled().to_input().unwrap();
    assert_eq!(input.id, 0);
    assert_eq!(input.nombre.as_deref(), Some("Juan"));
    let validated = validate(&input).unwrap();
    assert_eq!(validated.target, None);
    assert_eq!(validated.fields.edad, 28);
  }

  #[test]
  fn names_are_checked_first() {
    let form = PersonForm { apellido: "  ".into(), edad: String::new(), ..filled() };
    assert_eq!(form.to_input().unwrap_err(), "Nombre y apellido son requeridos");
  }

  #[test]
  fn age_bounds() {
    for (edad, ok) in [("17", false), ("18", true), ("99", true), ("100", false), ("", false)] {
      let form = PersonForm { edad: edad.into(), ..filled() };
      match form.to_input() {
        Ok(_) => assert!(ok, "{edad} should be rejected"),
        Err(msg) => {
          assert!(!ok, "{edad} should be accepted");
          assert_eq!(msg, "La edad debe estar entre 18 y 99 años");
        }
      }
    }
  }

  #[test]
  fn occupation_and_district_are_required_client_side() {
    let form = PersonForm { distrito: String::new(), ..filled() };
    assert_eq!(form.to_input().unwrap_err(), "Ocupación y distrito son requeridos");

    let form = PersonForm { ocupacion: " ".into(), ..filled() };
    assert_eq!(form.to_input().unwrap_err(), "Ocupación y distrito son requeridos");
  }

  #[test]
  fn edit_prefills_and_keeps_the_id() {
    let row = PersonRow {
      id:           5,
      nombre:       "Ana".into(),
      apellido:     "Torres".into(),
      edad:         33,
      genero:       Gender::F,
      ocupacion:    "Estudia".into(),
      distrito:     "Lince".into(),
      fecha_creado: "01/01/2024".into(),
    };
    let form = PersonForm::edit(&row);
    assert_eq!(form.title(), " ✏️ Editar Persona ");
    let input = form.to_input().unwrap();
    assert_eq!(input, PersonInput::from(&row));
  }

  #[test]
  fn edad_only_takes_digits() {
    let mut form = PersonForm { focus: Field::Edad, ..PersonForm::create() };
    for c in "4x2-".chars() {
      form.push_char(c);
    }
    assert_eq!(form.edad, "42");
    form.pop_char();
    assert_eq!(form.edad, "4");
  }

  #[test]
  fn focus_wraps_both_ways() {
    let mut form = PersonForm::create();
    form.prev_field();
    assert_eq!(form.focus, Field::Distrito);
    form.next_field();
    assert_eq!(form.focus, Field::Nombre);
  }

  #[test]
  fn district_cycles_through_the_fixed_list() {
    let mut form = PersonForm { focus: Field::Distrito, ..PersonForm::create() };
    form.cycle(true);
    assert_eq!(form.distrito, DISTRICTS[0]);
    form.cycle(false);
    assert_eq!(form.distrito, DISTRICTS[DISTRICTS.len() - 1]);

    form.focus = Field::Genero;
    form.cycle(true);
    assert_eq!(form.genero, Gender::F);
  }
}
