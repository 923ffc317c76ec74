//! Integration tests for `SqliteStore` against an in-memory database.

use registro_core::{Gender, PersonFields, PersonId, service, store::PersonStore};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn fields(nombre: &str, edad: u8) -> PersonFields {
  PersonFields {
    nombre:    nombre.into(),
    apellido:  "García".into(),
    edad,
    genero:    Gender::F,
    ocupacion: "Estudia".into(),
    distrito:  "Miraflores".into(),
  }
}

// ─── Insert / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get() {
  let s = store().await;

  let person = s.insert(fields("Ana", 31)).await.unwrap();
  assert!(person.id.get() > 0);
  assert_eq!(person.fecha_creado, person.fecha_actualizado);

  let fetched = s.get(person.id).await.unwrap().unwrap();
  assert_eq!(fetched, person);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(PersonId(999)).await.unwrap().is_none());
  assert!(!s.exists(PersonId(999)).await.unwrap());
}

#[tokio::test]
async fn text_is_stored_verbatim() {
  let s = store().await;
  let nasty = "Robert'); DROP TABLE personas;--";
  let person = s.insert(fields(nasty, 40)).await.unwrap();

  let fetched = s.get(person.id).await.unwrap().unwrap();
  assert_eq!(fetched.nombre, nasty);
  assert_eq!(s.list(10).await.unwrap().len(), 1);
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty() {
  let s = store().await;
  assert!(s.list(500).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_descending_and_capped() {
  let s = store().await;
  for i in 0..5u8 {
    s.insert(fields(&format!("P{i}"), 20 + i)).await.unwrap();
  }

  let all = s.list(500).await.unwrap();
  let ids: Vec<i64> = all.iter().map(|p| p.id.get()).collect();
  assert_eq!(ids, vec![5, 4, 3, 2, 1]);

  let capped = s.list(2).await.unwrap();
  assert_eq!(capped.len(), 2);
  assert_eq!(capped[0].id, PersonId(5));
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_overwrites_and_keeps_creation_date() {
  let s = store().await;
  let person = s.insert(fields("Ana", 31)).await.unwrap();

  let mut changed = fields("Ana María", 32);
  changed.genero = Gender::M;
  changed.distrito = "Lince".into();
  assert!(s.update(person.id, changed).await.unwrap());

  let fetched = s.get(person.id).await.unwrap().unwrap();
  assert_eq!(fetched.nombre, "Ana María");
  assert_eq!(fetched.edad, 32);
  assert_eq!(fetched.genero, Gender::M);
  assert_eq!(fetched.distrito, "Lince");
  assert_eq!(fetched.fecha_creado, person.fecha_creado);
  assert!(fetched.fecha_actualizado >= person.fecha_actualizado);
}

#[tokio::test]
async fn update_missing_matches_nothing() {
  let s = store().await;
  assert!(!s.update(PersonId(12), fields("Nadie", 50)).await.unwrap());
  assert!(s.list(500).await.unwrap().is_empty());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_row() {
  let s = store().await;
  let person = s.insert(fields("Ana", 31)).await.unwrap();

  assert!(s.delete(person.id).await.unwrap());
  assert!(!s.exists(person.id).await.unwrap());
  assert!(!s.delete(person.id).await.unwrap());
}

#[tokio::test]
async fn ids_are_never_reused() {
  let s = store().await;
  let first = s.insert(fields("Uno", 20)).await.unwrap();
  let second = s.insert(fields("Dos", 21)).await.unwrap();
  s.delete(second.id).await.unwrap();

  let third = s.insert(fields("Tres", 22)).await.unwrap();
  assert!(third.id > second.id);
  assert!(second.id > first.id);
}

#[tokio::test]
async fn age_constraint_is_enforced_by_the_table() {
  let s = store().await;
  // Bypasses validation on purpose: the CHECK constraint is the last line.
  let result = s.insert(fields("Niño", 12)).await;
  assert!(result.is_err());
}

// ─── Through the service layer ───────────────────────────────────────────────

#[tokio::test]
async fn service_delete_twice() {
  let s = store().await;
  let person = s.insert(fields("Ana", 31)).await.unwrap();

  service::delete(&s, Some(person.id.get())).await.unwrap();
  let err = service::delete(&s, Some(person.id.get())).await.unwrap_err();
  assert!(matches!(err, registro_core::Error::NotFound(_)));
}

#[tokio::test]
async fn service_list_formats_dates() {
  let s = store().await;
  let person = s.insert(fields("Ana", 31)).await.unwrap();

  let rows = service::list(&s).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].fecha_creado, person.fecha_creado.format("%d/%m/%Y").to_string());
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_store_keeps_rows() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("registro.db");

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert(fields("Ana", 31)).await.unwrap().id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.get(id).await.unwrap().unwrap();
  assert_eq!(fetched.nombre, "Ana");
}
