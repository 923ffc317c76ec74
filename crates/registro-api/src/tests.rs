//! Router tests against an in-memory store.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{HeaderMap, Request, StatusCode, header},
};
use registro_core::{
  Gender, Person, PersonFields, PersonId, service::LIST_LIMIT, store::PersonStore,
};
use registro_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn make_store() -> Arc<SqliteStore> {
  Arc::new(SqliteStore::open_in_memory().await.unwrap())
}

struct Reply {
  status:  StatusCode,
  headers: HeaderMap,
  body:    Vec<u8>,
}

impl Reply {
  fn json(&self) -> Value { serde_json::from_slice(&self.body).unwrap() }
}

async fn send<S>(store: Arc<S>, method: &str, uri: &str, body: &str) -> Reply
where
  S: PersonStore + 'static,
{
  let req = Request::builder()
    .method(method)
    .uri(uri)
    .header(header::ORIGIN, "http://localhost:3000")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap();
  let resp = api_router(store).oneshot(req).await.unwrap();
  let status = resp.status();
  let headers = resp.headers().clone();
  let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec();
  Reply { status, headers, body }
}

fn juan(id: i64, edad: i64) -> String {
  json!({
    "id": id,
    "nombre": "Juan",
    "apellido": "Pérez",
    "edad": edad,
    "genero": "M",
    "ocupacion": "Trabaja",
    "distrito": "Los Olivos",
  })
  .to_string()
}

async fn create_juan(store: &Arc<SqliteStore>) -> i64 {
  let reply = send(store.clone(), "POST", "/save", &juan(0, 28)).await;
  assert_eq!(reply.status, StatusCode::CREATED);
  reply.json()["datos"]["id"].as_i64().unwrap()
}

// ── List ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_on_empty_store_is_an_empty_array() {
  let reply = send(make_store().await, "GET", "/list", "").await;
  assert_eq!(reply.status, StatusCode::OK);
  assert_eq!(reply.json(), json!([]));
}

#[tokio::test]
async fn list_returns_rows_newest_first_with_formatted_dates() {
  let store = make_store().await;
  let first = create_juan(&store).await;
  let second = create_juan(&store).await;

  let reply = send(store, "GET", "/list", "").await;
  let rows = reply.json();
  let rows = rows.as_array().unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0]["id"], second);
  assert_eq!(rows[1]["id"], first);

  let fecha = rows[0]["fecha_creado"].as_str().unwrap();
  assert_eq!(fecha.len(), 10, "fecha_creado: {fecha}");
  assert_eq!(&fecha[2..3], "/");
  assert_eq!(&fecha[5..6], "/");
  assert!(rows[0].get("fecha_actualizado").is_none());
}

#[tokio::test]
async fn list_is_capped_at_the_newest_500() {
  let store = make_store().await;
  let mut last = PersonId(0);
  for i in 0..501 {
    let person = store
      .insert(PersonFields {
        nombre:    format!("Persona {i}"),
        apellido:  "Prueba".into(),
        edad:      30,
        genero:    Gender::F,
        ocupacion: String::new(),
        distrito:  String::new(),
      })
      .await
      .unwrap();
    last = person.id;
  }

  let reply = send(store, "GET", "/list", "").await;
  assert_eq!(reply.status, StatusCode::OK);
  let rows = reply.json();
  let rows = rows.as_array().unwrap();
  assert_eq!(rows.len(), LIST_LIMIT);
  assert_eq!(rows[0]["id"], last.get());
  assert_eq!(rows[LIST_LIMIT - 1]["id"], last.get() - 499);
}

// ── Save ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_201_with_positive_id() {
  let reply = send(make_store().await, "POST", "/save", &juan(0, 28)).await;
  assert_eq!(reply.status, StatusCode::CREATED);
  let body = reply.json();
  assert_eq!(body["exito"], true);
  assert!(body["datos"]["id"].as_i64().unwrap() > 0);
  assert_eq!(body["datos"]["nombre"], "Juan");
}

#[tokio::test]
async fn create_without_id_or_gender_defaults() {
  let store = make_store().await;
  let body = json!({ "nombre": "Ana", "apellido": "Ruiz", "edad": "33" }).to_string();
  let reply = send(store.clone(), "POST", "/save", &body).await;
  assert_eq!(reply.status, StatusCode::CREATED);

  let stored = store.get(PersonId(1)).await.unwrap().unwrap();
  assert_eq!(stored.edad, 33);
  assert_eq!(stored.genero.as_str(), "M");
  assert_eq!(stored.ocupacion, "");
}

#[tokio::test]
async fn invalid_update_returns_400_and_keeps_row() {
  let store = make_store().await;
  let id = create_juan(&store).await;

  let reply = send(store.clone(), "POST", "/save", &juan(id, 17)).await;
  assert_eq!(reply.status, StatusCode::BAD_REQUEST);
  let body = reply.json();
  assert_eq!(body["exito"], false);
  assert_eq!(body["mensaje"], "La edad debe estar entre 18 y 99 años");

  let stored = store.get(PersonId(id)).await.unwrap().unwrap();
  assert_eq!(stored.edad, 28);
}

#[tokio::test]
async fn update_returns_200_without_datos() {
  let store = make_store().await;
  let id = create_juan(&store).await;

  let reply = send(store.clone(), "POST", "/save", &juan(id, 40)).await;
  assert_eq!(reply.status, StatusCode::OK);
  let body = reply.json();
  assert_eq!(body["exito"], true);
  assert!(body.get("datos").is_none());

  assert_eq!(store.get(PersonId(id)).await.unwrap().unwrap().edad, 40);
}

#[tokio::test]
async fn update_of_unknown_id_still_succeeds() {
  let store = make_store().await;
  let reply = send(store.clone(), "POST", "/save", &juan(77, 40)).await;
  assert_eq!(reply.status, StatusCode::OK);
  assert!(store.list(500).await.unwrap().is_empty());
}

#[tokio::test]
async fn age_boundaries() {
  let store = make_store().await;
  for (edad, status) in [
    (17, StatusCode::BAD_REQUEST),
    (18, StatusCode::CREATED),
    (99, StatusCode::CREATED),
    (100, StatusCode::BAD_REQUEST),
  ] {
    let reply = send(store.clone(), "POST", "/save", &juan(0, edad)).await;
    assert_eq!(reply.status, status, "edad {edad}");
  }
}

#[tokio::test]
async fn missing_names_are_rejected() {
  let store = make_store().await;

  let body = json!({ "apellido": "Pérez", "edad": 30 }).to_string();
  let reply = send(store.clone(), "POST", "/save", &body).await;
  assert_eq!(reply.status, StatusCode::BAD_REQUEST);
  assert_eq!(reply.json()["mensaje"], "El nombre es requerido");

  let body = json!({ "nombre": "Juan", "apellido": "  ", "edad": 30 }).to_string();
  let reply = send(store, "POST", "/save", &body).await;
  assert_eq!(reply.status, StatusCode::BAD_REQUEST);
  assert_eq!(reply.json()["mensaje"], "El apellido es requerido");
}

#[tokio::test]
async fn malformed_bodies_are_rejected_with_an_envelope() {
  let store = make_store().await;
  for body in ["{not json", "", "{}", "[1,2]", "null", r#"{"nombre":["a"]}"#] {
    let reply = send(store.clone(), "POST", "/save", body).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST, "body {body:?}");
    let json = reply.json();
    assert_eq!(json["exito"], false);
    assert_eq!(json["mensaje"], "Datos JSON no válidos");
  }
}

#[tokio::test]
async fn unknown_gender_is_rejected() {
  let body = json!({ "nombre": "A", "apellido": "B", "edad": 30, "genero": "X" }).to_string();
  let reply = send(make_store().await, "POST", "/save", &body).await;
  assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

// ── Delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_unknown_id_returns_404() {
  let reply = send(make_store().await, "GET", "/delete?id=999", "").await;
  assert_eq!(reply.status, StatusCode::NOT_FOUND);
  assert_eq!(reply.json()["mensaje"], "Persona no encontrada");
}

#[tokio::test]
async fn delete_then_delete_again() {
  let store = make_store().await;
  let id = create_juan(&store).await;

  let reply = send(store.clone(), "GET", &format!("/delete?id={id}"), "").await;
  assert_eq!(reply.status, StatusCode::OK);
  let body = reply.json();
  assert_eq!(body["exito"], true);
  assert_eq!(body["datos"], json!({ "id": id }));

  let reply = send(store.clone(), "DELETE", &format!("/delete?id={id}"), "").await;
  assert_eq!(reply.status, StatusCode::NOT_FOUND);

  let list = send(store, "GET", "/list", "").await;
  assert_eq!(list.json(), json!([]));
}

#[tokio::test]
async fn delete_requires_a_positive_id() {
  let store = make_store().await;
  for (uri, mensaje) in [
    ("/delete", "ID no proporcionado"),
    ("/delete?id=", "ID no proporcionado"),
    ("/delete?id=abc", "ID no válido"),
    ("/delete?id=-3", "ID no válido"),
    ("/delete?id=0", "ID no proporcionado"),
    ("/delete?id=00", "ID no válido"),
    ("/delete?id[]=3", "ID no proporcionado"),
  ] {
    let reply = send(store.clone(), "GET", uri, "").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{uri}");
    assert_eq!(reply.json()["mensaje"], mensaje, "{uri}");
  }
}

#[tokio::test]
async fn repeated_id_uses_the_last_value() {
  let store = make_store().await;
  let first = create_juan(&store).await;
  let second = create_juan(&store).await;

  let reply = send(store.clone(), "GET", &format!("/delete?id={first}&id={second}"), "").await;
  assert_eq!(reply.status, StatusCode::OK);
  assert_eq!(reply.headers[header::CONTENT_TYPE], "application/json");
  assert_eq!(reply.json()["datos"], json!({ "id": second }));

  let list = send(store, "GET", "/list", "").await;
  let rows = list.json();
  assert_eq!(rows.as_array().map(Vec::len), Some(1));
  assert_eq!(rows[0]["id"], first);
}

#[tokio::test]
async fn delete_failures_are_always_json() {
  let store = make_store().await;
  for uri in ["/delete?id=1&id=2", "/delete?id=%FF", "/delete?&&=", "/delete?id=9&id="] {
    let reply = send(store.clone(), "GET", uri, "").await;
    assert!(reply.status.is_client_error(), "{uri}: {}", reply.status);
    assert_eq!(reply.headers[header::CONTENT_TYPE], "application/json", "{uri}");
    assert_eq!(reply.json()["exito"], false, "{uri}");
  }
}

// ── CORS ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn preflight_is_an_empty_200() {
  let req = Request::builder()
    .method("OPTIONS")
    .uri("/save")
    .header(header::ORIGIN, "http://localhost:3000")
    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
    .body(Body::empty())
    .unwrap();
  let resp = api_router(make_store().await).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);

  let headers = resp.headers().clone();
  assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
  let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
  for m in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
    assert!(methods.contains(m), "allow-methods: {methods}");
  }
  let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap();
  assert!(allowed.eq_ignore_ascii_case("content-type"), "allow-headers: {allowed}");

  let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  assert!(body.is_empty());
}

#[tokio::test]
async fn regular_responses_carry_all_cors_headers() {
  for (method, uri, body) in
    [("GET", "/list", String::new()), ("GET", "/delete", String::new()), ("POST", "/save", juan(0, 40))]
  {
    let reply = send(make_store().await, method, uri, &body).await;
    assert_eq!(reply.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*", "{uri}");
    assert_eq!(
      reply.headers[header::ACCESS_CONTROL_ALLOW_METHODS],
      "GET, POST, PUT, DELETE, OPTIONS",
      "{uri}"
    );
    assert_eq!(reply.headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type", "{uri}");
  }
}

// ── Store faults ─────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("disk I/O error")]
struct DiskError;

/// A store whose every call fails.
struct BrokenStore;

impl PersonStore for BrokenStore {
  type Error = DiskError;

  async fn list(&self, _limit: usize) -> Result<Vec<Person>, DiskError> { Err(DiskError) }

  async fn get(&self, _id: PersonId) -> Result<Option<Person>, DiskError> { Err(DiskError) }

  async fn exists(&self, _id: PersonId) -> Result<bool, DiskError> { Err(DiskError) }

  async fn insert(&self, _fields: PersonFields) -> Result<Person, DiskError> { Err(DiskError) }

  async fn update(&self, _id: PersonId, _fields: PersonFields) -> Result<bool, DiskError> {
    Err(DiskError)
  }

  async fn delete(&self, _id: PersonId) -> Result<bool, DiskError> { Err(DiskError) }
}

#[tokio::test]
async fn store_faults_become_500_json() {
  let store = Arc::new(BrokenStore);

  let reply = send(store.clone(), "GET", "/list", "").await;
  assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(reply.json(), json!({ "error": "Error: disk I/O error" }));

  let reply = send(store.clone(), "POST", "/save", &juan(0, 30)).await;
  assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(reply.json()["exito"], false);

  let reply = send(store, "GET", "/delete?id=1", "").await;
  assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(reply.json()["mensaje"], "Error: disk I/O error");
}
