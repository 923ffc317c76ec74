//! Async HTTP client wrapping the registry JSON API.

use std::time::Duration;

use anyhow::Context as _;
use registro_core::{Envelope, PersonInput, PersonRow};
use reqwest::{Client, Response};
use serde_json::Value;
use thiserror::Error;

/// Connection settings for the registry API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url:     String,
  /// Upper bound for a `GET /list` round trip. Other calls have none.
  pub load_timeout: Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url:     "http://localhost:8080".to_string(),
      load_timeout: Duration::from_secs(30),
    }
  }
}

/// A failed API call. The `Display` text is what the user sees.
#[derive(Debug, Error)]
pub enum ClientError {
  #[error("La solicitud tardó demasiado. Intenta nuevamente.")]
  Timeout,

  #[error("HTTP Error: {0}")]
  Status(u16),

  /// `{"error": "..."}` reported by `GET /list`.
  #[error("Error: {0}")]
  Server(String),

  #[error("Formato de datos inválido")]
  Format,

  #[error("Error: {0}")]
  Network(String),
}

impl From<reqwest::Error> for ClientError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_timeout() {
      ClientError::Timeout
    } else if e.is_decode() {
      ClientError::Format
    } else {
      ClientError::Network(e.to_string())
    }
  }
}

/// Async HTTP client for the registry API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
    let client = Client::builder()
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `GET /list`
  ///
  /// The request is dropped, and with it the connection, once
  /// `load_timeout` elapses.
  pub async fn list_people(&self) -> Result<Vec<PersonRow>, ClientError> {
    let resp = self
      .client
      .get(self.url("/list"))
      .timeout(self.config.load_timeout)
      .send()
      .await?;

    let status = resp.status();
    let body: Value = match resp.json().await {
      Ok(v) => v,
      Err(_) if !status.is_success() => return Err(ClientError::Status(status.as_u16())),
      Err(e) => return Err(e.into()),
    };

    if let Some(msg) = body.get("error").and_then(Value::as_str) {
      return Err(ClientError::Server(strip_error_prefix(msg).to_owned()));
    }
    if !status.is_success() {
      return Err(ClientError::Status(status.as_u16()));
    }
    if !body.is_array() {
      return Err(ClientError::Format);
    }
    serde_json::from_value(body).map_err(|_| ClientError::Format)
  }

  /// `POST /save`. The envelope is returned for error statuses too.
  pub async fn save_person(&self, input: &PersonInput) -> Result<Envelope, ClientError> {
    let resp = self.client.post(self.url("/save")).json(input).send().await?;
    envelope(resp).await
  }

  /// `GET /delete?id=<id>`
  pub async fn delete_person(&self, id: i64) -> Result<Envelope, ClientError> {
    let resp = self
      .client
      .get(self.url("/delete"))
      .query(&[("id", id)])
      .send()
      .await?;
    envelope(resp).await
  }
}

async fn envelope(resp: Response) -> Result<Envelope, ClientError> {
  let status = resp.status();
  resp.json::<Envelope>().await.map_err(|e| {
    if status.is_success() { ClientError::from(e) } else { ClientError::Status(status.as_u16()) }
  })
}

/// The server already prefixes store faults with `"Error: "`.
fn strip_error_prefix(msg: &str) -> &str { msg.strip_prefix("Error: ").unwrap_or(msg) }
