//! Error type for `registro-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column holds a value the domain types cannot represent.
  #[error("corrupt row {id}: {detail}")]
  CorruptRow { id: i64, detail: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
