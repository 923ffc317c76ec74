//! SQL schema for the registry's SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout version.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids strictly increasing: a deleted id is never reused.
CREATE TABLE IF NOT EXISTS personas (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre            TEXT    NOT NULL,
    apellido          TEXT    NOT NULL,
    edad              INTEGER NOT NULL CHECK (edad BETWEEN 18 AND 99),
    genero            TEXT    NOT NULL DEFAULT 'M' CHECK (genero IN ('M', 'F')),
    ocupacion         TEXT    NOT NULL DEFAULT '',
    distrito          TEXT    NOT NULL DEFAULT '',
    fecha_creado      TEXT    NOT NULL,   -- RFC 3339 UTC; written once
    fecha_actualizado TEXT    NOT NULL    -- RFC 3339 UTC; bumped on update
);

PRAGMA user_version = 1;
";
