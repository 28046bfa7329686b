//! Core library for the person registry application.
//!
//! The public modules exposed here keep the API surface intentionally small:
//! `validate` holds the pure field rules, `db` owns the SQLite schema and
//! CRUD, and `models`/`error` carry the types both of them exchange. The
//! binary target is a thin driver over these same pieces, so external
//! tooling can reuse them directly.
pub mod cli;
pub mod db;
pub mod error;
pub mod models;
pub mod validate;

/// Convenience re-exports for the persistence layer, typically used by the
/// binary to bootstrap the store and run operations.
pub use db::{
    delete_person, fetch_persons, init_schema, insert_person, open_registry, search_persons,
    update_person, Criterion,
};

/// The error taxonomy every fallible operation reports.
pub use error::RegistryError;

/// The two domain types other layers manipulate.
pub use models::{NewPerson, Person};
