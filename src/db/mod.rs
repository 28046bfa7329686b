//! Persistence module split across logical submodules.

mod connection;
mod persons;

pub use connection::{init_schema, open_registry};
pub use persons::{
    delete_person, fetch_persons, insert_person, search_persons, update_person, Criterion,
};
