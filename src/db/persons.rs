use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Error as SqlError, ErrorCode, Row};

use crate::error::RegistryError;
use crate::models::{NewPerson, Person};

/// One selectable condition of the search dialog. Criteria combine with OR:
/// a row matches when any selected criterion does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Substring match against the name.
    NameContains(String),
    /// Substring match against the national id.
    NationalIdContains(String),
    /// Exact match against the primary key.
    IdEquals(i64),
}

/// Append a new row and echo the hydrated struct so the caller can render it
/// without re-querying.
///
/// Field validity is guaranteed by the `NewPerson` constructor; the only
/// rejections left to the store are the two uniqueness constraints, which
/// come back as [`RegistryError::DuplicateNationalId`] or
/// [`RegistryError::DuplicatePhone`].
pub fn insert_person(conn: &Connection, person: &NewPerson) -> Result<Person, RegistryError> {
    conn.execute(
        "INSERT INTO persons (name, age, national_id, gender, email, phone)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            person.name,
            person.age,
            person.national_id,
            person.gender,
            person.email,
            person.phone
        ],
    )
    .map_err(map_store_error)?;

    let id = conn.last_insert_rowid();
    Ok(Person {
        id,
        name: person.name.clone(),
        age: person.age,
        national_id: person.national_id.clone(),
        gender: person.gender.clone(),
        email: person.email.clone(),
        phone: person.phone.clone(),
    })
}

/// Overwrite every field of the row matching `id`, with the same uniqueness
/// mapping as [`insert_person`]. A missing id touches zero rows and is not
/// an error; the caller simply sees no change in the next listing.
pub fn update_person(conn: &Connection, id: i64, person: &NewPerson) -> Result<(), RegistryError> {
    conn.execute(
        "UPDATE persons
         SET name = ?1, age = ?2, national_id = ?3, gender = ?4, email = ?5, phone = ?6
         WHERE id = ?7",
        params![
            person.name,
            person.age,
            person.national_id,
            person.gender,
            person.email,
            person.phone,
            id
        ],
    )
    .map_err(map_store_error)?;
    Ok(())
}

/// Remove the row matching `id`. Deleting an id that is already gone is a
/// no-op, mirroring [`update_person`].
pub fn delete_person(conn: &Connection, id: i64) -> Result<(), RegistryError> {
    conn.execute("DELETE FROM persons WHERE id = ?1", params![id])
        .map_err(map_store_error)?;
    Ok(())
}

/// Retrieve every row in primary-key order, which is also insertion order
/// since ids are never reused.
pub fn fetch_persons(conn: &Connection) -> Result<Vec<Person>, RegistryError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, age, national_id, gender, email, phone
             FROM persons ORDER BY id",
        )
        .map_err(map_store_error)?;

    let persons = stmt
        .query_map([], person_from_row)
        .map_err(map_store_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_store_error)?;

    Ok(persons)
}

/// Retrieve the rows matching any of the given criteria.
///
/// The query is assembled from a fixed set of parameterized fragments, one
/// per criterion, starting from a never-true base clause. That keeps the
/// search-dialog semantics of the form: ticking no field matches nothing,
/// ticking several matches their union.
pub fn search_persons(
    conn: &Connection,
    criteria: &[Criterion],
) -> Result<Vec<Person>, RegistryError> {
    let mut sql = String::from(
        "SELECT id, name, age, national_id, gender, email, phone
         FROM persons WHERE 1=0",
    );
    let mut bindings: Vec<Value> = Vec::with_capacity(criteria.len());

    for criterion in criteria {
        match criterion {
            Criterion::NameContains(term) => {
                sql.push_str(" OR name LIKE ?");
                bindings.push(Value::Text(format!("%{term}%")));
            }
            Criterion::NationalIdContains(term) => {
                sql.push_str(" OR national_id LIKE ?");
                bindings.push(Value::Text(format!("%{term}%")));
            }
            Criterion::IdEquals(id) => {
                sql.push_str(" OR id = ?");
                bindings.push(Value::Integer(*id));
            }
        }
    }
    sql.push_str(" ORDER BY id");

    let mut stmt = conn.prepare(&sql).map_err(map_store_error)?;
    let persons = stmt
        .query_map(params_from_iter(bindings), person_from_row)
        .map_err(map_store_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_store_error)?;

    Ok(persons)
}

fn person_from_row(row: &Row<'_>) -> Result<Person, SqlError> {
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        national_id: row.get(3)?,
        gender: row.get(4)?,
        email: row.get(5)?,
        phone: row.get(6)?,
    })
}

/// Coerce store failures into the domain taxonomy. Uniqueness violations
/// name the offending column in SQLite's message, so the text tells us which
/// duplicate to report; anything else is wrapped with its detail preserved.
fn map_store_error(err: SqlError) -> RegistryError {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        let detail = err.to_string();
        if detail.contains("persons.national_id") {
            return RegistryError::DuplicateNationalId;
        }
        if detail.contains("persons.phone") {
            return RegistryError::DuplicatePhone;
        }
    }
    RegistryError::Unexpected(err.to_string())
}
