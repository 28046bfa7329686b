//! Domain models that mirror the SQLite schema and get passed between the
//! persistence layer and the front-end. These stay light-weight data holders
//! so the other layers can focus on validation and query logic.

use std::fmt;

use crate::error::RegistryError;
use crate::validate::validate;

/// One persisted row of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Primary key assigned by the store on insert. Immutable afterwards;
    /// update/delete flows bubble it back to the persistence layer.
    pub id: i64,
    pub name: String,
    pub age: i64,
    /// Exactly 11 digits, unique across the table.
    pub national_id: String,
    /// One of the codes M, F, O, stored uppercase.
    pub gender: String,
    pub email: String,
    /// Digits only, unique across the table.
    pub phone: String,
}

impl fmt::Display for Person {
    /// One-line listing format used by the front-end row view.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Age: {} | National id: {} | Gender: {} | Email: {} | Phone: {}",
            self.id, self.name, self.age, self.national_id, self.gender, self.email, self.phone
        )
    }
}

/// A validated insert/update payload: a `Person` minus the store-assigned id.
///
/// The only way to build one is [`NewPerson::from_form`], so any value of
/// this type has already passed every field rule. The persistence layer can
/// therefore stick to enforcing what only the store knows about, namely the
/// uniqueness constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub age: i64,
    pub national_id: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
}

impl NewPerson {
    /// Validate raw form strings and assemble the payload.
    ///
    /// Callers hand over already-trimmed fields, with the national id and
    /// gender normalized (see `validate::normalize_*`); that normalization is
    /// deliberately a caller concern, matching where the form handlers do it.
    pub fn from_form(
        name: &str,
        age: &str,
        national_id: &str,
        gender: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, RegistryError> {
        validate(name, age, national_id, gender, email, phone)?;
        // Digits-only is guaranteed above; a value too large for i64 is
        // rejected the same way as non-numeric input.
        let age = age.parse().map_err(|_| RegistryError::NonNumericAge)?;
        Ok(Self {
            name: name.to_string(),
            age,
            national_id: national_id.to_string(),
            gender: gender.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        })
    }
}
