//! The single error taxonomy every fallible registry operation reports.
//! Validation failures and store-level rejections share one enum so the
//! front-end can match on a kind when it needs to and fall back to the
//! Display message everywhere else.

use thiserror::Error;

/// Everything that can go wrong while validating or persisting a person.
///
/// The variants mirror the validation rules one-to-one, plus the two
/// uniqueness constraints the schema enforces. Messages are written for
/// direct display to the user; callers never need to rephrase them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("All fields are required.")]
    MissingField,
    #[error("Age must contain only digits.")]
    NonNumericAge,
    #[error("National id must be exactly 11 numeric digits.")]
    InvalidNationalId,
    #[error("Gender must be M, F or O.")]
    InvalidGender,
    #[error("Invalid email. It must contain '@'.")]
    InvalidEmail,
    #[error("Phone must contain only digits.")]
    NonNumericPhone,
    #[error("National id already registered.")]
    DuplicateNationalId,
    #[error("Phone already registered.")]
    DuplicatePhone,
    /// Any store failure outside the uniqueness constraints. The original
    /// detail text rides along for diagnostics; the operation stays
    /// recoverable from the caller's point of view.
    #[error("Unexpected store error: {0}")]
    Unexpected(String),
}
