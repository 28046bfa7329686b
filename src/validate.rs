//! Field validation for the registry form, plus the two normalization
//! helpers the front-end applies before validating. Everything here is a
//! pure function over strings; nothing touches the database, so a rejected
//! form never costs a store round-trip.

use crate::error::RegistryError;

/// Accepted gender codes, compared after uppercasing.
const GENDER_CODES: [&str; 3] = ["M", "F", "O"];

/// Number of digits a national id must carry.
const NATIONAL_ID_LEN: usize = 11;

/// Check the six raw form fields against the field rules.
///
/// Rules run in a fixed order and stop at the first failure, so the caller
/// always gets the error for the top-most offending field:
///
/// 1. every field non-empty after trimming,
/// 2. age all digits,
/// 3. national id all digits and exactly 11 of them,
/// 4. gender one of M / F / O (case-insensitive),
/// 5. email contains `@`,
/// 6. phone all digits.
///
/// Callers are expected to trim the fields and to run the national id and
/// gender through [`normalize_national_id`] / [`normalize_gender`] first;
/// the validator checks what it is given.
pub fn validate(
    name: &str,
    age: &str,
    national_id: &str,
    gender: &str,
    email: &str,
    phone: &str,
) -> Result<(), RegistryError> {
    let fields = [name, age, national_id, gender, email, phone];
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(RegistryError::MissingField);
    }
    if !is_all_digits(age) {
        return Err(RegistryError::NonNumericAge);
    }
    if !is_all_digits(national_id) || national_id.len() != NATIONAL_ID_LEN {
        return Err(RegistryError::InvalidNationalId);
    }
    if !GENDER_CODES.contains(&gender.to_uppercase().as_str()) {
        return Err(RegistryError::InvalidGender);
    }
    if !email.contains('@') {
        // Deliberately weak: the original accepts anything with an '@'.
        return Err(RegistryError::InvalidEmail);
    }
    if !is_all_digits(phone) {
        return Err(RegistryError::NonNumericPhone);
    }
    Ok(())
}

/// Strip the punctuation commonly typed into national ids (`.` and `-`).
/// Applied by the caller before [`validate`].
pub fn normalize_national_id(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|ch| *ch != '.' && *ch != '-')
        .collect()
}

/// Trim and uppercase a gender code. Applied by the caller before
/// [`validate`] so the stored value is always the canonical uppercase form.
pub fn normalize_gender(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> [&'static str; 6] {
        ["Ana", "30", "12345678901", "F", "a@b.com", "11999990000"]
    }

    fn run(fields: [&str; 6]) -> Result<(), RegistryError> {
        validate(
            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
        )
    }

    #[test]
    fn accepts_fully_valid_input() {
        assert_eq!(run(valid()), Ok(()));
    }

    #[test]
    fn rejects_any_blank_field() {
        for index in 0..6 {
            let mut fields = valid();
            fields[index] = "   ";
            assert_eq!(run(fields), Err(RegistryError::MissingField));
        }
    }

    #[test]
    fn rejects_non_numeric_age() {
        let mut fields = valid();
        fields[1] = "thirty";
        assert_eq!(run(fields), Err(RegistryError::NonNumericAge));
    }

    #[test]
    fn rejects_national_id_with_wrong_length_or_letters() {
        let mut fields = valid();
        fields[2] = "123";
        assert_eq!(run(fields), Err(RegistryError::InvalidNationalId));
        fields[2] = "1234567890a";
        assert_eq!(run(fields), Err(RegistryError::InvalidNationalId));
    }

    #[test]
    fn accepts_gender_codes_case_insensitively() {
        for code in ["M", "f", "o"] {
            let mut fields = valid();
            fields[3] = code;
            assert_eq!(run(fields), Ok(()));
        }
        let mut fields = valid();
        fields[3] = "X";
        assert_eq!(run(fields), Err(RegistryError::InvalidGender));
    }

    #[test]
    fn rejects_email_without_at_sign() {
        let mut fields = valid();
        fields[4] = "not-an-email";
        assert_eq!(run(fields), Err(RegistryError::InvalidEmail));
    }

    #[test]
    fn rejects_non_numeric_phone() {
        let mut fields = valid();
        fields[5] = "11 99999-0000";
        assert_eq!(run(fields), Err(RegistryError::NonNumericPhone));
    }

    #[test]
    fn reports_the_first_failing_rule_only() {
        // Age, national id and phone are all wrong; the age rule runs first.
        let fields = ["Ana", "abc", "123", "F", "a@b.com", "phone"];
        assert_eq!(run(fields), Err(RegistryError::NonNumericAge));
        // With age fixed, the national id rule is next in line.
        let fields = ["Ana", "30", "123", "X", "nope", "phone"];
        assert_eq!(run(fields), Err(RegistryError::InvalidNationalId));
        // And so on down the list.
        let fields = ["Ana", "30", "12345678901", "X", "nope", "phone"];
        assert_eq!(run(fields), Err(RegistryError::InvalidGender));
        let fields = ["Ana", "30", "12345678901", "F", "nope", "phone"];
        assert_eq!(run(fields), Err(RegistryError::InvalidEmail));
    }

    #[test]
    fn normalization_helpers_clean_caller_input() {
        assert_eq!(normalize_national_id(" 123.456.789-01 "), "12345678901");
        assert_eq!(normalize_gender(" f "), "F");
    }
}
