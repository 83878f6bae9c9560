//! Field validators used by the registration, login and edit forms.
//!
//! The `*_is_acceptable` helpers mirror what the forms show inline while the
//! user types: an empty field is not flagged yet. The `validate_*` functions
//! are the strict checks that gate submission.

use crate::constants::{MIN_PASSWORD_LEN, PHONE_COUNTRY_PREFIX, PHONE_DIGITS, VERIFICATION_CODE_LEN};
use crate::error::ValidationError;

/// `^.+@.+\.com$`, where `.` matches anything but a line terminator.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(['\n', '\r', '\u{2028}', '\u{2029}']) {
        return false;
    }
    let Some(head) = email.strip_suffix(".com") else {
        return false;
    };
    // need at least one char before some '@' and at least one after it
    head.char_indices()
        .any(|(i, c)| c == '@' && i > 0 && i + 1 < head.len())
}

/// Inline flag: empty or well-formed.
pub fn email_is_acceptable(email: &str) -> bool {
    email.is_empty() || is_valid_email(email)
}

/// Strip everything but ASCII digits and cap at [`PHONE_DIGITS`].
///
/// Returns `None` when the digits exceed the cap, in which case the form
/// keeps its previous value.
pub fn sanitize_phone_input(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() <= PHONE_DIGITS).then_some(digits)
}

/// Inline flag: empty or complete.
pub fn phone_is_acceptable(digits: &str) -> bool {
    digits.is_empty() || digits.len() == PHONE_DIGITS
}

/// Inline flag: empty or long enough.
pub fn password_is_acceptable(password: &str) -> bool {
    password.is_empty() || password.chars().count() >= MIN_PASSWORD_LEN
}

pub fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    validate_required("Email", email)?;
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_phone(digits: &str) -> Result<(), ValidationError> {
    if digits.len() != PHONE_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhone {
            expected: PHONE_DIGITS,
        });
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

pub fn validate_verification_code(code: &str) -> Result<(), ValidationError> {
    if code.len() != VERIFICATION_CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidVerificationCode {
            expected: VERIFICATION_CODE_LEN,
        });
    }
    Ok(())
}

/// Local digits → number sent to the backend.
pub fn international_phone(digits: &str) -> String {
    format!("{PHONE_COUNTRY_PREFIX}{digits}")
}

/// Number from the backend → local digits shown in the form.
pub fn local_phone(number: &str) -> String {
    number
        .strip_prefix(PHONE_COUNTRY_PREFIX)
        .unwrap_or(number)
        .to_string()
}
