// Validation service
// Typed field validators shared by the registration and event forms

use chrono::NaiveDateTime;
use thiserror::Error;

// User specific
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 30;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 30;
pub const MIN_NAME_LEN: usize = 1;
pub const MAX_NAME_LEN: usize = 30;
pub const MIN_PHONE_LEN: usize = 10;
pub const MIN_ADDRESS_LEN: usize = 3;
pub const MAX_ADDRESS_LEN: usize = 100;

// Event specific
pub const MIN_TITLE_LEN: usize = 3;
pub const MAX_TITLE_LEN: usize = 30;
pub const MIN_DESCRIPTION_LEN: usize = 3;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_COVER_PHOTO_BYTES: usize = 5 * 1024 * 1024; // 5 MB

/// A single rejected field, carrying enough to render the form message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} must be at most {max} characters long")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} cannot be empty")]
    Required { field: &'static str },
    #[error("invalid email format")]
    InvalidEmail,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("event end must be after its start")]
    EndNotAfterStart,
    #[error("image exceeds the {max_bytes} byte upload limit")]
    ImageTooLarge { max_bytes: usize },
    #[error("username already exists")]
    UsernameTaken,
    #[error("email already exists")]
    EmailTaken,
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if len > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    check_length("username", username, MIN_USERNAME_LEN, MAX_USERNAME_LEN)
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    check_length("password", password, MIN_PASSWORD_LEN, MAX_PASSWORD_LEN)
}

pub fn validate_passwords_match(
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Validates a first or last name; `field` names it in the error.
pub fn validate_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    check_length(field, name, MIN_NAME_LEN, MAX_NAME_LEN)
}

pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if phone_number.chars().count() < MIN_PHONE_LEN {
        return Err(ValidationError::TooShort {
            field: "phone number",
            min: MIN_PHONE_LEN,
        });
    }
    Ok(())
}

/// Shape check only: one `@`, no whitespace, and a dotted domain with
/// characters on both sides of a dot.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, rest)| !host.is_empty() && !rest.is_empty())
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    if address.is_empty() {
        return Err(ValidationError::Required { field: "address" });
    }
    check_length("address", address, MIN_ADDRESS_LEN, MAX_ADDRESS_LEN)
}

/// Uniqueness check against the already-fetched usernames; fetching stays
/// with the caller, which has the store.
pub fn validate_username_available<'a>(
    username: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    if existing.into_iter().any(|taken| taken == username) {
        return Err(ValidationError::UsernameTaken);
    }
    Ok(())
}

/// Uniqueness check against the already-fetched emails.
pub fn validate_email_available<'a>(
    email: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    if existing.into_iter().any(|taken| taken == email) {
        return Err(ValidationError::EmailTaken);
    }
    Ok(())
}

pub fn validate_event_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required { field: "title" });
    }
    check_length("title", title, MIN_TITLE_LEN, MAX_TITLE_LEN)
}

pub fn validate_event_description(description: &str) -> Result<(), ValidationError> {
    check_length(
        "description",
        description,
        MIN_DESCRIPTION_LEN,
        MAX_DESCRIPTION_LEN,
    )
}

pub fn validate_event_times(
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<(), ValidationError> {
    if end <= start {
        return Err(ValidationError::EndNotAfterStart);
    }
    Ok(())
}

pub fn validate_image_size(byte_len: usize) -> Result<(), ValidationError> {
    if byte_len > MAX_COVER_PHOTO_BYTES {
        return Err(ValidationError::ImageTooLarge {
            max_bytes: MAX_COVER_PHOTO_BYTES,
        });
    }
    Ok(())
}

/// Fields entered on the registration form.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub address: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// Checks every registration field and reports all failures at once, the
/// way the form renders them.
pub fn validate_registration(input: &RegistrationInput<'_>) -> Result<(), Vec<ValidationError>> {
    let checks = [
        validate_username(input.username),
        validate_name("first name", input.first_name),
        validate_name("last name", input.last_name),
        validate_email(input.email),
        validate_phone_number(input.phone_number),
        validate_address(input.address),
        validate_password(input.password),
        validate_passwords_match(input.password, input.confirm_password),
    ];
    collect_errors(checks)
}

/// Fields entered on the event form.
#[derive(Debug, Clone, Copy)]
pub struct EventInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

pub fn validate_event_input(input: &EventInput<'_>) -> Result<(), Vec<ValidationError>> {
    let checks = [
        validate_event_title(input.title),
        validate_event_description(input.description),
        validate_event_times(input.start, input.end),
    ];
    collect_errors(checks)
}

fn collect_errors<const N: usize>(
    checks: [Result<(), ValidationError>; N],
) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
