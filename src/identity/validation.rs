//! Field-level validation for auth forms and the payment contact handle
//!
//! Validation is local and never contacts the collaborator; failures are
//! surfaced per field so the UI can attach messages to inputs.

/// A validation failure attached to a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as rendered in the form
    pub field: &'static str,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Minimum password length accepted at sign-up and sign-in
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check that an email looks like `local@host.tld`
///
/// Matches the permissive shape the forms accept: no whitespace, a
/// non-empty local part, and a dotted domain.
pub fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Check a demo-payment contact handle
///
/// Accepts a local mobile number of 11 digits starting with "09", or the
/// international form "+639" followed by 9 digits.
pub fn is_valid_contact_handle(handle: &str) -> bool {
    if let Some(rest) = handle.strip_prefix("+639") {
        return rest.len() == 9 && rest.chars().all(|c| c.is_ascii_digit());
    }
    handle.len() == 11
        && handle.starts_with("09")
        && handle.chars().all(|c| c.is_ascii_digit())
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_well_formed_email(email) {
        errors.push(FieldError::new("email", "Email is invalid"));
    }
}

fn check_password(password: &str, errors: &mut Vec<FieldError>) {
    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if password.len() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
}

/// Validate a sign-up form
pub fn validate_sign_up(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_email(email, &mut errors);
    check_password(password, &mut errors);

    if confirm_password.is_empty() {
        errors.push(FieldError::new(
            "confirmPassword",
            "Please confirm your password",
        ));
    } else if confirm_password != password {
        errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a sign-in form
pub fn validate_sign_in(email: &str, password: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_email(email, &mut errors);
    check_password(password, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
