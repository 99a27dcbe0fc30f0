/// Contact fields are validated at the form boundary, not by the draft.
pub fn validate_contact(name: &str, email: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("userName must not be empty".into());
    }
    validate_email(email)
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err("userEmail must be a valid email address".into())
    }
}
