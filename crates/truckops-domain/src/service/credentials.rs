//! Credential validation shared by the login, signup, and reset screens

use truckops_types::{Error, Result};

/// Minimal shape check: `local@domain.tld` with an alphabetic TLD of
/// at least two characters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn validate_login(email: &str, password: &str) -> Result<()> {
    if email.is_empty() || password.is_empty() {
        return Err(Error::Validation(
            "Please enter email and password.".to_string(),
        ));
    }
    if !is_valid_email(email) {
        return Err(Error::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_signup(email: &str, password: &str, confirm: &str) -> Result<()> {
    if email.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(Error::Validation("Please fill in all fields.".to_string()));
    }
    if !is_valid_email(email) {
        return Err(Error::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    if password != confirm {
        return Err(Error::Validation("Passwords don't match.".to_string()));
    }
    if password.len() < 6 {
        return Err(Error::Validation(
            "Password must be at least 6 characters long.".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_reset(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(Error::Validation(
            "Please enter your email address.".to_string(),
        ));
    }
    if !is_valid_email(email) {
        return Err(Error::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("dispatcher@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@host.1x"));
    }

    #[test]
    fn signup_requires_matching_passwords() {
        let err = validate_signup("a@b.com", "secret1", "secret2").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn signup_requires_six_characters() {
        assert!(validate_signup("a@b.com", "12345", "12345").is_err());
        assert!(validate_signup("a@b.com", "123456", "123456").is_ok());
    }

    #[test]
    fn login_requires_both_fields() {
        assert!(validate_login("a@b.com", "").is_err());
        assert!(validate_login("", "pw").is_err());
        assert!(validate_login("a@b.com", "pw").is_ok());
    }
}
