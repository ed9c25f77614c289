use thiserror::Error;

use crate::registration::Draft;

/// Field check failures in display order. The message is what the error
/// screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must be 2-64 letters, spaces or hyphens")]
    Name,
    #[error("company name must be at least 2 characters")]
    Company,
    #[error("phone number must contain at least 7 digits")]
    Phone,
    #[error("enter a valid e-mail address")]
    Email,
}

/// Validated, trimmed field values ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationFields {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
}

/// Validates a draft in display order; the first failure wins.
pub fn registration(draft: &Draft) -> Result<RegistrationFields, ValidationError> {
    Ok(RegistrationFields {
        name: name(&draft.name)?,
        company: company(&draft.company)?,
        phone: phone(&draft.phone)?,
        email: email(&draft.email)?,
    })
}

/// Trimmed length in [2, 64]; Latin or Cyrillic letters, spaces, hyphens.
pub fn name(raw: &str) -> Result<String, ValidationError> {
    let n = raw.trim();
    let len = n.chars().count();
    if !(2..=64).contains(&len) || !n.chars().all(is_name_char) {
        return Err(ValidationError::Name);
    }
    Ok(n.to_owned())
}

/// Trimmed length of at least 2.
pub fn company(raw: &str) -> Result<String, ValidationError> {
    let c = raw.trim();
    if c.chars().count() < 2 {
        return Err(ValidationError::Company);
    }
    Ok(c.to_owned())
}

/// At least 7 digits once separators are stripped. The trimmed original is
/// kept as the submitted value.
pub fn phone(raw: &str) -> Result<String, ValidationError> {
    let p = raw.trim();
    if p.chars().filter(char::is_ascii_digit).count() < 7 {
        return Err(ValidationError::Phone);
    }
    Ok(p.to_owned())
}

/// `local@domain.tld` shape: no whitespace, a single `@`, at least one dot
/// inside the domain with characters on both sides.
pub fn email(raw: &str) -> Result<String, ValidationError> {
    let e = raw.trim();
    let mut parts = e.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::Email);
    };
    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if local.is_empty() || e.chars().any(char::is_whitespace) || !has_inner_dot {
        return Err(ValidationError::Email);
    }
    Ok(e.to_owned())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('\u{0410}'..='\u{044F}').contains(&c)
        || c == '\u{0401}'
        || c == '\u{0451}'
        || c.is_whitespace()
        || c == '-'
}
