use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use thiserror::Error;

/// A participant email address with a checked shape.
///
/// Rosters are keyed by exact address, so anything that cannot be a mailbox
/// (no `@`, several `@`, empty local part, undotted domain) is refused before
/// it reaches a participant list. Whether the address belongs to the school
/// is a separate, configurable question, see [`Email::has_domain`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

#[derive(Error, Debug, PartialEq)]
pub enum EmailError {
    #[error("'{0}' is not a valid email: must contain exactly one '@'")]
    InvalidFormat(String),
    #[error("'{0}' is not a valid email: missing local part")]
    MissingLocalPart(String),
    #[error("'{0}' is not a valid email: invalid domain part")]
    InvalidDomainPart(String),
}

impl Email {
    /// Whether the address is hosted on `domain`.
    ///
    /// `domain` may be given with or without the leading `@`.
    pub fn has_domain(&self, domain: &str) -> bool {
        let domain = domain.trim_start_matches('@');
        self.0
            .rsplit_once('@')
            .is_some_and(|(_, host)| host.eq_ignore_ascii_case(domain))
    }
}

impl TryFrom<&str> for Email {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut parts = value.split('@');
        let local_part = parts.next();
        let domain_part = parts.next();
        let extra_part = parts.next();

        if extra_part.is_some() {
            return Err(EmailError::InvalidFormat(value.to_string()));
        }

        if domain_part.is_none() {
            return Err(EmailError::InvalidFormat(value.to_string()));
        }

        if local_part.unwrap_or_default().trim().is_empty() {
            return Err(EmailError::MissingLocalPart(value.to_string()));
        }

        let domain = domain_part.unwrap_or_default();
        if domain.trim().is_empty()
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
        {
            return Err(EmailError::InvalidDomainPart(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl Deref for Email {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
