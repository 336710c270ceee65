use thiserror::Error;

use super::{Email, EmailError};

/// Errors returned by activity directory operations.
#[derive(Debug, Error, PartialEq)]
pub enum DirectoryError {
    #[error("Activity not found")]
    ActivityNotFound(String),
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),
    #[error("{0} is already signed up for this activity")]
    AlreadyRegistered(Email),
    #[error("{0} is not registered for this activity")]
    NotRegistered(Email),
    #[error("Activity is full")]
    CapacityExceeded { activity: String, max_participants: usize },
    #[error("{email} is not a {domain} address")]
    EmailOutsideDomain { email: Email, domain: String },
}
