use serde::Serialize;

use super::Email;

/// An extracurricular activity and its current roster.
///
/// The activity name is not part of the record; it is the key the record is
/// stored under in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: usize,
    /// Signup order, no duplicates.
    pub participants: Vec<Email>,
}

impl Activity {
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: usize,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_participants(mut self, participants: Vec<Email>) -> Self {
        self.participants = participants;
        self
    }

    pub fn is_registered(&self, email: &Email) -> bool {
        self.participants.contains(email)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants
    }
}
