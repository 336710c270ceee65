//! The activities every fresh directory starts with, and the data-quality
//! rules that dataset has to satisfy.

use std::collections::HashSet;

use thiserror::Error;

use super::{Activities, Activity, Email, EmailError};

struct SeedActivity {
    name: &'static str,
    description: &'static str,
    schedule: &'static str,
    max_participants: usize,
    participants: &'static [&'static str],
}

const SEED_ACTIVITIES: &[SeedActivity] = &[
    SeedActivity {
        name: "Chess Club",
        description: "Learn strategies and compete in chess tournaments",
        schedule: "Fridays, 3:30 PM - 5:00 PM",
        max_participants: 12,
        participants: &["michael@mergington.edu", "daniel@mergington.edu"],
    },
    SeedActivity {
        name: "Programming Class",
        description: "Learn programming fundamentals and build software projects",
        schedule: "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
        max_participants: 20,
        participants: &["emma@mergington.edu", "sophia@mergington.edu"],
    },
    SeedActivity {
        name: "Gym Class",
        description: "Physical education and sports activities",
        schedule: "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
        max_participants: 30,
        participants: &["john@mergington.edu", "olivia@mergington.edu"],
    },
    SeedActivity {
        name: "Soccer Team",
        description: "Train with the school team and play in the regional league",
        schedule: "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
        max_participants: 22,
        participants: &["liam@mergington.edu", "noah@mergington.edu"],
    },
    SeedActivity {
        name: "Basketball Team",
        description: "Practice drills and compete in inter-school basketball games",
        schedule: "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
        max_participants: 15,
        participants: &["ava@mergington.edu"],
    },
    SeedActivity {
        name: "Art Club",
        description: "Explore painting, drawing and sculpture with guest artists",
        schedule: "Thursdays, 3:30 PM - 5:00 PM",
        max_participants: 18,
        participants: &["isabella@mergington.edu", "mia@mergington.edu"],
    },
    SeedActivity {
        name: "Drama Club",
        description: "Rehearse and perform plays for the school community",
        schedule: "Wednesdays, 3:30 PM - 5:30 PM",
        max_participants: 25,
        participants: &["amelia@mergington.edu"],
    },
    SeedActivity {
        name: "Math Olympiad",
        description: "Solve challenging problems and prepare for math competitions",
        schedule: "Mondays, 3:30 PM - 4:30 PM",
        max_participants: 10,
        participants: &["james@mergington.edu", "charlotte@mergington.edu"],
    },
    SeedActivity {
        name: "Science Workshop",
        description: "Hands-on experiments and projects for the science fair",
        schedule: "Fridays, 2:00 PM - 3:30 PM",
        max_participants: 16,
        participants: &[],
    },
];

/// Build the startup dataset.
pub fn activities() -> Result<Activities, EmailError> {
    SEED_ACTIVITIES
        .iter()
        .map(|seed| {
            let participants = seed
                .participants
                .iter()
                .map(|participant| Email::try_from(*participant))
                .collect::<Result<Vec<_>, _>>()?;

            let activity = Activity::new(seed.description, seed.schedule, seed.max_participants)
                .with_participants(participants);

            Ok((seed.name.to_owned(), activity))
        })
        .collect()
}

/// A data-quality problem found in a set of activities.
#[derive(Debug, Error, PartialEq)]
pub enum SeedViolation {
    #[error("'{0}' has an empty name")]
    EmptyName(String),
    #[error("'{0}' clashes with another activity name when case is ignored")]
    DuplicateName(String),
    #[error("'{0}' needs a description longer than 10 characters starting with a capital")]
    WeakDescription(String),
    #[error("'{0}' needs a schedule longer than 5 characters")]
    WeakSchedule(String),
    #[error("'{0}' must allow at least one participant")]
    NoCapacity(String),
    #[error("'{activity}' has {participants} participants but allows {max_participants}")]
    OverCapacity {
        activity: String,
        participants: usize,
        max_participants: usize,
    },
    #[error("'{activity}' lists {email} more than once")]
    DuplicateParticipant { activity: String, email: Email },
    #[error("'{activity}' lists {email}, which is not a {domain} address")]
    ForeignParticipant {
        activity: String,
        email: Email,
        domain: String,
    },
}

/// Check `activities` against the rules the startup dataset must follow.
///
/// Returns every violation found; an empty vector means the data is clean.
pub fn validate(activities: &Activities, school_domain: &str) -> Vec<SeedViolation> {
    let mut violations = Vec::new();
    let mut seen_names = HashSet::new();

    for (name, activity) in activities {
        if name.trim().is_empty() {
            violations.push(SeedViolation::EmptyName(name.clone()));
        }
        if !seen_names.insert(name.to_lowercase()) {
            violations.push(SeedViolation::DuplicateName(name.clone()));
        }

        let description_ok = activity.description.chars().count() > 10
            && activity
                .description
                .chars()
                .next()
                .is_some_and(char::is_uppercase);
        if !description_ok {
            violations.push(SeedViolation::WeakDescription(name.clone()));
        }
        if activity.schedule.chars().count() <= 5 {
            violations.push(SeedViolation::WeakSchedule(name.clone()));
        }

        if activity.max_participants == 0 {
            violations.push(SeedViolation::NoCapacity(name.clone()));
        }
        if activity.participants.len() > activity.max_participants {
            violations.push(SeedViolation::OverCapacity {
                activity: name.clone(),
                participants: activity.participants.len(),
                max_participants: activity.max_participants,
            });
        }

        let mut seen_participants = HashSet::new();
        for email in &activity.participants {
            if !seen_participants.insert(email) {
                violations.push(SeedViolation::DuplicateParticipant {
                    activity: name.clone(),
                    email: email.clone(),
                });
            }
            if !email.has_domain(school_domain) {
                violations.push(SeedViolation::ForeignParticipant {
                    activity: name.clone(),
                    email: email.clone(),
                    domain: school_domain.to_owned(),
                });
            }
        }
    }

    violations
}
