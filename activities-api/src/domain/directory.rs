use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::RwLock;

use super::{Activity, DirectoryError, Email};

/// All activities, keyed by their exact (case-sensitive) name.
pub type Activities = BTreeMap<String, Activity>;

/// Rules applied on signup on top of the duplicate check.
#[derive(Debug, Clone)]
pub struct SignupPolicy {
    /// Reject signups once an activity holds `max_participants` people.
    pub enforce_capacity: bool,
    /// Only accept addresses on this domain, e.g. `@mergington.edu`.
    pub required_domain: Option<String>,
}

impl Default for SignupPolicy {
    fn default() -> Self {
        Self {
            enforce_capacity: true,
            required_domain: None,
        }
    }
}

/// In-memory registry of activities and their participants.
///
/// Cloning is cheap and every clone shares the same underlying store. Each
/// signup and unregister holds the write lock for its whole check-and-update,
/// so the duplicate and capacity checks cannot race.
#[derive(Debug, Clone)]
pub struct ActivityDirectory {
    activities: Arc<RwLock<Activities>>,
    policy: Arc<SignupPolicy>,
}

impl ActivityDirectory {
    pub fn new(activities: Activities) -> Self {
        Self {
            activities: Arc::new(RwLock::new(activities)),
            policy: Arc::new(SignupPolicy::default()),
        }
    }

    pub fn with_policy(mut self, policy: SignupPolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn policy(&self) -> &SignupPolicy {
        &self.policy
    }

    /// Every activity as currently held.
    pub async fn list_activities(&self) -> Activities {
        self.activities.read().await.clone()
    }

    /// Add `email` to the participants of `activity_name`.
    ///
    /// The activity is looked up before `email` is parsed or checked against
    /// the required domain, so an unknown activity always reports
    /// [`DirectoryError::ActivityNotFound`]. Returns the confirmation message
    /// shown to the caller.
    pub async fn signup(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<String, DirectoryError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(activity_name)
            .ok_or_else(|| DirectoryError::ActivityNotFound(activity_name.to_owned()))?;

        let email = Email::try_from(email)?;
        if let Some(domain) = &self.policy.required_domain {
            if !email.has_domain(domain) {
                return Err(DirectoryError::EmailOutsideDomain {
                    email,
                    domain: domain.clone(),
                });
            }
        }

        if activity.is_registered(&email) {
            return Err(DirectoryError::AlreadyRegistered(email));
        }

        if self.policy.enforce_capacity && activity.is_full() {
            return Err(DirectoryError::CapacityExceeded {
                activity: activity_name.to_owned(),
                max_participants: activity.max_participants,
            });
        }

        let message = format!("Signed up {} for {}", email, activity_name);
        activity.participants.push(email);
        tracing::info!(
            activity = activity_name,
            participants = activity.participants.len(),
            "{}",
            message
        );

        Ok(message)
    }

    /// Remove `email` from the participants of `activity_name`.
    ///
    /// The remaining participants keep their signup order. As with
    /// [`signup`](Self::signup), the activity is looked up first.
    pub async fn unregister(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<String, DirectoryError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(activity_name)
            .ok_or_else(|| DirectoryError::ActivityNotFound(activity_name.to_owned()))?;

        let email = Email::try_from(email)?;

        let position = activity
            .participants
            .iter()
            .position(|participant| *participant == email)
            .ok_or_else(|| DirectoryError::NotRegistered(email.clone()))?;
        activity.participants.remove(position);

        let message = format!("Unregistered {} from {}", email, activity_name);
        tracing::info!(
            activity = activity_name,
            participants = activity.participants.len(),
            "{}",
            message
        );

        Ok(message)
    }

    /// Copy of the whole directory, for later [`restore`](Self::restore).
    pub async fn snapshot(&self) -> Activities {
        self.list_activities().await
    }

    /// Replace the whole directory with `snapshot`.
    pub async fn restore(&self, snapshot: Activities) {
        *self.activities.write().await = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmailError;

    fn email(value: &str) -> Email {
        Email::try_from(value).unwrap()
    }

    fn directory() -> ActivityDirectory {
        let mut activities = Activities::new();
        activities.insert(
            "Test Activity".to_string(),
            Activity::new("A test activity for testing purposes", "Test schedule", 5)
                .with_participants(vec![
                    email("test1@mergington.edu"),
                    email("test2@mergington.edu"),
                ]),
        );
        activities.insert(
            "Empty Activity".to_string(),
            Activity::new("An empty activity with no participants", "Empty schedule", 10),
        );
        ActivityDirectory::new(activities)
    }

    async fn participants(directory: &ActivityDirectory, name: &str) -> Vec<Email> {
        directory.list_activities().await[name].participants.clone()
    }

    #[tokio::test]
    async fn list_returns_every_activity() {
        let activities = directory().list_activities().await;
        assert_eq!(activities.len(), 2);
        assert!(activities.contains_key("Test Activity"));
        assert!(activities["Empty Activity"].participants.is_empty());
    }

    #[tokio::test]
    async fn signup_appends_participant() {
        let directory = directory();

        let message = directory
            .signup("Test Activity", &email("new@mergington.edu"))
            .await
            .unwrap();

        assert_eq!(message, "Signed up new@mergington.edu for Test Activity");
        assert_eq!(
            participants(&directory, "Test Activity").await,
            vec![
                email("test1@mergington.edu"),
                email("test2@mergington.edu"),
                email("new@mergington.edu"),
            ]
        );
    }

    #[tokio::test]
    async fn signup_is_visible_through_clones() {
        let directory = directory();
        let handle = directory.clone();

        handle
            .signup("Empty Activity", &email("new@mergington.edu"))
            .await
            .unwrap();

        assert_eq!(
            participants(&directory, "Empty Activity").await,
            vec![email("new@mergington.edu")]
        );
    }

    #[tokio::test]
    async fn signup_rejects_existing_participant() {
        let directory = directory();

        let err = directory
            .signup("Test Activity", &email("test1@mergington.edu"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DirectoryError::AlreadyRegistered(email("test1@mergington.edu"))
        );
        assert_eq!(participants(&directory, "Test Activity").await.len(), 2);
    }

    #[tokio::test]
    async fn signup_requires_exact_activity_name() {
        let directory = directory();

        let err = directory
            .signup("test activity", &email("new@mergington.edu"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DirectoryError::ActivityNotFound("test activity".to_string())
        );
        assert_eq!(err.to_string(), "Activity not found");
    }

    #[tokio::test]
    async fn signup_rejects_full_activity() {
        let directory = directory();
        for i in 3..=5 {
            directory
                .signup("Test Activity", &email(&format!("test{i}@mergington.edu")))
                .await
                .unwrap();
        }

        let err = directory
            .signup("Test Activity", &email("late@mergington.edu"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DirectoryError::CapacityExceeded {
                activity: "Test Activity".to_string(),
                max_participants: 5,
            }
        );
        assert_eq!(participants(&directory, "Test Activity").await.len(), 5);
    }

    #[tokio::test]
    async fn capacity_check_can_be_disabled() {
        let directory = directory().with_policy(SignupPolicy {
            enforce_capacity: false,
            required_domain: None,
        });
        for i in 3..=6 {
            directory
                .signup("Test Activity", &email(&format!("test{i}@mergington.edu")))
                .await
                .unwrap();
        }

        assert_eq!(participants(&directory, "Test Activity").await.len(), 6);
    }

    #[tokio::test]
    async fn required_domain_is_enforced_on_signup() {
        let directory = directory().with_policy(SignupPolicy {
            enforce_capacity: true,
            required_domain: Some("@mergington.edu".to_string()),
        });

        let err = directory
            .signup("Empty Activity", &email("outsider@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::EmailOutsideDomain { .. }));

        directory
            .signup("Empty Activity", &email("insider@mergington.edu"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unregister_removes_participant_and_keeps_order() {
        let directory = directory();
        directory
            .signup("Test Activity", &email("test3@mergington.edu"))
            .await
            .unwrap();

        let message = directory
            .unregister("Test Activity", &email("test2@mergington.edu"))
            .await
            .unwrap();

        assert_eq!(message, "Unregistered test2@mergington.edu from Test Activity");
        assert_eq!(
            participants(&directory, "Test Activity").await,
            vec![email("test1@mergington.edu"), email("test3@mergington.edu")]
        );
    }

    #[tokio::test]
    async fn unregister_rejects_absent_participant() {
        let directory = directory();

        let err = directory
            .unregister("Test Activity", &email("ghost@mergington.edu"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DirectoryError::NotRegistered(email("ghost@mergington.edu"))
        );
        assert!(err.to_string().contains("not registered"));
    }

    #[tokio::test]
    async fn unregister_rejects_unknown_activity() {
        let err = directory()
            .unregister("Nonexistent Activity", &email("test1@mergington.edu"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DirectoryError::ActivityNotFound("Nonexistent Activity".to_string())
        );
    }

    #[tokio::test]
    async fn unknown_activity_is_reported_before_invalid_email() {
        let directory = directory();

        let err = directory
            .signup("Nonexistent Activity", "not-an-email")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DirectoryError::ActivityNotFound("Nonexistent Activity".to_string())
        );

        let err = directory
            .unregister("Nonexistent Activity", "bad")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DirectoryError::ActivityNotFound("Nonexistent Activity".to_string())
        );
    }

    #[tokio::test]
    async fn unknown_activity_is_reported_before_foreign_domain() {
        let directory = directory().with_policy(SignupPolicy {
            enforce_capacity: true,
            required_domain: Some("@mergington.edu".to_string()),
        });

        let err = directory
            .signup("Nonexistent Activity", "x@example.com")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DirectoryError::ActivityNotFound("Nonexistent Activity".to_string())
        );
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_for_known_activity() {
        let directory = directory();

        let err = directory
            .signup("Test Activity", "not-an-email")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DirectoryError::InvalidEmail(EmailError::InvalidFormat("not-an-email".to_string()))
        );
        assert_eq!(participants(&directory, "Test Activity").await.len(), 2);
    }

    #[tokio::test]
    async fn signup_then_unregister_restores_roster() {
        let directory = directory();
        let before = participants(&directory, "Test Activity").await;

        directory
            .signup("Test Activity", &email("flow@mergington.edu"))
            .await
            .unwrap();
        directory
            .unregister("Test Activity", &email("flow@mergington.edu"))
            .await
            .unwrap();

        assert_eq!(participants(&directory, "Test Activity").await, before);
    }

    #[tokio::test]
    async fn restore_undoes_changes_since_snapshot() {
        let directory = directory();
        let snapshot = directory.snapshot().await;

        directory
            .signup("Empty Activity", &email("new@mergington.edu"))
            .await
            .unwrap();
        directory
            .unregister("Test Activity", &email("test1@mergington.edu"))
            .await
            .unwrap();
        assert_ne!(directory.list_activities().await, snapshot);

        directory.restore(snapshot.clone()).await;
        assert_eq!(directory.list_activities().await, snapshot);
    }

    #[tokio::test]
    async fn concurrent_signups_respect_capacity() {
        let directory = directory();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let directory = directory.clone();
                tokio::spawn(async move {
                    directory
                        .signup("Empty Activity", &email(&format!("s{i}@mergington.edu")))
                        .await
                })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 10);
        assert_eq!(participants(&directory, "Empty Activity").await.len(), 10);
    }
}
