//! In-memory activity store.
//!
//! The activity map is seeded at startup and lives for the process
//! lifetime; signup/unregister are the only mutation paths. An async
//! `RwLock` serializes concurrent mutation of a roster.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::models::Activity;

/// Owned activity state. Constructed once in `main` (or a test) and
/// shared with handlers through the application state.
pub struct ActivityStore {
    activities: RwLock<BTreeMap<String, Activity>>,
}

impl ActivityStore {
    pub fn new(activities: BTreeMap<String, Activity>) -> Self {
        Self {
            activities: RwLock::new(activities),
        }
    }

    /// Store preloaded with the Mergington High School activity roster.
    pub fn with_seed_data() -> Self {
        Self::new(seed_activities())
    }

    /// Full activity map, unfiltered.
    pub async fn list(&self) -> BTreeMap<String, Activity> {
        self.activities.read().await.clone()
    }

    /// Adds `email` to the activity's roster, preserving signup order.
    ///
    /// Capacity (`max_participants`) is intentionally not checked; see
    /// DESIGN.md.
    pub async fn signup(&self, activity_name: &str, email: &str) -> Result<(), ApiError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(activity_name)
            .ok_or_else(|| ApiError::NotFound("Activity not found".into()))?;

        if activity.participants.iter().any(|p| p == email) {
            return Err(ApiError::Conflict("Student is already signed up".into()));
        }

        activity.participants.push(email.to_string());
        Ok(())
    }

    /// Removes `email` from the activity's roster.
    pub async fn unregister(&self, activity_name: &str, email: &str) -> Result<(), ApiError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(activity_name)
            .ok_or_else(|| ApiError::NotFound("Activity not found".into()))?;

        let position = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or_else(|| {
                ApiError::Conflict("Student is not signed up for this activity".into())
            })?;

        activity.participants.remove(position);
        Ok(())
    }
}

fn activity(
    description: &str,
    schedule: &str,
    max_participants: u32,
    participants: &[&str],
) -> Activity {
    Activity {
        description: description.to_string(),
        schedule: schedule.to_string(),
        max_participants,
        participants: participants.iter().map(|p| p.to_string()).collect(),
    }
}

fn seed_activities() -> BTreeMap<String, Activity> {
    BTreeMap::from([
        (
            "Chess Club".to_string(),
            activity(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
                &["michael@mergington.edu", "daniel@mergington.edu"],
            ),
        ),
        (
            "Programming Class".to_string(),
            activity(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
                &["emma@mergington.edu", "sophia@mergington.edu"],
            ),
        ),
        (
            "Gym Class".to_string(),
            activity(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
                &["john@mergington.edu", "olivia@mergington.edu"],
            ),
        ),
        (
            "Soccer Team".to_string(),
            activity(
                "Join the school soccer team and compete in matches",
                "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
                22,
                &["liam@mergington.edu", "noah@mergington.edu"],
            ),
        ),
        (
            "Basketball Team".to_string(),
            activity(
                "Practice and play basketball with the school team",
                "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
                15,
                &["ava@mergington.edu", "mia@mergington.edu"],
            ),
        ),
        (
            "Art Club".to_string(),
            activity(
                "Explore your creativity through painting and drawing",
                "Thursdays, 3:30 PM - 5:00 PM",
                15,
                &["amelia@mergington.edu", "harper@mergington.edu"],
            ),
        ),
        (
            "Drama Club".to_string(),
            activity(
                "Act, direct, and produce plays and performances",
                "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
                20,
                &["ella@mergington.edu", "scarlett@mergington.edu"],
            ),
        ),
        (
            "Math Club".to_string(),
            activity(
                "Solve challenging problems and participate in math competitions",
                "Tuesdays, 3:30 PM - 4:30 PM",
                10,
                &["james@mergington.edu", "benjamin@mergington.edu"],
            ),
        ),
        (
            "Debate Team".to_string(),
            activity(
                "Develop public speaking and argumentation skills",
                "Fridays, 4:00 PM - 5:30 PM",
                12,
                &["charlotte@mergington.edu", "henry@mergington.edu"],
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_contains_all_nine_activities() {
        let store = ActivityStore::with_seed_data();
        let activities = store.list().await;

        assert_eq!(activities.len(), 9);
        let chess = &activities["Chess Club"];
        assert_eq!(chess.max_participants, 12);
        assert_eq!(
            chess.participants,
            vec!["michael@mergington.edu", "daniel@mergington.edu"]
        );
    }

    #[tokio::test]
    async fn signup_appends_in_order() {
        let store = ActivityStore::with_seed_data();

        store
            .signup("Chess Club", "new@mergington.edu")
            .await
            .unwrap();

        let activities = store.list().await;
        assert_eq!(
            activities["Chess Club"].participants,
            vec![
                "michael@mergington.edu",
                "daniel@mergington.edu",
                "new@mergington.edu"
            ]
        );
    }

    #[tokio::test]
    async fn duplicate_signup_is_a_conflict() {
        let store = ActivityStore::with_seed_data();

        let err = store
            .signup("Chess Club", "michael@mergington.edu")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Conflict("Student is already signed up".into())
        );
    }

    #[tokio::test]
    async fn unregister_of_non_member_is_a_conflict() {
        let store = ActivityStore::with_seed_data();

        let err = store
            .unregister("Chess Club", "nobody@mergington.edu")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Conflict("Student is not signed up for this activity".into())
        );
    }

    #[tokio::test]
    async fn unknown_activity_is_not_found() {
        let store = ActivityStore::with_seed_data();

        let signup_err = store
            .signup("Knitting Circle", "new@mergington.edu")
            .await
            .unwrap_err();
        let unregister_err = store
            .unregister("Knitting Circle", "new@mergington.edu")
            .await
            .unwrap_err();

        assert_eq!(signup_err, ApiError::NotFound("Activity not found".into()));
        assert_eq!(
            unregister_err,
            ApiError::NotFound("Activity not found".into())
        );
    }

    #[tokio::test]
    async fn signup_then_unregister_restores_the_roster() {
        let store = ActivityStore::with_seed_data();
        let before = store.list().await["Math Club"].participants.clone();

        store
            .signup("Math Club", "new@mergington.edu")
            .await
            .unwrap();
        store
            .unregister("Math Club", "new@mergington.edu")
            .await
            .unwrap();

        assert_eq!(store.list().await["Math Club"].participants, before);
    }

    #[tokio::test]
    async fn signup_does_not_enforce_capacity() {
        let store = ActivityStore::with_seed_data();

        // Math Club caps at 10 with 2 seeded; push it past the cap.
        for n in 0..12 {
            store
                .signup("Math Club", &format!("student{}@mergington.edu", n))
                .await
                .unwrap();
        }

        let activities = store.list().await;
        let math = &activities["Math Club"];
        assert!(math.participants.len() as u32 > math.max_participants);
    }
}
