use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::roommates::domain::{
    AuthenticatedPrincipal, BudgetDocument, BudgetRange, Cleanliness, CookingFrequency, Habits,
    HabitsDocument, NoiseTolerance, ProfileDocument, RoommateProfile, SleepSchedule, UserId,
    UserRecord,
};
use crate::roommates::repository::{is_opted_in_candidate, DirectoryError, UserDirectory};
use crate::roommates::scoring::ScoringConfig;
use crate::roommates::service::RoommateMatchService;

pub(super) fn shared_habits() -> Habits {
    Habits {
        sleep_schedule: Some(SleepSchedule::Early),
        cleanliness: Cleanliness::new(4),
        noise: Some(NoiseTolerance::Quiet),
        smoking: Some(false),
        pets: Some(true),
        cooking: Some(CookingFrequency::Often),
    }
}

pub(super) fn interests(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Requester profile from the reference scenario.
pub(super) fn profile_a() -> RoommateProfile {
    RoommateProfile {
        university: Some("X".to_string()),
        budget: Some(BudgetRange {
            min: 1_000_000.0,
            max: 1_500_000.0,
        }),
        habits: Some(shared_habits()),
        interests: interests(&["reading", "gaming"]),
        looking_for_roommate: true,
        ..RoommateProfile::default()
    }
}

/// Candidate profile from the reference scenario.
pub(super) fn profile_b() -> RoommateProfile {
    RoommateProfile {
        university: Some("X".to_string()),
        budget: Some(BudgetRange {
            min: 1_200_000.0,
            max: 1_600_000.0,
        }),
        habits: Some(shared_habits()),
        interests: interests(&["gaming", "music"]),
        looking_for_roommate: true,
        ..RoommateProfile::default()
    }
}

pub(super) fn document(university: &str, interests_list: &[&str]) -> ProfileDocument {
    ProfileDocument {
        university: Some(university.to_string()),
        major: Some("Computer Science".to_string()),
        habits: Some(HabitsDocument {
            sleep_schedule: Some("early".to_string()),
            cleanliness: Some(4.0),
            noise: Some("quiet".to_string()),
            smoking: Some(false),
            pets: Some(false),
            cooking: Some("often".to_string()),
        }),
        interests: interests(interests_list),
        budget: Some(BudgetDocument {
            min: 1_000_000.0,
            max: 1_500_000.0,
        }),
        special_needs: None,
        bio: Some("Quiet student, early riser".to_string()),
        looking_for_roommate: true,
    }
}

pub(super) fn user(id: &str, profile: Option<ProfileDocument>) -> UserRecord {
    let mut record = UserRecord::new(UserId::new(id), format!("User {id}"));
    record.avatar = format!("/uploads/{id}.png");
    record.roommate_profile = profile;
    record
}

pub(super) fn principal(id: &str) -> AuthenticatedPrincipal {
    AuthenticatedPrincipal::new(UserId::new(id))
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    records: Arc<Mutex<Vec<UserRecord>>>,
    candidate_queries: Arc<AtomicUsize>,
}

impl MemoryDirectory {
    pub(super) fn with_users(users: Vec<UserRecord>) -> Self {
        let directory = Self::default();
        for record in users {
            directory.insert(record).expect("unique test users");
        }
        directory
    }

    pub(super) fn candidate_queries(&self) -> usize {
        self.candidate_queries.load(Ordering::SeqCst)
    }

    pub(super) fn get(&self, id: &str) -> Option<UserRecord> {
        self.fetch(&UserId::new(id)).expect("memory fetch")
    }
}

impl UserDirectory for MemoryDirectory {
    fn insert(&self, record: UserRecord) -> Result<UserRecord, DirectoryError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(DirectoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn modify(
        &self,
        id: &UserId,
        apply: &mut dyn FnMut(&mut UserRecord),
    ) -> Result<UserRecord, DirectoryError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| &existing.id == id)
            .ok_or(DirectoryError::NotFound)?;
        apply(slot);
        Ok(slot.clone())
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, DirectoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn opted_in(&self, excluding: &UserId) -> Result<Vec<UserRecord>, DirectoryError> {
        self.candidate_queries.fetch_add(1, Ordering::SeqCst);
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| is_opted_in_candidate(record, excluding))
            .cloned()
            .collect())
    }
}

/// Directory whose lookups block until every party has arrived, so callers race on writes.
pub(super) struct GatedDirectory {
    pub(super) inner: MemoryDirectory,
    pub(super) gate: Arc<Barrier>,
}

impl UserDirectory for GatedDirectory {
    fn insert(&self, record: UserRecord) -> Result<UserRecord, DirectoryError> {
        self.inner.insert(record)
    }

    fn modify(
        &self,
        id: &UserId,
        apply: &mut dyn FnMut(&mut UserRecord),
    ) -> Result<UserRecord, DirectoryError> {
        self.inner.modify(id, apply)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, DirectoryError> {
        let record = self.inner.fetch(id);
        self.gate.wait();
        record
    }

    fn opted_in(&self, excluding: &UserId) -> Result<Vec<UserRecord>, DirectoryError> {
        self.inner.opted_in(excluding)
    }
}

pub(super) struct UnavailableDirectory;

impl UserDirectory for UnavailableDirectory {
    fn insert(&self, _record: UserRecord) -> Result<UserRecord, DirectoryError> {
        Err(DirectoryError::Unavailable("offline".to_string()))
    }

    fn modify(
        &self,
        _id: &UserId,
        _apply: &mut dyn FnMut(&mut UserRecord),
    ) -> Result<UserRecord, DirectoryError> {
        Err(DirectoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &UserId) -> Result<Option<UserRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("offline".to_string()))
    }

    fn opted_in(&self, _excluding: &UserId) -> Result<Vec<UserRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("offline".to_string()))
    }
}

pub(super) fn service_with(
    users: Vec<UserRecord>,
) -> (Arc<RoommateMatchService<MemoryDirectory>>, MemoryDirectory) {
    let directory = MemoryDirectory::with_users(users);
    let service = Arc::new(RoommateMatchService::new(
        Arc::new(directory.clone()),
        ScoringConfig::default(),
    ));
    (service, directory)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
