use super::domain::{UserId, UserRecord};

/// Storage abstraction over the user document store so the service can be exercised in isolation.
pub trait UserDirectory: Send + Sync {
    fn insert(&self, record: UserRecord) -> Result<UserRecord, DirectoryError>;
    /// Applies `apply` to the stored record and persists the result as one atomic step.
    ///
    /// Returns the record as stored afterwards, or `NotFound` when `id` is unknown.
    fn modify(
        &self,
        id: &UserId,
        apply: &mut dyn FnMut(&mut UserRecord),
    ) -> Result<UserRecord, DirectoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, DirectoryError>;
    /// Users whose roommate profile has `lookingForRoommate` set, minus `excluding`, in
    /// storage order.
    fn opted_in(&self, excluding: &UserId) -> Result<Vec<UserRecord>, DirectoryError>;
}

/// Error enumeration for directory failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Shared filter for directory implementations answering [`UserDirectory::opted_in`].
pub fn is_opted_in_candidate(record: &UserRecord, excluding: &UserId) -> bool {
    &record.id != excluding
        && record
            .roommate_profile
            .as_ref()
            .map(|profile| profile.looking_for_roommate)
            .unwrap_or(false)
}
