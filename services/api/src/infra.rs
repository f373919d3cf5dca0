use campus_nest::roommates::{
    is_opted_in_candidate, DirectoryError, RosterImport, UserDirectory, UserId, UserRecord,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local user directory; records keep their insertion order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryUserDirectory {
    records: Arc<Mutex<Vec<UserRecord>>>,
}

impl InMemoryUserDirectory {
    /// Builds a directory from an imported roster, dropping ids that already exist.
    pub(crate) fn seeded(import: RosterImport) -> Self {
        let directory = Self::default();
        for record in import.users {
            let id = record.id.clone();
            if let Err(err) = directory.insert(record) {
                warn!(user = %id, %err, "roster user not seeded");
            }
        }
        directory
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<UserRecord>>, DirectoryError> {
        self.records
            .lock()
            .map_err(|_| DirectoryError::Unavailable("user directory mutex poisoned".to_string()))
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn insert(&self, record: UserRecord) -> Result<UserRecord, DirectoryError> {
        let mut guard = self.lock()?;
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
        let mut guard = self.lock()?;
        let slot = guard
            .iter_mut()
            .find(|existing| &existing.id == id)
            .ok_or(DirectoryError::NotFound)?;
        apply(slot);
        Ok(slot.clone())
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, DirectoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn opted_in(&self, excluding: &UserId) -> Result<Vec<UserRecord>, DirectoryError> {
        let guard = self.lock()?;
        Ok(guard
            .iter()
            .filter(|record| is_opted_in_candidate(record, excluding))
            .cloned()
            .collect())
    }
}
