use models::Record;

use crate::store::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("user {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// The authoritative user list and the file it is mirrored to.
///
/// Every mutation is staged on a copy, written to disk, and only then
/// committed, so memory and the file agree after each call returns.
#[derive(Debug)]
pub struct Directory {
    users: Vec<Record>,
    store: UserStore,
}

impl Directory {
    /// Load whatever the store already holds.
    pub fn open(store: UserStore) -> Result<Self, StoreError> {
        let users = store.load()?;
        tracing::info!(count = users.len(), path = %store.path().display(), "user list loaded");
        Ok(Self { users, store })
    }

    pub fn users(&self) -> &[Record] {
        &self.users
    }

    pub fn create(&mut self, record: Record) -> Result<Record, DirectoryError> {
        let mut next = self.users.clone();
        next.push(record.clone());
        self.commit(next)?;
        tracing::debug!(id = ?record.id(), "user created");
        Ok(record)
    }

    /// Replace the first record whose id is `id` with `record`.
    ///
    /// The replacement keeps whatever id its body carries, which may differ
    /// from `id`.
    pub fn update(&mut self, id: &str, record: Record) -> Result<Record, DirectoryError> {
        let index = self
            .users
            .iter()
            .position(|u| u.has_id(id))
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;
        let mut next = self.users.clone();
        next[index] = record.clone();
        self.commit(next)?;
        tracing::debug!(%id, index, new_id = ?record.id(), "user updated");
        Ok(record)
    }

    /// Drop every record whose id is `id`. Returns how many were removed.
    pub fn delete(&mut self, id: &str) -> Result<usize, DirectoryError> {
        let next: Vec<Record> = self.users.iter().filter(|u| !u.has_id(id)).cloned().collect();
        let removed = self.users.len() - next.len();
        self.commit(next)?;
        tracing::debug!(%id, removed, "users deleted");
        Ok(removed)
    }

    fn commit(&mut self, next: Vec<Record>) -> Result<(), StoreError> {
        self.store.save(&next)?;
        self.users = next;
        Ok(())
    }
}
