use async_trait::async_trait;

use models::PersonId;

use super::domain::{Person, PersonInput};
use super::errors::StoreError;

/// Durable storage for person records.
///
/// Implementations must enforce email uniqueness atomically inside `insert`
/// and `replace_by_id`; the service never checks it with a prior read.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Persist a new record. `DuplicateKey` if the email is taken.
    async fn insert(&self, person: &Person) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: PersonId) -> Result<Person, StoreError>;
    /// Exact, case-sensitive match on email.
    async fn find_by_email(&self, email: &str) -> Result<Person, StoreError>;
    /// Overwrite every field except the identifier.
    async fn replace_by_id(&self, id: PersonId, fields: &PersonInput) -> Result<(), StoreError>;
    async fn delete_by_id(&self, id: PersonId) -> Result<(), StoreError>;
}

/// Simple in-memory store for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Tables {
        by_id: HashMap<PersonId, Person>,
        by_email: HashMap<String, PersonId>,
    }

    /// Both maps sit behind one lock, so each check-and-write is atomic.
    #[derive(Default)]
    pub struct MemoryPersonStore {
        tables: Mutex<Tables>,
    }

    impl MemoryPersonStore {
        fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
            self.tables.lock().map_err(|e| StoreError::Backend(e.to_string()))
        }

        pub fn len(&self) -> usize {
            self.lock().map(|t| t.by_id.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl PersonStore for MemoryPersonStore {
        async fn insert(&self, person: &Person) -> Result<(), StoreError> {
            let mut t = self.lock()?;
            if t.by_email.contains_key(&person.email) || t.by_id.contains_key(&person.id) {
                return Err(StoreError::DuplicateKey);
            }
            t.by_email.insert(person.email.clone(), person.id);
            t.by_id.insert(person.id, person.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: PersonId) -> Result<Person, StoreError> {
            self.lock()?.by_id.get(&id).cloned().ok_or(StoreError::NotFound)
        }

        async fn find_by_email(&self, email: &str) -> Result<Person, StoreError> {
            let t = self.lock()?;
            t.by_email
                .get(email)
                .and_then(|id| t.by_id.get(id))
                .cloned()
                .ok_or(StoreError::NotFound)
        }

        async fn replace_by_id(&self, id: PersonId, fields: &PersonInput) -> Result<(), StoreError> {
            let mut t = self.lock()?;
            let current = t.by_id.get(&id).cloned().ok_or(StoreError::NotFound)?;
            match t.by_email.get(&fields.email) {
                Some(owner) if *owner != id => return Err(StoreError::DuplicateKey),
                _ => {}
            }
            t.by_email.remove(&current.email);
            t.by_email.insert(fields.email.clone(), id);
            t.by_id.insert(id, fields.clone().into_person(id));
            Ok(())
        }

        async fn delete_by_id(&self, id: PersonId) -> Result<(), StoreError> {
            let mut t = self.lock()?;
            let removed = t.by_id.remove(&id).ok_or(StoreError::NotFound)?;
            t.by_email.remove(&removed.email);
            Ok(())
        }
    }

}
