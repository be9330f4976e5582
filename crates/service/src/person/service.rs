use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use models::PersonId;

use super::domain::{Person, PersonInput};
use super::repository::PersonStore;
use crate::errors::ServiceError;

/// Person business service, independent of web framework.
///
/// Holds nothing but a store handle, so one instance can serve any number of
/// concurrent requests. Every operation is at most one store call; email
/// uniqueness is left entirely to the store.
pub struct PersonService<S: PersonStore + ?Sized> {
    store: Arc<S>,
}

impl<S: PersonStore + ?Sized> Clone for PersonService<S> {
    fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: PersonStore + ?Sized> PersonService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    /// Create a person under a freshly generated identifier.
    ///
    /// # Examples
    /// ```
    /// use service::person::{PersonService, PersonInput, repository::mock::MemoryPersonStore};
    /// use std::sync::Arc;
    /// let svc = PersonService::new(Arc::new(MemoryPersonStore::default()));
    /// let id = tokio_test::block_on(svc.create(PersonInput::new("a@x.com"))).unwrap();
    /// let found = tokio_test::block_on(svc.find_by_id(id)).unwrap();
    /// assert_eq!(found.email, "a@x.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: PersonInput) -> Result<PersonId, ServiceError> {
        models::person::validate_email(&input.email)?;
        let person = input.into_person(PersonId::generate());
        self.store.insert(&person).await.map_err(|e| {
            warn!(error = %e, "person_create_rejected");
            ServiceError::from(e)
        })?;
        info!(person_id = %person.id, "person_created");
        Ok(person.id)
    }

    #[instrument(skip(self), fields(person_id = %id))]
    pub async fn find_by_id(&self, id: PersonId) -> Result<Person, ServiceError> {
        ensure_valid(id)?;
        Ok(self.store.find_by_id(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Person, ServiceError> {
        let person = self.store.find_by_email(email).await?;
        debug!(person_id = %person.id, "person_found_by_email");
        Ok(person)
    }

    /// Replace every field of the record at `id`. The identifier always comes
    /// from the caller's context; `input` has no way to carry one.
    #[instrument(skip(self, input), fields(person_id = %id, email = %input.email))]
    pub async fn update(&self, id: PersonId, input: PersonInput) -> Result<PersonId, ServiceError> {
        ensure_valid(id)?;
        models::person::validate_email(&input.email)?;
        self.store.replace_by_id(id, &input).await?;
        info!("person_updated");
        Ok(id)
    }

    #[instrument(skip(self), fields(person_id = %id))]
    pub async fn delete(&self, id: PersonId) -> Result<(), ServiceError> {
        ensure_valid(id)?;
        self.store.delete_by_id(id).await?;
        info!("person_deleted");
        Ok(())
    }
}

fn ensure_valid(id: PersonId) -> Result<(), ServiceError> {
    if id.is_valid() { Ok(()) } else { Err(ServiceError::not_found("person")) }
}
