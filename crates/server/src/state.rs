use std::sync::Arc;

use service::person::{PersonService, PersonStore};

/// Shared handler state. Cloning is cheap: only the store handle is shared.
#[derive(Clone)]
pub struct ServerState {
    pub people: PersonService<dyn PersonStore>,
}

impl ServerState {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { people: PersonService::new(store) }
    }
}
