use serde::{Deserialize, Serialize};

use models::PersonId;

/// Persisted person as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub email: String,
}

impl From<models::person::Model> for Person {
    fn from(m: models::person::Model) -> Self {
        Self { id: PersonId::from(m.id), email: m.email }
    }
}

/// Client-supplied fields. Any identifier in the payload is not part of this
/// type and is dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInput {
    #[serde(alias = "Email")]
    pub email: String,
}

impl PersonInput {
    pub fn new(email: impl Into<String>) -> Self { Self { email: email.into() } }

    pub fn into_person(self, id: PersonId) -> Person {
        Person { id, email: self.email }
    }
}
