//! Person resource: domain types, record store abstraction and service.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{Person, PersonInput};
pub use models::PersonId;
pub use repository::PersonStore;
pub use service::PersonService;
