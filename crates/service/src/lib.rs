//! Service layer for the person resource.
//! - `person::repository::PersonStore` is the record store seam.
//! - `person::PersonService` owns every business rule; the store owns durable state.
//! - Errors are classified into `errors::ServiceError` for the transport layer.

pub mod errors;
pub mod person;
#[cfg(test)]
pub mod test_support;
