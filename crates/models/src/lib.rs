pub mod errors;
pub mod db;
pub mod person;

pub use person::PersonId;
