use std::fmt;
use std::str::FromStr;

use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Length of the external identifier text form (UUID "simple" hex).
pub const ID_HEX_LEN: usize = 32;
/// Upper bound on stored email length, matching the column definition.
pub const EMAIL_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Build an insertable row with fresh timestamps.
pub fn new_active_model(id: PersonId, email: &str) -> ActiveModel {
    let now = Utc::now().into();
    ActiveModel {
        id: Set(id.into_uuid()),
        email: Set(email.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Opaque person identifier.
///
/// Rendered as 32 lowercase hex digits. The nil value is never assigned and is
/// reported as invalid by [`PersonId::is_valid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonId(Uuid);

impl PersonId {
    /// Fresh random identifier.
    pub fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Strict syntactic check: exactly 32 ASCII hex digits.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        if s.len() != ID_HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ModelError::Validation(format!("malformed identifier: {s:?}")));
        }
        Uuid::try_parse(s)
            .map(Self)
            .map_err(|e| ModelError::Validation(e.to_string()))
    }

    pub fn is_valid(&self) -> bool { !self.0.is_nil() }

    pub fn into_uuid(self) -> Uuid { self.0 }
}

impl From<Uuid> for PersonId {
    fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for PersonId {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl TryFrom<String> for PersonId {
    type Error = ModelError;
    fn try_from(s: String) -> Result<Self, Self::Error> { Self::parse(&s) }
}

impl From<PersonId> for String {
    fn from(id: PersonId) -> Self { id.to_string() }
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let trimmed = email.trim();
    if trimmed.is_empty() { return Err(ModelError::Validation("email required".into())); }
    if email.len() > EMAIL_MAX_LEN { return Err(ModelError::Validation("email too long".into())); }
    if !trimmed.contains('@') { return Err(ModelError::Validation("invalid email".into())); }
    // Postgres text columns cannot hold NUL
    if email.contains('\0') { return Err(ModelError::Validation("email contains NUL".into())); }
    Ok(())
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn display_is_simple_lowercase_hex() {
        let id = PersonId::generate();
        let s = id.to_string();
        assert_eq!(s.len(), ID_HEX_LEN);
        assert!(s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        assert_eq!(PersonId::parse(&s).unwrap(), id);
    }

    #[test]
    fn parse_accepts_uppercase_hex() {
        let id = PersonId::parse("0123456789ABCDEF0123456789abcdef").unwrap();
        assert_eq!(id.to_string(), "0123456789abcdef0123456789abcdef");
    }

    #[test]
    fn parse_rejects_other_shapes() {
        for bad in [
            "",
            "abc",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
            "0123456789abcdef0123456789abcdeg",
            "01234567-89ab-cdef-0123-456789abcdef",
        ] {
            assert!(PersonId::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn nil_is_syntactically_fine_but_invalid() {
        let nil = PersonId::parse(&"0".repeat(ID_HEX_LEN)).unwrap();
        assert!(!nil.is_valid());
        assert!(PersonId::generate().is_valid());
    }

    #[test]
    fn serde_uses_hex_string() {
        let id = PersonId::parse("00112233445566778899aabbccddeeff").unwrap();
        let v = serde_json::to_value(id).unwrap();
        assert_eq!(v, serde_json::json!("00112233445566778899aabbccddeeff"));
        let back: PersonId = serde_json::from_value(v).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_value::<PersonId>(serde_json::json!("nope")).is_err());
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a\0b@x.com").is_err());
        let long = format!("{}@x.com", "a".repeat(EMAIL_MAX_LEN));
        assert!(validate_email(&long).is_err());
    }
}
