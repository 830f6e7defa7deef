use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved sentinel id marking the root of a hierarchy.
///
/// `ROOT` is an implicit ancestor of every registered id and is never stored
/// as a node itself. Caller-supplied ids must not collide with it.
pub const ROOT: &str = "*";

/// An entry accepted by registries: either a plain name or a record
/// carrying an `id` field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entity {
    /// A plain string id.
    Name(String),
    /// A record whose `id` field supplies the id.
    Record(Record),
}

/// A record payload; only the `id` field participates in registry keying.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// String or numeric identifier. Numbers are stringified on extraction.
    pub id: RecordId,
}

/// String or numeric record id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// String identifier, used as-is.
    Text(String),
    /// Numeric identifier, stringified on extraction.
    Number(i64),
}

impl Entity {
    /// Creates a record entity from a string id.
    pub fn record(id: impl Into<String>) -> Self {
        Self::Record(Record {
            id: RecordId::Text(id.into()),
        })
    }

    /// Creates a record entity from a numeric id.
    pub fn numbered(id: i64) -> Self {
        Self::Record(Record {
            id: RecordId::Number(id),
        })
    }

    /// Extracts the canonical id string.
    ///
    /// Plain names pass through unchanged. Fails with [`Error::InvalidType`]
    /// for a record whose id is empty and for any id that collides with the
    /// [`ROOT`] sentinel.
    pub fn id(&self) -> Result<String> {
        let id = match self {
            Self::Name(name) => name.clone(),
            Self::Record(record) => match &record.id {
                RecordId::Text(text) => {
                    if text.is_empty() {
                        return Err(Error::InvalidType("record id must not be empty".into()));
                    }
                    text.clone()
                }
                RecordId::Number(number) => number.to_string(),
            },
        };
        if id == ROOT {
            return Err(Error::InvalidType(format!(
                "entity id must not be the reserved root id \"{ROOT}\""
            )));
        }
        Ok(id)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Record(record) => match &record.id {
                RecordId::Text(text) => f.write_str(text),
                RecordId::Number(number) => write!(f, "{number}"),
            },
        }
    }
}

impl From<&str> for Entity {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for Entity {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_plain_name() {
        let entity = Entity::from("res-1");
        assert_eq!(entity.id().unwrap(), "res-1");
    }

    #[test]
    fn id_from_record_stringifies_numbers() {
        assert_eq!(Entity::record("rol-1").id().unwrap(), "rol-1");
        assert_eq!(Entity::numbered(42).id().unwrap(), "42");
    }

    #[test]
    fn plain_names_pass_through_unchanged() {
        assert_eq!(Entity::from("").id().unwrap(), "");
        assert_eq!(Entity::from(" padded ").id().unwrap(), " padded ");
    }

    #[test]
    fn id_rejects_empty_record_id() {
        let err = Entity::record("").id().expect_err("must reject");
        assert!(matches!(err, Error::InvalidType(_)));
    }

    #[test]
    fn id_rejects_root_collision() {
        let err = Entity::from(ROOT).id().expect_err("must reject");
        assert!(matches!(err, Error::InvalidType(_)));
        let err = Entity::record(ROOT).id().expect_err("must reject");
        assert!(matches!(err, Error::InvalidType(_)));
    }

    #[test]
    fn entity_deserializes_from_string_or_record() {
        let name: Entity = serde_json::from_str("\"res-1\"").unwrap();
        assert_eq!(name, Entity::from("res-1"));
        let record: Entity = serde_json::from_str("{\"id\": 7}").unwrap();
        assert_eq!(record.id().unwrap(), "7");
    }
}
