use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Integer identifier of a record, unique within its entity type
///
/// Ids reach the crate both as JSON numbers and as numeric strings (route
/// parameters, form values). Both forms parse to the same `EntityId`, so
/// lookups compare `"42"` and `42` as equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Input that could not be coerced to an id; carries the raw text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid entity id: {0:?}")]
pub struct InvalidEntityId(pub String);

impl FromStr for EntityId {
    type Err = InvalidEntityId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| InvalidEntityId(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Anything a caller may pass where an id is expected
pub trait IntoEntityId {
    fn into_entity_id(self) -> Result<EntityId, InvalidEntityId>;
}

impl IntoEntityId for EntityId {
    fn into_entity_id(self) -> Result<EntityId, InvalidEntityId> {
        Ok(self)
    }
}

impl IntoEntityId for u64 {
    fn into_entity_id(self) -> Result<EntityId, InvalidEntityId> {
        Ok(EntityId(self))
    }
}

impl IntoEntityId for u32 {
    fn into_entity_id(self) -> Result<EntityId, InvalidEntityId> {
        Ok(EntityId(u64::from(self)))
    }
}

impl IntoEntityId for i32 {
    fn into_entity_id(self) -> Result<EntityId, InvalidEntityId> {
        u64::try_from(self)
            .map(EntityId)
            .map_err(|_| InvalidEntityId(self.to_string()))
    }
}

impl IntoEntityId for i64 {
    fn into_entity_id(self) -> Result<EntityId, InvalidEntityId> {
        u64::try_from(self)
            .map(EntityId)
            .map_err(|_| InvalidEntityId(self.to_string()))
    }
}

impl IntoEntityId for &str {
    fn into_entity_id(self) -> Result<EntityId, InvalidEntityId> {
        self.parse()
    }
}

impl IntoEntityId for String {
    fn into_entity_id(self) -> Result<EntityId, InvalidEntityId> {
        self.parse()
    }
}

impl IntoEntityId for &String {
    fn into_entity_id(self) -> Result<EntityId, InvalidEntityId> {
        self.parse()
    }
}
