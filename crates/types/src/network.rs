//! Chain identifier types

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Wildcard token accepted in place of a numeric chain id
pub const WILDCARD: &str = "*";

/// Chain identifier a network profile is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkId {
    /// Matches any chain
    #[default]
    Any,
    /// A literal numeric chain identifier
    Id(u64),
}

impl NetworkId {
    /// Check whether a chain reported by a node satisfies this identifier
    pub fn matches(&self, chain_id: u64) -> bool {
        match self {
            NetworkId::Any => true,
            NetworkId::Id(id) => *id == chain_id,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, NetworkId::Any)
    }

    /// Numeric id, if this is not the wildcard
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            NetworkId::Any => None,
            NetworkId::Id(id) => Some(*id),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Any => f.write_str(WILDCARD),
            NetworkId::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for NetworkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == WILDCARD {
            return Ok(NetworkId::Any);
        }
        s.parse::<u64>()
            .map(NetworkId::Id)
            .map_err(|_| format!("expected \"{}\" or a non-negative chain id, got \"{}\"", WILDCARD, s))
    }
}

impl From<u64> for NetworkId {
    fn from(id: u64) -> Self {
        NetworkId::Id(id)
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NetworkId::Any => serializer.serialize_str(WILDCARD),
            NetworkId::Id(id) => serializer.serialize_u64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NetworkIdVisitor;

        impl<'de> Visitor<'de> for NetworkIdVisitor {
            type Value = NetworkId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "\"{}\" or a non-negative integer chain id", WILDCARD)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<NetworkId, E> {
                Ok(NetworkId::Id(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<NetworkId, E> {
                u64::try_from(v)
                    .map(NetworkId::Id)
                    .map_err(|_| E::custom(format!("chain id cannot be negative: {}", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NetworkId, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(NetworkIdVisitor)
    }
}
