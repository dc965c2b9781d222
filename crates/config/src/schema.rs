//! Configuration schema definitions

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::{utils, ConfigError, NetworkId, Result};

/// Profile name used by the default document
pub const DEFAULT_NETWORK: &str = "development";

/// Toolchain name used by the default document
pub const DEFAULT_COMPILER: &str = "solc";

/// Top-level configuration document
///
/// Loaded once and never mutated afterwards, so it can be shared across
/// threads behind an `Arc` without locking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Named network connection profiles
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkProfile>,
    /// Compiler version pins keyed by toolchain name
    #[serde(default)]
    pub compilers: BTreeMap<String, CompilerSpec>,
}

/// Connection parameters for one target network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Network address of the node
    pub host: String,
    /// TCP port of the node's JSON-RPC endpoint
    #[serde(deserialize_with = "coerce::port")]
    pub port: u16,
    /// Chain the profile is bound to, or the wildcard
    pub network_id: NetworkId,
    /// Default per-transaction gas ceiling
    #[serde(deserialize_with = "coerce::unsigned")]
    pub gas: u64,
}

/// Version constraint for one compiler toolchain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSpec {
    /// Semantic-version range expression, e.g. `^0.4.24`
    pub version: String,
}

impl ConfigDocument {
    /// Look up a network profile by name
    pub fn get_network(&self, name: &str) -> Result<&NetworkProfile> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::network_not_found(name))
    }

    /// Look up the version constraint for a compiler toolchain
    pub fn get_compiler_spec(&self, toolchain: &str) -> Result<&CompilerSpec> {
        self.compilers
            .get(toolchain)
            .ok_or_else(|| ConfigError::compiler_not_found(toolchain))
    }

    pub fn network_names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn compiler_names(&self) -> impl Iterator<Item = &str> {
        self.compilers.keys().map(String::as_str)
    }
}

impl NetworkProfile {
    /// HTTP JSON-RPC endpoint for this profile
    pub fn endpoint(&self) -> String {
        utils::format_endpoint(&self.host, self.port)
    }

    /// Whether a node reporting `chain_id` belongs to this profile
    pub fn accepts_chain(&self, chain_id: u64) -> bool {
        self.network_id.matches(chain_id)
    }

    pub fn is_local(&self) -> bool {
        utils::is_loopback_host(&self.host)
    }
}

impl CompilerSpec {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Parse the version range
    ///
    /// Space-separated comparator sets (`>=0.4.22 <0.6.0`) are accepted as
    /// well as comma-separated ones. The stored string is left untouched.
    pub fn requirement(&self) -> Result<VersionReq> {
        let raw = self.version.trim();
        if raw.is_empty() {
            return Err(ConfigError::malformed("version", "version cannot be empty"));
        }

        VersionReq::parse(raw)
            .or_else(|_| VersionReq::parse(&comma_separated(raw)))
            .map_err(|e| {
                ConfigError::malformed(
                    "version",
                    format!("'{}' is not a valid version range: {}", self.version, e),
                )
            })
    }

    /// Check whether a concrete compiler version satisfies the range
    pub fn matches(&self, version: &Version) -> bool {
        self.requirement()
            .map(|req| req.matches(version))
            .unwrap_or(false)
    }

    /// Pick the highest available version that satisfies the range
    pub fn resolve(&self, available: &[Version]) -> Option<Version> {
        let req = self.requirement().ok()?;
        available.iter().filter(|v| req.matches(v)).max().cloned()
    }
}

/// Rewrite `>= 0.4.22 <0.6.0` as `>=0.4.22, <0.6.0`
fn comma_separated(range: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut pending_op = String::new();

    for token in range.split_whitespace() {
        let token = token.trim_end_matches(',');
        if token.is_empty() {
            continue;
        }
        if token.chars().all(|c| matches!(c, '<' | '>' | '=' | '~' | '^')) {
            pending_op.push_str(token);
            continue;
        }
        parts.push(format!("{}{}", std::mem::take(&mut pending_op), token));
    }

    parts.join(", ")
}

impl Default for ConfigDocument {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(DEFAULT_NETWORK.to_string(), NetworkProfile::default());

        let mut compilers = BTreeMap::new();
        compilers.insert(DEFAULT_COMPILER.to_string(), CompilerSpec::default());

        Self {
            networks,
            compilers,
        }
    }
}

impl Default for NetworkProfile {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8545, // Ganache
            network_id: NetworkId::Any,
            gas: 6_700_000,
        }
    }
}

impl Default for CompilerSpec {
    fn default() -> Self {
        Self::new("^0.4.24")
    }
}

/// Numeric coercion for fields that may arrive as strings
mod coerce {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    struct UnsignedVisitor;

    impl<'de> Visitor<'de> for UnsignedVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("value cannot be negative: {}", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            types::utils::parse_numeric(v).map_err(E::custom)
        }
    }

    pub fn unsigned<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(UnsignedVisitor)
    }

    pub fn port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
        let value = unsigned(deserializer)?;
        u16::try_from(value).map_err(|_| {
            de::Error::custom(format!("port {} is outside the range 1-65535", value))
        })
    }
}
