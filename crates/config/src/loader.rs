//! Configuration loader implementation

use crate::schema::ConfigDocument;
use figment::{
    error::Kind,
    providers::{Env, Format, Yaml},
    Figment,
};
use std::path::Path;
use tracing::{debug, info, warn};
use types::{ConfigError, Result};

/// Default prefix for the opt-in environment overlay
pub const ENV_PREFIX: &str = "TOOLCHAIN_";

/// Configuration loader for YAML documents
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a document from a YAML file
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<ConfigDocument> {
        let config_path = config_path.as_ref();
        Self::ensure_exists(config_path)?;

        debug!("Loading configuration from {}", config_path.display());
        Self::extract(Figment::new().merge(Yaml::file(config_path)))
    }

    /// Load a document from a YAML file, then overlay prefixed environment variables
    ///
    /// Nested keys are separated by `__`, so `TOOLCHAIN_NETWORKS__DEVELOPMENT__PORT`
    /// overrides `networks.development.port`. Environment keys are lowercased,
    /// so overrides only reach profile and toolchain names written in lowercase.
    pub fn load_with_env<P: AsRef<Path>>(config_path: P, prefix: &str) -> Result<ConfigDocument> {
        let config_path = config_path.as_ref();
        Self::ensure_exists(config_path)?;

        let env = Env::prefixed(prefix).split("__").ignore(&["config"]);
        let overrides: Vec<String> = env.iter().map(|(key, _)| key.to_string()).collect();
        if !overrides.is_empty() {
            warn!("Environment overrides applied: {}", overrides.join(", "));
        }

        Self::extract(Figment::new().merge(Yaml::file(config_path)).merge(env))
    }

    /// Load configuration from string (for testing)
    pub fn load_from_str(yaml_content: &str) -> Result<ConfigDocument> {
        Self::extract(Figment::new().merge(Yaml::string(yaml_content)))
    }

    /// Render a document in canonical YAML form
    pub fn to_yaml(document: &ConfigDocument) -> Result<String> {
        serde_yaml::to_string(document).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Write the default document to `path`
    pub fn create_example<P: AsRef<Path>>(path: P) -> Result<()> {
        let yaml_content = Self::to_yaml(&ConfigDocument::default())?;
        std::fs::write(path.as_ref(), yaml_content)?;
        Ok(())
    }

    /// Check the invariants every loaded document must satisfy
    ///
    /// Stops at the first violation.
    pub fn validate(document: &ConfigDocument) -> Result<()> {
        for (name, profile) in &document.networks {
            if profile.host.trim().is_empty() {
                return Err(ConfigError::malformed(
                    format!("networks.{}.host", name),
                    "host cannot be empty",
                ));
            }

            if profile.port == 0 {
                return Err(ConfigError::malformed(
                    format!("networks.{}.port", name),
                    "port must be between 1 and 65535",
                ));
            }

            if profile.gas == 0 {
                return Err(ConfigError::malformed(
                    format!("networks.{}.gas", name),
                    "gas must be a positive integer",
                ));
            }
        }

        for (toolchain, spec) in &document.compilers {
            spec.requirement().map_err(|e| match e {
                ConfigError::Malformed { message, .. } => ConfigError::Malformed {
                    field: format!("compilers.{}.version", toolchain),
                    message,
                },
                other => other,
            })?;
        }

        Ok(())
    }

    fn ensure_exists(config_path: &Path) -> Result<()> {
        if !config_path.exists() {
            return Err(ConfigError::FileNotFound {
                path: config_path.display().to_string(),
            });
        }
        if !config_path.is_file() {
            return Err(ConfigError::Io(format!(
                "Configuration path is not a file: {}",
                config_path.display()
            )));
        }
        Ok(())
    }

    fn extract(figment: Figment) -> Result<ConfigDocument> {
        let document: ConfigDocument = figment.extract().map_err(Self::malformed)?;
        Self::validate(&document)?;

        info!(
            networks = document.networks.len(),
            compilers = document.compilers.len(),
            "Configuration loaded"
        );
        Ok(document)
    }

    /// Map a figment extraction failure onto the dotted field it concerns
    fn malformed(err: figment::Error) -> ConfigError {
        let mut path = err.path.clone();
        if let Kind::MissingField(name) = &err.kind {
            path.push(name.to_string());
        }

        let field = if path.is_empty() {
            "<root>".to_string()
        } else {
            path.join(".")
        };

        ConfigError::Malformed {
            field,
            message: err.kind.to_string(),
        }
    }
}
