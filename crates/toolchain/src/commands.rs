//! Subcommand handlers
//!
//! Handlers render to a `String` and leave printing to `main`.

use crate::cli::OutputFormat;
use anyhow::{bail, Context, Result};
use config::{ConfigDocument, ConfigLoader, ConfigValidator};
use semver::Version;
use std::fmt::Write;
use std::path::Path;
use tracing::{info, warn};

pub fn show(document: &ConfigDocument, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(ConfigLoader::to_yaml(document)?),
        OutputFormat::Json => {
            serde_json::to_string_pretty(document).context("Failed to render configuration as JSON")
        }
    }
}

pub fn network(document: &ConfigDocument, name: &str) -> Result<String> {
    let profile = document.get_network(name)?;

    let mut out = String::new();
    writeln!(out, "network:    {}", name)?;
    writeln!(out, "host:       {}", profile.host)?;
    writeln!(out, "port:       {}", profile.port)?;
    writeln!(out, "network_id: {}", profile.network_id)?;
    writeln!(out, "gas:        {}", profile.gas)?;
    writeln!(out, "endpoint:   {}", profile.endpoint())?;
    Ok(out)
}

pub fn compiler(document: &ConfigDocument, name: &str, available: &[String]) -> Result<String> {
    let spec = document.get_compiler_spec(name)?;

    let mut out = String::new();
    writeln!(out, "compiler: {}", name)?;
    writeln!(out, "version:  {}", spec.version)?;

    if !available.is_empty() {
        let versions = available
            .iter()
            .map(|v| {
                Version::parse(v.trim()).with_context(|| format!("Invalid compiler version: {}", v))
            })
            .collect::<Result<Vec<_>>>()?;

        match spec.resolve(&versions) {
            Some(version) => writeln!(out, "resolved: {}", version)?,
            None => {
                warn!("No available {} version satisfies {}", name, spec.version);
                writeln!(out, "resolved: none")?
            }
        }
    }

    Ok(out)
}

/// Render the validation report; the flag is false when it holds errors
pub fn validate(document: &ConfigDocument) -> Result<(String, bool)> {
    let report = ConfigValidator::validate(document);

    let mut out = String::new();
    for issue in &report.errors {
        writeln!(out, "error:   {}: {}", issue.field, issue.message)?;
    }
    for issue in &report.warnings {
        writeln!(out, "warning: {}: {}", issue.field, issue.message)?;
    }
    writeln!(out, "{}", report.summary())?;

    Ok((out, report.is_valid()))
}

pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists, pass --force to overwrite it", path.display());
    }

    ConfigLoader::create_example(path)
        .with_context(|| format!("Failed to write example configuration to {}", path.display()))?;
    info!("Wrote example configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_show_formats() {
        let doc = ConfigDocument::default();

        let yaml = show(&doc, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("development:"));

        let json = show(&doc, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["networks"]["development"]["port"], 8545);
        assert_eq!(value["networks"]["development"]["network_id"], "*");
        assert_eq!(value["compilers"]["solc"]["version"], "^0.4.24");
    }

    #[test]
    fn test_network_output() {
        let out = network(&ConfigDocument::default(), "development").unwrap();
        assert!(out.contains("endpoint:   http://127.0.0.1:8545"));
        assert!(out.contains("network_id: *"));

        let err = network(&ConfigDocument::default(), "mainnet").unwrap_err();
        let config_err = err.downcast_ref::<types::ConfigError>().unwrap();
        assert!(config_err.is_not_found());
    }

    #[test]
    fn test_compiler_resolution() {
        let doc = ConfigDocument::default();

        let out = compiler(&doc, "solc", &["0.4.24".to_string(), "0.4.26".to_string(), "0.5.1".to_string()])
            .unwrap();
        assert!(out.contains("resolved: 0.4.26"));

        let out = compiler(&doc, "solc", &["0.5.1".to_string()]).unwrap();
        assert!(out.contains("resolved: none"));

        assert!(compiler(&doc, "solc", &["four".to_string()]).is_err());
        assert!(compiler(&doc, "vyper", &[]).is_err());
    }

    #[test]
    fn test_validate_output() {
        let (out, ok) = validate(&ConfigDocument::default()).unwrap();
        assert!(ok);
        assert!(out.contains("Validation: 0 errors, 0 warnings"));

        let empty = ConfigDocument {
            networks: Default::default(),
            compilers: Default::default(),
        };
        let (out, ok) = validate(&empty).unwrap();
        assert!(!ok);
        assert!(out.contains("error:   networks"));
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("toolchain.yaml");

        init(&path, false).unwrap();
        assert!(init(&path, false).is_err());
        init(&path, true).unwrap();

        let doc = ConfigLoader::load(&path).unwrap();
        assert_eq!(doc, ConfigDocument::default());
    }
}
