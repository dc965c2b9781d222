//! Command line definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect and validate the development toolchain configuration
#[derive(Debug, Parser)]
#[command(name = "toolchain", version, about)]
pub struct Cli {
    /// Path to the configuration document
    ///
    /// Falls back to TOOLCHAIN_CONFIG, then `toolchain.yaml`.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Overlay TOOLCHAIN_-prefixed environment variables onto the document
    #[arg(long, global = true)]
    pub env: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the whole document
    Show {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Print one network profile
    Network {
        /// Profile name, e.g. `development`
        name: String,
    },
    /// Print one compiler constraint
    Compiler {
        /// Toolchain name, e.g. `solc`
        name: String,
        /// Comma-separated versions to resolve the constraint against
        #[arg(long, value_delimiter = ',')]
        available: Vec<String>,
    },
    /// Review the document and report errors and warnings
    Validate,
    /// Write the default document to a path
    Init {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_json() {
        let cli = Cli::try_parse_from(["toolchain", "show", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Command::Show { format: OutputFormat::Json }));
        assert!(cli.config.is_none());
        assert!(!cli.env);
    }

    #[test]
    fn test_parse_compiler_available() {
        let cli = Cli::try_parse_from([
            "toolchain",
            "--config",
            "alt.yaml",
            "compiler",
            "solc",
            "--available",
            "0.4.24,0.4.26",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
        match cli.command {
            Command::Compiler { name, available } => {
                assert_eq!(name, "solc");
                assert_eq!(available, vec!["0.4.24", "0.4.26"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["toolchain", "validate", "--env"]).unwrap();
        assert!(cli.env);
        assert!(matches!(cli.command, Command::Validate));
    }
}
