//! CLI configuration loaded from ~/.chordtree/config.yaml.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::syntax::{Grammar, ParseOptions};

/// Inputs longer than this are rejected unless configured otherwise.
pub const DEFAULT_MAX_LEN: usize = 1000;

/// How parse results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tree-style S-expression of the named nodes.
    #[default]
    Sexp,
    /// Full tree and per-chord summary as JSON.
    Json,
    /// One line per token: kind, span, text.
    Tokens,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grammar: Grammar,
    #[serde(default)]
    pub format: OutputFormat,
    /// Byte limit per input. `null` disables the check.
    #[serde(default = "Config::default_max_len")]
    pub max_len: Option<usize>,
    /// Parse each `-`-separated chord on its own and keep going past errors.
    #[serde(default)]
    pub lenient: bool,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("could not read config file {path}")]
    #[diagnostic(code(chordtree::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    #[diagnostic(
        code(chordtree::config::yaml),
        help("keys are grammar, format, max_len and lenient")
    )]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Config {
    /// Standard location: ~/.chordtree/config.yaml.
    pub fn default_path() -> Option<PathBuf> {
        Some(Self::path_under(&dirs::home_dir()?))
    }

    /// Load from the standard path. Returns None if the file is missing or
    /// unreadable (graceful fallback to defaults).
    pub fn load() -> Option<Self> {
        Self::load_under(&dirs::home_dir()?)
    }

    fn path_under(home: &Path) -> PathBuf {
        home.join(".chordtree").join("config.yaml")
    }

    fn load_under(home: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(Self::path_under(home)).ok()?;
        serde_yaml::from_str(&content).ok()
    }

    /// Load from an explicit path. Unlike [`Config::load`], a missing or
    /// malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            grammar: self.grammar,
            max_len: self.max_len,
        }
    }

    fn default_max_len() -> Option<usize> {
        Some(DEFAULT_MAX_LEN)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grammar: Grammar::default(),
            format: OutputFormat::default(),
            max_len: Self::default_max_len(),
            lenient: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.grammar, Grammar::Progression);
        assert_eq!(config.format, OutputFormat::Sexp);
        assert_eq!(config.max_len, Some(DEFAULT_MAX_LEN));
        assert!(!config.lenient);
    }

    #[test]
    fn serialize_deserialize() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config = serde_yaml::from_str("format: json\n").unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.grammar, Grammar::Progression);
        assert_eq!(config.max_len, Some(DEFAULT_MAX_LEN));
    }

    #[test]
    fn null_max_len_disables_limit() {
        let config: Config = serde_yaml::from_str("max_len: null\ngrammar: chord\n").unwrap();
        assert_eq!(config.max_len, None);
        assert_eq!(
            config.parse_options(),
            ParseOptions {
                grammar: Grammar::Chord,
                max_len: None
            }
        );
    }

    #[test]
    fn load_without_config_file_is_none() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_under(home.path()), None);
    }

    #[test]
    fn load_reads_standard_location() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join(".chordtree");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("config.yaml"), "format: json\nlenient: true\n").unwrap();

        let config = Config::load_under(home.path()).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.lenient);
        assert_eq!(config.max_len, Some(DEFAULT_MAX_LEN));
    }

    #[test]
    fn load_ignores_malformed_standard_file() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join(".chordtree");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("config.yaml"), "format: [not, a, format]\n").unwrap();
        assert_eq!(Config::load_under(home.path()), None);
    }

    #[test]
    fn load_from_missing_path_is_error() {
        let err = Config::load_from(Path::new("/nonexistent/chordtree.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
