use docmarkup_engine::{ParseOptions, ParseSection};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    InvalidExcludePattern {
        pattern: String,
        source: glob::PatternError,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// How comment markup is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    pub smart_punctuation: bool,
    pub symbol_links: bool,
    pub doxygen_commands: bool,
    pub block_directives: bool,
    /// Stop after this section; `abstract` skips tag extraction entirely.
    pub up_to_section: ParseSection,
}

impl Default for ParseConfig {
    fn default() -> Self {
        let options = ParseOptions::default();
        Self {
            smart_punctuation: options.smart_punctuation,
            symbol_links: options.symbol_links,
            doxygen_commands: options.doxygen_commands,
            block_directives: options.block_directives,
            up_to_section: ParseSection::End,
        }
    }
}

impl ParseConfig {
    pub fn options(&self) -> ParseOptions {
        ParseOptions {
            smart_punctuation: self.smart_punctuation,
            symbol_links: self.symbol_links,
            doxygen_commands: self.doxygen_commands,
            block_directives: self.block_directives,
        }
    }
}

/// Which files a directory scan visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub extensions: Vec<String>,
    /// Glob patterns matched against paths relative to the scanned root.
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["rs".to_string(), "swift".to_string()],
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Reject bad globs up front rather than on first use
        config.exclude_patterns()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/docmarkup");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>, ConfigError> {
        self.scan
            .exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| ConfigError::InvalidExcludePattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }

    /// True when `relative_path` matches any exclude pattern. Invalid
    /// patterns never match.
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        self.scan.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern).is_ok_and(|pattern| pattern.matches(relative_path))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        // Should contain the expected config file name
        assert!(path_str.ends_with(".config/docmarkup/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert!(config.output.pretty);
        assert_eq!(config.scan.extensions, vec!["rs", "swift"]);
        assert_eq!(config.parse.up_to_section, ParseSection::End);
        assert_eq!(config.parse.options(), ParseOptions::default());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut original = Config::default();
        original.parse.doxygen_commands = false;
        original.parse.up_to_section = ParseSection::Discussion;
        original.scan.exclude = vec!["target/**".to_string()];

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config_content = r#"
[parse]
up_to_section = "abstract"
smart_punctuation = false

[output]
pretty = false
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.parse.up_to_section, ParseSection::Abstract);
        assert!(!config.parse.options().smart_punctuation);
        assert!(config.parse.options().symbol_links);
        assert!(!config.output.pretty);
        assert_eq!(config.scan, ScanConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[parse\n").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_load_rejects_invalid_exclude_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[scan]\nexclude = [\"[unclosed\"]\n").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidExcludePattern { .. })
        ));
    }

    #[test]
    fn test_is_excluded() {
        let mut config = Config::default();
        config.scan.exclude = vec!["target/**".to_string(), "**/generated.rs".to_string()];

        assert!(config.is_excluded("target/debug/build.rs"));
        assert!(config.is_excluded("src/api/generated.rs"));
        assert!(!config.is_excluded("src/lib.rs"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::default();
        test_config.scan.extensions = vec!["rs".to_string()];

        // Test saving creates parent directories
        test_config.save_to_path(&config_file).unwrap();
        assert!(config_file.exists(), "Config file should exist");

        // Test loading
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
