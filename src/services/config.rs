use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::domain::models::Configuration;
use crate::error::TrimError;
use crate::rules::{parse_rules, Rule};
use crate::services::{source, storage};

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// A configuration file and the absolute path it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: Configuration,
}

/// Everything the trim command needs, with paths made absolute.
#[derive(Debug, Clone)]
pub struct TrimSettings {
    pub input: String,
    pub output: PathBuf,
    /// Set only when caching is enabled and the input is a URL.
    pub cache_dir: Option<PathBuf>,
    pub rules: Vec<Rule>,
}

pub fn load_config(path: &Path) -> anyhow::Result<LoadedConfig> {
    let path = storage::absolutize(path)
        .context("failed to resolve the configuration file path")?;
    debug!(path = %path.display(), "resolved configuration file path");

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("error opening configuration file {}", path.display()))?;
    let config = parse_config(&raw)
        .with_context(|| format!("failed to parse configuration {}", path.display()))?;
    debug!(
        input = %config.input,
        output = %config.output,
        cache_enabled = config.cache.enabled,
        rules = config.include.len(),
        "parsed configuration"
    );
    Ok(LoadedConfig { path, config })
}

/// Decodes a configuration. Failures inside `include` (or text that is not
/// YAML at all) are `MalformedRules`; anything else is `InvalidConfig`.
pub fn parse_config(raw: &str) -> Result<Configuration, TrimError> {
    serde_yaml::from_str(raw).map_err(|err| match parse_rules(raw) {
        Ok(_) => TrimError::InvalidConfig(err),
        Err(rules_err) => rules_err,
    })
}

pub fn trim_settings(config: &Configuration) -> anyhow::Result<TrimSettings> {
    if config.input.trim().is_empty() {
        anyhow::bail!("configuration is missing `input`");
    }
    if config.output.trim().is_empty() {
        anyhow::bail!("configuration is missing `output`");
    }

    let output = storage::absolutize(Path::new(&config.output))
        .context("failed to resolve the output file path")?;
    debug!(path = %output.display(), "resolved output file path");

    let cache_dir = if config.cache.enabled && source::is_url(&config.input) {
        let dir = storage::cache_dir(&config.cache.path)?;
        debug!(path = %dir.display(), "cache enabled");
        Some(dir)
    } else {
        None
    };

    Ok(TrimSettings {
        input: config.input.clone(),
        output,
        cache_dir,
        rules: config.include.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn cache_section_is_optional() {
        let cfg = parse_config("input: in.yaml\noutput: out.yaml\ninclude:\n  - key: a\n").unwrap();
        assert!(!cfg.cache.enabled);
        assert!(cfg.cache.path.is_empty());
        assert_eq!(cfg.include, vec![Rule::leaf("a")]);
    }

    #[test]
    fn missing_include_is_malformed() {
        let err = parse_config("input: in.yaml\noutput: out.yaml\n").unwrap_err();
        assert!(matches!(err, TrimError::MalformedRules(_)));
    }

    #[test]
    fn bad_cache_section_is_not_blamed_on_the_rules() {
        let err = parse_config("input: in.yaml\noutput: out.yaml\ncache: 5\ninclude:\n  - key: a\n")
            .unwrap_err();
        assert!(matches!(err, TrimError::InvalidConfig(_)), "{err}");
        let msg = err.to_string();
        assert!(msg.starts_with("invalid configuration"), "{msg}");
        assert!(msg.contains("cache"), "{msg}");

        let err = parse_config("input: [a]\noutput: out.yaml\ninclude: []\n").unwrap_err();
        assert!(matches!(err, TrimError::InvalidConfig(_)), "{err}");
    }

    #[test]
    fn load_reports_the_file_path() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "include:\n  - nope\n").unwrap();
        let err = load_config(&path).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("config.yaml"), "{msg}");
        assert!(msg.contains("malformed rules"), "{msg}");
    }

    #[test]
    fn cache_applies_to_urls_only() {
        let tmp = TempDir::new().expect("temp dir");
        let cache = tmp.path().join("cache");
        let mut cfg = parse_config("input: in.yaml\noutput: out.yaml\ninclude: []\n").unwrap();
        cfg.cache.enabled = true;
        cfg.cache.path = cache.to_string_lossy().to_string();
        assert!(trim_settings(&cfg).unwrap().cache_dir.is_none());

        cfg.input = "https://example.com/app.yaml".to_string();
        assert_eq!(trim_settings(&cfg).unwrap().cache_dir, Some(cache));
    }

    #[test]
    fn input_and_output_are_required_for_trimming() {
        let cfg = parse_config("output: out.yaml\ninclude: []\n").unwrap();
        assert!(trim_settings(&cfg).is_err());
        let cfg = parse_config("input: in.yaml\ninclude: []\n").unwrap();
        assert!(trim_settings(&cfg).is_err());
    }
}
