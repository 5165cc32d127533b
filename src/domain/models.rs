use crate::rules::Rule;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// The configuration file: where to read, where to write, what to keep.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Configuration {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub cache: CacheConfig,
    pub include: Vec<Rule>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CacheConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Empty means `$HOME/.yamltrimmer-cache`.
    #[serde(default)]
    pub path: String,
}

/// Where the input bytes came from.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    File,
    Url,
    /// Served from the cache after a `304 Not Modified`.
    CacheHit,
    /// Downloaded and stored in the cache.
    CacheMiss,
}

#[derive(Serialize)]
pub struct TrimReport {
    pub config: String,
    pub input: String,
    pub source: SourceKind,
    pub output: String,
    pub rule_count: usize,
    pub input_bytes: usize,
    pub output_bytes: usize,
}

#[derive(Serialize)]
pub struct CheckReport {
    pub config: String,
    pub input: String,
    pub output: String,
    pub cache_enabled: bool,
    pub cache_path: Option<String>,
    pub rule_count: usize,
    pub rules: Vec<Rule>,
}

#[derive(Serialize)]
pub struct CacheClearReport {
    pub path: String,
    pub removed: usize,
}
