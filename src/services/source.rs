use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tracing::debug;

use crate::domain::models::SourceKind;
use crate::services::cache::{CacheOutcome, HttpCache};

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub fn is_url(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

fn is_file(locator: &str) -> bool {
    !is_url(locator) && Path::new(locator).exists()
}

pub fn http_client(timeout_ms: u64) -> anyhow::Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?)
}

fn download(client: &reqwest::blocking::Client, url: &str) -> anyhow::Result<Vec<u8>> {
    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("error downloading {}", url))?
        .error_for_status()?;
    Ok(resp.bytes().context("error reading response body")?.to_vec())
}

/// Reads the input document from a file or URL, through the cache when one
/// is given. Empty input is an error.
pub fn read_input(
    locator: &str,
    cache_dir: Option<&Path>,
    timeout_ms: u64,
) -> anyhow::Result<(Vec<u8>, SourceKind)> {
    let (content, kind) = if is_url(locator) {
        debug!(url = locator, "input is a URL");
        let client = http_client(timeout_ms)?;
        match cache_dir {
            Some(dir) => {
                let (body, outcome) = HttpCache::new(dir).fetch(&client, locator)?;
                let kind = match outcome {
                    CacheOutcome::NotModified => SourceKind::CacheHit,
                    CacheOutcome::Downloaded => SourceKind::CacheMiss,
                };
                (body, kind)
            }
            None => (download(&client, locator)?, SourceKind::Url),
        }
    } else if is_file(locator) {
        debug!(path = locator, "input is a file");
        let body = std::fs::read(locator)
            .with_context(|| format!("failed to read input file {}", locator))?;
        (body, SourceKind::File)
    } else {
        anyhow::bail!("invalid input: not a URL or a valid file path: {}", locator);
    };

    debug!(bytes = content.len(), "done reading input data");
    if content.is_empty() {
        anyhow::bail!("input data is empty");
    }
    debug!(preview = %preview(&content), "input data");
    Ok((content, kind))
}

/// First 100 bytes of `data`, lossily decoded, for debug logs.
pub fn preview(data: &[u8]) -> String {
    String::from_utf8_lossy(&data[..data.len().min(100)]).into_owned()
}
