use std::path::{Path, PathBuf};

use anyhow::Context;
use reqwest::header::{ETAG, IF_NONE_MATCH};
use reqwest::StatusCode;
use sha2::{Digest, Sha256};
use tracing::debug;

const ETAG_EXTENSION: &str = "etag";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// The server answered `304 Not Modified`; the stored body was used.
    NotModified,
    Downloaded,
}

/// HTTP response cache keyed by URL, revalidated with ETags.
///
/// Each URL maps to `<sha256(url)>` holding the body and
/// `<sha256(url)>.etag` holding the last ETag the server sent.
pub struct HttpCache {
    dir: PathBuf,
}

impl HttpCache {
    pub fn new(dir: &Path) -> Self {
        HttpCache {
            dir: dir.to_path_buf(),
        }
    }

    pub fn entry_id(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Body and ETag file paths for `url`.
    pub fn entry_paths(&self, url: &str) -> (PathBuf, PathBuf) {
        let id = Self::entry_id(url);
        let etag = self.dir.join(format!("{}.{}", id, ETAG_EXTENSION));
        (self.dir.join(id), etag)
    }

    fn stored_etag(body_path: &Path, etag_path: &Path) -> Option<String> {
        if !body_path.exists() {
            return None;
        }
        std::fs::read_to_string(etag_path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn fetch(
        &self,
        client: &reqwest::blocking::Client,
        url: &str,
    ) -> anyhow::Result<(Vec<u8>, CacheOutcome)> {
        let (body_path, etag_path) = self.entry_paths(url);
        debug!(body = %body_path.display(), etag = %etag_path.display(), "cache entry");

        let stored = Self::stored_etag(&body_path, &etag_path);
        let mut request = client.get(url);
        if let Some(etag) = &stored {
            request = request.header(IF_NONE_MATCH, etag.as_str());
        }
        let resp = request
            .send()
            .with_context(|| format!("failed to make HTTP request to {}", url))?;

        let status = resp.status();
        if status == StatusCode::NOT_MODIFIED {
            debug!("resource not modified, skipping download");
            let body = std::fs::read(&body_path).with_context(|| {
                format!("failed to read cached body {}", body_path.display())
            })?;
            return Ok((body, CacheOutcome::NotModified));
        }
        if status != StatusCode::OK {
            anyhow::bail!("unexpected status code: {}", status.as_u16());
        }

        let new_etag = resp
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().context("failed to read response body")?.to_vec();

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create cache directory {}", self.dir.display()))?;
        std::fs::write(&body_path, &body)
            .with_context(|| format!("failed to write {}", body_path.display()))?;
        debug!(path = %body_path.display(), "file downloaded");

        match new_etag {
            Some(etag) => {
                std::fs::write(&etag_path, &etag)
                    .with_context(|| format!("failed to write ETag to {}", etag_path.display()))?;
                debug!(etag = %etag, "ETag updated");
            }
            None => {
                debug!("no ETag found in response");
                if etag_path.exists() {
                    std::fs::remove_file(&etag_path)?;
                }
            }
        }
        Ok((body, CacheOutcome::Downloaded))
    }

    /// Removes cached bodies and ETags; other files are left alone.
    /// Returns the number of bodies removed.
    pub fn clear(&self) -> anyhow::Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            let (id, is_etag) = match name.strip_suffix(&format!(".{}", ETAG_EXTENSION)) {
                Some(id) => (id.to_string(), true),
                None => (name.clone(), false),
            };
            if !is_entry_id(&id) || !entry.file_type()?.is_file() {
                continue;
            }
            std::fs::remove_file(entry.path())?;
            if !is_etag {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn is_entry_id(name: &str) -> bool {
    name.len() == 64 && name.bytes().all(|b| b.is_ascii_hexdigit())
}
