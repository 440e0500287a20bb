use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{AudiogramError, AudiogramResult};

/// Retrieves the raw text of a subtitle resource.
///
/// Retrieval is attempted exactly once; callers never retry.
pub trait SubtitleSource {
    /// Fetch the resource at `location` as UTF-8 text.
    fn fetch(&self, location: &str) -> AudiogramResult<String>;
}

impl<F> SubtitleSource for F
where
    F: Fn(&str) -> AudiogramResult<String>,
{
    fn fetch(&self, location: &str) -> AudiogramResult<String> {
        self(location)
    }
}

/// Reads subtitle resources from files below an assets root.
#[derive(Clone, Debug)]
pub struct FsSubtitleSource {
    root: PathBuf,
}

impl FsSubtitleSource {
    /// Source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Assets root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, location: &str) -> anyhow::Result<String> {
        let rel = normalize_rel_path(location)?;
        let path = self.root.join(&rel);
        let bytes = std::fs::read(&path).with_context(|| format!("read '{}'", path.display()))?;
        String::from_utf8(bytes).with_context(|| format!("'{}' is not valid UTF-8", path.display()))
    }
}

impl SubtitleSource for FsSubtitleSource {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn fetch(&self, location: &str) -> AudiogramResult<String> {
        let text = self
            .read(location)
            .map_err(|e| AudiogramError::fetch(format!("{location}: {e:#}")))?;
        tracing::debug!(bytes = text.len(), "fetched subtitles");
        Ok(text)
    }
}

/// Normalize a location relative to the assets root.
///
/// The result uses `/` separators and drops `.` segments. Absolute paths, parent traversals
/// (`..`) and locations without a file name are rejected.
pub(crate) fn normalize_rel_path(location: &str) -> anyhow::Result<String> {
    let s = location.replace('\\', "/");
    if s.starts_with('/') {
        anyhow::bail!("subtitle location must be relative");
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            anyhow::bail!("subtitle location must not contain '..'");
        }
        out.push(part);
    }

    if out.is_empty() {
        anyhow::bail!("subtitle location must contain a file name");
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
