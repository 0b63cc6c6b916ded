use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::diff::unified_diff;
use crate::encoding::TextEncoding;
use crate::error::{map_read_err, map_write_err, PatchResult};
use crate::text::LineRange;

use super::{patch_text, PatchOptions, PatchOutcome, Replacement};

/// A computed replacement for a file, not yet written
#[derive(Debug, Clone)]
pub struct PatchPlan {
    pub path: PathBuf,
    pub original: String,
    pub updated: String,
    pub encoding: TextEncoding,
}

impl PatchPlan {
    /// True when the new content is identical to the file's current content
    pub fn is_noop(&self) -> bool {
        self.original == self.updated
    }

    /// Unified diff from the current content to the new content
    pub fn diff(&self) -> String {
        unified_diff(&self.path, &self.original, &self.updated)
    }

    /// Write the new content to `self.path`, or do nothing for a no-op plan.
    pub async fn write(&self) -> PatchResult<PatchOutcome> {
        let Some(bytes) = self.pending_bytes()? else {
            return Ok(PatchOutcome::Unchanged);
        };

        tokio::fs::write(&self.path, &bytes)
            .await
            .map_err(map_write_err(&self.path))?;

        info!("Wrote {} ({} bytes)", self.path.display(), bytes.len());
        Ok(PatchOutcome::Written)
    }

    /// Blocking version of [`PatchPlan::write`]
    pub fn write_sync(&self) -> PatchResult<PatchOutcome> {
        let Some(bytes) = self.pending_bytes()? else {
            return Ok(PatchOutcome::Unchanged);
        };

        std::fs::write(&self.path, &bytes).map_err(map_write_err(&self.path))?;

        info!("Wrote {} ({} bytes)", self.path.display(), bytes.len());
        Ok(PatchOutcome::Written)
    }

    // None for a no-op. Encoding runs before the file is opened for writing.
    fn pending_bytes(&self) -> PatchResult<Option<Cow<'_, [u8]>>> {
        if self.is_noop() {
            debug!("Content unchanged, skipping write: {}", self.path.display());
            return Ok(None);
        }

        self.encoding
            .encode(&self.updated)
            .map(Some)
            .map_err(map_write_err(&self.path))
    }

    fn new(
        path: &Path,
        bytes: &[u8],
        from: usize,
        to: usize,
        replacement: &Replacement,
        options: &PatchOptions,
    ) -> PatchResult<Self> {
        let original = options
            .encoding
            .decode_exact(bytes)
            .map_err(map_read_err(path))?
            .into_owned();

        let updated = patch_text(&original, from, to, replacement)?;
        debug!(
            "Planned replacement of lines {}-{} in {} ({} -> {} bytes)",
            from,
            to,
            path.display(),
            original.len(),
            updated.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            original,
            updated,
            encoding: options.encoding,
        })
    }
}

// Order and lower-bound checks need no file content, so they run before the read.
fn check_range_shape(from: usize, to: usize) -> PatchResult<()> {
    LineRange::new(from, to, usize::MAX).map(|_| ())
}

async fn read_bytes(path: &Path) -> PatchResult<Vec<u8>> {
    debug!("Reading file: {}", path.display());

    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(map_read_err(path))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .await
        .map_err(map_read_err(path))?;

    Ok(bytes)
}

/// Read `path` and compute the replacement of lines `from..=to` without
/// writing anything.
pub async fn plan_range_replacement(
    path: impl AsRef<Path>,
    from: usize,
    to: usize,
    replacement: &Replacement,
    options: &PatchOptions,
) -> PatchResult<PatchPlan> {
    let path = path.as_ref();
    check_range_shape(from, to)?;

    let bytes = read_bytes(path).await?;
    PatchPlan::new(path, &bytes, from, to, replacement, options)
}

/// Replace lines `from..=to` (1-based, inclusive) of the file at `path`.
///
/// The file keeps its newline style and trailing newline. If the new content
/// equals the old, no write is issued and [`PatchOutcome::Unchanged`] is
/// returned. Range errors are raised before the file is modified.
///
/// There is no locking: concurrent patches of the same path race, and the
/// last writer wins.
pub async fn apply_range_replacement(
    path: impl AsRef<Path>,
    from: usize,
    to: usize,
    replacement: &Replacement,
    options: &PatchOptions,
) -> PatchResult<PatchOutcome> {
    plan_range_replacement(path, from, to, replacement, options)
        .await?
        .write()
        .await
}

/// Blocking version of [`plan_range_replacement`]
pub fn plan_range_replacement_sync(
    path: impl AsRef<Path>,
    from: usize,
    to: usize,
    replacement: &Replacement,
    options: &PatchOptions,
) -> PatchResult<PatchPlan> {
    let path = path.as_ref();
    check_range_shape(from, to)?;

    debug!("Reading file synchronously: {}", path.display());
    let bytes = std::fs::read(path).map_err(map_read_err(path))?;
    PatchPlan::new(path, &bytes, from, to, replacement, options)
}

/// Blocking version of [`apply_range_replacement`]
pub fn apply_range_replacement_sync(
    path: impl AsRef<Path>,
    from: usize,
    to: usize,
    replacement: &Replacement,
    options: &PatchOptions,
) -> PatchResult<PatchOutcome> {
    plan_range_replacement_sync(path, from, to, replacement, options)?.write_sync()
}
