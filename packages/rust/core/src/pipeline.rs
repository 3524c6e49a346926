//! End-to-end index pipeline: scan → read → extract → render → atomic write.
//!
//! One invocation fully recomputes the index; there is no incremental state
//! between runs beyond the filesystem itself. Per-file failures are contained
//! as skips; only a root-level failure aborts the run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use arcindex_extract::{ExtractOptions, extract, humanize_stem};
use arcindex_scan::{PhaseDir, ScanOptions, scan_root};
use arcindex_shared::{ArcIndexError, ArchiveConfig, ContentFile, PhaseGroup, Result};

use crate::render::{RenderOptions, render_index};

/// Configuration for one index build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Archive root directory.
    pub root: PathBuf,
    /// Archive configuration (loaded from `arcindex.toml` or defaults).
    pub config: ArchiveConfig,
}

/// Result of a completed index build.
#[derive(Debug)]
pub struct BuildResult {
    /// Absolute path of the written index file.
    pub output_path: PathBuf,
    /// Number of phase folders discovered.
    pub phase_count: usize,
    /// Number of articles indexed.
    pub file_count: usize,
    /// Number of files skipped as unreadable or malformed.
    pub skipped: usize,
    /// Whether the written bytes differ from the previous index.
    pub changed: bool,
    /// SHA-256 of the written index.
    pub index_hash: String,
}

/// Result of an index staleness check.
#[derive(Debug)]
pub struct CheckResult {
    /// Path of the index file that was checked.
    pub output_path: PathBuf,
    /// True when the on-disk index matches a fresh render byte for byte.
    pub up_to_date: bool,
}

// ---------------------------------------------------------------------------
// Pipeline entry points
// ---------------------------------------------------------------------------

/// Build the index and write it atomically to the configured output path.
///
/// The output is a complete replacement of the previous index; a temp-file
/// rename makes the swap atomic so no partial write is ever visible.
#[instrument(skip_all, fields(root = %config.root.display()))]
pub fn build_index(config: &BuildConfig) -> Result<BuildResult> {
    let (groups, skipped) = collect_groups(&config.root, &config.config)?;

    let render_opts = RenderOptions::from(&config.config);
    let rendered = render_index(&groups, &render_opts);

    let output_path = config.root.join(&config.config.index.output);
    let previous = read_existing(&output_path);
    let changed = previous.as_deref() != Some(rendered.as_bytes());

    write_atomic(&output_path, rendered.as_bytes())?;

    let result = BuildResult {
        output_path,
        phase_count: groups.len(),
        file_count: groups.iter().map(|g| g.files.len()).sum(),
        skipped,
        changed,
        index_hash: sha256_hex(rendered.as_bytes()),
    };

    info!(
        phases = result.phase_count,
        files = result.file_count,
        skipped = result.skipped,
        changed = result.changed,
        output = %result.output_path.display(),
        "index build complete"
    );

    Ok(result)
}

/// Render the index without writing and compare against the on-disk file.
///
/// Lets the CI trigger detect a stale committed index without touching the
/// working tree.
#[instrument(skip_all, fields(root = %config.root.display()))]
pub fn check_index(config: &BuildConfig) -> Result<CheckResult> {
    let (groups, _skipped) = collect_groups(&config.root, &config.config)?;

    let render_opts = RenderOptions::from(&config.config);
    let rendered = render_index(&groups, &render_opts);

    let output_path = config.root.join(&config.config.index.output);
    let up_to_date = read_existing(&output_path).as_deref() == Some(rendered.as_bytes());

    info!(
        output = %output_path.display(),
        up_to_date,
        "index check complete"
    );

    Ok(CheckResult {
        output_path,
        up_to_date,
    })
}

/// Scan the archive and extract metadata for every content file.
///
/// Returns the ordered phase groups plus the number of files skipped as
/// unreadable or malformed. Shared by `build`, `check`, and `list`.
pub fn collect_groups(root: &Path, config: &ArchiveConfig) -> Result<(Vec<PhaseGroup>, usize)> {
    let scan_opts = ScanOptions::from(config);
    let extract_opts = ExtractOptions::from(config);

    let phases = scan_root(root, &scan_opts)?;

    let mut groups = Vec::with_capacity(phases.len());
    let mut skipped = 0usize;

    for phase in &phases {
        let mut files = Vec::with_capacity(phase.files.len());

        for path in &phase.files {
            match load_entry(phase, path, &extract_opts) {
                Some(entry) => files.push(entry),
                None => skipped += 1,
            }
        }

        groups.push(PhaseGroup {
            name: phase.name.clone(),
            files,
        });
    }

    Ok((groups, skipped))
}

// ---------------------------------------------------------------------------
// Per-file processing
// ---------------------------------------------------------------------------

/// Read and extract one content file. `None` means skip (logged).
fn load_entry(phase: &PhaseDir, path: &Path, opts: &ExtractOptions) -> Option<ContentFile> {
    // Scan guarantees UTF-8 file names.
    let file_name = path.file_name()?.to_str()?;

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable content file, skipping");
            return None;
        }
    };

    let html = match String::from_utf8(bytes.clone()) {
        Ok(html) => html,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed content file, skipping");
            return None;
        }
    };

    let extracted = extract(&html, opts);
    let title = extracted
        .title
        .unwrap_or_else(|| humanize_stem(file_name));

    let modified_at = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from);

    debug!(path = %path.display(), title = %title, "content file indexed");

    Some(ContentFile {
        title,
        rel_path: format!("{}/{}", phase.name, file_name),
        excerpt: extracted.excerpt,
        word_count: extracted.word_count,
        modified_at,
        content_hash: sha256_hex(&bytes),
        markers: extracted.markers,
    })
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

/// Read the current index bytes, if any.
fn read_existing(path: &Path) -> Option<Vec<u8>> {
    std::fs::read(path).ok()
}

/// Write to a temp file in the same directory, then rename over the target.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ArcIndexError::validation("output path has no file name"))?;

    let temp = path.with_file_name(format!(".{file_name}.tmp"));

    std::fs::write(&temp, bytes).map_err(|e| ArcIndexError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| ArcIndexError::io(path, e))?;

    debug!(path = %path.display(), bytes = bytes.len(), "index written");
    Ok(())
}

/// Hex-encoded SHA-256 of a byte slice.
fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
