//! Phase folder and content file discovery.
//!
//! Walks the immediate subdirectories of an archive root, keeps the ones
//! whose names match the configured phase pattern, and lists the content
//! files directly inside each. Discovery is deliberately one level deep:
//! the folder convention puts articles straight into their phase folder,
//! so nested directories are ignored.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, instrument, warn};

use arcindex_shared::{ArcIndexError, ArchiveConfig, Result};

// ---------------------------------------------------------------------------
// Scan options
// ---------------------------------------------------------------------------

/// Runtime scan configuration, merged from the archive config.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Regex a folder name must match to count as a phase folder.
    pub phase_pattern: String,
    /// Explicit taxonomy ordering for phase folders.
    pub order: Vec<String>,
    /// Content file extension (without the dot).
    pub extension: String,
    /// Skeleton file name excluded from discovery.
    pub template: String,
}

impl From<&ArchiveConfig> for ScanOptions {
    fn from(config: &ArchiveConfig) -> Self {
        Self {
            phase_pattern: config.phases.pattern.clone(),
            order: config.phases.order.clone(),
            extension: config.content.extension.clone(),
            template: config.content.template.clone(),
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&ArchiveConfig::default())
    }
}

// ---------------------------------------------------------------------------
// PhaseDir
// ---------------------------------------------------------------------------

/// A recognized phase folder and its candidate content files.
#[derive(Debug, Clone)]
pub struct PhaseDir {
    /// Folder name (the last path component).
    pub name: String,
    /// Absolute path to the folder.
    pub path: PathBuf,
    /// Content files directly inside the folder, ordered by file name.
    pub files: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Scan the archive root for phase folders and their content files.
///
/// An unreadable root is fatal; an unreadable phase folder is skipped with
/// a warning. Zero phase folders is a valid, empty result.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn scan_root(root: &Path, opts: &ScanOptions) -> Result<Vec<PhaseDir>> {
    let pattern = Regex::new(&opts.phase_pattern).map_err(|e| {
        ArcIndexError::config(format!(
            "invalid phase pattern '{}': {e}",
            opts.phase_pattern
        ))
    })?;

    let entries = std::fs::read_dir(root).map_err(|e| ArcIndexError::io(root, e))?;

    let mut phases: Vec<PhaseDir> = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "unreadable directory entry, skipping");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            warn!(path = %path.display(), "non-UTF-8 folder name, skipping");
            continue;
        };

        if name.starts_with('.') || !pattern.is_match(name) {
            continue;
        }

        let files = list_content_files(&path, opts);
        debug!(phase = name, files = files.len(), "phase folder discovered");

        phases.push(PhaseDir {
            name: name.to_string(),
            path,
            files,
        });
    }

    sort_phases(&mut phases, &opts.order);

    debug!(phases = phases.len(), "scan complete");
    Ok(phases)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// List content files directly inside a phase folder, ordered by file name.
///
/// Unreadable folders yield an empty list (recoverable).
fn list_content_files(dir: &Path, opts: &ScanOptions) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "unreadable phase folder, skipping");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            warn!(path = %path.display(), "non-UTF-8 file name, skipping");
            continue;
        };

        if name.starts_with('.') || name == opts.template {
            continue;
        }

        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&opts.extension));

        if has_extension {
            files.push(path);
        }
    }

    files.sort();
    files
}

/// Sort phase folders: explicit taxonomy order first, then lexicographic.
fn sort_phases(phases: &mut [PhaseDir], order: &[String]) {
    phases.sort_by(|a, b| {
        let rank = |name: &str| order.iter().position(|o| o == name).unwrap_or(usize::MAX);
        rank(&a.name)
            .cmp(&rank(&b.name))
            .then_with(|| a.name.cmp(&b.name))
    });
}
