//! Core domain types for the archive index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ContentFile
// ---------------------------------------------------------------------------

/// One published article, the unit indexed.
///
/// Produced by the pipeline from a file found under a phase folder, and
/// serialized as-is by the `list --format json` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentFile {
    /// Display title (first `<h1>` text, or humanized file name).
    pub title: String,
    /// Path relative to the archive root, with forward slashes
    /// (e.g., `phase1/article_one.html`). Used as the index link target.
    pub rel_path: String,
    /// Excerpt from the first paragraph, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Approximate word count of the article body.
    pub word_count: usize,
    /// Last-modified timestamp from filesystem metadata, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    /// SHA-256 hash of the raw file contents.
    pub content_hash: String,
    /// Configured marker classes detected in the article markup.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<String>,
}

// ---------------------------------------------------------------------------
// PhaseGroup
// ---------------------------------------------------------------------------

/// A phase folder together with its indexed articles, in render order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseGroup {
    /// Folder name, used as the section heading.
    pub name: String,
    /// Articles directly inside the folder, ordered by file name.
    pub files: Vec<ContentFile>,
}
