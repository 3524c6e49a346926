//! Archive configuration for arcindex.
//!
//! Config lives at `<archive root>/arcindex.toml` and is optional: a missing
//! file means defaults. CLI flags override config file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ArcIndexError, Result};

/// Configuration file name, resolved against the archive root.
const CONFIG_FILE_NAME: &str = "arcindex.toml";

// ---------------------------------------------------------------------------
// Config structs (matching arcindex.toml schema)
// ---------------------------------------------------------------------------

/// Top-level archive config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Index output settings.
    #[serde(default)]
    pub index: IndexConfig,

    /// Phase folder discovery settings.
    #[serde(default)]
    pub phases: PhasesConfig,

    /// Content file settings.
    #[serde(default)]
    pub content: ContentConfig,
}

/// `[index]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Output file name, relative to the archive root.
    #[serde(default = "default_output")]
    pub output: String,

    /// Title rendered at the top of the index page.
    #[serde(default = "default_site_title")]
    pub site_title: String,

    /// Render per-article last-modified timestamps. Off by default so the
    /// generated index depends only on file contents.
    #[serde(default)]
    pub show_modified: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            site_title: default_site_title(),
            show_modified: false,
        }
    }
}

fn default_output() -> String {
    "index.html".into()
}
fn default_site_title() -> String {
    "Archive".into()
}

/// `[phases]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhasesConfig {
    /// Regex a folder name must match to be recognized as a phase folder.
    #[serde(default = "default_phase_pattern")]
    pub pattern: String,

    /// Explicit taxonomy ordering. Folders named here sort first, in list
    /// order; everything else follows lexicographically.
    #[serde(default)]
    pub order: Vec<String>,
}

impl Default for PhasesConfig {
    fn default() -> Self {
        Self {
            pattern: default_phase_pattern(),
            order: Vec::new(),
        }
    }
}

fn default_phase_pattern() -> String {
    "^phase".into()
}

/// `[content]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content file extension (without the dot).
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Skeleton file name excluded from indexing wherever it appears.
    #[serde(default = "default_template")]
    pub template: String,

    /// Maximum excerpt length in characters.
    #[serde(default = "default_excerpt_max_len")]
    pub excerpt_max_len: usize,

    /// CSS class names to detect and surface as badges on index entries.
    #[serde(default)]
    pub marker_classes: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            template: default_template(),
            excerpt_max_len: default_excerpt_max_len(),
            marker_classes: Vec::new(),
        }
    }
}

fn default_extension() -> String {
    "html".into()
}
fn default_template() -> String {
    "template.html".into()
}
fn default_excerpt_max_len() -> usize {
    300
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config file under the given archive root.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the archive config from the root directory. Returns defaults if the
/// file does not exist.
pub fn load_config(root: &Path) -> Result<ArchiveConfig> {
    let path = config_file_path(root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(ArchiveConfig::default());
    }

    load_config_from(&path)
}

/// Load the archive config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<ArchiveConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ArcIndexError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ArcIndexError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file to the archive root.
/// Returns the path to the created file.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = config_file_path(root);
    let config = ArchiveConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ArcIndexError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ArcIndexError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
