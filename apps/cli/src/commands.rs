//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

use arcindex_core::pipeline::{self, BuildConfig};
use arcindex_shared::{ArchiveConfig, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// arcindex — regenerate the landing index of a phase-folder archive.
#[derive(Parser)]
#[command(
    name = "arcindex",
    version,
    about = "Scan phase folders and regenerate the archive's landing index.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Output format for `list`.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum ListFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Regenerate the index page from the archive tree.
    Build {
        /// Archive root directory.
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Config file path (defaults to <root>/arcindex.toml).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file name override.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Verify that the committed index matches the tree (for CI).
    Check {
        /// Archive root directory.
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Config file path (defaults to <root>/arcindex.toml).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List discovered articles without writing anything.
    List {
        /// Archive root directory.
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Config file path (defaults to <root>/arcindex.toml).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(long, default_value = "text")]
        format: ListFormat,
    },

    /// Configuration management.
    Config {
        /// Archive root directory.
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default arcindex.toml to the archive root.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "arcindex=info",
        1 => "arcindex=debug",
        _ => "arcindex=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build {
            root,
            config,
            output,
        } => cmd_build(&root, config.as_deref(), output.as_deref()),
        Command::Check { root, config } => cmd_check(&root, config.as_deref()),
        Command::List {
            root,
            config,
            format,
        } => cmd_list(&root, config.as_deref(), &format),
        Command::Config { root, action } => match action {
            ConfigAction::Init => cmd_config_init(&root),
            ConfigAction::Show => cmd_config_show(&root),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Load the archive config, honoring an explicit `--config` override.
fn load_archive_config(root: &Path, config_path: Option<&Path>) -> Result<ArchiveConfig> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config(root)?,
    };
    Ok(config)
}

fn cmd_build(root: &Path, config_path: Option<&Path>, output: Option<&str>) -> Result<()> {
    let mut config = load_archive_config(root, config_path)?;
    if let Some(output) = output {
        config.index.output = output.to_string();
    }

    info!(root = %root.display(), output = %config.index.output, "building index");

    let result = pipeline::build_index(&BuildConfig {
        root: root.to_path_buf(),
        config,
    })?;

    println!();
    println!("  Index regenerated!");
    println!("  Phases:   {}", result.phase_count);
    println!("  Articles: {}", result.file_count);
    if result.skipped > 0 {
        println!("  Skipped:  {}", result.skipped);
    }
    println!("  Changed:  {}", if result.changed { "yes" } else { "no" });
    println!("  Output:   {}", result.output_path.display());
    println!();

    Ok(())
}

fn cmd_check(root: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_archive_config(root, config_path)?;

    let result = pipeline::check_index(&BuildConfig {
        root: root.to_path_buf(),
        config,
    })?;

    if !result.up_to_date {
        return Err(eyre!(
            "index at '{}' is stale or missing — run `arcindex build`",
            result.output_path.display()
        ));
    }

    println!("Index is up to date: {}", result.output_path.display());
    Ok(())
}

fn cmd_list(root: &Path, config_path: Option<&Path>, format: &ListFormat) -> Result<()> {
    let config = load_archive_config(root, config_path)?;
    let (groups, skipped) = pipeline::collect_groups(root, &config)?;

    match format {
        ListFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        ListFormat::Text => {
            for group in &groups {
                println!("{} ({})", group.name, group.files.len());
                for file in &group.files {
                    println!("  {}  {}", file.title, file.rel_path);
                }
            }
            if skipped > 0 {
                println!("({skipped} file(s) skipped)");
            }
        }
    }

    Ok(())
}

fn cmd_config_init(root: &Path) -> Result<()> {
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(root: &Path) -> Result<()> {
    let config = load_config(root)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
