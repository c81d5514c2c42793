//! CLI entry point for the documentation index.
//!
//! Acts as a minimal host: indexes source files, then dumps the symbol tree
//! or answers one completion request.

use anyhow::{Context, bail};
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use docindex::completion::word_before;
use docindex::config::CONFIG_DIR;
use docindex::{DocSession, FileWalker, IndexError, Settings, logging};
use std::path::PathBuf;
use std::sync::Arc;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Documentation-comment symbol index
#[derive(Parser)]
#[command(
    name = "docindex",
    version = env!("CARGO_PKG_VERSION"),
    about = "Index JSDoc comments and answer completion queries",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    #[command(about = "Set up .docindex directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Index files or directories and report statistics
    #[command(about = "Parse doc comments and report what was indexed")]
    Index {
        /// Files or directories to index
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Parse files sequentially
        #[arg(long)]
        no_parallel: bool,

        /// Dry run - show how many files would be indexed
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the symbol tree as tern-style JSON
    #[command(about = "Dump the symbol tree as JSON")]
    Dump {
        /// Files or directories to index
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Complete the token ending at a byte offset
    #[command(
        about = "Offer documented completions at a cursor position",
        after_help = "Examples:\n  docindex complete src --file app.js --offset 120\n  docindex complete src --file app.js --offset 120 --member --json"
    )]
    Complete {
        /// Files or directories to index before completing
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Buffer holding the cursor
        #[arg(long)]
        file: PathBuf,

        /// Cursor byte offset in the buffer
        #[arg(long)]
        offset: usize,

        /// Complete members of the dotted expression before the cursor
        #[arg(long)]
        member: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path).map_err(|e| {
            anyhow::anyhow!("Configuration error loading from {}: {e}", path.display())
        })?,
        None => Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            Settings::default()
        }),
    };
    settings.validate()?;
    Ok(settings)
}

/// Build a session over `paths`, reporting per-file failures on stderr
fn build_session(settings: Settings, paths: &[PathBuf]) -> anyhow::Result<DocSession> {
    let mut session = DocSession::new(Arc::new(settings));
    let stats = session.index_paths(paths)?;
    for (path, error) in &stats.errors {
        eprintln!("Warning: {}: {error}", path.display());
    }
    Ok(session)
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        if let Some(index_error) = e.downcast_ref::<IndexError>() {
            for suggestion in index_error.recovery_suggestions() {
                eprintln!("  - {suggestion}");
            }
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = load_settings(&cli)?;
    logging::init(&settings);

    match cli.command {
        Commands::Init { force } => {
            let config_path = PathBuf::from(CONFIG_DIR).join("settings.toml");
            if config_path.exists() && !force {
                eprintln!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                eprintln!("Use --force to overwrite");
                std::process::exit(1);
            }
            Settings::default().save(&config_path)?;
            println!("Created configuration file at: {}", config_path.display());
        }

        Commands::Config => {
            println!("Current Configuration:");
            println!("{}", "=".repeat(50));
            println!("{}", toml::to_string_pretty(&settings)?);
        }

        Commands::Index {
            paths,
            no_parallel,
            dry_run,
        } => {
            if dry_run {
                let walker = FileWalker::new(Arc::new(settings));
                for path in &paths {
                    let count = if path.is_dir() {
                        walker.count_files(path)?
                    } else {
                        1
                    };
                    println!("{}: {count} files", path.display());
                }
                return Ok(());
            }
            if no_parallel {
                settings.indexing.parallel = false;
            }
            let mut session = DocSession::new(Arc::new(settings));
            let stats = session.index_paths(&paths)?;
            stats.display();
            if session.index().collisions() > 0 {
                println!("  Path collisions: {}", session.index().collisions());
            }
            if stats.files_failed > 0 {
                std::process::exit(1);
            }
        }

        Commands::Dump { paths } => {
            let session = build_session(settings, &paths)?;
            println!("{}", serde_json::to_string_pretty(&session.index().to_json())?);
        }

        Commands::Complete {
            paths,
            file,
            offset,
            member,
            json,
        } => {
            let session = build_session(settings, &paths)?;
            let buffer = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if offset > buffer.len() {
                bail!(
                    "offset {offset} is past the end of {} ({} bytes)",
                    file.display(),
                    buffer.len()
                );
            }

            let token = word_before(&buffer, offset);
            let records = session.complete(&buffer, token.start, token.end, member);

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                eprintln!("No completions");
            } else {
                for record in &records {
                    match &record.ty {
                        Some(ty) => println!("{}: {ty}", record.name),
                        None => println!("{}", record.name),
                    }
                }
            }
        }
    }

    Ok(())
}
