use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(name = "studytrack")]
#[command(about = "Track study sessions and earn XP, levels, streaks and badges")]
#[command(version)]
struct Cli {
    /// Username to act as (defaults to the configured default_user)
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file (~/.studytrack/config.toml)
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Register a new user
    Register {
        /// Username to create
        name: String,
    },

    /// Log a study session and collect the XP
    Log {
        /// Hours studied (fractions allowed, e.g. 1.5)
        #[arg(long)]
        hours: f64,

        /// Chapter the session was spent on
        #[arg(long)]
        chapter: Option<i64>,

        /// Free-form note attached to the session
        #[arg(long)]
        notes: Option<String>,
    },

    /// Manage chapters
    Chapter {
        #[command(subcommand)]
        command: ChapterCommands,
    },

    /// Show XP, level, streak and badge summary
    Profile {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the badge catalog with unlock status
    Badges {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ChapterCommands {
    /// Add a chapter
    Add { name: String },
    /// Mark a chapter completed
    Done { id: i64 },
    /// List all chapters
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let user = cli.user.as_deref();
    match cli.command {
        Commands::Init { force } => cli::init::init_command(force),
        Commands::Register { name } => cli::user::register_command(&name),
        Commands::Log {
            hours,
            chapter,
            notes,
        } => cli::session::log_command(user, hours, chapter, notes.as_deref()),
        Commands::Chapter { command } => match command {
            ChapterCommands::Add { name } => cli::chapter::add_command(user, &name),
            ChapterCommands::Done { id } => cli::chapter::done_command(user, id),
            ChapterCommands::List => cli::chapter::list_command(user),
        },
        Commands::Profile { json } => cli::profile::profile_command(user, json),
        Commands::Badges { json } => cli::badges::badges_command(user, json),
    }
}
