//! parlor CLI - a two-seat local chat.

use clap::{Parser, Subcommand};
use parlor::cli;
use std::path::PathBuf;
use std::process::ExitCode;

/// Get the version string.
///
/// - Release builds (on a git tag): "0.1.0"
/// - Development builds: "0.1.0-dev (abc1234)"
/// - Dirty working directory: "0.1.0-dev (abc1234-dirty)"
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("PARLOR_GIT_HASH");
    const IS_RELEASE: &str = env!("PARLOR_IS_RELEASE");

    // Use a static to avoid repeated allocations
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            VERSION.to_string()
        } else {
            format!("{VERSION}-dev ({GIT_HASH})")
        }
    })
}

#[derive(Parser)]
#[command(name = "parlor")]
#[command(author, version = version(), about = "Two-seat local chat", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as one of the two seats (R or B).
    Login {
        /// Identity to take (R or B).
        user: String,
    },

    /// Log out of the current seat.
    Logout,

    /// Send a message as the logged-in seat.
    Send {
        /// Message text (may be empty when --media is given).
        #[arg(default_value = "")]
        text: String,

        /// Id of an earlier message to reply to.
        #[arg(short, long)]
        reply_to: Option<String>,

        /// File to attach as inline media (encoded into the message).
        #[arg(short, long)]
        media: Option<PathBuf>,
    },

    /// Show the message log (marks the other seat's messages seen).
    Show,

    /// Show session identity and the typing flag.
    Status {
        /// Keep polling the typing flag once a second.
        #[arg(short, long)]
        watch: bool,
    },

    /// Set the shared typing flag (on or off).
    Typing {
        /// New flag state.
        state: String,
    },

    /// Delete the whole message log.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login { user } => cli::login::run(&user),
        Commands::Logout => cli::logout::run(),
        Commands::Send {
            text,
            reply_to,
            media,
        } => cli::send::run(&text, reply_to.as_deref(), media.as_deref()),
        Commands::Show => cli::show::run(),
        Commands::Status { watch } => cli::status::run(watch),
        Commands::Typing { state } => cli::typing::run(&state),
        Commands::Clear { yes } => cli::clear::run(yes),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("parlor: error: {e}");
            ExitCode::FAILURE
        }
    }
}
