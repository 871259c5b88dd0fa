//! CLI module for DocQuery
//!
//! Provides command-line interface parsing and handling for the docquery binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DocQuery - ask questions about your documents
///
/// Terminal client for the DocQuery backend: create an account, sign in,
/// upload a document and ask questions about it.
#[derive(Parser, Debug)]
#[command(
    name = "docquery",
    version,
    about = "DocQuery - ask questions about your documents",
    long_about = "Terminal client for the DocQuery backend.\n\n\
                  Sign in once; the session is kept in a token file until 'signout'.",
    after_help = "EXAMPLES:\n    \
                  docquery signup --name Ada --email ada@x.com --password p --confirm-password p\n    \
                  docquery signin --user ada@x.com --password p\n    \
                  docquery upload report.pdf\n    \
                  docquery ask \"What is this document about?\"\n    \
                  docquery chat                      # Ask several questions in a row"
)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./docquery.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration
    #[arg(long, global = true, env = "DOCQUERY_API_BASE")]
    pub api_base: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    Signup {
        /// Full name, used as the account's username
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "DOCQUERY_PASSWORD", hide_env_values = true)]
        password: String,

        /// Must equal --password
        #[arg(long)]
        confirm_password: String,
    },

    /// Sign in and keep the session token
    Signin {
        /// Username or email
        #[arg(short, long)]
        user: String,

        #[arg(long, env = "DOCQUERY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session token
    Signout,

    /// Show whether a session is active and where it is kept
    Status,

    /// Upload a document (PDF, DOCX or TXT)
    Upload {
        /// File to upload
        path: PathBuf,
    },

    /// Ask one question about the uploaded document
    Ask {
        /// The question; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Ask questions interactively until EOF or ':quit'
    Chat,

    /// Print the effective configuration
    Config,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::try_parse_from(["docquery", "ask", "What", "is", "this?"]).unwrap();
        match cli.command {
            Commands::Ask { question } => assert_eq!(question.join(" "), "What is this?"),
            other => panic!("Expected ask, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "docquery",
            "status",
            "--api-base",
            "http://127.0.0.1:9",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(cli.api_base.as_deref(), Some("http://127.0.0.1:9"));
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_upload_requires_path() {
        assert!(Cli::try_parse_from(["docquery", "upload"]).is_err());
    }
}
