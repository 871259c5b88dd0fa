//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the DocQuery client.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::query::{FailedQuestion, Turn};

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the DocQuery banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n   {} {}",
                "DocQuery".bright_cyan().bold(),
                "Intelligent Document Insights".bright_white()
            );
            println!(
                "   {}\n",
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!(
                "\n   DocQuery: Intelligent Document Insights v{}\n",
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }

    /// Print one answered question
    pub fn turn(&self, turn: &Turn) {
        let time = turn.asked_at.format("%H:%M").to_string();
        if self.colored {
            println!("\n  {} {} {}", "you".bright_blue().bold(), time.dimmed(), turn.question);
            println!("  {} {}", "docquery".bright_magenta().bold(), turn.answer);
        } else {
            println!("\n  [YOU {}] {}", time, turn.question);
            println!("  [DOCQUERY] {}", turn.answer);
        }
    }

    /// Print a question that got no answer
    pub fn failed_question(&self, failed: &FailedQuestion) {
        if self.colored {
            println!("\n  {} {}", "you".bright_blue().bold(), failed.question);
            eprintln!("  {} {}", "✗".red().bold(), failed.error.red());
        } else {
            println!("\n  [YOU] {}", failed.question);
            eprintln!("  [ERROR] {}", failed.error);
        }
    }

    /// Print the chat prompt and flush so it shows before input
    pub fn prompt(&self) {
        if self.colored {
            print!("\n  {} ", "?".bright_yellow().bold());
        } else {
            print!("\n  > ");
        }
        io::stdout().flush().ok();
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }
}
