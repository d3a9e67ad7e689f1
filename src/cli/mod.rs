//! CLI module - Command-line interface for delivery-desk
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// delivery-desk - Delivery order management server
#[derive(Debug, Parser)]
#[command(name = "delivery-desk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (skips the default search path)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "init")]
    InitConfig,

    /// Print dashboard counters
    Stats,
}

impl Cli {
    /// The subcommand to run; no subcommand means `serve`.
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

pub use commands::*;
