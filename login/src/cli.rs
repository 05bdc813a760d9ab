//! Command-line interface definitions for the login controller.
//!
//! This module contains the CLI argument parsing structures and enums
//! used by the `login` binary.

use std::env;

use clap::{Parser, Subcommand, ValueEnum};

use schoolportal_common::DialogKind;

/// Top-level command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log output format (logs are written to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
    Pretty,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Activate the login controller and keep probing until terminated.
    ///
    /// SIGHUP is treated as the app returning to the foreground.
    Run(ServiceArgs),

    /// Check backend availability once (with retries) and exit non-zero if it stays unavailable.
    Probe(ServiceArgs),

    /// Resolve, persist and print the display language.
    Language(LanguageArgs),

    /// Open one of the login page dialogs on the headless dialog host.
    OpenDialog(DialogArgs),
}

/// Arguments shared by the commands that drive the controller.
#[derive(Debug, Parser)]
pub struct ServiceArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "schoolportal_login.toml", env = "SCHOOLPORTAL_CONFIG")]
    pub config: String,

    /// Optional override for the district to probe (overrides district.id in config)
    #[arg(long)]
    pub district: Option<String>,

    /// Optional override for the role to probe as (overrides district.role in config)
    #[arg(long)]
    pub role: Option<String>,
}

#[derive(Debug, Parser)]
pub struct LanguageArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "schoolportal_login.toml", env = "SCHOOLPORTAL_CONFIG")]
    pub config: String,

    /// Language to switch to; the persisted preference is kept when omitted
    pub lang: Option<String>,
}

#[derive(Debug, Parser)]
pub struct DialogArgs {
    /// Dialog to open: `faq` or `find-my-district`
    pub kind: DialogKind,
}
