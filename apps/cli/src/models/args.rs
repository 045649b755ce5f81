//! # CLI Argument Definitions
//!
//! This module defines the command-line interface (CLI) structure using the `clap` crate.
//! It specifies the available subcommands, arguments, and flags for the application.

use clap::{ArgAction, Args, Parser, Subcommand};
use kiln_jpa::{ContainerKind, DatabaseType, Provider};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "kiln")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Project scaffolding helpers: persistence units and .properties files")]
pub struct Cli {
    /// Configuration file (TOML). Defaults to an optional `kiln.toml` in the working directory
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// The main subcommand to execute.
    #[command(subcommand)]
    pub command: AppCommands,
}

/// Enumeration of available application subcommands.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Configure JPA persistence units
    Jpa {
        #[command(subcommand)]
        action: JpaAction,
    },
    /// Read and edit .properties files
    Props {
        #[command(subcommand)]
        action: PropsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum JpaAction {
    /// List the supported container kinds
    Containers {},
    /// Configure a persistence unit for a container and print it as JSON
    Setup(SetupArgs),
}

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Container kind (e.g. 'JBOSS_AS7', 'weblogic-12c')
    #[arg(short, long)]
    pub container: Option<ContainerKind>,

    /// Persistence provider ('HIBERNATE', 'ECLIPSELINK', 'OPENJPA')
    #[arg(short, long)]
    pub provider: Option<Provider>,

    /// Database type, used for the JDBC driver and the dialect
    #[arg(short, long)]
    pub database: Option<DatabaseType>,

    /// JNDI name of the data source
    #[arg(long)]
    pub jndi: Option<String>,

    /// JDBC connection URL
    #[arg(long)]
    pub url: Option<String>,

    /// JDBC driver class
    #[arg(long)]
    pub driver: Option<String>,

    #[arg(long)]
    pub user: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Persistence unit name
    #[arg(long)]
    pub unit: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum PropsAction {
    /// Print the value of a key (exits with 1 when the key is absent)
    Get { file: PathBuf, key: String },
    /// Set a key
    Set {
        file: PathBuf,
        key: String,
        value: String,
        /// Print the resulting file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove a key
    Remove {
        file: PathBuf,
        key: String,
        /// Print the resulting file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print all entries in key order
    List { file: PathBuf },
    /// Print all keys in order
    Keys { file: PathBuf },
    /// Copy every entry of another file into this one
    Merge {
        file: PathBuf,
        source: PathBuf,
        /// Print the resulting file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Replace the whole content with the entries of another file
    Replace {
        file: PathBuf,
        source: PathBuf,
        /// Print the resulting file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Find .properties files below a directory
    Scan {
        /// Directory to search (defaults to the working directory)
        dir: Option<PathBuf>,
    },
}
