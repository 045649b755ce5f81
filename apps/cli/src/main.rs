#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::props::Mutation;
use crate::handlers::{jpa, props};
use crate::models::args::{AppCommands, Cli, JpaAction, PropsAction};
use crate::models::config::LogSettings;
use crate::services::config::load_config;

use anyhow::{Context, Result};
use clap::Parser;
use kiln_logger::Logger;
use std::process::ExitCode;
use tracing::info;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (config, source) = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _logger = init_logger(cli.verbose, &config.log)?;
    match &source {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("No configuration file; using defaults and environment"),
    }

    match cli.command {
        AppCommands::Jpa { action } => match action {
            JpaAction::Containers {} => jpa::list_containers(),
            JpaAction::Setup(args) => jpa::setup(&args, &config.jpa)?,
        },
        AppCommands::Props { action } => {
            let settings = &config.properties;
            match action {
                PropsAction::Get { file, key } => {
                    if !props::get(&file, &key)? {
                        return Ok(ExitCode::FAILURE);
                    }
                },
                PropsAction::Set { file, key, value, dry_run } => {
                    props::mutate(&file, Mutation::Set { key, value }, dry_run, settings)?;
                },
                PropsAction::Remove { file, key, dry_run } => {
                    props::mutate(&file, Mutation::Remove { key }, dry_run, settings)?;
                },
                PropsAction::List { file } => props::list(&file)?,
                PropsAction::Keys { file } => props::keys(&file)?,
                PropsAction::Merge { file, source, dry_run } => {
                    props::mutate(&file, Mutation::from_file(&source, false)?, dry_run, settings)?;
                },
                PropsAction::Replace { file, source, dry_run } => {
                    props::mutate(&file, Mutation::from_file(&source, true)?, dry_run, settings)?;
                },
                PropsAction::Scan { dir } => props::scan(dir)?,
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logger(verbosity: u8, settings: &LogSettings) -> Result<Logger> {
    let builder = Logger::builder("kiln").verbosity(verbosity);
    let builder = match &settings.filter {
        Some(filter) => builder.env_filter(filter.as_str()),
        None => builder,
    };

    let logger = match &settings.directory {
        Some(directory) => builder.directory(directory).json(settings.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
