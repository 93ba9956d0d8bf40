//! CLI module for the identity service
//!
//! Subcommands:
//! - `serve`: run the HTTP server
//! - `migrate`: create the PostgreSQL schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Identity service - account registration, login and caller profiles
#[derive(Parser)]
#[command(name = "identity-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Create the PostgreSQL schema
    Migrate(migrate::MigrateArgs),
}
