//! CLI Module
//!
//! Command-line interface for inspecting and rewriting `.vik` files.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vikfile - inspect, check and rewrite .vik project files
#[derive(Parser, Debug)]
#[command(name = "vikfile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the header and layer tree of a file
    #[command(name = "inspect")]
    Inspect {
        /// Path to the .vik file
        path: PathBuf,

        /// Print the project as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse files and report errors
    #[command(name = "check")]
    Check {
        /// A .vik file, or a directory searched recursively
        path: PathBuf,

        /// Report the first error of each file instead of the last
        #[arg(long)]
        first_error: bool,
    },

    /// Load a file and write it back out
    #[command(name = "resave")]
    Resave {
        /// File to read
        input: PathBuf,

        /// File to write
        output: PathBuf,
    },

    /// Write an empty project file
    #[command(name = "new")]
    New {
        /// Path for the new file
        path: PathBuf,
    },
}
