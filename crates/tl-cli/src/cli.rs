//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tl_core::{NavigationStep, TimeType};

/// Timeline viewer.
///
/// Converts times between calendars, navigates periods and lays out timeline
/// documents the way the canvas would draw them.
#[derive(Debug, Parser)]
#[command(name = "tl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show an absolute time in another calendar.
    Convert {
        /// Time as "Y-M-D", "Y-M-D h:m:s" or a number for numeric time.
        time: String,

        /// Calendar the time is written in (defaults to the configured calendar).
        #[arg(long)]
        from: Option<TimeType>,

        /// Calendar to show the time in.
        #[arg(long)]
        to: TimeType,
    },

    /// List the navigation steps a calendar offers.
    Steps {
        #[arg(long)]
        calendar: Option<TimeType>,
    },

    /// Apply a navigation step to a period.
    Navigate {
        /// Step name, for example "forward" or "fit-month".
        step: NavigationStep,

        #[arg(long)]
        calendar: Option<TimeType>,

        #[arg(long)]
        start: String,

        #[arg(long)]
        end: String,

        /// Target time for go-to-date and go-to-time.
        #[arg(long)]
        target: Option<String>,
    },

    /// Lay out a JSON timeline document.
    Render {
        /// Path to the document.
        document: PathBuf,

        /// Start of the displayed period (defaults to fitting all events).
        #[arg(long, requires = "end")]
        start: Option<String>,

        #[arg(long, requires = "start")]
        end: Option<String>,

        #[arg(long)]
        width: Option<i32>,

        #[arg(long)]
        height: Option<i32>,

        /// Print draw commands as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
}
