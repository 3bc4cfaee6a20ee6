//! Timeline viewer CLI library.
//!
//! This crate provides the `tl` command-line interface over `tl-core`.

mod cli;
pub mod commands;
mod config;
pub mod document;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use document::Document;
