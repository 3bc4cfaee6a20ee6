//! CLI subcommand implementations.

pub mod convert;
pub mod navigate;
pub mod render;
pub mod steps;
pub mod util;
