//! Resource grid CLI library.
//!
//! This crate provides the CLI interface for the resource calendar grid.

mod cli;
pub mod commands;
mod config;
pub mod data;

pub use cli::{Cli, Commands, DrilldownArgs, GroupArgs, HeaderArgs};
pub use config::Config;
