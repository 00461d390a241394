//! Application Module
//!
//! CLI, configuration, and result presentation.

pub mod cli;
pub mod config;
pub mod present;

pub use cli::{Cli, Commands};
pub use config::Config;
