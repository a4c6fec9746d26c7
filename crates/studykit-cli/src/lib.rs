//! Command-line adapter for the studykit command framework.
//!
//! [`CliApplication`] binds the commands in a
//! [`CommandRegistry`](studykit_core::CommandRegistry) to a `clap` parser
//! generated from their metadata, and runs the validate/execute lifecycle.
//! [`bootstrap`] wires the built-in study commands for the `studykit` binary.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs binary
use dotenvy as _;

pub mod app;
pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod studies;
pub mod utils;

// Re-export primary types for convenient access
pub use app::CliApplication;
pub use bootstrap::{CliConfig, bootstrap, bootstrap_with, init_logging};
pub use error::CliError;
pub use parser::{AppInfo, Invocation};
