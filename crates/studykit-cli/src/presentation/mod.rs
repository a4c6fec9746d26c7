//! Shared CLI presentation utilities.
//!
//! This module provides reusable formatting functions for consistent
//! command output. Everything here returns strings; writing them is the
//! caller's job (through its output sink).

pub mod tables;

pub use tables::{format_optional, separator, truncate_string};
