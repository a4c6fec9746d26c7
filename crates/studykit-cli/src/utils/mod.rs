//! Small helpers shared by command handlers.

pub mod input;

pub use input::{ConsolePrompter, Prompter};
