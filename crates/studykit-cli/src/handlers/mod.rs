//! Concrete commands built on the framework.
//!
//! Handlers follow the canonical pattern:
//! - Collaborators (store, prompter, output sink) are injected in `new`
//! - `validate` checks input shape only
//! - `execute` turns expected failures into `CommandResult::failure`
//!
//! Handlers should NOT:
//! - Keep state between invocations
//! - Print directly; all text goes through the injected output sink

pub mod study_delete;
pub mod study_list;

pub use study_delete::StudyDeleteCommand;
pub use study_list::StudyListCommand;
