//! Port definitions (trait abstractions) for the framework's collaborators.
//!
//! Ports describe what the core expects from its surroundings. Concrete
//! destinations (terminal, in-memory buffer, log backend) are chosen by the
//! adapter that wires the application together.

pub mod logger;
pub mod output;

pub use logger::{Logger, NoopLogger, TracingLogger};
pub use output::{BufferedOutput, ConsoleOutput, OutputSink};
