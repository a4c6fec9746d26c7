//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where concrete collaborators are wired
//! together for the CLI adapter:
//! - Console output and the interactive prompter
//! - The file-system study store rooted at the configured directory
//! - The study commands, registered on a fresh [`CliApplication`]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use studykit_core::{ConsoleOutput, OutputSink, TracingLogger};
use tracing_subscriber::EnvFilter;

use crate::app::CliApplication;
use crate::error::CliError;
use crate::handlers::{StudyDeleteCommand, StudyListCommand};
use crate::parser::AppInfo;
use crate::studies::{FsStudyStore, StudyStore};
use crate::utils::{ConsolePrompter, Prompter};

/// Name of the installed binary.
pub const APP_NAME: &str = "studykit";

/// Environment variable overriding the studies directory.
pub const STUDIES_DIR_ENV: &str = "STUDYKIT_STUDIES_DIR";

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "STUDYKIT_LOG";

const DEFAULT_STUDIES_DIR: &str = "./studies";
const DEFAULT_LOG_FILTER: &str = "warn";
const ABOUT: &str = "Toolkit for managing study notes";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory whose sub-directories are studies.
    pub studies_dir: PathBuf,
    pub app_name: String,
    pub version: String,
}

impl CliConfig {
    /// Resolve config from the environment (after `.env` has been loaded).
    pub fn with_defaults() -> Result<Self, CliError> {
        Self::from_studies_dir(std::env::var(STUDIES_DIR_ENV).ok())
    }

    /// Resolve config from an explicit studies directory setting.
    ///
    /// `None` selects the default. The directory does not have to exist
    /// yet, but an existing non-directory at that path is rejected.
    pub fn from_studies_dir(value: Option<String>) -> Result<Self, CliError> {
        let studies_dir = match value {
            Some(value) if value.trim().is_empty() => {
                return Err(CliError::Config(format!("{STUDIES_DIR_ENV} is set but empty")));
            }
            Some(value) => PathBuf::from(value),
            None => PathBuf::from(DEFAULT_STUDIES_DIR),
        };

        match std::fs::metadata(&studies_dir) {
            Ok(metadata) if !metadata.is_dir() => {
                return Err(CliError::Config(format!(
                    "Studies path is not a directory: {}",
                    studies_dir.display()
                )));
            }
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        Ok(Self {
            studies_dir,
            app_name: APP_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    pub fn app_info(&self) -> AppInfo {
        AppInfo::new(self.app_name.clone(), self.version.clone(), ABOUT)
    }
}

/// Install the `tracing` subscriber.
///
/// Filter directives come from `STUDYKIT_LOG` (default `warn`). Logs go to
/// stderr so command output on stdout stays machine-readable.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A subscriber installed earlier (e.g. by a test harness) wins
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Bootstrap the CLI application with console collaborators.
pub fn bootstrap(config: CliConfig) -> Result<CliApplication> {
    bootstrap_with(config, Arc::new(ConsoleOutput::new()), Arc::new(ConsolePrompter))
}

/// Bootstrap with caller-provided output and prompter.
///
/// The same sink receives command output and error reports.
pub fn bootstrap_with(
    config: CliConfig,
    output: Arc<dyn OutputSink>,
    prompter: Arc<dyn Prompter>,
) -> Result<CliApplication> {
    let studies_dir = std::path::absolute(&config.studies_dir).with_context(|| {
        format!(
            "Failed to resolve studies directory {}",
            config.studies_dir.display()
        )
    })?;
    tracing::debug!(studies_dir = %studies_dir.display(), "Bootstrapping CLI");

    let store: Arc<dyn StudyStore> = Arc::new(FsStudyStore::new(studies_dir));

    let mut app = CliApplication::new(config.app_info());
    app.set_output(output.clone());
    app.set_error_output(output.clone());
    app.set_logger(Arc::new(TracingLogger));

    app.register_command(Arc::new(StudyListCommand::new(store.clone(), output.clone())));
    app.register_command(Arc::new(StudyDeleteCommand::new(store, prompter, output)));

    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_studies_dir() {
        let config = CliConfig::from_studies_dir(None).unwrap();
        assert_eq!(config.studies_dir, PathBuf::from("./studies"));
        assert_eq!(config.app_name, "studykit");
        assert_eq!(config.app_info().version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_rejects_empty_and_file_paths() {
        let err = CliConfig::from_studies_dir(Some("  ".into())).unwrap_err();
        assert_eq!(err.exit_code(), 78);

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.md");
        std::fs::write(&file, "# Notes").unwrap();
        let err = CliConfig::from_studies_dir(Some(file.display().to_string())).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_missing_directory_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("later");
        let config = CliConfig::from_studies_dir(Some(missing.display().to_string())).unwrap();
        assert_eq!(config.studies_dir, missing);
    }

    #[test]
    fn test_bootstrap_registers_study_commands() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::from_studies_dir(Some(dir.path().display().to_string())).unwrap();
        let app = bootstrap(config).unwrap();

        let names: Vec<_> = app.list_commands().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, ["study:delete", "study:list"]);
        assert_eq!(app.info().name, "studykit");
    }
}
