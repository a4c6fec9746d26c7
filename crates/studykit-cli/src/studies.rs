//! Study storage port and its file-system implementation.
//!
//! A study is a directory under the studies root holding markdown files.
//! Commands only see the [`StudyStore`] trait; [`FsStudyStore`] is wired in
//! by the bootstrap.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What `study:list` knows about one study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudySummary {
    pub name: String,
    pub path: PathBuf,
    /// Markdown files directly inside the study directory.
    pub file_count: usize,
    pub modified: Option<DateTime<Utc>>,
}

/// Storage operations the study commands depend on.
#[async_trait]
pub trait StudyStore: Send + Sync {
    /// All studies, ordered by name. A missing root yields an empty list.
    async fn list(&self) -> io::Result<Vec<StudySummary>>;

    async fn exists(&self, name: &str) -> io::Result<bool>;

    /// Remove the study and everything in it.
    async fn delete(&self, name: &str) -> io::Result<()>;
}

/// Studies as sub-directories of a root directory.
#[derive(Debug, Clone)]
pub struct FsStudyStore {
    root: PathBuf,
}

impl FsStudyStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn study_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait]
impl StudyStore for FsStudyStore {
    async fn list(&self) -> io::Result<Vec<StudySummary>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    root = %self.root.display(),
                    "Studies directory does not exist yet"
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        let mut studies = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let metadata = entry.metadata().await?;
            if !metadata.is_dir() || name.starts_with('.') {
                continue;
            }

            studies.push(StudySummary {
                file_count: count_markdown_files(&entry.path()).await?,
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
                path: entry.path(),
                name,
            });
        }

        studies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(studies)
    }

    async fn exists(&self, name: &str) -> io::Result<bool> {
        match tokio::fs::metadata(self.study_path(name)).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn delete(&self, name: &str) -> io::Result<()> {
        let path = self.study_path(name);
        tracing::info!(path = %path.display(), "Deleting study");
        tokio::fs::remove_dir_all(path).await
    }
}

#[cfg(test)]
mockall::mock! {
    pub Store {}

    #[async_trait]
    impl StudyStore for Store {
        async fn list(&self) -> io::Result<Vec<StudySummary>>;
        async fn exists(&self, name: &str) -> io::Result<bool>;
        async fn delete(&self, name: &str) -> io::Result<()>;
    }
}

async fn count_markdown_files(dir: &Path) -> io::Result<usize> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut count = 0;
    while let Some(entry) = entries.next_entry().await? {
        let is_markdown = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        if is_markdown && entry.file_type().await?.is_file() {
            count += 1;
        }
    }
    Ok(count)
}
