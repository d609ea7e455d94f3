//! canvass-store — JSON persistence for surveys, tests and response records.
//!
//! The store is an object-graph save/load layer keyed by file path: entities
//! round-trip structurally unchanged, and the on-disk encoding is an
//! implementation detail nothing else depends on. Response populations are
//! matched to their subject by the filename convention
//! `<sanitized-subject>_<YYYYMMDD_HHmmss>.json`, where sanitization replaces
//! every character outside `[A-Za-z0-9_-]` with `_`.

mod error;

pub use error::StoreError;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use canvass_core::model::{ResponseRecord, Survey};
use canvass_core::oracle::Test;

/// Extension shared by every stored file.
pub const FILE_EXT: &str = "json";

/// Which kind of collection a response record belongs to. Survey and test
/// responses live in separate directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    Survey,
    Test,
}

/// File-backed storage rooted at a data directory.
///
/// Layout under the root, created on open: `surveys/`, `tests/`,
/// `responses/` and `test_responses/`.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open a store rooted at `root`, creating its directories as needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { root: root.into() };
        for dir in [
            store.surveys_dir(),
            store.tests_dir(),
            store.responses_dir(SubjectKind::Survey),
            store.responses_dir(SubjectKind::Test),
        ] {
            fs::create_dir_all(&dir).map_err(|source| StoreError::Io { path: dir.clone(), source })?;
        }
        Ok(store)
    }

    pub fn surveys_dir(&self) -> PathBuf {
        self.root.join("surveys")
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.root.join("tests")
    }

    pub fn responses_dir(&self, kind: SubjectKind) -> PathBuf {
        match kind {
            SubjectKind::Survey => self.root.join("responses"),
            SubjectKind::Test => self.root.join("test_responses"),
        }
    }

    pub fn save_survey(&self, survey: &Survey) -> Result<PathBuf, StoreError> {
        let path = self.surveys_dir().join(entity_file_name(&survey.name));
        write_json(&path, survey)?;
        Ok(path)
    }

    pub fn load_survey(&self, name: &str) -> Result<Survey, StoreError> {
        load_entity(&self.surveys_dir(), name)
    }

    /// Names of every stored survey, sorted.
    pub fn list_surveys(&self) -> Result<Vec<String>, StoreError> {
        list_entities(&self.surveys_dir())
    }

    pub fn save_test(&self, test: &Test) -> Result<PathBuf, StoreError> {
        let path = self.tests_dir().join(entity_file_name(&test.name));
        write_json(&path, test)?;
        Ok(path)
    }

    pub fn load_test(&self, name: &str) -> Result<Test, StoreError> {
        load_entity(&self.tests_dir(), name)
    }

    /// Names of every stored test, sorted.
    pub fn list_tests(&self) -> Result<Vec<String>, StoreError> {
        list_entities(&self.tests_dir())
    }

    pub fn save_response(
        &self,
        kind: SubjectKind,
        record: &ResponseRecord,
    ) -> Result<PathBuf, StoreError> {
        let path = self
            .responses_dir(kind)
            .join(response_file_name(&record.subject, record.captured_at));
        write_json(&path, record)?;
        Ok(path)
    }

    /// Load every response record stored for `subject`, oldest first.
    ///
    /// Matching is by filename prefix, a best-effort association. Files that
    /// cannot be read or parsed are skipped with a warning; a population
    /// load never fails because of one bad file.
    pub fn load_responses(
        &self,
        kind: SubjectKind,
        subject: &str,
    ) -> Result<Vec<ResponseRecord>, StoreError> {
        let dir = self.responses_dir(kind);
        let prefix = format!("{}_", sanitize_name(subject));
        let mut records = Vec::new();

        let entries =
            fs::read_dir(&dir).map_err(|source| StoreError::Io { path: dir.clone(), source })?;
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io { path: dir.clone(), source })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.starts_with(&prefix) {
                continue;
            }
            match read_json::<ResponseRecord>(&path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("skipping {}: {e}", path.display());
                }
            }
        }

        records.sort_by_key(|record| record.captured_at);
        Ok(records)
    }
}

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Filename for a stored response record.
pub fn response_file_name(subject: &str, captured_at: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{FILE_EXT}",
        sanitize_name(subject),
        captured_at.format("%Y%m%d_%H%M%S")
    )
}

fn entity_file_name(name: &str) -> String {
    format!("{}.{FILE_EXT}", sanitize_name(name))
}

fn load_entity<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T, StoreError> {
    let path = dir.join(entity_file_name(name));
    if !path.is_file() {
        return Err(StoreError::NotFound {
            name: name.to_string(),
        });
    }
    read_json(&path)
}

fn list_entities(dir: &Path) -> Result<Vec<String>, StoreError> {
    let mut names = Vec::new();
    let entries = fs::read_dir(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() || !path.extension().is_some_and(|ext| ext == FILE_EXT) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
