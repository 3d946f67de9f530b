//! Daily artifact store - resolves logical (dataset kind, date) pairs to
//! concrete readable/writable locations.
//!
//! Absence of an input is a typed `DataUnavailable` error, so callers never
//! inspect filesystem state themselves.

use crate::error::{EnrichError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Logical dataset kinds the store knows how to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    /// The day's prediction batch carrying unresolved mentions
    Mentions,
    /// The canonical identity registry
    Registry,
    /// The day's match fixtures
    Fixtures,
    /// The enriched output batch
    Enriched,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DatasetKind::Mentions => "mentions",
            DatasetKind::Registry => "registry",
            DatasetKind::Fixtures => "fixtures",
            DatasetKind::Enriched => "enriched",
        };
        write!(f, "{}", label)
    }
}

/// Artifact Store Trait
///
/// Implementations:
/// - FsArtifactStore: date-partitioned files under a data directory
pub trait ArtifactStore: Send + Sync {
    /// Whether an artifact is present for the given kind and date.
    fn exists(&self, kind: DatasetKind, date: NaiveDate) -> bool;

    /// Read an artifact as raw text (registry CSV, fixtures JSON).
    fn read_text(&self, kind: DatasetKind, date: NaiveDate) -> Result<String>;

    /// Read a tabular artifact as a DataFrame.
    fn read_frame(&self, kind: DatasetKind, date: NaiveDate) -> Result<DataFrame>;

    /// Persist a tabular artifact. All-or-nothing: on failure no partial
    /// artifact remains at the target location.
    fn write_frame(&self, kind: DatasetKind, date: NaiveDate, frame: &mut DataFrame) -> Result<()>;
}

/// Filesystem-backed store. Layout under the data directory:
/// - mentions: `predictions_<date>.csv`
/// - enriched: `predictions_<date>_enriched.csv`
/// - fixtures: `fixtures/fixtures_<date>.json`
/// - registry: a dateless CSV, `registry.csv` unless overridden
pub struct FsArtifactStore {
    data_dir: PathBuf,
    registry_path: PathBuf,
}

impl FsArtifactStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let registry_path = data_dir.join("registry.csv");
        Self {
            data_dir,
            registry_path,
        }
    }

    pub fn with_registry_path(mut self, registry_path: impl Into<PathBuf>) -> Self {
        self.registry_path = registry_path.into();
        self
    }

    /// Concrete location for a (kind, date) pair.
    pub fn path_for(&self, kind: DatasetKind, date: NaiveDate) -> PathBuf {
        let day = date.format("%Y-%m-%d");
        match kind {
            DatasetKind::Mentions => self.data_dir.join(format!("predictions_{}.csv", day)),
            DatasetKind::Enriched => self
                .data_dir
                .join(format!("predictions_{}_enriched.csv", day)),
            DatasetKind::Fixtures => self
                .data_dir
                .join("fixtures")
                .join(format!("fixtures_{}.json", day)),
            DatasetKind::Registry => self.registry_path.clone(),
        }
    }

    fn located(&self, kind: DatasetKind, date: NaiveDate) -> Result<PathBuf> {
        let path = self.path_for(kind, date);
        if !path.is_file() {
            return Err(EnrichError::DataUnavailable { kind, date });
        }
        Ok(path)
    }

    fn write_csv(path: &Path, frame: &mut DataFrame) -> Result<()> {
        let mut file = fs::File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(frame)?;
        Ok(())
    }
}

impl ArtifactStore for FsArtifactStore {
    fn exists(&self, kind: DatasetKind, date: NaiveDate) -> bool {
        self.path_for(kind, date).is_file()
    }

    fn read_text(&self, kind: DatasetKind, date: NaiveDate) -> Result<String> {
        let path = self.located(kind, date)?;
        Ok(fs::read_to_string(path)?)
    }

    fn read_frame(&self, kind: DatasetKind, date: NaiveDate) -> Result<DataFrame> {
        let path = self.located(kind, date)?;
        let frame = LazyCsvReader::new(&path)
            .with_infer_schema_length(Some(1000))
            .finish()
            .and_then(|lf| lf.collect())?;
        Ok(frame)
    }

    fn write_frame(&self, kind: DatasetKind, date: NaiveDate, frame: &mut DataFrame) -> Result<()> {
        let path = self.path_for(kind, date);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| EnrichError::WriteFailed {
                kind,
                date,
                message: e.to_string(),
            })?;
        }

        // Stage into a sibling temp file, then rename over the target, so a
        // failed write never leaves a partial artifact behind.
        let staging = path.with_extension("csv.tmp");
        if let Err(e) = Self::write_csv(&staging, frame) {
            let _ = fs::remove_file(&staging);
            return Err(EnrichError::WriteFailed {
                kind,
                date,
                message: e.to_string(),
            });
        }

        fs::rename(&staging, &path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            EnrichError::WriteFailed {
                kind,
                date,
                message: e.to_string(),
            }
        })
    }
}
