//! Schema source collaborators.
//!
//! A source performs the one I/O round trip of a run: fetching the type
//! catalogue (and the cast catalogue) from wherever the schema lives.
//! Generation never starts before the complete record set is available.

use crate::error::SourceError;
use crate::parser::parse_snapshot;
use crate::types::{CastRecord, SchemaSnapshot, TypeRecord};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Supplies introspected type records.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Fetches every type record, in source order.
    ///
    /// # Errors
    /// Returns `SourceError::Unavailable` on connectivity problems and
    /// `SourceError::Query` when the introspection query fails.
    async fn fetch_types(&self) -> Result<Vec<TypeRecord>, SourceError>;

    /// Fetches the cast catalogue. Sources without one report no casts.
    ///
    /// # Errors
    /// Same as [`SchemaSource::fetch_types`].
    async fn fetch_casts(&self) -> Result<Vec<CastRecord>, SourceError> {
        Ok(Vec::new())
    }

    /// Fetches types and casts as one snapshot.
    ///
    /// # Errors
    /// Propagates the first fetch failure unmodified.
    async fn fetch_snapshot(&self) -> Result<SchemaSnapshot, SourceError> {
        let types = self.fetch_types().await?;
        let casts = self.fetch_casts().await?;
        Ok(SchemaSnapshot { types, casts })
    }
}

/// In-memory source returning a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: SchemaSnapshot,
}

impl StaticSource {
    /// Creates a source serving the given snapshot.
    #[must_use]
    pub fn new(snapshot: SchemaSnapshot) -> Self {
        Self { snapshot }
    }

    /// Creates a source serving types only.
    #[must_use]
    pub fn from_types(types: Vec<TypeRecord>) -> Self {
        Self::new(SchemaSnapshot {
            types,
            casts: Vec::new(),
        })
    }
}

#[async_trait]
impl SchemaSource for StaticSource {
    async fn fetch_types(&self) -> Result<Vec<TypeRecord>, SourceError> {
        Ok(self.snapshot.types.clone())
    }

    async fn fetch_casts(&self) -> Result<Vec<CastRecord>, SourceError> {
        Ok(self.snapshot.casts.clone())
    }
}

/// Reads a snapshot document previously dumped from the catalogue query.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    path: PathBuf,
}

impl JsonSnapshotSource {
    /// Creates a source reading the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the snapshot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<SchemaSnapshot, SourceError> {
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SourceError::unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let snapshot = parse_snapshot(&json)
            .map_err(|e| SourceError::query(format!("{}: {}", self.path.display(), e)))?;
        tracing::debug!(
            "Loaded {} types and {} casts from {}",
            snapshot.types.len(),
            snapshot.casts.len(),
            self.path.display()
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl SchemaSource for JsonSnapshotSource {
    async fn fetch_types(&self) -> Result<Vec<TypeRecord>, SourceError> {
        Ok(self.load().await?.types)
    }

    async fn fetch_casts(&self) -> Result<Vec<CastRecord>, SourceError> {
        Ok(self.load().await?.casts)
    }

    async fn fetch_snapshot(&self) -> Result<SchemaSnapshot, SourceError> {
        self.load().await
    }
}
