//! End-to-end generation run.
//!
//! A run fetches the snapshot in a single round trip, then validates,
//! orders and generates without further I/O. Units are persisted only
//! after generation has fully succeeded.

use shapegen_codegen::{CodegenError, Generation, GeneratorConfig, OutputSink};
use shapegen_schema::{SchemaSnapshot, SchemaSource};

/// Outcome of a successful [`Pipeline::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Persisted units.
    pub units: usize,
    /// Mirrored enums.
    pub enums: usize,
    /// Composite object definitions.
    pub objects: usize,
    /// Ambiguous cast pairs.
    pub ambiguities: usize,
}

/// Fetch, build, order, emit and finalize.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: GeneratorConfig,
}

impl Pipeline {
    /// Creates a pipeline.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the generator configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs the whole pipeline.
    ///
    /// # Arguments
    /// * `source` - Where the schema snapshot comes from
    /// * `sink` - Where rendered units go
    ///
    /// # Errors
    /// Returns the first failure. Nothing reaches `sink` unless generation
    /// succeeded.
    pub async fn run<S, K>(&self, source: &S, sink: &mut K) -> Result<RunSummary, CodegenError>
    where
        S: SchemaSource + ?Sized,
        K: OutputSink,
    {
        let snapshot = source.fetch_snapshot().await?;
        tracing::info!(
            "Fetched {} types and {} casts",
            snapshot.types.len(),
            snapshot.casts.len()
        );

        let Generation { tree, summary } = self.generate(snapshot)?;
        let units = tree.finalize(sink)?;
        tracing::info!("Finalized {} units", units);

        Ok(RunSummary {
            units,
            enums: summary.enums,
            objects: summary.objects,
            ambiguities: summary.ambiguities.len(),
        })
    }

    /// Runs the I/O-free part of the pipeline.
    ///
    /// # Errors
    /// Returns `CodegenError` if validation, ordering or generation fails.
    pub fn generate(&self, snapshot: SchemaSnapshot) -> Result<Generation, CodegenError> {
        shapegen_codegen::generate_from_snapshot(snapshot, &self.config)
    }
}
