//! Output tree: generated units keyed by relative path.
//!
//! Every run owns one tree. Emitters write into units through `&mut`
//! borrows; nothing is global. The tree is consumed by
//! [`OutputTree::finalize`], so it can only be persisted once.

use crate::emitter::TextEmitter;
use crate::error::CodegenError;
use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One generated file: an import preamble and a body.
#[derive(Debug, Clone, Default)]
pub struct OutputUnit {
    /// Import-like preamble.
    pub head: TextEmitter,
    /// Definitions.
    pub body: TextEmitter,
    flags: IndexSet<String>,
}

impl OutputUnit {
    /// Creates an empty unit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a flag, returning true only the first time it is set.
    pub fn mark(&mut self, flag: &str) -> bool {
        self.flags.insert(flag.to_string())
    }

    /// Returns true if a flag has been set.
    #[must_use]
    pub fn is_marked(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Renders the head, one blank separator line, then the body.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = self.head.render();
        output.push('\n');
        output.push_str(&self.body.render());
        output
    }
}

/// Destination for rendered units.
pub trait OutputSink {
    /// Persists one rendered unit.
    ///
    /// # Errors
    /// Returns the IO error that prevented persisting.
    fn persist(&mut self, path: &str, contents: &str) -> std::io::Result<()>;
}

/// Writes units as files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Creates a sink rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for DirectorySink {
    fn persist(&mut self, path: &str, contents: &str) -> std::io::Result<()> {
        let dest = self.root.join(path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&dest, contents)
    }
}

/// Keeps rendered units in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<String, String>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the persisted text of a unit.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Returns every persisted unit, sorted by path.
    #[must_use]
    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }
}

impl OutputSink for MemorySink {
    fn persist(&mut self, path: &str, contents: &str) -> std::io::Result<()> {
        self.files.insert(path.to_string(), contents.to_string());
        Ok(())
    }
}

/// Generated units in creation order.
#[derive(Debug, Clone, Default)]
pub struct OutputTree {
    units: IndexMap<String, OutputUnit>,
}

impl OutputTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the unit at `path`, creating it on first access.
    pub fn unit(&mut self, path: &str) -> &mut OutputUnit {
        self.units.entry(path.to_string()).or_default()
    }

    /// Returns the unit at `path` if it exists.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&OutputUnit> {
        self.units.get(path)
    }

    /// Returns true if a unit exists at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.units.contains_key(path)
    }

    /// Iterates unit paths in creation order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// Returns the number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if the tree has no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Renders one unit.
    #[must_use]
    pub fn render(&self, path: &str) -> Option<String> {
        self.units.get(path).map(OutputUnit::render)
    }

    /// Renders the whole tree with `>>> path` separators.
    #[must_use]
    pub fn render_debug(&self) -> String {
        let mut output = String::new();
        for (path, unit) in &self.units {
            output.push_str(&format!(">>> {}\n", path));
            output.push_str(&unit.render());
            output.push('\n');
        }
        output
    }

    /// Renders every unit, then persists them through `sink`.
    ///
    /// Rendering completes before the first write. The first failed write
    /// aborts the run; units already written are left as they are.
    ///
    /// # Returns
    /// The number of persisted units.
    ///
    /// # Errors
    /// Returns `CodegenError::Persist` naming the unit that failed.
    pub fn finalize(self, sink: &mut dyn OutputSink) -> Result<usize, CodegenError> {
        let rendered: Vec<(String, String)> = self
            .units
            .iter()
            .map(|(path, unit)| (path.clone(), unit.render()))
            .collect();

        for (path, contents) in &rendered {
            sink.persist(path, contents)
                .map_err(|source| CodegenError::Persist {
                    path: path.clone(),
                    source,
                })?;
            tracing::debug!("Persisted {} ({} bytes)", path, contents.len());
        }

        Ok(rendered.len())
    }
}
