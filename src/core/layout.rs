//! Template tree layout and file discovery
//!
//! A template tree is a root directory containing an optional `object.json`
//! plus the `report`, `export`, and `graph` zone directories. Discovery
//! within a zone follows filesystem enumeration order; no sorting is applied.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// One of the four top-level template zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Object,
    Report,
    Export,
    Graph,
}

impl Zone {
    /// All zones, in the order they are processed.
    pub fn all() -> &'static [Zone] {
        &[Zone::Object, Zone::Report, Zone::Export, Zone::Graph]
    }

    /// The directory (or file, for `Object`) name under the root.
    pub fn name(&self) -> &'static str {
        match self {
            Zone::Object => "object.json",
            Zone::Report => "report",
            Zone::Export => "export",
            Zone::Graph => "graph",
        }
    }

    /// Whether the zone must exist for validation to pass.
    pub fn required(&self) -> bool {
        !matches!(self, Zone::Object)
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Directory does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// A template tree rooted at a directory.
#[derive(Debug)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Open a template tree, failing if the root does not exist.
    pub fn open(root: &Path) -> Result<Self, LayoutError> {
        if !root.exists() {
            return Err(LayoutError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(LayoutError::NotADirectory(root.to_path_buf()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a zone directory (or `object.json`).
    pub fn zone_path(&self, zone: Zone) -> PathBuf {
        self.root.join(zone.name())
    }

    /// A path relative to the root, for diagnostics.
    pub fn rel(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// JSON files directly inside `dir` (non-recursive).
    pub fn json_files_in(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let Ok(entries) = fs::read_dir(dir) else {
            return files;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().map_or(false, |e| e == "json") {
                files.push(path);
            }
        }
        files
    }

    /// JSON files anywhere under `dir` (recursive).
    pub fn json_files_under(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().map_or(false, |e| e == "json"))
            .collect()
    }
}
