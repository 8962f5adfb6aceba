//! Project files on disk
//!
//! Loading checks the `#VIK` magic before any layer is touched. Saving runs
//! with the process working directory set to the file's directory, so that
//! data blocks can store paths relative to the project file.

use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, VikError};
use crate::format::{
    read_vik_with, write_vik, ParseError, ParseStatus, ReadOptions, VIK_MAGIC,
};
use crate::layers::{LayerKind, LayerNode, LayerSummary};
use crate::view::{ViewSettings, ViewState};

/// Changes the process working directory and restores it on drop.
///
/// The working directory is process-wide; only one guard should be alive at
/// a time.
#[derive(Debug)]
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    pub fn enter(dir: &Path) -> io::Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir)?;
        tracing::debug!(dir = %dir.display(), "entered project directory");
        Ok(Self { previous })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(err) = env::set_current_dir(&self.previous) {
            tracing::warn!(
                dir = %self.previous.display(),
                %err,
                "could not restore working directory"
            );
        }
    }
}

/// Directory of `path`, or `None` when it is a bare file name.
fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}

/// Result of loading a file.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub path: PathBuf,
    pub status: ParseStatus,
    pub errors: Vec<ParseError>,
    pub file_version: Option<i32>,
    pub layers_read: usize,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Load a `.vik` file into `root` and `view`.
///
/// `options.dir` is replaced by the file's own directory.
///
/// # Errors
/// * `FileNotFound` / `FileRead` - the file could not be opened; nothing was
///   modified
/// * `UnsupportedFormat` - the first line does not start with `#VIK`
/// * `Io` - reading failed part way; the tree holds what was read
pub fn load_file(
    path: &Path,
    root: &mut LayerNode,
    view: &mut dyn ViewState,
    options: &ReadOptions<'_>,
) -> Result<LoadReport> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            VikError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VikError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let mut input = BufReader::new(file);

    // The magic line stays in the stream; the header reader skips comments.
    let head = input.fill_buf().map_err(|source| VikError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    if !head.starts_with(VIK_MAGIC.as_bytes()) {
        return Err(VikError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let options = ReadOptions {
        dir: parent_dir(path),
        ..*options
    };
    let outcome = read_vik_with(input, root, view, &options)?;

    if outcome.is_success() {
        tracing::info!(path = %path.display(), layers = outcome.layers_read, "loaded project");
    } else {
        tracing::warn!(
            path = %path.display(),
            errors = outcome.errors.len(),
            "loaded project with errors"
        );
    }

    Ok(LoadReport {
        path: path.to_path_buf(),
        status: outcome.status,
        errors: outcome.errors,
        file_version: outcome.header.file_version,
        layers_read: outcome.layers_read,
    })
}

/// Write `root` and `view` to `path`, replacing any existing file.
pub fn save_file(path: &Path, root: &LayerNode, view: &dyn ViewState) -> Result<()> {
    let file = File::create(path).map_err(|source| VikError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let out = BufWriter::new(file);

    // Once inside the file's directory, a relative `dir` would resolve twice.
    let guard = match parent_dir(path) {
        Some(dir) => Some(WorkingDirGuard::enter(dir).map_err(|source| {
            VikError::FileWrite {
                path: path.to_path_buf(),
                source,
            }
        })?),
        None => None,
    };
    let dir = guard.as_ref().map(|_| Path::new("."));

    write_vik(out, root, view, dir)?;
    tracing::info!(path = %path.display(), layers = root.count() - 1, "saved project");
    Ok(())
}

/// A layer tree together with the view it is shown in.
#[derive(Debug, Clone)]
pub struct VikProject {
    pub root: LayerNode,
    pub view: ViewSettings,
}

impl Default for VikProject {
    fn default() -> Self {
        Self::new()
    }
}

impl VikProject {
    /// An empty project: a top-level aggregate and default view settings.
    pub fn new() -> Self {
        Self {
            root: LayerNode::new(LayerKind::Aggregate).named("Top Layer"),
            view: ViewSettings::default(),
        }
    }

    /// Load a project file into a fresh project.
    pub fn load(path: &Path) -> Result<(Self, LoadReport)> {
        Self::load_with(path, &ReadOptions::default())
    }

    pub fn load_with(path: &Path, options: &ReadOptions<'_>) -> Result<(Self, LoadReport)> {
        let mut project = Self::new();
        let report = load_file(path, &mut project.root, &mut project.view, options)?;
        Ok((project, report))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_file(path, &self.root, &self.view)
    }

    /// Serializable overview, used by `inspect --json`.
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            view: self.view.clone(),
            layer_count: self.root.count() - 1,
            root: self.root.summary(),
        }
    }
}

/// Project overview for display or JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub view: ViewSettings,
    /// Layers below the root.
    pub layer_count: usize,
    pub root: LayerSummary,
}
