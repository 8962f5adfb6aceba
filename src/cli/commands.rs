//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::format::{ErrorPolicy, ReadOptions};
use crate::layers::LayerNode;
use crate::project::{LoadReport, VikProject};

const VIK_EXTENSION: &str = "vik";

/// Print the header and layer tree of a file.
pub fn inspect(path: &Path, json: bool) -> Result<()> {
    info!("Inspecting: {}", path.display());

    let (project, report) = VikProject::load(path)?;
    print_report(&report);

    if json {
        let summary = serde_json::to_string_pretty(&project.summary())?;
        println!("{}", summary);
        return Ok(());
    }

    let view = &project.view;
    println!("File version: {}", report.file_version.unwrap_or(0));
    println!(
        "View: {} at ({}, {}), {:.2} x {:.2} m/px",
        view.mode, view.lat, view.lon, view.xmpp, view.ympp
    );
    println!("{:-<60}", "");
    print_tree(&project.root, 0);
    println!("{:-<60}", "");
    println!("Layers: {}", project.root.count() - 1);

    Ok(())
}

fn print_tree(node: &LayerNode, depth: usize) {
    for child in node.children() {
        let hidden = if child.is_visible() { "" } else { " (hidden)" };
        println!(
            "{:indent$}{} '{}'{}",
            "",
            child.kind(),
            child.name(),
            hidden,
            indent = depth * 2
        );
        print_tree(child, depth + 1);
    }
}

fn print_report(report: &LoadReport) {
    for err in &report.errors {
        warn!("{}: {}", report.path.display(), err);
    }
}

/// Parse every `.vik` file at `path` and report errors.
///
/// Returns the number of files that did not read cleanly.
pub fn check(path: &Path, first_error: bool) -> Result<usize> {
    let files = collect_vik_files(path);
    info!("Checking {} file(s) under {}", files.len(), path.display());

    let policy = if first_error {
        ErrorPolicy::FirstWins
    } else {
        ErrorPolicy::LastWins
    };
    let options = ReadOptions {
        error_policy: policy,
        ..ReadOptions::default()
    };

    let mut failed = 0;
    for file in &files {
        match VikProject::load_with(file, &options) {
            Ok((_, report)) => match report.status.error() {
                None => println!("ok    {}", file.display()),
                Some(err) => {
                    failed += 1;
                    println!(
                        "error {} ({} problem(s)) {}",
                        file.display(),
                        report.errors.len(),
                        err
                    );
                }
            },
            Err(err) => {
                failed += 1;
                println!("fail  {} {}", file.display(), err);
                if let Some(hint) = err.recovery_suggestion() {
                    println!("      {}", hint);
                }
            }
        }
    }

    println!("{:-<60}", "");
    println!("{} checked, {} with errors", files.len(), failed);
    Ok(failed)
}

fn collect_vik_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(VIK_EXTENSION))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Load a file and write it back out, normalizing its layout.
pub fn resave(input: &Path, output: &Path) -> Result<()> {
    info!("Resaving {} to {}", input.display(), output.display());

    let (project, report) = VikProject::load(input)?;
    print_report(&report);
    project.save(output)?;

    println!(
        "Wrote {} layer(s) to {}",
        project.root.count() - 1,
        output.display()
    );
    Ok(())
}

/// Write an empty project file.
pub fn new_project(path: &Path) -> Result<()> {
    info!("Creating new project at: {}", path.display());

    VikProject::new().save(path)?;
    println!("Project created: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_vik_files_recurses_and_filters() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("trips/2024");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("a.vik"), "#VIK\n").unwrap();
        fs::write(nested.join("b.VIK"), "#VIK\n").unwrap();
        fs::write(nested.join("notes.txt"), "").unwrap();

        let files = collect_vik_files(temp.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().is_some()));
    }

    #[test]
    fn test_check_counts_failures() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("good.vik"), "#VIK\nFILE_VERSION=1\n").unwrap();
        fs::write(temp.path().join("bad.vik"), "#VIK\n~EndLayer\n").unwrap();
        fs::write(temp.path().join("alien.vik"), "<gpx/>\n").unwrap();

        assert_eq!(check(temp.path(), false).unwrap(), 2);
    }
}
