//! Writing a [`Plan`] to disk.
//!
//! Directories are created first, in plan order. Files are then rendered
//! and written in parallel: every entry owns its frame and no two entries
//! share an output path once collisions are resolved.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, trace};
use weave_eval::Render;
use weave_expand::NodeKind;

use crate::error::GenerateError;
use crate::generate::{Plan, PlannedEntry};

/// What `generate` did (or, with `pretend`, would do). Paths are relative
/// to the destination.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub directories: Vec<PathBuf>,
    pub written: Vec<PathBuf>,
    /// Files left alone because they already existed.
    pub skipped: Vec<PathBuf>,
}

enum FileOutcome {
    Written(PathBuf),
    Skipped(PathBuf),
}

pub(crate) fn materialize(
    plan: &Plan,
    destination: &Path,
    overwrite: bool,
    pretend: bool,
) -> Result<Report, GenerateError> {
    let mut report = Report::default();

    if !pretend {
        fs::create_dir_all(destination)
            .map_err(GenerateError::io("cannot create directory", destination))?;
    }

    let (directories, files): (Vec<&PlannedEntry>, Vec<&PlannedEntry>) = plan
        .entries
        .iter()
        .partition(|entry| entry.kind == NodeKind::Directory);

    for entry in directories {
        let target = destination.join(&entry.path);
        if !pretend {
            fs::create_dir_all(&target)
                .map_err(GenerateError::io("cannot create directory", &target))?;
        }
        trace!(path = %entry.path.display(), "directory");
        report.directories.push(entry.path.clone());
    }

    let outcomes = files
        .par_iter()
        .map(|entry| write_file(plan, entry, destination, overwrite, pretend))
        .collect::<Result<Vec<_>, _>>()?;

    for outcome in outcomes {
        match outcome {
            FileOutcome::Written(path) => report.written.push(path),
            FileOutcome::Skipped(path) => report.skipped.push(path),
        }
    }
    Ok(report)
}

fn write_file(
    plan: &Plan,
    entry: &PlannedEntry,
    destination: &Path,
    overwrite: bool,
    pretend: bool,
) -> Result<FileOutcome, GenerateError> {
    let target = destination.join(&entry.path);
    if !overwrite && target.exists() {
        debug!(path = %entry.path.display(), "exists, skipping");
        return Ok(FileOutcome::Skipped(entry.path.clone()));
    }

    let source = plan.template.join(&entry.source);
    if entry.render {
        let text = fs::read_to_string(&source).map_err(GenerateError::io("cannot read", &source))?;
        let rendered = plan
            .interpolator
            .render(&text, &entry.frame)
            .map_err(|err| GenerateError::Render {
                path: entry.source.display().to_string(),
                source: err,
            })?;
        if !pretend {
            fs::write(&target, rendered).map_err(GenerateError::io("cannot write", &target))?;
        }
    } else if !pretend {
        fs::copy(&source, &target).map_err(GenerateError::io("cannot copy to", &target))?;
    }

    trace!(path = %entry.path.display(), rendered = entry.render, "file");
    Ok(FileOutcome::Written(entry.path.clone()))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
