//! The generation pipeline.
//!
//! ```text
//! weave.toml ─► walk (excludes) ─► scoping check (data) ─► expand ─► suffix strip
//!                                                              │
//!                                  Report ◄─ write ◄─ collisions
//! ```
//!
//! The whole plan is computed before anything is written, so a fatal
//! expansion error leaves the destination untouched.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};
use weave_eval::{Interpolator, UndefinedPolicy};
use weave_expand::{
    check_scoping, expand, off_path_reads, Branch, ExpansionNode, NodeKind, OffPathRead, TreeWalker,
};
use weave_ir::{ScopeFrame, Value};

use crate::config::{Exclusions, WeaveConfig};
use crate::error::GenerateError;
use crate::writer::{materialize, Report};

/// A template that has been read and parsed.
#[derive(Clone, Debug)]
pub struct LoadedTemplate {
    pub root: PathBuf,
    pub config: WeaveConfig,
    pub tree: ExpansionNode,
}

impl LoadedTemplate {
    /// Read the config and walk the tree, parsing every entry name.
    #[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
    pub fn load(root: &Path, extra_excludes: &[String]) -> Result<Self, GenerateError> {
        let config = WeaveConfig::load(root)?;
        let exclusions = Exclusions::new(
            config
                .exclude
                .iter()
                .chain(extra_excludes)
                .map(String::as_str),
        )?;
        let tree = TreeWalker::build(root, |path: &Path| exclusions.is_included(path))?;
        Ok(LoadedTemplate {
            root: root.to_path_buf(),
            config,
            tree,
        })
    }

    /// `(entries, directives)` in the tree, root excluded.
    pub fn counts(&self) -> (usize, usize) {
        let mut entries = 0;
        let mut directives = 0;
        let mut stack: Vec<&ExpansionNode> = self.tree.children.iter().collect();
        while let Some(node) = stack.pop() {
            entries += 1;
            directives += usize::from(node.directive.is_some());
            stack.extend(&node.children);
        }
        (entries, directives)
    }
}

/// Inputs shared by `plan` and `generate`.
#[derive(Clone, Debug)]
pub struct PlanOptions {
    pub template: PathBuf,
    /// Top-level data; a map whose entries become root-frame bindings.
    pub data: Value,
    /// Exclusion globs added to those in `weave.toml`.
    pub exclude: Vec<String>,
    /// Overrides `max_branches` from `weave.toml`.
    pub max_branches: Option<usize>,
    pub undefined: UndefinedPolicy,
}

impl PlanOptions {
    pub fn new(template: impl Into<PathBuf>) -> Self {
        PlanOptions {
            template: template.into(),
            data: Value::map(Vec::<(String, Value)>::new()),
            exclude: Vec::new(),
            max_branches: None,
            undefined: UndefinedPolicy::default(),
        }
    }
}

/// Inputs to `generate`.
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    pub plan: PlanOptions,
    pub destination: PathBuf,
    /// Replace files that already exist. Otherwise they are skipped.
    pub overwrite: bool,
    /// Compute the report without touching the destination.
    pub pretend: bool,
}

impl GenerateOptions {
    pub fn new(template: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        GenerateOptions {
            plan: PlanOptions::new(template),
            destination: destination.into(),
            overwrite: false,
            pretend: false,
        }
    }
}

/// One output entry after suffix stripping and collision resolution.
#[derive(Clone, Debug)]
pub struct PlannedEntry {
    /// Output path relative to the destination.
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Template-relative path the entry is copied or rendered from.
    pub source: PathBuf,
    /// Frame that renders the file's contents.
    pub frame: ScopeFrame,
    /// The resolved name carried the template suffix: contents are rendered
    /// rather than copied.
    pub render: bool,
}

/// Everything `generate` will create, in creation order.
#[derive(Clone, Debug)]
pub struct Plan {
    pub template: PathBuf,
    pub entries: Vec<PlannedEntry>,
    pub(crate) interpolator: Interpolator,
}

/// Expand a template into a plan without writing anything.
#[tracing::instrument(level = "debug", skip_all, fields(template = %options.template.display()))]
pub fn plan(options: &PlanOptions) -> Result<Plan, GenerateError> {
    let template = LoadedTemplate::load(&options.template, &options.exclude)?;
    let suffix = template.config.effective_suffix();
    let max_branches = options
        .max_branches
        .unwrap_or_else(|| template.config.effective_max_branches());

    let interpolator = Interpolator::new(options.undefined);
    let frame = ScopeFrame::from_data(&options.data);
    check_scoping(&template.tree, &frame)?;

    let mut entries = Vec::new();
    for branch in expand(&template.tree, frame, &interpolator).with_max_branches(max_branches) {
        entries.push(planned_entry(branch?, suffix));
    }
    let entries = resolve_collisions(entries);
    debug!(entries = entries.len(), "plan ready");

    Ok(Plan {
        template: template.root,
        entries,
        interpolator,
    })
}

/// Plan and write a template into `options.destination`.
pub fn generate(options: &GenerateOptions) -> Result<Report, GenerateError> {
    let plan = plan(&options.plan)?;
    let report = materialize(&plan, &options.destination, options.overwrite, options.pretend)?;
    info!(
        directories = report.directories.len(),
        written = report.written.len(),
        skipped = report.skipped.len(),
        pretend = options.pretend,
        "generation finished"
    );
    Ok(report)
}

/// Outcome of [`check`].
#[derive(Clone, Debug)]
pub struct CheckReport {
    pub template: LoadedTemplate,
    /// Loop variables read off their binding branch. Without data these
    /// are not errors: the top-level data may still bind the name.
    pub warnings: Vec<OffPathRead>,
}

/// Parse a template and list its off-path reads, without data.
pub fn check(template: &Path, exclude: &[String]) -> Result<CheckReport, GenerateError> {
    let template = LoadedTemplate::load(template, exclude)?;
    let warnings = off_path_reads(&template.tree);
    for read in &warnings {
        warn!(path = %read.path, name = %read.name, "loop variable read off its branch");
    }
    Ok(CheckReport { template, warnings })
}

fn planned_entry(branch: Branch<'_>, suffix: &str) -> PlannedEntry {
    let mut segments = branch.segments;
    let mut render = false;
    if branch.kind == NodeKind::File && !suffix.is_empty() {
        if let Some(last) = segments.last_mut() {
            if last.len() > suffix.len() && last.ends_with(suffix) {
                last.truncate(last.len() - suffix.len());
                render = true;
            }
        }
    }
    PlannedEntry {
        path: segments.iter().collect(),
        kind: branch.kind,
        source: branch.source.to_path_buf(),
        frame: branch.frame,
        render,
    }
}

/// Keep only the last entry for each output path, preserving order.
fn resolve_collisions(entries: Vec<PlannedEntry>) -> Vec<PlannedEntry> {
    let mut last: FxHashMap<&Path, usize> = FxHashMap::default();
    for (index, entry) in entries.iter().enumerate() {
        if let Some(previous) = last.insert(entry.path.as_path(), index) {
            debug!(
                path = %entry.path.display(),
                replaced = %entries[previous].source.display(),
                by = %entry.source.display(),
                "path collision, keeping the later branch"
            );
        }
    }
    let keep: Vec<bool> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| last.get(entry.path.as_path()) == Some(&index))
        .collect();

    entries
        .into_iter()
        .zip(keep)
        .filter_map(|(entry, keep)| keep.then_some(entry))
        .collect()
}
