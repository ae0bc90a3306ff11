//! Template-side configuration (`weave.toml`).

use std::fs;
use std::io;
use std::path::Path;

use glob::Pattern;
use serde::Deserialize;
use tracing::debug;
use weave_expand::DEFAULT_MAX_BRANCHES;

use crate::error::GenerateError;

/// File name of the template configuration, read from the template root.
pub const CONFIG_FILE: &str = "weave.toml";

/// Suffix marking files whose contents are rendered.
pub const DEFAULT_SUFFIX: &str = ".jinja";

/// Entries never copied to the output.
pub const DEFAULT_EXCLUDES: &[&str] = &[CONFIG_FILE, ".git", ".git/**"];

/// Settings read from `weave.toml`. Every field is optional.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WeaveConfig {
    /// Template suffix. Default: `.jinja`. An empty string renders nothing.
    pub suffix: Option<String>,
    /// Extra exclusion globs, matched against template-relative paths.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Branch cap. Default: 10 000.
    pub max_branches: Option<usize>,
}

impl WeaveConfig {
    /// Read `weave.toml` from `template_root`; a missing file is the default
    /// config.
    pub fn load(template_root: &Path) -> Result<Self, GenerateError> {
        let path = template_root.join(CONFIG_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file");
                return Ok(WeaveConfig::default());
            }
            Err(err) => return Err(GenerateError::io("cannot read", &path)(err)),
        };
        WeaveConfig::parse(&text).map_err(|message| GenerateError::Config {
            path: path.display().to_string(),
            message,
        })
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|err| err.to_string())
    }

    pub fn effective_suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or(DEFAULT_SUFFIX)
    }

    pub fn effective_max_branches(&self) -> usize {
        self.max_branches.unwrap_or(DEFAULT_MAX_BRANCHES)
    }
}

/// Compiled exclusion globs.
#[derive(Clone, Debug)]
pub struct Exclusions {
    patterns: Vec<Pattern>,
}

impl Exclusions {
    /// Compile the default excludes followed by `extra`.
    pub fn new<'a>(extra: impl IntoIterator<Item = &'a str>) -> Result<Self, GenerateError> {
        let patterns = DEFAULT_EXCLUDES
            .iter()
            .copied()
            .chain(extra)
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| GenerateError::Glob {
                    pattern: pattern.to_owned(),
                    source,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Exclusions { patterns })
    }

    /// Returns `true` if the template-relative `path` is not excluded.
    pub fn is_included(&self, path: &Path) -> bool {
        !self.patterns.iter().any(|pattern| pattern.matches_path(path))
    }
}
