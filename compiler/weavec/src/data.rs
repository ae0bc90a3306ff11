//! Top-level template data: data files and `-d key=value` overrides.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;
use weave_ir::{Name, Value};

use crate::error::GenerateError;

/// Accumulates top-level bindings; later sources win.
#[derive(Clone, Debug, Default)]
pub struct DataBuilder {
    entries: BTreeMap<String, Value>,
}

impl DataBuilder {
    pub fn new() -> Self {
        DataBuilder::default()
    }

    /// Merge a JSON, YAML or TOML file, chosen by extension.
    pub fn load_file(&mut self, path: &Path) -> Result<&mut Self, GenerateError> {
        let text = fs::read_to_string(path).map_err(GenerateError::io("cannot read", path))?;
        let origin = path.display().to_string();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let value: Value = match extension.as_str() {
            "json" => serde_json::from_str(&text).map_err(|err| data_error(&origin, err))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).map_err(|err| data_error(&origin, err))?,
            "toml" => toml::from_str(&text).map_err(|err| data_error(&origin, err))?,
            other => {
                return Err(GenerateError::Data {
                    origin,
                    message: format!(
                        "unsupported extension `{other}` (expected json, yml, yaml or toml)"
                    ),
                })
            }
        };

        match value {
            Value::Map(entries) => {
                debug!(path = %origin, keys = entries.len(), "loaded data file");
                self.entries
                    .extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
                Ok(self)
            }
            other => Err(GenerateError::Data {
                origin,
                message: format!("top-level data must be a mapping, found {}", other.type_name()),
            }),
        }
    }

    /// Merge one `key=value` override.
    ///
    /// The value is read as YAML, so `-d n=3` binds an int and
    /// `-d xs=[a, b]` a list; anything that does not parse stays a string.
    pub fn set_override(&mut self, arg: &str) -> Result<&mut Self, GenerateError> {
        let Some((key, raw)) = arg.split_once('=') else {
            return Err(GenerateError::Data {
                origin: format!("-d {arg}"),
                message: "expected `key=value`".to_owned(),
            });
        };
        let key = key.trim();
        if !Name::is_identifier(key) {
            return Err(GenerateError::Data {
                origin: format!("-d {arg}"),
                message: format!("`{key}` is not a valid variable name"),
            });
        }
        self.entries.insert(key.to_owned(), parse_scalar(raw));
        Ok(self)
    }

    /// The merged data as a map value.
    pub fn build(&self) -> Value {
        Value::map(self.entries.clone())
    }
}

fn parse_scalar(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::string(raw);
    }
    serde_yaml::from_str(raw).unwrap_or_else(|_| Value::string(raw))
}

fn data_error(origin: &str, err: impl std::fmt::Display) -> GenerateError {
    GenerateError::Data {
        origin: origin.to_owned(),
        message: err.to_string(),
    }
}
