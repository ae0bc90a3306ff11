//! `{{ }}` interpolation.

use tracing::trace;
use weave_ir::ScopeFrame;
use weave_parse::{parse_template, Template, TemplatePart};

use crate::error::RenderError;
use crate::eval::{eval, Resolved};

/// Render text templates against a scope.
///
/// The expander renders path segments through this trait and the writer
/// renders file contents through it; both may call it from worker threads.
pub trait Render: Send + Sync {
    fn render(&self, template: &str, frame: &ScopeFrame) -> Result<String, RenderError>;
}

/// What an undefined `{{ }}` hole renders as.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UndefinedPolicy {
    /// Render as the empty string.
    #[default]
    Lenient,
    /// Fail with [`RenderError::Undefined`].
    Strict,
}

/// The built-in [`Render`] implementation.
#[derive(Copy, Clone, Debug, Default)]
pub struct Interpolator {
    policy: UndefinedPolicy,
}

impl Interpolator {
    pub fn new(policy: UndefinedPolicy) -> Self {
        Interpolator { policy }
    }

    pub fn policy(&self) -> UndefinedPolicy {
        self.policy
    }

    /// Render an already-parsed template.
    pub fn render_template(
        &self,
        template: &Template,
        frame: &ScopeFrame,
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        for part in &template.parts {
            match part {
                TemplatePart::Text(text) => out.push_str(text),
                TemplatePart::Interp { expr, .. } => match eval(expr, frame)? {
                    Resolved::Value(value) => out.push_str(&value.to_string()),
                    Resolved::Undefined { path } => match self.policy {
                        UndefinedPolicy::Lenient => {
                            trace!(%path, "undefined interpolation rendered empty");
                        }
                        UndefinedPolicy::Strict => {
                            return Err(RenderError::Undefined { name: path });
                        }
                    },
                },
            }
        }
        Ok(out)
    }
}

impl Render for Interpolator {
    fn render(&self, template: &str, frame: &ScopeFrame) -> Result<String, RenderError> {
        if !template.contains("{{") {
            return Ok(template.to_owned());
        }
        let parsed = parse_template(template)?;
        self.render_template(&parsed, frame)
    }
}
