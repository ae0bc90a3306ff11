//! The weave generator: renders a template directory whose entry names may
//! loop over data into a destination directory.
//!
//! The binary (`weave`) is a thin wrapper over [`generate`], [`plan`] and
//! [`check`].

pub mod cli;
mod config;
mod data;
mod error;
mod generate;
mod writer;

use std::sync::Once;

pub use config::{Exclusions, WeaveConfig, CONFIG_FILE, DEFAULT_EXCLUDES, DEFAULT_SUFFIX};
pub use data::DataBuilder;
pub use error::GenerateError;
pub use generate::{
    check, generate, plan, CheckReport, GenerateOptions, LoadedTemplate, Plan, PlanOptions,
    PlannedEntry,
};
pub use weave_eval::UndefinedPolicy;
pub use weave_expand::NodeKind;
pub use writer::Report;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber once.
///
/// `RUST_LOG` selects the filter; without it only warnings are shown, so an
/// undefined loop source is still reported. `WEAVE_LOG_TREE=1` switches to
/// indented span-tree output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        let tree = std::env::var_os("WEAVE_LOG_TREE").is_some();
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::registry()
            .with((!tree).then(|| {
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr)
            }))
            .with(tree.then(|| HierarchicalLayer::new(2).with_targets(true)))
            .with(filter)
            .init();
    });
}
