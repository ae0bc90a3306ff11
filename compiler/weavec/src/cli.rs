//! Command-line parsing for the `weave` binary.

use std::path::PathBuf;

use crate::data::DataBuilder;
use crate::error::GenerateError;
use crate::generate::{GenerateOptions, PlanOptions};
use weave_eval::UndefinedPolicy;

/// A parsed `weave` invocation.
#[derive(Clone, Debug)]
pub enum Command {
    Generate(GenerateOptions),
    Plan(PlanOptions),
    Check {
        template: PathBuf,
        exclude: Vec<String>,
    },
    Help,
}

/// Why the command line was rejected.
#[derive(Debug)]
pub enum CliError {
    /// Bad flags or arguments; the message is followed by usage text.
    Usage(String),
    /// A data file or override could not be loaded.
    Data(GenerateError),
}

/// Parse everything after the program name.
pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "generate" | "gen" => {
            let flags = Flags::parse(rest, Accepts::Generate)?;
            let [template, destination] = flags.positional.as_slice() else {
                return Err(usage("expected <template> <destination>"));
            };
            let plan = flags.plan_options(template.into())?;
            Ok(Command::Generate(GenerateOptions {
                plan,
                destination: destination.into(),
                overwrite: flags.overwrite,
                pretend: flags.pretend,
            }))
        }
        "plan" => {
            let flags = Flags::parse(rest, Accepts::Plan)?;
            let [template] = flags.positional.as_slice() else {
                return Err(usage("expected <template>"));
            };
            Ok(Command::Plan(flags.plan_options(template.into())?))
        }
        "check" => {
            let flags = Flags::parse(rest, Accepts::Check)?;
            let [template] = flags.positional.as_slice() else {
                return Err(usage("expected <template>"));
            };
            Ok(Command::Check {
                template: template.into(),
                exclude: flags.exclude,
            })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(usage(&format!("unknown command '{other}'"))),
    }
}

fn usage(message: &str) -> CliError {
    CliError::Usage(message.to_owned())
}

/// Which options a command takes. Each level adds to the one before:
/// `check` only excludes, `plan` adds data and expansion options, and
/// `generate` adds the write options.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Accepts {
    Check,
    Plan,
    Generate,
}

#[derive(Default)]
struct Flags {
    positional: Vec<String>,
    data_files: Vec<PathBuf>,
    overrides: Vec<String>,
    exclude: Vec<String>,
    max_branches: Option<usize>,
    strict: bool,
    overwrite: bool,
    pretend: bool,
}

impl Flags {
    fn parse(args: &[String], accepts: Accepts) -> Result<Self, CliError> {
        let data = accepts >= Accepts::Plan;
        let write = accepts == Accepts::Generate;
        let mut flags = Flags::default();
        let mut args = args.iter();

        while let Some(arg) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .cloned()
                    .ok_or_else(|| usage(&format!("{name} requires a value")))
            };
            match arg.as_str() {
                "--data" if data => flags.data_files.push(value("--data")?.into()),
                "-d" | "--define" if data => flags.overrides.push(value("-d")?),
                "--exclude" => flags.exclude.push(value("--exclude")?),
                "--max-branches" if data => {
                    let raw = value("--max-branches")?;
                    let limit = raw
                        .parse()
                        .map_err(|_| usage(&format!("invalid --max-branches '{raw}'")))?;
                    flags.max_branches = Some(limit);
                }
                "--strict" if data => flags.strict = true,
                "--overwrite" | "-f" if write => flags.overwrite = true,
                "--pretend" | "-n" if write => flags.pretend = true,
                _ if arg.starts_with('-') && arg.len() > 1 => {
                    return Err(usage(&format!("unknown option '{arg}'")));
                }
                _ => flags.positional.push(arg.clone()),
            }
        }
        Ok(flags)
    }

    fn plan_options(&self, template: PathBuf) -> Result<PlanOptions, CliError> {
        let mut data = DataBuilder::new();
        for path in &self.data_files {
            data.load_file(path).map_err(CliError::Data)?;
        }
        for arg in &self.overrides {
            data.set_override(arg).map_err(CliError::Data)?;
        }
        Ok(PlanOptions {
            template,
            data: data.build(),
            exclude: self.exclude.clone(),
            max_branches: self.max_branches,
            undefined: if self.strict {
                UndefinedPolicy::Strict
            } else {
                UndefinedPolicy::Lenient
            },
        })
    }
}
