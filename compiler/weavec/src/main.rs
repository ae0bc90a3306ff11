//! Weave CLI
//!
//! Expands looped path templates into a destination directory.

use std::process::ExitCode;

use weavec::cli::{parse_args, CliError, Command};
use weave_ir::ErrorCode;
use weavec::{check, generate, init_tracing, plan, GenerateError, NodeKind};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(CliError::Usage(message)) => {
            eprintln!("error: {message}");
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
        Err(CliError::Data(err)) => return report(&err),
    };

    match command {
        Command::Help => {
            print_usage();
            ExitCode::SUCCESS
        }
        Command::Generate(options) => match generate(&options) {
            Ok(report) => {
                let verb = if options.pretend { "would write" } else { "wrote" };
                for path in &report.written {
                    println!("{verb:>11} {}", path.display());
                }
                for path in &report.skipped {
                    println!("{:>11} {}", "skipped", path.display());
                }
                println!(
                    "{} directories, {} files, {} skipped",
                    report.directories.len(),
                    report.written.len(),
                    report.skipped.len()
                );
                ExitCode::SUCCESS
            }
            Err(err) => report(&err),
        },
        Command::Plan(options) => match plan(&options) {
            Ok(plan) => {
                for entry in &plan.entries {
                    let marker = match entry.kind {
                        NodeKind::Directory => "dir ",
                        NodeKind::File if entry.render => "file",
                        NodeKind::File => "copy",
                    };
                    println!("{marker} {}", entry.path.display());
                }
                ExitCode::SUCCESS
            }
            Err(err) => report(&err),
        },
        Command::Check { template, exclude } => match check(&template, &exclude) {
            Ok(checked) => {
                for read in &checked.warnings {
                    eprintln!("warning[{}]: {read} (unless the data binds it)", ErrorCode::W2003);
                }
                let (entries, directives) = checked.template.counts();
                println!(
                    "OK: {} ({entries} entries, {directives} loops)",
                    template.display()
                );
                ExitCode::SUCCESS
            }
            Err(err) => report(&err),
        },
    }
}

fn report(err: &GenerateError) -> ExitCode {
    eprintln!("error[{}]: {err}", err.code());
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
    ExitCode::FAILURE
}

fn print_usage() {
    eprintln!("Weave - looped path-template generator");
    eprintln!();
    eprintln!("Usage: weave <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  generate <template> <dest>   Render a template into <dest>");
    eprintln!("  plan <template>              Print every output path without writing");
    eprintln!("  check <template>             Parse and scope-check a template");
    eprintln!("  help                         Show this message");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --exclude <glob>      Skip matching template entries");
    eprintln!("  --data <file>         Load data from JSON, YAML or TOML (plan, generate)");
    eprintln!("  -d <key=value>        Set one variable, parsed as YAML (plan, generate)");
    eprintln!("  --max-branches <n>    Abort past <n> paths (plan, generate)");
    eprintln!("  --strict              Fail on undefined variables (plan, generate)");
    eprintln!("  -f, --overwrite       Replace existing files (generate)");
    eprintln!("  -n, --pretend         Report without writing (generate)");
    eprintln!();
    eprintln!("Logging: warnings by default; set RUST_LOG (e.g. RUST_LOG=weave_expand=debug).");
}
