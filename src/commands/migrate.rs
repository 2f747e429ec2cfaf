use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use paramfix::refactor::{self, MigrateOptions, MigrationReport};

use crate::commands::{CmdResult, ConfigArgs, GlobalArgs};

#[derive(Args, Default)]
pub struct MigrateArgs {
    /// Directory holding the parameter classes (overrides the config value)
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,

    /// Match and report without writing any file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum MigrateOutput {
    #[serde(rename = "migrate")]
    Migrate(MigrationReport),
}

/// Where the `Fixing:` / `File not found:` / `Done!` lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressTarget {
    Stdout,
    Stderr,
}

// In JSON mode stdout carries only the envelope.
fn progress_target(global: &GlobalArgs) -> ProgressTarget {
    if global.json {
        ProgressTarget::Stderr
    } else {
        ProgressTarget::Stdout
    }
}

pub fn run(args: MigrateArgs, global: &GlobalArgs) -> CmdResult<MigrateOutput> {
    let mut config = args.config.load()?;
    if let Some(base_dir) = args.base_dir {
        config = config.with_base_dir(base_dir);
    }

    let options = MigrateOptions {
        dry_run: args.dry_run,
    };

    let report = match progress_target(global) {
        ProgressTarget::Stdout => {
            refactor::run_migration(&config, options, &mut std::io::stdout().lock())?
        }
        ProgressTarget::Stderr => {
            refactor::run_migration(&config, options, &mut std::io::stderr())?
        }
    };

    Ok((MigrateOutput::Migrate(report), 0))
}
