use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use paramfix::config::{self, MigrationConfig};

use crate::output;
use crate::Commands;

pub type CmdResult<T> = paramfix::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Wrap output in the JSON envelope.
    pub json: bool,
}

/// Shared `--config` flag.
#[derive(Args, Default, Debug)]
pub struct ConfigArgs {
    /// Path to a paramfix.json config (omitted fields use built-in values)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> paramfix::Result<MigrationConfig> {
        config::load_or_default(self.config.as_deref())
    }
}

pub mod migrate;
pub mod resolve;
pub mod rules;

pub(crate) fn run_json(command: Commands, global: &GlobalArgs) -> (paramfix::Result<Value>, i32) {
    match command {
        Commands::Migrate(args) => output::map_cmd_result_to_json(migrate::run(args, global)),
        Commands::Resolve(args) => output::map_cmd_result_to_json(resolve::run(args, global)),
        Commands::Rules(args) => output::map_cmd_result_to_json(rules::run(args, global)),
    }
}
