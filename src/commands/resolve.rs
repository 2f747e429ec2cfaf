use clap::Args;
use serde::Serialize;

use paramfix::refactor::resolve_param_name;

use crate::commands::{CmdResult, ConfigArgs, GlobalArgs};

#[derive(Args)]
pub struct ResolveArgs {
    /// Parameter file name, e.g. TickRateParameter.java
    file: String,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ResolveOutput {
    #[serde(rename = "resolve")]
    Resolve { file: String, param_name: String },
}

pub fn run(args: ResolveArgs, _global: &GlobalArgs) -> CmdResult<ResolveOutput> {
    if args.file.trim().is_empty() {
        return Err(paramfix::Error::validation_invalid_argument(
            "file",
            "File name must not be empty",
        ));
    }

    let config = args.config.load()?;
    let param_name =
        resolve_param_name(&args.file, &config.param_names, &config.default_param_name);

    Ok((
        ResolveOutput::Resolve {
            file: args.file,
            param_name,
        },
        0,
    ))
}
