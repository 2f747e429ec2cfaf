use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;

use commands::{migrate, resolve, rules};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "paramfix")]
#[command(version = VERSION)]
#[command(about = "Migrate spell parameter classes to the builder-style result type")]
struct Cli {
    /// Print output as a JSON envelope
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite the configured parameter files in place (default)
    Migrate(migrate::MigrateArgs),
    /// Show the parameter name derived from a file name
    Resolve(resolve::ResolveArgs),
    /// List the substitution rules in application order
    Rules(rules::RulesArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs { json: cli.json };

    let command = command_or_default(cli.command);

    // migrate already printed its progress lines; the others only have JSON.
    let prints_json = global.json || !matches!(command, Commands::Migrate(_));

    let (json_result, exit_code) = commands::run_json(command, &global);

    let printed = match json_result {
        Ok(value) if prints_json => output::print_json_result(Ok(value)),
        Ok(_) => Ok(()),
        Err(err) => output::print_json_result(Err(err)),
    };

    if let Err(err) = printed {
        eprintln!("{}", err);
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

/// Bare `paramfix` runs the migration with built-in settings.
fn command_or_default(command: Option<Commands>) -> Commands {
    command.unwrap_or_else(|| Commands::Migrate(migrate::MigrateArgs::default()))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
