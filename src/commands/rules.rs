use clap::Args;
use serde::Serialize;

use paramfix::refactor::{default_rules, Replacement};

use crate::commands::{CmdResult, ConfigArgs, GlobalArgs};

#[derive(Args)]
pub struct RulesArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RulesOutput {
    #[serde(rename = "rules")]
    Rules {
        result_type: String,
        rules: Vec<RuleSummary>,
    },
}

#[derive(Serialize)]
pub struct RuleSummary {
    pub order: usize,
    pub name: String,
    pub description: String,
    pub pattern: String,
    /// Literal replacement text; absent for replacements computed per match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

pub fn run(args: RulesArgs, _global: &GlobalArgs) -> CmdResult<RulesOutput> {
    let config = args.config.load()?;
    let rules = default_rules(&config.result_type)?;

    let summaries = rules
        .iter()
        .enumerate()
        .map(|(i, rule)| RuleSummary {
            order: i + 1,
            name: rule.name.to_string(),
            description: rule.description.to_string(),
            pattern: rule.pattern.as_str().to_string(),
            replacement: match &rule.replacement {
                Replacement::Static(s) => Some(s.clone()),
                Replacement::Computed(_) => None,
            },
        })
        .collect();

    Ok((
        RulesOutput::Rules {
            result_type: config.result_type,
            rules: summaries,
        },
        0,
    ))
}
