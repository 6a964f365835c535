//! `session` command: drive an explorer session from line-oriented input.
//!
//! Each non-empty line is one command; `#` starts a comment. In text mode
//! every command prints a one-line report; in JSON mode every command prints
//! the resulting planner view as one compact JSON object.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use serde_json::json;
use tracing::debug;

use starmap_lib::{Explorer, GatewayId, MapMode, PlanningStrategy, BACKGROUND_NODE_ID};

use super::CommandContext;
use crate::output::{describe_click, format_view_text, OutputFormat};

const HELP: &str = "commands: mode <explore|navigation|gateway>, strategy <single|dual>, \
click <system>, confirm <system>, remove <gateway-id>, clear, clear-all, show, help, quit";

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Mode(MapMode),
    Strategy(PlanningStrategy),
    Click(String),
    Confirm(String),
    Remove(GatewayId),
    Clear,
    ClearAll,
    Show,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, argument) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let require = |what: &str| {
            if argument.is_empty() {
                Err(format!("'{verb}' needs {what}"))
            } else {
                Ok(argument.to_string())
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "mode" => require("a mode")?.parse().map(SessionCommand::Mode),
            "strategy" => require("a strategy")?.parse().map(SessionCommand::Strategy),
            "click" => require("a system").map(SessionCommand::Click),
            "confirm" => require("a system").map(SessionCommand::Confirm),
            "remove" => require("a gateway id")?
                .parse()
                .map(SessionCommand::Remove)
                .map_err(|_| format!("invalid gateway id '{argument}'")),
            "clear" => Ok(SessionCommand::Clear),
            "clear-all" => Ok(SessionCommand::ClearAll),
            "show" => Ok(SessionCommand::Show),
            "help" => Ok(SessionCommand::Help),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            other => Err(format!("unknown command '{other}'")),
        }
    }
}

/// Handle the session subcommand, reading commands from stdin.
pub fn handle_session_command(context: &CommandContext) -> Result<()> {
    let dataset = context.load_dataset()?;
    let mut explorer = Explorer::new(dataset, context.config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut explorer, stdin.lock(), &mut stdout.lock(), context.format)
}

/// Apply every command from `input` to `explorer`, reporting to `out`.
pub fn run_session<R: BufRead, W: Write>(
    explorer: &mut Explorer,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(message) => {
                report_error(out, format, &message)?;
                continue;
            }
        };
        debug!(?command, "session command");
        if command == SessionCommand::Quit {
            break;
        }

        match apply(explorer, &command) {
            Ok(message) => match format {
                OutputFormat::Text => writeln!(out, "{message}")?,
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::to_string(&explorer.view())?)?
                }
            },
            Err(message) => report_error(out, format, &message)?,
        }
    }
    out.flush()?;
    Ok(())
}

fn report_error<W: Write>(out: &mut W, format: OutputFormat, message: &str) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "error: {message}")?,
        OutputFormat::Json => writeln!(out, "{}", json!({ "error": message }))?,
    }
    Ok(())
}

/// Resolve a user-supplied system to an id; the background node passes through.
fn resolve_id(explorer: &Explorer, query: &str) -> std::result::Result<String, String> {
    if query == BACKGROUND_NODE_ID {
        return Ok(query.to_string());
    }
    explorer
        .catalog()
        .resolve(query)
        .map(|system| system.id.clone())
        .map_err(|error| error.to_string())
}

fn apply(
    explorer: &mut Explorer,
    command: &SessionCommand,
) -> std::result::Result<String, String> {
    let message = match command {
        SessionCommand::Mode(mode) => {
            explorer.set_mode(*mode);
            format!("mode {mode}")
        }
        SessionCommand::Strategy(strategy) => {
            explorer.set_strategy(*strategy);
            format!("strategy {strategy}")
        }
        SessionCommand::Click(query) => {
            let id = resolve_id(explorer, query)?;
            let outcome = explorer.click(&id);
            describe_click(&outcome, explorer)
        }
        SessionCommand::Confirm(query) => {
            let id = resolve_id(explorer, query)?;
            let added = explorer.confirm_candidate(&id);
            if added.is_empty() {
                "no gateways added".to_string()
            } else {
                let ids: Vec<_> = added.iter().map(|id| format!("#{id}")).collect();
                format!("planned {}", ids.join(", "))
            }
        }
        SessionCommand::Remove(id) => {
            if explorer.remove_gateway(*id) {
                format!("removed #{id}")
            } else {
                return Err(format!("no planned gateway #{id}"));
            }
        }
        SessionCommand::Clear => {
            explorer.clear_selection();
            "selection cleared".to_string()
        }
        SessionCommand::ClearAll => {
            explorer.clear_all();
            "all planned gateways cleared".to_string()
        }
        SessionCommand::Show => format_view_text(&explorer.view()).trim_end().to_string(),
        SessionCommand::Help => HELP.to_string(),
        SessionCommand::Quit => String::new(),
    };
    Ok(message)
}
