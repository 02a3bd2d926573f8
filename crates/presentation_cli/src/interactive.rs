//! Line-driven widget session
//!
//! Every plain line replaces the input text, as if typed; commands start
//! with ':'.

use std::sync::Arc;

use application::QueryController;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::output;
use crate::terminal_map::TerminalMap;

/// One parsed stdin line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Input(String),
    Submit,
    /// 1-based position
    Select(usize),
    List,
    Clear,
    Toggle,
    Click,
    State,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Line {
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Line::Input(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("submit" | "s"), None, None) => Line::Submit,
        (Some("select"), Some(position), None) => position
            .parse::<usize>()
            .ok()
            .filter(|p| *p > 0)
            .map_or_else(|| Line::Unknown(line.trim().to_string()), Line::Select),
        (Some("list" | "l"), None, None) => Line::List,
        (Some("clear"), None, None) => Line::Clear,
        (Some("toggle"), None, None) => Line::Toggle,
        (Some("click"), None, None) => Line::Click,
        (Some("state"), None, None) => Line::State,
        (Some("help" | "h" | "?"), None, None) => Line::Help,
        (Some("quit" | "q"), None, None) => Line::Quit,
        _ => Line::Unknown(line.trim().to_string()),
    }
}

fn print_help() {
    println!("Type to change the input. Commands:");
    println!("  :submit        search for the current input");
    println!("  :list          show the current results");
    println!("  :select N      choose result N");
    println!("  :clear         clear input and results");
    println!("  :toggle        expand or collapse the search button");
    println!("  :click         click the map outside the widget");
    println!("  :state         print the widget state as JSON");
    println!("  :quit          leave");
}

pub async fn run(controller: &QueryController, map: &Arc<TerminalMap>) -> anyhow::Result<()> {
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Line::Input(text) => controller.input_changed(&text),
            Line::Submit => match controller.submit().await {
                Ok(outcome) => {
                    debug!(?outcome, "Submitted");
                    output::print_state(&controller.state());
                },
                Err(e) => println!("{e}"),
            },
            Line::Select(position) => match controller.select(position - 1) {
                Ok(chosen) => output::print_chosen(&chosen, map.camera()),
                Err(e) => println!("{e}"),
            },
            Line::List => output::print_state(&controller.state()),
            Line::Clear => controller.reset(),
            Line::Toggle => {
                let state = if controller.toggle() {
                    "expanded"
                } else {
                    "collapsed"
                };
                println!("{state}");
            },
            Line::Click => {
                let fired = map.click();
                debug!(fired, "Map clicked");
            },
            Line::State => println!("{}", serde_json::to_string_pretty(&controller.state())?),
            Line::Help => print_help(),
            Line::Quit => break,
            Line::Unknown(command) => println!("Unknown command: {command} (:help lists commands)"),
        }
    }

    Ok(())
}
