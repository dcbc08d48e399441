//! Line protocol read from stdin.
//!
//! Each line is either a text command:
//! - `roll`
//! - `place <x> <y>`
//! - `state` (dump the snapshot as JSON)
//! - `quit`
//!
//! or a JSON-encoded `GameAction`, e.g. `{"type":"RequestRoll"}`.

use settlers_core::GameAction;
use thiserror::Error;

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Action(GameAction),
    DumpState,
    Quit,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Unknown command {0:?}")]
    UnknownCommand(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Invalid coordinate {0:?}")]
    InvalidCoordinate(String),

    #[error("Unexpected trailing input {0:?}")]
    TrailingInput(String),

    #[error("Invalid action JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<InputEvent>, ProtocolError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if line.starts_with('{') {
        let action: GameAction = serde_json::from_str(line)?;
        return Ok(Some(InputEvent::Action(action)));
    }

    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_ascii_lowercase();

    let event = match command.as_str() {
        "roll" => InputEvent::Action(GameAction::RequestRoll),
        "place" => {
            let x = coordinate(words.next(), "x coordinate")?;
            let y = coordinate(words.next(), "y coordinate")?;
            InputEvent::Action(GameAction::RequestPlacement { x, y })
        }
        "state" => InputEvent::DumpState,
        "quit" | "exit" => InputEvent::Quit,
        _ => return Err(ProtocolError::UnknownCommand(command)),
    };

    let rest: Vec<&str> = words.collect();
    if !rest.is_empty() {
        return Err(ProtocolError::TrailingInput(rest.join(" ")));
    }
    Ok(Some(event))
}

fn coordinate(word: Option<&str>, what: &'static str) -> Result<f64, ProtocolError> {
    let word = word.ok_or(ProtocolError::MissingArgument(what))?;
    match word.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ProtocolError::InvalidCoordinate(word.to_string())),
    }
}
