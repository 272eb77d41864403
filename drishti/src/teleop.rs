//! Operator command vocabulary.
//!
//! Directional teleop commands are single-letter codes understood by the
//! robot control service; mapping sessions are started and stopped through
//! two named actions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DrishtiError;

/// Directional teleop command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TeleopCommand {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
}

impl TeleopCommand {
    /// All commands, in control-pad order.
    pub const ALL: [TeleopCommand; 5] = [
        TeleopCommand::Forward,
        TeleopCommand::Left,
        TeleopCommand::Backward,
        TeleopCommand::Right,
        TeleopCommand::Stop,
    ];

    /// Wire code.
    pub fn code(self) -> char {
        match self {
            TeleopCommand::Forward => 'F',
            TeleopCommand::Backward => 'B',
            TeleopCommand::Left => 'L',
            TeleopCommand::Right => 'R',
            TeleopCommand::Stop => 'S',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'F' => Some(TeleopCommand::Forward),
            'B' => Some(TeleopCommand::Backward),
            'L' => Some(TeleopCommand::Left),
            'R' => Some(TeleopCommand::Right),
            'S' => Some(TeleopCommand::Stop),
            _ => None,
        }
    }
}

impl fmt::Display for TeleopCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TeleopCommand {
    type Err = DrishtiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_code(c),
            _ => None,
        }
        .ok_or_else(|| DrishtiError::invalid(format!("unknown teleop command {:?}", s)))
    }
}

impl TryFrom<String> for TeleopCommand {
    type Error = DrishtiError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TeleopCommand> for String {
    fn from(cmd: TeleopCommand) -> Self {
        cmd.code().to_string()
    }
}

/// Mapping session control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingCommand {
    Start,
    Stop,
}

impl MappingCommand {
    /// Action name on the mapping service.
    pub fn action(self) -> &'static str {
        match self {
            MappingCommand::Start => "start_mapping",
            MappingCommand::Stop => "stop_mapping",
        }
    }

    /// Command that flips a session in the given state.
    pub fn toggle_from(active: bool) -> Self {
        if active {
            MappingCommand::Stop
        } else {
            MappingCommand::Start
        }
    }
}
