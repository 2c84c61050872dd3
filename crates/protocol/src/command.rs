use std::fmt;

use serde::{Deserialize, Serialize};

/// A single on/off command for one target device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Hubitat device id the command is addressed to.
    pub device_id: String,
    pub action: CommandAction,
}

/// Action encoded in the target system's command path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandAction {
    On,
    Off,
}

impl fmt::Display for CommandAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandAction::On => write!(f, "on"),
            CommandAction::Off => write!(f, "off"),
        }
    }
}

impl std::str::FromStr for CommandAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(CommandAction::On),
            "off" => Ok(CommandAction::Off),
            other => Err(format!("unknown action {other:?}, expected \"on\" or \"off\"")),
        }
    }
}
