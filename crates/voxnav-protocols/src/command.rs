//! Command vocabulary shared between the dispatcher and the page runtime.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;

/// Arguments of a command (`args` object of the message).
pub type CommandArgs = Map<String, Value>;

/// Read a non-empty string argument.
pub fn string_arg<'a>(args: &'a CommandArgs, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Where a command is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandScope {
    /// Executed by the control side against the browser's tabs.
    Browser,
    /// Forwarded to the page runtime of the active tab.
    Page,
}

/// Successful outcome of a command handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// The command took effect.
    Done,
    /// A tolerable precondition was absent (e.g. no active tab) and nothing was done.
    Skipped,
}

/// Commands understood by the page runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageCommand {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,
    ShowHints,
    HideHints,
    HintClick,
}

impl PageCommand {
    pub const ALL: [PageCommand; 9] = [
        PageCommand::ScrollUp,
        PageCommand::ScrollDown,
        PageCommand::PageUp,
        PageCommand::PageDown,
        PageCommand::JumpTop,
        PageCommand::JumpBottom,
        PageCommand::ShowHints,
        PageCommand::HideHints,
        PageCommand::HintClick,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScrollUp => "scroll_up",
            Self::ScrollDown => "scroll_down",
            Self::PageUp => "page_up",
            Self::PageDown => "page_down",
            Self::JumpTop => "jump_top",
            Self::JumpBottom => "jump_bottom",
            Self::ShowHints => "show_hints",
            Self::HideHints => "hide_hints",
            Self::HintClick => "hint_click",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for PageCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
