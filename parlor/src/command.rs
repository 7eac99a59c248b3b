use std::str::FromStr;

use strum::{EnumMessage, EnumString};

/// Sender shown next to hints produced by the client itself.
pub const HINT_SENDER: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumMessage)]
#[strum(serialize_all = "lowercase")]
pub enum CommandName {
    #[strum(message = "Stop the session and quit")]
    Quit,
    #[strum(message = "Reserved")]
    Part,
    #[strum(message = "Leave the current room")]
    Leave,
    #[strum(
        message = "Join a room: {localpart:server}",
        detailed_message = "Usage: /join <room>"
    )]
    Join,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinTarget {
    pub room: String,
    pub server: String,
}

impl JoinTarget {
    /// The server is whatever follows the first `:`; an identifier without
    /// one is used whole.
    pub fn new(room: &str) -> Self {
        let server = room.split_once(':').map_or(room, |(_, server)| server);
        Self {
            room: room.to_string(),
            server: server.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Quit,
    Part,
    Leave,
    Join(Option<JoinTarget>),
    Unknown(String),
}

/// A `/command args...` line split at the first whitespace run.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandLine<'a> {
    pub command: String,
    pub args: &'a str,
}

impl<'a> CommandLine<'a> {
    pub fn split(line: &'a str) -> Option<Self> {
        let next = line.strip_prefix('/')?;
        let (command, args) = next
            .split_once(char::is_whitespace)
            .map_or((next, ""), |(command, args)| (command, args.trim_start()));
        Some(Self {
            command: command.to_lowercase(),
            args,
        })
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'a str> {
        self.args.split_whitespace()
    }
}

/// `None` when `line` is not a command at all.
pub fn parse_command(line: &str) -> Option<ClientCommand> {
    let command_line = CommandLine::split(line)?;
    let Ok(name) = CommandName::from_str(&command_line.command) else {
        return Some(ClientCommand::Unknown(command_line.command));
    };

    Some(match name {
        CommandName::Quit => ClientCommand::Quit,
        CommandName::Part => ClientCommand::Part,
        CommandName::Leave => ClientCommand::Leave,
        CommandName::Join => ClientCommand::Join(command_line.tokens().next().map(JoinTarget::new)),
    })
}

pub fn usage(name: CommandName) -> &'static str {
    name.get_detailed_message()
        .or_else(|| name.get_message())
        .unwrap_or_default()
}
