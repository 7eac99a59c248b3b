use tokio::sync::mpsc;

use crate::error::TransportError;

/// Extra parameters for a join request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinOptions {
    /// Additional servers the join may be routed through.
    pub via: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SendMessage(String /*room */, String /*text */),
    JoinRoom(
        String,              /*room */
        String,              /*server */
        Option<JoinOptions>, /*options */
    ),
    LeaveRoom(String /*room */),
    Stop,
}

pub struct CommandReceiver {
    pub inner: mpsc::UnboundedReceiver<Command>,
}

#[derive(Clone, Debug)]
pub struct CommandSender {
    pub inner: mpsc::UnboundedSender<Command>,
}

impl CommandSender {
    pub fn send(&self, command: Command) -> Result<(), TransportError> {
        if self.inner.is_closed() {
            return Err(TransportError::Closed);
        }
        self.inner
            .send(command)
            .map_err(|_| TransportError::SendCommand)
    }
}

pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let (inner_sender, inner_receiver) = mpsc::unbounded_channel();
    (
        CommandSender {
            inner: inner_sender,
        },
        CommandReceiver {
            inner: inner_receiver,
        },
    )
}
