use tokio::task::JoinHandle;

use crate::command::{CommandSender, command_channel};
use crate::event::{EventReceiver, event_channel};
use crate::loopback::Loopback;

/// Handles of a running backend: commands in, events out, and its task.
pub struct Client {
    pub command_sender: CommandSender,
    pub event_receiver: EventReceiver,
    pub task: JoinHandle<anyhow::Result<()>>,
}

impl Client {
    pub fn spawn_loopback(mut loopback: Loopback) -> Self {
        let (command_sender, command_receiver) = command_channel();
        let (event_sender, event_receiver) = event_channel();
        let task =
            tokio::spawn(async move { loopback.process(command_receiver, event_sender).await });
        Self {
            command_sender,
            event_receiver,
            task,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn command_sender(&self) -> CommandSender {
        self.command_sender.clone()
    }
}
