use tracing::warn;

use crate::command::{Command, CommandSender, JoinOptions};

/// Outbound side of a chat backend as seen by the session.
///
/// Every call is fire-and-forget: failures are reported out of band and
/// never returned to the caller.
pub trait MessageTransport {
    fn send_message(&mut self, room: &str, text: &str);
    fn join_room(&mut self, room: &str, server: &str, options: Option<JoinOptions>);
    fn leave_room(&mut self, room: &str);
    fn stop(&mut self);
}

impl CommandSender {
    fn dispatch(&self, command: Command) {
        if let Err(err) = self.send(command) {
            warn!("transport command dropped: {err}");
        }
    }
}

impl MessageTransport for CommandSender {
    fn send_message(&mut self, room: &str, text: &str) {
        self.dispatch(Command::SendMessage(room.to_string(), text.to_string()));
    }

    fn join_room(&mut self, room: &str, server: &str, options: Option<JoinOptions>) {
        self.dispatch(Command::JoinRoom(
            room.to_string(),
            server.to_string(),
            options,
        ));
    }

    fn leave_room(&mut self, room: &str) {
        self.dispatch(Command::LeaveRoom(room.to_string()));
    }

    fn stop(&mut self) {
        self.dispatch(Command::Stop);
    }
}
