use tracing::{debug, info};

use crate::command::{Command, CommandReceiver};
use crate::event::EventSender;

pub const JOIN_MARKER: &str = "-->";
pub const LEAVE_MARKER: &str = "<--";
pub const NOTICE_MARKER: &str = "---";

/// In-process backend: keeps a room list and echoes what the user sends.
pub struct Loopback {
    nickname: String,
    server: String,
    rooms: Vec<String>,
}

impl Loopback {
    pub fn new(nickname: &str, server: &str, rooms: Vec<String>) -> Self {
        Self {
            nickname: nickname.to_string(),
            server: server.to_string(),
            rooms,
        }
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub async fn process(
        &mut self,
        mut receiver: CommandReceiver,
        events: EventSender,
    ) -> anyhow::Result<()> {
        events.room_list(&self.rooms)?;
        for room in &self.rooms {
            let notice = format!("connected to {}", self.server);
            events.message(room, NOTICE_MARKER, &notice)?;
        }

        while let Some(command) = receiver.inner.recv().await {
            debug!("loopback command {:?}", &command);
            if !self.handle(command, &events)? {
                break;
            }
        }
        info!("loopback stopped");
        Ok(())
    }

    /// Returns `false` once the backend should stop.
    fn handle(&mut self, command: Command, events: &EventSender) -> anyhow::Result<bool> {
        match command {
            Command::SendMessage(room, text) => {
                if self.has_room(&room) {
                    events.message(&room, &self.nickname, &text)?;
                }
            }
            Command::JoinRoom(room, server, _options) => {
                let server = if server.is_empty() {
                    self.server.clone()
                } else {
                    server
                };
                if !self.has_room(&room) {
                    self.rooms.push(room.clone());
                    events.room_list(&self.rooms)?;
                }
                events.message(
                    &room,
                    JOIN_MARKER,
                    &format!("{} joined via {server}", self.nickname),
                )?;
            }
            Command::LeaveRoom(room) => {
                if self.has_room(&room) {
                    events.message(&room, LEAVE_MARKER, &format!("{} left", self.nickname))?;
                    self.rooms.retain(|v| *v != room);
                    events.room_list(&self.rooms)?;
                }
            }
            Command::Stop => return Ok(false),
        }
        Ok(true)
    }

    fn has_room(&self, room: &str) -> bool {
        self.rooms.iter().any(|v| v == room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::command_channel;
    use crate::event::{RoomEvent, event_channel};

    fn rooms() -> Vec<String> {
        vec!["#rust".to_string(), "#tokio".to_string()]
    }

    #[tokio::test]
    async fn announces_rooms_and_echoes_messages() -> anyhow::Result<()> {
        let (commands, receiver) = command_channel();
        let (events, mut inbound) = event_channel();
        let mut loopback = Loopback::new("farine", "localhost", rooms());

        commands.send(Command::SendMessage("#rust".into(), "hi".into()))?;
        commands.send(Command::SendMessage("#nowhere".into(), "lost".into()))?;
        commands.send(Command::Stop)?;
        loopback.process(receiver, events).await?;

        assert_eq!(inbound.try_next(), Some(RoomEvent::RoomList(rooms())));
        for room in rooms() {
            assert_eq!(
                inbound.try_next(),
                Some(RoomEvent::Message {
                    room,
                    sender: NOTICE_MARKER.into(),
                    text: "connected to localhost".into(),
                })
            );
        }
        assert_eq!(
            inbound.try_next(),
            Some(RoomEvent::Message {
                room: "#rust".into(),
                sender: "farine".into(),
                text: "hi".into(),
            })
        );
        assert_eq!(inbound.try_next(), None);
        Ok(())
    }

    #[tokio::test]
    async fn join_and_leave_update_the_room_list() -> anyhow::Result<()> {
        let (commands, receiver) = command_channel();
        let (events, mut inbound) = event_channel();
        let mut loopback = Loopback::new("farine", "localhost", rooms());

        commands.send(Command::JoinRoom(
            "#a:example.org".into(),
            "example.org".into(),
            None,
        ))?;
        commands.send(Command::LeaveRoom("#rust".into()))?;
        commands.send(Command::LeaveRoom("#unknown".into()))?;
        commands.send(Command::Stop)?;
        loopback.process(receiver, events).await?;

        let received: Vec<RoomEvent> = std::iter::from_fn(|| inbound.try_next()).collect();
        assert_eq!(received.len(), 7);
        assert_eq!(
            received.get(3),
            Some(&RoomEvent::RoomList(vec![
                "#rust".into(),
                "#tokio".into(),
                "#a:example.org".into()
            ]))
        );
        assert_eq!(
            received.get(4),
            Some(&RoomEvent::Message {
                room: "#a:example.org".into(),
                sender: JOIN_MARKER.into(),
                text: "farine joined via example.org".into(),
            })
        );
        assert_eq!(
            received.get(5),
            Some(&RoomEvent::Message {
                room: "#rust".into(),
                sender: LEAVE_MARKER.into(),
                text: "farine left".into(),
            })
        );
        assert_eq!(loopback.rooms(), ["#tokio", "#a:example.org"]);
        Ok(())
    }

    #[tokio::test]
    async fn join_without_server_uses_the_home_server() -> anyhow::Result<()> {
        let (commands, receiver) = command_channel();
        let (events, mut inbound) = event_channel();
        let mut loopback = Loopback::new("farine", "chat.example.org", vec![]);

        commands.send(Command::JoinRoom("#lobby".into(), String::new(), None))?;
        commands.send(Command::Stop)?;
        loopback.process(receiver, events).await?;

        let received: Vec<RoomEvent> = std::iter::from_fn(|| inbound.try_next()).collect();
        assert_eq!(
            received.last(),
            Some(&RoomEvent::Message {
                room: "#lobby".into(),
                sender: JOIN_MARKER.into(),
                text: "farine joined via chat.example.org".into(),
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn stops_when_every_sender_is_dropped() -> anyhow::Result<()> {
        let (commands, receiver) = command_channel();
        let (events, _inbound) = event_channel();
        drop(commands);
        Loopback::new("farine", "localhost", vec![]).process(receiver, events).await
    }
}
