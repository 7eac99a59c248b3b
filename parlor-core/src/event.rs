use tokio::sync::mpsc;

use crate::error::TransportError;

/// Inbound notifications delivered by a transport backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    RoomList(Vec<String>),
    Message {
        room: String,
        sender: String,
        text: String,
    },
}

pub struct EventSender {
    pub inner: mpsc::UnboundedSender<RoomEvent>,
}

impl EventSender {
    pub fn send(&self, event: RoomEvent) -> Result<(), TransportError> {
        self.inner.send(event).map_err(|_| TransportError::SendEvent)
    }

    pub fn room_list(&self, rooms: &[String]) -> Result<(), TransportError> {
        self.send(RoomEvent::RoomList(rooms.to_vec()))
    }

    pub fn message(&self, room: &str, sender: &str, text: &str) -> Result<(), TransportError> {
        self.send(RoomEvent::Message {
            room: room.to_string(),
            sender: sender.to_string(),
            text: text.to_string(),
        })
    }
}

pub struct EventReceiver {
    pub inner: mpsc::UnboundedReceiver<RoomEvent>,
}

impl EventReceiver {
    /// Non-blocking pull, `None` when nothing is pending or the backend is gone.
    pub fn try_next(&mut self) -> Option<RoomEvent> {
        self.inner.try_recv().ok()
    }
}

pub fn event_channel() -> (EventSender, EventReceiver) {
    let (inner_sender, inner_receiver) = mpsc::unbounded_channel();
    (
        EventSender {
            inner: inner_sender,
        },
        EventReceiver {
            inner: inner_receiver,
        },
    )
}
