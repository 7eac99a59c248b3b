use ahash::AHashMap;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use parlor_core::event::RoomEvent;
use parlor_core::transport::MessageTransport;
use tracing::{debug, info};

use crate::command::{ClientCommand, CommandName, HINT_SENDER, parse_command, usage};
use crate::renderer::Renderer;
use crate::room_view::{RoomView, ScrollDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Active,
}

/// What the host loop should do after a line was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the room list, the current room cursor and one [`RoomView`] per
/// room ever seen. Views outlive their room's presence in the list so a
/// room that comes back keeps its history.
pub struct RoomSession<R, T> {
    rooms: Vec<String>,
    current: usize,
    views: AHashMap<String, RoomView>,
    renderer: R,
    transport: T,
    scroll_step: usize,
    closing: bool,
}

impl<R: Renderer, T: MessageTransport> RoomSession<R, T> {
    pub fn new(renderer: R, transport: T, scroll_step: usize) -> Self {
        Self {
            rooms: Vec::new(),
            current: 0,
            views: AHashMap::new(),
            renderer,
            transport,
            scroll_step: scroll_step.max(1),
            closing: false,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.rooms.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Active
        }
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.rooms.is_empty()).then_some(self.current)
    }

    /// Empty string while there is no room.
    pub fn current_room(&self) -> &str {
        self.rooms
            .get(self.current)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn view(&self, room: &str) -> Option<&RoomView> {
        self.views.get(room)
    }

    pub fn current_view_mut(&mut self) -> Option<&mut RoomView> {
        let room = self.rooms.get(self.current)?;
        self.views.get_mut(room)
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    pub fn set_room_list(&mut self, rooms: Vec<String>) {
        for room in &rooms {
            if !self.views.contains_key(room) {
                debug!("new room view {room}");
                self.views.insert(room.clone(), RoomView::new());
                self.renderer.register_room_page(room, false);
            }
        }
        self.rooms = rooms;
        self.current = 0;

        if self.rooms.is_empty() {
            self.renderer.hide_pages();
        } else {
            self.switch_room(0);
        }
        self.renderer.request_redraw();
    }

    /// Wraps in both directions; any negative target lands on the last room.
    pub fn switch_room(&mut self, target: isize) {
        let Ok(len) = isize::try_from(self.rooms.len()) else {
            return;
        };
        if len == 0 {
            return;
        }
        let target = if target < 0 { len - 1 } else { target };
        let Ok(index) = usize::try_from(target.rem_euclid(len)) else {
            return;
        };

        self.current = index;
        if let Some(room) = self.rooms.get(index) {
            self.renderer.show_page(room);
        }
        self.renderer.select_room(index);
    }

    /// Messages for rooms without a view, or arriving after `quit`, are dropped.
    pub fn append_message(&mut self, room: &str, sender: &str, message: &str) {
        if self.closing {
            debug!("session closing, dropping message for {room}");
            return;
        }
        if let Some(view) = self.views.get_mut(room) {
            view.append(sender, message);
            self.renderer.request_redraw();
        } else {
            debug!("no view for {room}, message dropped");
        }
    }

    pub fn handle_event(&mut self, event: RoomEvent) {
        match event {
            RoomEvent::RoomList(rooms) => self.set_room_list(rooms),
            RoomEvent::Message { room, sender, text } => {
                self.append_message(&room, &sender, &text)
            }
        }
    }

    pub fn submit_line(&mut self, line: &str) -> Flow {
        if line.is_empty() {
            return Flow::Continue;
        }

        if let Some(command) = parse_command(line) {
            self.execute(command)
        } else {
            if self.state() == SessionState::Active {
                let room = self.current_room().to_string();
                self.transport.send_message(&room, line);
            } else {
                debug!("no current room, message not sent");
            }
            Flow::Continue
        }
    }

    /// Returns the key when the session does not use it.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<KeyEvent> {
        if key.kind == KeyEventKind::Release {
            return Some(key);
        }

        if key.modifiers == KeyModifiers::CONTROL {
            match key.code {
                KeyCode::Down => self.step_room(1),
                KeyCode::Up => self.step_room(-1),
                _ => return Some(key),
            }
        } else {
            match key.code {
                KeyCode::PageUp => self.scroll_current(ScrollDirection::Up),
                KeyCode::PageDown => self.scroll_current(ScrollDirection::Down),
                _ => return Some(key),
            }
        }
        None
    }

    fn step_room(&mut self, delta: isize) {
        if let Some(current) = self.current_index()
            && let Ok(current) = isize::try_from(current)
        {
            self.switch_room(current + delta);
        }
    }

    fn scroll_current(&mut self, direction: ScrollDirection) {
        let amount = self.scroll_step;
        if let Some(view) = self.current_view_mut() {
            view.scroll(direction, amount);
            self.renderer.request_redraw();
        }
    }

    fn execute(&mut self, command: ClientCommand) -> Flow {
        match command {
            ClientCommand::Quit => {
                info!("quit requested, stopping transport");
                self.transport.stop();
                self.closing = true;
                return Flow::Quit;
            }
            ClientCommand::Part => {}
            ClientCommand::Leave => {
                if self.state() == SessionState::Active {
                    let room = self.current_room().to_string();
                    self.transport.leave_room(&room);
                }
            }
            ClientCommand::Join(None) => {
                let room = self.current_room().to_string();
                self.append_message(&room, HINT_SENDER, usage(CommandName::Join));
            }
            ClientCommand::Join(Some(target)) => {
                self.transport
                    .join_room(&target.room, &target.server, None);
            }
            ClientCommand::Unknown(name) => debug!("ignoring unknown command /{name}"),
        }
        Flow::Continue
    }
}
