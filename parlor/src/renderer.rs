use tracing::debug;

/// Drawing surface as seen by the session: one page per room, a room list
/// selection, and a redraw signal.
pub trait Renderer {
    /// Adds a page for `room`. Registering a known room again is ignored.
    fn register_room_page(&mut self, room: &str, visible: bool);
    /// Makes `room` the visible page. Idempotent.
    fn show_page(&mut self, room: &str);
    /// Leaves no page visible, used once there is no room to show.
    fn hide_pages(&mut self);
    /// Moves the room list selection indicator.
    fn select_room(&mut self, index: usize);
    /// Cheap; requests are coalesced until the next frame.
    fn request_redraw(&mut self);
}

/// Page bookkeeping for the terminal front end.
#[derive(Debug)]
pub struct PageSet {
    pages: Vec<String>,
    visible: Option<String>,
    selected: Option<usize>,
    dirty: bool,
}

impl Default for PageSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSet {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            visible: None,
            selected: None,
            dirty: true,
        }
    }

    pub fn has_page(&self, room: &str) -> bool {
        self.pages.iter().any(|v| v == room)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn visible_page(&self) -> Option<&str> {
        self.visible.as_deref()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Consumes the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Renderer for PageSet {
    fn register_room_page(&mut self, room: &str, visible: bool) {
        if !self.has_page(room) {
            debug!("register page {room}");
            self.pages.push(room.to_string());
        }
        if visible {
            self.show_page(room);
        }
    }

    fn show_page(&mut self, room: &str) {
        if self.visible.as_deref() != Some(room) && self.has_page(room) {
            self.visible = Some(room.to_string());
            self.dirty = true;
        }
    }

    fn hide_pages(&mut self) {
        let hidden = self.visible.take().is_some();
        let unselected = self.selected.take().is_some();
        if hidden || unselected {
            self.dirty = true;
        }
    }

    fn select_room(&mut self, index: usize) {
        if self.selected != Some(index) {
            self.selected = Some(index);
            self.dirty = true;
        }
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
    }
}
