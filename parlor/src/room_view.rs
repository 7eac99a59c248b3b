/// Append-only scrollable log. Follows the newest line until the user
/// scrolls up, and resumes following once scrolled back to the bottom.
#[derive(Debug)]
pub struct TextLog {
    lines: Vec<String>,
    scroll_offset: usize,
    visible_height: usize,
    follow_last: bool,
}

impl Default for TextLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLog {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            scroll_offset: 0,
            visible_height: 1,
            follow_last: true,
        }
    }

    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
        if self.follow_last {
            self.scroll_offset = self.max_scroll();
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_following(&self) -> bool {
        self.follow_last
    }

    /// Lines shown for the last known view height.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .skip(self.scroll_offset)
            .take(self.visible_height)
            .map(String::as_str)
    }

    pub fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height.max(1);
        if self.follow_last {
            self.scroll_offset = self.max_scroll();
        } else {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        }
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
        self.follow_last = self.scroll_offset == self.max_scroll();
    }

    pub fn scroll_down(&mut self, amount: usize) {
        let max_scroll = self.max_scroll();
        self.scroll_offset = self.scroll_offset.saturating_add(amount).min(max_scroll);
        self.follow_last = self.scroll_offset == max_scroll;
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.visible_height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Scrollback of one room: who spoke, and what they said.
#[derive(Debug, Default)]
pub struct RoomView {
    pub sender: TextLog,
    pub message: TextLog,
}

impl RoomView {
    pub fn new() -> Self {
        Self {
            sender: TextLog::new(),
            message: TextLog::new(),
        }
    }

    pub fn append(&mut self, sender: &str, message: &str) {
        self.sender.push(sender);
        self.message.push(message);
    }

    pub fn scroll(&mut self, direction: ScrollDirection, amount: usize) {
        for log in [&mut self.sender, &mut self.message] {
            match direction {
                ScrollDirection::Up => log.scroll_up(amount),
                ScrollDirection::Down => log.scroll_down(amount),
            }
        }
    }

    pub fn set_visible_height(&mut self, height: usize) {
        self.sender.set_visible_height(height);
        self.message.set_visible_height(height);
    }
}
