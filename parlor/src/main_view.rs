use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use parlor_core::command::CommandSender;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListState, Padding, Paragraph},
};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::color::ColorPalette;
use crate::config::{self, Config};
use crate::event_handler::Event;
use crate::markup::tagged_line;
use crate::model::Model;
use crate::renderer::{PageSet, Renderer};
use crate::session::{Flow, RoomSession};

const ROOM_LIST_PADDING: u16 = 1;

pub type Session = RoomSession<PageSet, CommandSender>;

/// Room list on the left, the visible room page on the right, input below.
pub struct MainView {
    session: Session,
    input: Input,
    palette: &'static ColorPalette,
    layout: config::Layout,
    room_list_area: Rect,
    room_list_state: ListState,
}

impl MainView {
    pub fn new(config: &Config, transport: CommandSender) -> Self {
        Self {
            session: RoomSession::new(PageSet::new(), transport, config.layout.scroll_step),
            input: Input::new(String::new()),
            palette: ColorPalette::shared(),
            layout: config.layout.clone(),
            room_list_area: Rect::default(),
            room_list_state: ListState::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Drains everything the backend delivered since the last tick.
    pub fn pull_events(&mut self, model: &mut Model) {
        if self.session.is_closing() {
            return;
        }
        while let Some(event) = model.pull_event() {
            self.session.handle_event(event);
        }
    }

    pub fn need_redraw(&mut self) -> bool {
        self.session.renderer_mut().take_redraw()
    }

    pub fn handle_event(&mut self, event: &Event) -> Flow {
        match event {
            Event::Key(key) => {
                let Some(key) = self.session.handle_key(*key) else {
                    return Flow::Continue;
                };
                if key.kind == KeyEventKind::Release {
                    return Flow::Continue;
                }
                if key.code == KeyCode::Enter {
                    let line = self.input.value().to_string();
                    self.input.reset();
                    self.session.renderer_mut().request_redraw();
                    return self.session.submit_line(&line);
                }
                if self
                    .input
                    .handle_event(&crossterm::event::Event::Key(key))
                    .is_some()
                {
                    self.session.renderer_mut().request_redraw();
                }
            }
            Event::Mouse(mouse_event) => {
                if mouse_event.kind == MouseEventKind::Down(MouseButton::Left) {
                    self.click_room_list(mouse_event.column, mouse_event.row);
                }
            }
            Event::Resize => self.session.renderer_mut().request_redraw(),
            Event::Tick | Event::Error => {}
        }
        Flow::Continue
    }

    fn click_room_list(&mut self, column: u16, row: u16) {
        let area = self.room_list_area.inner(Margin::new(0, ROOM_LIST_PADDING));
        if !area.contains(Position::new(column, row)) {
            return;
        }
        let index = usize::from(row - area.y) + self.room_list_state.offset();
        if index < self.session.rooms().len()
            && let Ok(target) = isize::try_from(index)
        {
            self.session.switch_room(target);
        }
    }

    pub fn view(&mut self, frame: &mut Frame<'_>) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(self.layout.room_list_width), // Room list
                Constraint::Min(0),                              // Room page
            ])
            .split(frame.area());
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Room page
                Constraint::Length(2), // Input
            ])
            .split(columns[1]);

        self.room_list_area = columns[0];
        self.render_room_list(frame, columns[0]);
        self.render_page(frame, right[0]);
        self.render_input(frame, right[1]);
    }

    fn render_room_list(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let items: Vec<Line<'static>> = self
            .session
            .rooms()
            .iter()
            .map(|room| tagged_line(self.palette, &self.palette.decorate(room)))
            .collect();
        self.room_list_state
            .select(self.session.renderer().selected());

        let list = List::new(items)
            .block(Block::new().padding(Padding::uniform(ROOM_LIST_PADDING)))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.room_list_state);
    }

    fn render_page(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(self.layout.sender_width), // Sender
                Constraint::Length(1),                        // Separator
                Constraint::Min(0),                           // Message
            ])
            .split(area);

        if let Some(view) = self.session.current_view_mut() {
            view.set_visible_height(usize::from(area.height));
        }
        let Some(view) = self
            .session
            .renderer()
            .visible_page()
            .and_then(|room| self.session.view(room))
        else {
            return;
        };

        let senders: Vec<Line<'static>> = view
            .sender
            .visible()
            .map(|sender| tagged_line(self.palette, &self.palette.decorate(sender)))
            .collect();
        let messages: Vec<Line<'_>> = view.message.visible().map(Line::from).collect();

        frame.render_widget(
            Paragraph::new(senders).alignment(Alignment::Right),
            columns[0],
        );
        frame.render_widget(
            Paragraph::new(vec![Line::from("┃"); usize::from(area.height)])
                .style(Style::default().fg(Color::DarkGray)),
            columns[1],
        );
        frame.render_widget(Paragraph::new(messages), columns[2]);
    }

    fn render_input(&self, frame: &mut Frame<'_>, area: Rect) {
        // keep 1 for the prompt and 1 for the cursor
        let width = area.width.max(2) - 2;
        let scroll = self.input.visual_scroll(usize::from(width));
        let input = Paragraph::new(Line::from(vec![
            Span::from(">").style(Style::default().fg(Color::Cyan)),
            Span::from(self.input.value()),
        ]))
        .scroll((0, scroll as u16));
        frame.render_widget(input, area);

        let x = self.input.visual_cursor().max(scroll) - scroll + 1;
        frame.set_cursor_position((area.x + x as u16, area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};
    use parlor_core::command::{Command, CommandReceiver, command_channel};

    fn click(row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn main_view(rooms: &[&str]) -> (MainView, CommandReceiver) {
        let (sender, receiver) = command_channel();
        let mut view = MainView::new(&Config::default(), sender);
        view.session
            .set_room_list(rooms.iter().map(|v| v.to_string()).collect());
        (view, receiver)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typed_line_is_sent_and_cleared() {
        let (mut view, mut receiver) = main_view(&["#rust"]);
        for c in "hi".chars() {
            assert_eq!(view.handle_event(&key(KeyCode::Char(c))), Flow::Continue);
        }
        assert_eq!(view.input.value(), "hi");

        assert_eq!(view.handle_event(&key(KeyCode::Enter)), Flow::Continue);
        assert_eq!(view.input.value(), "");
        assert_eq!(
            receiver.inner.try_recv().ok(),
            Some(Command::SendMessage("#rust".into(), "hi".into()))
        );
    }

    #[test]
    fn quit_line_ends_the_loop() {
        let (mut view, mut receiver) = main_view(&["#rust"]);
        for c in "/quit".chars() {
            view.handle_event(&key(KeyCode::Char(c)));
        }
        assert_eq!(view.handle_event(&key(KeyCode::Enter)), Flow::Quit);
        assert_eq!(receiver.inner.try_recv().ok(), Some(Command::Stop));
    }

    #[test]
    fn clicking_a_room_switches_to_it() {
        let (mut view, _receiver) = main_view(&["#a", "#b", "#c"]);
        view.room_list_area = Rect::new(0, 0, 40, 20);
        view.handle_event(&click(3));
        assert_eq!(view.session().current_room(), "#c");
        view.handle_event(&click(15));
        assert_eq!(view.session().current_room(), "#c");
        view.handle_event(&click(1));
        assert_eq!(view.session().current_room(), "#a");
    }

    #[test]
    fn click_on_top_padding_is_ignored() {
        let (mut view, _receiver) = main_view(&["#a", "#b", "#c"]);
        view.room_list_area = Rect::new(0, 0, 40, 20);
        view.session.switch_room(2);

        view.handle_event(&click(0));
        assert_eq!(view.session().current_room(), "#c");
        view.handle_event(&click(19));
        assert_eq!(view.session().current_room(), "#c");
    }

    #[test]
    fn click_accounts_for_list_scroll() {
        let rooms: Vec<String> = (0..30).map(|i| format!("#room{i}")).collect();
        let room_refs: Vec<&str> = rooms.iter().map(String::as_str).collect();
        let (mut view, _receiver) = main_view(&room_refs);
        view.room_list_area = Rect::new(0, 0, 40, 10);
        view.room_list_state = ListState::default().with_offset(12);

        view.handle_event(&click(1));
        assert_eq!(view.session().current_room(), "#room12");
        view.handle_event(&click(4));
        assert_eq!(view.session().current_room(), "#room15");
    }

    #[test]
    fn empty_room_list_leaves_no_page_to_draw() {
        let (mut view, _receiver) = main_view(&["#rust"]);
        view.session.append_message("#rust", "farine", "hello");
        view.session.set_room_list(vec![]);

        assert_eq!(view.session().renderer().visible_page(), None);
        assert_eq!(view.session().renderer().selected(), None);
        assert!(view.need_redraw());
    }

    #[test]
    fn room_list_change_is_redrawn() {
        let (mut view, _receiver) = main_view(&["#a", "#b"]);
        view.need_redraw();
        view.session.set_room_list(vec!["#a".into(), "#c".into()]);
        assert!(view.need_redraw());
    }

    #[test]
    fn redraw_follows_session_changes() {
        let (mut view, _receiver) = main_view(&["#rust"]);
        assert!(view.need_redraw());
        assert!(!view.need_redraw());
        view.session.append_message("#rust", "farine", "hello");
        assert!(view.need_redraw());
    }
}
