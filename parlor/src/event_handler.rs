use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::event::{EventStream, KeyEvent, MouseEvent};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Error,
}

impl Event {
    /// Focus and paste events are not used by the client.
    pub fn from_terminal(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(key) => Some(Self::Key(key)),
            crossterm::event::Event::Mouse(mouse) => Some(Self::Mouse(mouse)),
            crossterm::event::Event::Resize(_, _) => Some(Self::Resize),
            _ => None,
        }
    }
}

/// Terminal input and a periodic tick, merged on one channel. Inbound room
/// events are drained on each of them.
#[derive(Debug)]
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    task: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let task = tokio::spawn(pump(tx, tick_rate));
        Self { rx, task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn pump(tx: mpsc::Sender<Event>, tick_rate: Duration) {
    let mut reader = EventStream::new();
    let mut ticks = tokio::time::interval(tick_rate);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let event = tokio::select! {
            terminal = reader.next().fuse() => match terminal {
                Some(Ok(terminal)) => match Event::from_terminal(terminal) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(err)) => {
                    warn!("terminal read error: {err}");
                    Event::Error
                }
                None => break,
            },
            _ = ticks.tick() => Event::Tick,
        };
        if tx.send(event).await.is_err() {
            break;
        }
    }
}

/// Mouse reporting stays on while the guard is alive.
pub struct MouseCapture;

impl MouseCapture {
    pub fn enable() -> color_eyre::Result<Self> {
        std::io::stdout().execute(crossterm::event::EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        if let Err(err) = std::io::stdout().execute(crossterm::event::DisableMouseCapture) {
            warn!("cannot disable mouse capture: {err}");
        }
    }
}
