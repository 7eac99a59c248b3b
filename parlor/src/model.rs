use parlor_core::client::Client;
use parlor_core::command::CommandSender;
use parlor_core::event::RoomEvent;
use parlor_core::loopback::Loopback;
use tracing::{info, warn};

use crate::config::Config;

#[derive(Debug, Default, PartialEq, Eq)]
pub enum RunningState {
    #[default]
    Running,
    Done,
}

pub struct Model {
    pub running_state: RunningState,
    pub config: Config,
    client: Option<Client>,
}

impl Model {
    pub fn new(config_name: &str) -> Self {
        let config = Config::new(config_name);
        if !Config::exists(config_name)
            && let Err(err) = config.save(config_name)
        {
            warn!("cannot write default config: {err}");
        }
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            running_state: RunningState::Running,
            config,
            client: None,
        }
    }

    /// Starts the backend and hands back the sender the session talks through.
    pub fn connect(&mut self) -> CommandSender {
        let loopback = Loopback::new(
            &self.config.login.nickname,
            &self.config.rooms.server,
            self.config.rooms.list.clone(),
        );
        let client = Client::spawn_loopback(loopback);
        let sender = client.command_sender();
        self.client = Some(client);
        sender
    }

    pub fn is_transport_finished(&self) -> bool {
        self.client.as_ref().is_none_or(|v| v.is_finished())
    }

    pub fn pull_event(&mut self) -> Option<RoomEvent> {
        self.client
            .as_mut()
            .and_then(|v| v.event_receiver.try_next())
    }

    /// Waits for the backend to wind down, then lets the UI loop end.
    pub async fn shutdown(&mut self) {
        if let Some(client) = self.client.take() {
            match client.task.await {
                Ok(Ok(())) => info!("transport stopped"),
                Ok(Err(err)) => warn!("transport stopped with error: {err}"),
                Err(err) => warn!("transport task failed: {err}"),
            }
        }
        self.running_state = RunningState::Done;
    }
}
