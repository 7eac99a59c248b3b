use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransportError {
    #[error("Transport is closed")]
    Closed,
    #[error("Cannot send command")]
    SendCommand,
    #[error("Cannot send event")]
    SendEvent,
}
