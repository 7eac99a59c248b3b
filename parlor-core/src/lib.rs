pub mod client;
pub mod command;
pub mod error;
pub mod event;
pub mod loopback;
pub mod transport;
