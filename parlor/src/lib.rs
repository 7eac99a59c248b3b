pub mod color;
pub mod command;
pub mod config;
pub mod event_handler;
pub mod main_view;
pub mod markup;
pub mod model;
pub mod project_path;
pub mod renderer;
pub mod room_view;
pub mod session;
pub mod tui;
