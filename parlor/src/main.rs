use std::time::Duration;

use clap::Parser;
use parlor::event_handler::{EventHandler, MouseCapture};
use parlor::main_view::MainView;
use parlor::model::{Model, RunningState};
use parlor::project_path::ProjectPath;
use parlor::session::Flow;
use parlor::tui;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const TICK_RATE: Duration = Duration::from_millis(60);

#[derive(Parser, Debug)]
#[command(version, about = "Terminal multi-room chat client")]
struct Args {
    #[arg(short, long, default_value = "parlor.toml")]
    config_name: String,

    #[arg(short, long)]
    debug: bool,

    /// Overrides the nickname from the config file
    #[arg(short, long)]
    nickname: Option<String>,
}

fn prepare_logs(is_debug: bool) -> color_eyre::Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(
        if !is_debug {
            ProjectPath::cache_dir().unwrap_or(std::env::current_dir()?)
        } else {
            std::env::current_dir()?
        },
        ProjectPath::log_name(),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .compact()
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(EnvFilter::from_default_env())
        .init();
    Ok(guard)
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    let args = Args::parse();
    let _guard = prepare_logs(args.debug)?;
    color_eyre::install()?;

    let mut model = Model::new(&args.config_name);
    if let Some(nickname) = args.nickname {
        model.config.login.nickname = nickname;
    }
    info!("starting as {}", model.config.login.nickname);

    let transport = model.connect();
    let mut main_view = MainView::new(&model.config, transport);

    let mut events = EventHandler::new(TICK_RATE);
    let mouse_capture = MouseCapture::enable()?;
    let mut terminal = tui::init()?;

    while model.running_state != RunningState::Done {
        let Some(event) = events.next().await else {
            break;
        };
        main_view.pull_events(&mut model);
        if main_view.handle_event(&event) == Flow::Quit {
            model.shutdown().await;
        } else if main_view.need_redraw() {
            terminal.draw(|f| main_view.view(f))?;
        }
    }

    drop(mouse_capture);
    tui::restore()?;
    Ok(())
}
