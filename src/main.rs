mod backend;
mod input;
mod render;
mod state;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use smithay::reexports::calloop::EventLoop;
use frostwm::Config;
use crate::state::Shell;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("frostwm starting up");
    info!("  type `help` for console commands");

    let config = Config::default();

    let mut event_loop: EventLoop<'static, Shell> = EventLoop::try_new()?;

    let mut state = Shell::new(config);
    state.start();

    backend::run_headless(&mut event_loop, &mut state)?;

    info!("frostwm shutting down");
    Ok(())
}
