//! Headless backend for frostwm
//!
//! Drives the render manager from a frame timer and reads console
//! commands from stdin. Nothing is drawn; the scene can be inspected with
//! `dump`.

use std::io::BufRead;
use std::time::{Duration, Instant};

use anyhow::Result;
use smithay::reexports::calloop::{
    channel::{self, Event as ChannelEvent},
    timer::{TimeoutAction, Timer},
    EventLoop,
};
use tracing::info;

use crate::state::Shell;

/// 60 Hz
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Run frostwm without a display server
pub fn run_headless(event_loop: &mut EventLoop<'static, Shell>, state: &mut Shell) -> Result<()> {
    let handle = event_loop.handle();

    handle
        .insert_source(Timer::from_duration(FRAME_INTERVAL), |_deadline, _, shell| {
            shell.render_frame(Instant::now());
            TimeoutAction::ToDuration(FRAME_INTERVAL)
        })
        .map_err(|e| anyhow::anyhow!("Failed to insert frame timer: {:?}", e.error))?;

    let (sender, lines) = channel::channel::<String>();
    std::thread::Builder::new()
        .name("console".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if sender.send(line).is_err() {
                    break;
                }
            }
        })?;

    handle
        .insert_source(lines, |event, _, shell| match event {
            ChannelEvent::Msg(line) => shell.process_line(&line),
            ChannelEvent::Closed => {
                info!("Console closed");
                shell.quit_requested = true;
            }
        })
        .map_err(|e| anyhow::anyhow!("Failed to insert console source: {:?}", e.error))?;

    info!("Headless backend running, frame every {:?}", FRAME_INTERVAL);

    while !state.quit_requested {
        event_loop.dispatch(Some(FRAME_INTERVAL), state)?;
    }

    Ok(())
}
