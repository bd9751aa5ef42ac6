use std::time::Instant;

use tracing::info;

use frostwm::collaborators::Collaborators;
use frostwm::display::{DisplayLog, HeadlessDisplay};
use frostwm::{Config, LiveConfig, RenderManager};

/// Top-level shell state owned by the event loop
pub struct Shell {
    pub config: LiveConfig,
    pub start_time: Instant,
    pub render: RenderManager,

    /// What the headless display has been asked to do
    pub display_log: DisplayLog,

    /// Has quit been requested?
    pub quit_requested: bool,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        let config = LiveConfig::new(config);
        let layout = config.snapshot().layout;
        let display = HeadlessDisplay::new();
        let display_log = display.log();
        let render = RenderManager::new(
            config.clone(),
            Box::new(display),
            Collaborators::headless(&layout),
        );
        Self {
            config,
            start_time: Instant::now(),
            render,
            display_log,
            quit_requested: false,
        }
    }

    /// Map the home screen and enter the first state.
    pub fn start(&mut self) {
        let screen = self.render.screen();
        let desktop = self
            .render
            .new_client(frostwm::window::ClientKind::Desktop, screen);
        self.render.map_client(desktop);
        self.render.set_state(frostwm::RenderState::Home);
        info!("Shell ready");
    }

    /// Drop display requests that were already reported.
    pub fn drain_display_log(&mut self) -> usize {
        self.display_log.borrow_mut().drain(..).count()
    }
}
