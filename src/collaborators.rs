//! Shell components the render manager drives but does not own the
//! internals of.

use tracing::debug;

use crate::config::LayoutConfig;
use crate::geometry::Rect;
use crate::input_viewport::Chrome;
use crate::render_state::RenderState;
use crate::scene::ActorId;
use crate::window::ClientId;

/// The task switcher's thumbnail grid
pub trait TaskNavigator {
    fn is_empty(&self) -> bool;
    fn has_unseen_notifications(&self) -> bool;
    fn add_window(&mut self, client: ClientId, actor: ActorId);
    fn remove_window(&mut self, client: ClientId);
    /// Animate from the full-size app down to its thumbnail.
    fn zoom_out(&mut self, actor: ActorId);
    fn scroll_to_top(&mut self);
    /// A transition into or out of the switcher finished.
    fn transition_done(&mut self, state: RenderState);
}

pub trait Home {
    fn update_layout(&mut self, state: RenderState, screen: Rect);
    fn set_edit_mode(&mut self, editing: bool);
}

pub trait Launcher {
    fn is_submenu_open(&self) -> bool;
    fn update_layout(&mut self, screen: Rect);
}

pub trait TitleBar {
    fn update_layout(&mut self, state: RenderState, screen: Rect);
    /// Buttons as laid out by the last `update_layout`.
    fn chrome(&self) -> Chrome;
    fn set_attention(&mut self, attention: bool);
}

pub struct Collaborators {
    pub navigator: Box<dyn TaskNavigator>,
    pub home: Box<dyn Home>,
    pub launcher: Box<dyn Launcher>,
    pub title_bar: Box<dyn TitleBar>,
}

impl Collaborators {
    pub fn headless(layout: &LayoutConfig) -> Self {
        Self {
            navigator: Box::new(HeadlessNavigator::default()),
            home: Box::new(HeadlessHome::default()),
            launcher: Box::new(HeadlessLauncher::default()),
            title_bar: Box::new(HeadlessTitleBar::new(layout.clone())),
        }
    }
}

#[derive(Debug, Default)]
pub struct HeadlessNavigator {
    windows: Vec<ClientId>,
    pub unseen_notifications: bool,
}

impl TaskNavigator for HeadlessNavigator {
    fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn has_unseen_notifications(&self) -> bool {
        self.unseen_notifications
    }

    fn add_window(&mut self, client: ClientId, _actor: ActorId) {
        if !self.windows.contains(&client) {
            self.windows.push(client);
        }
    }

    fn remove_window(&mut self, client: ClientId) {
        self.windows.retain(|c| *c != client);
    }

    fn zoom_out(&mut self, actor: ActorId) {
        debug!(?actor, "Zooming out to thumbnail");
    }

    fn scroll_to_top(&mut self) {
        debug!("Scrolled to top");
    }

    fn transition_done(&mut self, state: RenderState) {
        debug!(?state, "Switcher transition done");
    }
}

#[derive(Debug, Default)]
pub struct HeadlessHome {
    editing: bool,
}

impl Home for HeadlessHome {
    fn update_layout(&mut self, state: RenderState, screen: Rect) {
        debug!(?state, ?screen, editing = self.editing, "Home layout");
    }

    fn set_edit_mode(&mut self, editing: bool) {
        self.editing = editing;
    }
}

#[derive(Debug, Default)]
pub struct HeadlessLauncher {
    pub submenu_open: bool,
}

impl Launcher for HeadlessLauncher {
    fn is_submenu_open(&self) -> bool {
        self.submenu_open
    }

    fn update_layout(&mut self, screen: Rect) {
        debug!(?screen, "Launcher layout");
    }
}

/// Title bar using the stock button layout
#[derive(Debug)]
pub struct HeadlessTitleBar {
    layout: LayoutConfig,
    chrome: Chrome,
    attention: bool,
}

impl HeadlessTitleBar {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            chrome: Chrome::default(),
            attention: false,
        }
    }

    pub fn attention(&self) -> bool {
        self.attention
    }
}

impl TitleBar for HeadlessTitleBar {
    fn update_layout(&mut self, state: RenderState, screen: Rect) {
        self.chrome = Chrome::for_state(state, &self.layout, screen);
    }

    fn chrome(&self) -> Chrome {
        self.chrome
    }

    fn set_attention(&mut self, attention: bool) {
        self.attention = attention;
    }
}
