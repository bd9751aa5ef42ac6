use std::fmt;

use crate::geometry::{clip, rect, Rect};
use crate::scene::ActorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Window type tag reported by the window manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    App,
    Dialog,
    Menu,
    Note,
    /// The home screen; marks where the shell's part of the stack starts
    Desktop,
    Applet,
    /// Animated wallpaper drawn as a client
    LiveBackground,
    StatusArea,
    /// Preview bubble of an incoming call or message
    IncomingEvent,
    Keyboard,
}

/// Where a client's actor goes during a stacking pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Into the blurred group, in stack order
    Blurred,
    /// Into the always-on-top group
    Front,
}

/// Coarse layer a kind lives in, used to order the window manager's stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StackingLayer {
    Desktop,
    Normal,
    Transient,
    AlwaysOnTop,
}

impl ClientKind {
    /// Geometry the shell grants for a requested rectangle. Maximized apps
    /// get `work_area`, the screen below the title bar.
    pub fn request_geometry(self, requested: Rect, screen: Rect, work_area: Rect, maximized: bool) -> Rect {
        match self {
            Self::Desktop | Self::LiveBackground => screen,
            Self::App if maximized => work_area,
            // Full width, glued to the bottom edge, at most the screen height.
            Self::Dialog | Self::Keyboard => {
                let h = requested.size.h.clamp(1, screen.size.h);
                rect(screen.loc.x, screen.loc.y + screen.size.h - h, screen.size.w, h)
            }
            _ => clip(requested, screen).unwrap_or(requested),
        }
    }

    pub fn stacking_layer(self) -> StackingLayer {
        match self {
            Self::Desktop | Self::LiveBackground | Self::Applet => StackingLayer::Desktop,
            Self::App => StackingLayer::Normal,
            Self::Dialog | Self::Menu | Self::Note | Self::Keyboard => StackingLayer::Transient,
            Self::StatusArea | Self::IncomingEvent => StackingLayer::AlwaysOnTop,
        }
    }

    pub fn on_stack(self) -> Placement {
        match self.stacking_layer() {
            StackingLayer::AlwaysOnTop => Placement::Front,
            _ => Placement::Blurred,
        }
    }

    /// Drawn with an alpha channel unless it is one of the full-cover kinds.
    pub fn default_opaque(self) -> bool {
        matches!(self, Self::App | Self::Desktop | Self::LiveBackground)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Dialog => "dialog",
            Self::Menu => "menu",
            Self::Note => "note",
            Self::Desktop => "desktop",
            Self::Applet => "applet",
            Self::LiveBackground => "live-background",
            Self::StatusArea => "status-area",
            Self::IncomingEvent => "incoming-event",
            Self::Keyboard => "keyboard",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "app" => Self::App,
            "dialog" => Self::Dialog,
            "menu" => Self::Menu,
            "note" => Self::Note,
            "desktop" => Self::Desktop,
            "applet" => Self::Applet,
            "live-background" => Self::LiveBackground,
            "status-area" => Self::StatusArea,
            "incoming-event" => Self::IncomingEvent,
            "keyboard" => Self::Keyboard,
            _ => return None,
        })
    }
}

/// A window as the window manager reports it
#[derive(Debug, Clone)]
pub struct Client {
    pub id: ClientId,
    pub kind: ClientKind,
    pub geometry: Rect,
    pub maximized: bool,
    /// Covers the title bar as well
    pub fullscreen: bool,
    /// Must receive all input until dismissed
    pub modal_blocker: bool,
    pub skip_taskbar: bool,
    /// Places and shows its own actor; stacking passes leave it alone
    pub self_managed: bool,
    /// Unmapped by the client, waiting for the removal animation
    pub unmap_pending: bool,
    pub opaque: bool,
    /// Virtual desktop the client belongs to
    pub desktop: u32,
    pub actor: Option<ActorId>,
}

impl Client {
    pub fn new(id: ClientId, kind: ClientKind, geometry: Rect) -> Self {
        Self {
            id,
            kind,
            geometry,
            maximized: false,
            fullscreen: false,
            modal_blocker: false,
            skip_taskbar: false,
            self_managed: false,
            unmap_pending: false,
            opaque: kind.default_opaque(),
            desktop: 0,
            actor: None,
        }
    }

    pub fn maximized(mut self) -> Self {
        self.maximized = true;
        self
    }

    pub fn fullscreen(mut self) -> Self {
        self.maximized = true;
        self.fullscreen = true;
        self
    }

    pub fn modal(mut self) -> Self {
        self.modal_blocker = true;
        self
    }

    /// Geometry granted for `requested`.
    pub fn granted_geometry(&self, requested: Rect, screen: Rect, work_area: Rect) -> Rect {
        let area = if self.fullscreen { screen } else { work_area };
        self.kind.request_geometry(requested, screen, area, self.maximized)
    }

    /// Shows up in the task switcher.
    pub fn is_manageable(&self) -> bool {
        self.kind == ClientKind::App && !self.skip_taskbar && !self.unmap_pending
    }
}

/// The window manager's clients in stacking order (bottom to top)
#[derive(Debug, Default)]
pub struct ClientStack {
    clients: Vec<Client>,
    next_id: u32,
    desktop_raised: bool,
}

fn layer_rank(kind: ClientKind, desktop_raised: bool) -> u8 {
    match kind.stacking_layer() {
        StackingLayer::Desktop if desktop_raised => 2,
        StackingLayer::Desktop => 0,
        StackingLayer::Normal => 1,
        StackingLayer::Transient => 3,
        StackingLayer::AlwaysOnTop => 4,
    }
}

impl ClientStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&mut self) -> ClientId {
        self.next_id += 1;
        ClientId(self.next_id)
    }

    /// Add on top of its stacking layer.
    pub fn push(&mut self, client: Client) {
        let raised = self.desktop_raised;
        let rank = layer_rank(client.kind, raised);
        let at = self
            .clients
            .iter()
            .rposition(|c| layer_rank(c.kind, raised) <= rank)
            .map_or(0, |i| i + 1);
        self.clients.insert(at, client);
    }

    /// Whether the home layer sits above application windows, as it does
    /// while the home screen or a shell view is up.
    pub fn set_desktop_raised(&mut self, raised: bool) {
        if self.desktop_raised == raised {
            return;
        }
        self.desktop_raised = raised;
        self.clients.sort_by_key(|c| layer_rank(c.kind, raised));
    }

    pub fn desktop_raised(&self) -> bool {
        self.desktop_raised
    }

    pub fn remove(&mut self, id: ClientId) -> Option<Client> {
        let pos = self.clients.iter().position(|c| c.id == id)?;
        Some(self.clients.remove(pos))
    }

    /// Raise within the client's stacking layer.
    pub fn raise(&mut self, id: ClientId) -> bool {
        match self.remove(id) {
            Some(client) => {
                self.push(client);
                true
            }
            None => false,
        }
    }

    /// Lower to the bottom of the client's stacking layer.
    pub fn lower(&mut self, id: ClientId) -> bool {
        let Some(client) = self.remove(id) else {
            return false;
        };
        let raised = self.desktop_raised;
        let rank = layer_rank(client.kind, raised);
        let at = self
            .clients
            .iter()
            .position(|c| layer_rank(c.kind, raised) >= rank)
            .unwrap_or(self.clients.len());
        self.clients.insert(at, client);
        true
    }

    pub fn get(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.id == id)
    }

    pub fn by_actor(&self, actor: ActorId) -> Option<&Client> {
        self.clients.iter().find(|c| c.actor == Some(actor))
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Client> {
        self.clients.iter()
    }

    pub fn top_down(&self) -> impl Iterator<Item = &Client> {
        self.clients.iter().rev()
    }

    pub fn has_modal_blocker(&self) -> bool {
        self.clients.iter().any(|c| c.modal_blocker && !c.unmap_pending)
    }

    pub fn manageable_count(&self) -> usize {
        self.clients.iter().filter(|c| c.is_manageable()).count()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
