//! Which parts of the screen take pointer and key input.

use crate::blur::BlurFlags;
use crate::config::LayoutConfig;
use crate::geometry::{clip, is_degenerate, rect, Rect};
use crate::render_state::RenderState;
use crate::scene::SceneGraph;
use crate::window::{ClientKind, ClientStack};

/// Union of rectangles
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InputRegion {
    rects: Vec<Rect>,
}

impl InputRegion {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn full(screen: Rect) -> Self {
        let mut region = Self::empty();
        region.union(screen);
        region
    }

    pub fn union(&mut self, r: Rect) {
        if !is_degenerate(&r) {
            self.rects.push(r);
        }
    }

    pub fn subtract(&mut self, hole: Rect) {
        if is_degenerate(&hole) {
            return;
        }
        self.rects = self
            .rects
            .drain(..)
            .flat_map(|r| r.subtract_rect(hole))
            .filter(|r| !is_degenerate(r))
            .collect();
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rects.iter().any(|r| r.contains((x, y)))
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Title bar elements currently shown, `None` when hidden
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Chrome {
    pub left_button: Option<Rect>,
    pub right_button: Option<Rect>,
    pub edit_button: Option<Rect>,
    pub status_area: Option<Rect>,
}

impl Chrome {
    /// Stock title bar layout for `state`.
    pub fn for_state(state: RenderState, layout: &LayoutConfig, screen: Rect) -> Self {
        if state.is_non_composited() || state == RenderState::Undefined {
            return Self::default();
        }
        let h = layout.title_bar_height;
        let bw = layout.button_width;
        let x = screen.loc.x;
        let w = screen.size.w;
        Self {
            left_button: Some(rect(x, screen.loc.y, bw, h)),
            right_button: Some(rect(x + w - bw, screen.loc.y, bw, h)),
            edit_button: (state.is_home() && !state.is_edit())
                .then(|| rect(x + w - 2 * bw, screen.loc.y, bw, h)),
            status_area: Some(rect(x + bw, screen.loc.y, layout.status_area_width, h)),
        }
    }
}

/// Everything [`build`] looks at
#[derive(Debug, Clone, Copy)]
pub struct ViewportInputs<'a> {
    pub state: RenderState,
    pub flags: BlurFlags,
    pub chrome: &'a Chrome,
    pub clients: &'a ClientStack,
    pub scene: &'a SceneGraph,
    pub screen: Rect,
    /// Input is swallowed until a new window maps
    pub blocking_input: bool,
}

pub fn build(inputs: &ViewportInputs<'_>) -> InputRegion {
    let ViewportInputs {
        state,
        flags,
        chrome,
        clients,
        scene,
        screen,
        blocking_input,
    } = *inputs;

    // The modal window grabs input on its own.
    if clients.has_modal_blocker() {
        return InputRegion::empty();
    }
    if state.needs_whole_screen_input() || blocking_input {
        return InputRegion::full(screen);
    }

    let mut region = InputRegion::empty();
    let mut add = |r: Option<Rect>| {
        if let Some(r) = r.and_then(|r| clip(r, screen)) {
            region.union(r);
        }
    };
    add(chrome.left_button);
    if !state.is_app() {
        add(chrome.right_button);
    }
    add(chrome.edit_button);
    if (state.is_app() && flags.contains(BlurFlags::BLUR_BACKGROUND)) || state.is_portrait() {
        add(chrome.status_area);
    }

    let shown = |kind: ClientKind| {
        clients.iter().filter(move |c| {
            c.kind == kind
                && !c.unmap_pending
                && c.actor.is_some_and(|a| scene.is_mapped(a))
        })
    };

    if state.protects_foreground_dialogs() {
        for client in shown(ClientKind::Note).chain(shown(ClientKind::Dialog)) {
            region.subtract(client.geometry);
        }
    }
    if state.captures_applets() {
        for client in clients.iter().filter(|c| {
            c.kind == ClientKind::Applet && !c.unmap_pending && c.actor.is_some()
        }) {
            if let Some(r) = clip(client.geometry, screen) {
                region.union(r);
            }
        }
    }
    for client in shown(ClientKind::IncomingEvent) {
        if let Some(r) = clip(client.geometry, screen) {
            region.union(r);
        }
    }

    region
}

/// Pending and committed input regions
#[derive(Debug, Default)]
pub struct InputViewport {
    pending: Option<InputRegion>,
    committed: Option<InputRegion>,
}

impl InputViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly built region. Returns whether it still has to be
    /// committed.
    pub fn set_pending(&mut self, region: InputRegion) -> bool {
        let differs = self.committed.as_ref() != Some(&region);
        self.pending = Some(region);
        differs
    }

    /// Promote the pending region if it differs from the committed one.
    pub fn take_commit(&mut self) -> Option<InputRegion> {
        let pending = self.pending.take()?;
        if self.committed.as_ref() == Some(&pending) {
            return None;
        }
        self.committed = Some(pending.clone());
        Some(pending)
    }

    pub fn pending(&self) -> Option<&InputRegion> {
        self.pending.as_ref()
    }

    pub fn committed(&self) -> Option<&InputRegion> {
        self.committed.as_ref()
    }
}
