use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::geometry::Rect;
use crate::input_viewport::InputRegion;
use crate::window::ClientId;

/// Display-server surfaces that carry an input shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The compositor overlay window
    Overlay,
    /// The native window backing the stage
    Stage,
}

/// Requests sent to the display server. None of them are assumed to have
/// taken effect when the call returns.
pub trait DisplayLayer {
    fn set_input_region(&mut self, surface: Surface, region: &InputRegion);
    fn set_geometry(&mut self, client: ClientId, geometry: Rect);
    fn raise(&mut self, client: ClientId);
    fn lower(&mut self, client: ClientId);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayRequest {
    InputRegion(Surface, InputRegion),
    Geometry(ClientId, Rect),
    Raise(ClientId),
    Lower(ClientId),
}

/// Shared record of everything sent to a [`HeadlessDisplay`]
pub type DisplayLog = Rc<RefCell<Vec<DisplayRequest>>>;

/// Display layer with no server behind it
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    log: DisplayLog,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle onto the request log, still readable after the display is
    /// boxed into the render manager.
    pub fn log(&self) -> DisplayLog {
        Rc::clone(&self.log)
    }
}

impl DisplayLayer for HeadlessDisplay {
    fn set_input_region(&mut self, surface: Surface, region: &InputRegion) {
        info!(?surface, rects = region.rects().len(), "Input region set");
        self.log
            .borrow_mut()
            .push(DisplayRequest::InputRegion(surface, region.clone()));
    }

    fn set_geometry(&mut self, client: ClientId, geometry: Rect) {
        debug!(%client, ?geometry, "Geometry requested");
        self.log.borrow_mut().push(DisplayRequest::Geometry(client, geometry));
    }

    fn raise(&mut self, client: ClientId) {
        debug!(%client, "Raise requested");
        self.log.borrow_mut().push(DisplayRequest::Raise(client));
    }

    fn lower(&mut self, client: ClientId) {
        debug!(%client, "Lower requested");
        self.log.borrow_mut().push(DisplayRequest::Lower(client));
    }
}
