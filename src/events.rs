use crate::input_viewport::InputRegion;
use crate::render_manager::RenderManager;
use crate::render_state::RenderState;
use crate::scene::ActorId;

/// Notifications sent to observers of the render manager
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// Sent from the before-pass, once the new state is current
    StateChanging { from: RenderState, to: RenderState },
    /// The animation for `state` finished and the after-pass ran
    TransitionComplete { state: RenderState },
    InputRegionCommitted(InputRegion),
    StackingChanged { cutover: Option<ActorId> },
}

/// Observers get the render manager back, so they may call into it. State
/// changes requested while a transition is running are dropped.
pub type Observer = Box<dyn FnMut(&mut RenderManager, &ShellEvent)>;
