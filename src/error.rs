use thiserror::Error;

use crate::render_state::RenderState;
use crate::scene::ActorId;
use crate::window::ClientId;

/// Conditions the shell core absorbs and logs instead of surfacing
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShellError {
    #[error("transition to {requested:?} dropped: transition to {current:?} still in progress")]
    Reentrant {
        requested: RenderState,
        current: RenderState,
    },

    #[error("unknown client {0}")]
    UnknownClient(ClientId),

    #[error("client {0} has no scene actor yet")]
    MissingActor(ClientId),

    #[error("actor {0:?} is not part of the scene")]
    StaleActor(ActorId),

    #[error("unknown tunable `{0}`")]
    UnknownTunable(String),

    #[error("tunable `{name}` rejects value {value}")]
    InvalidTunable { name: String, value: f64 },
}
