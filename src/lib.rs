//! frostwm: the render manager of a touch-device compositing shell.
//!
//! [`RenderManager`] owns the scene graph and drives blur, stacking,
//! occlusion culling and input shaping for each [`RenderState`].

pub mod blur;
pub mod collaborators;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input_viewport;
pub mod range;
pub mod render_manager;
pub mod render_state;
pub mod scene;
pub mod scheduler;
pub mod stacking;
pub mod timeline;
pub mod visibility;
pub mod window;

pub use blur::BlurFlags;
pub use config::{Config, LiveConfig};
pub use error::ShellError;
pub use events::ShellEvent;
pub use render_manager::RenderManager;
pub use render_state::RenderState;
