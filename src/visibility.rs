//! Occlusion culling.
//!
//! Only blockers that span an actor's whole width take part: shell chrome
//! and application windows are laid out edge to edge horizontally, so
//! vertical clipping is enough to tell what is hidden.

use crate::geometry::{bottom, clip, rect, spans_horizontally, Rect};
use crate::scene::{ActorId, SceneGraph};

/// Whether any part of `r` survives the screen edges and `blockers`.
pub fn is_visible(r: Rect, screen: Rect, blockers: &[Rect]) -> bool {
    match clip(r, screen) {
        Some(r) => visible_below(r, blockers),
        None => false,
    }
}

fn visible_below(mut r: Rect, blockers: &[Rect]) -> bool {
    for (i, blocker) in blockers.iter().enumerate() {
        if !spans_horizontally(blocker, &r) {
            continue;
        }
        let (top, bot) = (r.loc.y, bottom(&r));
        let (btop, bbot) = (blocker.loc.y, bottom(blocker));
        if btop >= bot || bbot <= top {
            continue;
        }
        if btop <= top && bbot >= bot {
            return false;
        }
        if btop > top && bbot < bot {
            // Split: the upper remainder only has the remaining blockers left.
            let upper = rect(r.loc.x, top, r.size.w, btop - top);
            if visible_below(upper, &blockers[i + 1..]) {
                return true;
            }
            r = rect(r.loc.x, bbot, r.size.w, bot - bbot);
        } else if btop <= top {
            r = rect(r.loc.x, bbot, r.size.w, bot - bbot);
        } else {
            r = rect(r.loc.x, top, r.size.w, btop - top);
        }
    }
    true
}

/// Result of one top-to-bottom culling walk
#[derive(Debug, Default, Clone)]
pub struct VisibilityPass {
    /// Opaque, visible rectangles in the order they were found
    pub blockers: Vec<Rect>,
    pub shown: Vec<ActorId>,
    pub hidden: Vec<ActorId>,
}

impl VisibilityPass {
    /// Nothing below the blockers found so far can be seen.
    pub fn screen_covered(&self, screen: Rect) -> bool {
        !is_visible(screen, screen, &self.blockers)
    }
}

/// Walk `actors` from the top of the paint order down, showing what can be
/// seen and hiding the rest. Visible opaque actors occlude those below.
pub fn compute_pass(scene: &mut SceneGraph, actors_top_to_bottom: &[ActorId], screen: Rect) -> VisibilityPass {
    let mut pass = VisibilityPass::default();
    walk(scene, actors_top_to_bottom, screen, &mut pass);
    pass
}

/// Continue an existing pass further down the paint order.
pub fn walk(scene: &mut SceneGraph, actors_top_to_bottom: &[ActorId], screen: Rect, pass: &mut VisibilityPass) {
    for &id in actors_top_to_bottom {
        let Some(actor) = scene.actor(id) else {
            continue;
        };
        if actor.retain_visibility {
            continue;
        }
        let geometry = actor.geometry;
        let opaque = actor.opaque && actor.opacity >= 1.0;
        let visible = actor.opacity > 0.0 && is_visible(geometry, screen, &pass.blockers);
        scene.set_visible(id, visible);
        if visible {
            pass.shown.push(id);
            if opaque {
                if let Some(clipped) = clip(geometry, screen) {
                    pass.blockers.push(clipped);
                }
            }
        } else {
            pass.hidden.push(id);
        }
    }
}
