//! Mirror the window manager's client stack into the scene graph.
//!
//! Membership of the blurred and crisp groups is rebuilt from scratch on
//! every pass rather than patched.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::geometry::{is_bottom_dialog, Rect};
use crate::scene::{ActorId, SceneGraph};
use crate::window::{ClientKind, ClientStack, Placement};

/// The render manager's top-level groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Groups {
    /// Post-processed: home, applets and app windows below the cutover
    pub home_blur: ActorId,
    pub task_switcher: ActorId,
    /// Always crisp: the cutover window and everything above it
    pub app_top: ActorId,
    /// Always on top: status area and event previews
    pub front: ActorId,
    /// Floating chrome, inside or outside the blurred group
    pub blur_front: ActorId,
}

impl Groups {
    /// Build the group hierarchy on the stage, bottom to top.
    pub fn create(scene: &mut SceneGraph) -> Self {
        let stage = scene.stage();
        let home_blur = scene.add_group("home_blur", stage);
        scene.enable_post_process(home_blur);
        let task_switcher = scene.add_group("task_switcher", stage);
        scene.set_opacity(task_switcher, 0.0);
        scene.hide(task_switcher);
        let app_top = scene.add_group("app_top", stage);
        let front = scene.add_group("front", stage);
        let blur_front = scene.add_group("blur_front", home_blur);
        Self {
            home_blur,
            task_switcher,
            app_top,
            front,
            blur_front,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StackingOutcome {
    /// Lowest actor promoted to the crisp group
    pub cutover: Option<ActorId>,
    /// The cutover was found by the dialog signature, not by maximization
    pub cutover_is_dialog: bool,
    /// Applet actors placed in this pass
    pub applets: Vec<ActorId>,
}

#[derive(Debug, Default)]
pub struct StackingSync {
    snapshot: Vec<ActorId>,
    live_background: Option<ActorId>,
    /// Parking groups for leaving clients, one per virtual desktop
    neutral: HashMap<u32, ActorId>,
}

impl StackingSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_background(&self) -> Option<ActorId> {
        self.live_background
    }

    pub fn neutral_container(&self, desktop: u32) -> Option<ActorId> {
        self.neutral.get(&desktop).copied()
    }

    fn neutral_group(&mut self, scene: &mut SceneGraph, groups: &Groups, desktop: u32) -> ActorId {
        if let Some(&group) = self.neutral.get(&desktop) {
            if scene.contains(group) {
                return group;
            }
        }
        let group = scene.add_group(&format!("desktop-{desktop}"), scene.stage());
        scene.place_above(group, groups.home_blur);
        self.neutral.insert(desktop, group);
        group
    }

    /// Rebuild group membership from `clients` (bottom to top).
    pub fn restack(
        &mut self,
        clients: &ClientStack,
        scene: &mut SceneGraph,
        groups: &Groups,
        screen: Rect,
        blur_front_inside: bool,
    ) -> StackingOutcome {
        let mut outcome = StackingOutcome::default();

        // Everything promoted last time starts back in the blurred group.
        let promoted: Vec<ActorId> = scene.children(groups.app_top).to_vec();
        for &actor in promoted.iter().rev() {
            if clients.by_actor(actor).is_some() {
                scene.reparent(actor, groups.home_blur);
                scene.lower_to_bottom(actor);
            }
        }

        let mut placed = HashSet::new();
        let mut seen_desktop = false;
        let mut live_background = None;

        for client in clients.iter() {
            if !seen_desktop {
                if client.kind != ClientKind::Desktop {
                    continue;
                }
                seen_desktop = true;
            }
            if client.self_managed {
                continue;
            }
            let Some(actor) = client.actor.filter(|a| scene.contains(*a)) else {
                debug!(client = %client.id, "No actor yet, left out of stacking");
                continue;
            };
            if client.unmap_pending {
                let neutral = self.neutral_group(scene, groups, client.desktop);
                scene.reparent(actor, neutral);
                continue;
            }
            if client.kind.on_stack() == Placement::Front {
                scene.reparent(actor, groups.front);
                continue;
            }

            scene.reparent(actor, groups.home_blur);
            placed.insert(actor);
            match client.kind {
                ClientKind::LiveBackground => live_background = Some(actor),
                ClientKind::Applet => {
                    outcome.applets.push(actor);
                    if let Some(background) = live_background {
                        scene.raise_to_top(background);
                    }
                }
                _ => {}
            }
        }
        self.live_background = live_background;

        // Find the cutover from the top down.
        let children = scene.children(groups.home_blur).to_vec();
        let mut cutover = None;
        for (idx, &actor) in children.iter().enumerate().rev() {
            if !placed.contains(&actor) {
                continue;
            }
            let Some(client) = clients.by_actor(actor) else {
                continue;
            };
            if client.maximized {
                if cutover.is_none() {
                    cutover = Some(idx);
                }
                break;
            }
            if client.kind != ClientKind::Desktop && is_bottom_dialog(&client.geometry, &screen) {
                cutover = Some(idx);
                outcome.cutover_is_dialog = true;
            }
        }

        if let Some(idx) = cutover {
            for &actor in &children[idx..] {
                if placed.contains(&actor) {
                    scene.reparent(actor, groups.app_top);
                }
            }
            outcome.cutover = Some(children[idx]);
        }

        match outcome.cutover {
            Some(actor) if !blur_front_inside => scene.place_above(groups.blur_front, actor),
            _ => scene.reparent(groups.blur_front, groups.home_blur),
        }

        trace!(?outcome, "Restacked");
        outcome
    }

    /// Compare the shown members of the blurred group with the last call
    /// and drop the cached blur image if they differ. Must run after the
    /// visibility pass so it sees this frame's visibility.
    pub fn sync_blurred(&mut self, scene: &mut SceneGraph, groups: &Groups) -> bool {
        let blurred: Vec<ActorId> = scene
            .children(groups.home_blur)
            .iter()
            .copied()
            .filter(|a| scene.is_visible(*a))
            .collect();
        if blurred == self.snapshot {
            return false;
        }
        if let Some(pp) = scene.post_process_mut(groups.home_blur) {
            pp.invalidate();
        }
        debug!(members = blurred.len(), "Blurred group changed");
        self.snapshot = blurred;
        true
    }
}
