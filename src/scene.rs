//! Retained scene graph the compositor draws from.
//!
//! Actors live in an arena keyed by [`ActorId`]. Groups hold their children
//! bottom-to-top; the stage is the root group. Operations on ids that are no
//! longer part of the scene are ignored.

use std::collections::HashMap;

use tracing::trace;

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u32);

/// How much of a cached post-processed image must be redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CacheUpdate {
    Clean,
    /// Parameters changed; the renderer may reuse what it can
    Hinted,
    /// Contents changed; redraw from scratch
    Full,
}

/// Blur/dim/zoom applied to everything inside a group
#[derive(Debug, Clone, PartialEq)]
pub struct PostProcess {
    pub radius: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub zoom: f32,
    update: CacheUpdate,
}

impl PostProcess {
    fn new() -> Self {
        Self {
            radius: 0.0,
            saturation: 1.0,
            brightness: 1.0,
            zoom: 1.0,
            update: CacheUpdate::Clean,
        }
    }

    pub fn set_params(&mut self, radius: f32, saturation: f32, brightness: f32, zoom: f32) {
        let changed = self.radius != radius
            || self.saturation != saturation
            || self.brightness != brightness
            || self.zoom != zoom;
        self.radius = radius;
        self.saturation = saturation;
        self.brightness = brightness;
        self.zoom = zoom;
        if changed {
            self.update = self.update.max(CacheUpdate::Hinted);
        }
    }

    pub fn invalidate(&mut self) {
        self.update = CacheUpdate::Full;
    }

    pub fn pending_update(&self) -> CacheUpdate {
        self.update
    }

    /// Hand the pending update to the renderer.
    pub fn take_update(&mut self) -> CacheUpdate {
        std::mem::replace(&mut self.update, CacheUpdate::Clean)
    }
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub geometry: Rect,
    pub visible: bool,
    pub opacity: f32,
    pub scale: f32,
    /// Fully covers its geometry; occludes what is below it
    pub opaque: bool,
    /// Leave visibility alone, e.g. while a removal animation plays
    pub retain_visibility: bool,
    group: bool,
    parent: Option<ActorId>,
    children: Vec<ActorId>,
    post_process: Option<PostProcess>,
}

#[derive(Debug)]
pub struct SceneGraph {
    actors: HashMap<ActorId, Actor>,
    next_id: u32,
    stage: ActorId,
}

impl SceneGraph {
    pub fn new(screen: Rect) -> Self {
        let mut scene = Self {
            actors: HashMap::new(),
            next_id: 0,
            stage: ActorId(0),
        };
        scene.stage = scene.insert("stage", screen, true, None);
        scene
    }

    pub fn stage(&self) -> ActorId {
        self.stage
    }

    fn insert(&mut self, name: &str, geometry: Rect, group: bool, parent: Option<ActorId>) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.actors.insert(
            id,
            Actor {
                name: name.to_string(),
                geometry,
                visible: true,
                opacity: 1.0,
                scale: 1.0,
                opaque: false,
                retain_visibility: false,
                group,
                parent: None,
                children: Vec::new(),
                post_process: None,
            },
        );
        if let Some(parent) = parent {
            self.reparent(id, parent);
        }
        id
    }

    pub fn add_group(&mut self, name: &str, parent: ActorId) -> ActorId {
        let geometry = self.actors[&self.stage].geometry;
        self.insert(name, geometry, true, Some(parent))
    }

    /// New leaf actor on top of the stage.
    pub fn add_actor(&mut self, name: &str, geometry: Rect, opaque: bool) -> ActorId {
        let id = self.insert(name, geometry, false, Some(self.stage));
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.opaque = opaque;
        }
        id
    }

    /// Destroy an actor and everything below it.
    pub fn remove(&mut self, id: ActorId) {
        if id == self.stage {
            return;
        }
        self.detach(id);
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            if let Some(actor) = self.actors.remove(&id) {
                pending.extend(actor.children);
            }
        }
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn parent(&self, id: ActorId) -> Option<ActorId> {
        self.actors.get(&id).and_then(|a| a.parent)
    }

    /// Children bottom-to-top; empty for leaves and unknown ids.
    pub fn children(&self, id: ActorId) -> &[ActorId] {
        self.actors.get(&id).map(|a| a.children.as_slice()).unwrap_or(&[])
    }

    pub fn is_ancestor(&self, ancestor: ActorId, mut id: ActorId) -> bool {
        while let Some(parent) = self.parent(id) {
            if parent == ancestor {
                return true;
            }
            id = parent;
        }
        false
    }

    fn detach(&mut self, id: ActorId) {
        let Some(parent) = self.actors.get_mut(&id).and_then(|a| a.parent.take()) else {
            return;
        };
        if let Some(parent) = self.actors.get_mut(&parent) {
            parent.children.retain(|c| *c != id);
        }
    }

    /// Move `id` into `group`, on top of its current children.
    pub fn reparent(&mut self, id: ActorId, group: ActorId) {
        if id == group || !self.contains(id) || !self.contains(group) || self.is_ancestor(id, group) {
            trace!(?id, ?group, "reparent ignored");
            return;
        }
        self.detach(id);
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.parent = Some(group);
        }
        if let Some(group) = self.actors.get_mut(&group) {
            group.children.push(id);
        }
    }

    fn reposition(&mut self, id: ActorId, place: impl FnOnce(&mut Vec<ActorId>)) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(parent) = self.actors.get_mut(&parent) {
            parent.children.retain(|c| *c != id);
            place(&mut parent.children);
        }
    }

    pub fn raise_to_top(&mut self, id: ActorId) {
        self.reposition(id, |children| children.push(id));
    }

    pub fn lower_to_bottom(&mut self, id: ActorId) {
        self.reposition(id, |children| children.insert(0, id));
    }

    /// Restack `id` directly above `sibling`, joining the sibling's group.
    pub fn place_above(&mut self, id: ActorId, sibling: ActorId) {
        let Some(group) = self.parent(sibling) else {
            return;
        };
        if self.parent(id) != Some(group) {
            self.reparent(id, group);
        }
        self.reposition(id, |children| {
            let at = children
                .iter()
                .position(|c| *c == sibling)
                .map_or(children.len(), |i| i + 1);
            children.insert(at, id);
        });
    }

    pub fn is_visible(&self, id: ActorId) -> bool {
        self.actors.get(&id).is_some_and(|a| a.visible)
    }

    /// Visible itself and through every ancestor.
    pub fn is_mapped(&self, mut id: ActorId) -> bool {
        loop {
            let Some(actor) = self.actors.get(&id) else {
                return false;
            };
            if !actor.visible {
                return false;
            }
            match actor.parent {
                Some(parent) => id = parent,
                None => return id == self.stage,
            }
        }
    }

    pub fn set_visible(&mut self, id: ActorId, visible: bool) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.visible = visible;
        }
    }

    pub fn show(&mut self, id: ActorId) {
        self.set_visible(id, true);
    }

    pub fn hide(&mut self, id: ActorId) {
        self.set_visible(id, false);
    }

    pub fn opacity(&self, id: ActorId) -> f32 {
        self.actors.get(&id).map_or(0.0, |a| a.opacity)
    }

    pub fn set_opacity(&mut self, id: ActorId, opacity: f32) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    pub fn scale(&self, id: ActorId) -> f32 {
        self.actors.get(&id).map_or(1.0, |a| a.scale)
    }

    pub fn set_scale(&mut self, id: ActorId, scale: f32) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.scale = scale;
        }
    }

    pub fn geometry(&self, id: ActorId) -> Option<Rect> {
        self.actors.get(&id).map(|a| a.geometry)
    }

    pub fn set_geometry(&mut self, id: ActorId, geometry: Rect) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.geometry = geometry;
        }
    }

    pub fn enable_post_process(&mut self, group: ActorId) {
        if let Some(actor) = self.actors.get_mut(&group) {
            actor.post_process.get_or_insert_with(PostProcess::new);
        }
    }

    pub fn post_process(&self, group: ActorId) -> Option<&PostProcess> {
        self.actors.get(&group).and_then(|a| a.post_process.as_ref())
    }

    pub fn post_process_mut(&mut self, group: ActorId) -> Option<&mut PostProcess> {
        self.actors.get_mut(&group).and_then(|a| a.post_process.as_mut())
    }

    /// Leaf actors under `root` in paint order, bottom-to-top.
    pub fn leaves(&self, root: ActorId) -> Vec<ActorId> {
        let mut out = Vec::new();
        self.collect_leaves(root, &mut out);
        out
    }

    fn collect_leaves(&self, id: ActorId, out: &mut Vec<ActorId>) {
        let Some(actor) = self.actors.get(&id) else {
            return;
        };
        if !actor.group {
            out.push(id);
            return;
        }
        for child in &actor.children {
            self.collect_leaves(*child, out);
        }
    }

    /// Indented dump of the tree, for the console.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.describe_into(self.stage, 0, &mut out);
        out
    }

    fn describe_into(&self, id: ActorId, depth: usize, out: &mut String) {
        let Some(actor) = self.actors.get(&id) else {
            return;
        };
        let g = actor.geometry;
        out.push_str(&format!(
            "{:indent$}{} #{} {}x{}+{}+{}{}{} opacity={:.2} scale={:.2}\n",
            "",
            actor.name,
            id.0,
            g.size.w,
            g.size.h,
            g.loc.x,
            g.loc.y,
            if actor.visible { "" } else { " hidden" },
            if actor.opaque { " opaque" } else { "" },
            actor.opacity,
            actor.scale,
            indent = depth * 2,
        ));
        // Topmost first, like a stacking list.
        for child in actor.children.iter().rev() {
            self.describe_into(*child, depth + 1, out);
        }
    }
}
