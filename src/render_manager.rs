//! The render state controller.
//!
//! [`RenderManager`] is the single owner of the scene, the client stack
//! and every effect applied to them. All shell events funnel into it, and
//! each transition runs in a fixed order: stacking, blur targets, the rest
//! of the before-pass, the animation, then the after-pass once the
//! animation completes.

use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::blur::{BlurEngine, BlurFlags, Layers};
use crate::collaborators::Collaborators;
use crate::config::LiveConfig;
use crate::display::{DisplayLayer, Surface};
use crate::error::ShellError;
use crate::events::{Observer, ShellEvent};
use crate::geometry::{rect, transposed, Rect};
use crate::input_viewport::{self, InputRegion, InputViewport, ViewportInputs};
use crate::render_state::RenderState;
use crate::scene::{ActorId, SceneGraph};
use crate::scheduler::{Task, TaskQueue};
use crate::stacking::{Groups, StackingOutcome, StackingSync};
use crate::visibility::{walk, VisibilityPass};
use crate::window::{Client, ClientId, ClientKind, ClientStack};

pub struct RenderManager {
    config: LiveConfig,
    scene: SceneGraph,
    clients: ClientStack,
    groups: Groups,
    blur: BlurEngine,
    stacking: StackingSync,
    outcome: StackingOutcome,
    viewport: InputViewport,
    tasks: TaskQueue,
    display: Box<dyn DisplayLayer>,
    collab: Collaborators,
    observers: Vec<Observer>,

    state: RenderState,
    previous: RenderState,
    /// Set while a transition runs synchronously; guards against re-entry
    in_transition: bool,
    transitions: u64,

    portrait: bool,
    screen: Rect,
    /// State to restore on unlock
    locked_state: Option<RenderState>,
    /// Applet actors found by the last stacking pass
    applets: Vec<ActorId>,
    blur_front_inside: bool,
    input_blocked_until: Option<Instant>,
    placeholder: Option<ActorId>,
}

impl RenderManager {
    pub fn new(config: LiveConfig, display: Box<dyn DisplayLayer>, collab: Collaborators) -> Self {
        let layout = config.snapshot().layout;
        let screen = rect(0, 0, layout.screen_width, layout.screen_height);
        let mut scene = SceneGraph::new(screen);
        let groups = Groups::create(&mut scene);
        Self {
            config,
            scene,
            clients: ClientStack::new(),
            groups,
            blur: BlurEngine::new(),
            stacking: StackingSync::new(),
            outcome: StackingOutcome::default(),
            viewport: InputViewport::new(),
            tasks: TaskQueue::new(),
            display,
            collab,
            observers: Vec::new(),
            state: RenderState::Undefined,
            previous: RenderState::Undefined,
            in_transition: false,
            transitions: 0,
            portrait: false,
            screen,
            locked_state: None,
            applets: Vec::new(),
            blur_front_inside: true,
            input_blocked_until: None,
            placeholder: None,
        }
    }

    /// Request `target`. Requests for the current state are ignored, and so
    /// are requests made while another transition is still being set up.
    pub fn set_state(&mut self, target: RenderState) {
        self.request(target, false);
    }

    /// Like [`set_state`](Self::set_state), but runs the transition even if
    /// `target` is already current.
    pub fn force_state(&mut self, target: RenderState) {
        self.request(target, true);
    }

    fn request(&mut self, target: RenderState, forced: bool) {
        if let Err(err) = self.try_transition(target, forced) {
            warn!(%err, "State change dropped");
        }
    }

    fn try_transition(&mut self, requested: RenderState, forced: bool) -> Result<(), ShellError> {
        if requested == self.state && !forced {
            trace!(state = ?requested, "Already current");
            return Ok(());
        }
        if self.in_transition {
            return Err(ShellError::Reentrant {
                requested,
                current: self.state,
            });
        }
        let target = self.resolve(requested);
        if target == self.state && !forced {
            debug!(?requested, ?target, "Resolved to the current state");
            return Ok(());
        }

        self.in_transition = true;
        self.transition(target);
        self.in_transition = false;
        Ok(())
    }

    /// Apply lock restoration, orientation and reachability to a request.
    fn resolve(&mut self, requested: RenderState) -> RenderState {
        let mut target = requested;

        if target == RenderState::AfterLock {
            target = self.locked_state.take().unwrap_or(self.state);
            let unreachable = target == RenderState::Undefined
                || (target.is_task_switcher() && self.collab.navigator.is_empty())
                || (target.is_app() && self.clients.manageable_count() == 0);
            if unreachable {
                target = target.home_for_orientation();
            }
            debug!(?target, "Restoring state from before the lock");
        }

        target = if !self.portrait {
            target.landscape_variant()
        } else if target.portrait_variant().is_some() {
            target.into_portrait()
        } else {
            target
        };

        if target.is_task_switcher() && self.clients.manageable_count() == 0 {
            info!(
                modal = self.clients.has_modal_blocker(),
                "No windows to switch between, going home"
            );
            target = target.home_for_orientation();
        }
        target
    }

    fn transition(&mut self, target: RenderState) {
        let previous = self.state;
        self.previous = previous;
        self.state = target;
        self.transitions += 1;
        info!(?previous, state = ?target, "Render state changing");

        if self.blur.is_running() {
            // The new targets start from wherever the old animation got to.
            self.blur.stop();
            self.tasks.cancel(Task::AnimationFrame);
        }

        self.emit(ShellEvent::StateChanging {
            from: previous,
            to: target,
        });
        let animate = self.before_pass(previous, target);
        if !self.start_animation(animate) {
            self.on_complete();
        }
    }

    /// Everything that has to happen before the first frame. Returns
    /// whether there is anything to animate.
    fn before_pass(&mut self, previous: RenderState, target: RenderState) -> bool {
        let screen = self.screen;
        self.collab.home.set_edit_mode(target.is_edit());
        self.collab.home.update_layout(target, screen);
        if target.is_launcher() {
            self.collab.launcher.update_layout(screen);
        }
        self.collab.title_bar.update_layout(target, screen);
        let attention = self.collab.navigator.has_unseen_notifications();
        self.collab.title_bar.set_attention(attention);

        self.scene.set_visible(self.groups.home_blur, target.shows_home_blur());
        self.scene.set_visible(self.groups.app_top, target.shows_app_top());
        self.scene.set_visible(self.groups.front, target.shows_front());

        if target.blur_flags().contains(BlurFlags::BLUR_HOME) && !self.blur_front_inside {
            self.blur_front_inside = true;
            self.scene.reparent(self.groups.blur_front, self.groups.home_blur);
        }

        self.clients.set_desktop_raised(!target.is_app());
        if previous == RenderState::Undefined || previous.is_app() != target.is_app() {
            self.restack();
        }

        if previous.is_app() && target.is_task_switcher() {
            self.zoom_out_foreground();
        }

        let flags = self.flags_for(target);
        let cfg = self.config.snapshot();
        let animate = self
            .blur
            .set_targets(flags, &cfg.blur, &mut self.scene, self.groups.home_blur);

        self.cull();
        self.rebuild_input_viewport();
        animate
    }

    fn start_animation(&mut self, animate: bool) -> bool {
        if !animate {
            debug!("Effects already at their targets, nothing to animate");
            return false;
        }
        // Read fresh: durations may have been reloaded since the last run.
        let duration = self
            .config
            .snapshot()
            .animation
            .duration_for(self.previous, self.state);
        self.blur.start(duration);
        self.tasks.schedule(Task::AnimationFrame);
        true
    }

    fn on_complete(&mut self) {
        self.blur.finish();
        self.apply_effects();
        self.after_pass();
        self.cull();
        self.rebuild_input_viewport();

        if self.state.is_task_switcher() || self.previous.is_task_switcher() {
            self.collab.navigator.transition_done(self.state);
        }
        info!(state = ?self.state, "Transition complete");
        self.emit(ShellEvent::TransitionComplete { state: self.state });
    }

    /// Placement that must wait until the blur is visually gone.
    fn after_pass(&mut self) {
        if self.blur_front_inside && !self.blur.flags().contains(BlurFlags::BLUR_HOME) {
            self.blur_front_inside = false;
            self.restack();
        }
        if let Some(placeholder) = self.blur.take_placeholder_if_idle() {
            self.scene.show(placeholder);
            debug!(?placeholder, "Loading placeholder shown");
        }
    }

    /// Fast-forward a running animation to its last frame.
    pub fn stop_transition(&mut self) {
        if !self.blur.is_running() {
            return;
        }
        info!(state = ?self.state, "Transition cut short");
        self.blur.stop();
        self.tasks.cancel(Task::AnimationFrame);
        self.blur.tick(1.0);
        self.on_complete();
    }

    /// Recompute effect targets for the current state, e.g. after the
    /// launcher opened a submenu or a dialog appeared over an app.
    pub fn update_effects(&mut self) {
        let flags = self.flags_for(self.state);
        if flags == self.blur.flags() {
            return;
        }
        debug!(?flags, "Effects changed without a state change");
        if flags.contains(BlurFlags::BLUR_HOME) && !self.blur_front_inside {
            self.blur_front_inside = true;
            self.scene.reparent(self.groups.blur_front, self.groups.home_blur);
        }
        if self.blur.is_running() {
            self.blur.stop();
            self.tasks.cancel(Task::AnimationFrame);
        }
        let cfg = self.config.snapshot();
        let animate = self
            .blur
            .set_targets(flags, &cfg.blur, &mut self.scene, self.groups.home_blur);
        if !self.start_animation(animate) {
            self.blur.finish();
            self.apply_effects();
        }
        self.rebuild_input_viewport();
    }

    fn flags_for(&self, state: RenderState) -> BlurFlags {
        let mut flags = state.blur_flags();
        if state.is_launcher() && self.collab.launcher.is_submenu_open() {
            flags |= BlurFlags::ZOOM_FOR_LAUNCHER_SUBMENU;
        }
        if state.is_app() && !state.is_non_composited() && self.outcome.cutover_is_dialog {
            flags |= BlurFlags::BLUR_BACKGROUND;
        }
        flags
    }

    fn zoom_out_foreground(&mut self) {
        let foreground = self
            .clients
            .top_down()
            .filter(|c| c.is_manageable())
            .find_map(|c| c.actor.filter(|a| self.scene.contains(*a)));
        match foreground {
            Some(actor) => {
                debug!(?actor, "Zooming out of the foreground app");
                self.collab.navigator.zoom_out(actor);
            }
            None => {
                debug!("No foreground app actor, scrolling the switcher instead");
                self.collab.navigator.scroll_to_top();
            }
        }
    }

    /// Run queued work: at most one animation frame, then idle commits.
    pub fn dispatch(&mut self, now: Instant) {
        if self.input_blocked_until.is_some_and(|deadline| now >= deadline) {
            info!("Input blocker timed out");
            self.input_blocked_until = None;
            self.rebuild_input_viewport();
        }

        let mut frame_ran = false;
        let mut frame_due = false;
        while let Some(task) = self.tasks.pop() {
            match task {
                Task::AnimationFrame if frame_ran => frame_due = true,
                Task::AnimationFrame => {
                    frame_ran = true;
                    self.animation_frame(now);
                }
                Task::CommitInputViewport => self.commit_input_viewport(),
            }
        }
        if frame_due {
            self.tasks.schedule(Task::AnimationFrame);
        }
    }

    fn animation_frame(&mut self, now: Instant) {
        let Some(frame) = self.blur.frame(now) else {
            return;
        };
        trace!(progress = frame.progress, "Animation frame");
        self.blur.tick(frame.progress);
        self.apply_effects();
        if frame.finished {
            self.on_complete();
        } else {
            self.cull();
            self.tasks.schedule(Task::AnimationFrame);
        }
    }

    fn apply_effects(&mut self) {
        let layers = Layers {
            home_blur: self.groups.home_blur,
            task_switcher: self.groups.task_switcher,
            applets: &self.applets,
        };
        self.blur.apply(&mut self.scene, layers);
    }

    fn restack(&mut self) {
        let outcome = self.stacking.restack(
            &self.clients,
            &mut self.scene,
            &self.groups,
            self.screen,
            self.blur_front_inside,
        );
        let changed = outcome.cutover != self.outcome.cutover;
        self.applets = outcome.applets.clone();
        self.outcome = outcome;
        if changed {
            let cutover = self.outcome.cutover;
            self.emit(ShellEvent::StackingChanged { cutover });
        }
    }

    /// Hide what cannot be seen, top of the paint order first.
    fn cull(&mut self) {
        let screen = self.screen;
        let mut pass = VisibilityPass::default();
        if self.state.shows_app_top() {
            let top: Vec<ActorId> = self.scene.leaves(self.groups.app_top).into_iter().rev().collect();
            walk(&mut self.scene, &top, screen, &mut pass);
        }

        // A fullscreen app leaves nothing to blur and hides the chrome too.
        let covered = pass.screen_covered(screen);
        let show_blurred = self.state.shows_home_blur() && !covered;
        self.scene.set_visible(self.groups.home_blur, show_blurred);
        self.scene
            .set_visible(self.groups.front, self.state.shows_front() && !covered);

        if show_blurred {
            let below: Vec<ActorId> = self.scene.leaves(self.groups.home_blur).into_iter().rev().collect();
            walk(&mut self.scene, &below, screen, &mut pass);
        }
        self.stacking.sync_blurred(&mut self.scene, &self.groups);
        trace!(
            shown = pass.shown.len(),
            hidden = pass.hidden.len(),
            covered,
            "Culled"
        );
    }

    fn rebuild_input_viewport(&mut self) {
        let chrome = self.collab.title_bar.chrome();
        let region = input_viewport::build(&ViewportInputs {
            state: self.state,
            flags: self.blur.flags(),
            chrome: &chrome,
            clients: &self.clients,
            scene: &self.scene,
            screen: self.screen,
            blocking_input: self.input_blocked_until.is_some(),
        });
        if self.viewport.set_pending(region) {
            self.tasks.schedule(Task::CommitInputViewport);
        }
    }

    fn commit_input_viewport(&mut self) {
        let Some(region) = self.viewport.take_commit() else {
            return;
        };
        self.display.set_input_region(Surface::Overlay, &region);
        self.display.set_input_region(Surface::Stage, &region);
        self.emit(ShellEvent::InputRegionCommitted(region));
    }

    /// Swallow all input until a new window maps or the blocker times out.
    pub fn block_input(&mut self, now: Instant) {
        let timeout = self.config.snapshot().animation.input_block_timeout();
        self.input_blocked_until = Some(now + timeout);
        debug!(?timeout, "Input blocked until a window maps");
        self.rebuild_input_viewport();
    }

    pub fn lock(&mut self) {
        if self.locked_state.is_none() && self.state != RenderState::Undefined {
            self.locked_state = Some(self.state);
        }
        info!(remembered = ?self.locked_state, "Locked");
        self.set_state(self.state.home_for_orientation());
    }

    pub fn unlock(&mut self) {
        info!("Unlocked");
        self.set_state(RenderState::AfterLock);
    }

    /// Switch orientation and re-request the current state in it.
    pub fn set_portrait_required(&mut self, portrait: bool) {
        if self.portrait == portrait {
            return;
        }
        self.portrait = portrait;
        let layout = self.config.snapshot().layout;
        let landscape = rect(0, 0, layout.screen_width, layout.screen_height);
        self.screen = if portrait { transposed(landscape) } else { landscape };
        info!(portrait, screen = ?self.screen, "Orientation changed");

        let g = self.groups;
        for actor in [
            self.scene.stage(),
            g.home_blur,
            g.task_switcher,
            g.app_top,
            g.front,
            g.blur_front,
        ] {
            self.scene.set_geometry(actor, self.screen);
        }
        let ids: Vec<ClientId> = self.clients.iter().map(|c| c.id).collect();
        for id in ids {
            if let Err(err) = self.regrant(id, None) {
                debug!(%err, "Client not refitted");
            }
        }

        if self.state != RenderState::Undefined {
            self.force_state(self.state);
        } else {
            self.refresh();
        }
    }

    fn work_area(&self) -> Rect {
        let bar = self.config.snapshot().layout.title_bar_height;
        let s = self.screen;
        rect(s.loc.x, s.loc.y + bar, s.size.w, (s.size.h - bar).max(0))
    }

    /// A client with a fresh id, ready to be configured and mapped.
    pub fn new_client(&mut self, kind: ClientKind, geometry: Rect) -> Client {
        Client::new(self.clients.allocate_id(), kind, geometry)
    }

    pub fn map_client(&mut self, mut client: Client) -> ClientId {
        let id = client.id;
        let granted = client.granted_geometry(client.geometry, self.screen, self.work_area());
        if granted != client.geometry {
            self.display.set_geometry(id, granted);
        }
        client.geometry = granted;

        let actor = self.scene.add_actor(client.kind.name(), granted, client.opaque);
        self.scene.reparent(actor, self.groups.home_blur);
        self.scene.lower_to_bottom(actor);
        client.actor = Some(actor);

        let manageable = client.is_manageable();
        info!(client = %id, kind = ?client.kind, ?granted, "Client mapped");
        self.clients.push(client);

        if manageable {
            self.collab.navigator.add_window(id, actor);
            if let Some(placeholder) = self.placeholder.take() {
                self.blur.cancel_loading_placeholder();
                self.scene.remove(placeholder);
            }
        }
        if self.input_blocked_until.take().is_some() {
            debug!("Window mapped, input blocker cancelled");
        }
        self.refresh();

        if manageable && self.state.is_loading() {
            self.set_state(RenderState::App);
        }
        id
    }

    /// The client unmapped; its actor keeps its visibility while the
    /// removal animation plays.
    pub fn begin_unmap(&mut self, id: ClientId) {
        if let Err(err) = self.try_begin_unmap(id) {
            warn!(%err, "Unmap ignored");
        }
    }

    fn try_begin_unmap(&mut self, id: ClientId) -> Result<(), ShellError> {
        let client = self.clients.get_mut(id).ok_or(ShellError::UnknownClient(id))?;
        client.unmap_pending = true;
        let actor = client.actor;
        self.collab.navigator.remove_window(id);
        match actor.and_then(|a| self.scene.actor_mut(a)) {
            Some(actor) => actor.retain_visibility = true,
            None => debug!(client = %id, "Leaving client has no actor"),
        }
        self.refresh();
        self.leave_empty_app();
        Ok(())
    }

    /// The removal animation finished; forget the client.
    pub fn finish_unmap(&mut self, id: ClientId) {
        if let Err(err) = self.try_finish_unmap(id) {
            warn!(%err, "Removal ignored");
        }
    }

    fn try_finish_unmap(&mut self, id: ClientId) -> Result<(), ShellError> {
        let client = self.clients.remove(id).ok_or(ShellError::UnknownClient(id))?;
        if !client.unmap_pending {
            self.collab.navigator.remove_window(id);
        }
        if let Some(actor) = client.actor {
            self.scene.remove(actor);
        }
        info!(client = %id, "Client gone");
        self.refresh();
        self.leave_empty_app();
        Ok(())
    }

    fn leave_empty_app(&mut self) {
        if self.state.is_app() && self.clients.manageable_count() == 0 {
            debug!("Last app gone");
            self.set_state(self.state.home_for_orientation());
        }
    }

    pub fn raise_client(&mut self, id: ClientId) {
        if !self.clients.raise(id) {
            warn!(err = %ShellError::UnknownClient(id), "Raise ignored");
            return;
        }
        self.display.raise(id);
        self.refresh();
    }

    pub fn lower_client(&mut self, id: ClientId) {
        if !self.clients.lower(id) {
            warn!(err = %ShellError::UnknownClient(id), "Lower ignored");
            return;
        }
        self.display.lower(id);
        self.refresh();
    }

    pub fn set_client_geometry(&mut self, id: ClientId, requested: Rect) {
        match self.regrant(id, Some(requested)) {
            Ok(()) => self.refresh(),
            Err(err) => warn!(%err, "Geometry request ignored"),
        }
    }

    pub fn set_maximized(&mut self, id: ClientId, maximized: bool) {
        let result = self.update_client(id, |c| {
            c.maximized = maximized;
            if !maximized {
                c.fullscreen = false;
            }
        });
        match result.and_then(|()| self.regrant(id, None)) {
            Ok(()) => self.refresh(),
            Err(err) => warn!(%err, "Maximize ignored"),
        }
    }

    pub fn set_fullscreen(&mut self, id: ClientId, fullscreen: bool) {
        let result = self.update_client(id, |c| {
            c.fullscreen = fullscreen;
            c.maximized |= fullscreen;
        });
        match result.and_then(|()| self.regrant(id, None)) {
            Ok(()) => self.refresh(),
            Err(err) => warn!(%err, "Fullscreen ignored"),
        }
    }

    pub fn set_modal_blocker(&mut self, id: ClientId, modal: bool) {
        match self.update_client(id, |c| c.modal_blocker = modal) {
            Ok(()) => {
                debug!(client = %id, modal, "Modal blocker changed");
                self.rebuild_input_viewport();
            }
            Err(err) => warn!(%err, "Modal change ignored"),
        }
    }

    fn update_client(&mut self, id: ClientId, f: impl FnOnce(&mut Client)) -> Result<(), ShellError> {
        let client = self.clients.get_mut(id).ok_or(ShellError::UnknownClient(id))?;
        f(client);
        Ok(())
    }

    /// Grant geometry for `requested` (or the current geometry) and push
    /// it to the display and the client's actor.
    fn regrant(&mut self, id: ClientId, requested: Option<Rect>) -> Result<(), ShellError> {
        let (screen, work_area) = (self.screen, self.work_area());
        let client = self.clients.get_mut(id).ok_or(ShellError::UnknownClient(id))?;
        let granted = client.granted_geometry(requested.unwrap_or(client.geometry), screen, work_area);
        let changed = granted != client.geometry;
        client.geometry = granted;
        let actor = client.actor.ok_or(ShellError::MissingActor(id))?;
        if !self.scene.contains(actor) {
            return Err(ShellError::StaleActor(actor));
        }
        self.scene.set_geometry(actor, granted);
        if changed || requested.is_some() {
            self.display.set_geometry(id, granted);
        }
        Ok(())
    }

    /// Re-derive everything that depends on the client stack.
    fn refresh(&mut self) {
        self.restack();
        self.apply_effects();
        self.update_effects();
        self.cull();
        self.rebuild_input_viewport();
    }

    /// Show `geometry` as a loading screen once the task switcher has
    /// faded out. Replaced by the first app that maps.
    pub fn queue_loading_placeholder(&mut self, geometry: Rect) -> ActorId {
        if let Some(old) = self.placeholder.take() {
            self.blur.cancel_loading_placeholder();
            self.scene.remove(old);
        }
        let actor = self.scene.add_actor("loading", geometry, false);
        self.scene.reparent(actor, self.groups.app_top);
        if let Some(a) = self.scene.actor_mut(actor) {
            a.retain_visibility = true;
        }
        self.scene.hide(actor);
        self.placeholder = Some(actor);
        self.blur.queue_loading_placeholder(actor);
        if let Some(ready) = self.blur.take_placeholder_if_idle() {
            self.scene.show(ready);
        }
        actor
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&mut RenderManager, &ShellEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: ShellEvent) {
        let mut observers = std::mem::take(&mut self.observers);
        for observer in observers.iter_mut() {
            observer(self, &event);
        }
        // Keep observers subscribed from inside a callback.
        observers.append(&mut self.observers);
        self.observers = observers;
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn previous_state(&self) -> RenderState {
        self.previous
    }

    /// Transitions actually applied since startup.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    pub fn is_effect_running(&self) -> bool {
        self.blur.is_running()
    }

    pub fn blur_flags(&self) -> BlurFlags {
        self.blur.flags()
    }

    pub fn home_params(&self) -> (f32, f32, f32, f32) {
        self.blur.home_params()
    }

    pub fn has_pending_work(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn committed_input_region(&self) -> Option<&InputRegion> {
        self.viewport.committed()
    }

    pub fn pending_input_region(&self) -> Option<&InputRegion> {
        self.viewport.pending()
    }

    pub fn is_input_blocked(&self) -> bool {
        self.input_blocked_until.is_some()
    }

    pub fn is_portrait(&self) -> bool {
        self.portrait
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn clients(&self) -> &ClientStack {
        &self.clients
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(id)
    }

    pub fn last_stacking(&self) -> &StackingOutcome {
        &self.outcome
    }

    pub fn config(&self) -> &LiveConfig {
        &self.config
    }
}
