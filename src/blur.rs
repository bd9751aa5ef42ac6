//! Blur and zoom animation engine.
//!
//! Every animated quantity is a [`Range`]. A transition sets new targets
//! from [`BlurFlags`], then each frame interpolates the ranges and writes
//! them to the home group's post-process and to the auxiliary layers.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::BlurConfig;
use crate::range::Range;
use crate::scene::{ActorId, SceneGraph};
use crate::timeline::{Frame, Timeline};

bitflags::bitflags! {
    /// Independent effect requests a state can make
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BlurFlags: u32 {
        /// Heavy blur and dim of the home group
        const BLUR_HOME                 = 1 << 0;
        /// Light blur behind dialogs and edit mode
        const BLUR_BACKGROUND           = 1 << 1;
        const SHOW_TASK_SWITCHER        = 1 << 2;
        const SHOW_APPLETS              = 1 << 3;
        const ZOOM_FOR_LAUNCHER         = 1 << 4;
        const ZOOM_FOR_LAUNCHER_SUBMENU = 1 << 5;
        const ZOOM_FOR_HOME             = 1 << 6;
        const ZOOM_FOR_TASK_SWITCHER    = 1 << 7;
    }
}

/// Actors the engine writes to each frame
#[derive(Debug, Clone, Copy)]
pub struct Layers<'a> {
    pub home_blur: ActorId,
    pub task_switcher: ActorId,
    pub applets: &'a [ActorId],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayerChange {
    Unchanged,
    Shown,
    Hidden,
}

#[derive(Debug)]
pub struct BlurEngine {
    flags: BlurFlags,

    home_radius: Range,
    home_saturation: Range,
    home_brightness: Range,
    home_zoom: Range,

    switcher_opacity: Range,
    switcher_zoom: Range,

    applets_opacity: Range,
    applets_zoom: Range,

    timeline: Timeline,
    effect_running: bool,

    /// Shown the moment the switcher has faded out completely
    loading_placeholder: Option<ActorId>,
}

impl BlurEngine {
    pub fn new() -> Self {
        Self {
            flags: BlurFlags::empty(),
            home_radius: Range::new(0.0),
            home_saturation: Range::new(1.0),
            home_brightness: Range::new(1.0),
            home_zoom: Range::new(1.0),
            switcher_opacity: Range::new(0.0),
            switcher_zoom: Range::new(1.0),
            applets_opacity: Range::new(0.0),
            applets_zoom: Range::new(1.0),
            timeline: Timeline::new(),
            effect_running: false,
            loading_placeholder: None,
        }
    }

    pub fn flags(&self) -> BlurFlags {
        self.flags
    }

    pub fn is_running(&self) -> bool {
        self.effect_running
    }

    fn ranges(&self) -> [&Range; 8] {
        [
            &self.home_radius,
            &self.home_saturation,
            &self.home_brightness,
            &self.home_zoom,
            &self.switcher_opacity,
            &self.switcher_zoom,
            &self.applets_opacity,
            &self.applets_zoom,
        ]
    }

    fn ranges_mut(&mut self) -> [&mut Range; 8] {
        [
            &mut self.home_radius,
            &mut self.home_saturation,
            &mut self.home_brightness,
            &mut self.home_zoom,
            &mut self.switcher_opacity,
            &mut self.switcher_zoom,
            &mut self.applets_opacity,
            &mut self.applets_zoom,
        ]
    }

    /// Nothing left to animate.
    pub fn is_settled(&self) -> bool {
        self.ranges().iter().all(|r| r.is_settled())
    }

    /// Current (radius, saturation, brightness, zoom) of the home group.
    pub fn home_params(&self) -> (f32, f32, f32, f32) {
        (
            self.home_radius.current,
            self.home_saturation.current,
            self.home_brightness.current,
            self.home_zoom.current,
        )
    }

    /// Retarget every range for `flags`. Returns whether anything needs
    /// to animate.
    pub fn set_targets(
        &mut self,
        flags: BlurFlags,
        cfg: &BlurConfig,
        scene: &mut SceneGraph,
        home_blur: ActorId,
    ) -> bool {
        let previous_radius = self.home_radius.to;

        let (radius, saturation, brightness) = if flags.contains(BlurFlags::BLUR_HOME) {
            (cfg.home_radius, cfg.home_saturation, cfg.home_brightness)
        } else if flags.contains(BlurFlags::BLUR_BACKGROUND) {
            (cfg.background_radius, cfg.background_saturation, cfg.background_brightness)
        } else {
            (0.0, 1.0, 1.0)
        };

        let zoom = if flags.contains(BlurFlags::ZOOM_FOR_LAUNCHER_SUBMENU) {
            cfg.launcher_submenu_zoom
        } else if flags.contains(BlurFlags::ZOOM_FOR_LAUNCHER) {
            cfg.launcher_zoom
        } else if flags.contains(BlurFlags::ZOOM_FOR_TASK_SWITCHER) {
            cfg.task_switcher_zoom
        } else if flags.contains(BlurFlags::ZOOM_FOR_HOME) {
            cfg.home_zoom
        } else {
            1.0
        };

        let show_switcher = flags.contains(BlurFlags::SHOW_TASK_SWITCHER);
        let show_applets = flags.contains(BlurFlags::SHOW_APPLETS);

        self.home_radius.set(radius);
        self.home_saturation.set(saturation);
        self.home_brightness.set(brightness);
        self.home_zoom.set(zoom);
        self.switcher_opacity.set(if show_switcher { 1.0 } else { 0.0 });
        self.switcher_zoom
            .set(if show_switcher { 1.0 } else { cfg.task_switcher_hidden_zoom });
        self.applets_opacity.set(if show_applets { 1.0 } else { 0.0 });
        self.applets_zoom
            .set(if show_applets { 1.0 } else { cfg.applets_hidden_zoom });

        // Unblurring from a partially blurred frame: drop the cached image
        // now, otherwise the renderer keeps reusing the old blur.
        if previous_radius != 0.0 && radius == 0.0 && self.home_radius.current != 0.0 {
            if let Some(pp) = scene.post_process_mut(home_blur) {
                let (s, b, z) = (pp.saturation, pp.brightness, pp.zoom);
                pp.set_params(0.0, s, b, z);
                pp.invalidate();
                debug!("Blur returning to zero, cached image invalidated");
            }
        }

        self.flags = flags;
        !self.is_settled()
    }

    /// Start animating towards the current targets.
    pub fn start(&mut self, duration: Duration) {
        self.timeline.start(duration);
        self.effect_running = true;
        debug!(?duration, flags = ?self.flags, "Blur animation started");
    }

    /// Advance the timeline; `None` when nothing is animating.
    pub fn frame(&mut self, now: Instant) -> Option<Frame> {
        self.timeline.frame(now)
    }

    pub fn tick(&mut self, progress: f32) {
        self.home_radius.interpolate(progress);
        self.home_saturation.interpolate(progress);
        self.home_brightness.interpolate(progress);
        self.home_zoom.interpolate_eased(progress);
        self.switcher_opacity.interpolate(progress);
        self.switcher_zoom.interpolate_eased(progress);
        self.applets_opacity.interpolate(progress);
        self.applets_zoom.interpolate_eased(progress);
    }

    /// Write current values to the scene.
    pub fn apply(&mut self, scene: &mut SceneGraph, layers: Layers<'_>) {
        if let Some(pp) = scene.post_process_mut(layers.home_blur) {
            pp.set_params(
                self.home_radius.current,
                self.home_saturation.current,
                self.home_brightness.current,
                self.home_zoom.current,
            );
        }

        let switcher = apply_layer(
            scene,
            layers.task_switcher,
            self.switcher_opacity.current,
            self.switcher_zoom.current,
        );
        if switcher == LayerChange::Hidden {
            if let Some(placeholder) = self.loading_placeholder.take() {
                scene.show(placeholder);
                debug!(?placeholder, "Loading placeholder swapped in");
            }
        }

        for &applet in layers.applets {
            apply_layer(
                scene,
                applet,
                self.applets_opacity.current,
                self.applets_zoom.current,
            );
        }
    }

    /// Land every range on its target and mark the effect finished.
    pub fn finish(&mut self) {
        self.timeline.stop();
        for range in self.ranges_mut() {
            range.settle();
        }
        self.effect_running = false;
    }

    /// Stop the timeline early, leaving ranges where they are.
    pub fn stop(&mut self) {
        self.timeline.stop();
    }

    pub fn queue_loading_placeholder(&mut self, actor: ActorId) {
        self.loading_placeholder = Some(actor);
    }

    pub fn cancel_loading_placeholder(&mut self) -> Option<ActorId> {
        self.loading_placeholder.take()
    }

    pub fn loading_placeholder(&self) -> Option<ActorId> {
        self.loading_placeholder
    }

    /// Take the placeholder if the switcher is already gone for good.
    pub fn take_placeholder_if_idle(&mut self) -> Option<ActorId> {
        if !self.effect_running && self.switcher_opacity.current == 0.0 {
            self.loading_placeholder.take()
        } else {
            None
        }
    }
}

impl Default for BlurEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_layer(scene: &mut SceneGraph, layer: ActorId, opacity: f32, zoom: f32) -> LayerChange {
    let was_visible = scene.is_visible(layer);
    scene.set_opacity(layer, opacity);
    scene.set_scale(layer, zoom);
    if opacity == 0.0 && was_visible {
        scene.hide(layer);
        LayerChange::Hidden
    } else if opacity != 0.0 && !was_visible {
        scene.show(layer);
        LayerChange::Shown
    } else {
        LayerChange::Unchanged
    }
}
