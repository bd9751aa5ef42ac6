use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::ShellError;
use crate::render_state::RenderState;

/// frostwm configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub animation: AnimationConfig,
    pub blur: BlurConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Home, edit mode and app transitions (ms)
    pub blur_ms: u32,

    /// Entering or leaving the task switcher (ms)
    pub task_switcher_ms: u32,

    /// Entering or leaving the launcher (ms)
    pub launcher_ms: u32,

    /// How long input stays swallowed while waiting for a new window (ms)
    pub input_block_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlurConfig {
    /// Home blurred behind the switcher, launcher and loading screen
    pub home_radius: f32,
    pub home_saturation: f32,
    pub home_brightness: f32,

    /// Lighter blur behind dialogs and edit mode
    pub background_radius: f32,
    pub background_saturation: f32,
    pub background_brightness: f32,

    /// Home group zoom per reason (1.0 = untouched)
    pub launcher_zoom: f32,
    pub launcher_submenu_zoom: f32,
    pub task_switcher_zoom: f32,
    pub home_zoom: f32,

    /// Scale of the switcher and applet layers while faded out
    pub task_switcher_hidden_zoom: f32,
    pub applets_hidden_zoom: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Landscape screen size; portrait swaps the two
    pub screen_width: i32,
    pub screen_height: i32,

    /// Height of the title bar row holding the chrome buttons
    pub title_bar_height: i32,

    /// Width of the left (switcher) and right (launcher/close) buttons
    pub button_width: i32,

    /// Width of the status area right of the left button
    pub status_area_width: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            blur: BlurConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            blur_ms: 250,
            task_switcher_ms: 400,
            launcher_ms: 350,
            input_block_ms: 3000,
        }
    }
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            home_radius: 8.0,
            home_saturation: 0.5,
            home_brightness: 0.6,

            background_radius: 4.0,
            background_saturation: 0.8,
            background_brightness: 0.75,

            launcher_zoom: 0.85,
            launcher_submenu_zoom: 0.75,
            task_switcher_zoom: 0.8,
            home_zoom: 0.9,

            task_switcher_hidden_zoom: 1.2,
            applets_hidden_zoom: 0.8,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 480,
            title_bar_height: 56,
            button_width: 112,
            status_area_width: 220,
        }
    }
}

macro_rules! tunables {
    ($($name:literal => $section:ident . $field:ident as $ty:ty),* $(,)?) => {
        /// Every tunable addressable by name.
        pub const TUNABLES: &[&str] = &[$($name),*];

        impl Config {
            /// Read a numeric tunable by its dotted name.
            pub fn tunable(&self, name: &str) -> Option<f64> {
                match name {
                    $($name => Some(self.$section.$field as f64),)*
                    _ => None,
                }
            }

            /// Set a numeric tunable by its dotted name.
            pub fn set_tunable(&mut self, name: &str, value: f64) -> Result<(), ShellError> {
                if !value.is_finite() || value < 0.0 {
                    return Err(ShellError::InvalidTunable { name: name.to_string(), value });
                }
                match name {
                    $($name => self.$section.$field = value as $ty,)*
                    _ => return Err(ShellError::UnknownTunable(name.to_string())),
                }
                Ok(())
            }
        }
    };
}

tunables! {
    "animation.blur_ms" => animation.blur_ms as u32,
    "animation.task_switcher_ms" => animation.task_switcher_ms as u32,
    "animation.launcher_ms" => animation.launcher_ms as u32,
    "animation.input_block_ms" => animation.input_block_ms as u32,
    "blur.home_radius" => blur.home_radius as f32,
    "blur.home_saturation" => blur.home_saturation as f32,
    "blur.home_brightness" => blur.home_brightness as f32,
    "blur.background_radius" => blur.background_radius as f32,
    "blur.background_saturation" => blur.background_saturation as f32,
    "blur.background_brightness" => blur.background_brightness as f32,
    "blur.launcher_zoom" => blur.launcher_zoom as f32,
    "blur.launcher_submenu_zoom" => blur.launcher_submenu_zoom as f32,
    "blur.task_switcher_zoom" => blur.task_switcher_zoom as f32,
    "blur.home_zoom" => blur.home_zoom as f32,
    "blur.task_switcher_hidden_zoom" => blur.task_switcher_hidden_zoom as f32,
    "blur.applets_hidden_zoom" => blur.applets_hidden_zoom as f32,
    "layout.title_bar_height" => layout.title_bar_height as i32,
    "layout.button_width" => layout.button_width as i32,
    "layout.status_area_width" => layout.status_area_width as i32,
}

impl AnimationConfig {
    /// Length of the animation that brings `target` on screen.
    pub fn duration_for(&self, previous: RenderState, target: RenderState) -> Duration {
        let ms = if target.is_task_switcher() || previous.is_task_switcher() {
            self.task_switcher_ms
        } else if target.is_launcher() || previous.is_launcher() {
            self.launcher_ms
        } else {
            self.blur_ms
        };
        Duration::from_millis(ms.into())
    }

    pub fn input_block_timeout(&self) -> Duration {
        Duration::from_millis(self.input_block_ms.into())
    }
}

/// Shared handle to the configuration that can be reloaded while running.
///
/// Readers take a fresh [`LiveConfig::snapshot`] whenever they start work
/// rather than caching values.
#[derive(Debug, Clone, Default)]
pub struct LiveConfig {
    inner: Rc<RefCell<Config>>,
}

impl LiveConfig {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Rc::new(RefCell::new(config)),
        }
    }

    pub fn snapshot(&self) -> Config {
        self.inner.borrow().clone()
    }

    pub fn reload(&self, config: Config) {
        *self.inner.borrow_mut() = config;
        info!("Configuration reloaded");
    }

    pub fn tunable(&self, name: &str) -> Option<f64> {
        self.inner.borrow().tunable(name)
    }

    pub fn set_tunable(&self, name: &str, value: f64) -> Result<(), ShellError> {
        self.inner.borrow_mut().set_tunable(name, value)?;
        debug!(name, value, "Tunable updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tunables_round_trip_by_name() {
        let mut config = Config::default();
        for name in TUNABLES {
            assert!(config.tunable(name).is_some(), "{name} unreadable");
        }
        config.set_tunable("animation.blur_ms", 600.0).unwrap();
        assert_eq!(config.animation.blur_ms, 600);
        assert_eq!(
            config.set_tunable("blur.nope", 1.0),
            Err(ShellError::UnknownTunable("blur.nope".into()))
        );
        assert!(matches!(
            config.set_tunable("blur.home_radius", f64::NAN),
            Err(ShellError::InvalidTunable { .. })
        ));
    }

    #[test]
    fn live_handle_sees_reloads() {
        let live = LiveConfig::new(Config::default());
        let other = live.clone();
        other.set_tunable("animation.task_switcher_ms", 10.0).unwrap();
        assert_eq!(live.snapshot().animation.task_switcher_ms, 10);

        let mut fresh = Config::default();
        fresh.blur.home_radius = 2.0;
        other.reload(fresh);
        assert_eq!(live.tunable("blur.home_radius"), Some(2.0));
    }

    #[test]
    fn switcher_transitions_use_their_duration() {
        let anim = AnimationConfig::default();
        assert_eq!(
            anim.duration_for(RenderState::App, RenderState::TaskSwitcher),
            Duration::from_millis(400)
        );
        assert_eq!(
            anim.duration_for(RenderState::Launcher, RenderState::Home),
            Duration::from_millis(350)
        );
        assert_eq!(
            anim.duration_for(RenderState::Home, RenderState::App),
            Duration::from_millis(250)
        );
    }
}
