//! UI modes of the shell and the per-mode policy tables.

use crate::blur::BlurFlags;

/// The UI mode the render manager is presenting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderState {
    /// Before the first transition
    Undefined,
    Home,
    HomeEdit,
    /// Edit mode with a settings dialog on top
    HomeEditDialog,
    App,
    TaskSwitcher,
    Launcher,
    /// A fullscreen client drawing without the compositor's effects
    NonComposited,
    /// Loading screen over the blurred home while an app starts
    Loading,
    /// Loading screen for a subwindow of an already running app
    LoadingSubwindow,
    HomePortrait,
    HomeEditPortrait,
    AppPortrait,
    TaskSwitcherPortrait,
    LauncherPortrait,
    NonCompositedPortrait,
    LoadingPortrait,
    /// Requested on unlock: resolves to whatever was current before the lock
    AfterLock,
}

use RenderState::*;

impl RenderState {
    pub fn portrait_variant(self) -> Option<Self> {
        match self {
            Home | HomePortrait => Some(HomePortrait),
            HomeEdit | HomeEditPortrait => Some(HomeEditPortrait),
            App | AppPortrait => Some(AppPortrait),
            TaskSwitcher | TaskSwitcherPortrait => Some(TaskSwitcherPortrait),
            Launcher | LauncherPortrait => Some(LauncherPortrait),
            NonComposited | NonCompositedPortrait => Some(NonCompositedPortrait),
            Loading | LoadingPortrait => Some(LoadingPortrait),
            _ => None,
        }
    }

    pub fn landscape_variant(self) -> Self {
        match self {
            HomePortrait => Home,
            HomeEditPortrait => HomeEdit,
            AppPortrait => App,
            TaskSwitcherPortrait => TaskSwitcher,
            LauncherPortrait => Launcher,
            NonCompositedPortrait => NonComposited,
            LoadingPortrait => Loading,
            other => other,
        }
    }

    /// The portrait variant of a state that is known to have one.
    ///
    /// Panics otherwise: asking for portrait where none exists is a caller bug.
    pub fn into_portrait(self) -> Self {
        match self.portrait_variant() {
            Some(state) => state,
            None => panic!("{self:?} has no portrait variant"),
        }
    }

    pub fn is_portrait(self) -> bool {
        matches!(
            self,
            HomePortrait
                | HomeEditPortrait
                | AppPortrait
                | TaskSwitcherPortrait
                | LauncherPortrait
                | NonCompositedPortrait
                | LoadingPortrait
        )
    }

    pub fn is_home(self) -> bool {
        matches!(
            self,
            Home | HomeEdit | HomeEditDialog | HomePortrait | HomeEditPortrait
        )
    }

    pub fn is_edit(self) -> bool {
        matches!(self, HomeEdit | HomeEditDialog | HomeEditPortrait)
    }

    /// States where an application owns the screen.
    pub fn is_app(self) -> bool {
        matches!(
            self,
            App | AppPortrait
                | NonComposited
                | NonCompositedPortrait
                | LoadingSubwindow
        )
    }

    pub fn is_task_switcher(self) -> bool {
        matches!(self, TaskSwitcher | TaskSwitcherPortrait)
    }

    pub fn is_launcher(self) -> bool {
        matches!(self, Launcher | LauncherPortrait)
    }

    pub fn is_loading(self) -> bool {
        matches!(self, Loading | LoadingPortrait | LoadingSubwindow)
    }

    pub fn is_non_composited(self) -> bool {
        matches!(self, NonComposited | NonCompositedPortrait)
    }

    /// The shell's own UI takes every tap.
    pub fn needs_whole_screen_input(self) -> bool {
        self.is_task_switcher() || self.is_launcher() || matches!(self, Loading | LoadingPortrait)
    }

    /// Applets must be reachable through the viewport so they can be dragged.
    pub fn captures_applets(self) -> bool {
        matches!(self, HomeEdit | HomeEditPortrait)
    }

    /// Notes and dialogs above the chrome keep receiving their own taps.
    pub fn protects_foreground_dialogs(self) -> bool {
        self.is_home() || self.is_app()
    }

    pub fn shows_app_top(self) -> bool {
        !(self.is_task_switcher() || self.is_launcher())
    }

    pub fn shows_front(self) -> bool {
        !self.is_non_composited()
    }

    pub fn shows_home_blur(self) -> bool {
        !self.is_non_composited()
    }

    /// Effect requests implied by the state alone.
    pub fn blur_flags(self) -> BlurFlags {
        match self {
            Home | HomePortrait => BlurFlags::SHOW_APPLETS,
            HomeEdit | HomeEditPortrait => BlurFlags::SHOW_APPLETS | BlurFlags::BLUR_BACKGROUND,
            HomeEditDialog => {
                BlurFlags::SHOW_APPLETS | BlurFlags::BLUR_BACKGROUND | BlurFlags::BLUR_HOME
            }
            TaskSwitcher | TaskSwitcherPortrait => {
                BlurFlags::BLUR_HOME
                    | BlurFlags::ZOOM_FOR_TASK_SWITCHER
                    | BlurFlags::SHOW_TASK_SWITCHER
            }
            Launcher | LauncherPortrait => BlurFlags::BLUR_HOME | BlurFlags::ZOOM_FOR_LAUNCHER,
            Loading | LoadingPortrait => BlurFlags::BLUR_HOME | BlurFlags::ZOOM_FOR_HOME,
            App | AppPortrait | NonComposited | NonCompositedPortrait | LoadingSubwindow
            | Undefined | AfterLock => BlurFlags::empty(),
        }
    }

    /// Home in the orientation this state is shown in.
    pub fn home_for_orientation(self) -> Self {
        if self.is_portrait() {
            HomePortrait
        } else {
            Home
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Undefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_round_trip() {
        for state in [Home, HomeEdit, App, TaskSwitcher, Launcher, NonComposited, Loading] {
            let portrait = state.into_portrait();
            assert!(portrait.is_portrait());
            assert_eq!(portrait.landscape_variant(), state);
        }
        assert_eq!(HomeEditDialog.portrait_variant(), None);
        assert_eq!(LoadingSubwindow.portrait_variant(), None);
    }

    #[test]
    #[should_panic(expected = "has no portrait variant")]
    fn portrait_of_incapable_state_asserts() {
        let _ = HomeEditDialog.into_portrait();
    }

    #[test]
    fn task_switcher_flags() {
        let flags = TaskSwitcher.blur_flags();
        assert!(flags.contains(
            BlurFlags::BLUR_HOME | BlurFlags::ZOOM_FOR_TASK_SWITCHER | BlurFlags::SHOW_TASK_SWITCHER
        ));
        assert_eq!(TaskSwitcherPortrait.blur_flags(), flags);
        assert!(App.blur_flags().is_empty());
    }
}
