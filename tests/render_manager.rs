use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use frostwm::collaborators::{Collaborators, Home, Launcher, TaskNavigator, TitleBar};
use frostwm::config::LayoutConfig;
use frostwm::display::{DisplayLog, DisplayRequest, HeadlessDisplay, Surface};
use frostwm::geometry::{rect, Rect};
use frostwm::input_viewport::{Chrome, InputRegion};
use frostwm::scene::ActorId;
use frostwm::window::{Client, ClientId, ClientKind};
use frostwm::{BlurFlags, Config, LiveConfig, RenderManager, RenderState, ShellEvent};

#[derive(Default)]
struct Record {
    windows: Vec<ClientId>,
    zoomed_out: Vec<ActorId>,
    scrolled_to_top: usize,
    switcher_done: Vec<RenderState>,
    unseen_notifications: bool,
    attention: Option<bool>,
    edit_mode: Vec<bool>,
    submenu_open: bool,
}

type Shared = Rc<RefCell<Record>>;

struct Navigator(Shared);

impl TaskNavigator for Navigator {
    fn is_empty(&self) -> bool {
        self.0.borrow().windows.is_empty()
    }

    fn has_unseen_notifications(&self) -> bool {
        self.0.borrow().unseen_notifications
    }

    fn add_window(&mut self, client: ClientId, _actor: ActorId) {
        self.0.borrow_mut().windows.push(client);
    }

    fn remove_window(&mut self, client: ClientId) {
        self.0.borrow_mut().windows.retain(|c| *c != client);
    }

    fn zoom_out(&mut self, actor: ActorId) {
        self.0.borrow_mut().zoomed_out.push(actor);
    }

    fn scroll_to_top(&mut self) {
        self.0.borrow_mut().scrolled_to_top += 1;
    }

    fn transition_done(&mut self, state: RenderState) {
        self.0.borrow_mut().switcher_done.push(state);
    }
}

struct RecordingHome(Shared);

impl Home for RecordingHome {
    fn update_layout(&mut self, _state: RenderState, _screen: Rect) {}

    fn set_edit_mode(&mut self, editing: bool) {
        self.0.borrow_mut().edit_mode.push(editing);
    }
}

struct RecordingLauncher(Shared);

impl Launcher for RecordingLauncher {
    fn is_submenu_open(&self) -> bool {
        self.0.borrow().submenu_open
    }

    fn update_layout(&mut self, _screen: Rect) {}
}

struct RecordingTitleBar {
    record: Shared,
    chrome: Chrome,
}

impl TitleBar for RecordingTitleBar {
    fn update_layout(&mut self, state: RenderState, screen: Rect) {
        self.chrome = Chrome::for_state(state, &LayoutConfig::default(), screen);
    }

    fn chrome(&self) -> Chrome {
        self.chrome
    }

    fn set_attention(&mut self, attention: bool) {
        self.record.borrow_mut().attention = Some(attention);
    }
}

struct Harness {
    rm: RenderManager,
    record: Shared,
    display: DisplayLog,
    now: Instant,
    desktop: ClientId,
}

fn screen() -> Rect {
    rect(0, 0, 800, 480)
}

impl Harness {
    /// Desktop mapped, settled in Home.
    fn new() -> Self {
        let mut h = Self::bare();
        h.desktop = h.map(ClientKind::Desktop, screen());
        h.rm.set_state(RenderState::Home);
        h.settle();
        h
    }

    fn bare() -> Self {
        let record = Shared::default();
        let display = HeadlessDisplay::new();
        let log = display.log();
        let collab = Collaborators {
            navigator: Box::new(Navigator(record.clone())),
            home: Box::new(RecordingHome(record.clone())),
            launcher: Box::new(RecordingLauncher(record.clone())),
            title_bar: Box::new(RecordingTitleBar {
                record: record.clone(),
                chrome: Chrome::default(),
            }),
        };
        let rm = RenderManager::new(LiveConfig::new(Config::default()), Box::new(display), collab);
        Self {
            rm,
            record,
            display: log,
            now: Instant::now(),
            desktop: ClientId(0),
        }
    }

    fn map(&mut self, kind: ClientKind, geometry: Rect) -> ClientId {
        let client = self.rm.new_client(kind, geometry);
        self.rm.map_client(client)
    }

    fn map_with(&mut self, kind: ClientKind, geometry: Rect, f: impl FnOnce(Client) -> Client) -> ClientId {
        let client = self.rm.new_client(kind, geometry);
        self.rm.map_client(f(client))
    }

    fn actor(&self, id: ClientId) -> ActorId {
        self.rm.client(id).and_then(|c| c.actor).expect("client has an actor")
    }

    /// Run frames until nothing is queued.
    fn settle(&mut self) {
        for _ in 0..1000 {
            if !self.rm.has_pending_work() {
                return;
            }
            self.now += Duration::from_millis(16);
            self.rm.dispatch(self.now);
        }
        panic!("render manager never settled");
    }

    /// Home with one maximized app, settled in App.
    fn in_app() -> (Self, ClientId) {
        let mut h = Self::new();
        let app = h.map_with(ClientKind::App, screen(), Client::maximized);
        h.rm.set_state(RenderState::App);
        h.settle();
        (h, app)
    }

    fn input_requests(&self) -> Vec<(Surface, InputRegion)> {
        self.display
            .borrow()
            .iter()
            .filter_map(|r| match r {
                DisplayRequest::InputRegion(s, region) => Some((*s, region.clone())),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn first_transition_leaves_undefined() {
    let mut h = Harness::bare();
    assert_eq!(h.rm.state(), RenderState::Undefined);
    h.rm.set_state(RenderState::Home);
    assert_eq!(h.rm.state(), RenderState::Home);
    assert_eq!(h.rm.previous_state(), RenderState::Undefined);
    h.settle();
    assert!(h.rm.committed_input_region().is_some());
}

#[test]
fn setting_the_current_state_is_a_no_op() {
    let mut h = Harness::new();
    let count = h.rm.transition_count();
    let params = h.rm.home_params();
    let blurred = h.rm.scene().children(h.rm.groups().home_blur).to_vec();
    let requests = h.display.borrow().len();

    h.rm.set_state(RenderState::Home);

    assert_eq!(h.rm.transition_count(), count);
    assert_eq!(h.rm.home_params(), params);
    assert!(!h.rm.is_effect_running());
    assert!(!h.rm.has_pending_work());
    assert_eq!(h.rm.scene().children(h.rm.groups().home_blur), blurred.as_slice());
    assert_eq!(h.display.borrow().len(), requests);
}

#[test]
fn forced_transition_runs_again() {
    let mut h = Harness::new();
    let count = h.rm.transition_count();
    h.rm.force_state(RenderState::Home);
    assert_eq!(h.rm.transition_count(), count + 1);
    assert_eq!(h.rm.state(), RenderState::Home);
}

#[test]
fn reentrant_request_from_observer_is_dropped() {
    let (mut h, _app) = Harness::in_app();
    let attempted = Rc::new(Cell::new(false));
    let seen = attempted.clone();
    h.rm.subscribe(move |rm, event| {
        if let ShellEvent::StateChanging { .. } = event {
            seen.set(true);
            rm.set_state(RenderState::Launcher);
        }
    });

    let count = h.rm.transition_count();
    h.rm.set_state(RenderState::TaskSwitcher);

    assert!(attempted.get());
    assert_eq!(h.rm.state(), RenderState::TaskSwitcher);
    assert_eq!(h.rm.transition_count(), count + 1);
    h.settle();
    assert_eq!(h.rm.state(), RenderState::TaskSwitcher);
}

#[test]
fn empty_switcher_goes_home() {
    let mut h = Harness::new();
    h.rm.set_state(RenderState::Launcher);
    h.settle();
    h.rm.set_state(RenderState::TaskSwitcher);
    assert_eq!(h.rm.state(), RenderState::Home);

    h.rm.set_portrait_required(true);
    h.settle();
    h.rm.set_state(RenderState::Launcher);
    h.rm.set_state(RenderState::TaskSwitcher);
    assert_eq!(h.rm.state(), RenderState::HomePortrait);
}

#[test]
fn switcher_from_app_zooms_out_of_the_app() {
    let (mut h, app) = Harness::in_app();
    let actor = h.actor(app);

    h.rm.set_state(RenderState::TaskSwitcher);
    assert_eq!(h.record.borrow().zoomed_out, vec![actor]);
    assert_eq!(h.record.borrow().scrolled_to_top, 0);
    assert!(h.rm.is_effect_running());

    h.settle();
    assert_eq!(h.rm.state(), RenderState::TaskSwitcher);
    assert!(!h.rm.is_effect_running());
    assert_eq!(h.record.borrow().switcher_done, vec![RenderState::TaskSwitcher]);

    let cfg = Config::default().blur;
    let (radius, saturation, brightness, zoom) = h.rm.home_params();
    assert_eq!(radius, cfg.home_radius);
    assert_eq!(saturation, cfg.home_saturation);
    assert_eq!(brightness, cfg.home_brightness);
    assert_eq!(zoom, cfg.task_switcher_zoom);
    assert!(h.rm.scene().is_visible(h.rm.groups().task_switcher));
    assert_eq!(h.rm.committed_input_region(), Some(&InputRegion::full(screen())));
}

#[test]
fn modal_blocker_takes_all_input() {
    let (mut h, _app) = Harness::in_app();
    assert!(!h.rm.committed_input_region().unwrap().is_empty());

    h.map_with(ClientKind::Dialog, rect(0, 280, 800, 200), Client::modal);
    h.settle();

    assert!(h.rm.committed_input_region().unwrap().is_empty());
    let requests = h.input_requests();
    let tail = &requests[requests.len() - 2..];
    assert_eq!(tail[0], (Surface::Overlay, InputRegion::empty()));
    assert_eq!(tail[1], (Surface::Stage, InputRegion::empty()));
}

#[test]
fn unchanged_region_is_not_recommitted() {
    let mut h = Harness::new();
    h.display.borrow_mut().clear();

    h.rm.raise_client(h.desktop);
    h.settle();

    assert!(h.input_requests().is_empty());
    assert_eq!(*h.display.borrow(), vec![DisplayRequest::Raise(h.desktop)]);
}

#[test]
fn unlock_restores_the_locked_state() {
    let (mut h, app) = Harness::in_app();
    h.rm.set_state(RenderState::TaskSwitcher);
    h.settle();

    h.rm.lock();
    assert_eq!(h.rm.state(), RenderState::Home);
    h.settle();
    h.rm.unlock();
    assert_eq!(h.rm.state(), RenderState::TaskSwitcher);
    h.settle();

    h.rm.lock();
    h.settle();
    h.rm.begin_unmap(app);
    h.rm.finish_unmap(app);
    h.settle();
    h.rm.unlock();
    assert_eq!(h.rm.state(), RenderState::Home);
}

#[test]
fn portrait_substitutes_variants_both_ways() {
    let mut h = Harness::new();
    h.rm.set_portrait_required(true);
    assert_eq!(h.rm.state(), RenderState::HomePortrait);
    assert_eq!(h.rm.screen(), rect(0, 0, 480, 800));
    let desktop = h.rm.client(h.desktop).unwrap();
    assert_eq!(desktop.geometry, rect(0, 0, 480, 800));

    h.rm.set_state(RenderState::Launcher);
    assert_eq!(h.rm.state(), RenderState::LauncherPortrait);
    // No portrait variant: the landscape state is used as is.
    h.rm.set_state(RenderState::HomeEditDialog);
    assert_eq!(h.rm.state(), RenderState::HomeEditDialog);
    h.rm.set_state(RenderState::Launcher);

    h.rm.set_portrait_required(false);
    assert_eq!(h.rm.state(), RenderState::Launcher);
    h.rm.set_state(RenderState::LauncherPortrait);
    assert_eq!(h.rm.state(), RenderState::Launcher);
}

#[test]
fn input_blocker_swallows_until_a_window_maps() {
    let mut h = Harness::new();
    h.rm.block_input(h.now);
    h.settle();
    assert!(h.rm.is_input_blocked());
    assert_eq!(h.rm.committed_input_region(), Some(&InputRegion::full(screen())));

    h.map(ClientKind::Note, rect(300, 100, 200, 100));
    h.settle();
    assert!(!h.rm.is_input_blocked());
    assert_ne!(h.rm.committed_input_region(), Some(&InputRegion::full(screen())));

    h.rm.block_input(h.now);
    h.rm.dispatch(h.now + Duration::from_secs(4));
    assert!(!h.rm.is_input_blocked());
}

#[test]
fn dialog_over_app_blurs_the_app() {
    let (mut h, app) = Harness::in_app();
    let dialog = h.map(ClientKind::Dialog, rect(0, 0, 400, 300));

    let granted = h.rm.client(dialog).unwrap().geometry;
    assert_eq!(granted, rect(0, 180, 800, 300));
    assert!(h.rm.blur_flags().contains(BlurFlags::BLUR_BACKGROUND));
    assert_eq!(h.rm.last_stacking().cutover, Some(h.actor(dialog)));

    h.settle();
    let groups = *h.rm.groups();
    assert_eq!(h.rm.scene().parent(h.actor(app)), Some(groups.home_blur));
    assert_eq!(h.rm.scene().parent(h.actor(dialog)), Some(groups.app_top));
    assert_eq!(h.rm.home_params().0, Config::default().blur.background_radius);
    // The status area opens up while the background is blurred.
    assert!(h.rm.committed_input_region().unwrap().contains(200, 10));
}

#[test]
fn losing_the_last_app_returns_home() {
    let (mut h, app) = Harness::in_app();
    let actor = h.actor(app);
    h.rm.begin_unmap(app);
    assert_eq!(h.rm.state(), RenderState::Home);
    assert!(h.rm.scene().contains(actor));

    h.rm.finish_unmap(app);
    assert!(!h.rm.scene().contains(actor));
    assert!(h.rm.client(app).is_none());
    assert!(h.record.borrow().windows.is_empty());
}

#[test]
fn loading_screen_gives_way_to_the_app() {
    let mut h = Harness::new();
    h.rm.set_state(RenderState::Loading);
    let placeholder = h.rm.queue_loading_placeholder(screen());
    assert!(!h.rm.scene().is_visible(placeholder));
    h.settle();
    assert!(h.rm.scene().is_visible(placeholder));

    h.map_with(ClientKind::App, screen(), Client::maximized);
    assert_eq!(h.rm.state(), RenderState::App);
    assert!(!h.rm.scene().contains(placeholder));
}

#[test]
fn stop_transition_lands_on_targets() {
    let (mut h, _app) = Harness::in_app();
    let completed = Rc::new(Cell::new(0));
    let counter = completed.clone();
    h.rm.subscribe(move |_, event| {
        if let ShellEvent::TransitionComplete { .. } = event {
            counter.set(counter.get() + 1);
        }
    });

    h.rm.set_state(RenderState::Launcher);
    h.rm.dispatch(h.now);
    assert!(h.rm.is_effect_running());
    h.rm.stop_transition();

    assert!(!h.rm.is_effect_running());
    assert_eq!(completed.get(), 1);
    assert_eq!(h.rm.home_params().3, Config::default().blur.launcher_zoom);
}

#[test]
fn launcher_submenu_zooms_further() {
    let mut h = Harness::new();
    h.rm.set_state(RenderState::Launcher);
    h.settle();
    h.record.borrow_mut().submenu_open = true;
    h.rm.update_effects();
    assert!(h.rm.blur_flags().contains(BlurFlags::ZOOM_FOR_LAUNCHER_SUBMENU));
    h.settle();
    assert_eq!(h.rm.home_params().3, Config::default().blur.launcher_submenu_zoom);
}

#[test]
fn durations_are_read_when_each_animation_starts() {
    let (mut h, _app) = Harness::in_app();
    h.rm
        .config()
        .set_tunable("animation.task_switcher_ms", 0.0)
        .unwrap();
    h.rm.set_state(RenderState::TaskSwitcher);
    assert!(h.rm.is_effect_running());
    h.rm.dispatch(h.now);
    assert!(!h.rm.is_effect_running());
}

#[test]
fn fullscreen_app_hides_what_is_underneath() {
    let mut h = Harness::new();
    let app = h.map_with(ClientKind::App, screen(), Client::fullscreen);
    h.rm.set_state(RenderState::App);
    h.settle();

    let groups = *h.rm.groups();
    assert_eq!(h.rm.scene().parent(h.actor(app)), Some(groups.app_top));
    assert!(!h.rm.scene().is_visible(groups.home_blur));
    assert!(!h.rm.scene().is_visible(groups.front));

    // Back to a maximized app: the title bar strip shows home again.
    h.rm.set_fullscreen(app, false);
    h.rm.set_maximized(app, true);
    h.settle();
    assert_eq!(h.rm.client(app).unwrap().geometry, rect(0, 56, 800, 424));
    assert!(h.rm.scene().is_visible(groups.home_blur));
    assert!(h.rm.scene().is_visible(groups.front));
}

#[test]
fn going_home_hides_the_app_behind_the_desktop() {
    let (mut h, app) = Harness::in_app();
    let groups = *h.rm.groups();
    let actor = h.actor(app);
    assert_eq!(h.rm.scene().parent(actor), Some(groups.app_top));

    h.rm.set_state(RenderState::Home);
    h.settle();
    assert_eq!(h.rm.scene().parent(actor), Some(groups.home_blur));
    assert!(!h.rm.scene().is_visible(actor));
    assert!(h.rm.scene().is_visible(h.actor(h.desktop)));
    assert!(h.record.borrow().edit_mode.iter().all(|e| !e));
}

#[test]
fn attention_follows_unseen_notifications() {
    let mut h = Harness::new();
    assert_eq!(h.record.borrow().attention, Some(false));
    h.record.borrow_mut().unseen_notifications = true;
    h.rm.set_state(RenderState::HomeEdit);
    assert_eq!(h.record.borrow().attention, Some(true));
    assert_eq!(h.record.borrow().edit_mode.last(), Some(&true));
}

#[test]
fn unknown_clients_are_ignored() {
    let mut h = Harness::new();
    let count = h.rm.transition_count();
    h.rm.raise_client(ClientId(99));
    h.rm.begin_unmap(ClientId(99));
    h.rm.finish_unmap(ClientId(99));
    h.rm.set_client_geometry(ClientId(99), screen());
    assert_eq!(h.rm.transition_count(), count);
    assert_eq!(h.rm.state(), RenderState::Home);
}

#[test]
fn unlock_before_the_first_transition_goes_home() {
    let mut h = Harness::bare();
    h.rm.lock();
    assert_eq!(h.rm.state(), RenderState::Home);
    h.settle();

    h.rm.unlock();
    assert_eq!(h.rm.state(), RenderState::Home);
    h.settle();

    // Booting locked in portrait lands on the portrait home.
    let mut h = Harness::bare();
    h.rm.lock();
    h.rm.set_portrait_required(true);
    h.settle();
    h.rm.unlock();
    assert_eq!(h.rm.state(), RenderState::HomePortrait);
}

#[test]
fn previews_hidden_by_a_fullscreen_app_take_no_input() {
    let mut h = Harness::new();
    let app = h.map_with(ClientKind::App, screen(), Client::fullscreen);
    h.rm.set_state(RenderState::App);
    h.settle();

    let preview = h.map(ClientKind::IncomingEvent, rect(300, 200, 200, 80));
    h.settle();
    let groups = *h.rm.groups();
    assert_eq!(h.rm.scene().parent(h.actor(preview)), Some(groups.front));
    assert!(!h.rm.scene().is_visible(groups.front));
    assert!(!h.rm.committed_input_region().unwrap().contains(350, 250));

    h.rm.set_fullscreen(app, false);
    h.settle();
    assert!(h.rm.scene().is_visible(groups.front));
    assert!(h.rm.committed_input_region().unwrap().contains(350, 250));
}

#[test]
fn retargeting_mid_flight_continues_from_current_values() {
    let mut h = Harness::new();
    let completed = Rc::new(RefCell::new(Vec::new()));
    let seen = completed.clone();
    h.rm.subscribe(move |_, event| {
        if let ShellEvent::TransitionComplete { state } = event {
            seen.borrow_mut().push(*state);
        }
    });

    h.rm.set_state(RenderState::Launcher);
    for _ in 0..5 {
        h.now += Duration::from_millis(16);
        h.rm.dispatch(h.now);
    }
    assert!(h.rm.is_effect_running());
    let cfg = Config::default().blur;
    let (radius, _, _, zoom) = h.rm.home_params();
    assert!(radius > 0.0 && radius < cfg.home_radius, "{radius}");
    assert!(zoom < 1.0 && zoom > cfg.launcher_zoom, "{zoom}");

    h.rm.set_state(RenderState::Home);
    assert_eq!(h.rm.home_params().0, radius);
    assert_eq!(h.rm.home_params().3, zoom);
    // The restarted timeline's first frame starts where the old one stopped.
    h.now += Duration::from_millis(16);
    h.rm.dispatch(h.now);
    assert_eq!(h.rm.home_params().0, radius);
    assert_eq!(h.rm.home_params().3, zoom);

    h.settle();
    assert_eq!(h.rm.home_params(), (0.0, 1.0, 1.0, 1.0));
    // The interrupted transition never completes on its own.
    assert_eq!(*completed.borrow(), vec![RenderState::Home]);
}
