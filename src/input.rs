//! Console command handling.
//!
//! Stands in for the gestures and window-manager events of a real device:
//! each line read from stdin becomes one [`Command`].

use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};

use frostwm::geometry::{rect, Rect};
use frostwm::window::{ClientId, ClientKind};
use frostwm::RenderState;

use crate::state::Shell;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    State(RenderState),
    /// Launch flow: loading screen plus input blocker
    Loading,
    Map(MapRequest),
    Unmap(ClientId),
    Gone(ClientId),
    Raise(ClientId),
    Lower(ClientId),
    Maximize(ClientId, bool),
    Fullscreen(ClientId, bool),
    Modal(ClientId, bool),
    Rotate { portrait: bool },
    Lock,
    Unlock,
    Block,
    Stop,
    Set(String, f64),
    Get(String),
    Dump,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapRequest {
    pub kind: ClientKind,
    pub geometry: Option<Rect>,
    pub maximized: bool,
    pub fullscreen: bool,
    pub modal: bool,
    pub skip_taskbar: bool,
    pub self_managed: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty line")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    UnknownCommand(String),
    #[error("`{0}` is missing an argument")]
    MissingArgument(&'static str),
    #[error("`{arg}` is not a valid {expected}")]
    InvalidArgument { arg: String, expected: &'static str },
}

pub const HELP: &str = "\
home | edit | switcher | launcher | app | loading
map <kind> [WxH+X+Y] [max] [full] [modal] [skip] [self]
unmap <id> | gone <id> | raise <id> | lower <id>
maximize <id> [off] | fullscreen <id> [off] | modal <id> on|off
rotate portrait|landscape | lock | unlock | block | stop
set <tunable> <value> | get <tunable> | dump | quit";

fn invalid(arg: &str, expected: &'static str) -> ParseError {
    ParseError::InvalidArgument {
        arg: arg.to_string(),
        expected,
    }
}

fn client_id(arg: Option<&str>, command: &'static str) -> Result<ClientId, ParseError> {
    let arg = arg.ok_or(ParseError::MissingArgument(command))?;
    arg.trim_start_matches('#')
        .parse()
        .map(ClientId)
        .map_err(|_| invalid(arg, "client id"))
}

fn on_off(arg: Option<&str>, default: bool) -> Result<bool, ParseError> {
    match arg {
        None => Ok(default),
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        Some(other) => Err(invalid(other, "on/off switch")),
    }
}

/// `WxH+X+Y`
fn parse_geometry(arg: &str) -> Option<Rect> {
    let (size, pos) = arg.split_once('+')?;
    let (w, h) = size.split_once('x')?;
    let (x, y) = pos.split_once('+')?;
    Some(rect(x.parse().ok()?, y.parse().ok()?, w.parse().ok()?, h.parse().ok()?))
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err(ParseError::Empty);
    };

    let parsed = match command {
        "home" => Command::State(RenderState::Home),
        "edit" => Command::State(RenderState::HomeEdit),
        "switcher" => Command::State(RenderState::TaskSwitcher),
        "launcher" => Command::State(RenderState::Launcher),
        "app" => Command::State(RenderState::App),
        "loading" => Command::Loading,
        "map" => {
            let kind = words.next().ok_or(ParseError::MissingArgument("map"))?;
            let kind = ClientKind::from_name(kind).ok_or_else(|| invalid(kind, "window kind"))?;
            let mut request = MapRequest {
                kind,
                geometry: None,
                maximized: false,
                fullscreen: false,
                modal: false,
                skip_taskbar: false,
                self_managed: false,
            };
            for word in words.by_ref() {
                match word {
                    "max" => request.maximized = true,
                    "full" => request.fullscreen = true,
                    "modal" => request.modal = true,
                    "skip" => request.skip_taskbar = true,
                    "self" => request.self_managed = true,
                    other => {
                        request.geometry =
                            Some(parse_geometry(other).ok_or_else(|| invalid(other, "flag or geometry"))?)
                    }
                }
            }
            Command::Map(request)
        }
        "unmap" => Command::Unmap(client_id(words.next(), "unmap")?),
        "gone" => Command::Gone(client_id(words.next(), "gone")?),
        "raise" => Command::Raise(client_id(words.next(), "raise")?),
        "lower" => Command::Lower(client_id(words.next(), "lower")?),
        "maximize" => {
            let id = client_id(words.next(), "maximize")?;
            Command::Maximize(id, on_off(words.next(), true)?)
        }
        "fullscreen" => {
            let id = client_id(words.next(), "fullscreen")?;
            Command::Fullscreen(id, on_off(words.next(), true)?)
        }
        "modal" => {
            let id = client_id(words.next(), "modal")?;
            let on = words.next().ok_or(ParseError::MissingArgument("modal"))?;
            Command::Modal(id, on_off(Some(on), true)?)
        }
        "rotate" => match words.next() {
            Some("portrait") => Command::Rotate { portrait: true },
            Some("landscape") => Command::Rotate { portrait: false },
            Some(other) => return Err(invalid(other, "orientation")),
            None => return Err(ParseError::MissingArgument("rotate")),
        },
        "lock" => Command::Lock,
        "unlock" => Command::Unlock,
        "block" => Command::Block,
        "stop" => Command::Stop,
        "set" => {
            let name = words.next().ok_or(ParseError::MissingArgument("set"))?;
            let value = words.next().ok_or(ParseError::MissingArgument("set"))?;
            let value = value.parse().map_err(|_| invalid(value, "number"))?;
            Command::Set(name.to_string(), value)
        }
        "get" => Command::Get(words.next().ok_or(ParseError::MissingArgument("get"))?.to_string()),
        "dump" => Command::Dump,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(parsed)
}

impl Shell {
    /// Parse and run one console line.
    pub fn process_line(&mut self, line: &str) {
        match parse(line) {
            Ok(command) => self.handle_command(command),
            Err(ParseError::Empty) => {}
            Err(err) => warn!(%err, "Bad command"),
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        let rm = &mut self.render;
        match command {
            Command::State(state) => rm.set_state(state),
            Command::Loading => {
                rm.set_state(RenderState::Loading);
                rm.block_input(Instant::now());
                let screen = rm.screen();
                rm.queue_loading_placeholder(screen);
            }
            Command::Map(request) => {
                let geometry = request.geometry.unwrap_or_else(|| rm.screen());
                let mut client = rm.new_client(request.kind, geometry);
                client.maximized = request.maximized || request.fullscreen;
                client.fullscreen = request.fullscreen;
                client.modal_blocker = request.modal;
                client.skip_taskbar = request.skip_taskbar;
                client.self_managed = request.self_managed;
                let id = rm.map_client(client);
                println!("mapped {id}");
            }
            Command::Unmap(id) => rm.begin_unmap(id),
            Command::Gone(id) => rm.finish_unmap(id),
            Command::Raise(id) => rm.raise_client(id),
            Command::Lower(id) => rm.lower_client(id),
            Command::Maximize(id, on) => rm.set_maximized(id, on),
            Command::Fullscreen(id, on) => rm.set_fullscreen(id, on),
            Command::Modal(id, on) => rm.set_modal_blocker(id, on),
            Command::Rotate { portrait } => rm.set_portrait_required(portrait),
            Command::Lock => rm.lock(),
            Command::Unlock => rm.unlock(),
            Command::Block => rm.block_input(Instant::now()),
            Command::Stop => rm.stop_transition(),
            Command::Set(name, value) => match self.config.set_tunable(&name, value) {
                Ok(()) => println!("{name} = {value}"),
                Err(err) => warn!(%err, "Tunable not set"),
            },
            Command::Get(name) => match self.config.tunable(&name) {
                Some(value) => println!("{name} = {value}"),
                None => warn!(name, "No such tunable"),
            },
            Command::Dump => println!("{}", self.dump()),
            Command::Help => println!("{HELP}"),
            Command::Quit => {
                info!("Quit requested");
                self.quit_requested = true;
            }
        }
    }
}
