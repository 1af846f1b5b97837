//! Terminal front-end for `lazytimer run`.
//!
//! Surfaces are reported on stderr by [`TerminalHost`] along with the menu
//! bar status item. Snapshots are printed on stdout and stdin lines are
//! parsed into commands. Menu-style
//! commands go through the [`MenuBar`] model the same way a menu click
//! would.

use std::cell::Cell;

use anyhow::{Context, Result};
use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use super::commands::RunArgs;
use super::display::Display;
use crate::appearance::Background;
use crate::completion::CompletionDispatcher;
use crate::engine::{format_date, App, AppCommand, AppHandle, AppServices, TimerEvent};
use crate::menubar::{MenuBar, MenuItemId};
use crate::types::{DisplayMode, SessionType, TimerMode};
use crate::window::{
    display_mode_for, shortcut_for, PanelId, PanelKind, PanelSpec, Shortcut, SurfaceHost,
};

// ============================================================================
// TerminalHost
// ============================================================================

/// Surface host that describes each surface change on stderr.
#[derive(Debug, Default)]
pub struct TerminalHost {
    next_id: Cell<u64>,
}

impl TerminalHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SurfaceHost for TerminalHost {
    fn show_main_window(&self) {
        eprintln!("[surface] {} shown", DisplayMode::Window.label());
    }

    fn hide_main_window(&self) {
        eprintln!("[surface] {} hidden", DisplayMode::Window.label());
    }

    fn show_panel(&self, spec: &PanelSpec) -> PanelId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        eprintln!("[surface] {} shown ({})", panel_label(spec.kind), describe(spec));
        PanelId(id)
    }

    fn hide_panel(&self, id: PanelId) {
        eprintln!("[surface] panel {} hidden", id.0);
    }

    fn show_settings(&self) {
        eprintln!("[surface] settings shown");
    }
}

fn panel_label(kind: PanelKind) -> &'static str {
    match kind {
        PanelKind::Overlay => DisplayMode::Overlay.label(),
        PanelKind::Floating => DisplayMode::Floating.label(),
    }
}

fn describe(spec: &PanelSpec) -> String {
    let background = match &spec.background {
        Background::None => "transparent".to_string(),
        Background::Image(path) => format!("image {}", path.display()),
        Background::Mesh(_) => "mesh gradient".to_string(),
        Background::Linear { colors, .. } => format!("{} color gradient", colors.len()),
        Background::Solid(color) => format!("solid {}", color),
    };
    format!(
        "opacity {:.1}, {}, {}",
        spec.opacity,
        spec.timer_position.label(),
        background
    )
}

// ============================================================================
// Input parsing
// ============================================================================

/// One parsed stdin line.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A menu item click
    Menu(MenuItemId),
    /// A command sent directly to the timer
    Command(AppCommand),
    /// Print the menu model
    ShowMenu,
    /// Print the current snapshot
    Status,
    Help,
    Empty,
}

/// Help text for stdin commands.
pub const HELP: &[&str] = &[
    "toggle | t              start or pause",
    "reset | r               reset the active mode",
    "mode <name>             pomodoro, stopwatch, clock",
    "session <name>          work, short, long",
    "set <min> [sec]         set the remaining time",
    "focus <min>             load a work countdown",
    "label <session> <text>  rename a session",
    "display <name>          window, overlay, floating",
    "close                   close the overlay",
    "settings                open settings",
    "test                    fire the completion action",
    "dismiss                 hide the completion message",
    "menu | status | help",
    "quit | q",
];

/// Parses one stdin line.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "" => Input::Empty,
        "toggle" | "t" | "start" | "pause" => Input::Menu(MenuItemId::Toggle),
        "reset" | "r" => Input::Menu(MenuItemId::Reset),
        "quit" | "q" | "exit" => Input::Menu(MenuItemId::Quit),
        "mode" => Input::Menu(MenuItemId::Mode(rest.parse::<TimerMode>()?)),
        "display" => Input::Menu(MenuItemId::Display(rest.parse::<DisplayMode>()?)),
        "session" => Input::Command(AppCommand::SwitchSession(rest.parse::<SessionType>()?)),
        "set" => {
            let (minutes, seconds) = parse_time(rest)?;
            Input::Command(AppCommand::SetRemaining { minutes, seconds })
        }
        "focus" => Input::Command(AppCommand::QuickFocus(parse_number(rest)?)),
        "label" => {
            let (session, label) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: label <session> <text>".to_string())?;
            Input::Command(AppCommand::SetSessionLabel {
                session: session.parse()?,
                label: label.trim().to_string(),
            })
        }
        "close" => Input::Command(AppCommand::CloseOverlay),
        "settings" => Input::Command(AppCommand::OpenSettings),
        "test" => Input::Command(AppCommand::TestCompletion),
        "dismiss" => Input::Command(AppCommand::DismissMessage),
        "menu" => Input::ShowMenu,
        "status" => Input::Status,
        "help" | "?" => Input::Help,
        _ => {
            let shortcut = line.parse::<Shortcut>()?;
            let mode = display_mode_for(&shortcut)
                .ok_or_else(|| format!("no command bound to {}", shortcut))?;
            Input::Menu(MenuItemId::Display(mode))
        }
    };
    Ok(input)
}

fn parse_number(text: &str) -> Result<u32, String> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| format!("expected a number, got '{}'", text.trim()))
}

/// Accepts `25`, `25 30` or `25:30`.
fn parse_time(text: &str) -> Result<(u32, u32), String> {
    let mut parts = text
        .split(|c: char| c == ':' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let minutes = parse_number(parts.next().unwrap_or_default())?;
    let seconds = match parts.next() {
        Some(seconds) => parse_number(seconds)?,
        None => 0,
    };
    Ok((minutes, seconds))
}

// ============================================================================
// Front-end loop
// ============================================================================

/// Runs the timer with the terminal front-end.
///
/// # Errors
///
/// Returns an error if the flags do not form a valid configuration or stdin
/// cannot be read.
pub async fn run(args: RunArgs) -> Result<()> {
    let config = args.to_config();
    config.validate().map_err(anyhow::Error::msg)?;

    let dispatcher = CompletionDispatcher::system(args.no_sound);
    let services = AppServices::new(dispatcher, Box::new(TerminalHost::new()));
    let (app, events) = App::new(config, services);
    let handle = app.handle();

    if args.mode != TimerMode::Pomodoro {
        handle.send(AppCommand::SetMode(args.mode))?;
    }
    if args.display != DisplayMode::Window {
        handle.send(AppCommand::SwitchDisplay(args.display))?;
    }
    if args.start {
        handle.send(AppCommand::Toggle)?;
    }

    let (snapshot, result) = tokio::join!(app.run(), drive(handle, events, args.json));
    debug!(?snapshot, "Final state");
    result
}

/// Drives the timer from stdin until `quit`, end of input or Ctrl-C.
///
/// Always asks the actor to shut down before returning.
pub async fn drive(
    handle: AppHandle,
    mut events: mpsc::UnboundedReceiver<TimerEvent>,
    json: bool,
) -> Result<()> {
    let result = read_loop(&handle, &mut events, json).await;
    if handle.send(AppCommand::Shutdown).is_err() {
        debug!("Timer already stopped");
    }
    result
}

async fn read_loop(
    handle: &AppHandle,
    events: &mut mpsc::UnboundedReceiver<TimerEvent>,
    json: bool,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut snapshots = handle.subscribe();
    let mut menubar = MenuBar::new(handle.snapshot());
    let mut last_line = Display::format_snapshot(menubar.snapshot());
    Display::show_snapshot(menubar.snapshot(), json);
    show_status_item(&menubar);

    loop {
        tokio::select! {
            biased;

            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                let line = Display::format_snapshot(&snapshot);
                if line != last_line {
                    Display::show_snapshot(&snapshot, json);
                    last_line = line;
                }
                if menubar.update(snapshot) {
                    show_status_item(&menubar);
                }
            }
            Some(event) = events.recv() => {
                if let Some(text) = describe_event(&event) {
                    eprintln!("{}", text);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                let command = match parse_input(&line) {
                    Ok(Input::Menu(item)) => menubar.click(item),
                    Ok(Input::Command(command)) => Some(command),
                    Ok(Input::ShowMenu) => {
                        Display::show_lines(&Display::format_menu(&menubar.menu()));
                        None
                    }
                    Ok(Input::Status) => {
                        Display::show_snapshot(menubar.snapshot(), json);
                        if menubar.snapshot().mode == TimerMode::Clock && !json {
                            println!("{}", format_date(&Local::now()));
                        }
                        None
                    }
                    Ok(Input::Help) => {
                        for line in HELP {
                            println!("{}", line);
                        }
                        Display::show_lines(&shortcut_lines());
                        None
                    }
                    Ok(Input::Empty) => None,
                    Err(e) => {
                        Display::show_error(&e);
                        None
                    }
                };
                match command {
                    Some(AppCommand::Shutdown) => break,
                    Some(command) => handle.send(command)?,
                    None => {}
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                break;
            }
        }
    }
    Ok(())
}

fn show_status_item(menubar: &MenuBar) {
    eprintln!("[menubar] {}", Display::format_status_item(menubar));
}

fn describe_event(event: &TimerEvent) -> Option<String> {
    match event {
        TimerEvent::SessionCompleted {
            finished,
            next,
            outcome,
            ..
        } => Some(format!(
            "[timer] {} finished, next: {} ({})",
            finished.label(),
            next.label(),
            Display::format_outcome(outcome)
        )),
        TimerEvent::ModeChanged { mode } => Some(format!("[timer] mode: {}", mode.label())),
        _ => None,
    }
}

/// Lists the display shortcuts.
pub fn shortcut_lines() -> Vec<String> {
    DisplayMode::ALL
        .iter()
        .map(|mode| format!("{}  {}", shortcut_for(*mode), mode.label()))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
