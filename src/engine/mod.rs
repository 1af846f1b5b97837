//! Timer engine and application actor.
//!
//! - `state.rs`: counters, session rotation and time formatting
//! - `timer.rs`: [`TimerEngine`], the state machine behind every command
//! - `runtime.rs`: [`App`], the single task that owns the engine and drives
//!   it from commands, ticks and the message deadline

mod runtime;
mod state;
mod timer;

pub use runtime::{App, AppClosed, AppCommand, AppHandle, AppServices, TICK_PERIOD};
pub use state::{format_clock, format_date, format_seconds, TimerState, SESSIONS_PER_CYCLE};
pub use timer::{TickSubscription, TimerEngine, TimerEvent};
