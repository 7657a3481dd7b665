//! Object-safe handle on a mounted game.
//!
//! The engine holds whichever game the dashboard mounted as a
//! `Box<dyn Playable>`; every `Session<R>` implements it.

use crate::{
    command::SessionCommand,
    error::GameResult,
    event::GameEvent,
    scoreboard::Scoreboard,
    snapshot::SessionSnapshot,
    types::GameId,
};
use std::any::Any;

pub trait Playable: Send {
    fn game(&self) -> GameId;

    /// Apply one command. Returns the events it produced, in order.
    fn handle(&mut self, cmd: SessionCommand) -> GameResult<Vec<GameEvent>>;

    fn snapshot(&self) -> SessionSnapshot;

    fn board(&self) -> &Scoreboard;

    fn is_ended(&self) -> bool;

    /// True while a tick would move the countdown.
    fn counting_down(&self) -> bool;

    /// For downcasting in tests and tooling only.
    fn as_any(&self) -> &dyn Any;
}
