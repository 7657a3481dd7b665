//! Snapshot serialization: the full screen state of one session.
//!
//! A front end renders play, feedback and game-over screens from a
//! snapshot alone; it never reaches into the session.

use crate::{
    clock::Countdown,
    command::Choice,
    scoreboard::Scoreboard,
    session::Phase,
    types::{GameId, ScenarioId},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into() }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScenarioCard {
    pub id: ScenarioId,
    pub prompt: &'static str,
    pub fields: Vec<Field>,
}

/// What the feedback screen shows after a decision.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Feedback {
    pub scenario_id: ScenarioId,
    pub choice: Choice,
    pub correct: bool,
    pub score_delta: i64,
    pub explanation: String,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub game: GameId,
    pub title: &'static str,
    pub phase: Phase,
    pub board: Scoreboard,
    pub accuracy_pct: u32,
    pub rank: Option<String>,
    pub countdown: Option<Countdown>,
    pub scenario: Option<ScenarioCard>,
    pub choices: Vec<Choice>,
    pub feedback: Option<Feedback>,
}
