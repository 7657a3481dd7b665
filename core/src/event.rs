//! The event log: every observable transition of every session.
//!
//! RULE: A session reports what happened ONLY through events.
//! Front ends render from snapshots; the log is for replay and tests.

use crate::{
    command::Choice,
    types::{GameId, Points, ScenarioId},
};
use serde::{Deserialize, Serialize};

/// Every event emitted during play.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Dashboard events ───────────────────────────
    GameSelected {
        game: GameId,
        mount: u64,
    },
    ReturnedToDashboard {
        game: GameId,
    },

    // ── Session lifecycle ──────────────────────────
    SessionStarted {
        game: GameId,
        opening_score: Points,
    },
    ScenarioDrawn {
        game: GameId,
        round: u32,
        level: u32,
        scenario_id: ScenarioId,
    },
    DecisionEvaluated {
        game: GameId,
        round: u32,
        scenario_id: ScenarioId,
        choice: Choice,
        correct: bool,
        score_delta: i64,
        score: Points,
        explanation: String,
    },
    RoundPassed {
        game: GameId,
        round: u32,
        scenario_id: ScenarioId,
    },
    LevelReached {
        game: GameId,
        level: u32,
    },
    SessionEnded {
        game: GameId,
        reason: EndReason,
        final_score: Points,
        level: u32,
        best_streak: u32,
    },
    SessionReset {
        game: GameId,
    },
}

impl GameEvent {
    pub fn game(&self) -> GameId {
        match self {
            Self::GameSelected { game, .. }
            | Self::ReturnedToDashboard { game }
            | Self::SessionStarted { game, .. }
            | Self::ScenarioDrawn { game, .. }
            | Self::DecisionEvaluated { game, .. }
            | Self::RoundPassed { game, .. }
            | Self::LevelReached { game, .. }
            | Self::SessionEnded { game, .. }
            | Self::SessionReset { game } => *game,
        }
    }

    /// Stable string name, used for the event_type column of the log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::GameSelected { .. }        => "game_selected",
            Self::ReturnedToDashboard { .. } => "returned_to_dashboard",
            Self::SessionStarted { .. }      => "session_started",
            Self::ScenarioDrawn { .. }       => "scenario_drawn",
            Self::DecisionEvaluated { .. }   => "decision_evaluated",
            Self::RoundPassed { .. }         => "round_passed",
            Self::LevelReached { .. }        => "level_reached",
            Self::SessionEnded { .. }        => "session_ended",
            Self::SessionReset { .. }        => "session_reset",
        }
    }
}

/// Why a session reached `ended`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    TimeExpired,
    ResourceExhausted,
    RoundLimitReached,
}

impl EndReason {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::TimeExpired       => "time ran out",
            Self::ResourceExhausted => "out of lives or heat budget",
            Self::RoundLimitReached => "all rounds completed",
        }
    }
}

/// One row of the engine's event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub seq: u64,
    pub game: GameId,
    pub event_type: String,
    pub payload: String, // JSON-serialized GameEvent
}
