use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{GameId, Seconds};

/// Every button a player can press across all games.
/// Each game accepts only its own subset; see `GameRules::CHOICES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    // ── Fraud / legitimate verdicts ───────────────
    Fraudulent,
    Legitimate,

    // ── Analyst actions ───────────────────────────
    Approve,
    Decline,
    Escalate,

    // ── Card Cloner moves ─────────────────────────
    Attempt,
    LayLow,
}

impl Choice {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fraudulent => "Fraudulent",
            Self::Legitimate => "Legitimate",
            Self::Approve    => "Approve",
            Self::Decline    => "Decline",
            Self::Escalate   => "Escalate",
            Self::Attempt    => "Attempt fraud",
            Self::LayLow     => "Lay low",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Fraudulent => "fraudulent",
            Self::Legitimate => "legitimate",
            Self::Approve    => "approve",
            Self::Decline    => "decline",
            Self::Escalate   => "escalate",
            Self::Attempt    => "attempt",
            Self::LayLow     => "lay_low",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Commands delivered to a mounted game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SessionCommand {
    Start,
    Decide { choice: Choice },
    Tick,
    Acknowledge,
    Reset,
}

impl SessionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start          => "start",
            Self::Decide { .. }  => "decide",
            Self::Tick           => "tick",
            Self::Acknowledge    => "acknowledge",
            Self::Reset          => "reset",
        }
    }
}

/// All player-issued commands the engine accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Dashboard ─────────────────────────────────
    Select { game: GameId },
    Back,

    // ── Session ───────────────────────────────────
    Start,
    Decide { choice: Choice },
    /// Let `seconds` one-second timer ticks elapse.
    Tick { seconds: Seconds },
    Acknowledge,
    Reset,
}
