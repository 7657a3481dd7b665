//! Shared primitive types used across every game.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds left on a countdown. One tick = one second.
pub type Seconds = u32;

/// Player score. Never negative; penalties floor at zero.
pub type Points = u64;

/// Stable identifier of a static scenario record.
pub type ScenarioId = &'static str;

/// The five mini-games, in dashboard order.
/// NEVER reorder: the discriminant seeds each game's RNG stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u64)]
pub enum GameId {
    SpotTheFraud = 0,
    FraudAnalyst = 1,
    PredictThePattern = 2,
    GuessTheOrigin = 3,
    CardCloner = 4,
}

impl GameId {
    pub const ALL: [GameId; 5] = [
        GameId::SpotTheFraud,
        GameId::FraudAnalyst,
        GameId::PredictThePattern,
        GameId::GuessTheOrigin,
        GameId::CardCloner,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::SpotTheFraud      => "spot_the_fraud",
            Self::FraudAnalyst      => "fraud_analyst",
            Self::PredictThePattern => "predict_the_pattern",
            Self::GuessTheOrigin    => "guess_the_origin",
            Self::CardCloner        => "card_cloner",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::SpotTheFraud      => "Spot the Fraud",
            Self::FraudAnalyst      => "Be the Fraud Analyst",
            Self::PredictThePattern => "Predict the Pattern",
            Self::GuessTheOrigin    => "Guess the Fraud Origin",
            Self::CardCloner        => "Card Cloner Tycoon",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.slug() == slug)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
