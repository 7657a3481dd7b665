use crate::{command::Choice, types::GameId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No game mounted; select one from the dashboard first")]
    NoActiveGame,

    #[error("'{event}' is not valid while the session is {phase}")]
    InvalidTransition {
        phase: &'static str,
        event: &'static str,
    },

    #[error("{game} does not offer the choice '{choice}'")]
    UnsupportedChoice { game: GameId, choice: Choice },

    #[error("No scenario eligible under difficulty ceiling {ceiling}")]
    NoEligibleScenario { ceiling: u32 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GameResult<T> = Result<T, GameError>;
