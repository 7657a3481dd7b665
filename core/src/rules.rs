//! Game rules trait.
//!
//! RULE: A game is nothing but a GameRules implementation.
//! The shared Session owns phases, countdown, drawing and termination;
//! rules only describe the scenario pool and how a decision scores.

use crate::{
    clock::RestartPolicy,
    command::Choice,
    rng::GameRng,
    scoreboard::Scoreboard,
    snapshot::Field,
    types::{GameId, Points, ScenarioId, Seconds},
};
use std::fmt::Debug;

/// A static scenario record.
pub trait Scenario: Debug + Send + Sync + 'static {
    fn id(&self) -> ScenarioId;

    /// Difficulty used by level gates. Ungated pools keep the default.
    fn difficulty(&self) -> u32 {
        1
    }

    /// The question put to the player.
    fn prompt(&self) -> &'static str;

    /// Details shown on the play screen.
    fn fields(&self) -> Vec<Field>;
}

/// How the round controller picks the next scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Uniformly at random from the eligible subset.
    Random,
    /// Walk the eligible subset in order.
    Sequential,
}

/// The evaluated result of one decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub correct:        bool,
    pub score_delta:    i64,
    pub resource_delta: i32,
    pub explanation:    String,
    /// Extra teaching points shown under the explanation.
    pub notes:          Vec<String>,
    /// The round passes without feedback and without counting as an answer.
    pub passed:         bool,
}

impl Outcome {
    pub fn hit(points: Points, explanation: impl Into<String>) -> Self {
        Self {
            correct: true,
            score_delta: points as i64,
            resource_delta: 0,
            explanation: explanation.into(),
            notes: Vec::new(),
            passed: false,
        }
    }

    pub fn miss(explanation: impl Into<String>) -> Self {
        Self {
            correct: false,
            score_delta: 0,
            resource_delta: 0,
            explanation: explanation.into(),
            notes: Vec::new(),
            passed: false,
        }
    }

    pub fn pass() -> Self {
        Self {
            passed: true,
            ..Self::miss(String::new())
        }
    }

    pub fn with_score(mut self, delta: i64) -> Self {
        self.score_delta = delta;
        self
    }

    pub fn with_resource(mut self, delta: i32) -> Self {
        self.resource_delta = delta;
        self
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }
}

/// The contract every mini-game fulfils.
pub trait GameRules: Send + 'static {
    type Scenario: Scenario;
    type Decision: Copy + Debug;

    const GAME: GameId;

    /// Buttons offered on the play screen, in display order.
    const CHOICES: &'static [Choice];

    /// Map a pressed button onto this game's decision, if offered.
    fn decision(&self, choice: Choice) -> Option<Self::Decision>;

    fn pool(&self) -> &'static [Self::Scenario];

    /// Counters at mount and after every reset.
    fn initial_board(&self) -> Scoreboard;

    /// Countdown length and restart policy. None means untimed.
    fn countdown(&self) -> Option<(Seconds, RestartPolicy)>;

    fn selection(&self) -> Selection {
        Selection::Random
    }

    /// Highest difficulty eligible for the next draw. None means no gate.
    fn difficulty_ceiling(&self, _board: &Scoreboard) -> Option<u32> {
        None
    }

    /// Answers after which the session ends on its own.
    fn round_limit(&self) -> Option<u32> {
        None
    }

    /// Score credited when the session starts.
    fn opening_score(&self) -> Points {
        0
    }

    fn evaluate(
        &self,
        scenario: &Self::Scenario,
        decision: Self::Decision,
        board: &Scoreboard,
        rng: &mut GameRng,
    ) -> Outcome;

    /// Checked after every evaluated decision; true raises the level by one.
    fn level_up_due(&self, _board: &Scoreboard) -> bool {
        false
    }

    /// Title earned for the current board, e.g. an analyst rank.
    fn title(&self, _board: &Scoreboard) -> Option<String> {
        None
    }
}
