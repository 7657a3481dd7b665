//! The round/session state machine shared by every game.
//!
//! PHASES:
//!   idle → awaiting_scenario → awaiting_decision → feedback
//!        → { awaiting_scenario | ended }
//!
//! RULES:
//!   - At most one scenario is current; a decision resolves it before the
//!     next draw.
//!   - The countdown only runs while awaiting a decision.
//!   - `ended` is terminal until reset. Reset is accepted in every phase.
//!   - A command that is invalid for the phase fails and changes nothing.

use crate::{
    clock::{Countdown, RestartPolicy},
    command::{Choice, SessionCommand},
    error::{GameError, GameResult},
    event::{EndReason, GameEvent},
    playable::Playable,
    rng::GameRng,
    rules::{GameRules, Outcome, Scenario, Selection},
    scoreboard::Scoreboard,
    snapshot::{Feedback, ScenarioCard, SessionSnapshot},
    types::GameId,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    AwaitingScenario,
    /// `scenario` indexes the game's static pool.
    AwaitingDecision { scenario: usize },
    /// `pending_end` is set when the decision exhausted the session.
    Feedback { pending_end: Option<EndReason> },
    Ended { reason: EndReason },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle                     => "idle",
            Self::AwaitingScenario         => "awaiting_scenario",
            Self::AwaitingDecision { .. }  => "awaiting_decision",
            Self::Feedback { .. }          => "feedback",
            Self::Ended { .. }             => "ended",
        }
    }
}

pub struct Session<R: GameRules> {
    rules:     R,
    rng:       GameRng,
    phase:     Phase,
    board:     Scoreboard,
    countdown: Option<Countdown>,
    feedback:  Option<Feedback>,
    /// Next position for sequential selection.
    cursor:    usize,
}

impl<R: GameRules> Session<R> {
    pub fn new(rules: R, rng: GameRng) -> Self {
        let board = rules.initial_board();
        let countdown = rules.countdown().map(|(secs, _)| Countdown::new(secs));
        Self {
            rules,
            rng,
            phase: Phase::Idle,
            board,
            countdown,
            feedback: None,
            cursor: 0,
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Scoreboard {
        &self.board
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// The scenario awaiting a decision, if any.
    pub fn current(&self) -> Option<&'static R::Scenario> {
        match self.phase {
            Phase::AwaitingDecision { scenario } => self.rules.pool().get(scenario),
            _ => None,
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, Phase::Ended { .. })
    }

    /// Awaiting a decision with a countdown still running.
    pub fn counting_down(&self) -> bool {
        matches!(self.phase, Phase::AwaitingDecision { .. })
            && self.countdown.as_ref().is_some_and(|c| !c.expired())
    }

    pub fn handle(&mut self, cmd: SessionCommand) -> GameResult<Vec<GameEvent>> {
        match cmd {
            SessionCommand::Start             => self.start(),
            SessionCommand::Decide { choice } => self.decide(choice),
            SessionCommand::Tick              => self.tick(),
            SessionCommand::Acknowledge       => self.acknowledge(),
            SessionCommand::Reset             => Ok(self.reset()),
        }
    }

    /// Mount-time entry: credit the opening score and draw the first scenario.
    pub fn start(&mut self) -> GameResult<Vec<GameEvent>> {
        if self.phase != Phase::Idle {
            return Err(self.rejected("start"));
        }

        self.board.score = self.rules.opening_score();
        if let Some(countdown) = &mut self.countdown {
            countdown.restart();
        }

        let mut events = vec![GameEvent::SessionStarted {
            game: R::GAME,
            opening_score: self.board.score,
        }];
        log::info!("{}: session started (opening score {})", R::GAME.slug(), self.board.score);

        self.phase = Phase::AwaitingScenario;
        self.draw(&mut events)?;
        Ok(events)
    }

    pub fn decide(&mut self, choice: Choice) -> GameResult<Vec<GameEvent>> {
        let Phase::AwaitingDecision { scenario: index } = self.phase else {
            return Err(self.rejected("decide"));
        };
        let decision = self.rules.decision(choice).ok_or(GameError::UnsupportedChoice {
            game: R::GAME,
            choice,
        })?;

        let pool = self.rules.pool();
        let scenario = &pool[index];
        let outcome = self.rules.evaluate(scenario, decision, &self.board, &mut self.rng);
        let applied = self.board.record(&outcome);
        let mut events = Vec::new();

        if outcome.passed {
            log::debug!("{}: round {} passed on {}", R::GAME.slug(), self.board.round, scenario.id());
            events.push(GameEvent::RoundPassed {
                game: R::GAME,
                round: self.board.round,
                scenario_id: scenario.id(),
            });
            self.feedback = None;
            self.phase = Phase::AwaitingScenario;
            self.draw(&mut events)?;
            return Ok(events);
        }

        log::debug!(
            "{}: round {} {} -> correct={} delta={applied}",
            R::GAME.slug(),
            self.board.round,
            scenario.id(),
            outcome.correct,
        );
        events.push(GameEvent::DecisionEvaluated {
            game: R::GAME,
            round: self.board.round,
            scenario_id: scenario.id(),
            choice,
            correct: outcome.correct,
            score_delta: applied,
            score: self.board.score,
            explanation: outcome.explanation.clone(),
        });

        if self.rules.level_up_due(&self.board) {
            self.board.level += 1;
            events.push(GameEvent::LevelReached { game: R::GAME, level: self.board.level });
            if let Some((_, RestartPolicy::OnLevelUp)) = self.rules.countdown() {
                self.restart_countdown();
            }
        }

        let pending_end = self.pending_end();
        self.feedback = Some(feedback_from(scenario.id(), choice, applied, outcome));
        self.phase = Phase::Feedback { pending_end };
        Ok(events)
    }

    /// One second elapses. Only a session awaiting a decision is timed.
    pub fn tick(&mut self) -> GameResult<Vec<GameEvent>> {
        if !matches!(self.phase, Phase::AwaitingDecision { .. }) {
            log::trace!("{}: tick ignored while {}", R::GAME.slug(), self.phase.name());
            return Ok(vec![]);
        }
        let expired = match &mut self.countdown {
            Some(countdown) => countdown.tick(),
            None => false,
        };
        if expired {
            return Ok(vec![self.end(EndReason::TimeExpired)]);
        }
        Ok(vec![])
    }

    /// Leave the feedback screen: either end or draw the next scenario.
    pub fn acknowledge(&mut self) -> GameResult<Vec<GameEvent>> {
        let Phase::Feedback { pending_end } = self.phase else {
            return Err(self.rejected("acknowledge"));
        };
        if let Some(reason) = pending_end {
            return Ok(vec![self.end(reason)]);
        }
        let mut events = Vec::new();
        self.phase = Phase::AwaitingScenario;
        self.draw(&mut events)?;
        Ok(events)
    }

    /// Restore every counter to its starting constant and return to idle.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        self.board = self.rules.initial_board();
        self.countdown = self.rules.countdown().map(|(secs, _)| Countdown::new(secs));
        self.feedback = None;
        self.cursor = 0;
        self.phase = Phase::Idle;
        log::info!("{}: session reset", R::GAME.slug());
        vec![GameEvent::SessionReset { game: R::GAME }]
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game: R::GAME,
            title: R::GAME.title(),
            phase: self.phase,
            board: self.board.clone(),
            accuracy_pct: self.board.accuracy_pct(),
            rank: self.rules.title(&self.board),
            countdown: self.countdown.clone(),
            scenario: self.current().map(|s| ScenarioCard {
                id: s.id(),
                prompt: s.prompt(),
                fields: s.fields(),
            }),
            choices: R::CHOICES.to_vec(),
            feedback: self.feedback.clone(),
        }
    }

    /// Indices of the pool eligible under the current difficulty ceiling.
    pub fn eligible(&self) -> Vec<usize> {
        let ceiling = self.rules.difficulty_ceiling(&self.board);
        self.rules
            .pool()
            .iter()
            .enumerate()
            .filter(|(_, s)| ceiling.map_or(true, |c| s.difficulty() <= c))
            .map(|(i, _)| i)
            .collect()
    }

    fn draw(&mut self, events: &mut Vec<GameEvent>) -> GameResult<()> {
        debug_assert_eq!(self.phase, Phase::AwaitingScenario);

        let eligible = self.eligible();
        if eligible.is_empty() {
            let ceiling = self.rules.difficulty_ceiling(&self.board).unwrap_or(0);
            return Err(GameError::NoEligibleScenario { ceiling });
        }
        let index = match self.rules.selection() {
            Selection::Random => eligible[self.rng.pick_index(eligible.len())],
            Selection::Sequential => {
                let index = eligible[self.cursor % eligible.len()];
                self.cursor += 1;
                index
            }
        };

        self.board.round += 1;
        if let Some((_, RestartPolicy::EveryRound)) = self.rules.countdown() {
            self.restart_countdown();
        }

        let scenario = &self.rules.pool()[index];
        log::debug!(
            "{}: round {} drew {} from {} eligible",
            R::GAME.slug(),
            self.board.round,
            scenario.id(),
            eligible.len()
        );
        events.push(GameEvent::ScenarioDrawn {
            game: R::GAME,
            round: self.board.round,
            level: self.board.level,
            scenario_id: scenario.id(),
        });
        self.phase = Phase::AwaitingDecision { scenario: index };
        Ok(())
    }

    fn pending_end(&self) -> Option<EndReason> {
        if self.board.resource.exhausted() {
            return Some(EndReason::ResourceExhausted);
        }
        match self.rules.round_limit() {
            Some(limit) if self.board.answered >= limit => Some(EndReason::RoundLimitReached),
            _ => None,
        }
    }

    fn end(&mut self, reason: EndReason) -> GameEvent {
        self.phase = Phase::Ended { reason };
        log::info!(
            "{}: session ended ({}) score={} level={}",
            R::GAME.slug(),
            reason.describe(),
            self.board.score,
            self.board.level
        );
        GameEvent::SessionEnded {
            game: R::GAME,
            reason,
            final_score: self.board.score,
            level: self.board.level,
            best_streak: self.board.best_streak,
        }
    }

    fn restart_countdown(&mut self) {
        if let Some(countdown) = &mut self.countdown {
            countdown.restart();
        }
    }

    fn rejected(&self, event: &'static str) -> GameError {
        log::warn!("{}: '{event}' rejected while {}", R::GAME.slug(), self.phase.name());
        GameError::InvalidTransition {
            phase: self.phase.name(),
            event,
        }
    }
}

fn feedback_from(scenario_id: &'static str, choice: Choice, applied: i64, outcome: Outcome) -> Feedback {
    Feedback {
        scenario_id,
        choice,
        correct: outcome.correct,
        score_delta: applied,
        explanation: outcome.explanation,
        notes: outcome.notes,
    }
}

impl<R: GameRules> Playable for Session<R> {
    fn game(&self) -> GameId {
        R::GAME
    }

    fn handle(&mut self, cmd: SessionCommand) -> GameResult<Vec<GameEvent>> {
        Session::handle(self, cmd)
    }

    fn snapshot(&self) -> SessionSnapshot {
        Session::snapshot(self)
    }

    fn board(&self) -> &Scoreboard {
        &self.board
    }

    fn is_ended(&self) -> bool {
        Session::is_ended(self)
    }

    fn counting_down(&self) -> bool {
        Session::counting_down(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
