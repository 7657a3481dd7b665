//! Counters shared by every game: score, streak, level, round, and the
//! optional bounded resource (lives or heat).

use crate::{rules::Outcome, types::Points};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resource {
    Unbounded,
    /// Lives in [0, max]. Zero means the session is over.
    Lives { remaining: u32, max: u32 },
    /// Detection heat in [0, limit]. Reaching the limit ends the session.
    Heat { level: u32, limit: u32 },
}

impl Resource {
    pub fn lives(max: u32) -> Self {
        Self::Lives { remaining: max, max }
    }

    pub fn heat(limit: u32) -> Self {
        Self::Heat { level: 0, limit }
    }

    /// Shift the resource by `delta`, clamped to its bounds.
    pub fn apply(&mut self, delta: i32) {
        match self {
            Self::Unbounded => {}
            Self::Lives { remaining, max } => {
                *remaining = (*remaining as i64 + delta as i64).clamp(0, *max as i64) as u32;
            }
            Self::Heat { level, limit } => {
                *level = (*level as i64 + delta as i64).clamp(0, *limit as i64) as u32;
            }
        }
    }

    pub fn exhausted(&self) -> bool {
        match self {
            Self::Unbounded => false,
            Self::Lives { remaining, .. } => *remaining == 0,
            Self::Heat { level, limit } => level >= limit,
        }
    }

    pub fn heat_level(&self) -> Option<u32> {
        match self {
            Self::Heat { level, .. } => Some(*level),
            _ => None,
        }
    }

    pub fn lives_left(&self) -> Option<u32> {
        match self {
            Self::Lives { remaining, .. } => Some(*remaining),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scoreboard {
    pub score:       Points,
    pub streak:      u32,
    pub best_streak: u32,
    pub level:       u32,
    /// Number of scenarios drawn so far; the current round number.
    pub round:       u32,
    pub answered:    u32,
    pub correct:     u32,
    pub resource:    Resource,
}

impl Scoreboard {
    pub fn new(resource: Resource) -> Self {
        Self {
            score:       0,
            streak:      0,
            best_streak: 0,
            level:       1,
            round:       0,
            answered:    0,
            correct:     0,
            resource,
        }
    }

    /// Rounded share of correct answers. 100 before the first answer.
    pub fn accuracy_pct(&self) -> u32 {
        if self.answered == 0 {
            return 100;
        }
        ((self.correct as f64 / self.answered as f64) * 100.0).round() as u32
    }

    pub fn missed(&self) -> u32 {
        self.answered - self.correct
    }

    /// Fold one evaluated decision into the counters.
    /// Returns the score change actually applied after flooring at zero.
    pub(crate) fn record(&mut self, outcome: &Outcome) -> i64 {
        self.resource.apply(outcome.resource_delta);
        if outcome.passed {
            return 0;
        }

        self.answered += 1;
        if outcome.correct {
            self.correct += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }

        let before = self.score as i64;
        let after = (before + outcome.score_delta).max(0);
        self.score = after as Points;
        after - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_clamps_to_limit() {
        let mut heat = Resource::heat(100);
        for _ in 0..5 {
            heat.apply(30);
        }
        assert_eq!(heat.heat_level(), Some(100));
        assert!(heat.exhausted());
        heat.apply(-500);
        assert_eq!(heat.heat_level(), Some(0));
    }

    #[test]
    fn lives_never_underflow() {
        let mut lives = Resource::lives(3);
        for _ in 0..5 {
            lives.apply(-1);
        }
        assert_eq!(lives.lives_left(), Some(0));
        assert!(lives.exhausted());
    }

    #[test]
    fn penalty_floors_score_at_zero() {
        let mut board = Scoreboard::new(Resource::Unbounded);
        board.score = 40;
        let applied = board.record(&Outcome::miss("caught").with_score(-100));
        assert_eq!(board.score, 0);
        assert_eq!(applied, -40);
    }

    #[test]
    fn streak_resets_on_miss_but_best_survives() {
        let mut board = Scoreboard::new(Resource::Unbounded);
        board.record(&Outcome::hit(10, "ok"));
        board.record(&Outcome::hit(10, "ok"));
        board.record(&Outcome::miss("no"));
        assert_eq!(board.streak, 0);
        assert_eq!(board.best_streak, 2);
        assert_eq!(board.accuracy_pct(), 67);
    }

    #[test]
    fn passed_round_counts_nothing() {
        let mut board = Scoreboard::new(Resource::heat(100));
        board.resource.apply(20);
        board.record(&Outcome::pass().with_resource(-5));
        assert_eq!(board.answered, 0);
        assert_eq!(board.resource.heat_level(), Some(15));
    }
}
