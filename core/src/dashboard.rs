//! Dashboard: the game catalog and the player's progress.
//!
//! Baseline progress is a fixed showcase profile; sessions finished in
//! this process are folded in on top of it.

use crate::{
    scoreboard::Scoreboard,
    types::{GameId, Points},
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub game: GameId,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: &'static str,
    pub estimated_time: &'static str,
    pub rewards: &'static str,
}

pub fn catalog() -> Vec<CatalogEntry> {
    GameId::ALL.into_iter().map(catalog_entry).collect()
}

pub fn catalog_entry(game: GameId) -> CatalogEntry {
    let (description, difficulty, estimated_time, rewards) = match game {
        GameId::SpotTheFraud => (
            "Identify fraudulent transactions under time pressure",
            "Beginner",
            "3-5 min",
            "Up to 1000 points",
        ),
        GameId::FraudAnalyst => (
            "Make decisions as a bank fraud detection specialist",
            "Intermediate",
            "5-8 min",
            "Up to 1500 points",
        ),
        GameId::PredictThePattern => (
            "Train ML models to detect fraud patterns",
            "Advanced",
            "8-12 min",
            "Up to 2000 points",
        ),
        GameId::GuessTheOrigin => (
            "Analyze global transaction patterns on a world map",
            "Intermediate",
            "4-6 min",
            "Up to 1200 points",
        ),
        GameId::CardCloner => (
            "Learn fraud detection by thinking like a fraudster",
            "Expert",
            "10-15 min",
            "Up to 2500 points",
        ),
    };
    CatalogEntry {
        game,
        title: game.title(),
        description,
        difficulty,
        estimated_time,
        rewards,
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct GameStats {
    pub played: u32,
    pub won: u32,
    pub accuracy: u32,
    pub best_score: Points,
    pub level: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerProgress {
    pub total_score: Points,
    pub games_played: u32,
    pub rank: String,
    pub badges: Vec<String>,
    pub stats: BTreeMap<&'static str, GameStats>,
}

impl PlayerProgress {
    /// The showcase profile every dashboard starts from.
    pub fn baseline() -> Self {
        let stats = |played, won, accuracy, best_score, level| GameStats {
            played,
            won,
            accuracy,
            best_score,
            level,
        };
        let mut by_game = BTreeMap::new();
        by_game.insert(GameId::SpotTheFraud.slug(), stats(15, 12, 80, 950, 3));
        by_game.insert(GameId::FraudAnalyst.slug(), stats(10, 8, 85, 1200, 2));
        by_game.insert(GameId::PredictThePattern.slug(), stats(8, 6, 75, 800, 2));
        by_game.insert(GameId::GuessTheOrigin.slug(), stats(9, 7, 78, 1100, 2));
        by_game.insert(GameId::CardCloner.slug(), stats(5, 3, 60, 650, 1));

        Self {
            total_score: 2850,
            games_played: 47,
            rank: "Fraud Detective".into(),
            badges: ["First Steps", "Pattern Master", "Global Guardian", "Analyst Pro"]
                .into_iter()
                .map(String::from)
                .collect(),
            stats: by_game,
        }
    }

    pub fn stats_for(&self, game: GameId) -> Option<&GameStats> {
        self.stats.get(game.slug())
    }

    /// Fold a finished session into the profile.
    pub fn record(&mut self, game: GameId, board: &Scoreboard) {
        self.total_score += board.score;
        self.games_played += 1;

        let entry = self.stats.entry(game.slug()).or_insert(GameStats {
            played: 0,
            won: 0,
            accuracy: 0,
            best_score: 0,
            level: 1,
        });
        entry.played += 1;
        entry.best_score = entry.best_score.max(board.score);
        entry.level = entry.level.max(board.level);
        log::debug!(
            "dashboard: recorded {} score={} (best {})",
            game.slug(),
            board.score,
            entry.best_score
        );
    }

    /// Mean accuracy across games, rounded, as shown under Quick Stats.
    pub fn average_accuracy(&self) -> u32 {
        if self.stats.is_empty() {
            return 0;
        }
        let sum: u32 = self.stats.values().map(|s| s.accuracy).sum();
        (sum as f64 / self.stats.len() as f64).round() as u32
    }
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self::baseline()
    }
}
