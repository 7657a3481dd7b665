use crate::types::{Points, Seconds};
use serde::{Deserialize, Serialize};

// ── Spot the Fraud ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpotTheFraudConfig {
    pub countdown_secs: Seconds,
    pub starting_lives: u32,
    /// Reward per correct call, multiplied by the current level.
    pub reward_per_level: Points,
    /// Level N is cleared once score reaches N × this value.
    pub level_score_step: Points,
}

impl Default for SpotTheFraudConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 30,
            starting_lives: 3,
            reward_per_level: 100,
            level_score_step: 500,
        }
    }
}

// ── Be the Fraud Analyst ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FraudAnalystConfig {
    pub countdown_secs: Seconds,
    pub reward: Points,
    pub ranks: Vec<RankConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankConfig {
    pub name: String,
    pub min_score: Points,
}

impl Default for FraudAnalystConfig {
    fn default() -> Self {
        let rank = |name: &str, min_score| RankConfig { name: name.into(), min_score };
        Self {
            countdown_secs: 45,
            reward: 150,
            ranks: vec![
                rank("Junior Analyst", 0),
                rank("Fraud Analyst", 500),
                rank("Senior Analyst", 1000),
                rank("Principal Analyst", 2000),
                rank("Fraud Manager", 3500),
            ],
        }
    }
}

// ── Guess the Fraud Origin ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuessTheOriginConfig {
    pub countdown_secs: Seconds,
    pub reward_per_level: Points,
    pub questions_per_level: u32,
}

impl Default for GuessTheOriginConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 40,
            reward_per_level: 200,
            questions_per_level: 5,
        }
    }
}

// ── Card Cloner Tycoon ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CardClonerConfig {
    pub countdown_secs: Seconds,
    pub heat_limit: u32,
    pub caught_heat: u32,
    pub success_heat: u32,
    pub lay_low_cooldown: u32,
    pub caught_penalty: Points,
    /// Detection risk added per point of attempt difficulty.
    pub risk_per_difficulty: u32,
    /// Hard ceiling on attempt difficulty regardless of round.
    pub max_difficulty: u32,
    /// When true, attempts whose record is flagged `caught` are always
    /// caught, whatever the roll.
    pub honor_scenario_caught_flag: bool,
}

impl Default for CardClonerConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 60,
            heat_limit: 100,
            caught_heat: 30,
            success_heat: 10,
            lay_low_cooldown: 5,
            caught_penalty: 100,
            risk_per_difficulty: 10,
            max_difficulty: 7,
            honor_scenario_caught_flag: false,
        }
    }
}

// ── Predict the Pattern ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictThePatternConfig {
    /// Risk score at or above which the model predicts fraud.
    pub fraud_threshold: u32,
    pub max_risk: u32,
    /// Points split evenly across the test rows; a perfect run earns all of it.
    pub submission_bonus_pool: Points,
}

impl Default for PredictThePatternConfig {
    fn default() -> Self {
        Self {
            fraud_threshold: 5,
            max_risk: 10,
            submission_bonus_pool: 1000,
        }
    }
}

// ── Top level ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub spot_the_fraud: SpotTheFraudConfig,
    pub fraud_analyst: FraudAnalystConfig,
    pub guess_the_origin: GuessTheOriginConfig,
    pub card_cloner: CardClonerConfig,
    pub predict_the_pattern: PredictThePatternConfig,
}

impl GameConfig {
    /// Load from a JSON file. Missing sections and fields keep their defaults.
    /// In tests, use GameConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content).map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        log::debug!("Loaded game config: {config:?}");
        Ok(config)
    }

    /// A zero-second countdown could never expire, so it is rejected.
    pub fn validate(&self) -> anyhow::Result<()> {
        let countdowns = [
            ("spot_the_fraud", self.spot_the_fraud.countdown_secs),
            ("fraud_analyst", self.fraud_analyst.countdown_secs),
            ("guess_the_origin", self.guess_the_origin.countdown_secs),
            ("card_cloner", self.card_cloner.countdown_secs),
        ];
        for (game, secs) in countdowns {
            anyhow::ensure!(secs > 0, "{game}.countdown_secs must be at least 1");
        }
        Ok(())
    }
}
