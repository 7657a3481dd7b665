//! Card Cloner Tycoon: play the fraudster to learn how detection works.
//!
//! Each round offers one fraud attempt, gated by difficulty:
//! only attempts with difficulty ≤ min(round + 1, 7) are drawn.
//!
//! Attempting rolls against
//!   detection_risk = min(heat + difficulty × 10, 100)
//! Caught: heat +30, score −100 (floored at 0).
//! Got away: score + potential gain, heat +10.
//! Laying low cools heat by 5 and moves straight to the next round.
//! Heat at the limit ends the run.

use crate::{
    clock::RestartPolicy,
    command::Choice,
    config::CardClonerConfig,
    rng::GameRng,
    rules::{GameRules, Outcome, Scenario},
    scoreboard::{Resource, Scoreboard},
    snapshot::Field,
    types::{GameId, Points, ScenarioId, Seconds},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Attempt,
    LayLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudType {
    CardTesting,
    Skimming,
    OnlineFraud,
    AtmFraud,
}

impl FraudType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CardTesting => "Card Testing",
            Self::Skimming    => "Skimming",
            Self::OnlineFraud => "Online Fraud",
            Self::AtmFraud    => "ATM Fraud",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FraudAttempt {
    pub id: ScenarioId,
    pub fraud_type: FraudType,
    pub description: &'static str,
    pub difficulty: u32,
    pub potential_gain: Points,
    pub detection_methods: &'static [&'static str],
    pub prevention_tips: &'static [&'static str],
    /// Flagged by the scenario author as a heavily monitored scheme.
    pub caught: bool,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectionSystem {
    pub name: &'static str,
    pub description: &'static str,
    /// Rough catch rate in percent.
    pub effectiveness: u32,
    pub triggers: &'static [&'static str],
}

pub static DETECTION_SYSTEMS: [DetectionSystem; 5] = [
    DetectionSystem {
        name: "Velocity Checking",
        description: "Monitors transaction frequency and patterns",
        effectiveness: 85,
        triggers: &["Multiple transactions", "Rapid card usage", "Geographic velocity"],
    },
    DetectionSystem {
        name: "Device Fingerprinting",
        description: "Tracks unique device characteristics",
        effectiveness: 90,
        triggers: &["New/unknown device", "Device inconsistencies", "Suspicious browser patterns"],
    },
    DetectionSystem {
        name: "Behavioral Analysis",
        description: "Analyzes user behavior patterns",
        effectiveness: 75,
        triggers: &["Unusual spending patterns", "Time-based anomalies", "Merchant preferences"],
    },
    DetectionSystem {
        name: "Geolocation Tracking",
        description: "Monitors location-based transaction patterns",
        effectiveness: 80,
        triggers: &["Impossible travel times", "Foreign transactions", "Location jumps"],
    },
    DetectionSystem {
        name: "Amount Analysis",
        description: "Flags unusual transaction amounts",
        effectiveness: 70,
        triggers: &["Test transactions ($1)", "High-value purchases", "Round numbers"],
    },
];

pub static ATTEMPTS: [FraudAttempt; 6] = [
    FraudAttempt {
        id: "cct-card-testing",
        fraud_type: FraudType::CardTesting,
        description: "Test stolen card with small $1 purchases to verify if card is active",
        difficulty: 2,
        potential_gain: 1,
        detection_methods: &["Amount Analysis", "Velocity Checking"],
        prevention_tips: &[
            "Banks flag multiple $1 transactions as testing",
            "Velocity checks detect rapid small transactions",
            "Card issuers have test transaction detection algorithms",
        ],
        caught: true,
        explanation: "Card testing is easily detected by modern fraud systems. \
                      Multiple $1 transactions trigger immediate alerts.",
    },
    FraudAttempt {
        id: "cct-gas-skimming",
        fraud_type: FraudType::Skimming,
        description: "Use skimmed card data at gas stations and ATMs for cash withdrawals",
        difficulty: 4,
        potential_gain: 500,
        detection_methods: &["Geolocation Tracking", "Behavioral Analysis"],
        prevention_tips: &[
            "ATM cameras record all transactions",
            "Chip cards are much harder to clone than magnetic strips",
            "Banks monitor ATM usage patterns for anomalies",
        ],
        caught: false,
        explanation: "Skimming can be successful but leaves physical evidence. \
                      Modern chip cards make this harder.",
    },
    FraudAttempt {
        id: "cct-online-electronics",
        fraud_type: FraudType::OnlineFraud,
        description: "Use stolen card details for high-value online electronics purchases",
        difficulty: 6,
        potential_gain: 2000,
        detection_methods: &["Device Fingerprinting", "Behavioral Analysis", "Geolocation Tracking"],
        prevention_tips: &[
            "Online merchants use sophisticated fraud detection",
            "Device fingerprinting can identify fraudulent devices",
            "Shipping addresses are validated against cardholder data",
        ],
        caught: true,
        explanation: "Online fraud is heavily monitored. Device fingerprinting, IP tracking, \
                      and shipping validation make this very risky.",
    },
    FraudAttempt {
        id: "cct-atm-cloning",
        fraud_type: FraudType::AtmFraud,
        description: "Clone cards and use them at ATMs in low-surveillance areas",
        difficulty: 5,
        potential_gain: 800,
        detection_methods: &["Geolocation Tracking", "Velocity Checking"],
        prevention_tips: &[
            "ATM networks share fraud data in real-time",
            "Geographic analysis detects unusual ATM usage patterns",
            "Daily withdrawal limits reduce potential losses",
        ],
        caught: false,
        explanation: "ATM fraud can work but is limited by withdrawal limits \
                      and increasing surveillance.",
    },
    FraudAttempt {
        id: "cct-gift-cards",
        fraud_type: FraudType::OnlineFraud,
        description: "Purchase gift cards online to convert stolen card data to untraceable value",
        difficulty: 3,
        potential_gain: 200,
        detection_methods: &["Behavioral Analysis", "Amount Analysis"],
        prevention_tips: &[
            "Gift card purchases are heavily monitored for fraud",
            "Many merchants limit gift card purchases per transaction",
            "Digital gift cards can be tracked and cancelled",
        ],
        caught: true,
        explanation: "Gift card fraud is a common technique but merchants have specific \
                      controls for gift card purchases.",
    },
    FraudAttempt {
        id: "cct-mass-skimming",
        fraud_type: FraudType::Skimming,
        description: "Install skimming devices at busy retail locations for mass card harvesting",
        difficulty: 7,
        potential_gain: 5000,
        detection_methods: &["All systems - high-risk operation"],
        prevention_tips: &[
            "Retail locations have extensive security cameras",
            "Chip cards make skimming much more difficult",
            "Employees are trained to spot skimming devices",
            "Law enforcement actively monitors for skimming operations",
        ],
        caught: true,
        explanation: "Large-scale skimming operations are high-risk and heavily prosecuted. \
                      Modern security makes this extremely dangerous.",
    },
];

impl Scenario for FraudAttempt {
    fn id(&self) -> ScenarioId {
        self.id
    }

    fn difficulty(&self) -> u32 {
        self.difficulty
    }

    fn prompt(&self) -> &'static str {
        "Attempt this scheme or lay low?"
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("Scheme", self.fraud_type.label()),
            Field::new("Plan", self.description),
            Field::new("Difficulty", format!("{}/10", self.difficulty)),
            Field::new("Potential Gain", format!("${}", self.potential_gain)),
        ]
    }
}

pub struct CardClonerTycoon {
    config: CardClonerConfig,
}

impl CardClonerTycoon {
    pub fn new(config: CardClonerConfig) -> Self {
        Self { config }
    }

    pub fn detection_systems() -> &'static [DetectionSystem] {
        &DETECTION_SYSTEMS
    }

    /// Percent chance that `attempt` is caught at the given heat.
    pub fn detection_risk(&self, attempt: &FraudAttempt, heat: u32) -> u32 {
        (heat + attempt.difficulty * self.config.risk_per_difficulty).min(100)
    }

    fn education(attempt: &FraudAttempt) -> Vec<String> {
        let detected_by = format!("Detected by: {}", attempt.detection_methods.join(", "));
        std::iter::once(detected_by)
            .chain(attempt.prevention_tips.iter().map(|tip| tip.to_string()))
            .collect()
    }
}

impl Default for CardClonerTycoon {
    fn default() -> Self {
        Self::new(CardClonerConfig::default())
    }
}

impl GameRules for CardClonerTycoon {
    type Scenario = FraudAttempt;
    type Decision = Move;

    const GAME: GameId = GameId::CardCloner;
    const CHOICES: &'static [Choice] = &[Choice::Attempt, Choice::LayLow];

    fn decision(&self, choice: Choice) -> Option<Move> {
        match choice {
            Choice::Attempt => Some(Move::Attempt),
            Choice::LayLow  => Some(Move::LayLow),
            _ => None,
        }
    }

    fn pool(&self) -> &'static [FraudAttempt] {
        &ATTEMPTS
    }

    fn initial_board(&self) -> Scoreboard {
        Scoreboard::new(Resource::heat(self.config.heat_limit))
    }

    fn countdown(&self) -> Option<(Seconds, RestartPolicy)> {
        Some((self.config.countdown_secs, RestartPolicy::EveryRound))
    }

    /// `board.round` is the number of rounds already drawn, so the next
    /// draw is round `board.round + 1`.
    fn difficulty_ceiling(&self, board: &Scoreboard) -> Option<u32> {
        let next_round = board.round + 1;
        Some((next_round + 1).min(self.config.max_difficulty))
    }

    fn evaluate(
        &self,
        attempt: &FraudAttempt,
        mv: Move,
        board: &Scoreboard,
        rng: &mut GameRng,
    ) -> Outcome {
        if mv == Move::LayLow {
            return Outcome::pass().with_resource(-(self.config.lay_low_cooldown as i32));
        }

        let heat = board.resource.heat_level().unwrap_or(0);
        let risk = self.detection_risk(attempt, heat);
        let rolled_caught = rng.next_percent() < risk as f64;
        let caught = rolled_caught || (self.config.honor_scenario_caught_flag && attempt.caught);
        log::debug!(
            "card_cloner: {} risk={risk}% heat={heat} caught={caught}",
            attempt.id
        );

        if caught {
            Outcome::miss(format!("Caught! {}", attempt.explanation))
                .with_score(-(self.config.caught_penalty as i64))
                .with_resource(self.config.caught_heat as i32)
                .with_notes(Self::education(attempt))
        } else {
            Outcome::hit(
                attempt.potential_gain,
                format!("Got away with ${}. {}", attempt.potential_gain, attempt.explanation),
            )
            .with_resource(self.config.success_heat as i32)
            .with_notes(Self::education(attempt))
        }
    }
}
