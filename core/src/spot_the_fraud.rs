//! Spot the Fraud: call each card transaction fraudulent or legitimate
//! before the clock runs out.
//!
//! This game:
//!   1. Draws a transaction uniformly from a fixed pool
//!   2. Awards 100 × level per correct call
//!   3. Takes a life per wrong call; three lives to start
//!   4. Raises the level once score reaches level × 500,
//!      refilling the 30 second clock

use crate::{
    clock::RestartPolicy,
    command::Choice,
    config::SpotTheFraudConfig,
    rng::GameRng,
    rules::{GameRules, Outcome, Scenario},
    scoreboard::{Resource, Scoreboard},
    snapshot::Field,
    types::{GameId, ScenarioId, Seconds},
};

/// Fraud / legitimate verdict shared by the binary-classification games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Fraudulent,
    Legitimate,
}

impl Verdict {
    pub fn from_choice(choice: Choice) -> Option<Self> {
        match choice {
            Choice::Fraudulent => Some(Self::Fraudulent),
            Choice::Legitimate => Some(Self::Legitimate),
            _ => None,
        }
    }

    pub fn is_fraud(&self) -> bool {
        matches!(self, Self::Fraudulent)
    }
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: ScenarioId,
    pub amount: f64,
    pub merchant: &'static str,
    pub location: &'static str,
    pub time: &'static str,
    pub category: &'static str,
    pub is_fraud: bool,
    pub suspicious_factors: &'static [&'static str],
}

pub static TRANSACTIONS: [Transaction; 6] = [
    Transaction {
        id: "stf-coffee",
        amount: 2.99,
        merchant: "Coffee Shop",
        location: "New York, NY",
        time: "2:30 PM",
        category: "Food & Dining",
        is_fraud: false,
        suspicious_factors: &[],
    },
    Transaction {
        id: "stf-lagos-electronics",
        amount: 4999.99,
        merchant: "Electronics Store",
        location: "Lagos, Nigeria",
        time: "3:45 AM",
        category: "Electronics",
        is_fraud: true,
        suspicious_factors: &["Unusual location", "High amount", "Unusual time", "Foreign country"],
    },
    Transaction {
        id: "stf-gas",
        amount: 89.99,
        merchant: "Gas Station",
        location: "Los Angeles, CA",
        time: "8:15 AM",
        category: "Gas & Automotive",
        is_fraud: false,
        suspicious_factors: &[],
    },
    Transaction {
        id: "stf-moscow-test",
        amount: 1.00,
        merchant: "Unknown Merchant",
        location: "Moscow, Russia",
        time: "11:59 PM",
        category: "Other",
        is_fraud: true,
        suspicious_factors: &["Test transaction", "Foreign country", "Unknown merchant", "Card testing"],
    },
    Transaction {
        id: "stf-amazon",
        amount: 156.78,
        merchant: "Amazon",
        location: "Seattle, WA",
        time: "4:22 PM",
        category: "Shopping",
        is_fraud: false,
        suspicious_factors: &[],
    },
    Transaction {
        id: "stf-paris-luxury",
        amount: 899.99,
        merchant: "Luxury Store",
        location: "Paris, France",
        time: "2:15 AM",
        category: "Shopping",
        is_fraud: true,
        suspicious_factors: &["High amount", "Foreign country", "Unusual time", "Luxury purchase"],
    },
];

impl Scenario for Transaction {
    fn id(&self) -> ScenarioId {
        self.id
    }

    fn prompt(&self) -> &'static str {
        "Is this transaction fraudulent?"
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![
            Field::new("Amount", format!("${:.2}", self.amount)),
            Field::new("Time", self.time),
            Field::new("Merchant", self.merchant),
            Field::new("Location", self.location),
            Field::new("Category", self.category),
        ];
        if !self.suspicious_factors.is_empty() {
            fields.push(Field::new("Potential Red Flags", self.suspicious_factors.join(", ")));
        }
        fields
    }
}

pub struct SpotTheFraud {
    config: SpotTheFraudConfig,
}

impl SpotTheFraud {
    pub fn new(config: SpotTheFraudConfig) -> Self {
        Self { config }
    }

    fn explain(txn: &Transaction, correct: bool) -> String {
        let flags = txn.suspicious_factors.join(", ");
        match (correct, txn.is_fraud) {
            (true, true) => format!("Correct! This transaction was fraudulent. Red flags: {flags}"),
            (true, false) => {
                "Correct! This was a legitimate transaction with no suspicious indicators.".to_string()
            }
            (false, true) => format!("Wrong! This was fraudulent. Red flags you missed: {flags}"),
            (false, false) => "Wrong! This was actually a legitimate transaction. \
                               Be careful not to flag normal purchases."
                .to_string(),
        }
    }
}

impl Default for SpotTheFraud {
    fn default() -> Self {
        Self::new(SpotTheFraudConfig::default())
    }
}

impl GameRules for SpotTheFraud {
    type Scenario = Transaction;
    type Decision = Verdict;

    const GAME: GameId = GameId::SpotTheFraud;
    const CHOICES: &'static [Choice] = &[Choice::Legitimate, Choice::Fraudulent];

    fn decision(&self, choice: Choice) -> Option<Verdict> {
        Verdict::from_choice(choice)
    }

    fn pool(&self) -> &'static [Transaction] {
        &TRANSACTIONS
    }

    fn initial_board(&self) -> Scoreboard {
        Scoreboard::new(Resource::lives(self.config.starting_lives))
    }

    fn countdown(&self) -> Option<(Seconds, RestartPolicy)> {
        Some((self.config.countdown_secs, RestartPolicy::OnLevelUp))
    }

    fn evaluate(
        &self,
        txn: &Transaction,
        verdict: Verdict,
        board: &Scoreboard,
        _rng: &mut GameRng,
    ) -> Outcome {
        let correct = verdict.is_fraud() == txn.is_fraud;
        let explanation = Self::explain(txn, correct);
        if correct {
            Outcome::hit(self.config.reward_per_level * board.level as u64, explanation)
        } else {
            Outcome::miss(explanation).with_resource(-1)
        }
    }

    fn level_up_due(&self, board: &Scoreboard) -> bool {
        board.score >= board.level as u64 * self.config.level_score_step
    }
}
