//! Be the Fraud Analyst: approve, decline, or escalate card authorizations
//! the way a bank fraud desk would.

use crate::{
    clock::RestartPolicy,
    command::Choice,
    config::FraudAnalystConfig,
    rng::GameRng,
    rules::{GameRules, Outcome, Scenario},
    scoreboard::{Resource, Scoreboard},
    snapshot::Field,
    types::{GameId, ScenarioId, Seconds},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Approve,
    Decline,
    Escalate,
}

impl Action {
    pub fn from_choice(choice: Choice) -> Option<Self> {
        match choice {
            Choice::Approve  => Some(Self::Approve),
            Choice::Decline  => Some(Self::Decline),
            Choice::Escalate => Some(Self::Escalate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CustomerProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub age: u32,
    pub location: &'static str,
    /// Years since account opening.
    pub account_age: u32,
    /// Bureau-style risk score, 1 (low) to 10 (high).
    pub risk_score: u32,
    pub previous_fraud: bool,
    pub card_type: &'static str,
    pub credit_limit: f64,
    pub average_monthly_spending: f64,
}

#[derive(Debug, Clone)]
pub struct TransactionCase {
    pub id: ScenarioId,
    pub customer: CustomerProfile,
    pub amount: f64,
    pub merchant: &'static str,
    pub location: &'static str,
    pub time: &'static str,
    pub category: &'static str,
    pub device_id: &'static str,
    pub ip_address: &'static str,
    pub velocity_flags: &'static [&'static str],
    pub recommended_action: Action,
    pub reasoning: &'static str,
}

pub static CASES: [TransactionCase; 3] = [
    TransactionCase {
        id: "fa-routine-online",
        customer: CustomerProfile {
            id: "CUST001",
            name: "Alice Johnson",
            age: 34,
            location: "New York, NY",
            account_age: 5,
            risk_score: 2,
            previous_fraud: false,
            card_type: "Visa Gold",
            credit_limit: 5000.0,
            average_monthly_spending: 1200.0,
        },
        amount: 89.99,
        merchant: "Amazon",
        location: "Seattle, WA",
        time: "2:30 PM",
        category: "Online Shopping",
        device_id: "DEV_123456",
        ip_address: "192.168.1.100",
        velocity_flags: &[],
        recommended_action: Action::Approve,
        reasoning: "Normal transaction within spending pattern, legitimate merchant, no red flags.",
    },
    TransactionCase {
        id: "fa-mumbai-electronics",
        customer: CustomerProfile {
            id: "CUST002",
            name: "Bob Smith",
            age: 45,
            location: "Los Angeles, CA",
            account_age: 8,
            risk_score: 7,
            previous_fraud: true,
            card_type: "Mastercard Platinum",
            credit_limit: 10000.0,
            average_monthly_spending: 2500.0,
        },
        amount: 4999.99,
        merchant: "Electronics Palace",
        location: "Mumbai, India",
        time: "3:45 AM",
        category: "Electronics",
        device_id: "DEV_UNKNOWN",
        ip_address: "203.192.15.78",
        velocity_flags: &["Foreign country", "Unusual time", "High amount", "New device"],
        recommended_action: Action::Decline,
        reasoning: "Multiple red flags: foreign transaction, unusual time, high amount, \
                    previous fraud history, unknown device.",
    },
    TransactionCase {
        id: "fa-paris-boutique",
        customer: CustomerProfile {
            id: "CUST003",
            name: "Carol Davis",
            age: 28,
            location: "Chicago, IL",
            account_age: 3,
            risk_score: 4,
            previous_fraud: false,
            card_type: "Visa Classic",
            credit_limit: 3000.0,
            average_monthly_spending: 800.0,
        },
        amount: 2500.00,
        merchant: "Luxury Boutique",
        location: "Paris, France",
        time: "10:15 AM",
        category: "Fashion",
        device_id: "DEV_789012",
        ip_address: "85.115.47.92",
        velocity_flags: &["Foreign country", "High amount vs average"],
        recommended_action: Action::Escalate,
        reasoning: "Unusual high-value foreign transaction, but could be legitimate travel \
                    purchase. Needs human review.",
    },
];

impl Scenario for TransactionCase {
    fn id(&self) -> ScenarioId {
        self.id
    }

    fn prompt(&self) -> &'static str {
        "Approve, decline, or escalate this authorization?"
    }

    fn fields(&self) -> Vec<Field> {
        let c = &self.customer;
        let mut fields = vec![
            Field::new("Customer", format!("{} ({}), age {}", c.name, c.id, c.age)),
            Field::new("Home", c.location),
            Field::new("Account Age", format!("{} years", c.account_age)),
            Field::new("Risk Score", format!("{}/10", c.risk_score)),
            Field::new("Previous Fraud", if c.previous_fraud { "Yes" } else { "No" }),
            Field::new("Card", format!("{}, limit ${:.0}", c.card_type, c.credit_limit)),
            Field::new("Avg Monthly Spend", format!("${:.0}", c.average_monthly_spending)),
            Field::new("Amount", format!("${:.2}", self.amount)),
            Field::new("Merchant", self.merchant),
            Field::new("Location", self.location),
            Field::new("Time", self.time),
            Field::new("Category", self.category),
            Field::new("Device", self.device_id),
            Field::new("IP Address", self.ip_address),
        ];
        if !self.velocity_flags.is_empty() {
            fields.push(Field::new("Velocity Flags", self.velocity_flags.join(", ")));
        }
        fields
    }
}

pub struct FraudAnalyst {
    config: FraudAnalystConfig,
}

impl FraudAnalyst {
    pub fn new(config: FraudAnalystConfig) -> Self {
        Self { config }
    }

    /// Highest rank whose threshold the score has reached.
    pub fn rank_for(&self, score: u64) -> &str {
        self.config
            .ranks
            .iter()
            .filter(|r| score >= r.min_score)
            .max_by_key(|r| r.min_score)
            .map(|r| r.name.as_str())
            .unwrap_or("Trainee")
    }
}

impl Default for FraudAnalyst {
    fn default() -> Self {
        Self::new(FraudAnalystConfig::default())
    }
}

impl GameRules for FraudAnalyst {
    type Scenario = TransactionCase;
    type Decision = Action;

    const GAME: GameId = GameId::FraudAnalyst;
    const CHOICES: &'static [Choice] = &[Choice::Approve, Choice::Escalate, Choice::Decline];

    fn decision(&self, choice: Choice) -> Option<Action> {
        Action::from_choice(choice)
    }

    fn pool(&self) -> &'static [TransactionCase] {
        &CASES
    }

    fn initial_board(&self) -> Scoreboard {
        Scoreboard::new(Resource::Unbounded)
    }

    fn countdown(&self) -> Option<(Seconds, RestartPolicy)> {
        Some((self.config.countdown_secs, RestartPolicy::EveryRound))
    }

    fn evaluate(
        &self,
        case: &TransactionCase,
        action: Action,
        _board: &Scoreboard,
        _rng: &mut GameRng,
    ) -> Outcome {
        if action == case.recommended_action {
            Outcome::hit(self.config.reward, format!("Correct decision. {}", case.reasoning))
        } else {
            Outcome::miss(format!("Incorrect decision. {}", case.reasoning))
        }
    }

    fn title(&self, board: &Scoreboard) -> Option<String> {
        Some(self.rank_for(board.score).to_string())
    }
}
