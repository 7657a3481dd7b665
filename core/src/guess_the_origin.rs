//! Guess the Fraud Origin: judge whether a card-present transaction far
//! from the customer's home is plausible travel or impossible travel.

use crate::{
    clock::RestartPolicy,
    command::Choice,
    config::GuessTheOriginConfig,
    rng::GameRng,
    rules::{GameRules, Outcome, Scenario},
    scoreboard::{Resource, Scoreboard},
    snapshot::Field,
    spot_the_fraud::Verdict,
    types::{GameId, ScenarioId, Seconds},
};

#[derive(Debug, Clone)]
pub struct Place {
    pub name: &'static str,
    pub country: &'static str,
    /// (latitude, longitude)
    pub coordinates: (f64, f64),
    pub timezone: &'static str,
}

#[derive(Debug, Clone)]
pub struct OriginScenario {
    pub id: ScenarioId,
    pub customer_location: Place,
    pub transaction_location: Place,
    pub transaction_time: &'static str,
    pub customer_local_time: &'static str,
    pub amount: f64,
    pub merchant: &'static str,
    pub category: &'static str,
    /// Hours between the customer's last known activity and this charge.
    pub time_difference_hours: u32,
    pub distance_miles: u32,
    pub is_legitimate: bool,
    pub explanation: &'static str,
}

const fn place(
    name: &'static str,
    country: &'static str,
    coordinates: (f64, f64),
    timezone: &'static str,
) -> Place {
    Place { name, country, coordinates, timezone }
}

pub static SCENARIOS: [OriginScenario; 6] = [
    OriginScenario {
        id: "gto-nyc-london",
        customer_location: place("New York", "USA", (40.7128, -74.0060), "EST"),
        transaction_location: place("London", "UK", (51.5074, -0.1278), "GMT"),
        transaction_time: "2:30 PM",
        customer_local_time: "9:30 AM",
        amount: 156.78,
        merchant: "Harrods Department Store",
        category: "Shopping",
        time_difference_hours: 5,
        distance_miles: 3459,
        is_legitimate: true,
        explanation: "Customer is likely traveling in London. The 5-hour time difference and \
                      reasonable shopping amount at a famous department store suggest legitimate \
                      travel spending.",
    },
    OriginScenario {
        id: "gto-la-sydney",
        customer_location: place("Los Angeles", "USA", (34.0522, -118.2437), "PST"),
        transaction_location: place("Sydney", "Australia", (-33.8688, 151.2093), "AEST"),
        transaction_time: "11:45 AM",
        customer_local_time: "4:45 PM (Previous Day)",
        amount: 4999.99,
        merchant: "Electronics Mega Store",
        category: "Electronics",
        time_difference_hours: 19,
        distance_miles: 7488,
        is_legitimate: false,
        explanation: "Impossible travel time! Customer was in LA yesterday evening and \
                      transaction shows in Sydney the next morning. No commercial flight can \
                      cover 7,488 miles in ~19 hours with time zones.",
    },
    OriginScenario {
        id: "gto-chicago-paris",
        customer_location: place("Chicago", "USA", (41.8781, -87.6298), "CST"),
        transaction_location: place("Paris", "France", (48.8566, 2.3522), "CET"),
        transaction_time: "8:15 PM",
        customer_local_time: "1:15 PM",
        amount: 89.50,
        merchant: "Cafe de la Paix",
        category: "Food & Dining",
        time_difference_hours: 7,
        distance_miles: 4143,
        is_legitimate: true,
        explanation: "Reasonable travel scenario. Customer likely flew to Paris (8+ hour flight \
                      is feasible) and is dining at a famous cafe. Time difference and amount \
                      are consistent with legitimate travel.",
    },
    OriginScenario {
        id: "gto-miami-tokyo",
        customer_location: place("Miami", "USA", (25.7617, -80.1918), "EST"),
        transaction_location: place("Tokyo", "Japan", (35.6762, 139.6503), "JST"),
        transaction_time: "3:00 AM",
        customer_local_time: "1:00 PM (Previous Day)",
        amount: 1.00,
        merchant: "Test Merchant 123",
        category: "Other",
        time_difference_hours: 14,
        distance_miles: 6755,
        is_legitimate: false,
        explanation: "Classic card testing fraud! $1 test transaction at suspicious merchant, \
                      impossible timing (would need to travel 6,755 miles in ~14 hours), and \
                      occurring at 3 AM local time.",
    },
    OriginScenario {
        id: "gto-seattle-vancouver",
        customer_location: place("Seattle", "USA", (47.6062, -122.3321), "PST"),
        transaction_location: place("Vancouver", "Canada", (49.2827, -123.1207), "PST"),
        transaction_time: "7:30 PM",
        customer_local_time: "7:30 PM",
        amount: 234.56,
        merchant: "Pacific Hotel",
        category: "Travel",
        time_difference_hours: 0,
        distance_miles: 120,
        is_legitimate: true,
        explanation: "Very reasonable cross-border transaction. Seattle to Vancouver is only \
                      120 miles (2-3 hour drive), same timezone, and hotel charge suggests \
                      legitimate travel.",
    },
    OriginScenario {
        id: "gto-boston-lagos",
        customer_location: place("Boston", "USA", (42.3601, -71.0589), "EST"),
        transaction_location: place("Lagos", "Nigeria", (6.5244, 3.3792), "WAT"),
        transaction_time: "2:45 AM",
        customer_local_time: "8:45 PM (Previous Day)",
        amount: 2500.00,
        merchant: "Quick Electronics",
        category: "Electronics",
        time_difference_hours: 6,
        distance_miles: 5247,
        is_legitimate: false,
        explanation: "Highly suspicious! Large electronics purchase in Lagos at 2:45 AM, \
                      customer was in Boston ~6 hours earlier. No legitimate way to travel \
                      5,247 miles in 6 hours.",
    },
];

impl OriginScenario {
    /// Average ground speed the customer would have needed, in mph.
    /// None when no time elapsed.
    pub fn implied_speed_mph(&self) -> Option<f64> {
        if self.time_difference_hours == 0 {
            return None;
        }
        Some(self.distance_miles as f64 / self.time_difference_hours as f64)
    }
}

impl Scenario for OriginScenario {
    fn id(&self) -> ScenarioId {
        self.id
    }

    fn prompt(&self) -> &'static str {
        "Is this transaction legitimate travel or fraud?"
    }

    fn fields(&self) -> Vec<Field> {
        let home = &self.customer_location;
        let away = &self.transaction_location;
        vec![
            Field::new("Customer Home", format!("{}, {} ({})", home.name, home.country, home.timezone)),
            Field::new("Transaction At", format!("{}, {} ({})", away.name, away.country, away.timezone)),
            Field::new("Local Time There", self.transaction_time),
            Field::new("Customer's Time", self.customer_local_time),
            Field::new("Amount", format!("${:.2}", self.amount)),
            Field::new("Merchant", format!("{} ({})", self.merchant, self.category)),
            Field::new("Distance", format!("{} miles", self.distance_miles)),
            Field::new("Time Difference", format!("{} hours", self.time_difference_hours)),
        ]
    }
}

pub struct GuessTheOrigin {
    config: GuessTheOriginConfig,
}

impl GuessTheOrigin {
    pub fn new(config: GuessTheOriginConfig) -> Self {
        Self { config }
    }
}

impl Default for GuessTheOrigin {
    fn default() -> Self {
        Self::new(GuessTheOriginConfig::default())
    }
}

impl GameRules for GuessTheOrigin {
    type Scenario = OriginScenario;
    type Decision = Verdict;

    const GAME: GameId = GameId::GuessTheOrigin;
    const CHOICES: &'static [Choice] = &[Choice::Legitimate, Choice::Fraudulent];

    fn decision(&self, choice: Choice) -> Option<Verdict> {
        Verdict::from_choice(choice)
    }

    fn pool(&self) -> &'static [OriginScenario] {
        &SCENARIOS
    }

    fn initial_board(&self) -> Scoreboard {
        Scoreboard::new(Resource::Unbounded)
    }

    fn countdown(&self) -> Option<(Seconds, RestartPolicy)> {
        Some((self.config.countdown_secs, RestartPolicy::OnLevelUp))
    }

    fn evaluate(
        &self,
        scenario: &OriginScenario,
        verdict: Verdict,
        board: &Scoreboard,
        _rng: &mut GameRng,
    ) -> Outcome {
        let called_legit = !verdict.is_fraud();
        if called_legit == scenario.is_legitimate {
            Outcome::hit(self.config.reward_per_level * board.level as u64, scenario.explanation)
        } else {
            Outcome::miss(scenario.explanation)
        }
    }

    fn level_up_due(&self, board: &Scoreboard) -> bool {
        let step = self.config.questions_per_level;
        step > 0 && board.answered > 0 && board.answered % step == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impossible_travel_needs_airliner_speed() {
        let sydney = SCENARIOS.iter().find(|s| s.id == "gto-la-sydney").unwrap();
        assert!(sydney.implied_speed_mph().unwrap() > 350.0);
        let vancouver = SCENARIOS.iter().find(|s| s.id == "gto-seattle-vancouver").unwrap();
        assert_eq!(vancouver.implied_speed_mph(), None);
    }
}
