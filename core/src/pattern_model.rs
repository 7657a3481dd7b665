//! Rule-based fraud "model" behind Predict the Pattern.
//!
//! There is no learning here. Each data point gets an additive risk score:
//!   amount > 1000        +3   (else amount > 500  +1)
//!   foreign              +2
//!   hour < 6 or > 22     +2
//!   weekend              +1
//!   velocity score > 5   +2
//!   Online / Luxury      +1
//! clamped to [0, max_risk]. At or above the threshold predicts fraud.
//! "Training" is one pass of that rule over a constant dataset to
//! produce accuracy, precision, recall and F1.

use crate::{config::PredictThePatternConfig, types::Points};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub id: &'static str,
    pub amount: f64,
    pub merchant: &'static str,
    pub location: &'static str,
    /// Hour of day, 0 to 23.
    pub hour: u32,
    pub minute: u32,
    pub category: &'static str,
    pub is_weekend: bool,
    pub is_foreign: bool,
    /// Recent-transaction velocity, 1 (calm) to 10 (burst).
    pub velocity_score: u32,
    /// Risk score recorded alongside the sample; shown, never used by the rule.
    pub labelled_risk: u32,
    pub is_fraud: bool,
}

impl DataPoint {
    pub fn time(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

#[allow(clippy::too_many_arguments)]
const fn row(
    id: &'static str,
    amount: f64,
    merchant: &'static str,
    location: &'static str,
    (hour, minute): (u32, u32),
    category: &'static str,
    is_weekend: bool,
    is_foreign: bool,
    velocity_score: u32,
    labelled_risk: u32,
    is_fraud: bool,
) -> DataPoint {
    DataPoint {
        id,
        amount,
        merchant,
        location,
        hour,
        minute,
        category,
        is_weekend,
        is_foreign,
        velocity_score,
        labelled_risk,
        is_fraud,
    }
}

pub static SAMPLE_DATASET: [DataPoint; 8] = [
    row("train-coffee", 50.0, "Coffee Shop", "New York", (9, 0), "Food", false, false, 1, 2, false),
    row("train-nigeria", 5000.0, "Unknown", "Nigeria", (3, 0), "Online", true, true, 8, 9, true),
    row("train-gas", 120.0, "Gas Station", "California", (14, 0), "Gas", false, false, 2, 1, false),
    row("train-russia", 1.0, "Test Merchant", "Russia", (23, 59), "Other", true, true, 9, 10, true),
    row("train-amazon", 89.0, "Amazon", "Washington", (16, 0), "Shopping", false, false, 1, 1, false),
    row("train-paris", 2500.0, "Luxury Store", "Paris", (2, 0), "Fashion", true, true, 7, 8, true),
    row("train-restaurant", 25.0, "Restaurant", "Texas", (19, 0), "Food", false, false, 1, 1, false),
    row("train-china", 999.0, "Electronics", "China", (1, 0), "Tech", true, true, 6, 7, true),
];

pub static TEST_DATASET: [DataPoint; 5] = [
    row("test-grocery", 75.0, "Grocery Store", "New York", (18, 0), "Food", false, false, 1, 2, false),
    row("test-suspicious", 3000.0, "Suspicious Store", "Unknown", (4, 0), "Online", true, true, 9, 8, true),
    row("test-pharmacy", 45.0, "Pharmacy", "California", (11, 0), "Health", false, false, 1, 1, false),
    row("test-jewelry", 1500.0, "Jewelry Store", "India", (3, 30), "Luxury", true, true, 8, 9, true),
    row("test-department", 200.0, "Department Store", "Illinois", (15, 0), "Shopping", false, false, 2, 2, false),
];

/// Where the player's training data came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingSource {
    Sample,
    /// The file is acknowledged but never parsed; the sample set stands in.
    Upload(String),
}

impl TrainingSource {
    pub fn upload(path: impl AsRef<Path>) -> Self {
        Self::Upload(path.as_ref().display().to_string())
    }

    pub fn dataset(&self) -> &'static [DataPoint] {
        if let Self::Upload(path) = self {
            log::info!("Using the built-in sample dataset in place of uploaded file {path}");
        }
        &SAMPLE_DATASET
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelMetrics {
    /// All four are percentages in [0, 100].
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

impl ModelMetrics {
    /// Score credited for the trained model.
    pub fn model_score(&self) -> Points {
        (self.accuracy * 10.0 + self.precision * 5.0 + self.recall * 5.0).round() as Points
    }
}

pub struct PatternModel {
    fraud_threshold: u32,
    max_risk: u32,
}

impl PatternModel {
    pub fn new(config: &PredictThePatternConfig) -> Self {
        Self {
            fraud_threshold: config.fraud_threshold,
            max_risk: config.max_risk,
        }
    }

    pub fn max_risk(&self) -> u32 {
        self.max_risk
    }

    pub fn risk_score(&self, data: &DataPoint) -> u32 {
        let mut risk = 0;

        if data.amount > 1000.0 {
            risk += 3;
        } else if data.amount > 500.0 {
            risk += 1;
        }
        if data.is_foreign {
            risk += 2;
        }
        if data.hour < 6 || data.hour > 22 {
            risk += 2;
        }
        if data.is_weekend {
            risk += 1;
        }
        if data.velocity_score > 5 {
            risk += 2;
        }
        if matches!(data.category, "Online" | "Luxury") {
            risk += 1;
        }

        risk.min(self.max_risk)
    }

    pub fn predicts_fraud(&self, data: &DataPoint) -> bool {
        self.risk_score(data) >= self.fraud_threshold
    }

    pub fn evaluate(&self, dataset: &[DataPoint]) -> ModelMetrics {
        let mut correct = 0usize;
        let mut actual_fraud = 0usize;
        let mut predicted_fraud = 0usize;
        let mut true_positives = 0usize;

        for data in dataset {
            let predicted = self.predicts_fraud(data);
            if predicted == data.is_fraud {
                correct += 1;
            }
            if data.is_fraud {
                actual_fraud += 1;
            }
            if predicted {
                predicted_fraud += 1;
                if data.is_fraud {
                    true_positives += 1;
                }
            }
        }

        let pct = |num: usize, den: usize| {
            if den == 0 {
                0.0
            } else {
                num as f64 / den as f64 * 100.0
            }
        };
        let accuracy = pct(correct, dataset.len());
        let precision = pct(true_positives, predicted_fraud);
        let recall = pct(true_positives, actual_fraud);
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        ModelMetrics { accuracy, precision, recall, f1_score }
    }
}

impl Default for PatternModel {
    fn default() -> Self {
        Self::new(&PredictThePatternConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_id(id: &str) -> &'static DataPoint {
        SAMPLE_DATASET
            .iter()
            .chain(TEST_DATASET.iter())
            .find(|d| d.id == id)
            .unwrap()
    }

    #[test]
    fn risk_clamps_at_ten() {
        let model = PatternModel::default();
        // 3 + 2 + 2 + 1 + 2 + 1 = 11 before the clamp.
        assert_eq!(model.risk_score(by_id("train-nigeria")), 10);
        assert_eq!(model.risk_score(by_id("test-jewelry")), 10);
    }

    #[test]
    fn mid_amount_adds_one() {
        let model = PatternModel::default();
        // 999: +1 amount, +2 foreign, +2 hour 1, +1 weekend, +2 velocity 6.
        assert_eq!(model.risk_score(by_id("train-china")), 8);
    }

    #[test]
    fn late_night_boundary() {
        let model = PatternModel::default();
        let mut data = by_id("train-coffee").clone();
        data.hour = 22;
        assert_eq!(model.risk_score(&data), 0);
        data.hour = 23;
        assert_eq!(model.risk_score(&data), 2);
        data.hour = 5;
        assert_eq!(model.risk_score(&data), 2);
        data.hour = 6;
        assert_eq!(model.risk_score(&data), 0);
    }

    #[test]
    fn undefined_precision_is_zero() {
        let model = PatternModel::default();
        let metrics = model.evaluate(&[by_id("train-coffee").clone()]);
        assert_eq!(metrics.precision, 0.0);
        assert_eq!(metrics.recall, 0.0);
        assert_eq!(metrics.f1_score, 0.0);
        assert_eq!(metrics.accuracy, 100.0);
    }
}
