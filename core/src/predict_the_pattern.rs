//! Predict the Pattern: train the rule model, then out-guess it on a
//! held-out test set.
//!
//! The model is scored on the training set when the session starts; that
//! score is the opening score. The quiz then walks the five test rows in
//! order, and the session ends after the last one.

use crate::{
    clock::RestartPolicy,
    command::Choice,
    config::PredictThePatternConfig,
    pattern_model::{DataPoint, ModelMetrics, PatternModel, TrainingSource, TEST_DATASET},
    rng::GameRng,
    rules::{GameRules, Outcome, Scenario, Selection},
    scoreboard::{Resource, Scoreboard},
    snapshot::Field,
    spot_the_fraud::Verdict,
    types::{GameId, Points, ScenarioId, Seconds},
};

impl Scenario for DataPoint {
    fn id(&self) -> ScenarioId {
        self.id
    }

    fn prompt(&self) -> &'static str {
        "Will this transaction turn out to be fraud?"
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("Amount", format!("${:.2}", self.amount)),
            Field::new("Merchant", self.merchant),
            Field::new("Location", self.location),
            Field::new("Time", self.time()),
            Field::new("Category", self.category),
            Field::new("Weekend", if self.is_weekend { "Yes" } else { "No" }),
            Field::new("Foreign", if self.is_foreign { "Yes" } else { "No" }),
            Field::new("Velocity", format!("{}/10", self.velocity_score)),
        ]
    }
}

pub struct PredictThePattern {
    config: PredictThePatternConfig,
    model: PatternModel,
    source: TrainingSource,
    metrics: ModelMetrics,
}

impl PredictThePattern {
    pub fn new(config: PredictThePatternConfig, source: TrainingSource) -> Self {
        let model = PatternModel::new(&config);
        let dataset = source.dataset();
        let metrics = model.evaluate(dataset);
        log::info!(
            "predict_the_pattern: trained on {} rows, accuracy={:.1}% precision={:.1}% recall={:.1}%",
            dataset.len(),
            metrics.accuracy,
            metrics.precision,
            metrics.recall
        );
        Self { config, model, source, metrics }
    }

    pub fn metrics(&self) -> &ModelMetrics {
        &self.metrics
    }

    pub fn source(&self) -> &TrainingSource {
        &self.source
    }

    /// Points per correct test prediction.
    pub fn reward_per_prediction(&self) -> Points {
        self.config.submission_bonus_pool / TEST_DATASET.len() as Points
    }
}

impl Default for PredictThePattern {
    fn default() -> Self {
        Self::new(PredictThePatternConfig::default(), TrainingSource::Sample)
    }
}

impl GameRules for PredictThePattern {
    type Scenario = DataPoint;
    type Decision = Verdict;

    const GAME: GameId = GameId::PredictThePattern;
    const CHOICES: &'static [Choice] = &[Choice::Legitimate, Choice::Fraudulent];

    fn decision(&self, choice: Choice) -> Option<Verdict> {
        Verdict::from_choice(choice)
    }

    fn pool(&self) -> &'static [DataPoint] {
        &TEST_DATASET
    }

    fn initial_board(&self) -> Scoreboard {
        Scoreboard::new(Resource::Unbounded)
    }

    fn countdown(&self) -> Option<(Seconds, RestartPolicy)> {
        None
    }

    fn selection(&self) -> Selection {
        Selection::Sequential
    }

    fn round_limit(&self) -> Option<u32> {
        Some(TEST_DATASET.len() as u32)
    }

    fn opening_score(&self) -> Points {
        self.metrics.model_score()
    }

    fn evaluate(
        &self,
        data: &DataPoint,
        verdict: Verdict,
        _board: &Scoreboard,
        _rng: &mut GameRng,
    ) -> Outcome {
        let risk = self.model.risk_score(data);
        let model_says = if self.model.predicts_fraud(data) { "fraud" } else { "legitimate" };
        let actual = if data.is_fraud { "fraudulent" } else { "legitimate" };
        let explanation = format!(
            "This transaction was {actual}. The model scored it {risk}/{} and predicted {model_says}.",
            self.model.max_risk()
        );

        if verdict.is_fraud() == data.is_fraud {
            Outcome::hit(self.reward_per_prediction(), explanation)
        } else {
            Outcome::miss(explanation)
        }
    }
}
