//! The game engine: the dashboard host for FraudPlay.
//!
//! RULES:
//!   - At most one game is mounted at a time.
//!   - Selecting a game mounts a fresh session and starts it.
//!   - Back (or selecting another game) discards the mounted session.
//!   - All randomness flows through the RngBank.
//!   - Every event is appended to the event log.

use crate::{
    card_cloner::CardClonerTycoon,
    command::{PlayerCommand, SessionCommand},
    config::GameConfig,
    dashboard::PlayerProgress,
    error::{GameError, GameResult},
    event::{EventLogEntry, GameEvent},
    fraud_analyst::FraudAnalyst,
    guess_the_origin::GuessTheOrigin,
    pattern_model::TrainingSource,
    playable::Playable,
    predict_the_pattern::PredictThePattern,
    rng::RngBank,
    session::Session,
    snapshot::SessionSnapshot,
    spot_the_fraud::SpotTheFraud,
    types::{GameId, Seconds},
};

pub struct GameEngine {
    pub config:      GameConfig,
    pub rng_bank:    RngBank,
    active:          Option<Box<dyn Playable>>,
    mounts:          u64,
    training_source: TrainingSource,
    progress:        PlayerProgress,
    event_log:       Vec<EventLogEntry>,
}

impl GameEngine {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            config,
            rng_bank:        RngBank::new(seed),
            active:          None,
            mounts:          0,
            training_source: TrainingSource::Sample,
            progress:        PlayerProgress::baseline(),
            event_log:       Vec::new(),
        }
    }

    /// Engine with default tuning. Used by tests.
    pub fn build_test(seed: u64) -> Self {
        Self::new(seed, GameConfig::default())
    }

    /// Training data for the next Predict the Pattern mount.
    pub fn use_training_source(&mut self, source: TrainingSource) {
        self.training_source = source;
    }

    pub fn apply(&mut self, cmd: PlayerCommand) -> GameResult<Vec<GameEvent>> {
        match cmd {
            PlayerCommand::Select { game }     => self.select(game),
            PlayerCommand::Back                => self.back(),
            PlayerCommand::Start               => self.forward(SessionCommand::Start),
            PlayerCommand::Decide { choice }   => self.forward(SessionCommand::Decide { choice }),
            PlayerCommand::Tick { seconds }    => self.elapse(seconds),
            PlayerCommand::Acknowledge         => self.forward(SessionCommand::Acknowledge),
            PlayerCommand::Reset               => self.forward(SessionCommand::Reset),
        }
    }

    /// Mount `game` and start its first round.
    pub fn select(&mut self, game: GameId) -> GameResult<Vec<GameEvent>> {
        let mut events = Vec::new();
        if self.active.is_some() {
            events.extend(self.back()?);
        }

        let mount = self.mounts;
        self.mounts += 1;
        let mut session = self.mount(game, mount);

        let mut mounted = vec![GameEvent::GameSelected { game, mount }];
        mounted.extend(session.handle(SessionCommand::Start)?);
        self.active = Some(session);
        log::info!("Mounted {} (mount #{mount})", game.slug());

        self.record(&mounted)?;
        events.extend(mounted);
        Ok(events)
    }

    /// Unmount the active game and return to the dashboard.
    pub fn back(&mut self) -> GameResult<Vec<GameEvent>> {
        let session = self.active.take().ok_or(GameError::NoActiveGame)?;
        let events = vec![GameEvent::ReturnedToDashboard { game: session.game() }];
        self.record(&events)?;
        Ok(events)
    }

    /// Let `seconds` timer ticks elapse. Stops as soon as the mounted
    /// session is no longer counting down (ended, on feedback, or untimed).
    pub fn elapse(&mut self, seconds: Seconds) -> GameResult<Vec<GameEvent>> {
        let session = self.active.as_ref().ok_or(GameError::NoActiveGame)?;
        let mut events = Vec::new();
        if !session.counting_down() {
            log::trace!("{}: {seconds}s elapsed with no countdown running", session.game().slug());
            return Ok(events);
        }
        for _ in 0..seconds {
            events.extend(self.forward(SessionCommand::Tick)?);
            if !self.active.as_ref().is_some_and(|s| s.counting_down()) {
                break;
            }
        }
        Ok(events)
    }

    pub fn active(&self) -> Option<&dyn Playable> {
        self.active.as_deref()
    }

    pub fn active_game(&self) -> Option<GameId> {
        self.active.as_ref().map(|s| s.game())
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.active.as_ref().map(|s| s.snapshot())
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.event_log
    }

    /// Log entries of one event type, in order.
    pub fn events_of_type<'a>(&'a self, event_type: &'a str) -> impl Iterator<Item = &'a EventLogEntry> {
        self.event_log.iter().filter(move |e| e.event_type == event_type)
    }

    fn forward(&mut self, cmd: SessionCommand) -> GameResult<Vec<GameEvent>> {
        let session = self.active.as_mut().ok_or(GameError::NoActiveGame)?;
        let events = session.handle(cmd)?;
        self.record(&events)?;
        Ok(events)
    }

    fn mount(&self, game: GameId, mount: u64) -> Box<dyn Playable> {
        let rng = self.rng_bank.for_game(game, mount);
        match game {
            GameId::SpotTheFraud => Box::new(Session::new(
                SpotTheFraud::new(self.config.spot_the_fraud.clone()),
                rng,
            )),
            GameId::FraudAnalyst => Box::new(Session::new(
                FraudAnalyst::new(self.config.fraud_analyst.clone()),
                rng,
            )),
            GameId::PredictThePattern => Box::new(Session::new(
                PredictThePattern::new(
                    self.config.predict_the_pattern.clone(),
                    self.training_source.clone(),
                ),
                rng,
            )),
            GameId::GuessTheOrigin => Box::new(Session::new(
                GuessTheOrigin::new(self.config.guess_the_origin.clone()),
                rng,
            )),
            GameId::CardCloner => Box::new(Session::new(
                CardClonerTycoon::new(self.config.card_cloner.clone()),
                rng,
            )),
        }
    }

    /// Append events to the log; fold finished sessions into progress.
    fn record(&mut self, events: &[GameEvent]) -> GameResult<()> {
        for event in events {
            if let GameEvent::SessionEnded { game, .. } = event {
                if let Some(session) = &self.active {
                    self.progress.record(*game, session.board());
                }
            }

            let entry = EventLogEntry {
                seq:        self.event_log.len() as u64,
                game:       event.game(),
                event_type: event.type_name().to_string(),
                payload:    serde_json::to_string(event)?,
            };
            self.event_log.push(entry);
        }
        Ok(())
    }
}
