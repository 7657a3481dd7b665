//! Dashboard host tests.
//!
//! Tests cover: mounting and unmounting games, commands with nothing
//! mounted, progress folding, the event log, and JSON commands.

use fraudplay_core::{
    card_cloner::CardClonerTycoon,
    command::{Choice, PlayerCommand},
    config::GameConfig,
    dashboard::{catalog, PlayerProgress},
    engine::GameEngine,
    error::{GameError, GameResult},
    event::{EndReason, GameEvent},
    pattern_model::TrainingSource,
    session::{Phase, Session},
    types::GameId,
};

#[test]
fn catalog_lists_every_game_once() {
    let entries = catalog();
    let games: Vec<GameId> = entries.iter().map(|e| e.game).collect();
    assert_eq!(games, GameId::ALL.to_vec());
    assert_eq!(entries[4].difficulty, "Expert");
}

#[test]
fn baseline_progress_matches_showcase_profile() {
    let progress = PlayerProgress::baseline();
    assert_eq!(progress.total_score, 2850);
    assert_eq!(progress.games_played, 47);
    assert_eq!(progress.rank, "Fraud Detective");
    assert_eq!(progress.badges.len(), 4);
    assert_eq!(progress.stats_for(GameId::SpotTheFraud).unwrap().best_score, 950);
    assert_eq!(progress.average_accuracy(), 76);
}

#[test]
fn select_mounts_and_starts_the_game() -> GameResult<()> {
    let mut engine = GameEngine::build_test(1);
    let events = engine.apply(PlayerCommand::Select { game: GameId::FraudAnalyst })?;

    assert!(matches!(events[0], GameEvent::GameSelected { game: GameId::FraudAnalyst, mount: 0 }));
    assert!(matches!(events[1], GameEvent::SessionStarted { .. }));
    assert!(matches!(events[2], GameEvent::ScenarioDrawn { round: 1, .. }));
    assert_eq!(engine.active_game(), Some(GameId::FraudAnalyst));

    let snapshot = engine.snapshot().unwrap();
    assert_eq!(snapshot.title, "Be the Fraud Analyst");
    assert_eq!(snapshot.choices, vec![Choice::Approve, Choice::Escalate, Choice::Decline]);
    assert!(snapshot.scenario.is_some());
    Ok(())
}

#[test]
fn back_unmounts_and_discards_the_session() -> GameResult<()> {
    let mut engine = GameEngine::build_test(2);
    engine.apply(PlayerCommand::Select { game: GameId::SpotTheFraud })?;
    let events = engine.apply(PlayerCommand::Back)?;

    assert_eq!(events, vec![GameEvent::ReturnedToDashboard { game: GameId::SpotTheFraud }]);
    assert!(engine.active().is_none());
    assert!(engine.snapshot().is_none());
    // Leaving mid-session records nothing.
    assert_eq!(engine.progress().games_played, 47);
    Ok(())
}

#[test]
fn session_commands_need_a_mounted_game() {
    let mut engine = GameEngine::build_test(3);
    for cmd in [
        PlayerCommand::Back,
        PlayerCommand::Start,
        PlayerCommand::Decide { choice: Choice::Fraudulent },
        PlayerCommand::Tick { seconds: 1 },
        PlayerCommand::Acknowledge,
        PlayerCommand::Reset,
    ] {
        let err = engine.apply(cmd.clone()).unwrap_err();
        assert!(matches!(err, GameError::NoActiveGame), "{cmd:?} gave {err:?}");
    }
    assert!(engine.event_log().is_empty());
}

#[test]
fn selecting_another_game_returns_to_dashboard_first() -> GameResult<()> {
    let mut engine = GameEngine::build_test(4);
    engine.apply(PlayerCommand::Select { game: GameId::SpotTheFraud })?;
    let events = engine.apply(PlayerCommand::Select { game: GameId::GuessTheOrigin })?;

    assert_eq!(events[0], GameEvent::ReturnedToDashboard { game: GameId::SpotTheFraud });
    assert!(matches!(events[1], GameEvent::GameSelected { game: GameId::GuessTheOrigin, mount: 1 }));
    assert_eq!(engine.active_game(), Some(GameId::GuessTheOrigin));
    Ok(())
}

#[test]
fn tick_stops_once_time_runs_out() -> GameResult<()> {
    let mut engine = GameEngine::build_test(5);
    engine.apply(PlayerCommand::Select { game: GameId::SpotTheFraud })?;

    let events = engine.apply(PlayerCommand::Tick { seconds: 300 })?;
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        GameEvent::SessionEnded { reason: EndReason::TimeExpired, final_score: 0, .. }
    ));
    assert!(engine.active().unwrap().is_ended());
    Ok(())
}

#[test]
fn finished_session_folds_into_progress() -> GameResult<()> {
    let mut engine = GameEngine::build_test(6);
    engine.apply(PlayerCommand::Select { game: GameId::SpotTheFraud })?;
    engine.apply(PlayerCommand::Tick { seconds: 30 })?;

    let progress = engine.progress();
    assert_eq!(progress.games_played, 48);
    assert_eq!(progress.total_score, 2850);
    let stats = progress.stats_for(GameId::SpotTheFraud).unwrap();
    assert_eq!(stats.played, 16);
    assert_eq!(stats.best_score, 950);
    Ok(())
}

#[test]
fn perfect_prediction_run_sets_new_best() -> GameResult<()> {
    let mut engine = GameEngine::build_test(7);
    engine.use_training_source(TrainingSource::upload("uploads/march.csv"));
    engine.apply(PlayerCommand::Select { game: GameId::PredictThePattern })?;

    while let Some(snapshot) = engine.snapshot() {
        match snapshot.phase {
            Phase::AwaitingDecision { scenario } => {
                let fraud = fraudplay_core::pattern_model::TEST_DATASET[scenario].is_fraud;
                let choice = if fraud { Choice::Fraudulent } else { Choice::Legitimate };
                engine.apply(PlayerCommand::Decide { choice })?;
            }
            Phase::Feedback { .. } => {
                engine.apply(PlayerCommand::Acknowledge)?;
            }
            _ => break,
        }
    }

    let stats = engine.progress().stats_for(GameId::PredictThePattern).unwrap();
    assert_eq!(stats.best_score, 3000);
    assert_eq!(engine.progress().total_score, 2850 + 3000);
    Ok(())
}

#[test]
fn mounted_game_uses_engine_config() -> GameResult<()> {
    let mut config = GameConfig::default();
    config.card_cloner.heat_limit = 40;
    let mut engine = GameEngine::new(8, config);
    engine.apply(PlayerCommand::Select { game: GameId::CardCloner })?;

    let session = engine
        .active()
        .unwrap()
        .as_any()
        .downcast_ref::<Session<CardClonerTycoon>>()
        .expect("card cloner session");
    assert_eq!(session.board().resource.heat_level(), Some(0));
    assert_eq!(engine.snapshot().unwrap().board.resource, fraudplay_core::scoreboard::Resource::heat(40));
    Ok(())
}

#[test]
fn event_log_rows_carry_json_payloads() -> GameResult<()> {
    let mut engine = GameEngine::build_test(9);
    engine.apply(PlayerCommand::Select { game: GameId::SpotTheFraud })?;
    engine.apply(PlayerCommand::Decide { choice: Choice::Fraudulent })?;
    engine.apply(PlayerCommand::Back)?;

    let log = engine.event_log();
    for (i, entry) in log.iter().enumerate() {
        assert_eq!(entry.seq, i as u64);
        assert_eq!(entry.game, GameId::SpotTheFraud);
        let payload: serde_json::Value = serde_json::from_str(&entry.payload).expect("json");
        assert_eq!(payload["type"], entry.event_type.as_str());
    }
    assert_eq!(engine.events_of_type("decision_evaluated").count(), 1);
    assert_eq!(log.last().unwrap().event_type, "returned_to_dashboard");
    Ok(())
}

#[test]
fn commands_parse_from_json() {
    let decide: PlayerCommand =
        serde_json::from_str(r#"{"cmd":"decide","choice":"lay_low"}"#).unwrap();
    assert!(matches!(decide, PlayerCommand::Decide { choice: Choice::LayLow }));

    let select: PlayerCommand =
        serde_json::from_str(r#"{"cmd":"select","game":"guess_the_origin"}"#).unwrap();
    assert!(matches!(select, PlayerCommand::Select { game: GameId::GuessTheOrigin }));

    let tick: PlayerCommand = serde_json::from_str(r#"{"cmd":"tick","seconds":5}"#).unwrap();
    assert!(matches!(tick, PlayerCommand::Tick { seconds: 5 }));

    assert!(serde_json::from_str::<PlayerCommand>(r#"{"cmd":"cheat"}"#).is_err());
}

#[test]
fn huge_tick_on_untimed_game_returns_at_once() -> GameResult<()> {
    let mut engine = GameEngine::build_test(10);
    engine.apply(PlayerCommand::Select { game: GameId::PredictThePattern })?;

    let events = engine.apply(PlayerCommand::Tick { seconds: u32::MAX })?;
    assert!(events.is_empty());
    assert!(matches!(engine.snapshot().unwrap().phase, Phase::AwaitingDecision { .. }));
    Ok(())
}

#[test]
fn huge_tick_on_feedback_screen_returns_at_once() -> GameResult<()> {
    let mut engine = GameEngine::build_test(11);
    engine.apply(PlayerCommand::Select { game: GameId::SpotTheFraud })?;
    engine.apply(PlayerCommand::Tick { seconds: 4 })?;
    engine.apply(PlayerCommand::Decide { choice: Choice::Fraudulent })?;

    let events = engine.apply(PlayerCommand::Tick { seconds: u32::MAX })?;
    assert!(events.is_empty());
    let snapshot = engine.snapshot().unwrap();
    assert!(matches!(snapshot.phase, Phase::Feedback { .. }));
    assert_eq!(snapshot.countdown.unwrap().remaining, 26);
    Ok(())
}

#[test]
fn huge_tick_while_deciding_stops_at_expiry() -> GameResult<()> {
    let mut engine = GameEngine::build_test(12);
    engine.apply(PlayerCommand::Select { game: GameId::CardCloner })?;

    let events = engine.apply(PlayerCommand::Tick { seconds: u32::MAX })?;
    assert!(matches!(
        events.as_slice(),
        [GameEvent::SessionEnded { reason: EndReason::TimeExpired, .. }]
    ));
    assert_eq!(engine.events_of_type("session_ended").count(), 1);
    Ok(())
}

#[test]
fn games_resolve_from_their_slugs() {
    for game in GameId::ALL {
        assert_eq!(GameId::from_slug(game.slug()), Some(game));
    }
    assert_eq!(GameId::from_slug("card_cloner"), Some(GameId::CardCloner));
    assert_eq!(GameId::from_slug("Card Cloner Tycoon"), None);
}
