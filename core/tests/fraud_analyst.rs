//! Be the Fraud Analyst tests.
//!
//! Tests cover: three-way decisions, running accuracy, rank titles,
//! and the per-case clock.

use fraudplay_core::{
    command::Choice,
    error::{GameError, GameResult},
    fraud_analyst::{Action, FraudAnalyst},
    rng::GameRng,
    session::Session,
};

fn build(seed: u64) -> Session<FraudAnalyst> {
    let mut session = Session::new(FraudAnalyst::default(), GameRng::from_seed(seed));
    session.start().expect("start");
    session
}

fn choice_for(action: Action) -> Choice {
    match action {
        Action::Approve  => Choice::Approve,
        Action::Decline  => Choice::Decline,
        Action::Escalate => Choice::Escalate,
    }
}

fn recommended(session: &Session<FraudAnalyst>) -> Choice {
    choice_for(session.current().unwrap().recommended_action)
}

fn not_recommended(session: &Session<FraudAnalyst>) -> Choice {
    match session.current().unwrap().recommended_action {
        Action::Approve => Choice::Decline,
        _ => Choice::Approve,
    }
}

#[test]
fn recommended_action_earns_flat_reward() -> GameResult<()> {
    let mut session = build(21);
    let reasoning = session.current().unwrap().reasoning;
    let choice = recommended(&session);
    session.decide(choice)?;

    let feedback = session.feedback().unwrap();
    assert!(feedback.correct);
    assert_eq!(feedback.explanation, format!("Correct decision. {reasoning}"));
    assert_eq!(session.board().score, 150);
    Ok(())
}

#[test]
fn other_actions_are_incorrect() -> GameResult<()> {
    let mut session = build(22);
    let reasoning = session.current().unwrap().reasoning;
    let choice = not_recommended(&session);
    session.decide(choice)?;

    let feedback = session.feedback().unwrap();
    assert!(!feedback.correct);
    assert_eq!(feedback.explanation, format!("Incorrect decision. {reasoning}"));
    assert_eq!(session.board().score, 0);
    Ok(())
}

#[test]
fn verdict_buttons_are_not_offered() {
    let mut session = build(23);
    assert!(matches!(
        session.decide(Choice::Fraudulent),
        Err(GameError::UnsupportedChoice { .. })
    ));
}

#[test]
fn accuracy_starts_at_hundred_and_tracks_answers() -> GameResult<()> {
    let mut session = build(24);
    assert_eq!(session.snapshot().accuracy_pct, 100);

    let choice = recommended(&session);
    session.decide(choice)?;
    session.acknowledge()?;
    let choice = not_recommended(&session);
    session.decide(choice)?;
    session.acknowledge()?;
    let choice = not_recommended(&session);
    session.decide(choice)?;

    assert_eq!(session.board().answered, 3);
    assert_eq!(session.snapshot().accuracy_pct, 33);
    Ok(())
}

#[test]
fn rank_climbs_with_score() -> GameResult<()> {
    let mut session = build(25);
    assert_eq!(session.snapshot().rank.as_deref(), Some("Junior Analyst"));

    for _ in 0..4 {
        let choice = recommended(&session);
        session.decide(choice)?;
        session.acknowledge()?;
    }
    // 600 points
    assert_eq!(session.snapshot().rank.as_deref(), Some("Fraud Analyst"));

    for _ in 0..3 {
        let choice = recommended(&session);
        session.decide(choice)?;
        session.acknowledge()?;
    }
    // 1050 points
    assert_eq!(session.snapshot().rank.as_deref(), Some("Senior Analyst"));
    Ok(())
}

#[test]
fn clock_refills_for_every_case() -> GameResult<()> {
    let mut session = build(26);
    for _ in 0..40 {
        session.tick()?;
    }
    assert_eq!(session.countdown().unwrap().remaining, 5);

    let choice = recommended(&session);
    session.decide(choice)?;
    session.acknowledge()?;
    assert_eq!(session.countdown().unwrap().remaining, 45);
    assert!(!session.is_ended());
    Ok(())
}
