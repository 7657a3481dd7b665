//! FraudPlay core: fraud-detection mini-games built on one shared
//! round/session state machine.
//!
//! Module map:
//!   session        the shared state machine (phases, countdown, draws, endings)
//!   rules          the GameRules trait every game implements
//!   spot_the_fraud, fraud_analyst, guess_the_origin,
//!   card_cloner, predict_the_pattern
//!                  the five games and their static scenario pools
//!   pattern_model  the rule-based risk model behind Predict the Pattern
//!   engine         dashboard host: mounts games, keeps the event log
//!   dashboard      game catalog and player progress

pub mod card_cloner;
pub mod clock;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod event;
pub mod fraud_analyst;
pub mod guess_the_origin;
pub mod pattern_model;
pub mod playable;
pub mod predict_the_pattern;
pub mod rng;
pub mod rules;
pub mod scoreboard;
pub mod session;
pub mod snapshot;
pub mod spot_the_fraud;
pub mod types;
