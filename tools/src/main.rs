//! game-runner: terminal front end for FraudPlay.
//!
//! Usage:
//!   game-runner --seed 12345
//!   game-runner --seed 12345 --config data/game_config.json
//!   game-runner --ipc-mode

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use fraudplay_core::{
    card_cloner::CardClonerTycoon,
    command::PlayerCommand,
    config::GameConfig,
    dashboard::{catalog, CatalogEntry, PlayerProgress},
    engine::GameEngine,
    error::GameError,
    event::GameEvent,
    pattern_model::TrainingSource,
    session::Phase,
    snapshot::SessionSnapshot,
    types::GameId,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "game-runner", about = "Play the FraudPlay mini-games in a terminal")]
struct Args {
    /// Master seed for every game's RNG stream.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON tuning file. Missing keys fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Training file for Predict the Pattern.
    #[arg(long)]
    training_file: Option<PathBuf>,

    /// Speak JSON lines on stdin/stdout instead of the text menus.
    #[arg(long)]
    ipc_mode: bool,
}

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Command { command: PlayerCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    run_id: &'a str,
    started_at: DateTime<Utc>,
    events: Vec<GameEvent>,
    active: Option<SessionSnapshot>,
    progress: &'a PlayerProgress,
    catalog: Vec<CatalogEntry>,
}

struct Run {
    id: String,
    started_at: DateTime<Utc>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(&path.to_string_lossy())
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };

    let run = Run {
        id: Uuid::new_v4().to_string(),
        started_at: Utc::now(),
    };
    log::info!("run {} seed={} started {}", run.id, args.seed, run.started_at);

    let mut engine = GameEngine::new(args.seed, config);
    if let Some(path) = &args.training_file {
        engine.use_training_source(TrainingSource::upload(path));
    }

    if args.ipc_mode {
        run_ipc_loop(&mut engine, &run)
    } else {
        println!("FraudPlay: learn fraud detection by playing");
        println!("  run:   {}", run.id);
        println!("  seed:  {}", args.seed);
        println!();
        run_text_loop(&mut engine)
    }
}

fn run_ipc_loop(engine: &mut GameEngine, run: &Run) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                let state = build_ui_state(engine, run, Vec::new());
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            IpcCommand::Command { command } => match engine.apply(command) {
                Ok(events) => {
                    let state = build_ui_state(engine, run, events);
                    writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
                }
                Err(e) => write_error(&mut stdout, &e.to_string())?,
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{err_json}")?;
    stdout.flush()?;
    Ok(())
}

fn build_ui_state<'a>(engine: &'a GameEngine, run: &'a Run, events: Vec<GameEvent>) -> UiState<'a> {
    UiState {
        run_id: &run.id,
        started_at: run.started_at,
        events,
        active: engine.snapshot(),
        progress: engine.progress(),
        catalog: catalog(),
    }
}

/// Wall-clock to one-second ticks. Fractions carry over to the next read.
struct TickClock {
    last: Instant,
}

impl TickClock {
    fn new() -> Self {
        Self { last: Instant::now() }
    }

    fn take_seconds(&mut self) -> u32 {
        let whole = self.last.elapsed().as_secs();
        self.last += Duration::from_secs(whole);
        whole.min(u32::MAX as u64) as u32
    }
}

fn run_text_loop(engine: &mut GameEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_dashboard(engine.progress());
        prompt("Pick a game (1-5 or its name, e.g. card_cloner) or q to quit")?;
        let Some(line) = lines.next().transpose()? else { break };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            break;
        }
        let by_number = line
            .parse::<usize>()
            .ok()
            .and_then(|n| GameId::ALL.get(n.wrapping_sub(1)).copied());
        let Some(game) = by_number.or_else(|| GameId::from_slug(line)) else {
            println!("Unknown game '{line}'.");
            continue;
        };

        engine.apply(PlayerCommand::Select { game })?;
        if game == GameId::CardCloner {
            print_detection_systems();
        }
        if !play(engine, &mut lines)? {
            break;
        }
    }
    print_summary(engine.progress());
    Ok(())
}

/// Drive the mounted game until the player goes back. Returns false on EOF.
fn play(engine: &mut GameEngine, lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<bool> {
    let mut clock = TickClock::new();

    loop {
        let Some(snapshot) = engine.snapshot() else { return Ok(true) };
        print_snapshot(&snapshot);
        prompt(match snapshot.phase {
            Phase::Ended { .. } => "r to play again, b for the dashboard",
            Phase::Feedback { .. } => "Enter to continue, b for the dashboard",
            _ => "Choose an action, r to reset, b for the dashboard",
        })?;
        let Some(line) = lines.next().transpose()? else { return Ok(false) };

        // The countdown keeps running while the player thinks.
        let seconds = clock.take_seconds();
        if seconds > 0 {
            engine.apply(PlayerCommand::Tick { seconds })?;
        }
        if engine.active().is_some_and(|s| s.is_ended()) && !matches!(snapshot.phase, Phase::Ended { .. }) {
            println!("\nTime's up!");
            continue;
        }

        let input = line.trim();
        let command = match (input, snapshot.phase) {
            ("b", _) => PlayerCommand::Back,
            ("r", _) => {
                engine.apply(PlayerCommand::Reset)?;
                PlayerCommand::Start
            }
            ("", Phase::Feedback { .. }) => PlayerCommand::Acknowledge,
            (n, Phase::AwaitingDecision { .. }) => {
                match n.parse::<usize>().ok().and_then(|i| snapshot.choices.get(i.wrapping_sub(1))) {
                    Some(&choice) => PlayerCommand::Decide { choice },
                    None => {
                        println!("Pick one of the numbered actions.");
                        continue;
                    }
                }
            }
            _ => continue,
        };

        match engine.apply(command) {
            Ok(_) => {}
            Err(e @ GameError::InvalidTransition { .. }) | Err(e @ GameError::UnsupportedChoice { .. }) => {
                println!("{e}");
            }
            Err(e) => return Err(e.into()),
        }
        clock = TickClock::new();
    }
}

fn prompt(text: &str) -> Result<()> {
    print!("{text} > ");
    io::stdout().flush()?;
    Ok(())
}

fn print_dashboard(progress: &PlayerProgress) {
    println!();
    println!("=== DASHBOARD ===");
    println!(
        "  {} | {} points | {} games | avg accuracy {}%",
        progress.rank,
        progress.total_score,
        progress.games_played,
        progress.average_accuracy()
    );
    println!("  badges: {}", progress.badges.join(", "));
    println!();
    for (i, entry) in catalog().iter().enumerate() {
        let stats = progress
            .stats_for(entry.game)
            .map(|s| format!("played {} | best {} | level {}", s.played, s.best_score, s.level))
            .unwrap_or_default();
        println!("  {}. {} [{}, {}]", i + 1, entry.title, entry.difficulty, entry.estimated_time);
        println!("     {}", entry.description);
        println!("     {stats}");
    }
}

fn print_snapshot(snapshot: &SessionSnapshot) {
    let board = &snapshot.board;
    println!();
    println!("=== {} ===", snapshot.title.to_uppercase());
    let mut status = format!(
        "  score {} | level {} | round {} | streak {} | accuracy {}%",
        board.score, board.level, board.round, board.streak, snapshot.accuracy_pct
    );
    if let Some(lives) = board.resource.lives_left() {
        status.push_str(&format!(" | lives {lives}"));
    }
    if let Some(heat) = board.resource.heat_level() {
        status.push_str(&format!(" | heat {heat}"));
    }
    if let Some(countdown) = &snapshot.countdown {
        status.push_str(&format!(" | {}s left", countdown.remaining));
    }
    if let Some(rank) = &snapshot.rank {
        status.push_str(&format!(" | {rank}"));
    }
    println!("{status}");

    match snapshot.phase {
        Phase::AwaitingDecision { .. } => {
            if let Some(card) = &snapshot.scenario {
                println!();
                for field in &card.fields {
                    println!("  {:<16} {}", field.label, field.value);
                }
                println!();
                println!("  {}", card.prompt);
            }
            for (i, choice) in snapshot.choices.iter().enumerate() {
                println!("    {}. {}", i + 1, choice.label());
            }
        }
        Phase::Feedback { .. } => {
            if let Some(feedback) = &snapshot.feedback {
                println!();
                println!("  {}", feedback.explanation);
                for note in &feedback.notes {
                    println!("   - {note}");
                }
                if feedback.score_delta != 0 {
                    println!("  ({:+} points)", feedback.score_delta);
                }
            }
        }
        Phase::Ended { reason } => {
            println!();
            println!("  GAME OVER: {}", reason.describe());
            println!("  final score {} | level {} | best streak {}", board.score, board.level, board.best_streak);
        }
        Phase::Idle | Phase::AwaitingScenario => {}
    }
}

fn print_detection_systems() {
    println!();
    println!("Detection systems watching you:");
    for system in CardClonerTycoon::detection_systems() {
        println!("  {} ({}% effective): {}", system.name, system.effectiveness, system.description);
    }
}

fn print_summary(progress: &PlayerProgress) {
    println!();
    println!("=== SESSION SUMMARY ===");
    println!("  total score:  {}", progress.total_score);
    println!("  games played: {}", progress.games_played);
    println!("  rank:         {}", progress.rank);
}
