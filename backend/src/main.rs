use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use minichess_backend::{NewSession, ServiceConfig, SessionManager, SessionStatus};
use minichess_engine::{legal_moves, Board, Color, Difficulty};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "minichess", version, about = "Small-board chess engine service")]
struct Cli {
    /// Wall-clock budget per AI move (e.g. `500ms`, `3s`)
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    ai_deadline: Option<Duration>,

    /// Tie window for Easy move choice, in centipawns
    #[arg(long, global = true)]
    tie_epsilon: Option<i32>,

    /// Seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a random-moving human against the AI and print the final session
    Demo {
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        #[arg(long, default_value_t = Color::White)]
        human: Color,

        /// Custom starting layout in compact text form
        #[arg(long)]
        layout: Option<String>,

        #[arg(long, default_value_t = 40)]
        max_plies: u32,
    },
    /// Evaluate a position for the side to move
    Analyze {
        #[arg(long)]
        layout: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ServiceConfig::from_env().context("loading configuration")?;
    if let Some(deadline) = cli.ai_deadline {
        config.ai_deadline = deadline;
    }
    if let Some(epsilon) = cli.tie_epsilon {
        config.tie_epsilon = epsilon;
    }
    if cli.seed.is_some() {
        config.rng_seed = cli.seed;
    }
    config.validate().context("invalid configuration")?;

    let manager = Arc::new(SessionManager::new(config));
    let sweeper = manager.spawn_sweeper();

    let result = match cli.command {
        Command::Demo {
            difficulty,
            human,
            layout,
            max_plies,
        } => run_demo(&manager, difficulty, human, layout, max_plies, cli.seed).await,
        Command::Analyze { layout } => run_analyze(&manager, layout).await,
    };

    sweeper.abort();
    result
}

async fn run_demo(
    manager: &SessionManager,
    difficulty: Difficulty,
    human: Color,
    layout: Option<String>,
    max_plies: u32,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut view = manager.create_session(NewSession {
        difficulty,
        human_color: human,
        layout,
    })?;
    info!(id = %view.id, %difficulty, %human, "demo game started");

    for _ in 0..max_plies {
        if view.status != SessionStatus::Active {
            break;
        }

        view = if view.is_humans_turn() {
            let board = Board::from_text(&view.layout)?;
            let Some(mv) = legal_moves(&board).choose(&mut rng).copied() else {
                bail!("human side has no legal move in an active game");
            };
            manager.apply_move(view.id, mv).await?
        } else {
            manager.request_ai_move(view.id).await?
        };

        if let Some(last) = view.history.last() {
            info!(seq = last.seq, notation = %last.notation, "move played");
        }
    }

    println!("{}", serde_json::to_string_pretty(&view)?);
    manager.delete_session(view.id);
    Ok(())
}

async fn run_analyze(manager: &SessionManager, layout: Option<String>) -> anyhow::Result<()> {
    let view = manager.create_session(NewSession {
        layout,
        ..NewSession::default()
    })?;
    let evaluation = manager.analyze(view.id).await?;

    let report = json!({
        "layout": view.layout,
        "status": view.status,
        "evaluation": evaluation,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    manager.delete_session(view.id);
    Ok(())
}
