use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chess_club::api::{build_router, state::AppState};
use chess_club::config::{AppConfig, StorageBackend};
use chess_club::models::{PlayerId, TournamentId};
use chess_club::pairing;
use chess_club::ranking;
use chess_club::storage::{JsonlStore, MemoryStore, Store};

#[derive(Parser)]
#[command(name = "chess-club")]
#[command(about = "Chess club tournament keeper with round pairing")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Pair a new round for a tournament
    Pair {
        /// Tournament id
        tournament: i64,

        /// Seat only this player id; repeat the flag for each player
        #[arg(long = "player")]
        players: Vec<i64>,

        /// Fix the tie-break RNG for reproducible rounds
        #[arg(long)]
        seed: Option<u64>,

        /// Plan and print the round without persisting it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the ranking table for a tournament
    Ranking {
        /// Tournament id
        tournament: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting chess-club v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let store = open_store(&config);

    match cli.command {
        Commands::Serve { host, port } => {
            let state = AppState::new(store);
            let app = build_router(state);
            let addr = format!(
                "{}:{}",
                host.unwrap_or(config.server.host),
                port.unwrap_or(config.server.port)
            );
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Pair {
            tournament,
            players,
            seed,
            dry_run,
        } => {
            let tournament = TournamentId(tournament);
            let subset: Vec<PlayerId> = players.into_iter().map(PlayerId).collect();
            let subset = (!subset.is_empty()).then_some(subset);

            if dry_run {
                let roster_players = store.list_players(tournament).await?;
                let names: HashMap<PlayerId, String> = roster_players
                    .iter()
                    .map(|p| (p.id, format!("{} {}", p.name, p.surname)))
                    .collect();
                let roster: Vec<PlayerId> = match &subset {
                    Some(ids) => ids.clone(),
                    None => roster_players.iter().map(|p| p.id).collect(),
                };

                let games = store.list_games(tournament).await?;
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(s),
                    None => StdRng::from_entropy(),
                };
                let drafts = pairing::plan_round(
                    &roster,
                    &games,
                    &mut rng,
                    chrono::Utc::now().date_naive(),
                );

                println!("=== Planned Round ({} games) ===", drafts.len());
                for draft in &drafts {
                    let white = display_name(&names, draft.white_player_id);
                    match draft.black_player_id {
                        Some(black) => {
                            println!("  {} (white) vs {}", white, display_name(&names, black))
                        }
                        None => println!("  {} — bye", white),
                    }
                }
                println!("\n(dry run - no games written)");
            } else {
                let report =
                    pairing::pair_round(store.as_ref(), tournament, subset.as_deref(), seed)
                        .await?;
                println!("\n=== Pairing Results ===");
                println!("Games created: {}", report.pairings_created);
            }
        }
        Commands::Ranking { tournament } => {
            let rows =
                ranking::tournament_ranking(store.as_ref(), TournamentId(tournament)).await?;

            println!("=== Ranking ({} players) ===\n", rows.len());
            println!(
                "{:<4} {:<24} {:>6} {:>6} {:>4} {:>4} {:>4}",
                "#", "Player", "Score", "Games", "W", "D", "L"
            );
            for (position, row) in rows.iter().enumerate() {
                println!(
                    "{:<4} {:<24} {:>6} {:>6} {:>4} {:>4} {:>4}",
                    position + 1,
                    format!("{} {}", row.player.name, row.player.surname),
                    row.score,
                    row.games_played,
                    row.wins,
                    row.draws,
                    row.losses
                );
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = PathBuf::from(&cli.config);
    let mut config = if path.exists() {
        AppConfig::from_file(&path)?
    } else {
        AppConfig::default()
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(data_dir);
    }

    Ok(config)
}

/// Construct the configured storage backend.
fn open_store(config: &AppConfig) -> Arc<dyn Store> {
    match config.storage {
        StorageBackend::Jsonl => {
            tracing::info!("Using JSONL storage at {:?}", config.data_dir);
            Arc::new(JsonlStore::new(config.data_dir.clone()))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage (nothing will be persisted)");
            Arc::new(MemoryStore::new())
        }
    }
}

fn display_name(names: &HashMap<PlayerId, String>, id: PlayerId) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| format!("player {}", id))
}
