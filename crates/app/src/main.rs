mod logger;
mod terminal;

use std::fmt;
use std::sync::Arc;

use dayguess_core::model::Mode;
use services::leaderboard::settings_from_env;
use services::{
    Clock, GameController, HttpLeaderboard, LeaderboardGateway, LocalLeaderboard, RoundEngine,
    ScoreService, TokioCountdown,
};
use storage::repository::Storage;
use ui::views::{render_leaderboard, view_state_from_result};
use ui::vm::{DEFAULT_TIME_ATTACK_SECS, load_leaderboard};
use ui::{AppContext, UiApp};

use crate::terminal::Terminal;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMode { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMode { raw } => write!(f, "invalid --mode value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct TerminalApp {
    leaderboard: Arc<dyn LeaderboardGateway>,
    remote: bool,
    player_name: Option<String>,
}

impl UiApp for TerminalApp {
    fn leaderboard(&self) -> Arc<dyn LeaderboardGateway> {
        Arc::clone(&self.leaderboard)
    }

    fn leaderboard_is_remote(&self) -> bool {
        self.remote
    }

    fn default_player_name(&self) -> Option<String> {
        self.player_name.clone()
    }
}

struct Args {
    db_url: String,
    mode: Option<Mode>,
    player_name: Option<String>,
    log_level: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  dayguess play   [--db <sqlite_url>] [--mode <mode>] [--name <player>] [--log <level>]");
    eprintln!("  dayguess scores [--db <sqlite_url>] [--log <level>]");
    eprintln!();
    eprintln!("Modes:");
    eprintln!("  practice, challenge-5, challenge-10, time-attack, time-attack-<seconds>");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:dayguess.sqlite3");
    eprintln!("  --log warn");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DAYGUESS_DB_URL, DAYGUESS_LEADERBOARD_URL, DAYGUESS_LEADERBOARD_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Scores,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "scores" => Some(Self::Scores),
            _ => None,
        }
    }
}

fn parse_mode(raw: &str) -> Result<Mode, ArgsError> {
    let invalid = || ArgsError::InvalidMode {
        raw: raw.to_string(),
    };
    let mode = match raw {
        "practice" => Mode::Practice,
        "challenge-5" => Mode::challenge(5),
        "challenge-10" => Mode::challenge(10),
        "time-attack" => Mode::time_attack(DEFAULT_TIME_ATTACK_SECS),
        other => {
            let secs = other.strip_prefix("time-attack-").ok_or_else(invalid)?;
            Mode::time_attack(secs.parse().map_err(|_| invalid())?)
        }
    };
    mode.validate().map_err(|_| invalid())
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("DAYGUESS_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("sqlite:dayguess.sqlite3".into()), normalize_sqlite_url);
        let mut mode = None;
        let mut player_name = None;
        let mut log_level = "warn".to_string();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--mode" => {
                    let value = require_value(args, "--mode")?;
                    mode = Some(parse_mode(&value)?);
                }
                "--name" => player_name = Some(require_value(args, "--name")?),
                "--log" => log_level = require_value(args, "--log")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            mode,
            player_name,
            log_level,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// Remote leaderboard when configured, otherwise scores kept in SQLite.
async fn build_leaderboard(
    db_url: &str,
    clock: Clock,
) -> Result<(Arc<dyn LeaderboardGateway>, bool), Box<dyn std::error::Error>> {
    let settings = settings_from_env()?;
    if let Some(remote) = HttpLeaderboard::from_settings(&settings)? {
        tracing::info!(endpoint = remote.endpoint(), "using remote leaderboard");
        return Ok((Arc::new(remote), true));
    }

    prepare_sqlite_file(db_url)?;
    let storage = Storage::sqlite(db_url).await?;
    tracing::info!(db = db_url, "using local leaderboard");
    let scores = ScoreService::new(clock, storage.scores);
    Ok((Arc::new(LocalLeaderboard::new(scores)), false))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    logger::init_logging(&parsed.log_level);

    let clock = Clock::default_clock();
    let (leaderboard, remote) = build_leaderboard(&parsed.db_url, clock.clone()).await?;

    match cmd {
        Command::Play => {
            let app: Arc<dyn UiApp> = Arc::new(TerminalApp {
                leaderboard,
                remote,
                player_name: parsed.player_name,
            });
            let ctx = AppContext::new(&app);

            let engine = RoundEngine::system();
            let game = GameController::new(engine, Arc::new(TokioCountdown::current()));
            Terminal::new(game, ctx).run(parsed.mode).await
        }
        Command::Scores => {
            let state = view_state_from_result(load_leaderboard(leaderboard.as_ref()).await);
            println!("{}", render_leaderboard(&state));
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
