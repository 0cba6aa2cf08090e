use std::fs::OpenOptions;
use std::path::Path;

use actix_web::{web, App, HttpServer};
use chrono::FixedOffset;
use clap::{Arg, ArgAction, Command};
use log::{error, info, warn};

use quadd::handlers;
use quadd::models::AppState;
use quadd::services::catalog::WordCatalog;
use quadd::services::game::GameService;
use quadd::store::SessionStore;

// Deterministic but public; real deployments configure their own.
const DEFAULT_SEED: &str = "quadd-dev-seed";

// Function to initialize logging
fn init_logging(log_file: Option<&String>) {
    if let Some(file) = log_file {
        let log_output = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .expect("Failed to open log file");

        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(log_output)))
            .init();
    } else {
        env_logger::init();
    }
}

/// Parse an offset like "+05:30" into a FixedOffset.
fn parse_day_offset(raw: &str) -> Option<FixedOffset> {
    let (sign, rest) = match raw.chars().next()? {
        '+' => (1, &raw[1..]),
        '-' => (-1, &raw[1..]),
        _ => (1, raw),
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let matches = Command::new("quadd")
        .version("0.1")
        .about("Daily four-letter word game service")
        .arg(
            Arg::new("listen-host")
                .long("listen-host")
                .num_args(1)
                .default_value("0.0.0.0:5000")
                .help("Specify the listen address (e.g., 0.0.0.0:5000)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .num_args(1)
                .help("Specify a log file path (if omitted, logs to stderr)"),
        )
        .arg(
            Arg::new("share-dir")
                .long("share-dir")
                .num_args(1)
                .default_value("./share")
                .help("Directory containing the word files"),
        )
        .arg(
            Arg::new("daily-seed")
                .long("daily-seed")
                .num_args(1)
                .help("Seed material for the daily answer rotation (falls back to QUADD_DAILY_SEED)"),
        )
        .arg(
            Arg::new("day-offset")
                .long("day-offset")
                .num_args(1)
                .default_value("+05:30")
                .help("UTC offset that decides when the day rolls over"),
        )
        .arg(
            Arg::new("reveal-answer")
                .long("reveal-answer")
                .action(ArgAction::SetTrue)
                .help("Log today's answer at startup"),
        )
        .get_matches();

    let listen_host = matches
        .get_one::<String>("listen-host")
        .expect("listen-host argument must always have a default value")
        .clone();
    let log_file = matches.get_one::<String>("log-file");
    let share_dir = matches.get_one::<String>("share-dir").unwrap();
    let day_offset_raw = matches.get_one::<String>("day-offset").unwrap();

    init_logging(log_file);

    let day_offset = match parse_day_offset(day_offset_raw) {
        Some(offset) => offset,
        None => {
            error!("Cannot parse --day-offset {:?} (expected e.g. +05:30)", day_offset_raw);
            std::process::exit(2);
        }
    };

    let seed_material = matches
        .get_one::<String>("daily-seed")
        .cloned()
        .or_else(|| std::env::var("QUADD_DAILY_SEED").ok())
        .unwrap_or_else(|| {
            warn!("No daily seed configured; using the built-in development seed");
            DEFAULT_SEED.to_string()
        });

    let guessable_path = format!("{}/guessable.txt", share_dir);
    let answers_path = format!("{}/answers.txt", share_dir);
    let catalog = match WordCatalog::load(Path::new(&guessable_path), Path::new(&answers_path)) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("Cannot start without a word catalog: {}", err);
            std::process::exit(1);
        }
    };

    let game = GameService::new(catalog, seed_material, day_offset);

    if matches.get_flag("reveal-answer") {
        match game.today_answer() {
            Ok(answer) => info!("Today's answer is {}", answer),
            Err(err) => warn!("No answer available: {}", err),
        }
    }

    let state = web::Data::new(AppState {
        game,
        sessions: SessionStore::new(),
    });

    info!("Listening on {}", listen_host);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(handlers::state::game_state)
            .service(handlers::guess::submit_guess)
    })
    .bind(&listen_host)?
    .run()
    .await
}
