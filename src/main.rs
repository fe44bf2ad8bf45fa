use std::path::PathBuf;

use clap::arg;
use clap::command;
use clap::Arg;
use clap::ArgMatches;
use clap::Command;

use log::{error, info};

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

use lumina::chess_board::Color;
use lumina::config::{Config, CONFIG_PATH_ENV};
use lumina::engines::ShakmatyEngine;
use lumina::error::LuminaError;
use lumina::game::{play_random, replay, BoardController};
use lumina::ui::setup_ui;

#[cfg(not(target_arch = "wasm32"))]
const LOG_LEVEL_ENV: &str = "LUMINA_LOG_LEVEL";

fn main() {
    let matches = command!()
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ))
        .arg(
            arg!(
            -c --config <FILE> "YAML configuration file"
                    )
            .required(false)
            .value_parser(clap::value_parser!(PathBuf)),
        )
        .subcommand(Command::new("play").about("Play a game on the board").arg(fen_arg()).arg(seed_arg()))
        .subcommand(
            Command::new("random-game")
                .about("Play random moves and print the game")
                .arg(fen_arg())
                .arg(seed_arg())
                .arg(
                    arg!(
                    -p --plies <n> "Maximum number of plies"
                            )
                    .default_value("200")
                    .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("replay")
                .about("Replay moves by clicking their squares")
                .arg(fen_arg())
                .arg(
                    arg!(
                    -m --moves <moves> "List of moves, e.g. e2e4 e7e5, e7e8n to under-promote"
                            )
                    .required(true)
                    .num_args(1..)
                    .value_parser(clap::value_parser!(String)),
                ),
        )
        .get_matches();

    init_logger(matches.get_flag("debug"));

    if let Err(e) = run(&matches) {
        error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logger(debug: bool) {
    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_LEVEL_ENV, "info"));
    if debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();
}

#[cfg(target_arch = "wasm32")]
fn init_logger(_debug: bool) {}

fn fen_arg() -> Arg {
    arg!(
    -f --fen <FEN> "Starting position"
            )
    .required(false)
}

fn seed_arg() -> Arg {
    arg!(
    -s --seed <SEED> "Seed for random moves"
            )
    .required(false)
    .value_parser(clap::value_parser!(u64))
}

fn run(matches: &ArgMatches) -> Result<(), LuminaError> {
    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
    let mut config = Config::load(config_path.as_deref())?;

    match matches.subcommand() {
        Some(("play", arg_matches)) => {
            override_fen(&mut config, arg_matches);
            override_seed(&mut config, arg_matches);
            play(&config)
        }
        Some(("random-game", arg_matches)) => {
            override_fen(&mut config, arg_matches);
            override_seed(&mut config, arg_matches);
            let plies = arg_matches.get_one::<usize>("plies").copied().unwrap_or_default();
            random_game(&config, plies)
        }
        Some(("replay", arg_matches)) => {
            override_fen(&mut config, arg_matches);
            let moves = arg_matches
                .get_many::<String>("moves")
                .unwrap_or_default()
                .filter(|v| !v.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>();
            replay_moves(&config, &moves)
        }
        None => play(&config),
        _ => unreachable!("Exhausted list of subcommands"),
    }
}

fn override_fen(config: &mut Config, arg_matches: &ArgMatches) {
    if let Some(fen) = arg_matches.get_one::<String>("fen") {
        config.start_fen = Some(fen.clone());
    }
}

fn override_seed(config: &mut Config, arg_matches: &ArgMatches) {
    if let Some(seed) = arg_matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }
}

fn play(config: &Config) -> Result<(), LuminaError> {
    let engine = config.build_engine()?;
    info!("opening board");
    setup_ui(engine, config.seed)
}

fn random_game(config: &Config, plies: usize) -> Result<(), LuminaError> {
    let mut controller = BoardController::new(config.build_engine()?, config.seed);
    let played = play_random(&mut controller, plies);
    info!("random game stopped after {} plies", played);
    print_summary(&controller);
    Ok(())
}

fn replay_moves(config: &Config, moves: &[&str]) -> Result<(), LuminaError> {
    let mut controller = BoardController::new(config.build_engine()?, config.seed);
    replay(&mut controller, moves)?;
    print_summary(&controller);
    Ok(())
}

#[derive(Tabled)]
struct MoveTableRow {
    #[tabled(rename = "No.")]
    number: u32,
    #[tabled(rename = "White")]
    white: String,
    #[tabled(rename = "Black")]
    black: String,
}

fn print_summary(controller: &BoardController<ShakmatyEngine>) {
    let rows: Vec<_> = controller
        .move_rows()
        .into_iter()
        .map(|row| MoveTableRow {
            number: row.number,
            white: row.white.unwrap_or_else(|| "—".to_string()),
            black: row.black.unwrap_or_else(|| "—".to_string()),
        })
        .collect();
    if rows.is_empty() {
        println!("No moves played yet.");
    } else {
        println!("{}", Table::new(rows).with(Style::modern()));
    }
    println!("{}", controller.placement());
    println!("{}", controller.status());
    println!("White captured: {}", or_dash(controller.captures().glyphs(Color::White)));
    println!("Black captured: {}", or_dash(controller.captures().glyphs(Color::Black)));
}

fn or_dash(glyphs: String) -> String {
    if glyphs.is_empty() {
        "—".to_string()
    } else {
        glyphs
    }
}
