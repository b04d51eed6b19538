//! Flappy Rows entry point
//!
//! Runs a headless session at the fixed frame rate and reports the result.
//!
//! Usage:
//!   cargo run -- [OPTIONS]
//!
//! Examples:
//!   cargo run                          # 3600 frames with the autopilot
//!   cargo run -- --seed 42             # Reproducible run
//!   cargo run -- --scaled 800x480      # Layout derived from the surface size
//!   cargo run -- --tuning rows.json    # Balance loaded from JSON

use std::time::{SystemTime, UNIX_EPOCH};

use flappy_rows::consts::{PIPE_SIZE, SIM_DT};
use flappy_rows::sim::{Game, SessionPhase, TickInput, tick};
use flappy_rows::{Tuning, TuningError};

struct Options {
    frames: u64,
    seed: Option<u64>,
    tuning_path: Option<String>,
    scaled: Option<(f32, f32)>,
    manual: bool,
    dump_tuning: bool,
}

fn main() {
    env_logger::init();
    log::info!("Flappy Rows (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let tuning = match load_tuning(&options) {
        Ok(tuning) => tuning,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if options.dump_tuning {
        match tuning.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let seed = options.seed.or(tuning.seed).unwrap_or_else(clock_seed);
    log::info!("Seed: {}", seed);

    let mut game = Game::new(tuning, seed);
    let input = TickInput {
        idle_mode: !options.manual,
        ..Default::default()
    };

    let mut frozen_frames = 0u64;
    for _ in 0..options.frames {
        tick(&mut game, &input, SIM_DT);
        if game.phase() == SessionPhase::Frozen {
            frozen_frames += 1;
        }
    }

    println!("Frames:          {}", options.frames);
    println!("Seed:            {}", seed);
    println!("Finished runs:   {}", game.runs);
    println!("Current score:   {}", game.score());
    println!("Frozen frames:   {}", frozen_frames);
    println!("Pipes on screen: {}", game.world.pipes.active_count());
    if let Some(last) = game.last_run_score {
        println!("Last run score:  {}", last);
    }
}

fn load_tuning(options: &Options) -> Result<Tuning, TuningError> {
    let tuning = match (&options.tuning_path, options.scaled) {
        (Some(path), _) => Tuning::load(path)?,
        (None, Some((width, height))) => Tuning::scaled(width, height, PIPE_SIZE),
        (None, None) => Tuning::classic(),
    };
    tuning.validate()?;
    Ok(tuning)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn parse_size(s: &str) -> Option<(f32, f32)> {
    let (w, h) = s.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        frames: 3600,
        seed: None,
        tuning_path: None,
        scaled: None,
        manual: false,
        dump_tuning: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--frames" => {
                if i + 1 < args.len() {
                    options.frames = args[i + 1].parse().unwrap_or(3600);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    options.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--tuning" => {
                if i + 1 < args.len() {
                    options.tuning_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--scaled" => {
                if i + 1 < args.len() {
                    options.scaled = parse_size(&args[i + 1]);
                    if options.scaled.is_none() {
                        log::warn!("Ignoring --scaled {}: expected WIDTHxHEIGHT", args[i + 1]);
                    }
                    i += 1;
                }
            }
            "--manual" => options.manual = true,
            "--dump-tuning" => options.dump_tuning = true,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Flappy Rows - headless session runner");
    println!();
    println!("Options:");
    println!("  -n, --frames N      Frames to simulate at 60 Hz (default 3600)");
    println!("  -s, --seed N        RNG seed (default: tuning seed, then clock)");
    println!("  -t, --tuning FILE   Load balance from a JSON file");
    println!("      --scaled WxH    Derive the row layout from a surface size");
    println!("      --manual        No autopilot (the bird only falls)");
    println!("      --dump-tuning   Print the effective tuning as JSON and exit");
    println!("  -h, --help          Show this help");
}
