//! `vanguard`: headless bridge console for the tactical simulation.
//!
//! Usage: `vanguard [scenario.json] [--seed N]`. Log verbosity follows
//! `RUST_LOG` (default `info`).

use std::io::BufRead;
use std::sync::mpsc;

use tracing::{error, info, warn};

use vanguard_app::console::{self, ConsoleAction};
use vanguard_app::state::{AppState, GameLoopCommand};
use vanguard_core::events::SimEvent;
use vanguard_sim::{Scenario, SimConfig};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

struct Args {
    scenario: Option<String>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        scenario: None,
        seed: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed `{value}`"))?;
                args.seed = Some(seed);
            }
            _ if args.scenario.is_none() => args.scenario = Some(arg),
            _ => return Err(format!("unexpected argument `{arg}`")),
        }
    }
    Ok(args)
}

fn main() {
    init_tracing();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            error!("{message}");
            eprintln!("usage: vanguard [scenario.json] [--seed N]");
            std::process::exit(2);
        }
    };

    let scenario = match &args.scenario {
        Some(path) => match Scenario::load(path) {
            Ok(scenario) => scenario,
            Err(e) => {
                error!(%path, "{e}");
                std::process::exit(1);
            }
        },
        None => Scenario::skirmish(),
    };
    let mut config = SimConfig::default();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let state = AppState::new();
    let (event_tx, event_rx) = mpsc::channel::<SimEvent>();
    if let Err(e) = state.start(config, scenario, Some(event_tx)) {
        error!("{e}");
        std::process::exit(1);
    }

    // Events print as JSON lines on stdout
    std::thread::spawn(move || {
        for event in event_rx {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!("unprintable event: {e}"),
            }
        }
    });

    println!("{}", console::HELP);
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match console::parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ConsoleAction::Send(cmd))) => {
                if let Err(e) = state.send(cmd) {
                    error!("{e}");
                    break;
                }
            }
            Ok(Some(ConsoleAction::Status)) => match state.snapshot() {
                Some(snapshot) => print!("{}", console::render_status(&snapshot)),
                None => println!("no snapshot yet"),
            },
            Ok(Some(ConsoleAction::Help)) => println!("{}", console::HELP),
            Ok(Some(ConsoleAction::Quit)) => break,
            Err(e) => println!("{e}"),
        }
    }

    let _ = state.send(GameLoopCommand::Shutdown);
    info!("bridge console closed");
}
