//! Text console: turns operator lines into loop commands and renders status.
//!
//! Grammar is one command per line, whitespace separated, e.g.
//! `fire phaser 3`, `power shields 80`, `waypoint 400 -250`, `alert red`.

use std::fmt::Write as _;

use thiserror::Error;

use vanguard_core::commands::PlayerCommand;
use vanguard_core::enums::{AlertLevel, SubsystemKind, WeaponKind};
use vanguard_core::errors::ParseNameError;
use vanguard_core::state::WorldSnapshot;
use vanguard_core::types::ShipId;

use crate::state::GameLoopCommand;

pub const HELP: &str = "\
commands:
  fire <phaser|torpedo> [ship]   target <ship|none>
  throttle <0-100>               heading <deg>          turn <delta>
  waypoint <x> <y>               waypoint clear
  power <system> <0-100>         repair <system>
  alert <normal|yellow|red>      scan <ship>            hail <ship>
  status    pause    resume    help    quit";

/// What a console line asks for.
#[derive(Debug)]
pub enum ConsoleAction {
    Send(GameLoopCommand),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConsoleError {
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("not a number: `{0}`")]
    BadNumber(String),
    #[error("not a ship id: `{0}`")]
    BadShipId(String),
    #[error("unknown alert level `{0}`")]
    BadAlertLevel(String),
    #[error(transparent)]
    Name(#[from] ParseNameError),
}

/// Parse one console line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleAction>, ConsoleError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let mut arg = |name: &'static str| words.next().ok_or(ConsoleError::MissingArgument(name));

    match verb.to_ascii_lowercase().as_str() {
        "fire" => {
            let weapon: WeaponKind = arg("weapon")?.parse()?;
            let target = match words.next() {
                Some(word) => Some(parse_ship(word)?),
                None => None,
            };
            player(PlayerCommand::FireWeapon { weapon, target })
        }
        "target" => {
            let word = arg("ship")?;
            let target = if word.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_ship(word)?)
            };
            player(PlayerCommand::SetTarget { target })
        }
        "throttle" => player(PlayerCommand::SetThrottle {
            percent: parse_number(arg("percent")?)?,
        }),
        "heading" => player(PlayerCommand::SetHeading {
            degrees: parse_number(arg("degrees")?)?,
        }),
        "turn" => player(PlayerCommand::Turn {
            delta: parse_number(arg("degrees")?)?,
        }),
        "waypoint" => {
            let first = arg("x")?;
            if first.eq_ignore_ascii_case("clear") {
                return player(PlayerCommand::ClearWaypoint);
            }
            let x = parse_number(first)?;
            let y = parse_number(arg("y")?)?;
            player(PlayerCommand::SetWaypoint { x, y })
        }
        "power" => {
            let system: SubsystemKind = arg("system")?.parse()?;
            let value = parse_number(arg("value")?)?;
            player(PlayerCommand::SetPower { system, value })
        }
        "repair" => player(PlayerCommand::Repair {
            system: arg("system")?.parse()?,
        }),
        "alert" => player(PlayerCommand::SetAlertLevel {
            level: parse_alert(arg("level")?)?,
        }),
        "scan" => player(PlayerCommand::Scan {
            ship_id: parse_ship(arg("ship")?)?,
        }),
        "hail" => player(PlayerCommand::Hail {
            ship_id: parse_ship(arg("ship")?)?,
        }),
        "pause" => Ok(Some(ConsoleAction::Send(GameLoopCommand::Pause))),
        "resume" => Ok(Some(ConsoleAction::Send(GameLoopCommand::Resume))),
        "status" => Ok(Some(ConsoleAction::Status)),
        "help" | "?" => Ok(Some(ConsoleAction::Help)),
        "quit" | "exit" => Ok(Some(ConsoleAction::Quit)),
        other => Err(ConsoleError::UnknownCommand(other.to_string())),
    }
}

fn player(cmd: PlayerCommand) -> Result<Option<ConsoleAction>, ConsoleError> {
    Ok(Some(ConsoleAction::Send(GameLoopCommand::Player(cmd))))
}

fn parse_number(word: &str) -> Result<f64, ConsoleError> {
    word.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConsoleError::BadNumber(word.to_string()))
}

/// Accepts `3` or `#3`.
fn parse_ship(word: &str) -> Result<ShipId, ConsoleError> {
    word.trim_start_matches('#')
        .parse::<u32>()
        .map(ShipId)
        .map_err(|_| ConsoleError::BadShipId(word.to_string()))
}

fn parse_alert(word: &str) -> Result<AlertLevel, ConsoleError> {
    match word.to_ascii_lowercase().as_str() {
        "normal" | "green" => Ok(AlertLevel::Normal),
        "yellow" => Ok(AlertLevel::Yellow),
        "red" => Ok(AlertLevel::Red),
        _ => Err(ConsoleError::BadAlertLevel(word.to_string())),
    }
}

/// Multi-line bridge readout for the `status` command.
pub fn render_status(snapshot: &WorldSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "tick {} ({:.1}s){}  alert {:?}",
        snapshot.time.tick,
        snapshot.time.elapsed_secs,
        if snapshot.paused { " PAUSED" } else { "" },
        snapshot.alert,
    );
    if let Some(helm) = &snapshot.helm {
        let _ = write!(out, "power {:.0}/200", helm.total_power);
        if helm.power_over_budget {
            out.push_str(" OVER BUDGET");
        }
        let _ = write!(
            out,
            "  phaser {}  torpedo {}",
            helm.phaser_cooldown, helm.torpedo_cooldown
        );
        if let (Some(wp), Some(distance)) = (snapshot.waypoint, helm.waypoint_distance) {
            let _ = write!(out, "  waypoint ({:.0}, {:.0}) {:.0}u", wp.x, wp.y, distance);
            if let Some(eta) = helm.waypoint_eta {
                let _ = write!(out, " eta {:.0} ticks", eta);
            }
        }
        out.push('\n');
    }
    for ship in &snapshot.ships {
        let _ = write!(
            out,
            "{:>4} {:<18} {:?} ({:>7.0},{:>7.0}) hdg {:>3.0} spd {:>4.1} hull {:>5.1}/{:<5.0} sh {:>5.1}",
            ship.id.to_string(),
            ship.display_name,
            ship.faction,
            ship.position.x,
            ship.position.y,
            ship.heading,
            ship.effective_velocity,
            ship.hull,
            ship.max_hull,
            ship.shields,
        );
        if let Some(behavior) = ship.behavior {
            let _ = write!(out, " {:?}", behavior);
        }
        if ship.destroyed {
            out.push_str(" DESTROYED");
        }
        out.push('\n');
    }
    if !snapshot.torpedoes.is_empty() {
        let _ = writeln!(out, "{} torpedoes in flight", snapshot.torpedoes.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_command(line: &str) -> PlayerCommand {
        match parse_line(line) {
            Ok(Some(ConsoleAction::Send(GameLoopCommand::Player(cmd)))) => cmd,
            other => panic!("`{line}` parsed to {other:?}"),
        }
    }

    #[test]
    fn test_parse_fire() {
        assert_eq!(
            player_command("fire phaser #3"),
            PlayerCommand::FireWeapon {
                weapon: WeaponKind::Phaser,
                target: Some(ShipId(3))
            }
        );
        assert_eq!(
            player_command("FIRE torpedoes"),
            PlayerCommand::FireWeapon {
                weapon: WeaponKind::Torpedo,
                target: None
            }
        );
    }

    #[test]
    fn test_parse_helm_and_power() {
        assert_eq!(
            player_command("power shields 80"),
            PlayerCommand::SetPower {
                system: SubsystemKind::Shields,
                value: 80.0
            }
        );
        assert_eq!(
            player_command("waypoint 400 -250"),
            PlayerCommand::SetWaypoint { x: 400.0, y: -250.0 }
        );
        assert_eq!(player_command("waypoint clear"), PlayerCommand::ClearWaypoint);
        assert_eq!(player_command("turn -15"), PlayerCommand::Turn { delta: -15.0 });
        assert_eq!(
            player_command("target none"),
            PlayerCommand::SetTarget { target: None }
        );
        assert_eq!(
            player_command("alert red"),
            PlayerCommand::SetAlertLevel {
                level: AlertLevel::Red
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_line("warp 9"),
            Err(ConsoleError::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_line("power deflectors 50"),
            Err(ConsoleError::Name(ParseNameError::Subsystem(_)))
        ));
        assert!(matches!(
            parse_line("fire lasers"),
            Err(ConsoleError::Name(ParseNameError::Weapon(_)))
        ));
        assert!(matches!(
            parse_line("throttle"),
            Err(ConsoleError::MissingArgument("percent"))
        ));
        assert!(matches!(
            parse_line("throttle NaN"),
            Err(ConsoleError::BadNumber(_))
        ));
        assert!(matches!(
            parse_line("scan ship"),
            Err(ConsoleError::BadShipId(_))
        ));
    }

    #[test]
    fn test_parse_control_lines() {
        assert!(parse_line("   ").unwrap().is_none());
        assert!(matches!(parse_line("status"), Ok(Some(ConsoleAction::Status))));
        assert!(matches!(parse_line("quit"), Ok(Some(ConsoleAction::Quit))));
        assert!(matches!(
            parse_line("pause"),
            Ok(Some(ConsoleAction::Send(GameLoopCommand::Pause)))
        ));
    }

    #[test]
    fn test_render_status_lists_ships() {
        use vanguard_sim::{Scenario, SimConfig, SimulationEngine};

        let mut engine = SimulationEngine::from_scenario(SimConfig::default(), &Scenario::skirmish());
        let text = render_status(&engine.snapshot());
        assert!(text.starts_with("tick 0"));
        assert!(text.contains("Vanguard"));
        // Unscanned contacts are not named
        assert!(!text.contains("Blackfin"));
    }
}
