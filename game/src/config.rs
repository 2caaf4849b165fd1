//====================================================================

use std::path::PathBuf;

use clap::Parser;
use common::Position;

//====================================================================

pub const DEFAULT_SELF_CLICK_CHANCE: f64 = 0.5;

/// Runs a squad battle from saved data, clicking slots at random.
#[derive(Parser, Debug, Clone)]
#[command(name = "squad-battle")]
#[command(about = "Simulate a squad battle from a character database and saved squad")]
pub struct BattleConfig {
    /// Character database, a JSON object keyed by character id
    #[arg(long, default_value = "data/Characters.json")]
    pub characters: PathBuf,

    /// Saved squad layout, rewritten after every action
    #[arg(long, default_value = "data/Squad.json")]
    pub squad: PathBuf,

    /// Number of slot clicks to simulate
    #[arg(long, default_value_t = 20)]
    pub clicks: u32,

    /// Chance that a simulated click lands on the acting unit's own slot
    #[arg(long, default_value_t = DEFAULT_SELF_CLICK_CHANCE, value_parser = parse_chance)]
    pub self_click_chance: f64,

    /// Formation change applied and saved before the battle, as FROM:TO
    /// (e.g. PA1:PC3). May be repeated.
    #[arg(long = "arrange", value_name = "FROM:TO", value_parser = parse_arrangement)]
    pub arrangements: Vec<(Position, Position)>,

    /// Random seed for deterministic runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: log::LevelFilter,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            characters: PathBuf::from("data/Characters.json"),
            squad: PathBuf::from("data/Squad.json"),
            clicks: 20,
            self_click_chance: DEFAULT_SELF_CLICK_CHANCE,
            arrangements: Vec::new(),
            seed: None,
            log_level: log::LevelFilter::Info,
        }
    }
}

fn parse_chance(value: &str) -> Result<f64, String> {
    let chance = value
        .parse::<f64>()
        .map_err(|e| format!("'{}' is not a number: {}", value, e))?;

    match chance.is_finite() && (0.0..=1.0).contains(&chance) {
        true => Ok(chance),
        false => Err(format!("'{}' is not a chance between 0 and 1", value)),
    }
}

fn parse_arrangement(value: &str) -> Result<(Position, Position), String> {
    let (from, to) = value
        .split_once(':')
        .ok_or_else(|| format!("'{}' is not of the form FROM:TO", value))?;

    let from = from.parse::<Position>().map_err(|e| e.to_string())?;
    let to = to.parse::<Position>().map_err(|e| e.to_string())?;

    Ok((from, to))
}

//====================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_parser() {
        let parsed = BattleConfig::parse_from(["squad-battle"]);
        let default = BattleConfig::default();

        assert_eq!(parsed.characters, default.characters);
        assert_eq!(parsed.squad, default.squad);
        assert_eq!(parsed.clicks, default.clicks);
        assert_eq!(parsed.self_click_chance, default.self_click_chance);
        assert!(parsed.arrangements.is_empty());
        assert_eq!(parsed.seed, None);
        assert_eq!(parsed.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn parses_overrides() {
        let parsed = BattleConfig::parse_from([
            "squad-battle",
            "--squad",
            "saves/Squad.json",
            "--clicks",
            "5",
            "--seed",
            "42",
            "--log-level",
            "debug",
        ]);

        assert_eq!(parsed.squad, PathBuf::from("saves/Squad.json"));
        assert_eq!(parsed.clicks, 5);
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn rejects_chances_outside_unit_range() {
        for value in ["NaN", "inf", "1.5", "-0.1", "often"] {
            let parsed =
                BattleConfig::try_parse_from(["squad-battle", "--self-click-chance", value]);
            assert!(parsed.is_err(), "{} was accepted", value);
        }

        let parsed =
            BattleConfig::try_parse_from(["squad-battle", "--self-click-chance", "1"]).unwrap();
        assert_eq!(parsed.self_click_chance, 1.);
    }

    #[test]
    fn parses_repeated_arrangements() {
        let parsed = BattleConfig::parse_from([
            "squad-battle",
            "--arrange",
            "PA1:PC3",
            "--arrange",
            "PB2:PA1",
        ]);

        assert_eq!(
            parsed.arrangements,
            vec![(Position::A1, Position::C3), (Position::B2, Position::A1)]
        );

        for value in ["PA1", "PA1:PX9", "PA1-PC3"] {
            assert!(BattleConfig::try_parse_from(["squad-battle", "--arrange", value]).is_err());
        }
    }
}

//====================================================================
