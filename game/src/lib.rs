//====================================================================

use battle::{BattleManager, LogObserver};
use config::{BattleConfig, DEFAULT_SELF_CLICK_CHANCE};
use formation::FormationEditor;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use roster::{CharacterDatabase, JsonFileStore, Position, Roster, SquadStore};

pub mod battle;
pub mod config;
pub mod formation;

//====================================================================

pub fn run(config: BattleConfig) -> roster::Result<()> {
    let database = CharacterDatabase::from_json_file(&config.characters)?;

    let mut store = JsonFileStore::new(&config.squad);
    if !config.arrangements.is_empty() {
        arrange(&database, &mut store, &config.arrangements)?;
    }

    let (mut battle, error) = BattleManager::load(&database, store, LogObserver);

    if let Some(e) = error {
        return Err(e);
    }

    log::info!(
        "Squad '{}' ready with {} members",
        battle.roster().name(),
        battle.roster().occupied_count()
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let self_click_chance = match config.self_click_chance.is_finite() {
        true => config.self_click_chance.clamp(0., 1.),
        false => DEFAULT_SELF_CLICK_CHANCE,
    };

    for _ in 0..config.clicks {
        let clicked = match battle.current_position() {
            Some(current) if rng.gen_bool(self_click_chance) => current,
            _ => {
                let positions = battle.roster().positions().collect::<Vec<Position>>();
                match positions.choose(&mut rng) {
                    Some(position) => *position,
                    None => break,
                }
            }
        };

        let outcome = battle.handle_click(clicked);
        log::info!("Round {} - {} clicked: {:?}", battle.round(), clicked, outcome);

        if let Some(position) = battle.current_position() {
            if let Some(info) = battle.character_info(position) {
                log::debug!("Current character:\n{}", info);
            }
        }
    }

    log::info!("Battle ended in round {}", battle.round());

    Ok(())
}

/// Replays each `(from, to)` pair as two formation clicks on the saved squad.
fn arrange(
    database: &CharacterDatabase,
    store: &mut impl SquadStore,
    arrangements: &[(Position, Position)],
) -> roster::Result<()> {
    let mut roster = Roster::from_record(&store.load()?, database);
    let mut editor = FormationEditor::default();

    for (from, to) in arrangements {
        editor.click(&mut roster, store, *from);
        let outcome = editor.click(&mut roster, store, *to);
        log::info!("Formation {} -> {}: {:?}", from, to, outcome);

        if editor.selected().is_some() {
            editor.click(&mut roster, store, *to);
        }
    }

    Ok(())
}

//====================================================================
