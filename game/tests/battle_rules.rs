//! Turn order and action economy, driven through clicks the way a squad
//! screen would drive them.

use common::{FxHashSet, Position};
use game::battle::{BattleManager, BattleObserver, CellView, ClickOutcome};
use proptest::prelude::*;
use roster::{
    CharacterDatabase, MemoryStore, Roster, RosterError, SquadRecord, SquadStore, Unit,
};

//====================================================================

#[derive(Debug, Default)]
struct Recorder {
    refreshes: Vec<(u32, Vec<CellView>)>,
}

impl BattleObserver for Recorder {
    fn refresh(&mut self, round: u32, cells: &[CellView]) {
        self.refreshes.push((round, cells.to_vec()));
    }
}

fn battle(units: &[(Position, Unit)]) -> BattleManager<MemoryStore, Recorder> {
    let mut roster = Roster::default();
    for (position, unit) in units {
        roster.set(*position, Some(unit.clone())).unwrap();
    }
    BattleManager::new(roster, MemoryStore::default(), Recorder::default())
}

fn actions(battle: &BattleManager<MemoryStore, Recorder>, position: Position) -> u32 {
    battle.roster().get(position).unwrap().actions_remaining
}

fn inactive(battle: &BattleManager<MemoryStore, Recorder>, position: Position) -> bool {
    battle.roster().get(position).unwrap().inactive
}

//====================================================================

#[test]
fn two_unit_round_plays_out() {
    let mut battle = battle(&[
        (Position::A1, Unit::new("A", 10, 2)),
        (Position::A2, Unit::new("B", 5, 1)),
    ]);

    assert_eq!(battle.turn_order(), &[Position::A1, Position::A2]);
    assert_eq!(battle.current_index(), 0);

    battle.handle_click(Position::A1);
    assert_eq!(actions(&battle, Position::A1), 1);
    assert!(battle.is_current_character(Position::A1));

    battle.handle_click(Position::A1);
    assert_eq!(actions(&battle, Position::A1), 0);
    assert!(inactive(&battle, Position::A1));
    assert!(battle.is_current_character(Position::A2));

    battle.handle_click(Position::A2);
    assert_eq!(battle.round(), 2);
    assert_eq!(actions(&battle, Position::A1), 2);
    assert_eq!(actions(&battle, Position::A2), 1);
    assert!(!inactive(&battle, Position::A1));
    assert!(!inactive(&battle, Position::A2));
    assert_eq!(battle.turn_order(), &[Position::A1, Position::A2]);
    assert_eq!(battle.current_index(), 0);
}

#[test]
fn last_action_on_self_click_advances_in_the_same_call() {
    let mut battle = battle(&[
        (Position::A1, Unit::new("A", 10, 1)),
        (Position::A2, Unit::new("B", 5, 1)),
        (Position::A3, Unit::new("C", 1, 1)),
    ]);

    let outcome = battle.handle_click(Position::A1);

    assert_eq!(
        outcome,
        ClickOutcome::Spent {
            position: Position::A1
        }
    );
    assert_eq!(actions(&battle, Position::A1), 0);
    assert!(inactive(&battle, Position::A1));
    assert_eq!(battle.current_position(), Some(Position::A2));
}

#[test]
fn move_relocates_the_acting_unit() {
    let mut battle = battle(&[
        (Position::A1, Unit::new("A", 10, 2)),
        (Position::A2, Unit::new("B", 5, 1)),
    ]);

    let outcome = battle.handle_click(Position::C4);

    assert_eq!(
        outcome,
        ClickOutcome::Moved {
            from: Position::A1,
            to: Position::C4
        }
    );
    assert!(battle.roster().get(Position::A1).is_none());
    assert_eq!(battle.roster().get(Position::C4).unwrap().id, "A");
    assert_eq!(battle.roster().occupied_count(), 2);
    assert_eq!(battle.turn_order(), &[Position::C4, Position::A2]);
    assert!(battle.is_current_character(Position::C4));
    assert_eq!(actions(&battle, Position::C4), 1);
}

#[test]
fn move_does_not_resort_the_queue() {
    let mut battle = battle(&[
        (Position::A1, Unit::new("A", 10, 2)),
        (Position::B1, Unit::new("B", 5, 1)),
        (Position::C1, Unit::new("C", 1, 1)),
    ]);

    battle.handle_click(Position::C4);

    assert_eq!(
        battle.turn_order(),
        &[Position::C4, Position::B1, Position::C1]
    );
}

#[test]
fn swap_exchanges_units_and_queue_entries() {
    let mut battle = battle(&[
        (Position::A1, Unit::new("A", 10, 2)),
        (Position::A2, Unit::new("B", 5, 1)),
        (Position::A3, Unit::new("C", 1, 1)),
    ]);

    let outcome = battle.handle_click(Position::A2);

    assert_eq!(
        outcome,
        ClickOutcome::Swapped {
            from: Position::A1,
            to: Position::A2
        }
    );
    assert_eq!(battle.roster().get(Position::A1).unwrap().id, "B");
    assert_eq!(battle.roster().get(Position::A2).unwrap().id, "A");
    assert_eq!(battle.roster().get(Position::A3).unwrap().id, "C");
    assert_eq!(actions(&battle, Position::A3), 1);

    // A's entry now reads A2, B's reads A1.
    assert_eq!(
        battle.turn_order(),
        &[Position::A2, Position::A1, Position::A3]
    );
    assert_eq!(battle.current_position(), Some(Position::A2));
    assert_eq!(actions(&battle, Position::A2), 1);
    assert_eq!(actions(&battle, Position::A1), 1);
}

#[test]
fn swapping_with_a_spent_unit_keeps_its_entry_in_step() {
    let mut battle = battle(&[
        (Position::A1, Unit::new("A", 10, 1)),
        (Position::A2, Unit::new("B", 5, 3)),
    ]);

    battle.handle_click(Position::A1);
    assert!(battle.is_current_character(Position::A2));

    // B swaps with the already spent A.
    battle.handle_click(Position::A1);

    assert_eq!(battle.roster().get(Position::A1).unwrap().id, "B");
    assert_eq!(battle.roster().get(Position::A2).unwrap().id, "A");
    assert_eq!(battle.turn_order(), &[Position::A2, Position::A1]);
    assert!(battle.is_current_character(Position::A1));
    assert_eq!(actions(&battle, Position::A1), 2);

    battle.handle_click(Position::A1);
    battle.handle_click(Position::A1);

    assert_eq!(battle.round(), 2);
    assert_eq!(battle.turn_order(), &[Position::A2, Position::A1]);
}

#[test]
fn three_single_action_units_complete_a_round() {
    let units = [
        (Position::B1, Unit::new("A", 3, 1)),
        (Position::B2, Unit::new("B", 8, 1)),
        (Position::B3, Unit::new("C", 6, 1)),
    ];
    let mut battle = battle(&units);
    let initial_order = battle.turn_order().to_vec();

    for _ in 0..3 {
        let current = battle.current_position().unwrap();
        battle.handle_click(current);
    }

    assert_eq!(battle.round(), 2);
    for (position, _) in &units {
        assert_eq!(actions(&battle, *position), 1);
        assert!(!inactive(&battle, *position));
    }
    assert_eq!(battle.turn_order(), initial_order.as_slice());
    assert_eq!(battle.current_index(), 0);
}

#[test]
fn empty_roster_stays_idle() {
    let mut battle = battle(&[]);

    for position in Position::ALL {
        assert!(!battle.is_current_character(position));
        assert_eq!(battle.handle_click(position), ClickOutcome::Ignored);
    }

    assert!(battle.turn_order().is_empty());
    assert_eq!(battle.round(), 1);
    assert_eq!(battle.store().saves(), 0);
}

#[test]
fn every_action_is_saved_and_observed_once_settled() {
    let mut battle = battle(&[
        (Position::A1, Unit::new("A", 10, 1)),
        (Position::A2, Unit::new("B", 5, 1)),
    ]);
    let initial_refreshes = battle.observer().refreshes.len();

    battle.handle_click(Position::A4);
    battle.handle_click(Position::A2);

    assert_eq!(battle.store().saves(), 2);
    assert_eq!(battle.observer().refreshes.len(), initial_refreshes + 2);

    let saved = battle.store().record().unwrap();
    assert_eq!(saved.member(Position::A4), Some("A"));
    assert_eq!(saved.member(Position::A1), None);

    // The round rolled over inside the last click; the observer only saw the
    // fresh round.
    let (round, cells) = battle.observer().refreshes.last().unwrap();
    assert_eq!(*round, 2);
    assert!(cells.iter().all(|cell| !cell.is_greyed()));
    let current = cells.iter().find(|cell| cell.is_current).unwrap();
    assert_eq!(current.position, Position::A4);
}

#[derive(Debug, Default)]
struct FailingStore {
    attempts: usize,
}

impl SquadStore for FailingStore {
    fn load(&mut self) -> roster::Result<SquadRecord> {
        Err(RosterError::MissingSquad)
    }

    fn save(&mut self, _record: &SquadRecord) -> roster::Result<()> {
        self.attempts += 1;
        Err(RosterError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only squad file",
        )))
    }
}

#[test]
fn failed_saves_leave_the_battle_running() {
    let mut roster = Roster::default();
    roster.set(Position::A1, Some(Unit::new("A", 10, 1))).unwrap();
    roster.set(Position::A2, Some(Unit::new("B", 5, 1))).unwrap();
    let mut battle = BattleManager::new(roster, FailingStore::default(), Recorder::default());

    let outcome = battle.handle_click(Position::A1);

    assert_eq!(
        outcome,
        ClickOutcome::Spent {
            position: Position::A1
        }
    );
    assert_eq!(battle.roster().get(Position::A1).unwrap().actions_remaining, 0);
    assert!(battle.roster().get(Position::A1).unwrap().inactive);
    assert!(battle.is_current_character(Position::A2));

    battle.handle_click(Position::A2);

    assert_eq!(battle.store().attempts, 2);
    assert_eq!(battle.round(), 2);
    assert_eq!(battle.roster().get(Position::A1).unwrap().actions_remaining, 1);
    assert!(battle.is_current_character(Position::A1));

    // One refresh from the initial turn order, then one per click.
    let refreshes = &battle.observer().refreshes;
    assert_eq!(refreshes.len(), 3);
    assert_eq!(refreshes[2].0, 2);
}

#[test]
fn battle_loads_fresh_from_store() {
    let database = CharacterDatabase::from_templates([
        Unit::new("Knight", 4, 1),
        Unit::new("Rogue", 12, 2),
    ])
    .unwrap();

    let record = SquadRecord {
        squad_name: "Vanguard".into(),
        members: [("PA1", "Knight"), ("PB2", "Rogue"), ("PC3", "")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    };

    let (battle, error) = BattleManager::load(&database, MemoryStore::new(record), ());

    assert!(error.is_none());
    assert_eq!(battle.roster().name(), "Vanguard");
    assert_eq!(battle.turn_order(), &[Position::B2, Position::A1]);
}

#[test]
fn failed_load_starts_an_empty_idle_battle() {
    let database = CharacterDatabase::default();

    let (mut battle, error) = BattleManager::load(&database, MemoryStore::default(), ());

    assert!(error.is_some());
    assert_eq!(battle.roster().occupied_count(), 0);
    assert_eq!(battle.handle_click(Position::A1), ClickOutcome::Ignored);
}

//====================================================================

fn arb_roster() -> impl Strategy<Value = Vec<(Position, i32, u32)>> {
    prop::collection::btree_map(0usize..Position::COUNT, (-5i32..20, 1u32..4), 0..=8).prop_map(
        |slots| {
            slots
                .into_iter()
                .filter_map(|(index, (initiative, actions))| {
                    Some((Position::from_index(index)?, initiative, actions))
                })
                .collect()
        },
    )
}

fn build(slots: &[(Position, i32, u32)]) -> BattleManager<MemoryStore, Recorder> {
    let units = slots
        .iter()
        .enumerate()
        .map(|(n, (position, initiative, actions))| {
            (*position, Unit::new(format!("unit{}", n), *initiative, *actions))
        })
        .collect::<Vec<_>>();
    battle(&units)
}

proptest! {
    #[test]
    fn turn_order_holds_each_ready_unit_once(slots in arb_roster()) {
        let battle = build(&slots);
        let order = battle.turn_order();

        prop_assert_eq!(order.len(), slots.len());

        let unique = order.iter().copied().collect::<FxHashSet<_>>();
        prop_assert_eq!(unique.len(), order.len());

        for pair in order.windows(2) {
            let first = battle.roster().get(pair[0]).unwrap().initiative;
            let second = battle.roster().get(pair[1]).unwrap().initiative;
            prop_assert!(first > second || (first == second && pair[0] < pair[1]));
        }
    }

    #[test]
    fn action_budgets_stay_in_bounds(
        slots in arb_roster(),
        clicks in prop::collection::vec(0usize..Position::COUNT, 0..60),
    ) {
        let mut battle = build(&slots);

        for index in clicks {
            battle.handle_click(Position::ALL[index]);

            let mut ids = FxHashSet::default();
            for (_, unit) in battle.roster().occupied() {
                prop_assert!(unit.actions_remaining <= unit.actions_per_round);
                prop_assert!(!unit.inactive || unit.actions_remaining == 0);
                prop_assert!(ids.insert(unit.id.clone()));
            }

            prop_assert_eq!(battle.roster().occupied_count(), slots.len());

            let queued = battle.turn_order().iter().copied().collect::<FxHashSet<_>>();
            prop_assert_eq!(queued.len(), battle.turn_order().len());
        }
    }

    #[test]
    fn someone_can_always_act_after_a_click(
        slots in arb_roster(),
        clicks in prop::collection::vec(0usize..Position::COUNT, 1..40),
    ) {
        prop_assume!(!slots.is_empty());
        let mut battle = build(&slots);

        for index in clicks {
            battle.handle_click(Position::ALL[index]);
            prop_assert!(battle.current_unit().is_some());
        }
    }
}

//====================================================================
