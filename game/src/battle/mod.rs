//====================================================================

use common::Position;
use roster::{CharacterDatabase, Ref, Roster, RosterError, SquadStore, Unit};

pub use cells::{BattleObserver, CellView, CharacterInfo, LogObserver};

pub mod cells;

//====================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing to do: no turn order, or the click named no slot.
    Ignored,
    /// The current entry could no longer act and the turn moved on.
    Resynced,
    Spent { position: Position },
    Moved { from: Position, to: Position },
    Swapped { from: Position, to: Position },
}

//====================================================================

/// Turn order and action economy over one roster.
///
/// The turn order only ever holds positions. It is rebuilt from the roster
/// at the start of every round and patched in place when a queued unit
/// moves, so each entry keeps tracking its unit until the next rebuild.
#[derive(Debug)]
pub struct BattleManager<S: SquadStore, O: BattleObserver> {
    roster: Roster,
    store: S,
    observer: O,

    turn_order: Vec<Position>,
    current_index: usize,
    round: u32,
}

impl<S: SquadStore, O: BattleObserver> BattleManager<S, O> {
    pub fn new(roster: Roster, store: S, observer: O) -> Self {
        let mut battle = Self {
            roster,
            store,
            observer,
            turn_order: Vec::new(),
            current_index: 0,
            round: 1,
        };

        log::info!("------Starting round {}------", battle.round);
        battle.calculate_turn_order();
        battle
    }

    /// Builds the roster from the store's saved layout. When the store has
    /// nothing usable the battle starts empty and the error is handed back.
    pub fn load(
        database: &CharacterDatabase,
        mut store: S,
        observer: O,
    ) -> (Self, Option<RosterError>) {
        let (roster, error) = match store.load() {
            Ok(record) => (Roster::from_record(&record, database), None),
            Err(e) => {
                log::error!("Unable to load squad, starting empty: {}", e);
                (Roster::default(), Some(e))
            }
        };

        (Self::new(roster, store, observer), error)
    }
}

//--------------------------------------------------

impl<S: SquadStore, O: BattleObserver> BattleManager<S, O> {
    #[inline]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[inline]
    pub fn turn_order(&self) -> &[Position] {
        &self.turn_order
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[inline]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[inline]
    pub fn current_position(&self) -> Option<Position> {
        self.turn_order.get(self.current_index).copied()
    }

    /// Occupant of the current entry, provided it may still act.
    pub fn current_unit(&self) -> Option<Ref<'_, Unit>> {
        self.roster
            .get(self.current_position()?)
            .filter(|unit| unit.is_eligible())
    }

    #[inline]
    pub fn is_current_character(&self, position: Position) -> bool {
        !self.turn_order.is_empty() && self.turn_order[self.current_index] == position
    }

    pub fn cells(&self) -> Vec<CellView> {
        self.roster
            .positions()
            .map(|position| CellView {
                position,
                unit: self.roster.get(position).map(|unit| Unit::clone(&unit)),
                is_current: self.is_current_character(position),
            })
            .collect()
    }

    pub fn character_info(&self, position: Position) -> Option<CharacterInfo> {
        self.roster
            .get(position)
            .map(|unit| CharacterInfo::from(&*unit))
    }

    #[inline]
    fn is_eligible_at(&self, position: Position) -> bool {
        self.roster
            .get(position)
            .map(|unit| unit.is_eligible())
            .unwrap_or(false)
    }
}

//--------------------------------------------------

impl<S: SquadStore, O: BattleObserver> BattleManager<S, O> {
    /// Rebuilds the turn order from scratch and refreshes the observer.
    pub fn calculate_turn_order(&mut self) {
        self.rebuild_turn_order();
        self.notify();
    }

    fn rebuild_turn_order(&mut self) {
        let mut order = self
            .roster
            .occupied()
            .filter(|(_, unit)| !unit.inactive)
            .map(|(position, unit)| (unit.initiative, position))
            .collect::<Vec<_>>();

        // Stable, so equal initiatives keep position order.
        order.sort_by(|a, b| b.0.cmp(&a.0));

        self.turn_order = order.into_iter().map(|(_, position)| position).collect();
        self.current_index = 0;

        log::debug!("Turn order = {:?}", self.turn_order);
    }

    /// Moves the cursor forward to the next unit that can act. After a full
    /// lap without one the cursor is left where it started.
    pub fn advance_turn(&mut self) {
        let len = self.turn_order.len();

        for _ in 0..len {
            self.current_index = (self.current_index + 1) % len;

            if self.is_eligible_at(self.turn_order[self.current_index]) {
                log::debug!("Turn passes to {}", self.turn_order[self.current_index]);
                return;
            }
        }

        log::debug!("No unit left to act this round");
    }

    /// Starts a fresh round once nobody can act. Returns whether it did.
    /// A roster without a single unit has no rounds to complete.
    pub fn check_round_complete(&mut self) -> bool {
        if self.roster.occupied_count() == 0 || self.roster.any_eligible() {
            return false;
        }

        self.roster.reset_round();
        self.round += 1;

        log::info!("------Starting round {}------", self.round);
        self.rebuild_turn_order();

        true
    }

    /// Key based entry point for collaborators that only know slot names.
    pub fn handle_click_key(&mut self, key: &str) -> ClickOutcome {
        match key.parse::<Position>() {
            Ok(position) => self.handle_click(position),
            Err(e) => {
                log::debug!("Ignoring click: {}", e);
                ClickOutcome::Ignored
            }
        }
    }

    pub fn handle_click(&mut self, clicked: Position) -> ClickOutcome {
        let Some(active) = self.current_position() else {
            return ClickOutcome::Ignored;
        };

        if !self.is_eligible_at(active) {
            log::debug!("{} can no longer act, moving on", active);
            self.advance_turn();
            self.check_round_complete();
            self.notify();
            return ClickOutcome::Resynced;
        }

        let outcome = if clicked == active {
            ClickOutcome::Spent { position: active }
        } else if !self.roster.contains(clicked) {
            log::debug!("Ignoring click on {}: not part of this roster", clicked);
            return ClickOutcome::Ignored;
        } else if self.roster.get(clicked).is_none() {
            self.roster.swap(active, clicked);
            self.turn_order[self.current_index] = clicked;

            ClickOutcome::Moved {
                from: active,
                to: clicked,
            }
        } else {
            self.roster.swap(active, clicked);
            self.exchange_entries(active, clicked);

            ClickOutcome::Swapped {
                from: active,
                to: clicked,
            }
        };

        log::debug!("Round {}: {:?}", self.round, outcome);

        // Whichever branch ran, the acting unit now stands on `clicked`.
        let exhausted = match self.roster.unit_mut(clicked) {
            Some(unit) => {
                unit.spend_action();
                unit.check_inactive();
                unit.actions_remaining == 0
            }
            None => false,
        };

        if exhausted {
            self.advance_turn();
        }

        self.persist();
        self.check_round_complete();
        self.notify();

        outcome
    }

    /// Re-points the queue entries of two units that just traded places.
    /// A target that is not queued (already inactive) has no entry to fix.
    fn exchange_entries(&mut self, active: Position, target: Position) {
        let active_entry = self.turn_order.iter().position(|p| *p == active);
        let target_entry = self.turn_order.iter().position(|p| *p == target);

        if let Some(index) = target_entry {
            self.turn_order[index] = active;
        }

        if let Some(index) = active_entry {
            self.turn_order[index] = target;
            self.current_index = index;
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.roster.to_record()) {
            log::error!("Failed to save squad, keeping in-memory state: {}", e);
        }
    }

    fn notify(&mut self) {
        let cells = self.cells();
        self.observer.refresh(self.round, &cells);
    }
}

//====================================================================


//====================================================================
