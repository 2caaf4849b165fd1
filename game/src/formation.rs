//====================================================================

use common::Position;
use roster::{Roster, SquadStore};

//====================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormationOutcome {
    Ignored,
    Selected(Position),
    Deselected(Position),
    Moved { from: Position, to: Position },
    Swapped { from: Position, to: Position },
}

impl FormationOutcome {
    /// Whether the roster layout changed and should be saved.
    #[inline]
    pub fn changed_layout(&self) -> bool {
        matches!(
            self,
            FormationOutcome::Moved { .. } | FormationOutcome::Swapped { .. }
        )
    }
}

/// Select-then-place rearranging of a squad outside of battle. No actions
/// are spent and no turn order exists here.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormationEditor {
    selected: Option<Position>,
}

impl FormationEditor {
    #[inline]
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Selects, deselects or places. Every layout change is saved to `store`.
    pub fn click(
        &mut self,
        roster: &mut Roster,
        store: &mut impl SquadStore,
        position: Position,
    ) -> FormationOutcome {
        let outcome = self.select_or_place(roster, position);

        if outcome.changed_layout() {
            if let Err(e) = store.save(&roster.to_record()) {
                log::error!("Failed to save squad formation: {}", e);
            }
        }

        outcome
    }

    fn select_or_place(&mut self, roster: &mut Roster, position: Position) -> FormationOutcome {
        if !roster.contains(position) {
            return FormationOutcome::Ignored;
        }

        match self.selected {
            None => match roster.get(position).is_some() {
                true => {
                    self.selected = Some(position);
                    FormationOutcome::Selected(position)
                }
                false => FormationOutcome::Ignored,
            },

            Some(selected) if selected == position => {
                self.selected = None;
                FormationOutcome::Deselected(position)
            }

            Some(selected) => {
                let target_empty = roster.get(position).is_none();
                roster.swap(selected, position);
                self.selected = None;

                log::debug!("Formation: {} -> {}", selected, position);

                match target_empty {
                    true => FormationOutcome::Moved {
                        from: selected,
                        to: position,
                    },
                    false => FormationOutcome::Swapped {
                        from: selected,
                        to: position,
                    },
                }
            }
        }
    }
}

//====================================================================


//====================================================================
