//====================================================================

use std::fmt::Display;

use common::Position;
use roster::Unit;

//====================================================================

/// What one squad slot should show after a change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub position: Position,
    pub unit: Option<Unit>,
    pub is_current: bool,
}

impl CellView {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.unit.is_none()
    }

    /// Spent units are drawn greyed out until the round resets.
    #[inline]
    pub fn is_greyed(&self) -> bool {
        self.unit.as_ref().map(|unit| unit.inactive).unwrap_or(false)
    }

    pub fn label(&self) -> String {
        match &self.unit {
            Some(unit) => format!(
                "{}\nInitiative: {}\nActions: {}",
                unit.display_name, unit.initiative, unit.actions_remaining
            ),
            None => String::new(),
        }
    }
}

//====================================================================

/// Full stat readout for the character info panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterInfo {
    pub name: String,
    pub health: i32,
    pub attack_power: i32,
    pub defense: i32,
    pub initiative: i32,
    pub actions_remaining: u32,
    pub actions_per_round: u32,
    pub sprite_ref: String,
}

impl From<&Unit> for CharacterInfo {
    fn from(unit: &Unit) -> Self {
        Self {
            name: unit.id.clone(),
            health: unit.health,
            attack_power: unit.attack_power,
            defense: unit.defense,
            initiative: unit.initiative,
            actions_remaining: unit.actions_remaining,
            actions_per_round: unit.actions_per_round,
            sprite_ref: unit.sprite_ref.clone(),
        }
    }
}

impl Display for CharacterInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Health: {}", self.health)?;
        writeln!(f, "Attack: {}", self.attack_power)?;
        writeln!(f, "Defense: {}", self.defense)?;
        writeln!(f, "Initiative: {}", self.initiative)?;
        write!(
            f,
            "Actions: {}/{}",
            self.actions_remaining, self.actions_per_round
        )
    }
}

//====================================================================

/// Receives the settled board after every change the battle makes.
pub trait BattleObserver {
    fn refresh(&mut self, round: u32, cells: &[CellView]);
}

impl BattleObserver for () {
    #[inline]
    fn refresh(&mut self, _round: u32, _cells: &[CellView]) {}
}

impl<O: BattleObserver + ?Sized> BattleObserver for Box<O> {
    #[inline]
    fn refresh(&mut self, round: u32, cells: &[CellView]) {
        (**self).refresh(round, cells)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl BattleObserver for LogObserver {
    fn refresh(&mut self, round: u32, cells: &[CellView]) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }

        log::debug!(
            "Round {} board: {}",
            round,
            cells
                .iter()
                .filter_map(|cell| {
                    let unit = cell.unit.as_ref()?;
                    Some(format!(
                        "{}{}={}({})",
                        match cell.is_current {
                            true => "*",
                            false => "",
                        },
                        cell.position,
                        unit.display_name,
                        unit.actions_remaining
                    ))
                })
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
}

//====================================================================


//====================================================================
