//====================================================================

use std::collections::BTreeMap;

use common::Position;
use hecs::{Entity, Ref, World};

use crate::{error::Result, RosterError, Unit};

//====================================================================

pub const DEFAULT_SQUAD_NAME: &str = "Default Squad";

/// Position to occupant mapping and sole owner of the units in it.
///
/// Units live in a private world; slots only hold entity handles. Moving or
/// swapping units shuffles handles and never copies a `Unit`, and `set` only
/// accepts owned values, so one unit can never sit in two slots.
pub struct Roster {
    name: String,
    world: World,
    slots: BTreeMap<Position, Option<Entity>>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(DEFAULT_SQUAD_NAME)
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self
            .slots
            .keys()
            .map(|position| (*position, self.get(*position).map(|unit| unit.id.clone())))
            .collect::<BTreeMap<_, _>>();

        f.debug_struct("Roster")
            .field("name", &self.name)
            .field("slots", &slots)
            .finish()
    }
}

impl Roster {
    /// Empty roster holding every standard position.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_positions(name, Position::ALL)
    }

    pub fn with_positions(
        name: impl Into<String>,
        positions: impl IntoIterator<Item = Position>,
    ) -> Self {
        Self {
            name: name.into(),
            world: World::new(),
            slots: positions.into_iter().map(|position| (position, None)).collect(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        self.slots.contains_key(&position)
    }

    /// Present positions in enumeration order.
    #[inline]
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.slots.keys().copied()
    }

    /// Number of present positions, occupied or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.slots.values().filter(|slot| slot.is_some()).count()
    }

    #[inline]
    fn entity(&self, position: Position) -> Option<Entity> {
        *self.slots.get(&position)?
    }
}

impl Roster {
    pub fn get(&self, position: Position) -> Option<Ref<'_, Unit>> {
        let entity = self.entity(position)?;
        self.world.get::<&Unit>(entity).ok()
    }

    pub fn unit_mut(&mut self, position: Position) -> Option<&mut Unit> {
        let entity = self.entity(position)?;
        self.world.query_one_mut::<&mut Unit>(entity).ok()
    }

    /// Replaces the occupant of `position`, handing back the previous one.
    pub fn set(&mut self, position: Position, unit: Option<Unit>) -> Result<Option<Unit>> {
        let slot = self
            .slots
            .get_mut(&position)
            .ok_or_else(|| RosterError::UnknownPosition(position.to_string()))?;

        let previous = slot.take();
        *slot = unit.map(|unit| self.world.spawn((unit,)));

        Ok(previous.and_then(|entity| {
            let unit = self.world.remove_one::<Unit>(entity).ok();
            self.world.despawn(entity).ok();
            unit
        }))
    }

    /// Exchanges the occupants of two positions, either of which may be empty.
    /// Returns false without touching anything if a position is not present.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        let (Some(&first), Some(&second)) = (self.slots.get(&a), self.slots.get(&b)) else {
            return false;
        };

        self.slots.insert(a, second);
        self.slots.insert(b, first);

        true
    }

    /// Occupied slots in enumeration order. Calling it again restarts the walk.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Ref<'_, Unit>)> + '_ {
        self.slots.iter().filter_map(|(position, entity)| {
            let unit = self.world.get::<&Unit>((*entity)?).ok()?;
            Some((*position, unit))
        })
    }

    pub fn any_eligible(&self) -> bool {
        self.occupied().any(|(_, unit)| unit.is_eligible())
    }

    /// Restores every occupant's budget and clears inactivity.
    pub fn reset_round(&mut self) {
        self.world
            .query_mut::<&mut Unit>()
            .into_iter()
            .for_each(|(_, unit)| unit.reset_round());
    }
}

//====================================================================


//====================================================================
